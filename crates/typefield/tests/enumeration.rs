//! Behavioural tests for enumeration converters.

#![expect(clippy::expect_used, reason = "tests assert conversion paths")]

mod support;

use rstest::rstest;
use typefield::{BuildError, Labelled, make_enum, make_enum_from};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Color {
    Red,
    Green,
    Blue,
}

impl Labelled for Color {
    fn members() -> Vec<Self> {
        vec![Self::Red, Self::Green, Self::Blue]
    }

    fn label(&self) -> &str {
        match self {
            Self::Red => "red",
            Self::Green => "green",
            Self::Blue => "blue",
        }
    }
}

#[rstest]
#[case("yes", true)]
#[case("YES", true)]
#[case("Yes", true)]
#[case("no", false)]
#[case("nO", false)]
#[case("yeſ", true)]
#[case("YEſ", true)]
fn yes_no_matches_any_letter_case(#[case] text: &str, #[case] expected: bool) {
    let yes_no = support::yes_no();
    assert_eq!(
        yes_no.parse(text).expect("conversion should succeed"),
        Some(expected)
    );
}

#[rstest]
#[case("yes ")]
#[case("__yes__")]
#[case("yesno")]
#[case("y")]
fn yes_no_rejects_surrounding_text(#[case] text: &str) {
    let yes_no = support::yes_no();
    assert!(!yes_no.is_match(text), "{text:?} should not match");
}

#[test]
fn enumeration_types_build_converters() {
    let color = make_enum_from::<Color>("Color").expect("Color should build");
    assert_eq!(color.pattern(), "(?i:green|blue|red)");
    assert_eq!(
        color.parse("GREEN").expect("conversion should succeed"),
        Some(Color::Green)
    );
    let labels: Vec<_> = color
        .mapping()
        .expect("enumerations expose their labels")
        .labels()
        .collect();
    assert_eq!(labels, ["red", "green", "blue"]);
}

#[test]
fn ordered_maps_build_converters() {
    let table = std::collections::BTreeMap::from([("low", 1_u8), ("high", 3), ("mid", 2)]);
    let level = make_enum("Level", table).expect("Level should build");
    assert_eq!(level.parse("MID").expect("conversion should succeed"), Some(2));
    assert_eq!(level.regex_group_count(), 0);
}

#[test]
fn case_insensitive_duplicates_are_rejected() {
    let Err(err) = make_enum("Answer", [("yes", 1), ("Yes", 2)]) else {
        panic!("duplicate labels should be rejected");
    };
    assert!(matches!(err, BuildError::DuplicateLabel { .. }));
    assert!(err.to_string().contains("duplicate label `Yes`"));
}

#[rstest]
#[case("σ")]
#[case("Σ")]
#[case("ς")]
fn sigma_forms_share_one_label(#[case] text: &str) {
    let sigma = make_enum("Sigma", [("σ", 1_u8), ("π", 2)]).expect("Sigma should build");
    assert!(sigma.is_match(text));
    assert_eq!(sigma.parse(text).expect("matched text should convert"), Some(1));
}
