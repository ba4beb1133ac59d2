//! Behavioural tests for choice converters.

#![expect(clippy::expect_used, reason = "tests assert conversion paths")]

use rstest::{fixture, rstest};
use typefield::{BuildError, ChoiceBuilder, Converter, make_choice, make_choice_indexed};

const NUMBER_WORDS: [&str; 3] = ["one", "two", "three"];

#[fixture]
fn number_as_word() -> Converter<String> {
    make_choice("NumberAsWord", NUMBER_WORDS).expect("NumberAsWord should build")
}

#[rstest]
#[case("one")]
#[case("two")]
#[case("three")]
fn plain_choices_map_to_themselves(number_as_word: Converter<String>, #[case] choice: &str) {
    assert_eq!(
        number_as_word
            .parse(choice)
            .expect("conversion should succeed")
            .as_deref(),
        Some(choice)
    );
}

#[rstest]
#[case(0, "one")]
#[case(1, "two")]
#[case(2, "three")]
fn indexed_choices_map_to_definition_index(#[case] index: usize, #[case] choice: &str) {
    let indexed =
        make_choice_indexed("NumberAsWord", NUMBER_WORDS).expect("NumberAsWord should build");
    assert_eq!(
        indexed.parse(choice).expect("conversion should succeed"),
        Some((index, choice.to_owned()))
    );
}

#[rstest]
fn choices_reject_trailing_text(number_as_word: Converter<String>) {
    assert!(!number_as_word.is_match("three "));
    assert!(!number_as_word.is_match("threefold"));
}

#[test]
fn prefix_choices_match_the_full_literal() {
    let indexed = make_choice_indexed("Step", ["one", "one-two"]).expect("Step should build");
    assert_eq!(
        indexed.parse("one-two").expect("conversion should succeed"),
        Some((1, "one-two".to_owned()))
    );
    assert_eq!(
        indexed.parse("one").expect("conversion should succeed"),
        Some((0, "one".to_owned()))
    );
}

#[test]
fn strict_choices_expose_case_sensitive_mapping() {
    let strict = ChoiceBuilder::new(["Alpha", "Beta"])
        .strict(true)
        .build("Greek")
        .expect("Greek should build");
    let mapping = strict.mapping().expect("choices expose their table");
    assert!(mapping.is_case_sensitive());
    assert_eq!(mapping.labels().collect::<Vec<_>>(), ["Alpha", "Beta"]);
    assert!(!strict.is_match("alpha"));
}

#[test]
fn duplicate_choices_are_rejected() {
    let Err(err) = make_choice("Words", ["one", "two", "one"]) else {
        panic!("duplicate choices should be rejected");
    };
    assert!(matches!(err, BuildError::DuplicateChoice { ref choice, .. } if choice == "one"));
}

#[test]
fn empty_choice_sets_are_rejected() {
    let Err(err) = make_choice("Nothing", Vec::<String>::new()) else {
        panic!("empty choice sets should be rejected");
    };
    assert!(matches!(err, BuildError::EmptyMapping { .. }));
}
