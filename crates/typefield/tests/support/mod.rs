//! Converters shared by the typefield integration tests.

#![allow(dead_code, reason = "each test binary uses a different subset of helpers")]
#![expect(clippy::expect_used, reason = "test helpers build known-good converters")]

use typefield::{ConversionError, Converter, PatternFragment, make_choice, make_enum};

/// Decimal numbers such as `42`.
pub fn number() -> Converter<u32> {
    Converter::new("Number", PatternFragment::new(r"\d+"), |text: &str| {
        text.parse::<u32>()
            .map_err(|err| ConversionError::new(text, err.to_string()))
    })
    .expect("number converter should build")
}

/// Case-insensitive `yes` / `no`.
pub fn yes_no() -> Converter<bool> {
    make_enum("YesNo", [("yes", true), ("no", false)]).expect("YesNo should build")
}

/// A single decimal digit, mapped to its value.
pub fn digit() -> Converter<u32> {
    let digits: Vec<String> = (0..=9).map(|d: u32| d.to_string()).collect();
    make_choice("Digit", digits)
        .expect("digit choice should build")
        .map_output(|text| text.chars().next().and_then(|c| c.to_digit(10)).unwrap_or_default())
}
