//! Composable, regex-backed type converters for format-string field
//! extraction.
//!
//! A [`Converter`] pairs a regex fragment describing the text it accepts with
//! a function turning that text into a value. Host matchers splice the
//! fragment into a larger expression and call [`Converter::convert`] on the
//! captured text. The crate builds converters from label tables
//! ([`make_enum`]), literal sets ([`ChoiceBuilder`]) and repetition wrappers
//! ([`with_one_or_more`] and friends), keeps their anonymous group counts
//! exact, and registers them by name in a [`Registry`].
//!
//! [`Schema`] is a small reference host that compiles templates like
//! `"Answer: {answer:YesNo}"` against a registry.
//!
//! ```
//! use typefield::{ListSeparator, Registry, Schema, make_choice, with_one_or_more};
//!
//! let digit = make_choice("Digit", ["0", "1", "2", "3"])?
//!     .map_output(|text| text.parse::<u8>().unwrap_or_default());
//! let digits = with_one_or_more(&digit, &ListSeparator::default())?;
//! let registry = Registry::new([digits])?;
//!
//! let schema = Schema::compile("Numbers: {numbers:Digit+}", &registry)?;
//! let fields = schema.parse("Numbers: 1, 2, 3")?.expect("template matches");
//! assert_eq!(fields.get("numbers"), Some(&vec![1, 2, 3]));
//! # Ok::<(), Box<dyn std::error::Error>>(())
//! ```

mod cardinality;
mod choice;
mod converter;
mod enumeration;
mod errors;
mod field;
mod fragment;
mod mapping;
mod registry;
mod schema;

pub use cardinality::{
    Cardinality, ListSeparator, make_cardinality_variants, with_cardinality, with_one_or_more,
    with_optional_or, with_zero_or_more, with_zero_or_one,
};
pub use choice::{ChoiceBuilder, make_choice, make_choice_indexed};
pub use converter::Converter;
pub use enumeration::{make_enum, make_enum_from};
pub use errors::{
    BuildError, ComposeError, ConversionError, PlaceholderErrorInfo, SchemaError, VariantError,
};
pub use field::CardinalityField;
pub use fragment::{DEFAULT_PATTERN, PatternFragment};
pub use mapping::{Labelled, Mapping};
pub use registry::Registry;
pub use schema::{Fields, Schema};
