//! Converters built from label→value enumerations.

use std::sync::Arc;

use crate::converter::Converter;
use crate::errors::{BuildError, ConversionError};
use crate::fragment::PatternFragment;
use crate::mapping::{Labelled, Mapping};

/// Build a case-insensitive converter from ordered `(label, value)` pairs.
///
/// Any ordered association works: arrays or vectors of pairs, a `BTreeMap`,
/// or the output of an iterator adapter. The pattern alternates every label
/// and accepts nothing else, so `"yes"` never matches `"yes "` or `"__yes__"`.
///
/// # Errors
/// - [`BuildError::EmptyMapping`] when no pairs are supplied.
/// - [`BuildError::EmptyLabel`] when a label is the empty string.
/// - [`BuildError::DuplicateLabel`] when two labels differ only by case.
///
/// # Examples
/// ```
/// use typefield::make_enum;
/// let yes_no = make_enum("YesNo", [("yes", true), ("no", false)])?;
/// assert_eq!(yes_no.pattern(), "(?i:yes|no)");
/// assert_eq!(yes_no.parse("YES")?, Some(true));
/// assert_eq!(yes_no.parse("yes ")?, None);
/// # Ok::<(), Box<dyn std::error::Error>>(())
/// ```
pub fn make_enum<T, I, K>(name: impl Into<String>, entries: I) -> Result<Converter<T>, BuildError>
where
    T: Clone + Send + Sync + 'static,
    I: IntoIterator<Item = (K, T)>,
    K: Into<String>,
{
    let name = name.into();
    let mapping =
        Mapping::from_entries(entries, false).map_err(|clash| BuildError::DuplicateLabel {
            name: name.clone(),
            label: clash.label,
            existing: clash.existing,
        })?;
    if mapping.is_empty() {
        return Err(BuildError::EmptyMapping { name });
    }
    if mapping.labels().any(str::is_empty) {
        return Err(BuildError::EmptyLabel { name });
    }

    let fragment = PatternFragment::alternation(mapping.labels(), false);
    let table = Arc::new(mapping);
    let lookup = Arc::clone(&table);
    let map = move |text: &str| {
        lookup
            .get(text)
            .cloned()
            .ok_or_else(|| ConversionError::new(text, "unknown label"))
    };
    Converter::assemble(name, fragment, Arc::new(map), Some(table))
}

/// Build an enumeration converter from a [`Labelled`] type.
///
/// # Errors
/// Same as [`make_enum`].
///
/// # Examples
/// ```
/// use typefield::{Labelled, make_enum_from};
///
/// #[derive(Debug, Clone, Copy, PartialEq, Eq)]
/// enum Color {
///     Red,
///     Blue,
/// }
///
/// impl Labelled for Color {
///     fn members() -> Vec<Self> {
///         vec![Self::Red, Self::Blue]
///     }
///
///     fn label(&self) -> &str {
///         match self {
///             Self::Red => "red",
///             Self::Blue => "blue",
///         }
///     }
/// }
///
/// let color = make_enum_from::<Color>("Color")?;
/// assert_eq!(color.parse("Blue")?, Some(Color::Blue));
/// # Ok::<(), Box<dyn std::error::Error>>(())
/// ```
pub fn make_enum_from<E>(name: impl Into<String>) -> Result<Converter<E>, BuildError>
where
    E: Labelled + Clone + Send + Sync + 'static,
{
    make_enum(
        name,
        E::members()
            .into_iter()
            .map(|member| (member.label().to_owned(), member)),
    )
}
