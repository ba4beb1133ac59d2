//! Repetition wrappers around existing converters.
//!
//! A wrapper embeds the inner fragment verbatim and only adds non-capturing
//! structure, so its anonymous group count follows from the inner count:
//! unchanged for [`Cardinality::ZeroOrOne`] and doubled for the list modes,
//! whose patterns contain the inner fragment twice.

use std::fmt;
use std::sync::Arc;

use regex::Regex;

use crate::converter::Converter;
use crate::errors::{BuildError, ComposeError, ConversionError};
use crate::fragment::PatternFragment;

/// How many occurrences of a value a field accepts.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Cardinality {
    /// Exactly one value.
    One,
    /// An optional value.
    ZeroOrOne,
    /// A possibly empty list.
    ZeroOrMore,
    /// A non-empty list.
    OneOrMore,
}

impl Cardinality {
    /// Alias for [`Cardinality::ZeroOrOne`].
    pub const OPTIONAL: Self = Self::ZeroOrOne;
    /// Alias for [`Cardinality::ZeroOrMore`].
    pub const MANY0: Self = Self::ZeroOrMore;
    /// Alias for [`Cardinality::OneOrMore`].
    pub const MANY: Self = Self::OneOrMore;
    /// Every cardinality that derives a variant type.
    pub const VARIANTS: [Self; 3] = [Self::ZeroOrOne, Self::ZeroOrMore, Self::OneOrMore];

    /// Whether values form a list.
    #[must_use]
    pub fn is_many(self) -> bool {
        matches!(self, Self::ZeroOrMore | Self::OneOrMore)
    }

    /// Type-name suffix marking the cardinality.
    ///
    /// ```
    /// use typefield::Cardinality;
    /// assert_eq!(Cardinality::ZeroOrOne.suffix(), Some('?'));
    /// assert_eq!(Cardinality::One.suffix(), None);
    /// ```
    #[must_use]
    pub fn suffix(self) -> Option<char> {
        match self {
            Self::One => None,
            Self::ZeroOrOne => Some('?'),
            Self::ZeroOrMore => Some('*'),
            Self::OneOrMore => Some('+'),
        }
    }

    /// Inverse of [`Cardinality::suffix`].
    #[must_use]
    pub fn from_suffix(suffix: char) -> Option<Self> {
        match suffix {
            '?' => Some(Self::ZeroOrOne),
            '*' => Some(Self::ZeroOrMore),
            '+' => Some(Self::OneOrMore),
            _ => None,
        }
    }

    /// Name of the variant derived from `base`, e.g. `Number+`.
    #[must_use]
    pub fn variant_name(self, base: &str) -> String {
        self.suffix()
            .map_or_else(|| base.to_owned(), |suffix| format!("{base}{suffix}"))
    }

    /// Wrap `pattern` so it accepts this many occurrences.
    ///
    /// ```
    /// use typefield::{Cardinality, ListSeparator};
    /// let sep = ListSeparator::default();
    /// assert_eq!(Cardinality::ZeroOrOne.make_pattern(r"\d+", &sep), r"(?:\d+)?");
    /// assert_eq!(
    ///     Cardinality::OneOrMore.make_pattern(r"\d+", &sep),
    ///     r"(?:\d+)(?:\s*,\s*(?:\d+))*"
    /// );
    /// ```
    #[must_use]
    pub fn make_pattern(self, pattern: &str, separator: &ListSeparator) -> String {
        let repeated = || {
            format!(
                "(?:{pattern})(?:{sep}(?:{pattern}))*",
                sep = separator.pattern()
            )
        };
        match self {
            Self::One => pattern.to_owned(),
            Self::ZeroOrOne => format!("(?:{pattern})?"),
            Self::ZeroOrMore => format!("(?:{})?", repeated()),
            Self::OneOrMore => repeated(),
        }
    }

    fn group_multiplier(self) -> usize {
        if self.is_many() { 2 } else { 1 }
    }
}

impl fmt::Display for Cardinality {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Self::One => "one",
            Self::ZeroOrOne => "zero_or_one",
            Self::ZeroOrMore => "zero_or_more",
            Self::OneOrMore => "one_or_more",
        };
        f.write_str(name)
    }
}

/// Separator between list items, with optional whitespace around it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ListSeparator {
    literal: String,
}

impl ListSeparator {
    /// Separator matching `literal` exactly.
    #[must_use]
    pub fn new(literal: impl Into<String>) -> Self {
        Self {
            literal: literal.into(),
        }
    }

    /// The separator text.
    #[must_use]
    pub fn literal(&self) -> &str {
        &self.literal
    }

    /// Regex source for the separator and surrounding whitespace.
    #[must_use]
    pub fn pattern(&self) -> String {
        format!(r"\s*{}\s*", regex::escape(&self.literal))
    }

    /// Text placed between items when rendering a list.
    #[must_use]
    pub fn join<I, S>(&self, items: I) -> String
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let glue = format!("{} ", self.literal);
        items
            .into_iter()
            .map(|item| item.as_ref().to_owned())
            .collect::<Vec<_>>()
            .join(&glue)
    }
}

impl Default for ListSeparator {
    fn default() -> Self {
        Self::new(",")
    }
}

fn check_repeatable<T>(
    inner: &Converter<T>,
    cardinality: Cardinality,
) -> Result<(), ComposeError> {
    if inner.is_anchored() {
        return Err(ComposeError::Anchored {
            name: inner.name().to_owned(),
        });
    }
    if cardinality.is_many() && inner.named_groups() > 0 {
        return Err(ComposeError::NamedGroups {
            name: inner.name().to_owned(),
        });
    }
    if cardinality.is_many() && inner.matches_empty() {
        return Err(ComposeError::EmptyItem {
            name: inner.name().to_owned(),
        });
    }
    Ok(())
}

fn composite_fragment<T>(
    inner: &Converter<T>,
    cardinality: Cardinality,
    separator: &ListSeparator,
) -> PatternFragment {
    PatternFragment::verbatim(
        cardinality.make_pattern(inner.pattern(), separator),
        inner.is_case_sensitive(),
    )
    .with_group_count(inner.regex_group_count() * cardinality.group_multiplier())
}

/// Accept an optional value, mapping absent text to `None`.
///
/// Text consisting only of whitespace counts as absent.
///
/// # Errors
/// [`ComposeError::Anchored`] when the inner pattern is anchored.
///
/// # Examples
/// ```
/// use typefield::{make_enum, with_zero_or_one};
/// let yes_no = make_enum("YesNo", [("yes", true), ("no", false)])?;
/// let maybe = with_zero_or_one(&yes_no)?;
/// assert_eq!(maybe.name(), "YesNo?");
/// assert_eq!(maybe.parse("")?, Some(None));
/// assert_eq!(maybe.parse("no")?, Some(Some(false)));
/// # Ok::<(), Box<dyn std::error::Error>>(())
/// ```
pub fn with_zero_or_one<T>(inner: &Converter<T>) -> Result<Converter<Option<T>>, BuildError>
where
    T: Send + Sync + 'static,
{
    optional(inner, Some, || None)
}

/// Accept an optional value, mapping absent text to `default`.
///
/// # Errors
/// [`ComposeError::Anchored`] when the inner pattern is anchored.
pub fn with_optional_or<T>(inner: &Converter<T>, default: T) -> Result<Converter<T>, BuildError>
where
    T: Clone + Send + Sync + 'static,
{
    optional(inner, |value| value, move || default.clone())
}

fn optional<T, U, W, D>(
    inner: &Converter<T>,
    present: W,
    absent: D,
) -> Result<Converter<U>, BuildError>
where
    T: Send + Sync + 'static,
    W: Fn(T) -> U + Send + Sync + 'static,
    D: Fn() -> U + Send + Sync + 'static,
{
    let cardinality = Cardinality::ZeroOrOne;
    check_repeatable(inner, cardinality)?;
    let fragment = composite_fragment(inner, cardinality, &ListSeparator::default());
    let element = inner.clone();
    let map = move |text: &str| {
        if text.trim().is_empty() {
            Ok(absent())
        } else {
            element.convert(text).map(&present)
        }
    };
    Converter::assemble(
        cardinality.variant_name(inner.name()),
        fragment,
        Arc::new(map),
        None,
    )
}

/// Accept a possibly empty list separated by `separator`.
///
/// # Errors
/// - [`ComposeError::Anchored`] when the inner pattern is anchored.
/// - [`ComposeError::NamedGroups`] when the inner pattern has named groups.
/// - [`ComposeError::EmptyItem`] when the inner pattern can match empty text.
/// - [`ComposeError::EmptySeparator`] when the separator is empty.
pub fn with_zero_or_more<T>(
    inner: &Converter<T>,
    separator: &ListSeparator,
) -> Result<Converter<Vec<T>>, BuildError>
where
    T: Send + Sync + 'static,
{
    with_cardinality(Cardinality::ZeroOrMore, inner, separator)
}

/// Accept a non-empty list separated by `separator`.
///
/// # Errors
/// Same as [`with_zero_or_more`].
///
/// # Examples
/// ```
/// use typefield::{ListSeparator, make_choice, with_one_or_more};
/// let digit = make_choice("Digit", ["0", "1", "2", "3"])?;
/// let digits = with_one_or_more(&digit, &ListSeparator::default())?;
/// assert_eq!(digits.name(), "Digit+");
/// assert_eq!(digits.parse("1, 2,3")?, Some(vec!["1".into(), "2".into(), "3".into()]));
/// assert_eq!(digits.parse("")?, None);
/// # Ok::<(), Box<dyn std::error::Error>>(())
/// ```
pub fn with_one_or_more<T>(
    inner: &Converter<T>,
    separator: &ListSeparator,
) -> Result<Converter<Vec<T>>, BuildError>
where
    T: Send + Sync + 'static,
{
    with_cardinality(Cardinality::OneOrMore, inner, separator)
}

/// Wrap `inner` with any cardinality, producing a list of values.
///
/// [`Cardinality::One`] yields exactly one element and
/// [`Cardinality::ZeroOrOne`] at most one, so converters of every cardinality
/// can share a registry.
///
/// # Errors
/// Same as [`with_zero_or_more`]. The separator is only checked for the list
/// modes.
pub fn with_cardinality<T>(
    cardinality: Cardinality,
    inner: &Converter<T>,
    separator: &ListSeparator,
) -> Result<Converter<Vec<T>>, BuildError>
where
    T: Send + Sync + 'static,
{
    match cardinality {
        Cardinality::One => Ok(inner.clone().map_output(|value| vec![value])),
        Cardinality::ZeroOrOne => optional(inner, |value| vec![value], Vec::new),
        Cardinality::ZeroOrMore | Cardinality::OneOrMore => list(cardinality, inner, separator),
    }
}

fn list<T>(
    cardinality: Cardinality,
    inner: &Converter<T>,
    separator: &ListSeparator,
) -> Result<Converter<Vec<T>>, BuildError>
where
    T: Send + Sync + 'static,
{
    let name = cardinality.variant_name(inner.name());
    if separator.literal().is_empty() {
        return Err(ComposeError::EmptySeparator { name }.into());
    }
    check_repeatable(inner, cardinality)?;
    let fragment = composite_fragment(inner, cardinality, separator);
    let splitter = Regex::new(&separator.pattern()).map_err(|source| BuildError::Regex {
        name: name.clone(),
        source,
    })?;
    let element = inner.clone();
    let allow_empty = cardinality == Cardinality::ZeroOrMore;
    let map = move |text: &str| -> Result<Vec<T>, ConversionError> {
        if text.trim().is_empty() {
            return if allow_empty {
                Ok(Vec::new())
            } else {
                Err(ConversionError::new(text, "expected at least one item"))
            };
        }
        splitter
            .split(text.trim())
            .map(|piece| {
                if piece.is_empty() {
                    Err(ConversionError::new(text, "empty list item"))
                } else {
                    element.convert(piece)
                }
            })
            .collect()
    };
    Converter::assemble(name, fragment, Arc::new(map), None)
}

/// Build one variant of `inner` per requested cardinality.
///
/// # Errors
/// Fails on the first variant that cannot be built.
pub fn make_cardinality_variants<T>(
    inner: &Converter<T>,
    cardinalities: &[Cardinality],
    separator: &ListSeparator,
) -> Result<Vec<Converter<Vec<T>>>, BuildError>
where
    T: Send + Sync + 'static,
{
    cardinalities
        .iter()
        .map(|&cardinality| with_cardinality(cardinality, inner, separator))
        .collect()
}
