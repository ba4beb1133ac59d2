//! Ordered label tables backing enumeration and choice converters.

use std::collections::HashMap;

use regex_syntax::hir::{ClassUnicode, ClassUnicodeRange};

/// Enumeration types that can list their members with a textual label.
///
/// Implementing this trait lets [`make_enum_from`](crate::make_enum_from)
/// build a converter straight from the type.
///
/// # Examples
/// ```
/// use typefield::Labelled;
///
/// #[derive(Debug, Clone, Copy, PartialEq, Eq)]
/// enum Color {
///     Red,
///     Green,
/// }
///
/// impl Labelled for Color {
///     fn members() -> Vec<Self> {
///         vec![Self::Red, Self::Green]
///     }
///
///     fn label(&self) -> &str {
///         match self {
///             Self::Red => "red",
///             Self::Green => "green",
///         }
///     }
/// }
///
/// assert_eq!(Color::members().len(), 2);
/// ```
pub trait Labelled: Sized {
    /// Every member in definition order.
    fn members() -> Vec<Self>;

    /// Label the member is written as in input text.
    fn label(&self) -> &str;
}

/// Ordered collection of `(label, value)` pairs with unique labels.
///
/// Lookups fold letter case unless the table was built case-sensitive, using
/// the same simple case folding as a `(?i)` regex. Iteration always follows
/// definition order.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Mapping<T> {
    entries: Vec<(String, T)>,
    index: HashMap<String, usize>,
    case_sensitive: bool,
}

/// Two labels collided while building a [`Mapping`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) struct LabelClash {
    pub label: String,
    pub existing: String,
}

impl<T> Mapping<T> {
    pub(crate) fn from_entries<I, K>(entries: I, case_sensitive: bool) -> Result<Self, LabelClash>
    where
        I: IntoIterator<Item = (K, T)>,
        K: Into<String>,
    {
        let mut table = Self {
            entries: Vec::new(),
            index: HashMap::new(),
            case_sensitive,
        };
        for (label, value) in entries {
            let label = label.into();
            let key = table.key(&label);
            if let Some(existing) = table
                .index
                .get(&key)
                .and_then(|&position| table.entries.get(position))
            {
                return Err(LabelClash {
                    label,
                    existing: existing.0.clone(),
                });
            }
            table.index.insert(key, table.entries.len());
            table.entries.push((label, value));
        }
        Ok(table)
    }

    fn key(&self, label: &str) -> String {
        if self.case_sensitive {
            label.to_owned()
        } else {
            label.chars().map(fold_char).collect()
        }
    }

    /// Look up the value for `label`.
    #[must_use]
    pub fn get(&self, label: &str) -> Option<&T> {
        self.entry(label).map(|(_, value)| value)
    }

    /// Definition-order position of `label`.
    #[must_use]
    pub fn position(&self, label: &str) -> Option<usize> {
        self.index.get(&self.key(label)).copied()
    }

    /// The stored `(label, value)` pair for `label`, with the label spelled
    /// as it was defined.
    #[must_use]
    pub fn entry(&self, label: &str) -> Option<(&str, &T)> {
        let position = self.position(label)?;
        self.entries
            .get(position)
            .map(|(stored, value)| (stored.as_str(), value))
    }

    /// Labels in definition order.
    pub fn labels(&self) -> impl Iterator<Item = &str> {
        self.entries.iter().map(|(label, _)| label.as_str())
    }

    /// Pairs in definition order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &T)> {
        self.entries
            .iter()
            .map(|(label, value)| (label.as_str(), value))
    }

    /// Number of labels.
    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Whether the table is empty.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Whether lookups distinguish letter case.
    #[must_use]
    pub fn is_case_sensitive(&self) -> bool {
        self.case_sensitive
    }
}

/// Smallest character in the simple case-folding orbit of `ch`.
///
/// Two characters match each other under `(?i)` exactly when they fold to the
/// same representative.
fn fold_char(ch: char) -> char {
    let mut class = ClassUnicode::new([ClassUnicodeRange::new(ch, ch)]);
    if class.try_case_fold_simple().is_err() {
        return ch;
    }
    class.ranges().first().map_or(ch, ClassUnicodeRange::start)
}
