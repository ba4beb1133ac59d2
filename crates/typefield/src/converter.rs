//! The converter value handed to host matchers.

use std::fmt;
use std::sync::Arc;

use regex::Regex;

use crate::errors::{BuildError, ConversionError};
use crate::fragment::{PatternFragment, analyse};
use crate::mapping::Mapping;

pub(crate) type MapFn<T> = dyn Fn(&str) -> Result<T, ConversionError> + Send + Sync;

/// A named regex fragment paired with the function that turns matched text
/// into a value.
///
/// Converters are immutable and cheap to clone; clones share the mapping
/// function. The declared anonymous group count is checked against the
/// pattern when the converter is built, so hosts can rely on
/// [`Converter::regex_group_count`] when numbering groups.
///
/// # Examples
/// ```
/// use typefield::{ConversionError, Converter, PatternFragment};
///
/// let number = Converter::new("Number", PatternFragment::new(r"\d+"), |text: &str| {
///     text.parse::<u32>()
///         .map_err(|err| ConversionError::new(text, err.to_string()))
/// })?;
/// assert_eq!(number.pattern(), r"(?i:\d+)");
/// assert_eq!(number.parse("42")?, Some(42));
/// assert_eq!(number.parse("4 2")?, None);
/// # Ok::<(), Box<dyn std::error::Error>>(())
/// ```
pub struct Converter<T> {
    name: String,
    fragment: PatternFragment,
    named_groups: usize,
    anchored: bool,
    matches_empty: bool,
    matcher: Regex,
    map: Arc<MapFn<T>>,
    mapping: Option<Arc<Mapping<T>>>,
}

impl<T> Converter<T> {
    /// Build a converter from a fragment and a mapping function.
    ///
    /// # Errors
    /// Returns [`BuildError::Syntax`] or [`BuildError::Regex`] when the
    /// fragment is not a valid expression, and [`BuildError::GroupCount`]
    /// when its declared anonymous group count is wrong.
    pub fn new<F>(
        name: impl Into<String>,
        fragment: PatternFragment,
        map: F,
    ) -> Result<Self, BuildError>
    where
        F: Fn(&str) -> Result<T, ConversionError> + Send + Sync + 'static,
    {
        Self::assemble(name.into(), fragment, Arc::new(map), None)
    }

    pub(crate) fn assemble(
        name: String,
        fragment: PatternFragment,
        map: Arc<MapFn<T>>,
        mapping: Option<Arc<Mapping<T>>>,
    ) -> Result<Self, BuildError> {
        let shape = analyse(fragment.as_str()).map_err(|source| BuildError::Syntax {
            name: name.clone(),
            source: Box::new(source),
        })?;
        if shape.anonymous_groups != fragment.group_count() {
            return Err(BuildError::GroupCount {
                name,
                declared: fragment.group_count(),
                actual: shape.anonymous_groups,
            });
        }
        let matcher = Regex::new(&format!("^(?:{})$", fragment.as_str())).map_err(|source| {
            BuildError::Regex {
                name: name.clone(),
                source,
            }
        })?;
        log::debug!(
            "built converter `{name}` with pattern {:?} ({} anonymous groups)",
            fragment.as_str(),
            fragment.group_count()
        );
        Ok(Self {
            name,
            fragment,
            named_groups: shape.named_groups,
            anchored: shape.anchored,
            matches_empty: shape.matches_empty,
            matcher,
            map,
            mapping,
        })
    }

    /// Name the converter is registered under.
    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Regex fragment describing the accepted text.
    #[must_use]
    pub fn pattern(&self) -> &str {
        self.fragment.as_str()
    }

    /// The full fragment including its metadata.
    #[must_use]
    pub fn fragment(&self) -> &PatternFragment {
        &self.fragment
    }

    /// Number of anonymous capturing groups in [`Converter::pattern`].
    #[must_use]
    pub fn regex_group_count(&self) -> usize {
        self.fragment.group_count()
    }

    /// Whether the pattern distinguishes letter case.
    #[must_use]
    pub fn is_case_sensitive(&self) -> bool {
        self.fragment.is_case_sensitive()
    }

    /// Label table for enumeration and choice converters.
    #[must_use]
    pub fn mapping(&self) -> Option<&Mapping<T>> {
        self.mapping.as_deref()
    }

    /// Whether `text` as a whole matches the pattern.
    #[must_use]
    pub fn is_match(&self, text: &str) -> bool {
        self.matcher.is_match(text)
    }

    /// Apply the mapping function to text the host already matched.
    ///
    /// # Errors
    /// Returns [`ConversionError`] when the text does not correspond to a
    /// value, attributed to the innermost converter that rejected it.
    pub fn convert(&self, text: &str) -> Result<T, ConversionError> {
        (self.map)(text).map_err(|err| {
            let err = err.attributed_to(&self.name);
            log::trace!("{err}");
            err
        })
    }

    /// Match `text` against the standalone pattern, then convert it.
    ///
    /// Returns `Ok(None)` when the pattern does not match the whole text.
    ///
    /// # Errors
    /// Propagates [`ConversionError`] from [`Converter::convert`].
    pub fn parse(&self, text: &str) -> Result<Option<T>, ConversionError> {
        if self.is_match(text) {
            self.convert(text).map(Some)
        } else {
            Ok(None)
        }
    }

    /// Rebind the registration name, keeping pattern and behaviour.
    #[must_use]
    pub fn renamed(mut self, name: impl Into<String>) -> Self {
        self.name = name.into();
        self
    }

    pub(crate) fn named_groups(&self) -> usize {
        self.named_groups
    }

    pub(crate) fn is_anchored(&self) -> bool {
        self.anchored
    }

    pub(crate) fn matches_empty(&self) -> bool {
        self.matches_empty
    }
}

impl<T: 'static> Converter<T> {
    /// Transform every converted value with `f`.
    ///
    /// The pattern is unchanged. The label table is not carried over because
    /// its values have the old type.
    ///
    /// ```
    /// use typefield::make_enum;
    /// let yes_no = make_enum("YesNo", [("yes", true), ("no", false)])?;
    /// let as_text = yes_no.map_output(|flag| if flag { "Y" } else { "N" });
    /// assert_eq!(as_text.convert("NO")?, "N");
    /// # Ok::<(), Box<dyn std::error::Error>>(())
    /// ```
    #[must_use]
    pub fn map_output<U, F>(self, f: F) -> Converter<U>
    where
        U: 'static,
        F: Fn(T) -> U + Send + Sync + 'static,
    {
        let inner = self.map;
        Converter {
            name: self.name,
            fragment: self.fragment,
            named_groups: self.named_groups,
            anchored: self.anchored,
            matches_empty: self.matches_empty,
            matcher: self.matcher,
            map: Arc::new(move |text: &str| inner(text).map(&f)),
            mapping: None,
        }
    }
}

impl<T> Clone for Converter<T> {
    fn clone(&self) -> Self {
        Self {
            name: self.name.clone(),
            fragment: self.fragment.clone(),
            named_groups: self.named_groups,
            anchored: self.anchored,
            matches_empty: self.matches_empty,
            matcher: self.matcher.clone(),
            map: Arc::clone(&self.map),
            mapping: self.mapping.clone(),
        }
    }
}

impl<T> fmt::Debug for Converter<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Converter")
            .field("name", &self.name)
            .field("pattern", &self.fragment.as_str())
            .field("regex_group_count", &self.fragment.group_count())
            .field("case_sensitive", &self.fragment.is_case_sensitive())
            .finish_non_exhaustive()
    }
}

#[cfg(test)]
#[expect(clippy::unwrap_used, reason = "tests build known-good converters")]
mod tests {
    use super::*;

    fn pair() -> Converter<(u32, u32)> {
        let fragment = PatternFragment::new(r"(\d+)x(\d+)").with_group_count(2);
        Converter::new("Size", fragment, |text: &str| {
            let (w, h) = text
                .split_once('x')
                .ok_or_else(|| ConversionError::new(text, "missing `x`"))?;
            let parse = |part: &str| {
                part.parse::<u32>()
                    .map_err(|err| ConversionError::new(text, err.to_string()))
            };
            Ok((parse(w)?, parse(h)?))
        })
        .unwrap()
    }

    #[test]
    fn exposes_registration_metadata() {
        let size = pair();
        assert_eq!(size.name(), "Size");
        assert_eq!(size.pattern(), r"(?i:(\d+)x(\d+))");
        assert_eq!(size.regex_group_count(), 2);
        assert!(size.mapping().is_none());
    }

    #[test]
    fn parse_requires_a_full_match() {
        let size = pair();
        assert_eq!(size.parse("3x4").unwrap(), Some((3, 4)));
        assert_eq!(size.parse(" 3x4").unwrap(), None);
        assert_eq!(size.parse("3x4 ").unwrap(), None);
    }

    #[test]
    fn rejects_wrong_group_count() {
        let fragment = PatternFragment::new(r"(\d+)");
        let err = Converter::new("Number", fragment, |_: &str| Ok(0)).unwrap_err();
        assert!(matches!(
            err,
            BuildError::GroupCount {
                declared: 0,
                actual: 1,
                ..
            }
        ));
    }

    #[test]
    fn rejects_invalid_syntax() {
        let err =
            Converter::new("Broken", PatternFragment::new("(a"), |_: &str| Ok(())).unwrap_err();
        assert!(matches!(err, BuildError::Syntax { .. }));
        assert!(
            err.to_string()
                .starts_with("converter `Broken` has an invalid pattern")
        );
    }

    #[test]
    fn custom_patterns_ignore_case_by_default() {
        let word = Converter::new("Word", PatternFragment::new("[a-z]+"), |text: &str| {
            Ok(text.to_owned())
        })
        .unwrap();
        assert!(!word.is_case_sensitive());
        assert_eq!(word.parse("ABC").unwrap().as_deref(), Some("ABC"));

        let exact = Converter::new(
            "Lower",
            PatternFragment::new("[a-z]+").case_sensitive(),
            |text: &str| Ok(text.to_owned()),
        )
        .unwrap();
        assert!(exact.is_case_sensitive());
        assert_eq!(exact.parse("ABC").unwrap(), None);
        assert_eq!(exact.parse("abc").unwrap().as_deref(), Some("abc"));
    }

    #[test]
    fn attributes_conversion_errors() {
        let err = pair().convert("3y4").unwrap_err();
        assert_eq!(err.converter, "Size");
        assert_eq!(err.text, "3y4");
    }

    #[test]
    fn renaming_keeps_the_pattern() {
        let size = pair().renamed("Dimensions");
        assert_eq!(size.name(), "Dimensions");
        assert_eq!(size.pattern(), r"(?i:(\d+)x(\d+))");
    }

    #[test]
    fn map_output_keeps_metadata() {
        let area = pair().map_output(|(w, h)| w * h);
        assert_eq!(area.regex_group_count(), 2);
        assert_eq!(area.parse("3x4").unwrap(), Some(12));
    }
}
