//! Converters accepting one literal out of a fixed, ordered set.

use std::fmt;
use std::sync::Arc;

use crate::converter::Converter;
use crate::errors::{BuildError, ConversionError};
use crate::fragment::PatternFragment;
use crate::mapping::Mapping;

type TransformFn = dyn Fn(&str) -> String + Send + Sync;

/// Configures and builds choice converters.
///
/// A choice converter accepts exactly one of its literals. Plain converters
/// return the matched text, indexed converters return `(index, choice)` where
/// the index follows definition order.
///
/// By default matching ignores letter case and plain converters hand back the
/// text as written in the input. [`ChoiceBuilder::strict`] demands the exact
/// spelling; [`ChoiceBuilder::transform`] normalises both the choices and the
/// matched text before they are compared.
///
/// # Examples
/// ```
/// use typefield::ChoiceBuilder;
///
/// let numbers = ChoiceBuilder::new(["zero", "one", "two"]).build_indexed("NumberWord")?;
/// assert_eq!(numbers.parse("two")?, Some((2, "two".to_owned())));
///
/// let lowered = ChoiceBuilder::new(["One", "TWO"])
///     .transform(str::to_lowercase)
///     .build("Lowered")?;
/// assert_eq!(lowered.parse("Two")?, Some("two".to_owned()));
/// # Ok::<(), Box<dyn std::error::Error>>(())
/// ```
#[derive(Clone)]
pub struct ChoiceBuilder {
    choices: Vec<String>,
    strict: bool,
    transform: Option<Arc<TransformFn>>,
}

impl ChoiceBuilder {
    /// Start from an ordered sequence of literals.
    #[must_use]
    pub fn new<I, S>(choices: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            choices: choices.into_iter().map(Into::into).collect(),
            strict: false,
            transform: None,
        }
    }

    /// Require the matched text to equal a choice exactly, letter case
    /// included.
    #[must_use]
    pub fn strict(mut self, strict: bool) -> Self {
        self.strict = strict;
        self
    }

    /// Normalise choices and matched text with `transform`.
    #[must_use]
    pub fn transform<F>(mut self, transform: F) -> Self
    where
        F: Fn(&str) -> String + Send + Sync + 'static,
    {
        self.transform = Some(Arc::new(transform));
        self
    }

    /// Choices after the transform, in definition order.
    #[must_use]
    pub fn choices(&self) -> Vec<String> {
        self.choices.iter().map(|choice| self.normalise(choice)).collect()
    }

    fn normalise(&self, text: &str) -> String {
        self.transform
            .as_ref()
            .map_or_else(|| text.to_owned(), |transform| transform(text))
    }

    /// Strict converters without a transform only accept exact spellings.
    fn pattern_is_case_sensitive(&self) -> bool {
        self.strict && self.transform.is_none()
    }

    /// Build a converter returning the matched choice.
    ///
    /// # Errors
    /// - [`BuildError::EmptyMapping`] when there are no choices.
    /// - [`BuildError::EmptyLabel`] when a choice is the empty string.
    /// - [`BuildError::DuplicateChoice`] when a choice repeats. Outside strict
    ///   mode, choices differing only by case count as repeats.
    pub fn build(&self, name: impl Into<String>) -> Result<Converter<String>, BuildError> {
        let name = name.into();
        let choices = self.choices();
        let mapping = self.table(&name, choices.iter().map(|c| (c.clone(), c.clone())))?;
        let fragment = self.fragment(&choices);
        let table = Arc::new(mapping);
        let lookup = Arc::clone(&table);
        let this = self.clone();
        let map = move |text: &str| -> Result<String, ConversionError> {
            let text = this.normalise(text);
            Self::accept(&lookup, &text)?;
            Ok(text)
        };
        Converter::assemble(name, fragment, Arc::new(map), Some(table))
    }

    /// Build a converter returning `(index, choice)`.
    ///
    /// The returned choice is the canonical spelling from the set, not the
    /// input text.
    ///
    /// # Errors
    /// Same as [`ChoiceBuilder::build`].
    pub fn build_indexed(
        &self,
        name: impl Into<String>,
    ) -> Result<Converter<(usize, String)>, BuildError> {
        let name = name.into();
        let choices = self.choices();
        let mapping = self.table(
            &name,
            choices
                .iter()
                .enumerate()
                .map(|(index, c)| (c.clone(), (index, c.clone()))),
        )?;
        let fragment = self.fragment(&choices);
        let table = Arc::new(mapping);
        let lookup = Arc::clone(&table);
        let this = self.clone();
        let map = move |text: &str| {
            let text = this.normalise(text);
            Self::accept(&lookup, &text).cloned()
        };
        Converter::assemble(name, fragment, Arc::new(map), Some(table))
    }

    fn table<T, I>(&self, name: &str, entries: I) -> Result<Mapping<T>, BuildError>
    where
        I: IntoIterator<Item = (String, T)>,
    {
        let mapping = Mapping::from_entries(entries, self.strict).map_err(|clash| {
            BuildError::DuplicateChoice {
                name: name.to_owned(),
                choice: clash.label,
                existing: clash.existing,
            }
        })?;
        if mapping.is_empty() {
            return Err(BuildError::EmptyMapping {
                name: name.to_owned(),
            });
        }
        if mapping.labels().any(str::is_empty) {
            return Err(BuildError::EmptyLabel {
                name: name.to_owned(),
            });
        }
        Ok(mapping)
    }

    fn fragment(&self, choices: &[String]) -> PatternFragment {
        PatternFragment::alternation(choices, self.pattern_is_case_sensitive())
    }

    /// Strict tables are keyed case-sensitively, so a case mismatch is a miss.
    fn accept<'a, T>(table: &'a Mapping<T>, text: &str) -> Result<&'a T, ConversionError> {
        table
            .get(text)
            .ok_or_else(|| ConversionError::new(text, "not one of the choices"))
    }
}

impl fmt::Debug for ChoiceBuilder {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ChoiceBuilder")
            .field("choices", &self.choices)
            .field("strict", &self.strict)
            .field("transform", &self.transform.is_some())
            .finish()
    }
}

/// Build a plain choice converter with default options.
///
/// # Errors
/// See [`ChoiceBuilder::build`].
///
/// # Examples
/// ```
/// use typefield::make_choice;
/// let word = make_choice("NumberAsWord", ["one", "two", "three"])?;
/// assert_eq!(word.parse("three")?, Some("three".to_owned()));
/// assert_eq!(word.parse("three ")?, None);
/// # Ok::<(), Box<dyn std::error::Error>>(())
/// ```
pub fn make_choice<I, S>(
    name: impl Into<String>,
    choices: I,
) -> Result<Converter<String>, BuildError>
where
    I: IntoIterator<Item = S>,
    S: Into<String>,
{
    ChoiceBuilder::new(choices).build(name)
}

/// Build an indexed choice converter with default options.
///
/// # Errors
/// See [`ChoiceBuilder::build`].
pub fn make_choice_indexed<I, S>(
    name: impl Into<String>,
    choices: I,
) -> Result<Converter<(usize, String)>, BuildError>
where
    I: IntoIterator<Item = S>,
    S: Into<String>,
{
    ChoiceBuilder::new(choices).build_indexed(name)
}

#[cfg(test)]
#[expect(clippy::unwrap_used, reason = "tests exercise factory fallibility")]
mod tests {
    use super::*;
    use rstest::rstest;

    #[rstest]
    #[case("one", "one")]
    #[case("TWO", "TWO")]
    #[case("Three", "Three")]
    fn non_strict_choices_return_input_spelling(#[case] text: &str, #[case] expected: &str) {
        let word = make_choice("NumberWordChoice", ["one", "two", "three"]).unwrap();
        assert_eq!(word.parse(text).unwrap().as_deref(), Some(expected));
    }

    #[test]
    fn strict_choices_use_case_sensitive_patterns() {
        let word = ChoiceBuilder::new(["One", "TWO", "three"])
            .strict(true)
            .build("NumberWordChoice")
            .unwrap();
        assert!(word.is_case_sensitive());
        assert_eq!(word.parse("TWO").unwrap().as_deref(), Some("TWO"));
        for text in ["one", "ONE", "Two", "two", "Three"] {
            assert_eq!(word.parse(text).unwrap(), None, "{text} should not match");
        }
    }

    #[test]
    fn strict_conversion_rejects_case_mismatch() {
        let word = ChoiceBuilder::new(["Zero", "one"])
            .strict(true)
            .build_indexed("NumberWord")
            .unwrap();
        assert_eq!(word.convert("Zero").unwrap(), (0, "Zero".to_owned()));
        let err = word.convert("ZERO").unwrap_err();
        assert_eq!(err.converter, "NumberWord");
        assert_eq!(err.reason, "not one of the choices");
    }

    #[test]
    fn strict_transform_accepts_any_case_and_normalises() {
        let word = ChoiceBuilder::new(["one", "two", "three"])
            .transform(str::to_lowercase)
            .strict(true)
            .build("NumberWordChoice")
            .unwrap();
        assert!(!word.is_case_sensitive());
        assert_eq!(word.parse("TWO").unwrap().as_deref(), Some("two"));
        assert_eq!(word.parse("Three").unwrap().as_deref(), Some("three"));
    }

    #[test]
    fn transform_applies_to_choices() {
        let builder = ChoiceBuilder::new(["ONE", "two", "Three"]).transform(str::to_uppercase);
        assert_eq!(builder.choices(), ["ONE", "TWO", "THREE"]);
        let word = builder.build("Upper").unwrap();
        assert_eq!(word.parse("one").unwrap().as_deref(), Some("ONE"));
    }

    #[test]
    fn indexed_choices_follow_definition_order() {
        let word = make_choice_indexed("Word", ["zz", "a", "mmm"]).unwrap();
        assert_eq!(word.convert("a").unwrap(), (1, "a".to_owned()));
        assert_eq!(word.convert("MMM").unwrap(), (2, "mmm".to_owned()));
        assert_eq!(word.convert("zz").unwrap(), (0, "zz".to_owned()));
    }

    #[test]
    fn rejects_duplicate_choices() {
        let err = make_choice("Dup", ["a", "b", "a"]).unwrap_err();
        assert!(matches!(
            err,
            BuildError::DuplicateChoice { ref choice, .. } if choice == "a"
        ));
    }

    #[test]
    fn duplicates_are_detected_after_transform() {
        let err = ChoiceBuilder::new(["A", "a"])
            .strict(true)
            .transform(str::to_lowercase)
            .build("Dup")
            .unwrap_err();
        assert!(matches!(err, BuildError::DuplicateChoice { .. }));
    }

    #[test]
    fn strict_mode_allows_case_variants() {
        let word = ChoiceBuilder::new(["a", "A"])
            .strict(true)
            .build_indexed("Letters")
            .unwrap();
        assert_eq!(word.parse("A").unwrap(), Some((1, "A".to_owned())));
    }
}
