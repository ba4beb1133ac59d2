//! Cardinality suffixes on type names, e.g. `Number?` or `Number+`.

use std::collections::BTreeSet;

use crate::cardinality::{Cardinality, ListSeparator, with_cardinality};
use crate::converter::Converter;
use crate::errors::VariantError;
use crate::registry::Registry;

/// Derives cardinality variants for type names carrying a suffix.
///
/// A type name ending in `?`, `*` or `+` refers to the zero-or-one,
/// zero-or-more or one-or-more variant of the type named without the suffix.
///
/// # Examples
/// ```
/// use typefield::{Cardinality, CardinalityField, Registry, make_choice};
///
/// assert_eq!(
///     CardinalityField::split("Color*"),
///     ("Color", Cardinality::ZeroOrMore)
/// );
///
/// let base = Registry::new([make_choice("Color", ["red", "blue"])?])?;
/// let variants = CardinalityField::default().create_type_variants(["Color+"], &base)?;
/// let colors = variants.get("Color+").expect("variant registered");
/// assert_eq!(colors.parse("red, blue")?, Some(vec!["red".into(), "blue".into()]));
/// # Ok::<(), Box<dyn std::error::Error>>(())
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CardinalityField {
    separator: ListSeparator,
}

impl CardinalityField {
    /// Characters recognised as cardinality suffixes.
    pub const SUFFIXES: &'static str = "?*+";

    /// Derive list variants using `separator`.
    #[must_use]
    pub fn new(separator: ListSeparator) -> Self {
        Self { separator }
    }

    /// Separator used by list variants.
    #[must_use]
    pub fn separator(&self) -> &ListSeparator {
        &self.separator
    }

    /// Whether `type_name` ends with a cardinality suffix.
    #[must_use]
    pub fn matches_type_name(type_name: &str) -> bool {
        type_name.ends_with(|c: char| Self::SUFFIXES.contains(c))
    }

    /// `type_name` without its cardinality suffix.
    #[must_use]
    pub fn type_basename(type_name: &str) -> &str {
        Self::split(type_name).0
    }

    /// Split `type_name` into its base name and cardinality.
    ///
    /// Names without a suffix have [`Cardinality::One`].
    #[must_use]
    pub fn split(type_name: &str) -> (&str, Cardinality) {
        let mut chars = type_name.chars();
        chars
            .next_back()
            .and_then(Cardinality::from_suffix)
            .map_or((type_name, Cardinality::One), |cardinality| {
                (chars.as_str(), cardinality)
            })
    }

    /// Build the variant `type_name` refers to from the converters in `base`.
    ///
    /// # Errors
    /// - [`VariantError::NoCardinalityField`] when `type_name` has no suffix.
    /// - [`VariantError::MissingType`] when the base type is not in `base`.
    /// - [`VariantError::Build`] when the variant cannot be composed.
    pub fn create_type_variant<T>(
        &self,
        type_name: &str,
        base: &Registry<T>,
    ) -> Result<Converter<Vec<T>>, VariantError>
    where
        T: Send + Sync + 'static,
    {
        let (basename, cardinality) = Self::split(type_name);
        if cardinality == Cardinality::One {
            return Err(VariantError::NoCardinalityField(type_name.to_owned()));
        }
        let inner = base
            .get(basename)
            .ok_or_else(|| VariantError::MissingType(basename.to_owned()))?;
        let variant = with_cardinality(cardinality, inner, &self.separator)?;
        log::debug!("derived `{type_name}` from `{basename}`");
        Ok(variant.renamed(type_name))
    }

    /// Build a registry holding the variant for every name in `type_names`.
    ///
    /// # Errors
    /// Same as [`CardinalityField::create_type_variant`], plus
    /// [`BuildError::DuplicateName`](crate::BuildError::DuplicateName) when a
    /// name repeats.
    pub fn create_type_variants<T, I, S>(
        &self,
        type_names: I,
        base: &Registry<T>,
    ) -> Result<Registry<Vec<T>>, VariantError>
    where
        T: Send + Sync + 'static,
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let variants = type_names
            .into_iter()
            .map(|name| self.create_type_variant(name.as_ref(), base))
            .collect::<Result<Vec<_>, _>>()?;
        Ok(Registry::new(variants)?)
    }

    /// Build variants only for names absent from `existing`.
    ///
    /// Repeated names are built once.
    ///
    /// # Errors
    /// Same as [`CardinalityField::create_type_variant`].
    pub fn create_missing_type_variants<T, I, S>(
        &self,
        type_names: I,
        base: &Registry<T>,
        existing: &Registry<Vec<T>>,
    ) -> Result<Registry<Vec<T>>, VariantError>
    where
        T: Send + Sync + 'static,
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let missing: BTreeSet<String> = type_names
            .into_iter()
            .map(|name| name.as_ref().to_owned())
            .filter(|name| !existing.contains(name))
            .collect();
        self.create_type_variants(&missing, base)
    }
}

#[cfg(test)]
#[expect(clippy::unwrap_used, reason = "tests build known-good registries")]
mod tests {
    use super::*;
    use crate::{BuildError, make_choice};
    use rstest::{fixture, rstest};

    #[fixture]
    fn base() -> Registry<String> {
        Registry::new([make_choice("Digit", ["0", "1", "2", "3"]).unwrap()]).unwrap()
    }

    #[rstest]
    #[case("Number?", true)]
    #[case("Number*", true)]
    #[case("Number+", true)]
    #[case("Number", false)]
    #[case("", false)]
    #[case("Num?ber", false)]
    fn recognises_suffixes(#[case] name: &str, #[case] expected: bool) {
        assert_eq!(CardinalityField::matches_type_name(name), expected);
    }

    #[rstest]
    #[case("Number?", "Number", Cardinality::ZeroOrOne)]
    #[case("Number*", "Number", Cardinality::ZeroOrMore)]
    #[case("Number+", "Number", Cardinality::OneOrMore)]
    #[case("Number", "Number", Cardinality::One)]
    #[case("?", "", Cardinality::ZeroOrOne)]
    fn splits_type_names(
        #[case] name: &str,
        #[case] basename: &str,
        #[case] cardinality: Cardinality,
    ) {
        assert_eq!(CardinalityField::split(name), (basename, cardinality));
        assert_eq!(CardinalityField::type_basename(name), basename);
    }

    #[rstest]
    fn creates_variants_by_name(base: Registry<String>) {
        let field = CardinalityField::default();
        let digits = field.create_type_variant("Digit+", &base).unwrap();
        assert_eq!(digits.name(), "Digit+");
        assert_eq!(
            digits.parse("1,2,3").unwrap(),
            Some(vec!["1".to_owned(), "2".to_owned(), "3".to_owned()])
        );
        let maybe = field.create_type_variant("Digit?", &base).unwrap();
        assert_eq!(maybe.parse("").unwrap(), Some(vec![]));
        assert_eq!(maybe.parse("2").unwrap(), Some(vec!["2".to_owned()]));
    }

    #[rstest]
    fn uses_configured_separator(base: Registry<String>) {
        let field = CardinalityField::new(ListSeparator::new(";"));
        let digits = field.create_type_variant("Digit*", &base).unwrap();
        assert_eq!(
            digits.parse("1; 2").unwrap(),
            Some(vec!["1".to_owned(), "2".to_owned()])
        );
        assert_eq!(digits.parse("1,2").unwrap(), None);
    }

    #[rstest]
    fn reports_missing_base_type(base: Registry<String>) {
        let err = CardinalityField::default()
            .create_type_variant("Letter*", &base)
            .unwrap_err();
        assert!(matches!(err, VariantError::MissingType(ref name) if name == "Letter"));
    }

    #[rstest]
    fn requires_a_suffix(base: Registry<String>) {
        let err = CardinalityField::default()
            .create_type_variant("Digit", &base)
            .unwrap_err();
        assert!(matches!(err, VariantError::NoCardinalityField(_)));
    }

    #[rstest]
    fn rejects_repeated_names(base: Registry<String>) {
        let err = CardinalityField::default()
            .create_type_variants(["Digit+", "Digit+"], &base)
            .unwrap_err();
        assert!(matches!(
            err,
            VariantError::Build(BuildError::DuplicateName(_))
        ));
    }

    #[rstest]
    fn creates_only_missing_variants(base: Registry<String>) {
        let field = CardinalityField::default();
        let existing = field.create_type_variants(["Digit+"], &base).unwrap();
        let missing = field
            .create_missing_type_variants(["Digit+", "Digit*", "Digit*"], &base, &existing)
            .unwrap();
        assert_eq!(missing.names().collect::<Vec<_>>(), ["Digit*"]);
    }
}
