//! Error types shared by the converter factories and the schema host.

use std::fmt;
use thiserror::Error;

/// Additional context for malformed field placeholders in a schema template.
///
/// # Examples
/// ```
/// use typefield::PlaceholderErrorInfo;
/// let info = PlaceholderErrorInfo::new("invalid field", 3, Some("answer".into()));
/// assert_eq!(info.placeholder.as_deref(), Some("answer"));
/// assert_eq!(info.position, 3);
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PlaceholderErrorInfo {
    /// Human-readable description of the failure.
    pub message: &'static str,
    /// Byte offset of the offending placeholder within the template.
    pub position: usize,
    /// Field name, when one could be read before the failure.
    pub placeholder: Option<String>,
}

impl PlaceholderErrorInfo {
    /// Create a new error description for a placeholder failure.
    #[must_use]
    pub fn new(message: &'static str, position: usize, placeholder: Option<String>) -> Self {
        Self {
            message,
            position,
            placeholder,
        }
    }
}

impl fmt::Display for PlaceholderErrorInfo {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.placeholder {
            Some(name) => write!(
                f,
                "{} for field `{}` at byte {} (zero-based)",
                self.message, name, self.position
            ),
            None => write!(f, "{} at byte {} (zero-based)", self.message, self.position),
        }
    }
}

/// Reasons a cardinality wrapper refuses to compose around a converter.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[non_exhaustive]
pub enum ComposeError {
    /// The inner pattern anchors to the start or end of the input.
    #[error("cannot repeat converter `{name}`: its pattern is anchored")]
    Anchored {
        /// Name of the inner converter.
        name: String,
    },
    /// The inner pattern declares named groups, which cannot appear twice.
    #[error("cannot repeat converter `{name}`: its pattern contains named groups")]
    NamedGroups {
        /// Name of the inner converter.
        name: String,
    },
    /// The inner pattern can match empty text, so list items could vanish
    /// between separators.
    #[error("cannot repeat converter `{name}`: its pattern can match empty text")]
    EmptyItem {
        /// Name of the inner converter.
        name: String,
    },
    /// The list separator is empty.
    #[error("cannot build list converter `{name}`: the list separator is empty")]
    EmptySeparator {
        /// Name of the list converter being built.
        name: String,
    },
}

/// Errors raised while constructing converters and registries.
///
/// Construction errors are fatal: no partially built converter is returned.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum BuildError {
    /// An enumeration or choice set contained no entries.
    #[error("converter `{name}` has no labels")]
    EmptyMapping {
        /// Name of the converter being built.
        name: String,
    },
    /// An enumeration or choice set contained an empty label.
    #[error("converter `{name}` has an empty label")]
    EmptyLabel {
        /// Name of the converter being built.
        name: String,
    },
    /// Two enumeration labels are equal when letter case is ignored.
    #[error("converter `{name}` has duplicate label `{label}` (clashes with `{existing}`)")]
    DuplicateLabel {
        /// Name of the converter being built.
        name: String,
        /// Label that was rejected.
        label: String,
        /// Label defined earlier that it clashes with.
        existing: String,
    },
    /// A choice appears more than once.
    #[error("converter `{name}` has duplicate choice `{choice}` (clashes with `{existing}`)")]
    DuplicateChoice {
        /// Name of the converter being built.
        name: String,
        /// Choice that was rejected.
        choice: String,
        /// Choice defined earlier that it clashes with.
        existing: String,
    },
    /// Two converters handed to a registry share a name.
    #[error("duplicate converter name `{0}`")]
    DuplicateName(String),
    /// The declared anonymous group count disagrees with the pattern.
    #[error(
        "converter `{name}` declares {declared} anonymous groups but its pattern has {actual}"
    )]
    GroupCount {
        /// Name of the converter being built.
        name: String,
        /// Count supplied by the fragment.
        declared: usize,
        /// Count found in the parsed pattern.
        actual: usize,
    },
    /// The pattern is not valid regular-expression syntax.
    #[error("converter `{name}` has an invalid pattern: {source}")]
    Syntax {
        /// Name of the converter being built.
        name: String,
        /// Parser diagnostic.
        #[source]
        source: Box<regex_syntax::Error>,
    },
    /// The pattern parsed but could not be compiled.
    #[error("converter `{name}` failed to compile: {source}")]
    Regex {
        /// Name of the converter being built.
        name: String,
        /// Compiler diagnostic.
        #[source]
        source: regex::Error,
    },
    /// A cardinality wrapper rejected its inner converter.
    #[error(transparent)]
    Compose(#[from] ComposeError),
}

/// Match-time failure raised by a converter's mapping function.
///
/// A conversion error means the text handed to the converter does not
/// correspond to any value it knows about. Host matchers receive it unchanged.
///
/// # Examples
/// ```
/// use typefield::ConversionError;
/// let err = ConversionError::new("maybe", "unknown label").attributed_to("YesNo");
/// assert_eq!(err.converter, "YesNo");
/// assert_eq!(err.to_string(), "converter `YesNo` cannot convert \"maybe\": unknown label");
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("converter `{converter}` cannot convert {text:?}: {reason}")]
pub struct ConversionError {
    /// Name of the converter that failed. Empty until attributed.
    pub converter: String,
    /// Text passed to the mapping function.
    pub text: String,
    /// Why the text was rejected.
    pub reason: String,
}

impl ConversionError {
    /// Describe a rejected input. The converter name is filled in when the
    /// error leaves [`Converter::convert`](crate::Converter::convert).
    #[must_use]
    pub fn new(text: impl Into<String>, reason: impl Into<String>) -> Self {
        Self {
            converter: String::new(),
            text: text.into(),
            reason: reason.into(),
        }
    }

    /// Attach the converter name unless an inner converter already did.
    #[must_use]
    pub fn attributed_to(mut self, converter: &str) -> Self {
        if self.converter.is_empty() {
            self.converter = converter.to_owned();
        }
        self
    }
}

/// Errors raised while deriving cardinality variants from type names.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum VariantError {
    /// The type name does not end with `?`, `*` or `+`.
    #[error("type name `{0}` has no cardinality suffix")]
    NoCardinalityField(String),
    /// The base type is absent from the registry.
    #[error("no converter registered for base type `{0}`")]
    MissingType(String),
    /// Building the variant failed.
    #[error(transparent)]
    Build(#[from] BuildError),
}

/// Errors surfaced while compiling a schema template against a registry.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum SchemaError {
    /// A field placeholder is malformed.
    #[error("{0}")]
    Placeholder(PlaceholderErrorInfo),
    /// A field names a type that is not registered.
    #[error("field `{field}` uses unknown type `{type_name}`")]
    UnknownType {
        /// Field name in the template.
        field: String,
        /// Type name that failed to resolve.
        type_name: String,
    },
    /// The same field name appears twice.
    #[error("field `{0}` appears more than once")]
    DuplicateField(String),
    /// The compiled expression's capture groups disagree with the converters'
    /// declared counts.
    #[error("schema expects {expected} capture groups but the compiled pattern has {actual}")]
    GroupCount {
        /// Groups implied by the registered converters.
        expected: usize,
        /// Groups reported by the compiled regex.
        actual: usize,
    },
    /// The assembled expression failed to compile.
    #[error(transparent)]
    Regex(#[from] regex::Error),
}

pub(crate) fn placeholder_error(
    message: &'static str,
    position: usize,
    placeholder: Option<String>,
) -> SchemaError {
    SchemaError::Placeholder(PlaceholderErrorInfo::new(message, position, placeholder))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn formats_placeholder_with_name() {
        let info = PlaceholderErrorInfo::new("invalid", 4, Some("count".into()));
        assert_eq!(
            info.to_string(),
            "invalid for field `count` at byte 4 (zero-based)"
        );
    }

    #[test]
    fn formats_placeholder_without_name() {
        let info = PlaceholderErrorInfo::new("oops", 1, None);
        assert_eq!(info.to_string(), "oops at byte 1 (zero-based)");
    }

    #[test]
    fn keeps_innermost_converter_attribution() {
        let err = ConversionError::new("x", "not a digit")
            .attributed_to("Digit")
            .attributed_to("Digits+");
        assert_eq!(err.converter, "Digit");
    }

    #[test]
    fn forwards_regex_error_display() {
        let err = SchemaError::Regex(regex::Error::Syntax("bad".into()));
        assert_eq!(
            err.to_string(),
            regex::Error::Syntax("bad".into()).to_string()
        );
    }

    #[test]
    fn compose_errors_convert_into_build_errors() {
        let err: BuildError = ComposeError::Anchored {
            name: "Line".into(),
        }
        .into();
        assert!(matches!(err, BuildError::Compose(ComposeError::Anchored { .. })));
        assert_eq!(
            err.to_string(),
            "cannot repeat converter `Line`: its pattern is anchored"
        );
    }
}
