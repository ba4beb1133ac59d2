//! A reference host matcher for schema templates such as
//! `"Answer: {answer:YesNo}"`.
//!
//! Templates are literal text with `{name}` or `{name:Type}` fields. Typed
//! fields resolve against a [`Registry`] and embed the converter's fragment;
//! untyped fields capture text lazily. `{{` and `}}` stand for literal braces.
//! The whole input must match.

mod compiler;
mod lexer;
mod placeholder;
#[cfg(test)]
pub(crate) mod test_support;

use std::fmt;

use regex::Regex;

use crate::errors::{ConversionError, SchemaError};
use crate::registry::Registry;

use compiler::{Blueprint, Slot, build_blueprint};

/// A template compiled against a registry.
///
/// # Examples
/// ```
/// use typefield::{Registry, Schema, make_enum};
///
/// let registry = Registry::new([make_enum("YesNo", [("yes", true), ("no", false)])?])?;
/// let schema = Schema::compile("Answer: {answer:YesNo}", &registry)?;
///
/// let fields = schema.parse("Answer: YES")?.expect("template matches");
/// assert_eq!(fields.get("answer"), Some(&true));
/// assert!(schema.parse("Answer: __YES__")?.is_none());
/// # Ok::<(), Box<dyn std::error::Error>>(())
/// ```
pub struct Schema<T> {
    template: String,
    regex: Regex,
    slots: Vec<Slot<T>>,
}

impl<T> Schema<T> {
    /// Compile `template`, resolving field types in `registry`.
    ///
    /// # Errors
    /// - [`SchemaError::Placeholder`] for malformed fields or stray braces.
    /// - [`SchemaError::UnknownType`] when a type is not registered.
    /// - [`SchemaError::DuplicateField`] when a field name repeats.
    /// - [`SchemaError::Regex`] when the assembled expression is rejected.
    /// - [`SchemaError::GroupCount`] when converters misreport their groups.
    pub fn compile(template: &str, registry: &Registry<T>) -> Result<Self, SchemaError> {
        let Blueprint {
            source,
            slots,
            group_count,
        } = build_blueprint(template, registry)?;
        let regex = Regex::new(&source)?;
        let actual = regex.captures_len().saturating_sub(1);
        if actual != group_count {
            return Err(SchemaError::GroupCount {
                expected: group_count,
                actual,
            });
        }
        log::debug!(
            "compiled template {template:?} into {source:?} with {} fields",
            slots.len()
        );
        Ok(Self {
            template: template.to_owned(),
            regex,
            slots,
        })
    }

    /// The template text.
    #[must_use]
    pub fn template(&self) -> &str {
        &self.template
    }

    /// The compiled expression.
    #[must_use]
    pub fn as_regex(&self) -> &Regex {
        &self.regex
    }

    /// Field names in template order.
    pub fn field_names(&self) -> impl Iterator<Item = &str> {
        self.slots.iter().map(|slot| slot.name.as_str())
    }

    /// Match `text` against the template and convert every typed field.
    ///
    /// Returns `Ok(None)` when the text does not match. Fields whose group did
    /// not participate are converted from the empty string.
    ///
    /// # Errors
    /// Propagates the first [`ConversionError`] raised by a field converter.
    pub fn parse(&self, text: &str) -> Result<Option<Fields<T>>, ConversionError> {
        let Some(captures) = self.regex.captures(text) else {
            return Ok(None);
        };
        let mut fields = Fields {
            entries: Vec::with_capacity(self.slots.len()),
        };
        for slot in &self.slots {
            let matched = captures.get(slot.group).map_or("", |m| m.as_str());
            let value = slot
                .converter
                .as_ref()
                .map(|converter| converter.convert(matched))
                .transpose()?;
            fields.entries.push(FieldValue {
                name: slot.name.clone(),
                text: matched.to_owned(),
                value,
            });
        }
        Ok(Some(fields))
    }
}

impl<T> fmt::Debug for Schema<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Schema")
            .field("template", &self.template)
            .field("regex", &self.regex.as_str())
            .finish_non_exhaustive()
    }
}

#[derive(Debug, Clone, PartialEq)]
struct FieldValue<T> {
    name: String,
    text: String,
    value: Option<T>,
}

/// Field values extracted by [`Schema::parse`].
#[derive(Debug, Clone, PartialEq)]
pub struct Fields<T> {
    entries: Vec<FieldValue<T>>,
}

impl<T> Fields<T> {
    fn find(&self, name: &str) -> Option<&FieldValue<T>> {
        self.entries.iter().find(|entry| entry.name == name)
    }

    /// Converted value of a typed field.
    #[must_use]
    pub fn get(&self, name: &str) -> Option<&T> {
        self.find(name).and_then(|entry| entry.value.as_ref())
    }

    /// Matched text of any field.
    #[must_use]
    pub fn text(&self, name: &str) -> Option<&str> {
        self.find(name).map(|entry| entry.text.as_str())
    }

    /// Field names in template order.
    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.entries.iter().map(|entry| entry.name.as_str())
    }

    /// Number of fields.
    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Whether the template has no fields.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}
