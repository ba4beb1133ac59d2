//! Convert lexed tokens into an anchored regular expression with field slots.

use crate::converter::Converter;
use crate::errors::{SchemaError, placeholder_error};
use crate::fragment::DEFAULT_PATTERN;
use crate::registry::Registry;

use super::lexer::{Token, lex_template};

/// A field and the capture group holding its text.
pub(crate) struct Slot<T> {
    pub name: String,
    pub group: usize,
    pub converter: Option<Converter<T>>,
}

/// Regex source plus the slots it was built with.
pub(crate) struct Blueprint<T> {
    pub source: String,
    pub slots: Vec<Slot<T>>,
    pub group_count: usize,
}

/// Groups a field occupies: its own plus every group inside the fragment.
fn groups_spanned<T>(converter: Option<&Converter<T>>) -> usize {
    1 + converter.map_or(0, |c| c.regex_group_count() + c.named_groups())
}

fn resolve<T>(
    registry: &Registry<T>,
    field: &str,
    type_name: Option<String>,
) -> Result<Option<Converter<T>>, SchemaError> {
    type_name
        .map(|type_name| {
            registry
                .get(&type_name)
                .cloned()
                .ok_or_else(|| SchemaError::UnknownType {
                    field: field.to_owned(),
                    type_name,
                })
        })
        .transpose()
}

/// Build an anchored regular expression from a schema template.
///
/// Typed fields embed their converter's fragment; untyped fields use
/// [`DEFAULT_PATTERN`].
pub(crate) fn build_blueprint<T>(
    template: &str,
    registry: &Registry<T>,
) -> Result<Blueprint<T>, SchemaError> {
    let tokens = lex_template(template)?;
    let mut source = String::with_capacity(template.len().saturating_mul(2) + 2);
    source.push('^');
    let mut slots: Vec<Slot<T>> = Vec::new();
    let mut next_group = 1usize;
    let mut open_braces: Vec<usize> = Vec::new();

    for token in tokens {
        match token {
            Token::Literal(text) => {
                source.push_str("(?i:");
                source.push_str(&regex::escape(&text));
                source.push(')');
            }
            Token::Field { name, type_name } => {
                if slots.iter().any(|slot| slot.name == name) {
                    return Err(SchemaError::DuplicateField(name));
                }
                let converter = resolve(registry, &name, type_name)?;
                source.push('(');
                source.push_str(converter.as_ref().map_or(DEFAULT_PATTERN, Converter::pattern));
                source.push(')');
                let group = next_group;
                next_group += groups_spanned(converter.as_ref());
                slots.push(Slot {
                    name,
                    group,
                    converter,
                });
            }
            Token::OpenBrace { index } => {
                open_braces.push(index);
                source.push_str(&regex::escape("{"));
            }
            Token::CloseBrace { index } => {
                if open_braces.pop().is_none() {
                    return Err(placeholder_error(
                        "unmatched closing brace '}' in template",
                        index,
                        None,
                    ));
                }
                source.push_str(&regex::escape("}"));
            }
        }
    }

    if let Some(&index) = open_braces.last() {
        return Err(placeholder_error(
            "unbalanced braces in template",
            index,
            None,
        ));
    }

    source.push('$');
    Ok(Blueprint {
        source,
        slots,
        group_count: next_group - 1,
    })
}
