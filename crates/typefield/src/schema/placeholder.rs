//! Field placeholder parsing used by the lexer.

use std::iter::Peekable;
use std::str::CharIndices;

use crate::errors::{SchemaError, placeholder_error};

#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) struct PlaceholderSpec {
    pub name: String,
    pub type_name: Option<String>,
}

fn is_name_char(ch: char) -> bool {
    ch.is_ascii_alphanumeric() || ch == '_'
}

fn is_valid_type_name(raw: &str) -> bool {
    !raw.is_empty() && !raw.chars().any(|c| c.is_whitespace() || c == '{' || c == ':')
}

/// Parse a field placeholder whose opening brace at `start` was consumed.
pub(crate) fn parse_placeholder(
    chars: &mut Peekable<CharIndices<'_>>,
    start: usize,
) -> Result<PlaceholderSpec, SchemaError> {
    let mut name = String::new();
    while let Some((_, ch)) = chars.next_if(|&(_, c)| is_name_char(c)) {
        name.push(ch);
    }

    let mut type_name = None;
    if chars.next_if(|&(_, c)| c == ':').is_some() {
        let mut raw = String::new();
        while let Some((_, ch)) = chars.next_if(|&(_, c)| c != '}') {
            raw.push(ch);
        }
        if !is_valid_type_name(&raw) {
            return Err(placeholder_error(
                "invalid type name in field",
                start,
                Some(name),
            ));
        }
        type_name = Some(raw);
    }

    match chars.next() {
        Some((_, '}')) => Ok(PlaceholderSpec { name, type_name }),
        Some(_) => Err(placeholder_error("invalid field name", start, Some(name))),
        None => Err(placeholder_error(
            "missing closing '}' for field",
            start,
            Some(name),
        )),
    }
}
