//! Test helpers for asserting field placeholder parser outcomes.
use super::placeholder::{PlaceholderSpec, parse_placeholder};
use crate::errors::SchemaError;

fn parse(template: &str) -> Result<PlaceholderSpec, SchemaError> {
    let mut chars = template.char_indices().peekable();
    match chars.next() {
        Some((start, '{')) => parse_placeholder(&mut chars, start),
        _ => panic!("field template must start with '{{': {template:?}"),
    }
}

pub(crate) fn parse_ok(template: &str) -> PlaceholderSpec {
    match parse(template) {
        Ok(spec) => spec,
        Err(err) => panic!("field should parse: {err}"),
    }
}

pub(crate) fn parse_err(template: &str) -> SchemaError {
    match parse(template) {
        Ok(_) => panic!("field parsing should fail"),
        Err(err) => err,
    }
}
