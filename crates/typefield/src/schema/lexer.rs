//! Template lexer converting schema templates into semantic tokens.

use crate::errors::SchemaError;

use super::placeholder::{PlaceholderSpec, parse_placeholder};

#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) enum Token {
    Literal(String),
    Field {
        name: String,
        type_name: Option<String>,
    },
    OpenBrace {
        index: usize,
    },
    CloseBrace {
        index: usize,
    },
}

fn starts_field(ch: char) -> bool {
    ch.is_ascii_alphabetic() || ch == '_'
}

pub(crate) fn lex_template(template: &str) -> Result<Vec<Token>, SchemaError> {
    let mut tokens = Vec::new();
    let mut literal = String::new();
    let mut chars = template.char_indices().peekable();

    let flush_literal = |literal: &mut String, tokens: &mut Vec<Token>| {
        if !literal.is_empty() {
            tokens.push(Token::Literal(std::mem::take(literal)));
        }
    };

    while let Some((pos, ch)) = chars.next() {
        match ch {
            '{' if chars.next_if(|&(_, next)| next == '{').is_some() => literal.push('{'),
            '{' if chars.peek().is_some_and(|&(_, next)| starts_field(next)) => {
                flush_literal(&mut literal, &mut tokens);
                let PlaceholderSpec { name, type_name } = parse_placeholder(&mut chars, pos)?;
                tokens.push(Token::Field { name, type_name });
            }
            '{' => {
                flush_literal(&mut literal, &mut tokens);
                tokens.push(Token::OpenBrace { index: pos });
            }
            '}' if chars.next_if(|&(_, next)| next == '}').is_some() => literal.push('}'),
            '}' => {
                flush_literal(&mut literal, &mut tokens);
                tokens.push(Token::CloseBrace { index: pos });
            }
            _ => literal.push(ch),
        }
    }

    flush_literal(&mut literal, &mut tokens);
    Ok(tokens)
}
