//! Lexical validation pass.
//!
//! Runs over the raw query before the grammar: checks the token alphabet
//! and literal termination, so lexical errors surface with exact offsets
//! and take precedence over downstream syntax errors. The grammar re-reads
//! literals itself; this pass only decides whether the input is lexically
//! well formed.

use super::error::ParseError;

pub(crate) fn is_word_char(c: char) -> bool {
    c.is_alphanumeric() || matches!(c, '_' | '.' | '-')
}

fn is_symbol(c: char) -> bool {
    matches!(c, '(' | ')' | ':' | '&' | '|' | '!')
}

pub(crate) fn validate(input: &str) -> Result<(), ParseError> {
    let mut chars = input.char_indices();
    while let Some((offset, ch)) = chars.next() {
        match ch {
            '"' => scan_literal(&mut chars, offset, '"', "string")?,
            '/' => scan_literal(&mut chars, offset, '/', "regex")?,
            c if c.is_whitespace() || is_word_char(c) || is_symbol(c) => {}
            c => return Err(ParseError::Lexical { offset, ch: c }),
        }
    }
    Ok(())
}

/// Consume up to and including the closing delimiter, honoring `\` escapes.
/// A trailing lone backslash leaves the literal unterminated.
fn scan_literal(
    chars: &mut std::str::CharIndices<'_>,
    start: usize,
    close: char,
    what: &'static str,
) -> Result<(), ParseError> {
    while let Some((_, c)) = chars.next() {
        if c == close {
            return Ok(());
        }
        if c == '\\' && chars.next().is_none() {
            break;
        }
    }
    Err(ParseError::Unterminated {
        offset: start,
        what,
    })
}
