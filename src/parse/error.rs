use thiserror::Error;
use winnow::error::{ContextError, StrContext};

/// Errors produced when parsing a query string.
///
/// Every variant carries a byte offset into the query so the search box can
/// annotate the failure inline. A query parses fully or is rejected whole;
/// there is no partial parse.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ParseError {
    /// A character outside the query alphabet, outside any literal.
    #[error("unrecognized character '{ch}' at offset {offset}")]
    Lexical { offset: usize, ch: char },

    /// A quoted phrase or regex literal with no closing delimiter.
    #[error("unterminated {what} literal starting at offset {offset}")]
    Unterminated { offset: usize, what: &'static str },

    /// `word:` where `word` is not a recognized field or metadata name.
    #[error("unknown field '{name}' at offset {offset}")]
    UnknownField { offset: usize, name: String },

    /// A grammar violation: missing operand, unbalanced parentheses,
    /// dangling operator.
    #[error("syntax error at offset {offset}: expected {expected}, found {found}")]
    Syntax {
        offset: usize,
        expected: String,
        found: String,
    },

    /// A regex literal that does not compile.
    #[error("invalid pattern at offset {offset}: {message}")]
    PatternCompile { offset: usize, message: String },
}

impl ParseError {
    /// Byte offset of the error in the query string.
    #[must_use]
    pub fn offset(&self) -> usize {
        match self {
            ParseError::Lexical { offset, .. }
            | ParseError::Unterminated { offset, .. }
            | ParseError::UnknownField { offset, .. }
            | ParseError::Syntax { offset, .. }
            | ParseError::PatternCompile { offset, .. } => *offset,
        }
    }

    /// Convert the grammar's winnow error into a located syntax error.
    ///
    /// The lexical pass has already accepted the input, so whatever the
    /// grammar rejects is a grammar-level problem. Expectation contexts
    /// attached in the grammar become the `expected` description.
    pub(crate) fn from_winnow(
        source: &str,
        err: winnow::error::ParseError<&str, ContextError>,
    ) -> Self {
        let offset = err.offset();
        let inner = err.into_inner();
        let mut expected: Vec<String> = inner
            .context()
            .filter_map(|c| match c {
                StrContext::Expected(value) => Some(value.to_string()),
                _ => None,
            })
            .collect();
        expected.dedup();
        let expected = if expected.is_empty() {
            "expression".to_owned()
        } else {
            expected.join(" or ")
        };
        let found = source[offset..]
            .chars()
            .next()
            .map_or_else(|| "end of input".to_owned(), |c| format!("'{c}'"));
        ParseError::Syntax {
            offset,
            expected,
            found,
        }
    }
}
