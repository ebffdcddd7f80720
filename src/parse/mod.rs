mod compile;
mod error;
mod grammar;
mod lex;

pub use error::ParseError;

use winnow::Parser;

use crate::types::{FieldSet, Query};

/// Parse a query string against the default corpus field set.
///
/// # Errors
///
/// Returns [`ParseError`] if the input is not a valid query.
pub(crate) fn parse(input: &str) -> Result<Query, ParseError> {
    parse_with(input, &FieldSet::default())
}

/// Parse a query string against an injected field set.
///
/// # Errors
///
/// Returns [`ParseError`] if the input is not a valid query.
pub(crate) fn parse_with(input: &str, fields: &FieldSet) -> Result<Query, ParseError> {
    lex::validate(input)?;
    let raw = grammar::parse_query
        .parse(input)
        .map_err(|e| ParseError::from_winnow(input, e))?;
    let expr = raw.map(|r| compile::compile(r, input, fields)).transpose()?;
    Ok(Query::new(expr, input))
}
