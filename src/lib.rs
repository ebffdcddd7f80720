//! Boolean query engine for filtering legal document-section records.
//!
//! Parses a `field: value` query language with `AND`/`OR`/`NOT`, grouping,
//! quoted phrases, and `/regex/` literals into an immutable [`Query`], then
//! evaluates it against [`Section`] records.

mod evaluate;
mod parse;
mod types;

pub use parse::ParseError;
pub use types::{
    Expr, FieldSet, FieldTerm, Highlight, MatchReport, Matcher, Query, Section, Value,
    CORPUS_FIELDS,
};

/// Parse a query string against the default corpus field set.
///
/// # Errors
///
/// Returns [`ParseError`] if the input is not a valid query.
pub fn parse(input: &str) -> Result<Query, ParseError> {
    Query::parse(input)
}

/// Parse a query string against an injected field set.
///
/// # Errors
///
/// Returns [`ParseError`] if the input is not a valid query.
pub fn parse_with(input: &str, fields: &FieldSet) -> Result<Query, ParseError> {
    Query::parse_with(input, fields)
}
