use std::fmt;

use crate::evaluate;
use crate::parse::{self, ParseError};

use super::expr::Expr;
use super::fields::FieldSet;
use super::report::MatchReport;
use super::section::Section;

/// A parsed query: the compiled expression tree plus the source text it
/// came from.
///
/// Immutable once parsed and `Send + Sync`, so one `Query` behind an `Arc`
/// can filter a corpus across threads. A blank query matches every record.
///
/// # Example
///
/// ```
/// use docket::{Query, Section};
///
/// let query = Query::parse("heading: liens article: \"negative covenants\"").unwrap();
/// let section = Section::new()
///     .set("heading", "Permitted Liens")
///     .set("article", "Negative Covenants");
/// assert!(query.matches(&section));
/// ```
#[derive(Debug, Clone, PartialEq)]
pub struct Query {
    expr: Option<Expr>,
    source: String,
}

impl Query {
    pub(crate) fn new(expr: Option<Expr>, source: &str) -> Self {
        Self {
            expr,
            source: source.to_owned(),
        }
    }

    /// Parse a query string against the default corpus field set.
    ///
    /// # Errors
    ///
    /// Returns [`ParseError`] if the input is not a valid query.
    pub fn parse(input: &str) -> Result<Self, ParseError> {
        parse::parse(input)
    }

    /// Parse a query string against an injected field set.
    ///
    /// # Errors
    ///
    /// Returns [`ParseError`] if the input is not a valid query.
    pub fn parse_with(input: &str, fields: &FieldSet) -> Result<Self, ParseError> {
        parse::parse_with(input, fields)
    }

    /// Wrap a programmatically-built expression in a query. The source text
    /// is the expression's canonical printed form.
    #[must_use]
    pub fn from_expr(expr: Expr) -> Self {
        let source = expr.to_string();
        Self {
            expr: Some(expr),
            source,
        }
    }

    /// The compiled expression tree, or `None` for a blank query.
    #[must_use]
    pub fn expr(&self) -> Option<&Expr> {
        self.expr.as_ref()
    }

    /// The query text this was parsed from.
    #[must_use]
    pub fn source(&self) -> &str {
        &self.source
    }

    /// Whether this query matches every record (blank input).
    #[must_use]
    pub fn is_match_all(&self) -> bool {
        self.expr.is_none()
    }

    /// Evaluate this query against one section record.
    #[must_use]
    pub fn matches(&self, section: &Section) -> bool {
        match &self.expr {
            Some(expr) => evaluate::matches(expr, section),
            None => true,
        }
    }

    /// Evaluate and report the matched text ranges for highlighting.
    pub fn matches_detailed(&self, section: &Section) -> MatchReport {
        match &self.expr {
            Some(expr) => evaluate::matches_detailed(expr, section),
            None => MatchReport::new(true, Vec::new()),
        }
    }

    /// Filter a collection of sections down to those matching this query.
    pub fn filter<'s, I>(&self, sections: I) -> Vec<&'s Section>
    where
        I: IntoIterator<Item = &'s Section>,
    {
        sections
            .into_iter()
            .filter(|section| self.matches(section))
            .collect()
    }
}

/// Prints the canonical, re-parseable form of the expression (not the
/// original source text). Blank queries print as empty.
impl fmt::Display for Query {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.expr {
            Some(expr) => write!(f, "{expr}"),
            None => Ok(()),
        }
    }
}
