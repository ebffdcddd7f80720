use std::fmt;
use std::ops::Not;

use super::matcher::Matcher;

/// A single `field: value` predicate.
#[derive(Debug, Clone, PartialEq)]
pub struct FieldTerm {
    pub field: String,
    pub matcher: Matcher,
}

impl FieldTerm {
    #[must_use]
    pub fn new(field: impl Into<String>, matcher: Matcher) -> Self {
        Self {
            field: field.into(),
            matcher,
        }
    }
}

/// Query expression tree.
///
/// Parenthesized groups exist only while parsing; they shape the tree and
/// are not retained as nodes. The tree is immutable once built and safe to
/// share across threads.
#[derive(Debug, Clone, PartialEq)]
pub enum Expr {
    Term(FieldTerm),
    And(Box<Expr>, Box<Expr>),
    Or(Box<Expr>, Box<Expr>),
    Not(Box<Expr>),
}

impl Expr {
    /// Leaf expression for a `field: value` predicate.
    #[must_use]
    pub fn term(field: impl Into<String>, matcher: Matcher) -> Expr {
        Expr::Term(FieldTerm::new(field, matcher))
    }

    #[must_use]
    pub fn and(self, other: Expr) -> Expr {
        Expr::And(Box::new(self), Box::new(other))
    }

    #[must_use]
    pub fn or(self, other: Expr) -> Expr {
        Expr::Or(Box::new(self), Box::new(other))
    }
}

impl Not for Expr {
    type Output = Expr;

    fn not(self) -> Expr {
        Expr::Not(Box::new(self))
    }
}

impl fmt::Display for FieldTerm {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}: {}", self.field, self.matcher)
    }
}

impl fmt::Display for Expr {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Expr::Term(term) => write!(f, "{term}"),
            Expr::And(a, b) => write!(f, "({a} AND {b})"),
            Expr::Or(a, b) => write!(f, "({a} OR {b})"),
            Expr::Not(inner) => write!(f, "(NOT {inner})"),
        }
    }
}
