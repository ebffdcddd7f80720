use std::cmp::Ordering;
use std::fmt;
use std::ops::Range;

use regex::{Regex, RegexBuilder};

use super::section::Value;

/// How a field term matches a field's value.
///
/// Every matcher compiles a case-insensitive [`Regex`] finder when the query
/// is parsed, so per-record evaluation allocates nothing and highlight
/// ranges come from the same machinery that decides the boolean. Construct
/// matchers through [`Matcher::bare`], [`Matcher::phrase`], and
/// [`Matcher::pattern`].
#[derive(Debug, Clone)]
pub enum Matcher {
    /// An unquoted word, matched as a case-insensitive substring. If the
    /// whole word parses as a number, numeric field values compare by value
    /// equality instead.
    Bare {
        text: String,
        number: Option<f64>,
        finder: Regex,
    },
    /// A quoted phrase: the words must appear contiguously, case-insensitive
    /// and whitespace-normalized.
    Phrase { text: String, finder: Regex },
    /// A `/…/` regex literal, compiled case-insensitive.
    Pattern { source: String, regex: Regex },
}

fn literal_finder(pattern: &str) -> Regex {
    RegexBuilder::new(pattern)
        .case_insensitive(true)
        .build()
        .expect("escaped literal is a valid pattern")
}

fn parse_number(text: &str) -> Option<f64> {
    text.parse::<f64>().ok().filter(|n| n.is_finite())
}

impl Matcher {
    /// Matcher for an unquoted word.
    #[must_use]
    pub fn bare(text: &str) -> Self {
        Matcher::Bare {
            text: text.to_owned(),
            number: parse_number(text),
            finder: literal_finder(&regex::escape(text)),
        }
    }

    /// Matcher for a quoted phrase. Runs of whitespace in the phrase match
    /// runs of whitespace in the field text.
    #[must_use]
    pub fn phrase(text: &str) -> Self {
        let pattern = text
            .split_whitespace()
            .map(regex::escape)
            .collect::<Vec<_>>()
            .join(r"\s+");
        Matcher::Phrase {
            text: text.to_owned(),
            finder: literal_finder(&pattern),
        }
    }

    /// Matcher for a regex literal.
    ///
    /// # Errors
    ///
    /// Returns the `regex` crate's error if the pattern does not compile.
    pub fn pattern(source: &str) -> Result<Self, regex::Error> {
        let regex = RegexBuilder::new(source).case_insensitive(true).build()?;
        Ok(Matcher::Pattern {
            source: source.to_owned(),
            regex,
        })
    }

    /// Whether this matcher matches the given field value.
    #[must_use]
    pub fn matches(&self, value: &Value) -> bool {
        match value {
            Value::Text(text) => self.finder().is_match(text),
            Value::Int(_) | Value::Float(_) => self.matches_number(value),
        }
    }

    /// Numeric values compare by equality against a numeric bareword; any
    /// other matcher falls back to matching the rendered number.
    fn matches_number(&self, value: &Value) -> bool {
        let Some(n) = value.as_number() else {
            return false;
        };
        if let Matcher::Bare {
            number: Some(q), ..
        } = self
        {
            return q.partial_cmp(&n) == Some(Ordering::Equal);
        }
        self.finder().is_match(&value.render())
    }

    /// All non-empty match ranges of this matcher in `text`, byte-indexed.
    #[must_use]
    pub fn find_ranges(&self, text: &str) -> Vec<Range<usize>> {
        self.finder()
            .find_iter(text)
            .map(|m| m.range())
            .filter(|r| !r.is_empty())
            .collect()
    }

    fn finder(&self) -> &Regex {
        match self {
            Matcher::Bare { finder, .. } | Matcher::Phrase { finder, .. } => finder,
            Matcher::Pattern { regex, .. } => regex,
        }
    }
}

impl fmt::Display for Matcher {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Matcher::Bare { text, .. } => write!(f, "{text}"),
            Matcher::Phrase { text, .. } => {
                write!(f, "\"")?;
                for ch in text.chars() {
                    match ch {
                        '"' => write!(f, "\\\"")?,
                        '\\' => write!(f, "\\\\")?,
                        c => write!(f, "{c}")?,
                    }
                }
                write!(f, "\"")
            }
            Matcher::Pattern { source, .. } => {
                write!(f, "/")?;
                for ch in source.chars() {
                    if ch == '/' {
                        write!(f, "\\/")?;
                    } else {
                        write!(f, "{ch}")?;
                    }
                }
                write!(f, "/")
            }
        }
    }
}

/// Structural equality: the compiled finder is derived from the text, so
/// comparing the text is enough.
impl PartialEq for Matcher {
    fn eq(&self, other: &Self) -> bool {
        match (self, other) {
            (Matcher::Bare { text: a, .. }, Matcher::Bare { text: b, .. }) => a == b,
            (Matcher::Phrase { text: a, .. }, Matcher::Phrase { text: b, .. }) => a == b,
            (Matcher::Pattern { source: a, .. }, Matcher::Pattern { source: b, .. }) => a == b,
            _ => false,
        }
    }
}
