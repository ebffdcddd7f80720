mod expr;
mod fields;
mod matcher;
mod query;
mod report;
mod section;

pub use expr::{Expr, FieldTerm};
pub use fields::{FieldSet, CORPUS_FIELDS};
pub use matcher::Matcher;
pub use query::Query;
pub use report::{Highlight, MatchReport};
pub use section::{Section, Value};
