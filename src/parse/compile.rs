use crate::types::{Expr, FieldSet, Matcher};

use super::error::ParseError;
use super::grammar::{RawExpr, RawValue};

/// Byte offset of `slice` within `source`. The grammar only hands back
/// subslices of the original query, so the pointer arithmetic is sound.
fn offset_in(source: &str, slice: &str) -> usize {
    slice.as_ptr() as usize - source.as_ptr() as usize
}

/// Lower the raw tree to an owned [`Expr`]: resolve field names against the
/// field set and compile every matcher. Errors carry the offset of the
/// offending span.
pub(crate) fn compile(
    raw: RawExpr<'_>,
    source: &str,
    fields: &FieldSet,
) -> Result<Expr, ParseError> {
    match raw {
        RawExpr::Term { field, value } => {
            let canonical = fields
                .resolve(field)
                .ok_or_else(|| ParseError::UnknownField {
                    offset: offset_in(source, field),
                    name: field.to_owned(),
                })?
                .to_owned();
            let matcher = match value {
                RawValue::Bare(word) => Matcher::bare(word),
                RawValue::Phrase(text) => Matcher::phrase(&text),
                RawValue::Pattern { raw, pattern } => Matcher::pattern(&pattern).map_err(|e| {
                    ParseError::PatternCompile {
                        offset: offset_in(source, raw),
                        message: e.to_string(),
                    }
                })?,
            };
            Ok(Expr::term(canonical, matcher))
        }
        RawExpr::And(a, b) => Ok(Expr::And(
            Box::new(compile(*a, source, fields)?),
            Box::new(compile(*b, source, fields)?),
        )),
        RawExpr::Or(a, b) => Ok(Expr::Or(
            Box::new(compile(*a, source, fields)?),
            Box::new(compile(*b, source, fields)?),
        )),
        RawExpr::Not(inner) => Ok(Expr::Not(Box::new(compile(*inner, source, fields)?))),
    }
}
