use crate::types::{Expr, Highlight, MatchReport, Section, Value};

/// Pure boolean evaluation with short-circuiting. Absent fields never
/// match.
pub(crate) fn matches(expr: &Expr, section: &Section) -> bool {
    match expr {
        Expr::Term(term) => section
            .get(&term.field)
            .is_some_and(|value| term.matcher.matches(value)),
        Expr::And(a, b) => matches(a, section) && matches(b, section),
        Expr::Or(a, b) => matches(a, section) || matches(b, section),
        Expr::Not(inner) => !matches(inner, section),
    }
}

pub(crate) fn matches_detailed(expr: &Expr, section: &Section) -> MatchReport {
    let mut highlights = Vec::new();
    let matched = collect(expr, section, true, &mut highlights);
    MatchReport::new(matched, highlights)
}

/// Full (non-short-circuit) evaluation that records text ranges for terms
/// holding under positive polarity. `positive` flips under each NOT, so a
/// hit that only helps by being negated produces no highlight. Numeric
/// matches have no stable text to span and produce none either.
fn collect(expr: &Expr, section: &Section, positive: bool, out: &mut Vec<Highlight>) -> bool {
    match expr {
        Expr::Term(term) => {
            let Some(value) = section.get(&term.field) else {
                return false;
            };
            let hit = term.matcher.matches(value);
            if hit && positive {
                if let Value::Text(text) = value {
                    for range in term.matcher.find_ranges(text) {
                        out.push(Highlight::new(term.field.clone(), range));
                    }
                }
            }
            hit
        }
        Expr::And(a, b) => {
            let left = collect(a, section, positive, out);
            let right = collect(b, section, positive, out);
            left && right
        }
        Expr::Or(a, b) => {
            let left = collect(a, section, positive, out);
            let right = collect(b, section, positive, out);
            left || right
        }
        Expr::Not(inner) => !collect(inner, section, !positive, out),
    }
}
