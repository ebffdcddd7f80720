use winnow::combinator::{alt, cut_err, delimited, opt, preceded, repeat};
use winnow::error::{ErrMode, ModalResult, StrContext, StrContextValue};
use winnow::prelude::*;
use winnow::token::{any, take_while};

use super::lex::is_word_char;

// -- Raw AST ----------------------------------------------------------------

/// Expression tree as parsed, borrowing identifier and literal slices from
/// the query string so the compile pass can report exact byte offsets.
#[derive(Debug, Clone, PartialEq)]
pub(crate) enum RawExpr<'i> {
    Term { field: &'i str, value: RawValue<'i> },
    And(Box<RawExpr<'i>>, Box<RawExpr<'i>>),
    Or(Box<RawExpr<'i>>, Box<RawExpr<'i>>),
    Not(Box<RawExpr<'i>>),
}

#[derive(Debug, Clone, PartialEq)]
pub(crate) enum RawValue<'i> {
    Bare(&'i str),
    Phrase(String),
    Pattern { raw: &'i str, pattern: String },
}

/// Boolean structure inside one field scope, before the field name is
/// distributed over it.
#[derive(Debug, Clone, PartialEq)]
enum ValueExpr<'i> {
    Leaf(RawValue<'i>),
    And(Box<ValueExpr<'i>>, Box<ValueExpr<'i>>),
    Or(Box<ValueExpr<'i>>, Box<ValueExpr<'i>>),
    Not(Box<ValueExpr<'i>>),
}

// -- Whitespace & words -----------------------------------------------------

fn ws(input: &mut &str) -> ModalResult<()> {
    take_while(0.., |c: char| c.is_whitespace())
        .void()
        .parse_next(input)
}

fn ident<'i>(input: &mut &'i str) -> ModalResult<&'i str> {
    (
        take_while(1.., |c: char| c.is_ascii_alphabetic() || c == '_'),
        take_while(0.., |c: char| c.is_ascii_alphanumeric() || c == '_'),
    )
        .take()
        .parse_next(input)
}

fn is_reserved(word: &str) -> bool {
    word.eq_ignore_ascii_case("and")
        || word.eq_ignore_ascii_case("or")
        || word.eq_ignore_ascii_case("not")
}

fn bareword<'i>(input: &mut &'i str) -> ModalResult<&'i str> {
    let word = take_while(1.., is_word_char).parse_next(input)?;
    // Reserved words are operators, and a word glued to ':' is a field
    // head, not a value.
    if is_reserved(word) || input.starts_with(':') {
        return Err(ErrMode::from_input(input));
    }
    Ok(word)
}

// -- Operators --------------------------------------------------------------

fn keyword<'i>(word: &'static str) -> impl FnMut(&mut &'i str) -> ModalResult<()> {
    move |input: &mut &'i str| {
        let name = ident.parse_next(input)?;
        if name.eq_ignore_ascii_case(word) {
            Ok(())
        } else {
            Err(ErrMode::from_input(input))
        }
    }
}

fn and_op(input: &mut &str) -> ModalResult<()> {
    ws.parse_next(input)?;
    alt(("&&".void(), '&'.void(), keyword("and"))).parse_next(input)
}

fn or_op(input: &mut &str) -> ModalResult<()> {
    ws.parse_next(input)?;
    alt(("||".void(), '|'.void(), keyword("or"))).parse_next(input)
}

fn not_op(input: &mut &str) -> ModalResult<()> {
    ws.parse_next(input)?;
    alt(('!'.void(), keyword("not"))).parse_next(input)
}

// -- Literals ---------------------------------------------------------------

fn quoted_phrase(input: &mut &str) -> ModalResult<String> {
    '"'.parse_next(input)?;
    let mut s = String::new();
    loop {
        let ch = any.parse_next(input)?;
        match ch {
            '"' => return Ok(s),
            '\\' => {
                let esc = any.parse_next(input)?;
                match esc {
                    '"' => s.push('"'),
                    '\\' => s.push('\\'),
                    'n' => s.push('\n'),
                    't' => s.push('\t'),
                    other => {
                        s.push('\\');
                        s.push(other);
                    }
                }
            }
            c => s.push(c),
        }
    }
}

/// `/…/` literal. Only `\/` is an escape; every other backslash sequence
/// passes through to the pattern verbatim.
fn regex_literal<'i>(input: &mut &'i str) -> ModalResult<RawValue<'i>> {
    let start = *input;
    '/'.parse_next(input)?;
    let mut pattern = String::new();
    loop {
        let ch = any.parse_next(input)?;
        match ch {
            '/' => break,
            '\\' => {
                let esc = any.parse_next(input)?;
                if esc == '/' {
                    pattern.push('/');
                } else {
                    pattern.push('\\');
                    pattern.push(esc);
                }
            }
            c => pattern.push(c),
        }
    }
    let raw = &start[..start.len() - input.len()];
    Ok(RawValue::Pattern { raw, pattern })
}

// -- Field scopes (precedence: OR < AND < NOT < atom) -----------------------

fn value_atom<'i>(input: &mut &'i str) -> ModalResult<ValueExpr<'i>> {
    ws.parse_next(input)?;
    alt((
        delimited(
            '(',
            value_or,
            (
                ws,
                cut_err(')').context(StrContext::Expected(StrContextValue::CharLiteral(')'))),
            ),
        ),
        quoted_phrase.map(|text| ValueExpr::Leaf(RawValue::Phrase(text))),
        regex_literal.map(ValueExpr::Leaf),
        bareword.map(|word| ValueExpr::Leaf(RawValue::Bare(word))),
    ))
    .context(StrContext::Expected(StrContextValue::Description("value")))
    .parse_next(input)
}

fn value_not<'i>(input: &mut &'i str) -> ModalResult<ValueExpr<'i>> {
    ws.parse_next(input)?;
    if opt(not_op).parse_next(input)?.is_some() {
        // No commit here: a failing operand means the field scope ended
        // and `NOT` belongs to the enclosing expression.
        let inner = value_not(input)?;
        Ok(ValueExpr::Not(Box::new(inner)))
    } else {
        value_atom(input)
    }
}

fn value_and<'i>(input: &mut &'i str) -> ModalResult<ValueExpr<'i>> {
    let first = value_not(input)?;
    let rest: Vec<ValueExpr<'i>> =
        repeat(0.., alt((preceded(and_op, value_not), value_not))).parse_next(input)?;
    Ok(rest
        .into_iter()
        .fold(first, |acc, r| ValueExpr::And(Box::new(acc), Box::new(r))))
}

fn value_or<'i>(input: &mut &'i str) -> ModalResult<ValueExpr<'i>> {
    let first = value_and(input)?;
    let rest: Vec<ValueExpr<'i>> = repeat(0.., preceded(or_op, value_and)).parse_next(input)?;
    Ok(rest
        .into_iter()
        .fold(first, |acc, r| ValueExpr::Or(Box::new(acc), Box::new(r))))
}

/// Distribute a field over its scoped value tree: `heading:(a OR b)`
/// becomes `heading:a OR heading:b`, so the final tree contains only plain
/// field terms.
fn distribute<'i>(field: &'i str, value: ValueExpr<'i>) -> RawExpr<'i> {
    match value {
        ValueExpr::Leaf(v) => RawExpr::Term { field, value: v },
        ValueExpr::And(a, b) => RawExpr::And(
            Box::new(distribute(field, *a)),
            Box::new(distribute(field, *b)),
        ),
        ValueExpr::Or(a, b) => RawExpr::Or(
            Box::new(distribute(field, *a)),
            Box::new(distribute(field, *b)),
        ),
        ValueExpr::Not(inner) => RawExpr::Not(Box::new(distribute(field, *inner))),
    }
}

fn field_term<'i>(input: &mut &'i str) -> ModalResult<RawExpr<'i>> {
    ws.parse_next(input)?;
    let field = ident.parse_next(input)?;
    ':'.parse_next(input)?;
    let value = cut_err(value_or)
        .context(StrContext::Expected(StrContextValue::Description("value")))
        .parse_next(input)?;
    Ok(distribute(field, value))
}

// -- Expressions (precedence: OR < AND < NOT < atom) ------------------------

fn atom<'i>(input: &mut &'i str) -> ModalResult<RawExpr<'i>> {
    ws.parse_next(input)?;
    alt((
        delimited(
            '(',
            or_expr,
            (
                ws,
                cut_err(')').context(StrContext::Expected(StrContextValue::CharLiteral(')'))),
            ),
        ),
        field_term,
    ))
    .context(StrContext::Expected(StrContextValue::Description(
        "field term or group",
    )))
    .parse_next(input)
}

fn not_expr<'i>(input: &mut &'i str) -> ModalResult<RawExpr<'i>> {
    ws.parse_next(input)?;
    if opt(not_op).parse_next(input)?.is_some() {
        let inner = cut_err(not_expr).parse_next(input)?;
        Ok(RawExpr::Not(Box::new(inner)))
    } else {
        atom(input)
    }
}

fn and_expr<'i>(input: &mut &'i str) -> ModalResult<RawExpr<'i>> {
    let first = not_expr(input)?;
    // Juxtaposition of two terms is an implicit AND.
    let rest: Vec<RawExpr<'i>> =
        repeat(0.., alt((preceded(and_op, cut_err(not_expr)), not_expr))).parse_next(input)?;
    Ok(rest
        .into_iter()
        .fold(first, |acc, r| RawExpr::And(Box::new(acc), Box::new(r))))
}

fn or_expr<'i>(input: &mut &'i str) -> ModalResult<RawExpr<'i>> {
    let first = and_expr(input)?;
    let rest: Vec<RawExpr<'i>> =
        repeat(0.., preceded(or_op, cut_err(and_expr))).parse_next(input)?;
    Ok(rest
        .into_iter()
        .fold(first, |acc, r| RawExpr::Or(Box::new(acc), Box::new(r))))
}

// -- Top-level parser -------------------------------------------------------

/// `None` for a blank query, which matches every record.
pub(crate) fn parse_query<'i>(input: &mut &'i str) -> ModalResult<Option<RawExpr<'i>>> {
    ws.parse_next(input)?;
    if input.is_empty() {
        return Ok(None);
    }
    let expr = or_expr(input)?;
    ws.parse_next(input)?;
    Ok(Some(expr))
}
