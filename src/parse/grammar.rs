use winnow::ascii::{multispace0, Caseless};
use winnow::combinator::{alt, cut_err, delimited, eof, not, opt, preceded, repeat, terminated};
use winnow::error::{ErrMode, ModalResult, StrContext, StrContextValue};
use winnow::prelude::*;
use winnow::token::{one_of, take};

use crate::Expr;

// -- Whitespace & keywords --------------------------------------------------

fn ws(input: &mut &str) -> ModalResult<()> {
    multispace0.void().parse_next(input)
}

fn is_word_char(c: char) -> bool {
    c.is_alphanumeric() || c == '_'
}

/// A case-insensitive connective that must not run into a following word.
fn keyword<'i>(kw: &'static str) -> impl Parser<&'i str, &'i str, ErrMode<winnow::error::ContextError>> {
    terminated(Caseless(kw), not(one_of(is_word_char)))
}

/// Whether `rest` opens with `and`/`or`/`not` as a whole word.
fn starts_with_connective(rest: &str) -> bool {
    ["and", "or", "not"].iter().any(|kw| {
        rest.get(..kw.len())
            .is_some_and(|head| head.eq_ignore_ascii_case(kw))
            && !rest[kw.len()..].starts_with(is_word_char)
    })
}

// -- Leaf literals ----------------------------------------------------------

/// Capture a leaf verbatim, up to a parenthesis or a whitespace-preceded
/// connective. Quoted runs are opaque when their closing quote exists.
///
/// A `not` inside a leaf also ends it, so `x = 1 NOT y = 2` is rejected
/// instead of comparing `x` against `1 NOT y = 2`.
fn leaf_literal<'i>(input: &mut &'i str) -> ModalResult<&'i str> {
    let text = *input;
    let mut end = text.len();
    let mut closing_quote: Option<usize> = None;
    // Quote characters with no partner left in `text`; `[double, single]`.
    let mut unpaired = [false; 2];
    let mut after_space = true;

    for (idx, ch) in text.char_indices() {
        if let Some(close) = closing_quote {
            if idx == close {
                closing_quote = None;
            }
            after_space = false;
            continue;
        }
        match ch {
            '"' | '\'' => {
                let slot = usize::from(ch == '\'');
                if !unpaired[slot] {
                    match text[idx + 1..].find(ch) {
                        Some(offset) => closing_quote = Some(idx + 1 + offset),
                        None => unpaired[slot] = true,
                    }
                }
            }
            '(' | ')' => {
                end = idx;
                break;
            }
            _ if after_space && starts_with_connective(&text[idx..]) => {
                end = idx;
                break;
            }
            _ => {}
        }
        after_space = ch.is_whitespace();
    }

    let literal = text[..end].trim_end();
    if literal.is_empty() {
        return Err(ErrMode::from_input(input));
    }
    take(literal.len()).parse_next(input)
}

// -- Expressions (precedence: OR < AND < NOT < primary) ---------------------

fn primary(input: &mut &str) -> ModalResult<Expr> {
    ws.parse_next(input)?;
    alt((
        delimited('(', expr, (ws, cut_err(')'))),
        leaf_literal.map(|literal: &str| Expr::Leaf(literal.to_owned())),
    ))
    .context(StrContext::Expected(StrContextValue::Description(
        "condition",
    )))
    .parse_next(input)
}

fn unary(input: &mut &str) -> ModalResult<Expr> {
    ws.parse_next(input)?;
    if opt(keyword("not")).parse_next(input)?.is_some() {
        let inner = cut_err(unary).parse_next(input)?;
        Ok(Expr::Not(Box::new(inner)))
    } else {
        primary(input)
    }
}

fn and_expr(input: &mut &str) -> ModalResult<Expr> {
    let first = unary(input)?;
    let rest: Vec<Expr> =
        repeat(0.., preceded((ws, keyword("and")), cut_err(unary))).parse_next(input)?;
    Ok(rest.into_iter().fold(first, Expr::and))
}

fn or_expr(input: &mut &str) -> ModalResult<Expr> {
    let first = and_expr(input)?;
    let rest: Vec<Expr> =
        repeat(0.., preceded((ws, keyword("or")), cut_err(and_expr))).parse_next(input)?;
    Ok(rest.into_iter().fold(first, Expr::or))
}

fn expr(input: &mut &str) -> ModalResult<Expr> {
    ws.parse_next(input)?;
    or_expr(input)
}

// -- Top-level parser -------------------------------------------------------

pub fn parse_expression(input: &mut &str) -> ModalResult<Expr> {
    terminated(expr, (ws, eof)).parse_next(input)
}
