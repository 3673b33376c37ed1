use crate::compare::execute_condition;
use crate::types::split_literal;
use crate::{Expr, Record};

/// Reduce an expression tree against a record.
///
/// A leaf that cannot be split, or whose attribute is absent from the record,
/// contributes `false` without affecting its siblings. `AND`/`OR` operands
/// short-circuit left to right.
#[must_use]
pub fn evaluate(expr: &Expr, record: &Record) -> bool {
    match expr {
        Expr::Leaf(literal) => eval_leaf(literal, record),
        Expr::And(operands) => operands.iter().all(|e| evaluate(e, record)),
        Expr::Or(operands) => operands.iter().any(|e| evaluate(e, record)),
        Expr::Not(inner) => !evaluate(inner, record),
    }
}

fn eval_leaf(literal: &str, record: &Record) -> bool {
    let leaf = match split_literal(literal) {
        Ok(leaf) => leaf,
        Err(err) => {
            tracing::debug!(%err, "leaf evaluates to false");
            return false;
        }
    };

    let Some(value) = record.get(leaf.attribute) else {
        tracing::trace!(attribute = leaf.attribute, "attribute missing from record");
        return false;
    };

    let matched = execute_condition(value, leaf.operator, leaf.raw_value);
    tracing::trace!(
        attribute = leaf.attribute,
        operator = %leaf.operator,
        value = leaf.raw_value,
        attribute_type = value.type_name(),
        matched,
        "leaf evaluated"
    );
    matched
}
