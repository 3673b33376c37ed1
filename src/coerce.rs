use std::borrow::Cow;

use crate::{Operator, Value};

/// An attribute/condition pair normalized for comparison.
#[derive(Debug, Clone, PartialEq)]
pub struct Coerced<'a> {
    pub attribute: Cow<'a, Value>,
    pub condition: Value,
}

/// Normalize a leaf's operands before comparison.
///
/// One layer of surrounding quotes is stripped from the condition text. Then,
/// in order:
/// 1. both sides numeric, or a relational operator with a non-empty condition:
///    both sides become truncated integers;
/// 2. condition text exactly `true` or `false`: the condition becomes a boolean;
/// 3. otherwise the attribute keeps its type and the condition stays a string.
#[must_use]
pub fn coerce<'a>(attribute: &'a Value, operator: Operator, raw_condition: &str) -> Coerced<'a> {
    let text = strip_quotes(raw_condition);
    let condition = Value::String(text.to_owned());

    if (attribute.is_numeric() && condition.is_numeric())
        || (operator.is_relational() && !text.is_empty())
    {
        return Coerced {
            attribute: Cow::Owned(Value::Int(attribute.to_int())),
            condition: Value::Int(condition.to_int()),
        };
    }

    let condition = match text {
        "true" => Value::Bool(true),
        "false" => Value::Bool(false),
        _ => condition,
    };

    Coerced {
        attribute: Cow::Borrowed(attribute),
        condition,
    }
}

/// Remove at most one quote character from each end.
fn strip_quotes(raw: &str) -> &str {
    let raw = raw.strip_prefix(['"', '\'']).unwrap_or(raw);
    raw.strip_suffix(['"', '\'']).unwrap_or(raw)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn numeric_pair_becomes_integers() {
        let attr = Value::from("35");
        let c = coerce(&attr, Operator::Equal, "30");
        assert_eq!(*c.attribute, Value::Int(35));
        assert_eq!(c.condition, Value::Int(30));
    }

    #[test]
    fn numeric_coercion_truncates_fractions() {
        let attr = Value::Float(18.9);
        let c = coerce(&attr, Operator::Identical, "18.2");
        assert_eq!(*c.attribute, Value::Int(18));
        assert_eq!(c.condition, Value::Int(18));
    }

    #[test]
    fn relational_operator_forces_integers() {
        let attr = Value::from("abc");
        let c = coerce(&attr, Operator::Gt, "x");
        assert_eq!(*c.attribute, Value::Int(0));
        assert_eq!(c.condition, Value::Int(0));
    }

    #[test]
    fn relational_with_empty_condition_keeps_types() {
        let attr = Value::from("abc");
        let c = coerce(&attr, Operator::Gt, "''");
        assert_eq!(*c.attribute, Value::from("abc"));
        assert_eq!(c.condition, Value::from(""));
    }

    #[test]
    fn boolean_literals() {
        let attr = Value::Bool(false);
        assert_eq!(coerce(&attr, Operator::Boolean, "true").condition, Value::Bool(true));
        assert_eq!(coerce(&attr, Operator::Equal, "'false'").condition, Value::Bool(false));
        assert_eq!(coerce(&attr, Operator::Equal, "TRUE").condition, Value::from("TRUE"));
    }

    #[test]
    fn relational_wins_over_boolean_literal() {
        let attr = Value::Int(1);
        assert_eq!(coerce(&attr, Operator::Gte, "true").condition, Value::Int(0));
    }

    #[test]
    fn strips_single_layer_of_quotes() {
        assert_eq!(strip_quotes("'active'"), "active");
        assert_eq!(strip_quotes("\"active\""), "active");
        assert_eq!(strip_quotes("''x''"), "'x'");
        assert_eq!(strip_quotes("it's"), "it's");
    }

    #[test]
    fn passthrough_keeps_attribute_borrowed() {
        let attr = Value::from("active");
        let c = coerce(&attr, Operator::Identical, "'active'");
        assert!(matches!(c.attribute, Cow::Borrowed(_)));
        assert_eq!(c.condition, Value::from("active"));
    }
}
