use std::cmp::Ordering;

use crate::coerce::coerce;
use crate::{Operator, Value};

/// Apply `operator` to an attribute value and a raw condition value taken from a leaf.
///
/// The pair is coerced first (see [`coerce`]). Never fails: comparisons that
/// make no sense for the operand types yield `false`.
#[must_use]
pub fn execute_condition(attribute: &Value, operator: Operator, raw_condition: &str) -> bool {
    let coerced = coerce(attribute, operator, raw_condition);
    let (attribute, condition) = (coerced.attribute.as_ref(), &coerced.condition);

    match operator {
        Operator::Assign | Operator::Equal => loose_eq(attribute, condition),
        Operator::Identical => attribute == condition,
        Operator::NotEqual => !loose_eq(attribute, condition),
        Operator::NotIdentical => attribute != condition,
        Operator::Gt => loose_cmp(attribute, condition) == Some(Ordering::Greater),
        Operator::Lt => loose_cmp(attribute, condition) == Some(Ordering::Less),
        Operator::Gte => matches!(
            loose_cmp(attribute, condition),
            Some(Ordering::Greater | Ordering::Equal)
        ),
        Operator::Lte => matches!(
            loose_cmp(attribute, condition),
            Some(Ordering::Less | Ordering::Equal)
        ),
        Operator::Boolean | Operator::Truthy => {
            if condition.is_truthy() {
                attribute.is_truthy()
            } else {
                !attribute.is_truthy()
            }
        }
        Operator::Includes | Operator::Contains => match attribute {
            Value::List(items) => items.iter().any(|item| loose_eq(item, condition)),
            _ => with_string_forms(attribute, condition, |haystack, needle| {
                haystack.contains(needle)
            }),
        },
        Operator::StartsWith | Operator::StartsWithCamel => {
            with_string_forms(attribute, condition, |haystack, needle| {
                haystack.starts_with(needle)
            })
        }
        Operator::EndsWith | Operator::EndsWithCamel => {
            with_string_forms(attribute, condition, |haystack, needle| {
                haystack.ends_with(needle)
            })
        }
    }
}

/// Like [`execute_condition`], with the operator given as source text.
/// Unrecognized tokens yield `false`.
#[must_use]
pub fn execute_condition_token(attribute: &Value, token: &str, raw_condition: &str) -> bool {
    Operator::from_token(token)
        .is_some_and(|operator| execute_condition(attribute, operator, raw_condition))
}

/// Type-converting equality.
///
/// Booleans compare by truthiness, `null` equals the empty string and falsy
/// values, numbers and numeric strings compare numerically, a number and a
/// non-numeric string compare as text. Lists are equal when element-wise equal.
#[must_use]
pub fn loose_eq(a: &Value, b: &Value) -> bool {
    match (a, b) {
        (Value::Null, Value::Null) => true,
        (Value::Bool(x), other) | (other, Value::Bool(x)) => *x == other.is_truthy(),
        (Value::Null, Value::String(s)) | (Value::String(s), Value::Null) => s.is_empty(),
        (Value::Null, other) | (other, Value::Null) => !other.is_truthy(),
        (Value::List(xs), Value::List(ys)) => {
            xs.len() == ys.len() && xs.iter().zip(ys).all(|(x, y)| loose_eq(x, y))
        }
        (Value::List(_), _) | (_, Value::List(_)) => false,
        _ => match (a.as_number(), b.as_number()) {
            (Some(x), Some(y)) => x == y,
            _ => a.string_form() == b.string_form(),
        },
    }
}

/// Type-converting ordering used by the relational operators.
/// `None` when the operands have no meaningful order (lists, NaN).
#[must_use]
pub fn loose_cmp(a: &Value, b: &Value) -> Option<Ordering> {
    match (a, b) {
        (Value::List(_), _) | (_, Value::List(_)) => None,
        (Value::Bool(_), _) | (_, Value::Bool(_)) => Some(a.is_truthy().cmp(&b.is_truthy())),
        (Value::Null, Value::String(_)) | (Value::String(_), Value::Null) => {
            a.string_form().partial_cmp(&b.string_form())
        }
        (Value::Null, _) | (_, Value::Null) => Some(a.is_truthy().cmp(&b.is_truthy())),
        _ => match (a.as_number(), b.as_number()) {
            (Some(x), Some(y)) => x.partial_cmp(&y),
            _ => a.string_form().partial_cmp(&b.string_form()),
        },
    }
}

/// Run a substring test over both operands' string forms. An empty needle
/// never matches, and neither does a list haystack.
fn with_string_forms(attribute: &Value, condition: &Value, test: impl Fn(&str, &str) -> bool) -> bool {
    match (attribute.string_form(), condition.string_form()) {
        (Some(haystack), Some(needle)) if !needle.is_empty() => test(&haystack, &needle),
        _ => false,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn run(attribute: impl Into<Value>, token: &str, condition: &str) -> bool {
        execute_condition_token(&attribute.into(), token, condition)
    }

    #[test]
    fn relational_after_numeric_coercion() {
        assert!(run(35_i64, ">", "30"));
        assert!(!run(20_i64, ">", "30"));
        assert!(run("20", "<", "30"));
        assert!(run(30_i64, ">=", "30"));
        assert!(run(30_i64, "<=", "30"));
        assert!(!run(31_i64, "<=", "30"));
    }

    #[test]
    fn relational_truncates_fractions() {
        assert!(!run(18.7, ">", "18"));
        assert!(run(18.7, ">=", "18"));
    }

    #[test]
    fn strict_equality_after_quote_strip() {
        assert!(run("active", "===", "'active'"));
        assert!(run("active", "===", "\"active\""));
        assert!(!run("active", "===", "'inactive'"));
    }

    #[test]
    fn strict_vs_loose_equality() {
        assert!(run(true, "==", "1"));
        assert!(!run(true, "===", "1"));
        assert!(run(true, "===", "true"));
        assert!(run("yes", "==", "true"));
        assert!(run(Value::Null, "==", "''"));
        assert!(!run(Value::Null, "===", "''"));
        assert!(run(5_i64, "=", "5"));
        assert!(run(5_i64, "===", "5"));
    }

    #[test]
    fn inequality() {
        assert!(run("a", "!=", "b"));
        assert!(!run("a", "!=", "a"));
        assert!(run(true, "!==", "1"));
        assert!(!run(true, "!=", "1"));
    }

    #[test]
    fn boolean_operator_branches() {
        assert!(!run(false, "boolean", "true"));
        assert!(run(false, "boolean", "false"));
        assert!(run(true, "truthy", "true"));
        assert!(run("", "truthy", "0"));
        assert!(run(Value::List(vec![]), "boolean", "false"));
    }

    #[test]
    fn includes_on_lists() {
        let tags = Value::from(vec!["a", "b", "c"]);
        assert!(execute_condition(&tags, Operator::Includes, "b"));
        assert!(!execute_condition(&tags, Operator::Includes, "z"));
        let ids = Value::from(vec![3_i64, 7]);
        assert!(execute_condition(&ids, Operator::Contains, "7"));
    }

    #[test]
    fn includes_on_strings() {
        assert!(run("hello world", "contains", "lo w"));
        assert!(!run("hello", "includes", "xyz"));
        assert!(!run("hello", "includes", "''"));
        assert!(run(12345_i64, "contains", "234"));
    }

    #[test]
    fn prefix_and_suffix() {
        assert!(run("Johnny", "starts with", "John"));
        assert!(run("Johnny", "startsWith", "'John'"));
        assert!(!run("Johnny", "startsWith", "ny"));
        assert!(run("main.rs", "ends with", ".rs"));
        assert!(run("main.rs", "endsWith", ".rs"));
        assert!(!run(Value::from(vec!["a"]), "startsWith", "a"));
    }

    #[test]
    fn unrecognized_token_is_false() {
        assert!(!run(1_i64, "~=", "1"));
        assert!(!run(1_i64, "", "1"));
    }

    #[test]
    fn loose_eq_table() {
        assert!(loose_eq(&Value::Int(1), &Value::Float(1.0)));
        assert!(loose_eq(&Value::from("1e1"), &Value::Int(10)));
        assert!(!loose_eq(&Value::from("abc"), &Value::Int(0)));
        assert!(loose_eq(&Value::Null, &Value::Int(0)));
        assert!(!loose_eq(&Value::Null, &Value::from("0")));
        assert!(loose_eq(
            &Value::from(vec![1_i64, 2]),
            &Value::from(vec!["1", "2"])
        ));
        assert!(!loose_eq(&Value::from(vec![1_i64]), &Value::Int(1)));
    }

    #[test]
    fn loose_cmp_table() {
        assert_eq!(loose_cmp(&Value::Int(2), &Value::from("10")), Some(Ordering::Less));
        assert_eq!(loose_cmp(&Value::from("b"), &Value::from("a")), Some(Ordering::Greater));
        assert_eq!(loose_cmp(&Value::from(vec![1_i64]), &Value::Int(1)), None);
        assert_eq!(loose_cmp(&Value::Float(f64::NAN), &Value::Int(1)), None);
    }
}
