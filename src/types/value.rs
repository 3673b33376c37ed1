use std::borrow::Cow;
use std::fmt;

use serde::Serialize;

/// Dynamically-typed attribute value held in a [`Record`](super::Record).
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(untagged)]
pub enum Value {
    /// Absent or cleared value.
    Null,
    /// A 64-bit signed integer.
    Int(i64),
    /// A 64-bit floating-point number.
    Float(f64),
    /// A boolean value.
    Bool(bool),
    /// A UTF-8 string.
    String(String),
    /// A list of scalar identifiers, e.g. the keys of a to-many relation.
    List(Vec<Value>),
}

impl Value {
    /// Whether the value reads as a number: numeric variants, or a string
    /// holding a plain decimal number (optional sign, fraction, exponent).
    #[must_use]
    pub fn is_numeric(&self) -> bool {
        match self {
            Value::Int(_) | Value::Float(_) => true,
            Value::String(s) => parse_number(s).is_some(),
            _ => false,
        }
    }

    /// Truthiness: `null`, `false`, `0`, `0.0`, `""`, `"0"` and the empty list are falsy.
    #[must_use]
    pub fn is_truthy(&self) -> bool {
        match self {
            Value::Null => false,
            Value::Int(i) => *i != 0,
            Value::Float(f) => *f != 0.0,
            Value::Bool(b) => *b,
            Value::String(s) => !s.is_empty() && s != "0",
            Value::List(items) => !items.is_empty(),
        }
    }

    /// Truncating integer conversion.
    ///
    /// Strings convert through their leading numeric prefix (`"12abc"` is 12,
    /// `"abc"` is 0). Floats truncate toward zero, saturating at the `i64` bounds.
    #[must_use]
    #[allow(clippy::cast_possible_truncation)]
    pub fn to_int(&self) -> i64 {
        match self {
            Value::Null => 0,
            Value::Int(i) => *i,
            Value::Float(f) => *f as i64,
            Value::Bool(b) => i64::from(*b),
            Value::String(s) => leading_number(s).map_or(0, |f| f as i64),
            Value::List(items) => i64::from(!items.is_empty()),
        }
    }

    /// Numeric view used by loose comparisons. `None` for non-numeric values.
    #[must_use]
    #[allow(clippy::cast_precision_loss)]
    pub fn as_number(&self) -> Option<f64> {
        match self {
            Value::Int(i) => Some(*i as f64),
            Value::Float(f) => Some(*f),
            Value::String(s) => parse_number(s),
            _ => None,
        }
    }

    /// String form used by substring operators. Lists have none.
    #[must_use]
    pub fn string_form(&self) -> Option<Cow<'_, str>> {
        match self {
            Value::Null => Some(Cow::Borrowed("")),
            Value::Int(i) => Some(Cow::Owned(i.to_string())),
            Value::Float(f) => Some(Cow::Owned(f.to_string())),
            Value::Bool(true) => Some(Cow::Borrowed("1")),
            Value::Bool(false) => Some(Cow::Borrowed("")),
            Value::String(s) => Some(Cow::Borrowed(s)),
            Value::List(_) => None,
        }
    }

    pub(crate) fn type_name(&self) -> &'static str {
        match self {
            Value::Null => "null",
            Value::Int(_) => "int",
            Value::Float(_) => "float",
            Value::Bool(_) => "bool",
            Value::String(_) => "string",
            Value::List(_) => "list",
        }
    }
}

fn parse_number(s: &str) -> Option<f64> {
    let trimmed = s.trim();
    let digits = trimmed.strip_prefix(['+', '-']).unwrap_or(trimmed);
    let well_formed = digits.starts_with(|c: char| c.is_ascii_digit() || c == '.')
        && digits
            .chars()
            .all(|c| c.is_ascii_digit() || matches!(c, '.' | 'e' | 'E' | '+' | '-'));
    if !well_formed {
        return None;
    }
    trimmed.parse().ok()
}

/// Longest numeric prefix of `s`, ignoring leading whitespace: an optional
/// sign, digits with an optional fraction, and an exponent only when digits
/// follow it. Scans once and parses the matched slice once.
fn leading_number(s: &str) -> Option<f64> {
    let trimmed = s.trim_start();
    let bytes = trimmed.as_bytes();
    let skip_digits = |mut i: usize| {
        while bytes.get(i).is_some_and(u8::is_ascii_digit) {
            i += 1;
        }
        i
    };

    let sign_end = usize::from(matches!(bytes.first(), Some(b'+' | b'-')));
    let int_end = skip_digits(sign_end);
    let mut end = int_end;
    let mut has_digits = int_end > sign_end;
    if bytes.get(int_end) == Some(&b'.') {
        end = skip_digits(int_end + 1);
        has_digits |= end > int_end + 1;
    }
    if !has_digits {
        return None;
    }

    if matches!(bytes.get(end), Some(b'e' | b'E')) {
        let exp_digits = end + 1 + usize::from(matches!(bytes.get(end + 1), Some(b'+' | b'-')));
        let exp_end = skip_digits(exp_digits);
        if exp_end > exp_digits {
            end = exp_end;
        }
    }

    trimmed[..end].parse().ok()
}

impl From<i64> for Value {
    fn from(v: i64) -> Self {
        Value::Int(v)
    }
}

impl From<i32> for Value {
    fn from(v: i32) -> Self {
        Value::Int(i64::from(v))
    }
}

impl From<f64> for Value {
    fn from(v: f64) -> Self {
        Value::Float(v)
    }
}

impl From<bool> for Value {
    fn from(v: bool) -> Self {
        Value::Bool(v)
    }
}

impl From<&str> for Value {
    fn from(v: &str) -> Self {
        Value::String(v.to_owned())
    }
}

impl From<String> for Value {
    fn from(v: String) -> Self {
        Value::String(v)
    }
}

impl<T: Into<Value>> From<Vec<T>> for Value {
    fn from(v: Vec<T>) -> Self {
        Value::List(v.into_iter().map(Into::into).collect())
    }
}

impl<T: Into<Value>> From<Option<T>> for Value {
    fn from(v: Option<T>) -> Self {
        v.map_or(Value::Null, Into::into)
    }
}

impl From<&serde_json::Value> for Value {
    /// Scalars map one-to-one. Arrays become lists of identifiers, where an
    /// object element contributes its `id`. A bare object collapses to its `id`,
    /// or `Null` when it has none.
    fn from(v: &serde_json::Value) -> Self {
        match v {
            serde_json::Value::Null => Value::Null,
            serde_json::Value::Bool(b) => Value::Bool(*b),
            serde_json::Value::Number(n) => n
                .as_i64()
                .map(Value::Int)
                .or_else(|| n.as_f64().map(Value::Float))
                .unwrap_or(Value::Null),
            serde_json::Value::String(s) => Value::String(s.clone()),
            serde_json::Value::Array(items) => Value::List(
                items
                    .iter()
                    .map(Value::from)
                    .filter(|item| !matches!(item, Value::Null | Value::List(_)))
                    .collect(),
            ),
            serde_json::Value::Object(map) => map.get("id").map_or(Value::Null, Value::from),
        }
    }
}

impl fmt::Display for Value {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Value::Null => write!(f, "null"),
            Value::Int(v) => write!(f, "{v}"),
            Value::Float(v) => write!(f, "{v}"),
            Value::Bool(v) => write!(f, "{v}"),
            Value::String(v) => write!(f, "\"{v}\""),
            Value::List(items) => {
                write!(f, "[")?;
                for (i, item) in items.iter().enumerate() {
                    if i > 0 {
                        write!(f, ", ")?;
                    }
                    write!(f, "{item}")?;
                }
                write!(f, "]")
            }
        }
    }
}
