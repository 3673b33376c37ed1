use std::collections::HashMap;

use super::error::RecordError;
use super::Value;

/// Flat evaluation input mapping attribute names to [`Value`]s.
///
/// Lookups are by exact name; a dotted name such as `"user.age"` is just a key.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Record {
    data: HashMap<String, Value>,
}

impl Record {
    /// Create an empty record.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Set an attribute, replacing any previous value.
    #[must_use]
    pub fn set(mut self, attribute: &str, value: impl Into<Value>) -> Self {
        self.insert(attribute, value.into());
        self
    }

    /// Insert an attribute (mutable reference version).
    pub fn insert(&mut self, attribute: &str, value: Value) {
        self.data.insert(attribute.to_owned(), value);
    }

    /// Look up an attribute by exact name.
    #[must_use]
    pub fn get(&self, attribute: &str) -> Option<&Value> {
        self.data.get(attribute)
    }

    #[must_use]
    pub fn contains(&self, attribute: &str) -> bool {
        self.data.contains_key(attribute)
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.data.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.data.is_empty()
    }

    /// Build a record from a JSON object, flattening relations to identifiers.
    ///
    /// A nested object with an `id` becomes that id, an array becomes a list of
    /// ids, and nested objects without an `id` are left out.
    ///
    /// # Errors
    ///
    /// Returns [`RecordError::NotAnObject`] if `json` is not an object.
    pub fn from_json(json: &serde_json::Value) -> Result<Self, RecordError> {
        let serde_json::Value::Object(map) = json else {
            return Err(RecordError::NotAnObject {
                found: json_kind(json),
            });
        };

        let mut record = Record::new();
        for (attribute, raw) in map {
            if let serde_json::Value::Object(nested) = raw {
                if !nested.contains_key("id") {
                    tracing::trace!(attribute = %attribute, "skipping nested object without id");
                    continue;
                }
            }
            record.insert(attribute, Value::from(raw));
        }
        Ok(record)
    }
}

impl<K: Into<String>, V: Into<Value>> FromIterator<(K, V)> for Record {
    fn from_iter<T: IntoIterator<Item = (K, V)>>(iter: T) -> Self {
        Self {
            data: iter
                .into_iter()
                .map(|(k, v)| (k.into(), v.into()))
                .collect(),
        }
    }
}

fn json_kind(json: &serde_json::Value) -> &'static str {
    match json {
        serde_json::Value::Null => "null",
        serde_json::Value::Bool(_) => "bool",
        serde_json::Value::Number(_) => "number",
        serde_json::Value::String(_) => "string",
        serde_json::Value::Array(_) => "array",
        serde_json::Value::Object(_) => "object",
    }
}
