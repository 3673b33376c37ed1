use serde::{Deserialize, Serialize};

use super::condition_set::{ConditionSet, Reducer};
use super::expr::ExpressionSource;
use super::record::Record;
use super::value::Value;
use crate::parse::ParseError;

/// What kind of field a [`FieldDef`] describes. Only plain fields have their
/// stored values reset when their group goes inactive.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum FieldKind {
    #[default]
    Plain,
    /// Backed by a relation; its value is an identifier or list of identifiers.
    Relational,
    /// Holds nested fields of its own.
    Composite,
}

/// A host field as seen by a [`ConditionalGroup`].
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct FieldDef {
    pub attribute: String,
    pub kind: FieldKind,
    pub readonly: bool,
    /// The value a stale attribute is reset to.
    pub default: Value,
}

impl FieldDef {
    /// A writable plain field defaulting to `null`.
    #[must_use]
    pub fn new(attribute: impl Into<String>) -> Self {
        Self {
            attribute: attribute.into(),
            kind: FieldKind::Plain,
            readonly: false,
            default: Value::Null,
        }
    }

    #[must_use]
    pub fn kind(mut self, kind: FieldKind) -> Self {
        self.kind = kind;
        self
    }

    #[must_use]
    pub fn readonly(mut self) -> Self {
        self.readonly = true;
        self
    }

    #[must_use]
    pub fn default_value(mut self, value: impl Into<Value>) -> Self {
        self.default = value.into();
        self
    }

    fn is_resettable(&self) -> bool {
        self.kind == FieldKind::Plain && !self.readonly && !self.attribute.trim().is_empty()
    }
}

/// An attribute the host should overwrite before persisting.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct FieldReset {
    pub attribute: String,
    pub value: Value,
}

/// Serializable view of a [`ConditionalGroup`] for a presentation layer.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct GroupSnapshot {
    pub key: String,
    pub mode: Reducer,
    pub fields: Vec<FieldDef>,
    pub expressions: Vec<String>,
}

/// A group of fields that is active only while its conditions match.
///
/// The group never touches the record it is given. Callers decide what to do
/// with [`active_fields`](Self::active_fields) and
/// [`stale_resets`](Self::stale_resets).
#[derive(Debug, Clone)]
pub struct ConditionalGroup {
    key: String,
    fields: Vec<FieldDef>,
    conditions: ConditionSet,
}

impl ConditionalGroup {
    #[must_use]
    pub fn new(fields: Vec<FieldDef>) -> Self {
        Self {
            key: group_key(&fields),
            fields,
            conditions: ConditionSet::new(),
        }
    }

    #[must_use]
    pub fn when(mut self, expression: impl Into<ExpressionSource>) -> Self {
        self.conditions = self.conditions.when(expression);
        self
    }

    #[must_use]
    pub fn or_when(self, expression: impl Into<ExpressionSource>) -> Self {
        self.when(expression)
    }

    #[must_use]
    pub fn use_and_operator(mut self) -> Self {
        self.conditions = self.conditions.use_and_operator();
        self
    }

    /// Stable identifier derived from the field attributes.
    #[must_use]
    pub fn key(&self) -> &str {
        &self.key
    }

    #[must_use]
    pub fn fields(&self) -> &[FieldDef] {
        &self.fields
    }

    #[must_use]
    pub fn conditions(&self) -> &ConditionSet {
        &self.conditions
    }

    /// The group's fields when its conditions match, otherwise none.
    ///
    /// # Errors
    ///
    /// Returns [`ParseError`] if any condition is malformed.
    pub fn active_fields(&self, record: &Record) -> Result<&[FieldDef], ParseError> {
        if self.conditions.matches(record)? {
            Ok(&self.fields)
        } else {
            Ok(&[])
        }
    }

    /// Default values for the writable plain fields of an inactive group.
    ///
    /// Values entered while the group was active would otherwise linger in
    /// the record. An active group yields no resets.
    ///
    /// # Errors
    ///
    /// Returns [`ParseError`] if any condition is malformed.
    pub fn stale_resets(&self, record: &Record) -> Result<Vec<FieldReset>, ParseError> {
        if self.conditions.matches(record)? {
            return Ok(Vec::new());
        }

        let resets: Vec<FieldReset> = self
            .fields
            .iter()
            .filter(|field| field.is_resettable())
            .map(|field| FieldReset {
                attribute: field.attribute.clone(),
                value: field.default.clone(),
            })
            .collect();
        tracing::debug!(group = %self.key, resets = resets.len(), "inactive group resets");
        Ok(resets)
    }

    #[must_use]
    pub fn snapshot(&self) -> GroupSnapshot {
        let conditions = self.conditions.snapshot();
        GroupSnapshot {
            key: self.key.clone(),
            mode: conditions.mode,
            fields: self.fields.clone(),
            expressions: conditions.expressions,
        }
    }
}

fn group_key(fields: &[FieldDef]) -> String {
    let joined = fields
        .iter()
        .map(|field| field.attribute.as_str())
        .collect::<Vec<_>>()
        .join(".");
    let digest = blake3::hash(joined.as_bytes());
    let hex = digest.to_hex();
    format!("conditional_group_{}", &hex.as_str()[..32])
}
