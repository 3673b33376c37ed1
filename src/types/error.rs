use thiserror::Error;

/// Failure to split a leaf literal into attribute, operator and value.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum LeafError {
    #[error("no known operator found in literal '{literal}'")]
    NoOperatorFound { literal: String },
}

/// Failure to build a [`Record`](super::Record) from host data.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum RecordError {
    #[error("record source must be a JSON object, found {found}")]
    NotAnObject { found: &'static str },
}
