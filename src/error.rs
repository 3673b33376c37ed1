use thiserror::Error;

use crate::parse::ParseError;
use crate::RecordError;

/// Unified error type covering parsing, record construction, configuration and I/O.
///
/// Returned by convenience loaders like
/// [`ConditionSet::from_json()`](crate::ConditionSet::from_json) and
/// [`ConditionSet::from_file()`](crate::ConditionSet::from_file).
#[derive(Debug, Error)]
pub enum FieldgateError {
    #[error(transparent)]
    Parse(#[from] ParseError),

    #[error(transparent)]
    Record(#[from] RecordError),

    #[error("invalid condition config: {0}")]
    Config(#[from] serde_json::Error),

    #[error(transparent)]
    Io(#[from] std::io::Error),
}
