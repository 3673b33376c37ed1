mod coerce;
mod compare;
mod error;
mod evaluate;
pub mod parse;
mod types;

pub use coerce::{coerce, Coerced};
pub use compare::{execute_condition, execute_condition_token, loose_cmp, loose_eq};
pub use error::FieldgateError;
pub use evaluate::evaluate;
pub use parse::{parse, ParseError};
pub use types::{
    split_literal, ConditionSet, ConditionSetConfig, ConditionSnapshot, ConditionalGroup, Expr,
    ExpressionSource, FieldDef, FieldKind, FieldReset, GroupSnapshot, LeafError, Operator,
    ParsedLeaf, Record, RecordError, Reducer, Value,
};
