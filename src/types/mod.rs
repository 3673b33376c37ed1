mod condition_set;
mod error;
mod expr;
mod group;
mod leaf;
mod operator;
mod record;
mod value;

pub use condition_set::{ConditionSet, ConditionSetConfig, ConditionSnapshot, Reducer};
pub use error::{LeafError, RecordError};
pub use expr::{Expr, ExpressionSource};
pub use group::{ConditionalGroup, FieldDef, FieldKind, FieldReset, GroupSnapshot};
pub use leaf::{split_literal, ParsedLeaf};
pub use operator::Operator;
pub use record::Record;
pub use value::Value;
