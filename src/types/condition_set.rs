use std::fmt;

use serde::{Deserialize, Serialize};

use super::expr::ExpressionSource;
use super::record::Record;
use crate::parse::ParseError;

/// How the results of several expressions are combined.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Reducer {
    /// At least one expression must match.
    #[default]
    Any,
    /// Every expression must match.
    All,
}

impl fmt::Display for Reducer {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Reducer::Any => write!(f, "any"),
            Reducer::All => write!(f, "all"),
        }
    }
}

/// An ordered list of expressions plus the [`Reducer`] that combines them.
///
/// Expressions are parsed on every call to [`matches`](Self::matches), so
/// dynamic sources always see fresh text. Evaluation only borrows the set and
/// the record, making a shared `ConditionSet` safe to use from many threads.
///
/// # Example
///
/// ```
/// use fieldgate::{ConditionSet, Record};
///
/// let conditions = ConditionSet::new()
///     .when("age > 18")
///     .or_when("country == 'US'");
///
/// let record = Record::new().set("age", 15_i64).set("country", "US");
/// assert!(conditions.matches(&record).unwrap());
/// ```
#[derive(Debug, Clone, Default)]
pub struct ConditionSet {
    expressions: Vec<ExpressionSource>,
    mode: Reducer,
}

/// Declarative form of a [`ConditionSet`], as loaded from JSON.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ConditionSetConfig {
    #[serde(default)]
    pub mode: Reducer,
    #[serde(default)]
    pub expressions: Vec<String>,
}

/// Serializable view of a [`ConditionSet`] with every expression as text.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ConditionSnapshot {
    pub mode: Reducer,
    pub expressions: Vec<String>,
}

impl ConditionSet {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Append an expression.
    #[must_use]
    pub fn when(mut self, expression: impl Into<ExpressionSource>) -> Self {
        self.expressions.push(expression.into());
        self
    }

    /// Same as [`when`](Self::when); reads better after the first condition.
    #[must_use]
    pub fn or_when(self, expression: impl Into<ExpressionSource>) -> Self {
        self.when(expression)
    }

    /// Append an expression whose text is produced on demand.
    #[must_use]
    pub fn when_dynamic(self, producer: impl Fn() -> String + Send + Sync + 'static) -> Self {
        self.when(ExpressionSource::dynamic(producer))
    }

    /// Require every expression to match instead of any.
    #[must_use]
    pub fn use_and_operator(self) -> Self {
        self.with_mode(Reducer::All)
    }

    #[must_use]
    pub fn with_mode(mut self, mode: Reducer) -> Self {
        self.mode = mode;
        self
    }

    #[must_use]
    pub fn mode(&self) -> Reducer {
        self.mode
    }

    #[must_use]
    pub fn expressions(&self) -> &[ExpressionSource] {
        &self.expressions
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.expressions.is_empty()
    }

    /// Evaluate every expression against `record` and combine the results.
    ///
    /// All expressions are parsed even once the outcome is known, so a
    /// malformed one is always reported. A set with no expressions never
    /// matches, in either mode.
    ///
    /// # Errors
    ///
    /// Returns the first [`ParseError`] among the expressions.
    pub fn matches(&self, record: &Record) -> Result<bool, ParseError> {
        if self.expressions.is_empty() {
            tracing::debug!(mode = %self.mode, "condition set has no expressions");
            return Ok(false);
        }

        let results = self
            .expressions
            .iter()
            .map(|source| {
                let expr = crate::parse::parse(&source.resolve())?;
                Ok(crate::evaluate::evaluate(&expr, record))
            })
            .collect::<Result<Vec<bool>, ParseError>>()?;

        let matched = match self.mode {
            Reducer::Any => results.iter().any(|&r| r),
            Reducer::All => results.iter().all(|&r| r),
        };
        tracing::debug!(
            mode = %self.mode,
            expressions = results.len(),
            matched,
            "condition set evaluated"
        );
        Ok(matched)
    }

    /// Materialize every expression to text.
    #[must_use]
    pub fn snapshot(&self) -> ConditionSnapshot {
        ConditionSnapshot {
            mode: self.mode,
            expressions: self
                .expressions
                .iter()
                .map(|source| source.resolve().into_owned())
                .collect(),
        }
    }

    /// Build a condition set from its declarative form, checking that every
    /// expression parses.
    ///
    /// # Errors
    ///
    /// Returns [`ParseError`] for the first malformed expression.
    pub fn from_config(config: ConditionSetConfig) -> Result<Self, ParseError> {
        for expression in &config.expressions {
            crate::parse::parse(expression)?;
        }
        Ok(Self {
            expressions: config
                .expressions
                .into_iter()
                .map(ExpressionSource::Static)
                .collect(),
            mode: config.mode,
        })
    }

    /// Parse a JSON document such as `{"mode": "all", "expressions": ["a = 1"]}`.
    ///
    /// # Errors
    ///
    /// Returns [`FieldgateError`](crate::FieldgateError) on malformed JSON or
    /// a malformed expression.
    pub fn from_json(input: &str) -> Result<Self, crate::FieldgateError> {
        let config: ConditionSetConfig = serde_json::from_str(input)?;
        Ok(Self::from_config(config)?)
    }

    /// Read a JSON condition file.
    ///
    /// # Errors
    ///
    /// Returns [`FieldgateError`](crate::FieldgateError) on I/O, JSON, or parse failure.
    pub fn from_file(path: impl AsRef<std::path::Path>) -> Result<Self, crate::FieldgateError> {
        let input = std::fs::read_to_string(path)?;
        Self::from_json(&input)
    }
}

impl fmt::Display for ConditionSet {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "ConditionSet({} expressions, mode {})",
            self.expressions.len(),
            self.mode
        )
    }
}
