use std::borrow::Cow;
use std::fmt;
use std::ops::Not;
use std::sync::Arc;

/// Boolean expression tree. Leaves hold raw literal text such as `age > 18`,
/// which is split into attribute, operator and value at evaluation time.
///
/// `And` and `Or` are n-ary: a chain like `a AND b AND c` is one node with
/// three operands, so tree depth follows parenthesis and `NOT` nesting only.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Expr {
    Leaf(String),
    And(Vec<Expr>),
    Or(Vec<Expr>),
    Not(Box<Expr>),
}

impl fmt::Display for Expr {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Expr::Leaf(literal) => write!(f, "{literal}"),
            Expr::And(operands) => write_joined(f, operands, " AND "),
            Expr::Or(operands) => write_joined(f, operands, " OR "),
            Expr::Not(inner) => write!(f, "(NOT {inner})"),
        }
    }
}

fn write_joined(f: &mut fmt::Formatter<'_>, operands: &[Expr], sep: &str) -> fmt::Result {
    write!(f, "(")?;
    for (i, operand) in operands.iter().enumerate() {
        if i > 0 {
            f.write_str(sep)?;
        }
        write!(f, "{operand}")?;
    }
    write!(f, ")")
}

impl Expr {
    #[must_use]
    pub fn leaf(literal: impl Into<String>) -> Expr {
        Expr::Leaf(literal.into())
    }

    /// Conjunction. Operands that are already `And` nodes are spliced in.
    #[must_use]
    pub fn and(self, other: Expr) -> Expr {
        let mut operands = match self {
            Expr::And(operands) => operands,
            single => vec![single],
        };
        match other {
            Expr::And(more) => operands.extend(more),
            single => operands.push(single),
        }
        Expr::And(operands)
    }

    /// Disjunction. Operands that are already `Or` nodes are spliced in.
    #[must_use]
    pub fn or(self, other: Expr) -> Expr {
        let mut operands = match self {
            Expr::Or(operands) => operands,
            single => vec![single],
        };
        match other {
            Expr::Or(more) => operands.extend(more),
            single => operands.push(single),
        }
        Expr::Or(operands)
    }
}

impl Not for Expr {
    type Output = Expr;

    fn not(self) -> Expr {
        Expr::Not(Box::new(self))
    }
}

type Producer = Arc<dyn Fn() -> String + Send + Sync>;

/// Where an expression's text comes from.
///
/// A dynamic source is called again on every evaluation and snapshot, so it
/// can reflect state that changes between calls. It must be side-effect free.
#[derive(Clone)]
pub enum ExpressionSource {
    Static(String),
    Dynamic(Producer),
}

impl ExpressionSource {
    /// Wrap a producer closure.
    #[must_use]
    pub fn dynamic(producer: impl Fn() -> String + Send + Sync + 'static) -> Self {
        ExpressionSource::Dynamic(Arc::new(producer))
    }

    /// The expression text, materializing a dynamic source.
    #[must_use]
    pub fn resolve(&self) -> Cow<'_, str> {
        match self {
            ExpressionSource::Static(text) => Cow::Borrowed(text),
            ExpressionSource::Dynamic(producer) => Cow::Owned(producer()),
        }
    }

    #[must_use]
    pub fn is_dynamic(&self) -> bool {
        matches!(self, ExpressionSource::Dynamic(_))
    }
}

impl fmt::Debug for ExpressionSource {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ExpressionSource::Static(text) => f.debug_tuple("Static").field(text).finish(),
            ExpressionSource::Dynamic(_) => f.write_str("Dynamic(..)"),
        }
    }
}

impl From<&str> for ExpressionSource {
    fn from(text: &str) -> Self {
        ExpressionSource::Static(text.to_owned())
    }
}

impl From<String> for ExpressionSource {
    fn from(text: String) -> Self {
        ExpressionSource::Static(text)
    }
}
