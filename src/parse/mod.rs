mod error;
mod grammar;

pub use error::ParseError;

/// Parse a logical expression string into an [`Expr`](crate::Expr) tree.
///
/// Leaf literals are kept verbatim; they are split into attribute, operator
/// and value only when evaluated.
///
/// # Errors
///
/// Returns [`ParseError`] on an empty expression, unbalanced parentheses, or a
/// dangling `AND`/`OR`/`NOT`.
pub fn parse(input: &str) -> Result<crate::Expr, ParseError> {
    use winnow::Parser;
    grammar::parse_expression
        .parse(input)
        .map_err(|e| ParseError::new(input, e.to_string()))
}
