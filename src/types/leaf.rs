use super::error::LeafError;
use super::Operator;

/// A leaf literal split into its three parts. Borrows from the literal.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ParsedLeaf<'a> {
    pub attribute: &'a str,
    pub operator: Operator,
    pub raw_value: &'a str,
}

/// Split a leaf literal such as `age >= 18` into attribute, operator and raw value.
///
/// The operator is the first entry of [`Operator::ALL`] whose token occurs
/// anywhere in the literal; the literal is split around that token's first
/// occurrence and both halves are trimmed. Everything after that occurrence
/// is the value, repeated tokens included: `a == b == c` compares `a` against
/// `b == c` rather than dropping the trailing `== c`.
///
/// A value that itself contains an earlier-ranked token splits in the wrong
/// place; quote-stripping happens later and does not prevent that.
///
/// # Errors
///
/// Returns [`LeafError::NoOperatorFound`] when no operator token occurs.
pub fn split_literal(literal: &str) -> Result<ParsedLeaf<'_>, LeafError> {
    Operator::ALL
        .into_iter()
        .find_map(|operator| {
            literal
                .split_once(operator.token())
                .map(|(attribute, raw_value)| ParsedLeaf {
                    attribute: attribute.trim(),
                    operator,
                    raw_value: raw_value.trim(),
                })
        })
        .ok_or_else(|| LeafError::NoOperatorFound {
            literal: literal.to_owned(),
        })
}
