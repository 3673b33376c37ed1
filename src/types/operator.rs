use std::fmt;

/// Leaf comparison operators.
///
/// Several tokens are textual supersets of others (`!==` contains `!=`,
/// `===` contains `==` contains `=`, `>=` contains `>`). [`Operator::ALL`]
/// fixes the order in which tokens are tried so the longer token always wins.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Operator {
    /// `>=`
    Gte,
    /// `<=`
    Lte,
    /// `<`
    Lt,
    /// `>`
    Gt,
    /// `!==`
    NotIdentical,
    /// `!=`
    NotEqual,
    /// `===`
    Identical,
    /// `==`
    Equal,
    /// `=`, same semantics as `==`
    Assign,
    /// `includes`
    Includes,
    /// `contains`, same semantics as `includes`
    Contains,
    /// `ends with`
    EndsWith,
    /// `starts with`
    StartsWith,
    /// `startsWith`
    StartsWithCamel,
    /// `endsWith`
    EndsWithCamel,
    /// `boolean`
    Boolean,
    /// `truthy`, same semantics as `boolean`
    Truthy,
}

impl Operator {
    /// Every operator in matching precedence. Reordering this table changes
    /// which operator is picked for literals containing overlapping tokens.
    pub const ALL: [Operator; 17] = [
        Operator::Gte,
        Operator::Lte,
        Operator::Lt,
        Operator::Gt,
        Operator::NotIdentical,
        Operator::NotEqual,
        Operator::Identical,
        Operator::Equal,
        Operator::Assign,
        Operator::Includes,
        Operator::Contains,
        Operator::EndsWith,
        Operator::StartsWith,
        Operator::StartsWithCamel,
        Operator::EndsWithCamel,
        Operator::Boolean,
        Operator::Truthy,
    ];

    /// The operator's source token.
    #[must_use]
    pub fn token(self) -> &'static str {
        match self {
            Operator::Gte => ">=",
            Operator::Lte => "<=",
            Operator::Lt => "<",
            Operator::Gt => ">",
            Operator::NotIdentical => "!==",
            Operator::NotEqual => "!=",
            Operator::Identical => "===",
            Operator::Equal => "==",
            Operator::Assign => "=",
            Operator::Includes => "includes",
            Operator::Contains => "contains",
            Operator::EndsWith => "ends with",
            Operator::StartsWith => "starts with",
            Operator::StartsWithCamel => "startsWith",
            Operator::EndsWithCamel => "endsWith",
            Operator::Boolean => "boolean",
            Operator::Truthy => "truthy",
        }
    }

    /// Look up an operator by its exact token.
    #[must_use]
    pub fn from_token(token: &str) -> Option<Operator> {
        Self::ALL.into_iter().find(|op| op.token() == token)
    }

    /// `<`, `>`, `<=`, `>=`: these force integer coercion of both operands.
    #[must_use]
    pub fn is_relational(self) -> bool {
        matches!(
            self,
            Operator::Lt | Operator::Gt | Operator::Lte | Operator::Gte
        )
    }
}

impl fmt::Display for Operator {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.token())
    }
}
