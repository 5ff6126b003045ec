use thiserror::Error;

use crate::token::Token;

/// Failures while turning a pattern into an automaton.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum Error {
    #[error("mismatched parentheses")]
    MismatchedParentheses,
    #[error("operator `{operator}` is missing an operand")]
    InsufficientOperands { operator: Token },
    #[error("expected exactly one fragment after construction, found {count}")]
    LeftoverFragments { count: usize },
}
