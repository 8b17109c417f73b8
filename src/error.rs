//! Error type shared by the tokenizer and the rewriting engine.

use thiserror::Error;

/// Structural failures that abort a tokenize or generate call, or reject a symbol
/// that could not survive serialization.
///
/// Parameter-level problems (a rule receiving non-numeric text where it expects a number)
/// never show up here: rules absorb them and fall back to their documented defaults.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum LSystemError {
    #[error("iterations must be non-negative, got {iterations}")]
    InvalidArgument { iterations: i64 },

    #[error("malformed input at position {position} in {input:?}")]
    MalformedInput { position: usize, input: String },

    #[error("{id:?} cannot be used as a symbol identifier")]
    InvalidSymbol { id: char },
}

pub type Result<T> = std::result::Result<T, LSystemError>;
