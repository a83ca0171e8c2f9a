//! Unified error types for icy_flow_engine

use thiserror::Error;

use crate::Position;

/// Main error type for icy_flow_engine operations
#[derive(Debug, Error)]
pub enum FlowError {
    /// A glyph outside the accepted character set was staged.
    #[error("Unrecognized character U+{code_point:04X}")]
    UnrecognizedCharacter { code_point: u32 },

    #[error("Position {pos} is outside of the grid")]
    OutOfBounds { pos: Position },

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("{0}")]
    Generic(String),
}

/// Result type alias for icy_flow_engine operations
pub type Result<T> = std::result::Result<T, FlowError>;

impl FlowError {
    pub fn unrecognized(ch: char) -> Self {
        Self::UnrecognizedCharacter { code_point: ch as u32 }
    }

    /// Create a generic error from any displayable type
    pub fn generic(msg: impl std::fmt::Display) -> Self {
        Self::Generic(msg.to_string())
    }

    /// The offending character of an `UnrecognizedCharacter` error.
    pub fn character(&self) -> Option<char> {
        match self {
            FlowError::UnrecognizedCharacter { code_point } => char::from_u32(*code_point),
            _ => None,
        }
    }
}
