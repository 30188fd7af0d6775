//! Parse error types.

use gumbotree_ast::BuildError;
use thiserror::Error;

/// Errors that can occur during parsing.
#[derive(Debug, Error)]
pub enum ParseError {
    /// The source is not well-formed markup.
    #[error("Syntax error: {message}")]
    Syntax {
        /// Error message.
        message: String,
        /// Byte offset where the error occurred.
        offset: usize,
    },

    /// An end tag does not match the innermost open element.
    #[error("Mismatched end tag at byte {offset}: expected </{expected}>, found </{found}>")]
    MismatchedEndTag {
        expected: String,
        found: String,
        offset: usize,
    },

    /// An end tag appeared with no element open.
    #[error("Unexpected end tag </{found}> at byte {offset}")]
    UnexpectedEndTag { found: String, offset: usize },

    /// The source ended while elements were still open.
    #[error("Unexpected end of input, expected {expected}")]
    UnexpectedEof { expected: String },

    /// The parsed events did not describe a single tree.
    #[error("Invalid tree: {0}")]
    Build(#[from] BuildError),
}

impl ParseError {
    /// Creates a new syntax error at `offset`.
    pub fn syntax_at(message: impl Into<String>, offset: usize) -> Self {
        Self::Syntax {
            message: message.into(),
            offset,
        }
    }

    /// Byte offset the error refers to, when known.
    pub fn offset(&self) -> Option<usize> {
        match self {
            Self::Syntax { offset, .. }
            | Self::MismatchedEndTag { offset, .. }
            | Self::UnexpectedEndTag { offset, .. } => Some(*offset),
            Self::UnexpectedEof { .. } | Self::Build(_) => None,
        }
    }
}
