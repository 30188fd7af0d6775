//! Traversal error types.

use thiserror::Error;

/// Errors that can occur when configuring or repositioning a cursor.
#[derive(Debug, Error)]
pub enum TraversalError {
    /// A walker was moved to a node outside the subtree it was created on.
    #[error("node is not inside the subtree the walker was created on")]
    OutsideRoot,

    /// A raw what-to-show mask carries bits that name no node kind.
    #[error("unknown what-to-show bits: {0:#x}")]
    UnknownShowBits(u32),

    /// A node kind name could not be resolved.
    #[error("unknown node kind: {0}")]
    UnknownKind(String),

    /// Configuration error.
    #[error("Configuration error: {0}")]
    Config(String),
}

impl TraversalError {
    /// Creates a configuration error.
    pub fn config(message: impl Into<String>) -> Self {
        Self::Config(message.into())
    }
}
