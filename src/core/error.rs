use crate::core::node::NodeId;
use thiserror::Error;

/// Errors a resolution pass can surface to the invoking layer.
///
/// Malformed template syntax is deliberately absent: every byte sequence
/// has a defined interpretation in the scanner, so there is nothing to
/// report from that side.
#[derive(Debug, Error)]
pub enum LayoutError {
    #[error("referenced node not found: {0}")]
    ReferenceNotFound(NodeId),

    #[error("content generation failed in node '{node}': {message}")]
    Generation { node: String, message: String },

    #[error("node store error: {0}")]
    Store(String),
}

impl LayoutError {
    /// Shorthand for a [`LayoutError::Generation`] from a node name and message.
    pub fn generation(node: impl Into<String>, message: impl Into<String>) -> Self {
        LayoutError::Generation {
            node: node.into(),
            message: message.into(),
        }
    }
}
