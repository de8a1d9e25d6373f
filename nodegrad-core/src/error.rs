use crate::autograd::NodeId;
use thiserror::Error;

/// Custom error type for the nodegrad framework.
///
/// Every fallible forward, backward and optimizer call reports one of these
/// synchronously. Messages carry the offending node label (`<op>#<id>`) and the
/// shapes involved.
#[derive(Error, Debug, PartialEq, Clone)]
pub enum NodeGradError {
    /// A gradient or value does not fit the shape it is combined with, even after
    /// broadcasting. Also raised for a non-scalar loss handed to `backward`.
    #[error("Shape mismatch: expected {expected:?}, got {actual:?} during operation {operation}")]
    ShapeMismatch {
        expected: Vec<usize>,
        actual: Vec<usize>,
        operation: String,
    },

    /// An operation-specific shape precondition does not hold (e.g. empty batch).
    #[error("Invalid shape {shape:?} for operation {operation}: {reason}")]
    InvalidShape {
        shape: Vec<usize>,
        operation: String,
        reason: String,
    },

    /// Backward was requested for state that the forward pass never produced.
    #[error("Invalid state for node {node}: {reason}")]
    State { node: String, reason: String },

    /// The optimizer was asked to update a parameter it holds no state for.
    #[error("Unknown parameter {name} (node id {id:?}) for this optimizer")]
    UnknownParameter { id: NodeId, name: String },

    #[error("Configuration error: {0}")]
    Configuration(String),

    #[error("Unsupported operation: {0}")]
    UnsupportedOperation(String),
}

impl NodeGradError {
    /// Names the node whose backward raised a state error with its `<op>#<id>` label.
    /// Other errors already carry their own context and are returned unchanged.
    pub(crate) fn at_node(self, label: String) -> Self {
        match self {
            NodeGradError::State { reason, .. } => NodeGradError::State {
                node: label,
                reason,
            },
            other => other,
        }
    }
}
