//! # Loss functions
//!
//! Every loss takes a prediction and a target of identical shape, whose axis 0 is the
//! batch dimension `B`, and returns a 0-d scalar averaged over the batch. Both inputs
//! receive gradients when they require them.

use crate::error::NodeGradError;
use crate::tensor::Tensor;

pub mod cross_entropy;
pub mod huber;
pub mod l1;
pub mod l2;
pub mod softmax_cross_entropy;

pub use cross_entropy::{cross_entropy_loss, CrossEntropyLossOp};
pub use huber::{huber_loss, HuberLossOp};
pub use l1::{l1_loss, L1LossOp};
pub use l2::{l2_loss, L2LossOp};
pub use softmax_cross_entropy::{softmax_cross_entropy, SoftmaxCrossEntropyOp};

/// Validates a prediction/target pair and returns the batch size.
pub(crate) fn batch_size(
    prediction: &Tensor,
    target: &Tensor,
    operation: &str,
) -> Result<usize, NodeGradError> {
    if prediction.shape() != target.shape() {
        return Err(NodeGradError::ShapeMismatch {
            expected: prediction.shape().to_vec(),
            actual: target.shape().to_vec(),
            operation: operation.to_string(),
        });
    }
    match prediction.shape().first() {
        Some(&batch) if batch > 0 => Ok(batch),
        _ => Err(NodeGradError::InvalidShape {
            shape: prediction.shape().to_vec(),
            operation: operation.to_string(),
            reason: "expected a non-empty batch along axis 0".to_string(),
        }),
    }
}
