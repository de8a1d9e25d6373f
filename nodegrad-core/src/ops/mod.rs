//! # Operations (`ops`)
//!
//! Every differentiable operation is a small struct implementing
//! [`Operation`](crate::autograd::Operation) plus a constructor function that wires
//! input nodes into a new operation node via [`Node::apply`](crate::Node::apply).
//!
//! - [`arithmetic`]: broadcasting `add` and `mul`, dense-layer `matmul`.
//! - [`reduction`]: `sum` and `mean` down to a 0-d scalar.
//! - [`activation`]: `relu`, `leaky_relu`, `sigmoid`, `tanh`, `softmax`.
//! - [`loss`]: batch-averaged regression and classification losses.
//! - [`normalization`]: `batch_norm`.
//! - [`regularization`]: `l2_penalty` and inverted `dropout`.

use crate::error::NodeGradError;
use crate::tensor::Tensor;

pub mod activation;
pub mod arithmetic;
pub mod loss;
pub mod normalization;
pub mod reduction;
pub mod regularization;

pub use activation::{leaky_relu, relu, sigmoid, softmax, tanh};
pub use arithmetic::{add, matmul, mul};
pub use loss::{cross_entropy_loss, huber_loss, l1_loss, l2_loss, softmax_cross_entropy};
pub use normalization::{batch_norm, BatchStatistics};
pub use reduction::{mean, sum};
pub use regularization::{dropout, l2_penalty};

/// Fails unless `actual` has exactly the shape of `expected`.
///
/// Element-wise backward passes zip the upstream gradient with a value; this keeps a
/// malformed gradient from reaching `ndarray`, which would panic.
pub(crate) fn ensure_same_shape(
    expected: &Tensor,
    actual: &Tensor,
    operation: &str,
) -> Result<(), NodeGradError> {
    if expected.shape() != actual.shape() {
        return Err(NodeGradError::ShapeMismatch {
            expected: expected.shape().to_vec(),
            actual: actual.shape().to_vec(),
            operation: operation.to_string(),
        });
    }
    Ok(())
}
