use crate::autograd::{accumulate_into, check_arity, Node, Operation};
use crate::error::NodeGradError;
use crate::ops::ensure_same_shape;
use crate::tensor::{broadcast_binary, reduce_to_shape, Tensor};
use ndarray::Axis;

pub const DEFAULT_EPSILON: f64 = 1e-8;

/// Where the per-feature mean and variance come from.
#[derive(Debug, Clone, PartialEq)]
pub enum BatchStatistics {
    /// Computed over axis 0 of the current batch (training).
    Batch,
    /// Supplied running statistics (evaluation). Both must broadcast to the feature
    /// shape `x.shape()[1..]`.
    Fixed { mean: Tensor, variance: Tensor },
}

/// Batch normalization, `y = γ · x̂ + β` with `x̂ = (x - μ) / √(σ² + ε)`.
///
/// Inputs are `[x, gamma, beta]`; statistics are per feature over axis 0.
#[derive(Debug, Clone)]
pub struct BatchNormOp {
    pub statistics: BatchStatistics,
    pub epsilon: f64,
}

/// Normalized input and `1/√(σ² + ε)`.
struct Normalized {
    x_hat: Tensor,
    inv_std: Tensor,
}

impl BatchNormOp {
    fn normalize(&self, x: &Tensor, operation: &str) -> Result<Normalized, NodeGradError> {
        let batch = match x.shape().first() {
            Some(&batch) if batch > 0 => batch,
            _ => {
                return Err(NodeGradError::InvalidShape {
                    shape: x.shape().to_vec(),
                    operation: operation.to_string(),
                    reason: "expected a non-empty batch along axis 0".to_string(),
                })
            }
        };
        let (mean, variance) = match &self.statistics {
            BatchStatistics::Batch => {
                let mean = x.sum_axis(Axis(0)) / batch as f64;
                let centered = broadcast_binary(x, &mean, operation, |v, m| v - m)?;
                let variance = centered.mapv(|c| c * c).sum_axis(Axis(0)) / batch as f64;
                (mean, variance)
            }
            BatchStatistics::Fixed { mean, variance } => (mean.clone(), variance.clone()),
        };
        let epsilon = self.epsilon;
        let inv_std = variance.mapv(|v| 1.0 / (v + epsilon).sqrt());
        let centered = broadcast_binary(x, &mean, operation, |v, m| v - m)?;
        let x_hat = broadcast_binary(&centered, &inv_std, operation, |c, s| c * s)?;
        ensure_same_shape(x, &x_hat, operation)?;
        Ok(Normalized { x_hat, inv_std })
    }
}

impl Operation for BatchNormOp {
    fn name(&self) -> &'static str {
        "batch_norm"
    }

    fn forward(&self, inputs: &[&Tensor]) -> Result<Tensor, NodeGradError> {
        check_arity(self.name(), inputs.len(), 3)?;
        let (x, gamma, beta) = (inputs[0], inputs[1], inputs[2]);
        let Normalized { x_hat, .. } = self.normalize(x, self.name())?;
        let scaled = broadcast_binary(&x_hat, gamma, self.name(), |h, g| h * g)?;
        let out = broadcast_binary(&scaled, beta, self.name(), |s, b| s + b)?;
        ensure_same_shape(x, &out, self.name())?;
        Ok(out)
    }

    /// Batch mode differentiates through the batch mean and variance:
    /// `dx = σ⁻¹ · (B·dx̂ - Σ dx̂ - x̂ · Σ(dx̂ · x̂)) / B` with `dx̂ = g · γ`.
    /// Fixed mode treats the statistics as constants: `dx = g · γ · σ⁻¹`.
    fn backward(
        &self,
        inputs: &[Node],
        _output: &Tensor,
        grad_output: &Tensor,
    ) -> Result<(), NodeGradError> {
        check_arity(self.name(), inputs.len(), 3)?;
        let operation = "batch_norm_backward";
        let (x, gamma, beta) = (&inputs[0], &inputs[1], &inputs[2]);
        let Normalized { x_hat, inv_std } = self.normalize(&x.value(), operation)?;
        ensure_same_shape(&x_hat, grad_output, operation)?;

        accumulate_into(x, |_| {
            let dx_hat = broadcast_binary(grad_output, &gamma.value(), operation, |g, w| g * w)?;
            match self.statistics {
                BatchStatistics::Fixed { .. } => {
                    broadcast_binary(&dx_hat, &inv_std, operation, |d, s| d * s)
                }
                BatchStatistics::Batch => {
                    let batch = x_hat.shape()[0] as f64;
                    let sum_dx_hat = dx_hat.sum_axis(Axis(0));
                    let sum_dx_hat_x_hat = (&dx_hat * &x_hat).sum_axis(Axis(0));
                    let projected =
                        broadcast_binary(&x_hat, &sum_dx_hat_x_hat, operation, |h, s| h * s)?;
                    let centered =
                        broadcast_binary(&(dx_hat * batch), &sum_dx_hat, operation, |d, s| d - s)?;
                    let numerator = centered - projected;
                    broadcast_binary(&numerator, &inv_std, operation, |n, s| n * s / batch)
                }
            }
        })?;
        accumulate_into(gamma, |value| {
            reduce_to_shape(&(grad_output * &x_hat), value.shape(), operation)
        })?;
        accumulate_into(beta, |value| reduce_to_shape(grad_output, value.shape(), operation))
    }
}

/// Normalizes `x` per feature, then scales by `gamma` and shifts by `beta`.
///
/// # Errors
/// * `NodeGradError::InvalidShape` for 0-d input or an empty batch.
/// * `NodeGradError::ShapeMismatch` if `gamma`, `beta` or fixed statistics do not
///   broadcast to the feature shape.
pub fn batch_norm(
    x: &Node,
    gamma: &Node,
    beta: &Node,
    statistics: BatchStatistics,
    epsilon: f64,
) -> Result<Node, NodeGradError> {
    Node::apply(
        BatchNormOp {
            statistics,
            epsilon,
        },
        vec![x.clone(), gamma.clone(), beta.clone()],
    )
}

#[cfg(test)]
#[path = "batch_norm_test.rs"]
mod tests;
