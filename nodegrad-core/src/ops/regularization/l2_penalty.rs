use crate::autograd::{accumulate_into, Node, Operation};
use crate::error::NodeGradError;
use crate::tensor::{self, Tensor};

/// Adds weight decay to a scalar loss: `loss + λ/(2B) · Σ‖p‖²`.
///
/// Inputs are `[loss, p_1, ..., p_n]`.
#[derive(Debug, Clone, Copy)]
pub struct L2PenaltyOp {
    pub lambda: f64,
    pub batch_size: usize,
}

impl L2PenaltyOp {
    fn coefficient(&self) -> f64 {
        self.lambda / self.batch_size as f64
    }
}

impl Operation for L2PenaltyOp {
    fn name(&self) -> &'static str {
        "l2_penalty"
    }

    fn forward(&self, inputs: &[&Tensor]) -> Result<Tensor, NodeGradError> {
        let Some((loss, params)) = inputs.split_first() else {
            return Err(NodeGradError::UnsupportedOperation(
                "l2_penalty expects a loss input".to_string(),
            ));
        };
        if loss.len() != 1 {
            return Err(NodeGradError::ShapeMismatch {
                expected: vec![],
                actual: loss.shape().to_vec(),
                operation: self.name().to_string(),
            });
        }
        let squared_norms: f64 = params
            .iter()
            .map(|p| p.iter().map(|v| v * v).sum::<f64>())
            .sum();
        let penalty = 0.5 * self.coefficient() * squared_norms;
        Ok(loss.mapv(|l| l + penalty))
    }

    /// `dloss = g` and `dp = g · λ/B · p`.
    fn backward(
        &self,
        inputs: &[Node],
        _output: &Tensor,
        grad_output: &Tensor,
    ) -> Result<(), NodeGradError> {
        let g = tensor::scalar_value(grad_output)?;
        let coefficient = self.coefficient();
        for (index, input) in inputs.iter().enumerate() {
            if index == 0 {
                accumulate_into(input, |_| Ok(grad_output.clone()))?;
            } else {
                accumulate_into(input, |p| Ok(p.mapv(|v| g * coefficient * v)))?;
            }
        }
        Ok(())
    }
}

/// Penalizes the squared Frobenius norm of `params` on top of `loss`.
///
/// # Errors
/// * `NodeGradError::InvalidShape` if `batch_size` is 0.
/// * `NodeGradError::ShapeMismatch` if `loss` is not a single element.
pub fn l2_penalty(
    loss: &Node,
    params: &[Node],
    lambda: f64,
    batch_size: usize,
) -> Result<Node, NodeGradError> {
    if batch_size == 0 {
        return Err(NodeGradError::InvalidShape {
            shape: vec![batch_size],
            operation: "l2_penalty".to_string(),
            reason: "batch size must be positive".to_string(),
        });
    }
    let mut inputs = Vec::with_capacity(params.len() + 1);
    inputs.push(loss.clone());
    inputs.extend(params.iter().cloned());
    Node::apply(L2PenaltyOp { lambda, batch_size }, inputs)
}

#[cfg(test)]
#[path = "l2_penalty_test.rs"]
mod tests;
