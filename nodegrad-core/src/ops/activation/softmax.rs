use crate::autograd::{accumulate_into, check_arity, Node, Operation};
use crate::error::NodeGradError;
use crate::ops::ensure_same_shape;
use crate::tensor::Tensor;
use ndarray::Axis;

/// Softmax over the last axis.
#[derive(Debug, Clone, Copy, Default)]
pub struct SoftmaxOp;

pub(crate) fn last_axis(x: &Tensor, operation: &str) -> Result<Axis, NodeGradError> {
    if x.ndim() == 0 {
        return Err(NodeGradError::InvalidShape {
            shape: vec![],
            operation: operation.to_string(),
            reason: "expected at least one axis".to_string(),
        });
    }
    Ok(Axis(x.ndim() - 1))
}

/// Softmax along `axis`, shifting every lane by its maximum so `exp` cannot overflow.
pub(crate) fn softmax_along(x: &Tensor, axis: Axis) -> Tensor {
    let mut out = x.clone();
    for mut lane in out.lanes_mut(axis) {
        let max = lane.fold(f64::NEG_INFINITY, |m, &v| m.max(v));
        lane.mapv_inplace(|v| (v - max).exp());
        let total = lane.sum();
        lane.mapv_inplace(|v| v / total);
    }
    out
}

/// `x - max - ln Σ exp(x - max)` along `axis`.
pub(crate) fn log_softmax_along(x: &Tensor, axis: Axis) -> Tensor {
    let mut out = x.clone();
    for mut lane in out.lanes_mut(axis) {
        let max = lane.fold(f64::NEG_INFINITY, |m, &v| m.max(v));
        let log_total = lane.fold(0.0, |acc, &v| acc + (v - max).exp()).ln();
        lane.mapv_inplace(|v| v - max - log_total);
    }
    out
}

impl Operation for SoftmaxOp {
    fn name(&self) -> &'static str {
        "softmax"
    }

    fn forward(&self, inputs: &[&Tensor]) -> Result<Tensor, NodeGradError> {
        check_arity(self.name(), inputs.len(), 1)?;
        let axis = last_axis(inputs[0], self.name())?;
        Ok(softmax_along(inputs[0], axis))
    }

    /// Full Jacobian-vector product: `dx = y ⊙ (g - Σ_last(g ⊙ y))`.
    fn backward(
        &self,
        inputs: &[Node],
        output: &Tensor,
        grad_output: &Tensor,
    ) -> Result<(), NodeGradError> {
        check_arity(self.name(), inputs.len(), 1)?;
        accumulate_into(&inputs[0], |_| {
            ensure_same_shape(output, grad_output, "softmax_backward")?;
            let axis = last_axis(output, "softmax_backward")?;
            let weighted = grad_output * output;
            let dot = weighted.sum_axis(axis).insert_axis(axis);
            let mut grad = grad_output.clone();
            for (mut lane, &d) in grad.lanes_mut(axis).into_iter().zip(dot.iter()) {
                lane -= d;
            }
            Ok(grad * output)
        })
    }
}

/// Normalizes the last axis of `x` into probabilities.
///
/// # Errors
/// Returns `NodeGradError::InvalidShape` for a 0-d input.
pub fn softmax(x: &Node) -> Result<Node, NodeGradError> {
    Node::apply(SoftmaxOp, vec![x.clone()])
}

#[cfg(test)]
#[path = "softmax_test.rs"]
mod tests;
