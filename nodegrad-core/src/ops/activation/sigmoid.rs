use crate::autograd::{accumulate_into, check_arity, Node, Operation};
use crate::error::NodeGradError;
use crate::ops::ensure_same_shape;
use crate::tensor::Tensor;
use ndarray::Zip;

/// Logistic sigmoid.
#[derive(Debug, Clone, Copy, Default)]
pub struct SigmoidOp;

/// Evaluates `1 / (1 + e^-x)` without overflowing `exp` for large `|x|`.
pub(crate) fn stable_sigmoid(x: f64) -> f64 {
    if x >= 0.0 {
        1.0 / (1.0 + (-x).exp())
    } else {
        let e = x.exp();
        e / (1.0 + e)
    }
}

impl Operation for SigmoidOp {
    fn name(&self) -> &'static str {
        "sigmoid"
    }

    fn forward(&self, inputs: &[&Tensor]) -> Result<Tensor, NodeGradError> {
        check_arity(self.name(), inputs.len(), 1)?;
        Ok(inputs[0].mapv(stable_sigmoid))
    }

    /// `dx = g · y · (1 - y)`, computed from the cached output.
    fn backward(
        &self,
        inputs: &[Node],
        output: &Tensor,
        grad_output: &Tensor,
    ) -> Result<(), NodeGradError> {
        check_arity(self.name(), inputs.len(), 1)?;
        accumulate_into(&inputs[0], |_| {
            ensure_same_shape(output, grad_output, "sigmoid_backward")?;
            Ok(Zip::from(grad_output)
                .and(output)
                .map_collect(|&g, &y| g * y * (1.0 - y)))
        })
    }
}

pub fn sigmoid(x: &Node) -> Result<Node, NodeGradError> {
    Node::apply(SigmoidOp, vec![x.clone()])
}

#[cfg(test)]
#[path = "sigmoid_test.rs"]
mod tests;
