use crate::autograd::{accumulate_into, check_arity, Node, Operation};
use crate::error::NodeGradError;
use crate::tensor::{self, Tensor};

#[derive(Debug, Clone, Copy, Default)]
pub struct MeanOp;

impl Operation for MeanOp {
    fn name(&self) -> &'static str {
        "mean"
    }

    fn forward(&self, inputs: &[&Tensor]) -> Result<Tensor, NodeGradError> {
        check_arity(self.name(), inputs.len(), 1)?;
        let x = inputs[0];
        if x.is_empty() {
            return Err(NodeGradError::InvalidShape {
                shape: x.shape().to_vec(),
                operation: self.name().to_string(),
                reason: "cannot average an empty tensor".to_string(),
            });
        }
        Ok(tensor::scalar(x.sum() / x.len() as f64))
    }

    fn backward(
        &self,
        inputs: &[Node],
        _output: &Tensor,
        grad_output: &Tensor,
    ) -> Result<(), NodeGradError> {
        check_arity(self.name(), inputs.len(), 1)?;
        accumulate_into(&inputs[0], |value| Ok(grad_output / value.len() as f64))
    }
}

/// Averages every element of `x` into a 0-d scalar.
///
/// # Errors
/// Returns `NodeGradError::InvalidShape` if `x` has no elements.
pub fn mean(x: &Node) -> Result<Node, NodeGradError> {
    Node::apply(MeanOp, vec![x.clone()])
}

#[cfg(test)]
#[path = "mean_test.rs"]
mod tests;
