use crate::autograd::{accumulate_into, check_arity, Node, Operation};
use crate::error::NodeGradError;
use crate::ops::ensure_same_shape;
use crate::tensor::Tensor;
use ndarray::Zip;

/// Rectified linear unit, `max(0, x)`.
#[derive(Debug, Clone, Copy, Default)]
pub struct ReluOp;

impl Operation for ReluOp {
    fn name(&self) -> &'static str {
        "relu"
    }

    fn forward(&self, inputs: &[&Tensor]) -> Result<Tensor, NodeGradError> {
        check_arity(self.name(), inputs.len(), 1)?;
        Ok(inputs[0].mapv(|x| x.max(0.0)))
    }

    fn backward(
        &self,
        inputs: &[Node],
        _output: &Tensor,
        grad_output: &Tensor,
    ) -> Result<(), NodeGradError> {
        check_arity(self.name(), inputs.len(), 1)?;
        accumulate_into(&inputs[0], |x| {
            ensure_same_shape(x, grad_output, "relu_backward")?;
            Ok(Zip::from(grad_output)
                .and(x)
                .map_collect(|&g, &x| if x > 0.0 { g } else { 0.0 }))
        })
    }
}

pub fn relu(x: &Node) -> Result<Node, NodeGradError> {
    Node::apply(ReluOp, vec![x.clone()])
}

#[cfg(test)]
#[path = "relu_test.rs"]
mod tests;
