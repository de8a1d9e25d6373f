use crate::autograd::{accumulate_into, check_arity, Node, Operation};
use crate::error::NodeGradError;
use crate::tensor::{self, Tensor};

#[derive(Debug, Clone, Copy, Default)]
pub struct SumOp;

impl Operation for SumOp {
    fn name(&self) -> &'static str {
        "sum"
    }

    fn forward(&self, inputs: &[&Tensor]) -> Result<Tensor, NodeGradError> {
        check_arity(self.name(), inputs.len(), 1)?;
        Ok(tensor::scalar(inputs[0].sum()))
    }

    fn backward(
        &self,
        inputs: &[Node],
        _output: &Tensor,
        grad_output: &Tensor,
    ) -> Result<(), NodeGradError> {
        check_arity(self.name(), inputs.len(), 1)?;
        // The scalar upstream gradient is spread over every element by accumulation.
        accumulate_into(&inputs[0], |_| Ok(grad_output.clone()))
    }
}

/// Sums every element of `x` into a 0-d scalar.
pub fn sum(x: &Node) -> Result<Node, NodeGradError> {
    Node::apply(SumOp, vec![x.clone()])
}

#[cfg(test)]
#[path = "sum_test.rs"]
mod tests;
