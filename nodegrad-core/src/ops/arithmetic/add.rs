use crate::autograd::{accumulate_into, check_arity, Node, Operation};
use crate::error::NodeGradError;
use crate::tensor::{broadcast_binary, reduce_to_shape, Tensor};

/// Element-wise addition with broadcasting.
#[derive(Debug, Clone, Copy, Default)]
pub struct AddOp;

impl Operation for AddOp {
    fn name(&self) -> &'static str {
        "add"
    }

    fn forward(&self, inputs: &[&Tensor]) -> Result<Tensor, NodeGradError> {
        check_arity(self.name(), inputs.len(), 2)?;
        broadcast_binary(inputs[0], inputs[1], self.name(), |a, b| a + b)
    }

    /// The local derivative is 1 for both operands; the upstream gradient is summed
    /// over the axes each operand was broadcast along.
    fn backward(
        &self,
        inputs: &[Node],
        _output: &Tensor,
        grad_output: &Tensor,
    ) -> Result<(), NodeGradError> {
        check_arity(self.name(), inputs.len(), 2)?;
        for input in inputs {
            accumulate_into(input, |value| {
                reduce_to_shape(grad_output, value.shape(), "add_backward")
            })?;
        }
        Ok(())
    }
}

/// Adds two nodes element-wise, broadcasting their shapes (e.g. a `[B, F]` batch plus
/// a `[F]` bias).
///
/// # Errors
/// Returns `NodeGradError::ShapeMismatch` if the shapes cannot be broadcast together.
pub fn add(a: &Node, b: &Node) -> Result<Node, NodeGradError> {
    Node::apply(AddOp, vec![a.clone(), b.clone()])
}

#[cfg(test)]
#[path = "add_test.rs"]
mod tests;
