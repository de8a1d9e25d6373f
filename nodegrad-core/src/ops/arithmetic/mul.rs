use crate::autograd::{accumulate_into, check_arity, Node, Operation};
use crate::error::NodeGradError;
use crate::tensor::{broadcast_binary, reduce_to_shape, Tensor};

/// Element-wise (Hadamard) product with broadcasting.
#[derive(Debug, Clone, Copy, Default)]
pub struct MulOp;

impl Operation for MulOp {
    fn name(&self) -> &'static str {
        "mul"
    }

    fn forward(&self, inputs: &[&Tensor]) -> Result<Tensor, NodeGradError> {
        check_arity(self.name(), inputs.len(), 2)?;
        broadcast_binary(inputs[0], inputs[1], self.name(), |a, b| a * b)
    }

    fn backward(
        &self,
        inputs: &[Node],
        _output: &Tensor,
        grad_output: &Tensor,
    ) -> Result<(), NodeGradError> {
        check_arity(self.name(), inputs.len(), 2)?;
        // d(a*b)/da = b and d(a*b)/db = a
        for (index, input) in inputs.iter().enumerate() {
            let other = &inputs[1 - index];
            accumulate_into(input, |value| {
                let scaled =
                    broadcast_binary(grad_output, &other.value(), "mul_backward", |g, o| g * o)?;
                reduce_to_shape(&scaled, value.shape(), "mul_backward")
            })?;
        }
        Ok(())
    }
}

/// Multiplies two nodes element-wise, broadcasting their shapes.
///
/// # Errors
/// Returns `NodeGradError::ShapeMismatch` if the shapes cannot be broadcast together.
pub fn mul(a: &Node, b: &Node) -> Result<Node, NodeGradError> {
    Node::apply(MulOp, vec![a.clone(), b.clone()])
}

#[cfg(test)]
#[path = "mul_test.rs"]
mod tests;
