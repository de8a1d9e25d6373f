use crate::autograd::{accumulate_into, check_arity, Node, Operation};
use crate::error::NodeGradError;
use crate::ops::ensure_same_shape;
use crate::tensor::Tensor;
use ndarray::Zip;

/// Hyperbolic tangent.
#[derive(Debug, Clone, Copy, Default)]
pub struct TanhOp;

impl Operation for TanhOp {
    fn name(&self) -> &'static str {
        "tanh"
    }

    fn forward(&self, inputs: &[&Tensor]) -> Result<Tensor, NodeGradError> {
        check_arity(self.name(), inputs.len(), 1)?;
        Ok(inputs[0].mapv(f64::tanh))
    }

    fn backward(
        &self,
        inputs: &[Node],
        output: &Tensor,
        grad_output: &Tensor,
    ) -> Result<(), NodeGradError> {
        check_arity(self.name(), inputs.len(), 1)?;
        accumulate_into(&inputs[0], |_| {
            ensure_same_shape(output, grad_output, "tanh_backward")?;
            Ok(Zip::from(grad_output)
                .and(output)
                .map_collect(|&g, &y| g * (1.0 - y * y)))
        })
    }
}

pub fn tanh(x: &Node) -> Result<Node, NodeGradError> {
    Node::apply(TanhOp, vec![x.clone()])
}

#[cfg(test)]
#[path = "tanh_test.rs"]
mod tests;
