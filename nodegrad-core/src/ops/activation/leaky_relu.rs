use crate::autograd::{accumulate_into, check_arity, Node, Operation};
use crate::error::NodeGradError;
use crate::ops::ensure_same_shape;
use crate::tensor::Tensor;
use ndarray::Zip;

pub const DEFAULT_NEGATIVE_SLOPE: f64 = 0.01;

/// Leaky rectified linear unit: `x` for positive inputs, `slope · x` otherwise.
#[derive(Debug, Clone, Copy)]
pub struct LeakyReluOp {
    pub negative_slope: f64,
}

impl Default for LeakyReluOp {
    fn default() -> Self {
        LeakyReluOp {
            negative_slope: DEFAULT_NEGATIVE_SLOPE,
        }
    }
}

impl Operation for LeakyReluOp {
    fn name(&self) -> &'static str {
        "leaky_relu"
    }

    fn forward(&self, inputs: &[&Tensor]) -> Result<Tensor, NodeGradError> {
        check_arity(self.name(), inputs.len(), 1)?;
        let slope = self.negative_slope;
        Ok(inputs[0].mapv(|x| if x > 0.0 { x } else { slope * x }))
    }

    fn backward(
        &self,
        inputs: &[Node],
        _output: &Tensor,
        grad_output: &Tensor,
    ) -> Result<(), NodeGradError> {
        check_arity(self.name(), inputs.len(), 1)?;
        let slope = self.negative_slope;
        accumulate_into(&inputs[0], |x| {
            ensure_same_shape(x, grad_output, "leaky_relu_backward")?;
            Ok(Zip::from(grad_output)
                .and(x)
                .map_collect(|&g, &x| if x > 0.0 { g } else { g * slope }))
        })
    }
}

/// Applies a leaky ReLU with the given negative slope
/// (use [`DEFAULT_NEGATIVE_SLOPE`] for the conventional 0.01).
pub fn leaky_relu(x: &Node, negative_slope: f64) -> Result<Node, NodeGradError> {
    Node::apply(LeakyReluOp { negative_slope }, vec![x.clone()])
}

#[cfg(test)]
#[path = "leaky_relu_test.rs"]
mod tests;
