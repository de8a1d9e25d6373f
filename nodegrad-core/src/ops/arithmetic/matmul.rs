use crate::autograd::{accumulate_into, check_arity, Node, Operation};
use crate::error::NodeGradError;
use crate::tensor::Tensor;
use ndarray::{ArrayView2, Ix2};

/// 2-D matrix product `x · w`, the multiply of a dense layer.
#[derive(Debug, Clone, Copy, Default)]
pub struct MatmulOp;

fn as_matrix<'a>(tensor: &'a Tensor, operation: &str) -> Result<ArrayView2<'a, f64>, NodeGradError> {
    tensor
        .view()
        .into_dimensionality::<Ix2>()
        .map_err(|_| NodeGradError::InvalidShape {
            shape: tensor.shape().to_vec(),
            operation: operation.to_string(),
            reason: "expected a 2-D matrix".to_string(),
        })
}

impl Operation for MatmulOp {
    fn name(&self) -> &'static str {
        "matmul"
    }

    fn forward(&self, inputs: &[&Tensor]) -> Result<Tensor, NodeGradError> {
        check_arity(self.name(), inputs.len(), 2)?;
        let x = as_matrix(inputs[0], self.name())?;
        let w = as_matrix(inputs[1], self.name())?;
        if x.ncols() != w.nrows() {
            return Err(NodeGradError::ShapeMismatch {
                expected: vec![x.ncols(), w.ncols()],
                actual: w.shape().to_vec(),
                operation: self.name().to_string(),
            });
        }
        Ok(x.dot(&w).into_dyn())
    }

    /// `dx = g · wᵀ` and `dw = xᵀ · g`.
    fn backward(
        &self,
        inputs: &[Node],
        _output: &Tensor,
        grad_output: &Tensor,
    ) -> Result<(), NodeGradError> {
        check_arity(self.name(), inputs.len(), 2)?;
        let grad = as_matrix(grad_output, "matmul_backward")?;
        accumulate_into(&inputs[0], |_| {
            let w = inputs[1].value();
            let w = as_matrix(&w, "matmul_backward")?;
            Ok(grad.dot(&w.t()).into_dyn())
        })?;
        accumulate_into(&inputs[1], |_| {
            let x = inputs[0].value();
            let x = as_matrix(&x, "matmul_backward")?;
            Ok(x.t().dot(&grad).into_dyn())
        })
    }
}

/// Multiplies a `[B, I]` batch by an `[I, O]` weight matrix.
///
/// # Errors
/// * `NodeGradError::InvalidShape` if either operand is not 2-D.
/// * `NodeGradError::ShapeMismatch` if the inner dimensions differ.
pub fn matmul(x: &Node, w: &Node) -> Result<Node, NodeGradError> {
    Node::apply(MatmulOp, vec![x.clone(), w.clone()])
}

#[cfg(test)]
#[path = "matmul_test.rs"]
mod tests;
