use super::node::Node;
use crate::error::NodeGradError;
use crate::ops::{arithmetic::mul, reduction::sum};
use crate::tensor::Tensor;
use thiserror::Error;

/// Error type specifically for gradient checking failures.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum GradCheckError {
    #[error("Gradient check failed for input {input_index}, element {element_index}: analytical grad {analytical_grad:?} != numerical grad {numerical_grad:?} (difference {difference:?})")]
    GradientMismatch {
        input_index: usize,
        element_index: usize,
        analytical_grad: f64,
        numerical_grad: f64,
        difference: f64,
    },
    #[error("Numerical gradient is NaN or infinite for input {input_index}, element {element_index} (loss+ {loss_plus:?}, loss- {loss_minus:?})")]
    NumericalGradNaNOrInfinite {
        input_index: usize,
        element_index: usize,
        loss_plus: f64,
        loss_minus: f64,
    },
    #[error("Analytical gradient is NaN or infinite for input {input_index}, element {element_index}: {value:?}")]
    AnalyticalGradNaNOrInfinite {
        input_index: usize,
        element_index: usize,
        value: f64,
    },
    #[error("Gradient check input must be a leaf node. Input index: {input_index}")]
    InputNotLeaf { input_index: usize },
    #[error("Forward function execution failed during gradient check: {0}")]
    ForwardPassError(NodeGradError),
    #[error("Backward pass execution failed during gradient check: {0}")]
    BackwardPassError(NodeGradError),
    #[error("Tensor error during intermediate calculation: {0}")]
    TensorError(NodeGradError),
}

impl From<NodeGradError> for GradCheckError {
    fn from(err: NodeGradError) -> Self {
        GradCheckError::TensorError(err)
    }
}

/// Compares analytical gradients with central finite differences.
///
/// The scalar used for differentiation is `Σ func(inputs) ⊙ output_grad`, so
/// `output_grad` plays the role of the upstream gradient and must have the shape of
/// the function output. A non-uniform `output_grad` exercises every row of the
/// Jacobian (a uniform one hides errors in operations like softmax, whose rows sum
/// to zero).
///
/// Every input that requires gradients must be a leaf. Its value is perturbed by
/// `±epsilon` element by element through [`Node::set_value`] and restored afterwards;
/// this leaves the input gradients zeroed.
///
/// An element passes when the two estimates are equal within `tolerance`, either in
/// absolute or in relative terms.
pub fn check_grad<F>(
    func: F,
    inputs: &[Node],
    output_grad: &Tensor,
    epsilon: f64,
    tolerance: f64,
) -> Result<(), GradCheckError>
where
    F: Fn(&[Node]) -> Result<Node, NodeGradError>,
{
    for (input_index, input) in inputs.iter().enumerate() {
        if input.requires_grad() && !input.is_leaf() {
            return Err(GradCheckError::InputNotLeaf { input_index });
        }
    }

    // 1. Analytical gradients.
    for input in inputs {
        input.zero_gradient();
    }
    let output = func(inputs).map_err(GradCheckError::ForwardPassError)?;
    if output.value().shape() != output_grad.shape() {
        return Err(GradCheckError::TensorError(NodeGradError::ShapeMismatch {
            expected: output.shape(),
            actual: output_grad.shape().to_vec(),
            operation: "check_grad".to_string(),
        }));
    }
    let probe = Node::constant(output_grad.clone());
    let loss = sum(&mul(&output, &probe)?)?;
    super::backward(&loss).map_err(GradCheckError::BackwardPassError)?;
    let analytical: Vec<Tensor> = inputs.iter().map(|input| input.gradient().clone()).collect();

    // 2. Numerical gradients, one element at a time.
    let weighted_loss = |inputs: &[Node]| -> Result<f64, GradCheckError> {
        let output = func(inputs).map_err(GradCheckError::ForwardPassError)?;
        let value = output.value();
        Ok(value.iter().zip(output_grad.iter()).map(|(y, g)| y * g).sum())
    };

    for (input_index, input) in inputs.iter().enumerate() {
        if !input.requires_grad() {
            continue;
        }
        let original = input.value().clone();
        let result = check_input(
            inputs,
            input_index,
            &original,
            &analytical[input_index],
            &weighted_loss,
            epsilon,
            tolerance,
        );
        input.set_value(original)?;
        result?;
    }
    Ok(())
}

fn check_input<L>(
    inputs: &[Node],
    input_index: usize,
    original: &Tensor,
    analytical: &Tensor,
    weighted_loss: &L,
    epsilon: f64,
    tolerance: f64,
) -> Result<(), GradCheckError>
where
    L: Fn(&[Node]) -> Result<f64, GradCheckError>,
{
    let input = &inputs[input_index];
    let evaluate_at = |element_index: usize, delta: f64| -> Result<f64, GradCheckError> {
        let mut perturbed = original.clone();
        if let Some(element) = perturbed.iter_mut().nth(element_index) {
            *element += delta;
        }
        input.set_value(perturbed)?;
        weighted_loss(inputs)
    };

    for (element_index, &analytical_grad) in analytical.iter().enumerate() {
        if !analytical_grad.is_finite() {
            return Err(GradCheckError::AnalyticalGradNaNOrInfinite {
                input_index,
                element_index,
                value: analytical_grad,
            });
        }

        let loss_plus = evaluate_at(element_index, epsilon)?;
        let loss_minus = evaluate_at(element_index, -epsilon)?;
        let numerical_grad = (loss_plus - loss_minus) / (2.0 * epsilon);
        if !numerical_grad.is_finite() {
            return Err(GradCheckError::NumericalGradNaNOrInfinite {
                input_index,
                element_index,
                loss_plus,
                loss_minus,
            });
        }

        let close = approx::abs_diff_eq!(analytical_grad, numerical_grad, epsilon = tolerance)
            || approx::relative_eq!(analytical_grad, numerical_grad, max_relative = tolerance);
        if !close {
            return Err(GradCheckError::GradientMismatch {
                input_index,
                element_index,
                analytical_grad,
                numerical_grad,
                difference: (analytical_grad - numerical_grad).abs(),
            });
        }
    }
    Ok(())
}

#[cfg(test)]
#[path = "grad_check_test.rs"]
mod tests;
