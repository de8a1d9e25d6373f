//! Assertion helpers shared by unit and integration tests.

use crate::autograd::Node;
use crate::nn::Parameter;
use crate::tensor::{self, Tensor};

/// Checks that a tensor has the expected shape and that every element is within
/// `tolerance` of the expected data (row-major).
/// Panics if shapes differ or data differs significantly.
pub fn check_tensor_near(
    actual: &Tensor,
    expected_shape: &[usize],
    expected_data: &[f64],
    tolerance: f64,
) {
    assert_eq!(actual.shape(), expected_shape, "Shape mismatch");
    assert_eq!(actual.len(), expected_data.len(), "Data length mismatch");
    for (i, (a, e)) in actual.iter().zip(expected_data.iter()).enumerate() {
        let diff = (a - e).abs();
        if !(diff <= tolerance) {
            panic!(
                "Data mismatch at index {}: actual={:?}, expected={:?}, diff={:?}, tolerance={:?}",
                i, a, e, diff, tolerance
            );
        }
    }
}

/// Helper to create a tensor for testing purposes.
pub fn create_test_tensor(data: Vec<f64>, shape: Vec<usize>) -> Tensor {
    tensor::from_vec(data, shape).expect("Failed to create test tensor")
}

/// Helper to create a constant input node.
pub fn create_test_constant(data: Vec<f64>, shape: Vec<usize>) -> Node {
    Node::constant(create_test_tensor(data, shape))
}

/// Helper to create a trainable parameter.
pub fn create_test_param(data: Vec<f64>, shape: Vec<usize>) -> Parameter {
    Parameter::new(create_test_tensor(data, shape))
}
