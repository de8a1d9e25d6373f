use super::Tensor;
use crate::error::NodeGradError;
use ndarray::{ArrayD, IxDyn};

/// Creates a tensor from row-major data and a shape.
///
/// # Errors
/// Returns `NodeGradError::InvalidShape` if the length of `data` does not match the
/// number of elements described by `shape`.
pub fn from_vec(data: Vec<f64>, shape: Vec<usize>) -> Result<Tensor, NodeGradError> {
    let data_len = data.len();
    ArrayD::from_shape_vec(IxDyn(&shape), data).map_err(|_| NodeGradError::InvalidShape {
        shape,
        operation: "from_vec".to_string(),
        reason: format!("data length {} does not match the shape", data_len),
    })
}

/// Creates a 0-dimensional tensor.
pub fn scalar(value: f64) -> Tensor {
    ArrayD::from_elem(IxDyn(&[]), value)
}

pub fn zeros(shape: &[usize]) -> Tensor {
    ArrayD::zeros(IxDyn(shape))
}

pub fn ones(shape: &[usize]) -> Tensor {
    ArrayD::ones(IxDyn(shape))
}

pub fn full(shape: &[usize], value: f64) -> Tensor {
    ArrayD::from_elem(IxDyn(shape), value)
}

/// Creates a zero tensor with the shape of `tensor`.
pub fn zeros_like(tensor: &Tensor) -> Tensor {
    ArrayD::zeros(tensor.raw_dim())
}

/// Extracts the single element of a scalar-like tensor (rank 0, or every dimension 1).
///
/// # Errors
/// Returns `NodeGradError::ShapeMismatch` if the tensor holds more or fewer than one element.
pub fn scalar_value(tensor: &Tensor) -> Result<f64, NodeGradError> {
    match tensor.iter().next() {
        Some(&value) if tensor.len() == 1 => Ok(value),
        _ => Err(NodeGradError::ShapeMismatch {
            expected: vec![],
            actual: tensor.shape().to_vec(),
            operation: "scalar_value".to_string(),
        }),
    }
}
