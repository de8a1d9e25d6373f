use super::Tensor;
use crate::error::NodeGradError;
use ndarray::{Axis, Zip};

/// Computes the shape two operands broadcast to, aligning trailing dimensions.
///
/// Returns `None` when some aligned pair of dimensions differs and neither is 1.
pub fn broadcast_shapes(shape1: &[usize], shape2: &[usize]) -> Option<Vec<usize>> {
    let rank = shape1.len().max(shape2.len());
    let mut result = vec![0; rank];
    for i in 0..rank {
        let dim1 = if i < rank - shape1.len() { 1 } else { shape1[i - (rank - shape1.len())] };
        let dim2 = if i < rank - shape2.len() { 1 } else { shape2[i - (rank - shape2.len())] };
        result[i] = match (dim1, dim2) {
            (a, b) if a == b => a,
            (1, b) => b,
            (a, 1) => a,
            _ => return None,
        };
    }
    Some(result)
}

/// Applies `f` element-wise over two broadcast operands.
///
/// # Errors
/// Returns `NodeGradError::ShapeMismatch` if the shapes cannot be broadcast together.
pub fn broadcast_binary<F>(
    a: &Tensor,
    b: &Tensor,
    operation: &str,
    f: F,
) -> Result<Tensor, NodeGradError>
where
    F: Fn(f64, f64) -> f64,
{
    let mismatch = || NodeGradError::ShapeMismatch {
        expected: a.shape().to_vec(),
        actual: b.shape().to_vec(),
        operation: operation.to_string(),
    };
    let shape = broadcast_shapes(a.shape(), b.shape()).ok_or_else(mismatch)?;
    let a_view = a.broadcast(shape.as_slice()).ok_or_else(mismatch)?;
    let b_view = b.broadcast(shape.as_slice()).ok_or_else(mismatch)?;
    Ok(Zip::from(a_view).and(b_view).map_collect(|&x, &y| f(x, y)))
}

/// Reduces a gradient to `target_shape` by summing over broadcast dimensions.
///
/// Leading dimensions absent from the target are summed away, then every target
/// dimension of size 1 that was stretched is summed with its axis kept. This undoes
/// the broadcasting performed by the forward pass of a binary operation.
///
/// # Errors
/// Returns `NodeGradError::ShapeMismatch` if `grad` could not have been produced by
/// broadcasting a tensor of `target_shape`.
pub fn reduce_to_shape(
    grad: &Tensor,
    target_shape: &[usize],
    operation: &str,
) -> Result<Tensor, NodeGradError> {
    if grad.shape() == target_shape {
        return Ok(grad.clone());
    }
    let mismatch = || NodeGradError::ShapeMismatch {
        expected: target_shape.to_vec(),
        actual: grad.shape().to_vec(),
        operation: operation.to_string(),
    };
    if grad.ndim() < target_shape.len() {
        return Err(mismatch());
    }

    let mut reduced = grad.clone();
    while reduced.ndim() > target_shape.len() {
        reduced = reduced.sum_axis(Axis(0));
    }
    for (axis, &target_dim) in target_shape.iter().enumerate() {
        let current_dim = reduced.shape()[axis];
        if current_dim == target_dim {
            continue;
        }
        if target_dim != 1 {
            return Err(mismatch());
        }
        reduced = reduced.sum_axis(Axis(axis)).insert_axis(Axis(axis));
    }
    Ok(reduced)
}

#[cfg(test)]
#[path = "broadcast_utils_test.rs"]
mod tests;
