use super::*;
use crate::tensor::from_vec;

#[test]
fn test_broadcast_shapes_compatible() {
    assert_eq!(broadcast_shapes(&[2, 3], &[3]), Some(vec![2, 3]));
    assert_eq!(broadcast_shapes(&[4, 1], &[1, 5]), Some(vec![4, 5]));
    assert_eq!(broadcast_shapes(&[], &[2, 2]), Some(vec![2, 2]));
}

#[test]
fn test_broadcast_shapes_incompatible() {
    assert_eq!(broadcast_shapes(&[2, 3], &[2]), None);
}

#[test]
fn test_broadcast_binary_row_vector() -> Result<(), NodeGradError> {
    let matrix = from_vec(vec![1.0, 2.0, 3.0, 4.0], vec![2, 2])?;
    let row = from_vec(vec![10.0, 20.0], vec![1, 2])?;
    let result = broadcast_binary(&matrix, &row, "add", |x, y| x + y)?;
    assert_eq!(result.shape(), &[2, 2]);
    assert_eq!(result.iter().copied().collect::<Vec<_>>(), vec![11.0, 22.0, 13.0, 24.0]);
    Ok(())
}

#[test]
fn test_broadcast_binary_mismatch() {
    let a = from_vec(vec![1.0, 2.0], vec![2]).unwrap();
    let b = from_vec(vec![1.0, 2.0, 3.0], vec![3]).unwrap();
    let result = broadcast_binary(&a, &b, "add", |x, y| x + y);
    assert!(matches!(result, Err(NodeGradError::ShapeMismatch { .. })));
}

#[test]
fn test_reduce_to_shape_leading_and_stretched_axes() -> Result<(), NodeGradError> {
    let grad = from_vec(vec![1.0, 2.0, 3.0, 4.0, 5.0, 6.0], vec![2, 3])?;

    let bias = reduce_to_shape(&grad, &[3], "test")?;
    assert_eq!(bias.iter().copied().collect::<Vec<_>>(), vec![5.0, 7.0, 9.0]);

    let column = reduce_to_shape(&grad, &[2, 1], "test")?;
    assert_eq!(column.shape(), &[2, 1]);
    assert_eq!(column.iter().copied().collect::<Vec<_>>(), vec![6.0, 15.0]);

    let total = reduce_to_shape(&grad, &[], "test")?;
    assert_eq!(total.ndim(), 0);
    assert_eq!(total.sum(), 21.0);
    Ok(())
}

#[test]
fn test_reduce_to_shape_rejects_non_broadcast_target() {
    let grad = from_vec(vec![1.0; 6], vec![2, 3]).unwrap();
    let result = reduce_to_shape(&grad, &[2], "test");
    assert!(matches!(result, Err(NodeGradError::ShapeMismatch { .. })));
}
