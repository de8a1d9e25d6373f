use super::*;
use crate::ops::{add, mul};
use crate::utils::testing::{check_tensor_near, create_test_tensor};

#[test]
fn test_leaf_kinds() {
    let c = Node::constant(create_test_tensor(vec![1.0, 2.0], vec![2]));
    let p = Node::parameter(create_test_tensor(vec![3.0, 4.0], vec![2]));
    assert!(c.is_leaf() && p.is_leaf());
    assert!(!c.requires_grad());
    assert!(p.requires_grad());
    assert!(p.is_parameter());
    assert_eq!(c.op_name(), "constant");
    assert_eq!(p.op_name(), "parameter");
    assert_eq!(p.shape(), vec![2]);
    check_tensor_near(&p.gradient(), &[2], &[0.0, 0.0], 0.0);
}

#[test]
fn test_ids_are_unique_and_increasing() {
    let a = Node::constant(tensor::scalar(1.0));
    let b = Node::constant(tensor::scalar(1.0));
    assert_ne!(a.id(), b.id());
    assert!(a.id() < b.id());
    assert!(a.clone().ptr_eq(&a));
    assert!(!a.ptr_eq(&b));
}

#[test]
fn test_apply_propagates_requires_grad() -> Result<(), NodeGradError> {
    let c = Node::constant(create_test_tensor(vec![1.0, 2.0], vec![2]));
    let p = Node::parameter(create_test_tensor(vec![3.0, 4.0], vec![2]));
    let constant_only = add(&c, &c)?;
    let mixed = mul(&c, &p)?;
    assert!(!constant_only.requires_grad());
    assert!(mixed.requires_grad());
    assert!(!mixed.is_leaf());
    assert_eq!(mixed.inputs().len(), 2);
    assert!(mixed.label().starts_with("mul#"));
    check_tensor_near(&mixed.value(), &[2], &[3.0, 8.0], 1e-12);
    Ok(())
}

#[test]
fn test_accumulate_gradient_sums_and_broadcasts() -> Result<(), NodeGradError> {
    let p = Node::parameter(create_test_tensor(vec![0.0; 4], vec![2, 2]));
    p.accumulate_gradient(&create_test_tensor(vec![1.0, 2.0, 3.0, 4.0], vec![2, 2]))?;
    p.accumulate_gradient(&tensor::scalar(0.5))?;
    p.accumulate_gradient(&create_test_tensor(vec![10.0, 20.0], vec![2]))?;
    check_tensor_near(&p.gradient(), &[2, 2], &[11.5, 22.5, 13.5, 24.5], 1e-12);
    Ok(())
}

#[test]
fn test_accumulate_gradient_shape_mismatch() {
    let p = Node::parameter(create_test_tensor(vec![0.0; 4], vec![2, 2]));
    let result = p.accumulate_gradient(&create_test_tensor(vec![1.0, 2.0, 3.0], vec![3]));
    assert!(matches!(result, Err(NodeGradError::ShapeMismatch { .. })));
    check_tensor_near(&p.gradient(), &[2, 2], &[0.0; 4], 0.0);
}

#[test]
fn test_zero_gradient_is_idempotent() -> Result<(), NodeGradError> {
    let p = Node::parameter(create_test_tensor(vec![1.0, 2.0], vec![2]));
    p.accumulate_gradient(&create_test_tensor(vec![5.0, -5.0], vec![2]))?;
    p.zero_gradient();
    let once = p.gradient().clone();
    p.zero_gradient();
    assert_eq!(*p.gradient(), once);
    check_tensor_near(&once, &[2], &[0.0, 0.0], 0.0);
    Ok(())
}

#[test]
fn test_set_value_resets_gradient() -> Result<(), NodeGradError> {
    let x = Node::constant(create_test_tensor(vec![1.0, 2.0], vec![2]));
    x.accumulate_gradient(&tensor::scalar(3.0))?;
    x.set_value(create_test_tensor(vec![7.0, 8.0, 9.0], vec![3]))?;
    assert_eq!(x.shape(), vec![3]);
    check_tensor_near(&x.gradient(), &[3], &[0.0; 3], 0.0);
    Ok(())
}

#[test]
fn test_set_value_on_operation_node_fails() -> Result<(), NodeGradError> {
    let p = Node::parameter(create_test_tensor(vec![1.0], vec![1]));
    let y = add(&p, &p)?;
    let result = y.set_value(create_test_tensor(vec![0.0], vec![1]));
    assert!(matches!(result, Err(NodeGradError::UnsupportedOperation(_))));
    Ok(())
}
