use super::*;
use crate::autograd::{backward, grad_check::check_grad};
use crate::ops::sum;
use crate::utils::testing::{check_tensor_near, create_test_tensor};

#[test]
fn test_add_forward() -> Result<(), NodeGradError> {
    let a = Node::constant(create_test_tensor(vec![1.0, 2.0, 3.0, 4.0], vec![2, 2]));
    let b = Node::constant(create_test_tensor(vec![10.0, 20.0], vec![2]));
    let c = add(&a, &b)?;
    check_tensor_near(&c.value(), &[2, 2], &[11.0, 22.0, 13.0, 24.0], 1e-12);
    Ok(())
}

#[test]
fn test_add_incompatible_shapes() {
    let a = Node::constant(create_test_tensor(vec![1.0, 2.0, 3.0], vec![3]));
    let b = Node::constant(create_test_tensor(vec![1.0, 2.0], vec![2]));
    assert!(matches!(add(&a, &b), Err(NodeGradError::ShapeMismatch { .. })));
}

#[test]
fn test_add_backward_reduces_broadcast_bias() -> Result<(), NodeGradError> {
    let x = Node::parameter(create_test_tensor(vec![1.0, 2.0, 3.0, 4.0, 5.0, 6.0], vec![3, 2]));
    let bias = Node::parameter(create_test_tensor(vec![0.5, -0.5], vec![2]));
    let loss = sum(&add(&x, &bias)?)?;
    backward(&loss)?;
    check_tensor_near(&x.gradient(), &[3, 2], &[1.0; 6], 1e-12);
    check_tensor_near(&bias.gradient(), &[2], &[3.0, 3.0], 1e-12);
    Ok(())
}

#[test]
fn test_add_same_input_twice() -> Result<(), NodeGradError> {
    let x = Node::parameter(create_test_tensor(vec![1.0, 2.0], vec![2]));
    let loss = sum(&add(&x, &x)?)?;
    backward(&loss)?;
    check_tensor_near(&x.gradient(), &[2], &[2.0, 2.0], 1e-12);
    Ok(())
}

#[test]
fn test_add_grad_check_broadcast() {
    let a = Node::parameter(create_test_tensor(vec![0.1, -0.2, 0.3, 0.4, 0.5, -0.6], vec![2, 3]));
    let b = Node::parameter(create_test_tensor(vec![1.0, 2.0], vec![2, 1]));
    let probe = create_test_tensor(vec![0.3, -1.0, 2.0, 0.7, 1.1, -0.4], vec![2, 3]);
    let result = check_grad(|inputs| add(&inputs[0], &inputs[1]), &[a, b], &probe, 1e-6, 1e-5);
    assert!(result.is_ok(), "{:?}", result);
}
