use super::*;
use crate::autograd::{backward, grad_check::check_grad};
use crate::ops::sum;
use crate::utils::testing::{check_tensor_near, create_test_tensor};

#[test]
fn test_mul_forward_broadcast() -> Result<(), NodeGradError> {
    let a = Node::constant(create_test_tensor(vec![1.0, 2.0, 3.0, 4.0], vec![2, 2]));
    let b = Node::constant(create_test_tensor(vec![2.0, -1.0], vec![1, 2]));
    let c = mul(&a, &b)?;
    check_tensor_near(&c.value(), &[2, 2], &[2.0, -2.0, 6.0, -4.0], 1e-12);
    Ok(())
}

#[test]
fn test_mul_backward_square() -> Result<(), NodeGradError> {
    let x = Node::parameter(create_test_tensor(vec![3.0, -2.0], vec![2]));
    let loss = sum(&mul(&x, &x)?)?;
    backward(&loss)?;
    check_tensor_near(&x.gradient(), &[2], &[6.0, -4.0], 1e-12);
    Ok(())
}

#[test]
fn test_mul_grad_check_with_scalar() {
    let a = Node::parameter(create_test_tensor(vec![0.5, -1.0, 2.0, 0.25], vec![2, 2]));
    let s = Node::parameter(create_test_tensor(vec![1.5], vec![]));
    let probe = create_test_tensor(vec![1.0, 0.5, -2.0, 0.3], vec![2, 2]);
    let result = check_grad(|inputs| mul(&inputs[0], &inputs[1]), &[a, s], &probe, 1e-6, 1e-5);
    assert!(result.is_ok(), "{:?}", result);
}
