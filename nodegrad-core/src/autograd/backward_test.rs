use super::*;
use crate::ops::{add, matmul, mul, relu, sum};
use crate::utils::testing::{check_tensor_near, create_test_tensor};
use approx::assert_relative_eq;

#[test]
fn test_backward_simple_product() -> Result<(), NodeGradError> {
    let a = Node::parameter(create_test_tensor(vec![2.0, 3.0], vec![2]));
    let b = Node::parameter(create_test_tensor(vec![4.0, 5.0], vec![2]));
    let loss = sum(&mul(&a, &b)?)?;
    backward(&loss)?;
    check_tensor_near(&a.gradient(), &[2], &[4.0, 5.0], 1e-12);
    check_tensor_near(&b.gradient(), &[2], &[2.0, 3.0], 1e-12);
    check_tensor_near(&loss.gradient(), &[], &[1.0], 0.0);
    Ok(())
}

#[test]
fn test_fan_out_accumulates_each_consumer_once() -> Result<(), NodeGradError> {
    // loss = sum(x*x + x) -> d/dx = 2x + 1
    let x = Node::parameter(create_test_tensor(vec![1.0, -2.0, 3.0], vec![3]));
    let squared = mul(&x, &x)?;
    let loss = sum(&add(&squared, &x)?)?;
    backward(&loss)?;
    check_tensor_near(&x.gradient(), &[3], &[3.0, -3.0, 7.0], 1e-12);
    Ok(())
}

#[test]
fn test_shared_intermediate_receives_all_contributions() -> Result<(), NodeGradError> {
    // h is consumed twice: loss = sum(h + h*h), h = 3x
    let x = Node::parameter(create_test_tensor(vec![1.0], vec![1]));
    let three = Node::constant(create_test_tensor(vec![3.0], vec![1]));
    let h = mul(&x, &three)?;
    let loss = sum(&add(&h, &mul(&h, &h)?)?)?;
    backward(&loss)?;
    // dL/dh = 1 + 2h = 7, dL/dx = 21
    check_tensor_near(&h.gradient(), &[1], &[7.0], 1e-12);
    check_tensor_near(&x.gradient(), &[1], &[21.0], 1e-12);
    Ok(())
}

#[test]
fn test_leaf_gradients_accumulate_across_passes() -> Result<(), NodeGradError> {
    let x = Node::parameter(create_test_tensor(vec![1.0, 2.0], vec![2]));
    let y = Node::constant(create_test_tensor(vec![3.0, 4.0], vec![2]));
    let loss = sum(&mul(&x, &y)?)?;
    backward(&loss)?;
    backward(&loss)?;
    check_tensor_near(&x.gradient(), &[2], &[6.0, 8.0], 1e-12);
    // Operation nodes are reset at the start of every pass.
    check_tensor_near(&loss.gradient(), &[], &[1.0], 0.0);

    x.zero_gradient();
    backward(&loss)?;
    check_tensor_near(&x.gradient(), &[2], &[3.0, 4.0], 1e-12);
    Ok(())
}

#[test]
fn test_constants_receive_no_gradient() -> Result<(), NodeGradError> {
    let x = Node::parameter(create_test_tensor(vec![1.0, 2.0], vec![2]));
    let c = Node::constant(create_test_tensor(vec![5.0, 6.0], vec![2]));
    let loss = sum(&mul(&x, &c)?)?;
    backward(&loss)?;
    check_tensor_near(&c.gradient(), &[2], &[0.0, 0.0], 0.0);
    Ok(())
}

#[test]
fn test_backward_rejects_non_scalar_loss() -> Result<(), NodeGradError> {
    let x = Node::parameter(create_test_tensor(vec![1.0, 2.0], vec![2]));
    let y = relu(&x)?;
    let result = backward(&y);
    assert!(matches!(result, Err(NodeGradError::ShapeMismatch { .. })));
    Ok(())
}

#[test]
fn test_backward_accepts_single_element_loss() -> Result<(), NodeGradError> {
    let x = Node::parameter(create_test_tensor(vec![1.0, 2.0], vec![1, 2]));
    let w = Node::parameter(create_test_tensor(vec![3.0, 4.0], vec![2, 1]));
    let loss = matmul(&x, &w)?;
    assert_eq!(loss.shape(), vec![1, 1]);
    backward(&loss)?;
    check_tensor_near(&x.gradient(), &[1, 2], &[3.0, 4.0], 1e-12);
    check_tensor_near(&w.gradient(), &[2, 1], &[1.0, 2.0], 1e-12);
    Ok(())
}

#[test]
fn test_backward_without_gradients_is_noop() -> Result<(), NodeGradError> {
    let c = Node::constant(create_test_tensor(vec![1.0, 2.0], vec![2]));
    let loss = sum(&c)?;
    backward(&loss)?;
    check_tensor_near(&loss.gradient(), &[], &[0.0], 0.0);
    Ok(())
}

#[test]
fn test_repeated_passes_are_bit_identical() -> Result<(), NodeGradError> {
    let build = || -> Result<(Node, Node), NodeGradError> {
        let x = Node::parameter(create_test_tensor(vec![0.1, 0.7, -0.3], vec![3]));
        let a = mul(&x, &x)?;
        let b = add(&a, &x)?;
        let loss = sum(&mul(&b, &a)?)?;
        Ok((x, loss))
    };
    let (x1, loss1) = build()?;
    let (x2, loss2) = build()?;
    backward(&loss1)?;
    backward(&loss2)?;
    for (g1, g2) in x1.gradient().iter().zip(x2.gradient().iter()) {
        assert_eq!(g1.to_bits(), g2.to_bits());
    }
    assert_relative_eq!(loss1.value().sum(), loss2.value().sum());
    Ok(())
}
