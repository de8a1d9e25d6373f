use super::*;
use crate::autograd::{backward, grad_check::check_grad};
use crate::utils::testing::{check_tensor_near, create_test_tensor};

#[test]
fn test_cross_entropy_forward_and_backward() -> Result<(), NodeGradError> {
    let p = Node::parameter(create_test_tensor(vec![0.5, 0.5, 0.25, 0.75], vec![2, 2]));
    let t = Node::constant(create_test_tensor(vec![1.0, 0.0, 0.0, 1.0], vec![2, 2]));
    let loss = cross_entropy_loss(&p, &t)?;
    let expected = -(0.5f64.ln() + 0.75f64.ln()) / 2.0;
    check_tensor_near(&loss.value(), &[], &[expected], 1e-12);
    backward(&loss)?;
    check_tensor_near(
        &p.gradient(),
        &[2, 2],
        &[-1.0, 0.0, 0.0, -1.0 / 1.5],
        1e-12,
    );
    Ok(())
}

#[test]
fn test_cross_entropy_zero_probability_is_not_masked() -> Result<(), NodeGradError> {
    let p = Node::constant(create_test_tensor(vec![0.0, 1.0], vec![1, 2]));
    let t = Node::constant(create_test_tensor(vec![1.0, 0.0], vec![1, 2]));
    let loss = cross_entropy_loss(&p, &t)?;
    assert!(!loss.value().iter().all(|v| v.is_finite()));
    Ok(())
}

#[test]
fn test_cross_entropy_grad_check() {
    let p = Node::parameter(create_test_tensor(vec![0.2, 0.3, 0.5, 0.6, 0.1, 0.3], vec![2, 3]));
    let t = Node::parameter(create_test_tensor(vec![0.0, 1.0, 0.0, 0.5, 0.25, 0.25], vec![2, 3]));
    let result = check_grad(
        |inputs| cross_entropy_loss(&inputs[0], &inputs[1]),
        &[p, t],
        &crate::tensor::scalar(1.0),
        1e-7,
        1e-5,
    );
    assert!(result.is_ok(), "{:?}", result);
}
