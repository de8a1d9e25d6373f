use super::*;
use crate::autograd::{backward, grad_check::check_grad};
use crate::utils::testing::{check_tensor_near, create_test_tensor};

#[test]
fn test_l1_loss_forward_and_backward() -> Result<(), NodeGradError> {
    let p = Node::parameter(create_test_tensor(vec![1.0, 2.0, 3.0, 4.0], vec![2, 2]));
    let t = Node::constant(create_test_tensor(vec![0.0, 3.0, 3.5, 2.0], vec![2, 2]));
    let loss = l1_loss(&p, &t)?;
    // (1 + 1 + 0.5 + 2) / 2
    check_tensor_near(&loss.value(), &[], &[2.25], 1e-12);
    backward(&loss)?;
    check_tensor_near(&p.gradient(), &[2, 2], &[0.5, -0.5, -0.5, 0.5], 1e-12);
    Ok(())
}

#[test]
fn test_l1_loss_validates_shapes() {
    let p = Node::constant(create_test_tensor(vec![1.0, 2.0], vec![2]));
    let t = Node::constant(create_test_tensor(vec![1.0, 2.0], vec![1, 2]));
    assert!(matches!(l1_loss(&p, &t), Err(NodeGradError::ShapeMismatch { .. })));

    let empty = Node::constant(crate::tensor::zeros(&[0, 2]));
    assert!(matches!(l1_loss(&empty, &empty), Err(NodeGradError::InvalidShape { .. })));

    let scalar = Node::constant(crate::tensor::scalar(1.0));
    assert!(matches!(l1_loss(&scalar, &scalar), Err(NodeGradError::InvalidShape { .. })));
}

#[test]
fn test_l1_loss_grad_check() {
    let p = Node::parameter(create_test_tensor(vec![0.3, -1.2, 2.0, 0.7], vec![2, 2]));
    let t = Node::parameter(create_test_tensor(vec![0.1, -0.5, 2.5, 1.0], vec![2, 2]));
    let result = check_grad(
        |inputs| l1_loss(&inputs[0], &inputs[1]),
        &[p, t],
        &crate::tensor::scalar(1.0),
        1e-6,
        1e-5,
    );
    assert!(result.is_ok(), "{:?}", result);
}
