use super::*;
use crate::autograd::grad_check::check_grad;
use crate::utils::testing::{check_tensor_near, create_test_tensor};
use approx::assert_relative_eq;

#[test]
fn test_softmax_rows_sum_to_one() -> Result<(), NodeGradError> {
    let x = Node::constant(create_test_tensor(vec![1.0, 2.0, 3.0, -1.0, 0.0, 1.0], vec![2, 3]));
    let y = softmax(&x)?;
    let value = y.value();
    for row in value.lanes(Axis(1)) {
        assert_relative_eq!(row.sum(), 1.0, epsilon = 1e-12);
    }
    // Softmax is shift invariant, so both rows are identical.
    check_tensor_near(
        &value,
        &[2, 3],
        &[
            0.09003057317038046,
            0.24472847105479764,
            0.6652409557748219,
            0.09003057317038046,
            0.24472847105479764,
            0.6652409557748219,
        ],
        1e-12,
    );
    Ok(())
}

#[test]
fn test_softmax_is_stable_for_large_logits() -> Result<(), NodeGradError> {
    let x = Node::constant(create_test_tensor(vec![1000.0, 1.0, 1.0], vec![1, 3]));
    let y = softmax(&x)?;
    let value = y.value();
    assert!(value.iter().all(|v| v.is_finite()));
    check_tensor_near(&value, &[1, 3], &[1.0, 0.0, 0.0], 1e-12);
    Ok(())
}

#[test]
fn test_softmax_rejects_scalar() {
    let x = Node::constant(crate::tensor::scalar(1.0));
    assert!(matches!(softmax(&x), Err(NodeGradError::InvalidShape { .. })));
}

#[test]
fn test_softmax_grad_check_full_jacobian() {
    let x = Node::parameter(create_test_tensor(vec![0.2, -1.0, 0.5, 1.5, 0.3, -0.4], vec![2, 3]));
    // A non-uniform probe exercises the off-diagonal Jacobian terms.
    let probe = create_test_tensor(vec![1.0, -2.0, 0.5, 0.3, 1.7, -0.9], vec![2, 3]);
    let result = check_grad(|inputs| softmax(&inputs[0]), &[x], &probe, 1e-6, 1e-5);
    assert!(result.is_ok(), "{:?}", result);
}
