use super::*;
use crate::autograd::grad_check::check_grad;
use crate::utils::testing::{check_tensor_near, create_test_tensor};
use approx::assert_relative_eq;

fn sample_batch() -> Tensor {
    create_test_tensor(
        vec![0.5, -1.0, 2.0, 1.5, 0.3, -0.7, -0.2, 0.8, 1.1, 0.9, -0.4, 0.0],
        vec![4, 3],
    )
}

#[test]
fn test_batch_norm_normalizes_each_feature() -> Result<(), NodeGradError> {
    let x = Node::constant(sample_batch());
    let gamma = Node::constant(create_test_tensor(vec![1.0, 2.0, 0.5], vec![3]));
    let beta = Node::constant(create_test_tensor(vec![0.0, 1.0, -1.0], vec![3]));
    let y = batch_norm(&x, &gamma, &beta, BatchStatistics::Batch, DEFAULT_EPSILON)?;
    let value = y.value();
    let means = value.sum_axis(Axis(0)) / 4.0;
    check_tensor_near(&means, &[3], &[0.0, 1.0, -1.0], 1e-9);
    for (feature, &g) in [1.0, 2.0, 0.5].iter().enumerate() {
        let column = value.index_axis(Axis(1), feature);
        let mean = column.sum() / 4.0;
        let variance = column.mapv(|v| (v - mean) * (v - mean)).sum() / 4.0;
        assert_relative_eq!(variance, g * g, epsilon = 1e-6);
    }
    Ok(())
}

#[test]
fn test_batch_norm_fixed_statistics() -> Result<(), NodeGradError> {
    let x = Node::constant(create_test_tensor(vec![1.0, 4.0, 3.0, 0.0], vec![2, 2]));
    let gamma = Node::constant(create_test_tensor(vec![1.0, 1.0], vec![2]));
    let beta = Node::constant(create_test_tensor(vec![0.0, 0.0], vec![2]));
    let statistics = BatchStatistics::Fixed {
        mean: create_test_tensor(vec![1.0, 2.0], vec![2]),
        variance: create_test_tensor(vec![4.0, 1.0], vec![2]),
    };
    let y = batch_norm(&x, &gamma, &beta, statistics, 0.0)?;
    check_tensor_near(&y.value(), &[2, 2], &[0.0, 2.0, 1.0, -2.0], 1e-12);
    Ok(())
}

#[test]
fn test_batch_norm_rejects_empty_batch() {
    let x = Node::constant(crate::tensor::zeros(&[0, 3]));
    let gamma = Node::constant(crate::tensor::ones(&[3]));
    let beta = Node::constant(crate::tensor::zeros(&[3]));
    let result = batch_norm(&x, &gamma, &beta, BatchStatistics::Batch, DEFAULT_EPSILON);
    assert!(matches!(result, Err(NodeGradError::InvalidShape { .. })));
}

#[test]
fn test_batch_norm_grad_check_batch_statistics() {
    let x = Node::parameter(sample_batch());
    let gamma = Node::parameter(create_test_tensor(vec![1.2, 0.7, -0.5], vec![3]));
    let beta = Node::parameter(create_test_tensor(vec![0.1, -0.3, 0.4], vec![3]));
    let probe = create_test_tensor(
        vec![1.0, -0.5, 0.3, 0.2, 1.5, -1.1, -0.7, 0.4, 0.9, 0.6, -0.2, 1.3],
        vec![4, 3],
    );
    let result = check_grad(
        |inputs| {
            batch_norm(
                &inputs[0],
                &inputs[1],
                &inputs[2],
                BatchStatistics::Batch,
                DEFAULT_EPSILON,
            )
        },
        &[x, gamma, beta],
        &probe,
        1e-6,
        1e-5,
    );
    assert!(result.is_ok(), "{:?}", result);
}

#[test]
fn test_batch_norm_grad_check_fixed_statistics() {
    let x = Node::parameter(sample_batch());
    let gamma = Node::parameter(create_test_tensor(vec![1.2, 0.7, -0.5], vec![3]));
    let beta = Node::parameter(create_test_tensor(vec![0.1, -0.3, 0.4], vec![3]));
    let statistics = BatchStatistics::Fixed {
        mean: create_test_tensor(vec![0.2, -0.1, 0.5], vec![3]),
        variance: create_test_tensor(vec![1.5, 0.8, 2.0], vec![3]),
    };
    let probe = create_test_tensor(
        vec![1.0, -0.5, 0.3, 0.2, 1.5, -1.1, -0.7, 0.4, 0.9, 0.6, -0.2, 1.3],
        vec![4, 3],
    );
    let result = check_grad(
        |inputs| {
            batch_norm(
                &inputs[0],
                &inputs[1],
                &inputs[2],
                statistics.clone(),
                DEFAULT_EPSILON,
            )
        },
        &[x, gamma, beta],
        &probe,
        1e-6,
        1e-5,
    );
    assert!(result.is_ok(), "{:?}", result);
}
