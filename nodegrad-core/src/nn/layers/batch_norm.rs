use super::Layer;
use crate::autograd::Node;
use crate::error::NodeGradError;
use crate::nn::{init, Parameter};
use crate::ops::{batch_norm, BatchStatistics};
use crate::tensor::{self, Tensor};
use ndarray::Axis;

pub const DEFAULT_MOMENTUM: f64 = 0.9;

/// Batch normalization over axis 0 with learnable scale and shift.
///
/// In training mode the layer normalizes with the statistics of the current batch and
/// folds them into running estimates:
/// `running = momentum · running + (1 - momentum) · batch`. In evaluation mode the
/// running estimates are used instead.
#[derive(Debug)]
pub struct BatchNorm {
    pub gamma: Parameter,
    pub beta: Parameter,
    running_mean: Tensor,
    running_variance: Tensor,
    momentum: f64,
    epsilon: f64,
    training: bool,
}

impl BatchNorm {
    pub fn new(num_features: usize) -> Self {
        BatchNorm {
            gamma: init::ones(&[num_features]).with_name("batch_norm.gamma"),
            beta: init::zeros(&[num_features]).with_name("batch_norm.beta"),
            running_mean: tensor::zeros(&[num_features]),
            running_variance: tensor::ones(&[num_features]),
            momentum: DEFAULT_MOMENTUM,
            epsilon: crate::ops::normalization::DEFAULT_EPSILON,
            training: true,
        }
    }

    pub fn with_momentum(mut self, momentum: f64) -> Self {
        self.momentum = momentum;
        self
    }

    pub fn with_epsilon(mut self, epsilon: f64) -> Self {
        self.epsilon = epsilon;
        self
    }

    pub fn running_mean(&self) -> &Tensor {
        &self.running_mean
    }

    pub fn running_variance(&self) -> &Tensor {
        &self.running_variance
    }

    fn update_running_statistics(&mut self, x: &Tensor) -> Result<(), NodeGradError> {
        let batch = x.shape().first().copied().unwrap_or(0);
        if batch == 0 {
            return Err(NodeGradError::InvalidShape {
                shape: x.shape().to_vec(),
                operation: "batch_norm".to_string(),
                reason: "expected a non-empty batch along axis 0".to_string(),
            });
        }
        let mean = x.sum_axis(Axis(0)) / batch as f64;
        let variance = (x - &mean).mapv(|c| c * c).sum_axis(Axis(0)) / batch as f64;
        if mean.shape() != self.running_mean.shape() {
            return Err(NodeGradError::ShapeMismatch {
                expected: self.running_mean.shape().to_vec(),
                actual: mean.shape().to_vec(),
                operation: "batch_norm".to_string(),
            });
        }
        let momentum = self.momentum;
        self.running_mean = &self.running_mean * momentum + mean * (1.0 - momentum);
        self.running_variance = &self.running_variance * momentum + variance * (1.0 - momentum);
        Ok(())
    }
}

impl Layer for BatchNorm {
    fn forward(&mut self, input: &Node) -> Result<Node, NodeGradError> {
        if self.training {
            let output = batch_norm(
                input,
                &self.gamma,
                &self.beta,
                BatchStatistics::Batch,
                self.epsilon,
            )?;
            self.update_running_statistics(&input.value())?;
            Ok(output)
        } else {
            let statistics = BatchStatistics::Fixed {
                mean: self.running_mean.clone(),
                variance: self.running_variance.clone(),
            };
            batch_norm(input, &self.gamma, &self.beta, statistics, self.epsilon)
        }
    }

    fn parameters(&self) -> Vec<Parameter> {
        vec![self.gamma.clone(), self.beta.clone()]
    }

    fn set_training(&mut self, training: bool) {
        self.training = training;
    }
}
