//! Parameter initializers.
//!
//! All random initializers take the generator explicitly so that seeded runs are
//! reproducible.

use crate::nn::Parameter;
use crate::tensor::{self, Tensor};
use ndarray::IxDyn;
use rand::Rng;
use rand_distr::{Distribution, StandardNormal, Uniform};

fn sample<R, D>(shape: &[usize], distribution: &D, rng: &mut R) -> Tensor
where
    R: Rng,
    D: Distribution<f64>,
{
    Tensor::from_shape_fn(IxDyn(shape), |_| distribution.sample(&mut *rng))
}

/// Xavier-style normal initialization: `N(0, 1) · √(n / fan_in + 1e-8)` where
/// `fan_in = shape[0]`.
///
/// `n = 1` gives the classic Xavier scale; `n = 2` suits ReLU networks.
pub fn xavier<R: Rng>(shape: &[usize], n: f64, rng: &mut R) -> Parameter {
    let fan_in = shape.first().copied().unwrap_or(1).max(1) as f64;
    let scale = (n / fan_in + 1e-8).sqrt();
    Parameter::new(sample(shape, &StandardNormal, rng).mapv(|v| v * scale))
}

pub const DEFAULT_NORMAL_SCALE: f64 = 0.01;

/// Standard normal samples multiplied by `scale`.
pub fn normal_scaled<R: Rng>(shape: &[usize], scale: f64, rng: &mut R) -> Parameter {
    Parameter::new(sample(shape, &StandardNormal, rng).mapv(|v| v * scale))
}

/// Uniform samples in `[-l, l)` with `l = √(3 / (mean(shape) + 1e-8))`.
pub fn uniform_bounded<R: Rng>(shape: &[usize], rng: &mut R) -> Parameter {
    let mean_dim = if shape.is_empty() {
        1.0
    } else {
        shape.iter().sum::<usize>() as f64 / shape.len() as f64
    };
    let limit = (3.0 / (mean_dim + 1e-8)).sqrt();
    Parameter::new(sample(shape, &Uniform::new(-limit, limit), rng))
}

pub fn zeros(shape: &[usize]) -> Parameter {
    Parameter::new(tensor::zeros(shape))
}

pub fn ones(shape: &[usize]) -> Parameter {
    Parameter::new(tensor::ones(shape))
}

#[cfg(test)]
#[path = "init_test.rs"]
mod tests;
