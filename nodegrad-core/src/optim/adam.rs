use super::optimizer_state::{unique_params, ParamStateMap};
use super::{AdamConfig, Optimizer};
use crate::error::NodeGradError;
use crate::nn::Parameter;
use crate::tensor::{self, Tensor};
use ndarray::Zip;

/// First and second moment estimates of one parameter.
#[derive(Debug, Clone, PartialEq)]
pub struct AdamState {
    pub exp_avg: Tensor,
    pub exp_avg_sq: Tensor,
}

/// Adam: adaptive moment estimation with bias correction.
///
/// ```text
/// m ← β1·m + (1 - β1)·g
/// s ← β2·s + (1 - β2)·g²
/// m̂ = m / (1 - β1ᵗ),  ŝ = s / (1 - β2ᵗ)
/// value ← value - lr · m̂ / (√ŝ + ε)
/// ```
///
/// The step counter `t` is shared by all parameters and advances once per call to
/// [`Optimizer::step`].
#[derive(Debug)]
pub struct Adam {
    config: AdamConfig,
    state: ParamStateMap<AdamState>,
    step_count: u64,
}

impl Adam {
    /// # Errors
    /// Returns `NodeGradError::Configuration` if `config` fails validation.
    pub fn new(config: AdamConfig) -> Result<Self, NodeGradError> {
        config.validate()?;
        Ok(Adam {
            state: ParamStateMap::new(config.state_policy),
            config,
            step_count: 0,
        })
    }

    pub fn config(&self) -> &AdamConfig {
        &self.config
    }

    pub fn state(&self) -> &ParamStateMap<AdamState> {
        &self.state
    }

    pub fn step_count(&self) -> u64 {
        self.step_count
    }
}

fn zero_state(value: &Tensor) -> AdamState {
    AdamState {
        exp_avg: tensor::zeros_like(value),
        exp_avg_sq: tensor::zeros_like(value),
    }
}

impl Optimizer for Adam {
    fn step(&mut self, params: &[Parameter]) -> Result<(), NodeGradError> {
        let params = unique_params(params);
        self.state.prepare(&params, zero_state, |s| &s.exp_avg)?;

        self.step_count += 1;
        let AdamConfig {
            learning_rate,
            beta1,
            beta2,
            epsilon,
            ..
        } = self.config;
        let t = self.step_count.min(i32::MAX as u64) as i32;
        let bias_correction1 = 1.0 - beta1.powi(t);
        let bias_correction2 = 1.0 - beta2.powi(t);

        for param in params {
            let state = self.state.get_or_init(param, zero_state)?;
            let grad = param.gradient();
            Zip::from(&mut state.exp_avg)
                .and(&mut state.exp_avg_sq)
                .and(&*grad)
                .for_each(|m, s, &g| {
                    *m = beta1 * *m + (1.0 - beta1) * g;
                    *s = beta2 * *s + (1.0 - beta2) * g * g;
                });

            let mut value = param.value_mut();
            Zip::from(&mut *value)
                .and(&state.exp_avg)
                .and(&state.exp_avg_sq)
                .for_each(|x, &m, &s| {
                    let m_hat = m / bias_correction1;
                    let s_hat = s / bias_correction2;
                    *x -= learning_rate * m_hat / (s_hat.sqrt() + epsilon);
                });
        }
        Ok(())
    }

    fn register(&mut self, params: &[Parameter]) {
        for param in params {
            self.state.register(param, zero_state);
        }
    }

    fn reset_state(&mut self) {
        self.state.clear();
        self.step_count = 0;
    }

    fn learning_rate(&self) -> f64 {
        self.config.learning_rate
    }

    fn set_learning_rate(&mut self, learning_rate: f64) {
        self.config.learning_rate = learning_rate;
    }
}

#[cfg(test)]
#[path = "adam_test.rs"]
mod tests;
