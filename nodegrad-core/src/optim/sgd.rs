use super::optimizer_state::{unique_params, ParamStateMap};
use super::{Optimizer, SgdConfig};
use crate::error::NodeGradError;
use crate::nn::Parameter;
use crate::tensor::{self, Tensor};
use ndarray::Zip;

/// Velocity buffer of one parameter.
#[derive(Debug, Clone, PartialEq)]
pub struct SgdState {
    pub velocity: Tensor,
}

/// Gradient descent with momentum.
///
/// For each parameter with gradient `g`:
/// `v ← μ·v + (1 - d)·g` then `value ← value - lr·v`. With the default dampening of
/// 0 and momentum 0 this is plain gradient descent.
#[derive(Debug)]
pub struct Sgd {
    config: SgdConfig,
    state: ParamStateMap<SgdState>,
}

impl Sgd {
    /// # Errors
    /// Returns `NodeGradError::Configuration` if `config` fails validation.
    pub fn new(config: SgdConfig) -> Result<Self, NodeGradError> {
        config.validate()?;
        Ok(Sgd {
            state: ParamStateMap::new(config.state_policy),
            config,
        })
    }

    pub fn config(&self) -> &SgdConfig {
        &self.config
    }

    pub fn state(&self) -> &ParamStateMap<SgdState> {
        &self.state
    }
}

fn zero_state(value: &Tensor) -> SgdState {
    SgdState {
        velocity: tensor::zeros_like(value),
    }
}

impl Optimizer for Sgd {
    fn step(&mut self, params: &[Parameter]) -> Result<(), NodeGradError> {
        let SgdConfig {
            learning_rate,
            momentum,
            dampening,
            ..
        } = self.config;

        let params = unique_params(params);
        self.state.prepare(&params, zero_state, |s| &s.velocity)?;

        for param in params {
            let state = self.state.get_or_init(param, zero_state)?;
            let grad = param.gradient();
            Zip::from(&mut state.velocity)
                .and(&*grad)
                .for_each(|v, &g| *v = momentum * *v + (1.0 - dampening) * g);
            let mut value = param.value_mut();
            Zip::from(&mut *value)
                .and(&state.velocity)
                .for_each(|x, &v| *x -= learning_rate * v);
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
    }

    fn learning_rate(&self) -> f64 {
        self.config.learning_rate
    }

    fn set_learning_rate(&mut self, learning_rate: f64) {
        self.config.learning_rate = learning_rate;
    }
}

#[cfg(test)]
#[path = "sgd_test.rs"]
mod tests;
