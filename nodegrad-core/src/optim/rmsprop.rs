use super::optimizer_state::{unique_params, ParamStateMap};
use super::{Optimizer, RmsPropConfig};
use crate::error::NodeGradError;
use crate::nn::Parameter;
use crate::tensor::{self, Tensor};
use ndarray::Zip;

#[derive(Debug, Clone, PartialEq)]
pub struct RmsPropState {
    pub square_avg: Tensor,
}

/// RMSProp: `s ← ρ·s + (1 - ρ)·g²`, `value ← value - lr·g / (√s + ε)`.
#[derive(Debug)]
pub struct RmsProp {
    config: RmsPropConfig,
    state: ParamStateMap<RmsPropState>,
}

impl RmsProp {
    /// # Errors
    /// Returns `NodeGradError::Configuration` if `config` fails validation.
    pub fn new(config: RmsPropConfig) -> Result<Self, NodeGradError> {
        config.validate()?;
        Ok(RmsProp {
            state: ParamStateMap::new(config.state_policy),
            config,
        })
    }

    pub fn config(&self) -> &RmsPropConfig {
        &self.config
    }

    pub fn state(&self) -> &ParamStateMap<RmsPropState> {
        &self.state
    }
}

fn zero_state(value: &Tensor) -> RmsPropState {
    RmsPropState {
        square_avg: tensor::zeros_like(value),
    }
}

impl Optimizer for RmsProp {
    fn step(&mut self, params: &[Parameter]) -> Result<(), NodeGradError> {
        let RmsPropConfig {
            learning_rate,
            decay,
            epsilon,
            ..
        } = self.config;

        let params = unique_params(params);
        self.state.prepare(&params, zero_state, |s| &s.square_avg)?;

        for param in params {
            let state = self.state.get_or_init(param, zero_state)?;
            let grad = param.gradient();
            Zip::from(&mut state.square_avg)
                .and(&*grad)
                .for_each(|s, &g| *s = decay * *s + (1.0 - decay) * g * g);

            let mut value = param.value_mut();
            Zip::from(&mut *value)
                .and(&*grad)
                .and(&state.square_avg)
                .for_each(|x, &g, &s| *x -= learning_rate * g / (s.sqrt() + epsilon));
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
#[path = "rmsprop_test.rs"]
mod tests;
