//! Hyper-parameter sets for the optimizers.
//!
//! Each config has sensible defaults, `with_*` builder setters, and a `validate`
//! method that optimizer constructors call before accepting it.

use super::StatePolicy;
use crate::error::NodeGradError;

fn check_positive(name: &str, value: f64) -> Result<(), NodeGradError> {
    if !(value > 0.0) {
        return Err(NodeGradError::Configuration(format!(
            "{} must be positive, got {}",
            name, value
        )));
    }
    Ok(())
}

fn check_unit_interval(name: &str, value: f64) -> Result<(), NodeGradError> {
    if !(0.0..1.0).contains(&value) {
        return Err(NodeGradError::Configuration(format!(
            "{} must be in [0, 1), got {}",
            name, value
        )));
    }
    Ok(())
}

/// Gradient descent with momentum.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SgdConfig {
    pub learning_rate: f64,
    pub momentum: f64,
    /// Scales the incoming gradient by `1 - dampening`. Setting it equal to the
    /// momentum turns the velocity into an exponential moving average.
    pub dampening: f64,
    pub state_policy: StatePolicy,
}

impl Default for SgdConfig {
    fn default() -> Self {
        SgdConfig {
            learning_rate: 0.1,
            momentum: 0.9,
            dampening: 0.0,
            state_policy: StatePolicy::Lazy,
        }
    }
}

impl SgdConfig {
    pub fn with_learning_rate(mut self, learning_rate: f64) -> Self {
        self.learning_rate = learning_rate;
        self
    }

    pub fn with_momentum(mut self, momentum: f64) -> Self {
        self.momentum = momentum;
        self
    }

    pub fn with_dampening(mut self, dampening: f64) -> Self {
        self.dampening = dampening;
        self
    }

    pub fn with_state_policy(mut self, state_policy: StatePolicy) -> Self {
        self.state_policy = state_policy;
        self
    }

    pub fn validate(&self) -> Result<(), NodeGradError> {
        check_positive("learning_rate", self.learning_rate)?;
        check_unit_interval("momentum", self.momentum)?;
        if !(0.0..=1.0).contains(&self.dampening) {
            return Err(NodeGradError::Configuration(format!(
                "dampening must be in [0, 1], got {}",
                self.dampening
            )));
        }
        Ok(())
    }
}

/// Adam with bias correction.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct AdamConfig {
    pub learning_rate: f64,
    pub beta1: f64,
    pub beta2: f64,
    pub epsilon: f64,
    pub state_policy: StatePolicy,
}

impl Default for AdamConfig {
    fn default() -> Self {
        AdamConfig {
            learning_rate: 0.001,
            beta1: 0.9,
            beta2: 0.999,
            epsilon: 1e-8,
            state_policy: StatePolicy::Lazy,
        }
    }
}

impl AdamConfig {
    pub fn with_learning_rate(mut self, learning_rate: f64) -> Self {
        self.learning_rate = learning_rate;
        self
    }

    pub fn with_betas(mut self, beta1: f64, beta2: f64) -> Self {
        self.beta1 = beta1;
        self.beta2 = beta2;
        self
    }

    pub fn with_epsilon(mut self, epsilon: f64) -> Self {
        self.epsilon = epsilon;
        self
    }

    pub fn with_state_policy(mut self, state_policy: StatePolicy) -> Self {
        self.state_policy = state_policy;
        self
    }

    pub fn validate(&self) -> Result<(), NodeGradError> {
        check_positive("learning_rate", self.learning_rate)?;
        check_unit_interval("beta1", self.beta1)?;
        check_unit_interval("beta2", self.beta2)?;
        check_positive("epsilon", self.epsilon)
    }
}

/// RMSProp.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RmsPropConfig {
    pub learning_rate: f64,
    /// Decay rate `ρ` of the running average of squared gradients.
    pub decay: f64,
    pub epsilon: f64,
    pub state_policy: StatePolicy,
}

impl Default for RmsPropConfig {
    fn default() -> Self {
        RmsPropConfig {
            learning_rate: 0.01,
            decay: 0.99,
            epsilon: 1e-8,
            state_policy: StatePolicy::Lazy,
        }
    }
}

impl RmsPropConfig {
    pub fn with_learning_rate(mut self, learning_rate: f64) -> Self {
        self.learning_rate = learning_rate;
        self
    }

    pub fn with_decay(mut self, decay: f64) -> Self {
        self.decay = decay;
        self
    }

    pub fn with_epsilon(mut self, epsilon: f64) -> Self {
        self.epsilon = epsilon;
        self
    }

    pub fn with_state_policy(mut self, state_policy: StatePolicy) -> Self {
        self.state_policy = state_policy;
        self
    }

    pub fn validate(&self) -> Result<(), NodeGradError> {
        check_positive("learning_rate", self.learning_rate)?;
        check_unit_interval("decay", self.decay)?;
        check_positive("epsilon", self.epsilon)
    }
}

#[cfg(test)]
#[path = "config_test.rs"]
mod tests;
