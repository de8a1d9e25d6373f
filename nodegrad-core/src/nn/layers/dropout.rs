use super::Layer;
use crate::autograd::Node;
use crate::error::NodeGradError;
use crate::ops;
use rand::rngs::StdRng;
use rand::SeedableRng;

/// Inverted dropout layer. Acts as the identity when not training.
#[derive(Debug)]
pub struct Dropout {
    keep_prob: f64,
    rng: StdRng,
    training: bool,
}

impl Dropout {
    /// # Errors
    /// Returns `NodeGradError::Configuration` unless `0 < keep_prob <= 1`.
    pub fn new(keep_prob: f64, seed: u64) -> Result<Self, NodeGradError> {
        if !(keep_prob > 0.0 && keep_prob <= 1.0) {
            return Err(NodeGradError::Configuration(format!(
                "dropout keep probability must be in (0, 1], got {}",
                keep_prob
            )));
        }
        Ok(Dropout {
            keep_prob,
            rng: StdRng::seed_from_u64(seed),
            training: true,
        })
    }

    pub fn keep_prob(&self) -> f64 {
        self.keep_prob
    }
}

impl Layer for Dropout {
    fn forward(&mut self, input: &Node) -> Result<Node, NodeGradError> {
        if !self.training {
            return Ok(input.clone());
        }
        ops::dropout(input, self.keep_prob, &mut self.rng)
    }

    fn set_training(&mut self, training: bool) {
        self.training = training;
    }
}
