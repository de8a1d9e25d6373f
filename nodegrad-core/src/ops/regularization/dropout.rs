use crate::autograd::{accumulate_into, check_arity, Node, Operation};
use crate::error::NodeGradError;
use crate::ops::ensure_same_shape;
use crate::tensor::Tensor;
use ndarray::Zip;
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use rand_distr::{Bernoulli, Distribution};
use std::cell::RefCell;

/// Inverted dropout: keeps each element with probability `keep_prob` and rescales
/// the survivors by `1 / keep_prob`, so the expected output equals the input.
///
/// The operation owns its random generator. The forward pass stores the sampled mask
/// and the backward pass consumes it, so each forward is matched by at most one
/// backward.
#[derive(Debug)]
pub struct DropoutOp {
    keep_prob: f64,
    rng: RefCell<StdRng>,
    mask: RefCell<Option<Tensor>>,
}

impl DropoutOp {
    /// # Errors
    /// Returns `NodeGradError::Configuration` unless `0 < keep_prob <= 1`.
    pub fn new<R: Rng>(keep_prob: f64, rng: &mut R) -> Result<Self, NodeGradError> {
        if !(keep_prob > 0.0 && keep_prob <= 1.0) {
            return Err(NodeGradError::Configuration(format!(
                "dropout keep probability must be in (0, 1], got {}",
                keep_prob
            )));
        }
        Ok(DropoutOp {
            keep_prob,
            rng: RefCell::new(StdRng::seed_from_u64(rng.gen::<u64>())),
            mask: RefCell::new(None),
        })
    }

    pub fn keep_prob(&self) -> f64 {
        self.keep_prob
    }
}

impl Operation for DropoutOp {
    fn name(&self) -> &'static str {
        "dropout"
    }

    fn forward(&self, inputs: &[&Tensor]) -> Result<Tensor, NodeGradError> {
        check_arity(self.name(), inputs.len(), 1)?;
        let x = inputs[0];
        let bernoulli = Bernoulli::new(self.keep_prob)
            .map_err(|e| NodeGradError::Configuration(format!("dropout: {}", e)))?;
        let mask = {
            let mut rng = self.rng.borrow_mut();
            Tensor::from_shape_fn(x.raw_dim(), |_| {
                if bernoulli.sample(&mut *rng) {
                    1.0
                } else {
                    0.0
                }
            })
        };
        let scale = 1.0 / self.keep_prob;
        let out = Zip::from(x).and(&mask).map_collect(|&v, &m| v * m * scale);
        *self.mask.borrow_mut() = Some(mask);
        Ok(out)
    }

    /// Replays the stored mask: `dx = g · mask / keep_prob`.
    fn backward(
        &self,
        inputs: &[Node],
        _output: &Tensor,
        grad_output: &Tensor,
    ) -> Result<(), NodeGradError> {
        check_arity(self.name(), inputs.len(), 1)?;
        let mask = self.mask.borrow_mut().take().ok_or_else(|| NodeGradError::State {
            node: self.name().to_string(),
            reason: "no dropout mask recorded; backward already consumed it or forward never ran"
                .to_string(),
        })?;
        ensure_same_shape(&mask, grad_output, "dropout_backward")?;
        let scale = 1.0 / self.keep_prob;
        accumulate_into(&inputs[0], |_| {
            Ok(Zip::from(grad_output)
                .and(&mask)
                .map_collect(|&g, &m| g * m * scale))
        })
    }
}

/// Applies inverted dropout to `x`, drawing the seed of the operation's generator
/// from `rng`.
///
/// # Errors
/// Returns `NodeGradError::Configuration` unless `0 < keep_prob <= 1`.
pub fn dropout<R: Rng>(
    x: &Node,
    keep_prob: f64,
    rng: &mut R,
) -> Result<Node, NodeGradError> {
    Node::apply(DropoutOp::new(keep_prob, rng)?, vec![x.clone()])
}

#[cfg(test)]
#[path = "dropout_test.rs"]
mod tests;
