use super::batch_size;
use crate::autograd::{accumulate_into, check_arity, Node, Operation};
use crate::error::NodeGradError;
use crate::ops::activation::softmax::{last_axis, log_softmax_along, softmax_along};
use crate::tensor::{self, Tensor};
use ndarray::Zip;

/// Softmax over the last axis of raw logits fused with cross-entropy.
///
/// The log-softmax is evaluated with a log-sum-exp shifted by the lane maximum, so
/// large logits such as `[1000, 1, 1]` stay finite in both passes.
#[derive(Debug, Clone, Copy, Default)]
pub struct SoftmaxCrossEntropyOp;

impl Operation for SoftmaxCrossEntropyOp {
    fn name(&self) -> &'static str {
        "softmax_cross_entropy"
    }

    fn forward(&self, inputs: &[&Tensor]) -> Result<Tensor, NodeGradError> {
        check_arity(self.name(), inputs.len(), 2)?;
        let (logits, target) = (inputs[0], inputs[1]);
        let batch = batch_size(logits, target, self.name())?;
        let log_probs = log_softmax_along(logits, last_axis(logits, self.name())?);
        let total = Zip::from(&log_probs)
            .and(target)
            .fold(0.0, |acc, &lp, &t| acc - t * lp);
        Ok(tensor::scalar(total / batch as f64))
    }

    /// `dz = g · (softmax(z) · Σ_last t - t) / B` and `dt = -g · log_softmax(z) / B`.
    ///
    /// The `Σ_last t` factor keeps the logit gradient exact for targets that are not
    /// normalized distributions.
    fn backward(
        &self,
        inputs: &[Node],
        _output: &Tensor,
        grad_output: &Tensor,
    ) -> Result<(), NodeGradError> {
        check_arity(self.name(), inputs.len(), 2)?;
        let g = tensor::scalar_value(grad_output)?;
        let (logits, target) = (&inputs[0], &inputs[1]);
        accumulate_into(logits, |z| {
            let t = target.value();
            let batch = batch_size(z, &t, "softmax_cross_entropy_backward")?;
            let axis = last_axis(z, "softmax_cross_entropy_backward")?;
            let mut grad = softmax_along(z, axis);
            let target_mass = t.sum_axis(axis);
            for (mut lane, &mass) in grad.lanes_mut(axis).into_iter().zip(target_mass.iter()) {
                lane *= mass;
            }
            let scale = g / batch as f64;
            Zip::from(&mut grad)
                .and(&*t)
                .for_each(|dz, &t| *dz = scale * (*dz - t));
            Ok(grad)
        })?;
        accumulate_into(target, |t| {
            let z = logits.value();
            let batch = batch_size(&z, t, "softmax_cross_entropy_backward")?;
            let log_probs = log_softmax_along(&z, last_axis(&z, "softmax_cross_entropy_backward")?);
            let scale = -g / batch as f64;
            Ok(log_probs.mapv(|lp| scale * lp))
        })
    }
}

/// Batch-averaged cross-entropy of `softmax(logits)` against `target`, computed in a
/// single numerically stable step.
///
/// # Errors
/// * `NodeGradError::ShapeMismatch` if the shapes differ.
/// * `NodeGradError::InvalidShape` for 0-d inputs or an empty batch.
pub fn softmax_cross_entropy(logits: &Node, target: &Node) -> Result<Node, NodeGradError> {
    Node::apply(SoftmaxCrossEntropyOp, vec![logits.clone(), target.clone()])
}

#[cfg(test)]
#[path = "softmax_cross_entropy_test.rs"]
mod tests;
