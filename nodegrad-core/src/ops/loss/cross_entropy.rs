use super::batch_size;
use crate::autograd::{accumulate_into, check_arity, Node, Operation};
use crate::error::NodeGradError;
use crate::tensor::{self, Tensor};
use ndarray::Zip;

/// Cross-entropy between predicted probabilities and target distributions:
/// `-Σ t · ln p / B`.
///
/// Probabilities equal to zero yield infinite or NaN values; they are not masked.
/// Prefer [`softmax_cross_entropy`](super::softmax_cross_entropy) when the
/// predictions come out of a softmax.
#[derive(Debug, Clone, Copy, Default)]
pub struct CrossEntropyLossOp;

impl Operation for CrossEntropyLossOp {
    fn name(&self) -> &'static str {
        "cross_entropy_loss"
    }

    fn forward(&self, inputs: &[&Tensor]) -> Result<Tensor, NodeGradError> {
        check_arity(self.name(), inputs.len(), 2)?;
        let batch = batch_size(inputs[0], inputs[1], self.name())?;
        let total = Zip::from(inputs[0])
            .and(inputs[1])
            .fold(0.0, |acc, &p, &t| acc - t * p.ln());
        Ok(tensor::scalar(total / batch as f64))
    }

    /// `dp = -g · t / (p · B)` and `dt = -g · ln p / B`.
    fn backward(
        &self,
        inputs: &[Node],
        _output: &Tensor,
        grad_output: &Tensor,
    ) -> Result<(), NodeGradError> {
        check_arity(self.name(), inputs.len(), 2)?;
        let g = tensor::scalar_value(grad_output)?;
        let (prediction, target) = (&inputs[0], &inputs[1]);
        accumulate_into(prediction, |p| {
            let t = target.value();
            let scale = -g / batch_size(p, &t, "cross_entropy_loss_backward")? as f64;
            Ok(Zip::from(p).and(&*t).map_collect(|&p, &t| scale * t / p))
        })?;
        accumulate_into(target, |t| {
            let p = prediction.value();
            let scale = -g / batch_size(&p, t, "cross_entropy_loss_backward")? as f64;
            Ok(p.mapv(|p| scale * p.ln()))
        })
    }
}

/// Batch-averaged cross-entropy of probability predictions against targets.
///
/// # Errors
/// * `NodeGradError::ShapeMismatch` if the shapes differ.
/// * `NodeGradError::InvalidShape` for 0-d inputs or an empty batch.
pub fn cross_entropy_loss(prediction: &Node, target: &Node) -> Result<Node, NodeGradError> {
    Node::apply(CrossEntropyLossOp, vec![prediction.clone(), target.clone()])
}

#[cfg(test)]
#[path = "cross_entropy_test.rs"]
mod tests;
