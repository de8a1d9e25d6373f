use super::batch_size;
use crate::autograd::{accumulate_into, check_arity, Node, Operation};
use crate::error::NodeGradError;
use crate::tensor::{self, Tensor};
use ndarray::Zip;

/// Halved mean squared error: `Σ(p - t)² / 2B`.
#[derive(Debug, Clone, Copy, Default)]
pub struct L2LossOp;

impl Operation for L2LossOp {
    fn name(&self) -> &'static str {
        "l2_loss"
    }

    fn forward(&self, inputs: &[&Tensor]) -> Result<Tensor, NodeGradError> {
        check_arity(self.name(), inputs.len(), 2)?;
        let batch = batch_size(inputs[0], inputs[1], self.name())?;
        let total = Zip::from(inputs[0])
            .and(inputs[1])
            .fold(0.0, |acc, &p, &t| acc + (p - t) * (p - t));
        Ok(tensor::scalar(total / (2.0 * batch as f64)))
    }

    /// `dp = g · (p - t) / B` and `dt = -dp`.
    fn backward(
        &self,
        inputs: &[Node],
        _output: &Tensor,
        grad_output: &Tensor,
    ) -> Result<(), NodeGradError> {
        check_arity(self.name(), inputs.len(), 2)?;
        let g = tensor::scalar_value(grad_output)?;
        let (prediction, target) = (&inputs[0], &inputs[1]);
        let local = |direction: f64| -> Result<Tensor, NodeGradError> {
            let p = prediction.value();
            let t = target.value();
            let scale = direction * g / batch_size(&p, &t, "l2_loss_backward")? as f64;
            Ok(Zip::from(&*p).and(&*t).map_collect(|&p, &t| scale * (p - t)))
        };
        accumulate_into(prediction, |_| local(1.0))?;
        accumulate_into(target, |_| local(-1.0))
    }
}

/// Batch-averaged squared error between `prediction` and `target`, halved so that the
/// gradient is `(p - t) / B`.
///
/// # Errors
/// * `NodeGradError::ShapeMismatch` if the shapes differ.
/// * `NodeGradError::InvalidShape` for 0-d inputs or an empty batch.
pub fn l2_loss(prediction: &Node, target: &Node) -> Result<Node, NodeGradError> {
    Node::apply(L2LossOp, vec![prediction.clone(), target.clone()])
}

#[cfg(test)]
#[path = "l2_test.rs"]
mod tests;
