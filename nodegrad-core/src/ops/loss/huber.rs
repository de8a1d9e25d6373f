use super::batch_size;
use crate::autograd::{accumulate_into, check_arity, Node, Operation};
use crate::error::NodeGradError;
use crate::tensor::{self, Tensor};
use ndarray::Zip;

/// Huber loss: quadratic within `delta` of the target, linear outside.
#[derive(Debug, Clone, Copy)]
pub struct HuberLossOp {
    pub delta: f64,
}

impl HuberLossOp {
    fn value(&self, d: f64) -> f64 {
        if d.abs() <= self.delta {
            0.5 * d * d
        } else {
            self.delta * (d.abs() - 0.5 * self.delta)
        }
    }
}

impl Operation for HuberLossOp {
    fn name(&self) -> &'static str {
        "huber_loss"
    }

    fn forward(&self, inputs: &[&Tensor]) -> Result<Tensor, NodeGradError> {
        check_arity(self.name(), inputs.len(), 2)?;
        let batch = batch_size(inputs[0], inputs[1], self.name())?;
        let total = Zip::from(inputs[0])
            .and(inputs[1])
            .fold(0.0, |acc, &p, &t| acc + self.value(p - t));
        Ok(tensor::scalar(total / batch as f64))
    }

    /// The derivative of the per-element term is `clamp(p - t, -delta, delta)`.
    fn backward(
        &self,
        inputs: &[Node],
        _output: &Tensor,
        grad_output: &Tensor,
    ) -> Result<(), NodeGradError> {
        check_arity(self.name(), inputs.len(), 2)?;
        let g = tensor::scalar_value(grad_output)?;
        let delta = self.delta;
        let (prediction, target) = (&inputs[0], &inputs[1]);
        let local = |direction: f64| -> Result<Tensor, NodeGradError> {
            let p = prediction.value();
            let t = target.value();
            let scale = direction * g / batch_size(&p, &t, "huber_loss_backward")? as f64;
            Ok(Zip::from(&*p)
                .and(&*t)
                .map_collect(|&p, &t| scale * (p - t).clamp(-delta, delta)))
        };
        accumulate_into(prediction, |_| local(1.0))?;
        accumulate_into(target, |_| local(-1.0))
    }
}

/// Batch-averaged Huber loss with threshold `delta`.
///
/// # Errors
/// * `NodeGradError::Configuration` if `delta` is not strictly positive.
/// * `NodeGradError::ShapeMismatch` if the shapes differ.
/// * `NodeGradError::InvalidShape` for 0-d inputs or an empty batch.
pub fn huber_loss(prediction: &Node, target: &Node, delta: f64) -> Result<Node, NodeGradError> {
    if !(delta > 0.0) {
        return Err(NodeGradError::Configuration(format!(
            "huber delta must be positive, got {}",
            delta
        )));
    }
    Node::apply(HuberLossOp { delta }, vec![prediction.clone(), target.clone()])
}

#[cfg(test)]
#[path = "huber_test.rs"]
mod tests;
