use super::batch_size;
use crate::autograd::{accumulate_into, check_arity, Node, Operation};
use crate::error::NodeGradError;
use crate::tensor::{self, Tensor};
use ndarray::Zip;

/// Mean absolute error: `Σ|p - t| / B`.
#[derive(Debug, Clone, Copy, Default)]
pub struct L1LossOp;

fn sign(d: f64) -> f64 {
    if d > 0.0 {
        1.0
    } else if d < 0.0 {
        -1.0
    } else {
        0.0
    }
}

impl Operation for L1LossOp {
    fn name(&self) -> &'static str {
        "l1_loss"
    }

    fn forward(&self, inputs: &[&Tensor]) -> Result<Tensor, NodeGradError> {
        check_arity(self.name(), inputs.len(), 2)?;
        let batch = batch_size(inputs[0], inputs[1], self.name())?;
        let total = Zip::from(inputs[0])
            .and(inputs[1])
            .fold(0.0, |acc, &p, &t| acc + (p - t).abs());
        Ok(tensor::scalar(total / batch as f64))
    }

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
            let scale = direction * g / batch_size(&p, &t, "l1_loss_backward")? as f64;
            Ok(Zip::from(&*p).and(&*t).map_collect(|&p, &t| scale * sign(p - t)))
        };
        accumulate_into(prediction, |_| local(1.0))?;
        accumulate_into(target, |_| local(-1.0))
    }
}

/// Batch-averaged L1 loss between `prediction` and `target`.
///
/// # Errors
/// * `NodeGradError::ShapeMismatch` if the shapes differ.
/// * `NodeGradError::InvalidShape` for 0-d inputs or an empty batch.
pub fn l1_loss(prediction: &Node, target: &Node) -> Result<Node, NodeGradError> {
    Node::apply(L1LossOp, vec![prediction.clone(), target.clone()])
}

#[cfg(test)]
#[path = "l1_test.rs"]
mod tests;
