use super::node::Node;
use crate::error::NodeGradError;
use crate::tensor::Tensor;
use std::fmt::Debug;

/// A differentiable operation: the payload of an operation [`Node`].
///
/// The trait is open. Adding an operation means implementing this trait and a
/// constructor function that calls [`Node::apply`]; the backward driver never needs
/// to know about concrete operations.
///
/// Implementations hold only their hyper-parameters (and, for stochastic operations,
/// the state produced by the forward pass). Inputs live on the node itself and are
/// handed back to `backward` in the same order they were given to `forward`.
pub trait Operation: Debug {
    /// Short lowercase name used in node labels (`<name>#<id>`).
    fn name(&self) -> &'static str;

    /// Computes the output value from the input values.
    fn forward(&self, inputs: &[&Tensor]) -> Result<Tensor, NodeGradError>;

    /// Pushes the vector-Jacobian product into each input.
    ///
    /// # Arguments
    /// * `inputs`: the input nodes, in forward order.
    /// * `output`: the value computed by `forward`.
    /// * `grad_output`: the fully accumulated gradient of the loss with respect to
    ///   `output`; it has the shape of `output`.
    ///
    /// Implementations must add each contribution with [`Node::accumulate_gradient`]
    /// (usually through [`accumulate_into`]) and must not compute the local term for
    /// inputs that do not require gradients.
    fn backward(
        &self,
        inputs: &[Node],
        output: &Tensor,
        grad_output: &Tensor,
    ) -> Result<(), NodeGradError>;
}

/// Accumulates the gradient produced by `local_grad` into `input`, if it requires one.
///
/// `local_grad` receives the input's current value. It is not called at all for
/// inputs that do not require gradients.
pub fn accumulate_into<F>(input: &Node, local_grad: F) -> Result<(), NodeGradError>
where
    F: FnOnce(&Tensor) -> Result<Tensor, NodeGradError>,
{
    if !input.requires_grad() {
        return Ok(());
    }
    let grad = {
        let value = input.value();
        local_grad(&value)?
    };
    input.accumulate_gradient(&grad)
}

/// Checks that an operation received the number of inputs it was built for.
pub fn check_arity(operation: &str, actual: usize, expected: usize) -> Result<(), NodeGradError> {
    if actual != expected {
        return Err(NodeGradError::UnsupportedOperation(format!(
            "{} expects {} inputs, got {}",
            operation, expected, actual
        )));
    }
    Ok(())
}
