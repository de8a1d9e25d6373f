use crate::error::NodeGradError;
use crate::nn::Parameter;

/// Common interface of all optimizers.
///
/// The parameters to update are passed to every call instead of being owned by the
/// optimizer; state is keyed by node identity, so the same parameters must be passed
/// on every step.
pub trait Optimizer {
    /// Applies one update to every parameter, using its accumulated gradient.
    ///
    /// # Errors
    /// * `NodeGradError::UnknownParameter` when the optimizer uses
    ///   [`StatePolicy::Registered`](super::StatePolicy::Registered) and a parameter
    ///   was never registered.
    /// * `NodeGradError::ShapeMismatch` when a gradient no longer matches the shape of
    ///   the state kept for its parameter.
    fn step(&mut self, params: &[Parameter]) -> Result<(), NodeGradError>;

    /// Resets the gradient of every parameter to zero.
    fn zero_grad(&self, params: &[Parameter]) {
        for param in params {
            param.zero_gradient();
        }
    }

    /// Creates zeroed state for parameters the optimizer does not know yet.
    fn register(&mut self, params: &[Parameter]);

    /// Drops all per-parameter state and step counters.
    fn reset_state(&mut self);

    fn learning_rate(&self) -> f64;

    fn set_learning_rate(&mut self, learning_rate: f64);
}
