use crate::autograd::Node;
use crate::error::NodeGradError;
use crate::nn::Parameter;
use std::fmt::Debug;

pub mod activation;
pub mod batch_norm;
pub mod dropout;
pub mod linear;

pub use activation::{Activation, ActivationKind};
pub use batch_norm::BatchNorm;
pub use dropout::Dropout;
pub use linear::Linear;

/// A building block of a feed-forward network.
///
/// `forward` builds fresh operation nodes on every call; only parameters (and layer
/// state such as running statistics) persist between calls.
pub trait Layer: Debug {
    fn forward(&mut self, input: &Node) -> Result<Node, NodeGradError>;

    /// Shared handles to the trainable parameters of the layer.
    fn parameters(&self) -> Vec<Parameter> {
        Vec::new()
    }

    /// Switches between training and evaluation behaviour. Most layers ignore it.
    fn set_training(&mut self, _training: bool) {}
}
