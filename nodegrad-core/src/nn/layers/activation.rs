use super::Layer;
use crate::autograd::Node;
use crate::error::NodeGradError;
use crate::ops;

#[derive(Debug, Clone, Copy, PartialEq)]
pub enum ActivationKind {
    Relu,
    LeakyRelu { negative_slope: f64 },
    Sigmoid,
    Tanh,
    Softmax,
}

/// Parameter-free layer applying an activation function.
#[derive(Debug, Clone, Copy)]
pub struct Activation {
    kind: ActivationKind,
}

impl Activation {
    pub fn new(kind: ActivationKind) -> Self {
        Activation { kind }
    }

    pub fn relu() -> Self {
        Self::new(ActivationKind::Relu)
    }

    pub fn leaky_relu() -> Self {
        Self::new(ActivationKind::LeakyRelu {
            negative_slope: ops::activation::DEFAULT_NEGATIVE_SLOPE,
        })
    }

    pub fn sigmoid() -> Self {
        Self::new(ActivationKind::Sigmoid)
    }

    pub fn tanh() -> Self {
        Self::new(ActivationKind::Tanh)
    }

    pub fn softmax() -> Self {
        Self::new(ActivationKind::Softmax)
    }

    pub fn kind(&self) -> ActivationKind {
        self.kind
    }
}

impl Layer for Activation {
    fn forward(&mut self, input: &Node) -> Result<Node, NodeGradError> {
        match self.kind {
            ActivationKind::Relu => ops::relu(input),
            ActivationKind::LeakyRelu { negative_slope } => ops::leaky_relu(input, negative_slope),
            ActivationKind::Sigmoid => ops::sigmoid(input),
            ActivationKind::Tanh => ops::tanh(input),
            ActivationKind::Softmax => ops::softmax(input),
        }
    }
}
