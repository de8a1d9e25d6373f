use super::Layer;
use crate::autograd::Node;
use crate::error::NodeGradError;
use crate::nn::{init, Parameter};
use crate::ops::{add, matmul};
use rand::Rng;

/// Fully connected layer: `y = x · W + b` with `W: [in, out]` and `b: [out]`.
#[derive(Debug, Clone)]
pub struct Linear {
    pub weight: Parameter,
    pub bias: Parameter,
}

impl Linear {
    /// Xavier-initialized weights (`n = 1`) and a zero bias.
    pub fn new<R: Rng>(in_features: usize, out_features: usize, rng: &mut R) -> Self {
        Linear {
            weight: init::xavier(&[in_features, out_features], 1.0, rng).with_name("linear.weight"),
            bias: init::zeros(&[out_features]).with_name("linear.bias"),
        }
    }

    pub fn from_parameters(weight: Parameter, bias: Parameter) -> Self {
        Linear { weight, bias }
    }
}

impl Layer for Linear {
    fn forward(&mut self, input: &Node) -> Result<Node, NodeGradError> {
        add(&matmul(input, &self.weight)?, &self.bias)
    }

    fn parameters(&self) -> Vec<Parameter> {
        vec![self.weight.clone(), self.bias.clone()]
    }
}
