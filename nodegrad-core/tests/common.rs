use nodegrad_core::nn::Parameter;
use nodegrad_core::tensor::{self, Tensor};
use nodegrad_core::Node;

// Shared by several integration test crates; each one uses a different subset.
#[allow(dead_code)]
pub fn create_test_tensor(data: Vec<f64>, shape: Vec<usize>) -> Tensor {
    tensor::from_vec(data, shape).expect("Test tensor creation failed")
}

#[allow(dead_code)]
pub fn constant(data: Vec<f64>, shape: Vec<usize>) -> Node {
    Node::constant(create_test_tensor(data, shape))
}

#[allow(dead_code)]
pub fn param(name: &str, data: Vec<f64>, shape: Vec<usize>) -> Parameter {
    Parameter::new(create_test_tensor(data, shape)).with_name(name)
}

/// First (or only) element of a node's value.
#[allow(dead_code)]
pub fn first_value(node: &Node) -> f64 {
    node.value().iter().copied().next().unwrap_or(f64::NAN)
}
