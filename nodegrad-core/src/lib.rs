//! # nodegrad-core
//!
//! Dynamic computation graphs with reverse-mode automatic differentiation.
//!
//! Graphs are never declared up front: every call to an operation constructor
//! (`ops::add`, `ops::matmul`, ...) evaluates its forward value eagerly and returns a
//! new [`Node`] that remembers its inputs. Calling [`autograd::backward`] on a scalar
//! loss walks the implicit graph in reverse topological order and accumulates
//! gradients into every node that requires them. Optimizers in [`optim`] then consume
//! the gradients held by parameter nodes.

pub mod autograd;
pub mod error;
pub mod nn;
pub mod ops;
pub mod optim;
pub mod tensor;
pub mod utils;

pub use autograd::{backward, Node, NodeId, Operation};
pub use error::NodeGradError;
pub use tensor::Tensor;
