//! # Automatic differentiation
//!
//! The node abstraction, the open [`Operation`] trait and the backward driver.
//!
//! A backward pass proceeds as follows:
//! 1. The loss must hold exactly one element.
//! 2. [`topological_order`] discovers every node reachable from the loss with an
//!    iterative post-order DFS that follows inputs in insertion order.
//! 3. Accumulators of the reachable operation nodes are reset and the loss is seeded
//!    with 1. Leaf accumulators are left alone so gradients can be summed across
//!    several passes.
//! 4. Nodes are visited in reverse topological order and each operation node pushes
//!    its vector-Jacobian product into its inputs.

use crate::error::NodeGradError;
use crate::tensor;

pub mod backward_op;
pub mod grad_check;
pub mod graph;
pub mod node;

pub use backward_op::{accumulate_into, check_arity, Operation};
pub use graph::topological_order;
pub use node::{Node, NodeId};

/// Runs reverse-mode differentiation from `loss`.
///
/// After this returns, every node reachable from `loss` that requires gradients holds
/// the sum of the chain-rule contributions of all its consumers. Leaf gradients are
/// added to whatever they already held.
///
/// # Errors
/// * `NodeGradError::ShapeMismatch` if `loss` holds more than one element.
/// * Any error raised by an operation's backward. The pass is aborted and the graph
///   should be discarded.
pub fn backward(loss: &Node) -> Result<(), NodeGradError> {
    if loss.value().len() != 1 {
        return Err(NodeGradError::ShapeMismatch {
            expected: vec![],
            actual: loss.shape(),
            operation: format!("backward from {}", loss.label()),
        });
    }
    if !loss.requires_grad() {
        log::warn!(
            "backward called on {} which does not require gradients; nothing to do",
            loss.label()
        );
        return Ok(());
    }

    let order = topological_order(loss);
    log::debug!("backward from {}: {} reachable nodes", loss.label(), order.len());

    for node in order.iter().filter(|node| !node.is_leaf()) {
        node.zero_gradient();
    }
    loss.accumulate_gradient(&tensor::scalar(1.0))?;

    for node in order.iter().rev() {
        if !node.requires_grad() {
            continue;
        }
        let Some(operation) = node.operation() else {
            continue;
        };
        log::trace!("backward through {}", node.label());
        let output = node.value();
        let grad_output = node.gradient();
        operation
            .backward(node.inputs(), &output, &grad_output)
            .map_err(|e| e.at_node(node.label()))?;
    }
    Ok(())
}

#[cfg(test)]
#[path = "backward_test.rs"]
mod tests;
