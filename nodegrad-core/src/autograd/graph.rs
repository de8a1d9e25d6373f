use super::node::{Node, NodeId};
use std::collections::HashSet;

/// Returns every node reachable from `root` in topological order: each node appears
/// after all of its inputs, and `root` comes last.
///
/// The traversal is an iterative post-order DFS that follows inputs in insertion
/// order, so the result is deterministic and long chains (e.g. unrolled recurrent
/// models) cannot overflow the call stack. Each node appears once even when it is
/// consumed by several nodes. Iterating the result in reverse never visits a node
/// before all of its in-graph consumers.
pub fn topological_order(root: &Node) -> Vec<Node> {
    let mut visited: HashSet<NodeId> = HashSet::new();
    let mut order = Vec::new();
    // (node, index of the next input to explore)
    let mut stack: Vec<(Node, usize)> = vec![(root.clone(), 0)];
    visited.insert(root.id());

    while let Some((node, next_input)) = stack.pop() {
        let input = node.inputs().get(next_input).cloned();
        match input {
            Some(input) => {
                stack.push((node, next_input + 1));
                if visited.insert(input.id()) {
                    stack.push((input, 0));
                }
            }
            None => order.push(node),
        }
    }
    order
}

#[cfg(test)]
#[path = "graph_test.rs"]
mod tests;
