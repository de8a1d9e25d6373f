use super::backward_op::Operation;
use crate::error::NodeGradError;
use crate::tensor::{self, Tensor};
use std::cell::{Ref, RefCell, RefMut};
use std::fmt;
use std::rc::Rc;
use std::sync::atomic::{AtomicUsize, Ordering};

static NEXT_NODE_ID: AtomicUsize = AtomicUsize::new(0);

/// Unique, monotonically increasing identifier of a [`Node`].
///
/// Identifiers are never reused within a process, which makes them suitable as keys
/// for per-parameter optimizer state.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct NodeId(usize);

impl NodeId {
    fn next() -> Self {
        NodeId(NEXT_NODE_ID.fetch_add(1, Ordering::Relaxed))
    }

    pub fn as_usize(self) -> usize {
        self.0
    }
}

impl fmt::Display for NodeId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

pub(crate) enum NodeKind {
    Constant,
    Parameter,
    Operation(Box<dyn Operation>),
}

pub(crate) struct NodeData {
    id: NodeId,
    kind: NodeKind,
    value: RefCell<Tensor>,
    grad: RefCell<Tensor>,
    inputs: Vec<Node>,
    requires_grad: bool,
}

impl Drop for NodeData {
    // Unrolled recurrent graphs form long input chains; releasing them recursively
    // would overflow the stack.
    fn drop(&mut self) {
        let mut pending = std::mem::take(&mut self.inputs);
        while let Some(node) = pending.pop() {
            if let Ok(mut data) = Rc::try_unwrap(node.data) {
                pending.append(&mut data.inputs);
            }
        }
    }
}

/// A vertex of the dynamic computation graph.
///
/// `Node` is a cheap reference-counted handle: cloning it shares the same value,
/// gradient accumulator and inputs. There are three kinds of nodes:
///
/// * **constants** hold data fed into the graph and never require gradients,
/// * **parameters** are trainable leaves that always require gradients,
/// * **operation nodes** are produced by [`Node::apply`] and hold a boxed
///   [`Operation`] together with the ordered list of their inputs.
///
/// The forward value is computed eagerly when an operation node is created. The
/// gradient accumulator has the shape of the value and starts at zero.
#[derive(Clone)]
pub struct Node {
    data: Rc<NodeData>,
}

impl Node {
    fn new_leaf(kind: NodeKind, value: Tensor, requires_grad: bool) -> Self {
        let grad = tensor::zeros_like(&value);
        Node {
            data: Rc::new(NodeData {
                id: NodeId::next(),
                kind,
                value: RefCell::new(value),
                grad: RefCell::new(grad),
                inputs: Vec::new(),
                requires_grad,
            }),
        }
    }

    /// Creates a constant (input) node. Backward never propagates into it.
    pub fn constant(value: Tensor) -> Self {
        Self::new_leaf(NodeKind::Constant, value, false)
    }

    /// Creates a trainable parameter node.
    pub fn parameter(value: Tensor) -> Self {
        Self::new_leaf(NodeKind::Parameter, value, true)
    }

    /// Builds an operation node by running `operation.forward` on the input values.
    ///
    /// The resulting node requires gradients if at least one of its inputs does.
    ///
    /// # Errors
    /// Propagates any error raised by the forward computation (typically shape errors).
    pub fn apply<O>(operation: O, inputs: Vec<Node>) -> Result<Self, NodeGradError>
    where
        O: Operation + 'static,
    {
        let value = {
            let guards: Vec<Ref<'_, Tensor>> = inputs.iter().map(Node::value).collect();
            let values: Vec<&Tensor> = guards.iter().map(|guard| &**guard).collect();
            operation.forward(&values)?
        };
        let grad = tensor::zeros_like(&value);
        let requires_grad = inputs.iter().any(Node::requires_grad);
        Ok(Node {
            data: Rc::new(NodeData {
                id: NodeId::next(),
                kind: NodeKind::Operation(Box::new(operation)),
                value: RefCell::new(value),
                grad: RefCell::new(grad),
                inputs,
                requires_grad,
            }),
        })
    }

    pub fn id(&self) -> NodeId {
        self.data.id
    }

    /// Borrows the forward value.
    pub fn value(&self) -> Ref<'_, Tensor> {
        self.data.value.borrow()
    }

    /// Borrows the gradient accumulator.
    pub fn gradient(&self) -> Ref<'_, Tensor> {
        self.data.grad.borrow()
    }

    pub fn shape(&self) -> Vec<usize> {
        self.data.value.borrow().shape().to_vec()
    }

    pub fn requires_grad(&self) -> bool {
        self.data.requires_grad
    }

    /// Ordered inputs of an operation node; empty for leaves.
    pub fn inputs(&self) -> &[Node] {
        &self.data.inputs
    }

    pub fn is_leaf(&self) -> bool {
        !matches!(self.data.kind, NodeKind::Operation(_))
    }

    pub fn is_parameter(&self) -> bool {
        matches!(self.data.kind, NodeKind::Parameter)
    }

    pub fn op_name(&self) -> &str {
        match &self.data.kind {
            NodeKind::Constant => "constant",
            NodeKind::Parameter => "parameter",
            NodeKind::Operation(operation) => operation.name(),
        }
    }

    /// Human-readable `<op>#<id>` label used in error messages and logs.
    pub fn label(&self) -> String {
        format!("{}#{}", self.op_name(), self.data.id)
    }

    pub(crate) fn operation(&self) -> Option<&dyn Operation> {
        match &self.data.kind {
            NodeKind::Operation(operation) => Some(&**operation),
            _ => None,
        }
    }

    /// Adds `grad` to the accumulator.
    ///
    /// `grad` may have any shape that broadcasts to the value shape; a scalar is
    /// spread over every element.
    ///
    /// # Errors
    /// Returns `NodeGradError::ShapeMismatch` if `grad` does not broadcast to the shape
    /// of the value.
    pub fn accumulate_gradient(&self, grad: &Tensor) -> Result<(), NodeGradError> {
        let mut accumulator = self.data.grad.borrow_mut();
        if grad.shape() == accumulator.shape() {
            *accumulator += grad;
            return Ok(());
        }
        let broadcast = grad.broadcast(accumulator.raw_dim()).ok_or_else(|| {
            NodeGradError::ShapeMismatch {
                expected: accumulator.shape().to_vec(),
                actual: grad.shape().to_vec(),
                operation: format!("accumulate_gradient on {}", self.label()),
            }
        })?;
        *accumulator += &broadcast;
        Ok(())
    }

    /// Resets the accumulator to zeros. Calling it twice is the same as calling it once.
    pub fn zero_gradient(&self) {
        self.data.grad.borrow_mut().fill(0.0);
    }

    /// Replaces the value of a leaf node and resets its gradient.
    ///
    /// This is how a new batch is fed into an input node, and how the gradient
    /// checker perturbs parameters.
    ///
    /// # Errors
    /// Returns `NodeGradError::UnsupportedOperation` on operation nodes, whose value is
    /// a function of their inputs.
    pub fn set_value(&self, value: Tensor) -> Result<(), NodeGradError> {
        if !self.is_leaf() {
            return Err(NodeGradError::UnsupportedOperation(format!(
                "set_value on operation node {}",
                self.label()
            )));
        }
        *self.data.grad.borrow_mut() = tensor::zeros_like(&value);
        *self.data.value.borrow_mut() = value;
        Ok(())
    }

    /// Mutable access to a parameter value for in-place optimizer updates.
    pub(crate) fn value_mut(&self) -> RefMut<'_, Tensor> {
        self.data.value.borrow_mut()
    }

    /// Returns true if both handles point to the same node.
    pub fn ptr_eq(&self, other: &Node) -> bool {
        Rc::ptr_eq(&self.data, &other.data)
    }
}

impl fmt::Debug for Node {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Node")
            .field("label", &self.label())
            .field("shape", &self.shape())
            .field("requires_grad", &self.data.requires_grad)
            .field(
                "inputs",
                &self.data.inputs.iter().map(Node::label).collect::<Vec<_>>(),
            )
            .finish()
    }
}

#[cfg(test)]
#[path = "node_test.rs"]
mod tests;
