use crate::autograd::Node;
use crate::tensor::Tensor;
use std::fmt;
use std::ops::Deref;

/// A trainable leaf node, optionally named.
///
/// `Parameter` dereferences to its [`Node`], so it can be fed straight into
/// operations. Cloning a parameter shares the underlying node.
#[derive(Clone)]
pub struct Parameter {
    node: Node,
    name: Option<String>,
}

impl Parameter {
    pub fn new(value: Tensor) -> Self {
        Parameter {
            node: Node::parameter(value),
            name: None,
        }
    }

    pub fn new_with_name(value: Tensor, name: impl Into<String>) -> Self {
        Parameter {
            node: Node::parameter(value),
            name: Some(name.into()),
        }
    }

    pub fn with_name(mut self, name: impl Into<String>) -> Self {
        self.name = Some(name.into());
        self
    }

    pub fn name(&self) -> Option<&str> {
        self.name.as_deref()
    }

    /// The parameter name, or its node label when unnamed.
    pub fn display_name(&self) -> String {
        match &self.name {
            Some(name) => name.clone(),
            None => self.node.label(),
        }
    }

    pub fn node(&self) -> &Node {
        &self.node
    }
}

impl Deref for Parameter {
    type Target = Node;

    fn deref(&self) -> &Self::Target {
        &self.node
    }
}

impl fmt::Debug for Parameter {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Parameter({}, {:?})", self.display_name(), self.node.shape())
    }
}
