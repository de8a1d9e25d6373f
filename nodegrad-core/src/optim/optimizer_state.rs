use crate::autograd::NodeId;
use crate::error::NodeGradError;
use crate::nn::Parameter;
use crate::tensor::Tensor;
use std::collections::HashMap;

/// When per-parameter optimizer state is created.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum StatePolicy {
    /// State is created the first time a parameter is stepped.
    #[default]
    Lazy,
    /// Parameters must be passed to `Optimizer::register` before stepping them.
    Registered,
}

/// Per-parameter optimizer buffers keyed by [`NodeId`].
#[derive(Debug, Clone)]
pub struct ParamStateMap<S> {
    states: HashMap<NodeId, S>,
    policy: StatePolicy,
}

impl<S> ParamStateMap<S> {
    pub fn new(policy: StatePolicy) -> Self {
        ParamStateMap {
            states: HashMap::new(),
            policy,
        }
    }

    pub fn policy(&self) -> StatePolicy {
        self.policy
    }

    /// Inserts state built by `init` unless the parameter already has some.
    pub fn register<F>(&mut self, param: &Parameter, init: F)
    where
        F: FnOnce(&Tensor) -> S,
    {
        self.states
            .entry(param.id())
            .or_insert_with(|| init(&param.value()));
    }

    /// Returns the state of `param`, creating it under the lazy policy.
    ///
    /// # Errors
    /// Returns `NodeGradError::UnknownParameter` under the registered policy if the
    /// parameter was never registered.
    pub fn get_or_init<F>(&mut self, param: &Parameter, init: F) -> Result<&mut S, NodeGradError>
    where
        F: FnOnce(&Tensor) -> S,
    {
        let id = param.id();
        if !self.states.contains_key(&id) {
            match self.policy {
                StatePolicy::Lazy => {
                    log::debug!("creating optimizer state for {}", param.display_name());
                    let state = init(&param.value());
                    self.states.insert(id, state);
                }
                StatePolicy::Registered => {
                    return Err(NodeGradError::UnknownParameter {
                        id,
                        name: param.display_name(),
                    });
                }
            }
        }
        self.states.get_mut(&id).ok_or_else(|| NodeGradError::UnknownParameter {
            id,
            name: param.display_name(),
        })
    }

    /// Resolves state for every parameter of a step before any of them is updated.
    ///
    /// `buffer` selects the state tensor whose shape must match both the gradient and
    /// the value of its parameter.
    ///
    /// # Errors
    /// * `NodeGradError::UnknownParameter` as for [`ParamStateMap::get_or_init`].
    /// * `NodeGradError::ShapeMismatch` if a gradient or value no longer matches its
    ///   state.
    pub(crate) fn prepare<F, B>(
        &mut self,
        params: &[&Parameter],
        init: F,
        buffer: B,
    ) -> Result<(), NodeGradError>
    where
        F: Fn(&Tensor) -> S,
        B: Fn(&S) -> &Tensor,
    {
        for &param in params {
            let state: &S = self.get_or_init(param, &init)?;
            check_state_shape(buffer(state), &param.gradient(), param)?;
            check_state_shape(buffer(state), &param.value(), param)?;
        }
        Ok(())
    }

    pub fn get(&self, id: NodeId) -> Option<&S> {
        self.states.get(&id)
    }

    pub fn contains(&self, id: NodeId) -> bool {
        self.states.contains_key(&id)
    }

    pub fn len(&self) -> usize {
        self.states.len()
    }

    pub fn is_empty(&self) -> bool {
        self.states.is_empty()
    }

    pub fn clear(&mut self) {
        self.states.clear();
    }
}

/// Fails if a state buffer and a gradient disagree on shape.
pub(crate) fn check_state_shape(
    state: &Tensor,
    grad: &Tensor,
    param: &Parameter,
) -> Result<(), NodeGradError> {
    if state.shape() != grad.shape() {
        return Err(NodeGradError::ShapeMismatch {
            expected: state.shape().to_vec(),
            actual: grad.shape().to_vec(),
            operation: format!("optimizer step for {}", param.display_name()),
        });
    }
    Ok(())
}

/// Parameters in first-seen order with repeated handles removed.
pub(crate) fn unique_params(params: &[Parameter]) -> Vec<&Parameter> {
    let mut seen = std::collections::HashSet::new();
    params
        .iter()
        .filter(|param| {
            let first = seen.insert(param.id());
            if !first {
                log::warn!(
                    "parameter {} passed more than once to an optimizer step; updating it once",
                    param.display_name()
                );
            }
            first
        })
        .collect()
}
