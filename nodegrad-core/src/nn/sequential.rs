use crate::autograd::Node;
use crate::error::NodeGradError;
use crate::nn::{Layer, Parameter};

/// Feed-forward container that chains layers.
///
/// Every call to `forward` rebuilds the computation graph from scratch, so the
/// topology may be edited between calls. The output node of each layer from the most
/// recent pass is kept for inspection.
#[derive(Debug, Default)]
pub struct Sequential {
    layers: Vec<(String, Box<dyn Layer>)>,
    outputs: Vec<Node>,
}

impl Sequential {
    pub fn new() -> Self {
        Self::default()
    }

    /// Appends a layer, builder style.
    pub fn with_layer<L: Layer + 'static>(mut self, name: &str, layer: L) -> Self {
        self.add_layer(name, layer);
        self
    }

    pub fn add_layer<L: Layer + 'static>(&mut self, name: &str, layer: L) {
        self.layers.push((name.to_string(), Box::new(layer)));
    }

    pub fn len(&self) -> usize {
        self.layers.len()
    }

    pub fn is_empty(&self) -> bool {
        self.layers.is_empty()
    }

    /// Output nodes of every layer from the most recent forward pass.
    pub fn outputs(&self) -> &[Node] {
        &self.outputs
    }

    /// Parameters prefixed with the name of the layer that owns them.
    pub fn named_parameters(&self) -> Vec<(String, Parameter)> {
        let mut params = Vec::new();
        for (layer_name, layer) in &self.layers {
            for (index, param) in layer.parameters().into_iter().enumerate() {
                let param_name = param
                    .name()
                    .map(|name| name.rsplit('.').next().unwrap_or(name).to_string())
                    .unwrap_or_else(|| index.to_string());
                params.push((format!("{}.{}", layer_name, param_name), param));
            }
        }
        params
    }
}

impl Layer for Sequential {
    fn forward(&mut self, input: &Node) -> Result<Node, NodeGradError> {
        self.outputs.clear();
        let mut current = input.clone();
        for (_, layer) in self.layers.iter_mut() {
            current = layer.forward(&current)?;
            self.outputs.push(current.clone());
        }
        Ok(current)
    }

    fn parameters(&self) -> Vec<Parameter> {
        self.layers
            .iter()
            .flat_map(|(_, layer)| layer.parameters())
            .collect()
    }

    fn set_training(&mut self, training: bool) {
        for (_, layer) in self.layers.iter_mut() {
            layer.set_training(training);
        }
    }
}

#[cfg(test)]
#[path = "sequential_test.rs"]
mod tests;
