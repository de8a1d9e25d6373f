//! # Tensor substrate
//!
//! Node values and gradients are dense `f64` arrays of dynamic rank backed by
//! [`ndarray`]. This module only adds the glue the autograd engine needs on top of
//! it: fallible creation helpers and the broadcasting rules used by binary
//! operations and their backward passes.

use ndarray::ArrayD;

pub mod broadcast_utils;
pub mod create;

pub use broadcast_utils::{broadcast_binary, broadcast_shapes, reduce_to_shape};
pub use create::{from_vec, full, ones, scalar, scalar_value, zeros, zeros_like};

/// Dense dynamic-rank array holding a node value or gradient.
pub type Tensor = ArrayD<f64>;
