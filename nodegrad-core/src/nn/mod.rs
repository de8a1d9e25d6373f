//! # Neural network building blocks (`nn`)
//!
//! Trainable [`Parameter`]s, initializers and the [`Layer`] abstraction used to
//! assemble feed-forward networks with [`Sequential`].

pub mod init;
pub mod layers;
pub mod parameter;
pub mod sequential;

pub use layers::{Activation, ActivationKind, BatchNorm, Dropout, Layer, Linear};
pub use parameter::Parameter;
pub use sequential::Sequential;
