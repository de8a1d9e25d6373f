//! # Optimizers (`optim`)
//!
//! Optimizers read the gradients accumulated in [`Parameter`](crate::nn::Parameter)
//! nodes and update their values in place. Gradients are never cleared implicitly:
//! call [`Optimizer::zero_grad`] before the next backward pass.

pub mod adam;
pub mod config;
pub mod lr_scheduler;
pub mod optimizer_state;
pub mod optimizer_trait;
pub mod rmsprop;
pub mod sgd;

pub use adam::{Adam, AdamState};
pub use config::{AdamConfig, RmsPropConfig, SgdConfig};
pub use lr_scheduler::{LinearDecay, LrScheduler};
pub use optimizer_state::{ParamStateMap, StatePolicy};
pub use optimizer_trait::Optimizer;
pub use rmsprop::{RmsProp, RmsPropState};
pub use sgd::{Sgd, SgdState};
