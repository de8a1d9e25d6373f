//! Element-wise activations and the last-axis softmax.

pub mod leaky_relu;
pub mod relu;
pub mod sigmoid;
pub mod softmax;
pub mod tanh;

pub use leaky_relu::{leaky_relu, LeakyReluOp, DEFAULT_NEGATIVE_SLOPE};
pub use relu::{relu, ReluOp};
pub use sigmoid::{sigmoid, SigmoidOp};
pub use softmax::{softmax, SoftmaxOp};
pub use tanh::{tanh, TanhOp};
