//! Reductions of a whole tensor to a 0-d scalar.

pub mod mean;
pub mod sum;

pub use mean::{mean, MeanOp};
pub use sum::{sum, SumOp};
