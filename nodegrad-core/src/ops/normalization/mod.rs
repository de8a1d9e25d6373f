pub mod batch_norm;

pub use batch_norm::{batch_norm, BatchNormOp, BatchStatistics, DEFAULT_EPSILON};
