pub mod dropout;
pub mod l2_penalty;

pub use dropout::{dropout, DropoutOp};
pub use l2_penalty::{l2_penalty, L2PenaltyOp};
