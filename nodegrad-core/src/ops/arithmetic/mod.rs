pub mod add;
pub mod matmul;
pub mod mul;

pub use add::{add, AddOp};
pub use matmul::{matmul, MatmulOp};
pub use mul::{mul, MulOp};
