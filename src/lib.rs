// Library exports for the binary and tests

pub mod arith;
pub mod common;
pub mod eval;
pub mod shell;
pub mod stream;

pub use common::{EvalError, OpcalcError};
pub use eval::{Evaluation, Evaluator, Expression, Operator, Registry};
