pub mod config;
pub mod types;
pub mod error;

pub use config::Config;
pub use error::{EvalError, OpcalcError};
pub use types::{BatchSummary, FaultPolicy, Outcome, OutputFormat};
