pub mod cli;
pub mod repl;
pub mod commands;

pub use cli::run_cli;
pub use repl::run_repl;
