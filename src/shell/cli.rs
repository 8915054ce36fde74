use crate::common::{Config, OutputFormat};
use crate::shell::commands::CommandExecutor;
use anyhow::Result;
use clap::{Parser, Subcommand};
use std::io;
use std::path::PathBuf;

#[derive(Parser)]
#[command(name = "opcalc")]
#[command(about = "Batch evaluator for `operand operator operand` expressions", long_about = None)]
pub struct Cli {
    /// Path to a TOML config file (default: ./opcalc.toml, then ~/.config/opcalc/config.toml)
    #[arg(long, global = true)]
    pub config: Option<PathBuf>,

    /// Output format
    #[arg(long, value_enum, global = true)]
    pub format: Option<OutputFormat>,

    /// Report division by zero and keep going instead of aborting
    #[arg(long, global = true)]
    pub recover_faults: bool,

    /// Disable colored output
    #[arg(long, global = true)]
    pub no_color: bool,

    #[command(subcommand)]
    pub command: Option<Commands>,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Evaluate expressions given as arguments, e.g. "10 + 5"
    ///
    /// Put expressions that start with `-` after `--`: opcalc eval -- "-5 + 3"
    Eval {
        /// One expression per argument
        #[arg(required = true)]
        exprs: Vec<String>,
    },

    /// Evaluate every expression line in a file
    Batch {
        /// Path to the expression file
        file: PathBuf,
    },

    /// Evaluate the built-in sample expressions
    Demo,

    /// Print quotient and remainder
    Divmod {
        #[arg(allow_negative_numbers = true)]
        numerator: i64,
        #[arg(allow_negative_numbers = true)]
        denominator: i64,
    },

    /// Add a base to each of the given values
    AddTo {
        #[arg(allow_negative_numbers = true)]
        base: i64,
        #[arg(allow_negative_numbers = true)]
        vals: Vec<i64>,
    },

    /// Print multiples of a base
    Mult {
        #[arg(allow_negative_numbers = true)]
        base: i64,

        /// How many multiples to print, starting at zero
        #[arg(long, default_value = "3")]
        count: u32,
    },

    /// Stream a file to stdout
    Cat {
        file: PathBuf,
    },

    /// Config file operations
    Config {
        #[command(subcommand)]
        action: ConfigCommands,
    },
}

#[derive(Subcommand)]
pub enum ConfigCommands {
    /// Write the default config
    Init {
        #[arg(default_value = "opcalc.toml")]
        path: PathBuf,
    },

    /// Print the effective config
    Show,
}

/// Merge the config file with command line overrides.
pub fn resolve_config(cli: &Cli) -> Result<Config> {
    let mut config = match &cli.config {
        Some(path) => Config::load(path)?,
        None => Config::load_default()?,
    };

    if let Some(format) = cli.format {
        config.output.format = format;
    }
    if cli.recover_faults {
        config.evaluator.fault_policy = crate::common::FaultPolicy::Report;
    }
    if cli.no_color {
        config.output.color = false;
    }

    Ok(config)
}

pub fn run_cli(cli: Cli) -> Result<()> {
    let config = resolve_config(&cli)?;
    colored::control::set_override(config.output.color);

    let executor = CommandExecutor::new(config);
    let stdout = io::stdout();
    let mut out = stdout.lock();

    match cli.command {
        Some(Commands::Eval { exprs }) => {
            executor.eval_lines(&exprs, &mut out)?;
        }
        Some(Commands::Batch { file }) => {
            executor.eval_file(&file, &mut out)?;
        }
        Some(Commands::Demo) => {
            executor.demo(&mut out)?;
        }
        Some(Commands::Divmod {
            numerator,
            denominator,
        }) => {
            executor.divmod(numerator, denominator, &mut out)?;
        }
        Some(Commands::AddTo { base, vals }) => {
            executor.add_to(base, &vals, &mut out)?;
        }
        Some(Commands::Mult { base, count }) => {
            executor.mult(base, count, &mut out)?;
        }
        Some(Commands::Cat { file }) => {
            executor.cat(&file, &mut out)?;
        }
        Some(Commands::Config { action }) => match action {
            ConfigCommands::Init { path } => {
                executor.config_init(&path)?;
            }
            ConfigCommands::Show => {
                executor.config_show(&mut out)?;
            }
        },
        None => {
            drop(out);
            crate::shell::repl::run_repl(&executor)?;
        }
    }

    Ok(())
}
