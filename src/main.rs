use clap::Parser;
use colored::*;
use opcalc::shell::{cli::Cli, run_cli};

fn main() {
    env_logger::init();

    let cli = Cli::parse();
    if let Err(e) = run_cli(cli) {
        eprintln!("{} {:#}", "opcalc:".red().bold(), e);
        std::process::exit(1);
    }
}
