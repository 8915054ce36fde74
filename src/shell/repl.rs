use crate::common::OpcalcError;
use crate::eval::Expression;
use crate::shell::commands::CommandExecutor;
use anyhow::Result;
use colored::*;
use rustyline::error::ReadlineError;
use rustyline::DefaultEditor;
use std::io;

/// Whether the session continues after a line.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Flow {
    Continue,
    Exit,
}

pub fn run_repl(executor: &CommandExecutor) -> Result<()> {
    println!("{}", "opcalc interactive shell".bright_green().bold());
    println!("Type 'help' for available commands, 'exit' to quit\n");

    let mut rl: DefaultEditor = DefaultEditor::new()?;

    let history_file = dirs::home_dir().map(|h| h.join(&executor.config().repl.history_file));

    if let Some(ref path) = history_file {
        let _ = rl.load_history(path);
    }

    let prompt = executor.config().repl.prompt.clone();

    loop {
        match rl.readline(&prompt) {
            Ok(line) => {
                let line = line.trim();

                if line.is_empty() {
                    continue;
                }

                let _ = rl.add_history_entry(line);

                let stdout = io::stdout();
                let mut out = stdout.lock();
                match handle_line(executor, line, &mut out) {
                    Ok(Flow::Exit) => break,
                    Ok(Flow::Continue) => {}
                    Err(e) => eprintln!("{} {:#}", "Error:".red().bold(), e),
                }
            }
            Err(ReadlineError::Interrupted) => {
                println!("^C");
                continue;
            }
            Err(ReadlineError::Eof) => {
                println!("exit");
                break;
            }
            Err(err) => {
                eprintln!("Error: {:?}", err);
                break;
            }
        }
    }

    if let Some(ref path) = history_file {
        let _ = rl.save_history(path);
    }

    println!("{}", "Goodbye!".bright_green());
    Ok(())
}

/// Run one REPL line. Keywords are matched first; anything else is an expression.
pub fn handle_line<W: io::Write>(
    executor: &CommandExecutor,
    line: &str,
    out: &mut W,
) -> Result<Flow> {
    let parts: Vec<&str> = line.split_whitespace().collect();

    match parts.as_slice() {
        [] => {}
        ["help"] => executor.show_help(),
        ["exit"] | ["quit"] => return Ok(Flow::Exit),
        ["divmod", rest @ ..] => {
            let [n, d] = rest else {
                eprintln!("Usage: divmod <numerator> <denominator>");
                return Ok(Flow::Continue);
            };
            executor.divmod(n.parse::<i64>()?, d.parse::<i64>()?, out)?;
        }
        ["add-to", base, vals @ ..] => {
            let vals = vals
                .iter()
                .map(|v| v.parse::<i64>())
                .collect::<std::result::Result<Vec<_>, _>>()?;
            executor.add_to(base.parse::<i64>()?, &vals, out)?;
        }
        ["mult", base, rest @ ..] => {
            let count = match rest {
                [] => 3,
                [count] => count.parse::<u32>()?,
                _ => {
                    eprintln!("Usage: mult <base> [count]");
                    return Ok(Flow::Continue);
                }
            };
            executor.mult(base.parse::<i64>()?, count, out)?;
        }
        _ => {
            let expr = Expression::parse(line);
            // A fault ends this line only; the session keeps going.
            if let Err(e) = executor.evaluate(std::slice::from_ref(&expr), out) {
                match e.downcast_ref::<OpcalcError>() {
                    Some(OpcalcError::Aborted { error, .. }) => {
                        eprintln!("{} {}", "Fault:".red().bold(), error);
                    }
                    _ => return Err(e),
                }
            }
        }
    }

    Ok(Flow::Continue)
}
