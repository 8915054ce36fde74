use crate::arith;
use crate::common::{BatchSummary, Config, OutputFormat};
use crate::eval::{Evaluator, Expression, Registry};
use crate::stream;
use anyhow::{Context, Result};
use colored::*;
use std::io::Write;
use std::path::Path;

/// Expressions evaluated by `demo`.
pub const DEMO_EXPRESSIONS: &[&[&str]] = &[
    &["10", "+", "5"],
    &["20", "-", "4"],
    &["3", "*", "7"],
    &["16", "/", "2"],
    &["two", "+", "zero"],
    &["5"],
];

pub struct CommandExecutor {
    config: Config,
    evaluator: Evaluator,
}

impl CommandExecutor {
    pub fn new(config: Config) -> Self {
        let evaluator = Evaluator::new(Registry::standard(), config.evaluator.fault_policy);
        CommandExecutor { config, evaluator }
    }

    pub fn config(&self) -> &Config {
        &self.config
    }

    pub fn evaluate<W: Write>(&self, exprs: &[Expression], out: &mut W) -> Result<BatchSummary> {
        let format = self.config.output.format;
        let summary = self.evaluator.run_batch(exprs, format, out)?;

        if let Some(line) = self.summary_line(&summary) {
            if summary.failed == 0 {
                eprintln!("{}", line.green());
            } else {
                eprintln!("{}", line.yellow());
            }
        }

        Ok(summary)
    }

    /// Summary for stderr. Text mode only, and only for batches of two or
    /// more; a single expression's line already says everything.
    pub fn summary_line(&self, summary: &BatchSummary) -> Option<String> {
        if self.config.output.format == OutputFormat::Text && summary.total > 1 {
            Some(summary.to_string())
        } else {
            None
        }
    }

    pub fn eval_lines<W: Write>(&self, lines: &[String], out: &mut W) -> Result<BatchSummary> {
        let exprs: Vec<Expression> = lines.iter().map(|l| Expression::parse(l)).collect();
        self.evaluate(&exprs, out)
    }

    pub fn eval_file<W: Write>(&self, path: &Path, out: &mut W) -> Result<BatchSummary> {
        let exprs = stream::load_expressions(path)?;
        log::info!("loaded {} expression(s) from {:?}", exprs.len(), path);
        self.evaluate(&exprs, out)
    }

    pub fn demo<W: Write>(&self, out: &mut W) -> Result<BatchSummary> {
        let exprs: Vec<Expression> = DEMO_EXPRESSIONS
            .iter()
            .map(|tokens| Expression::new(tokens.iter().copied()))
            .collect();
        self.evaluate(&exprs, out)
    }

    pub fn divmod<W: Write>(&self, numerator: i64, denominator: i64, out: &mut W) -> Result<()> {
        let (quotient, remainder) = arith::div_and_remainder(numerator, denominator)?;
        writeln!(out, "{} {}", quotient, remainder)?;
        Ok(())
    }

    pub fn add_to<W: Write>(&self, base: i64, vals: &[i64], out: &mut W) -> Result<()> {
        let sums = arith::add_to(base, vals);
        let joined: Vec<String> = sums.iter().map(i64::to_string).collect();
        writeln!(out, "[{}]", joined.join(" "))?;
        Ok(())
    }

    pub fn mult<W: Write>(&self, base: i64, count: u32, out: &mut W) -> Result<()> {
        let times = arith::make_mult(base);
        for i in 0..i64::from(count) {
            writeln!(out, "{}", times(i))?;
        }
        Ok(())
    }

    pub fn cat<W: Write>(&self, path: &Path, out: &mut W) -> Result<u64> {
        let mut file = stream::open_file(path)?;
        let copied = stream::copy_chunks(&mut file, out)
            .with_context(|| format!("Failed to stream {:?}", path))?;
        log::debug!("streamed {} bytes from {:?}", copied, path);
        Ok(copied)
    }

    pub fn config_init(&self, path: &Path) -> Result<()> {
        if path.exists() {
            anyhow::bail!("Config file {:?} already exists", path);
        }
        Config::default().save(path)?;

        println!("{}", "✅ Config written".green());
        println!("   Path: {}", path.display().to_string().bright_cyan());
        Ok(())
    }

    pub fn config_show<W: Write>(&self, out: &mut W) -> Result<()> {
        let text = toml::to_string_pretty(&self.config).context("Failed to serialize config")?;
        write!(out, "{}", text)?;
        Ok(())
    }

    pub fn show_help(&self) {
        println!("{}", "Available Commands:".bold().underline());
        println!();
        println!("  {}  {}", "<a> <op> <b>".cyan(), "Evaluate an expression (op is + - * /)");
        println!("  {}  {}", "divmod <n> <d>".cyan(), "Quotient and remainder");
        println!("  {}  {}", "add-to <base> [vals...]".cyan(), "Add base to each value");
        println!("  {}  {}", "mult <base> [count]".cyan(), "Multiples of base");
        println!();
        println!("  {}  {}", "help".cyan(), "Show this help message");
        println!("  {}  {}", "exit/quit".cyan(), "Exit the shell");
    }
}
