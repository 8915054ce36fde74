use crate::common::error::{ErrorKind, EvalError};
use crate::eval::{Evaluation, Expression, Operator};
use serde::{Deserialize, Serialize};

/// What to do when an operation faults (division by zero).
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FaultPolicy {
    /// Stop the batch after flushing the lines produced so far.
    #[default]
    Abort,
    /// Print the fault like a soft error and continue.
    Report,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize, clap::ValueEnum)]
#[serde(rename_all = "snake_case")]
pub enum OutputFormat {
    #[default]
    Text,
    Json,
}

/// One line of batch output in machine-readable form.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "status", rename_all = "snake_case")]
pub enum Outcome {
    Ok {
        expression: String,
        left: i64,
        operator: Operator,
        right: i64,
        value: i64,
    },
    Error {
        expression: String,
        kind: ErrorKind,
        #[serde(skip_serializing_if = "Option::is_none", default)]
        token: Option<String>,
        message: String,
    },
}

impl Outcome {
    pub fn new(expr: &Expression, result: &Result<Evaluation, EvalError>) -> Self {
        match result {
            Ok(ev) => Outcome::Ok {
                expression: expr.to_string(),
                left: ev.left,
                operator: ev.operator,
                right: ev.right,
                value: ev.value,
            },
            Err(e) => Outcome::Error {
                expression: expr.to_string(),
                kind: e.kind(),
                token: e.token().map(str::to_string),
                message: e.to_string(),
            },
        }
    }

    pub fn is_ok(&self) -> bool {
        matches!(self, Outcome::Ok { .. })
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct BatchSummary {
    pub total: usize,
    pub succeeded: usize,
    pub failed: usize,
}

impl BatchSummary {
    pub fn record(&mut self, ok: bool) {
        self.total += 1;
        if ok {
            self.succeeded += 1;
        } else {
            self.failed += 1;
        }
    }
}

impl std::fmt::Display for BatchSummary {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "{} evaluated, {} ok, {} failed",
            self.total, self.succeeded, self.failed
        )
    }
}
