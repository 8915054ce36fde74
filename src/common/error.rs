use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Failure of a single expression.
///
/// The first four variants are soft: the batch reports them and moves on.
/// `ArithmeticFault` is hard and is routed through the fault policy.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum EvalError {
    #[error("invalid expression: [{}]", .0.join(" "))]
    MalformedExpression(Vec<String>),

    #[error("invalid operand: {0}")]
    InvalidLeftOperand(String),

    #[error("invalid operator: {0}")]
    UnknownOperator(String),

    #[error("invalid operand: {0}")]
    InvalidRightOperand(String),

    #[error("arithmetic fault: {expression}: {reason}")]
    ArithmeticFault { expression: String, reason: String },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ErrorKind {
    MalformedExpression,
    InvalidLeftOperand,
    UnknownOperator,
    InvalidRightOperand,
    ArithmeticFault,
}

impl EvalError {
    pub fn is_soft(&self) -> bool {
        !matches!(self, EvalError::ArithmeticFault { .. })
    }

    pub fn kind(&self) -> ErrorKind {
        match self {
            EvalError::MalformedExpression(_) => ErrorKind::MalformedExpression,
            EvalError::InvalidLeftOperand(_) => ErrorKind::InvalidLeftOperand,
            EvalError::UnknownOperator(_) => ErrorKind::UnknownOperator,
            EvalError::InvalidRightOperand(_) => ErrorKind::InvalidRightOperand,
            EvalError::ArithmeticFault { .. } => ErrorKind::ArithmeticFault,
        }
    }

    /// The token the error names, if it names exactly one.
    pub fn token(&self) -> Option<&str> {
        match self {
            EvalError::InvalidLeftOperand(t)
            | EvalError::UnknownOperator(t)
            | EvalError::InvalidRightOperand(t) => Some(t),
            _ => None,
        }
    }
}

#[derive(Error, Debug)]
pub enum OpcalcError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("denominator cannot be zero")]
    DivisionByZero,

    #[error("evaluation aborted at expression {index}: {error}")]
    Aborted { index: usize, error: EvalError },
}

pub type Result<T> = std::result::Result<T, OpcalcError>;
