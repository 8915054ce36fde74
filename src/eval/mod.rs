//! Three-token integer expression evaluator.

use crate::common::error::{EvalError, OpcalcError, Result};
use crate::common::types::{BatchSummary, FaultPolicy, Outcome, OutputFormat};
use std::io::Write;

mod expr;
mod ops;

pub use expr::Expression;
pub use ops::{OpFn, Operator, Registry};

/// A successfully computed expression.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Evaluation {
    pub left: i64,
    pub operator: Operator,
    pub right: i64,
    pub value: i64,
}

impl std::fmt::Display for Evaluation {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{} {} {} = {}", self.left, self.operator, self.right, self.value)
    }
}

#[derive(Debug, Clone, Default)]
pub struct Evaluator {
    registry: Registry,
    policy: FaultPolicy,
}

impl Evaluator {
    pub fn new(registry: Registry, policy: FaultPolicy) -> Self {
        Evaluator { registry, policy }
    }

    pub fn policy(&self) -> FaultPolicy {
        self.policy
    }

    /// Evaluate one expression. Checks run in order: token count, left
    /// operand, operator, right operand; the first failure wins.
    pub fn evaluate(&self, expr: &Expression) -> std::result::Result<Evaluation, EvalError> {
        let [left, op, right] = expr.tokens() else {
            return Err(EvalError::MalformedExpression(expr.tokens().to_vec()));
        };

        let left: i64 = left
            .parse()
            .map_err(|_| EvalError::InvalidLeftOperand(left.clone()))?;

        let (operator, f) = self
            .registry
            .lookup(op)
            .ok_or_else(|| EvalError::UnknownOperator(op.clone()))?;

        let right: i64 = right
            .parse()
            .map_err(|_| EvalError::InvalidRightOperand(right.clone()))?;

        let value = f(left, right).ok_or_else(|| EvalError::ArithmeticFault {
            expression: format!("{} {} {}", left, operator, right),
            reason: "integer divide by zero".to_string(),
        })?;

        Ok(Evaluation {
            left,
            operator,
            right,
            value,
        })
    }

    /// Evaluate every expression in order, writing one line per expression.
    ///
    /// Soft errors are written and skipped. Under [`FaultPolicy::Abort`] an
    /// arithmetic fault stops the batch with [`OpcalcError::Aborted`] after
    /// the preceding lines have been flushed.
    pub fn run_batch<W: Write>(
        &self,
        exprs: &[Expression],
        format: OutputFormat,
        out: &mut W,
    ) -> Result<BatchSummary> {
        let mut summary = BatchSummary::default();

        for (index, expr) in exprs.iter().enumerate() {
            let result = self.evaluate(expr);
            log::debug!("[{}] {:?} -> {:?}", index, expr.tokens(), result);

            if let Err(e) = &result {
                if !e.is_soft() {
                    log::warn!("fault in expression {}: {}", index, e);
                    if self.policy == FaultPolicy::Abort {
                        out.flush()?;
                        return Err(OpcalcError::Aborted {
                            index,
                            error: e.clone(),
                        });
                    }
                }
            }

            match format {
                OutputFormat::Text => match &result {
                    Ok(ev) => writeln!(out, "{}", ev)?,
                    Err(e) => writeln!(out, "{}", e)?,
                },
                OutputFormat::Json => {
                    let line = serde_json::to_string(&Outcome::new(expr, &result))?;
                    writeln!(out, "{}", line)?;
                }
            }

            summary.record(result.is_ok());
        }

        out.flush()?;
        log::info!("batch finished: {}", summary);
        Ok(summary)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn eval(tokens: &[&str]) -> std::result::Result<Evaluation, EvalError> {
        Evaluator::default().evaluate(&Expression::new(tokens.iter().copied()))
    }

    fn run(lines: &[&str], policy: FaultPolicy) -> (String, Result<BatchSummary>) {
        let exprs: Vec<Expression> = lines.iter().map(|l| Expression::parse(l)).collect();
        let evaluator = Evaluator::new(Registry::standard(), policy);
        let mut out = Vec::new();
        let res = evaluator.run_batch(&exprs, OutputFormat::Text, &mut out);
        (String::from_utf8(out).unwrap(), res)
    }

    #[test]
    fn test_basic_operations() {
        assert_eq!(eval(&["10", "+", "5"]).unwrap().to_string(), "10 + 5 = 15");
        assert_eq!(eval(&["20", "-", "4"]).unwrap().value, 16);
        assert_eq!(eval(&["3", "*", "7"]).unwrap().value, 21);
        assert_eq!(eval(&["20", "/", "4"]).unwrap().to_string(), "20 / 4 = 5");
        assert_eq!(eval(&["7", "/", "2"]).unwrap().to_string(), "7 / 2 = 3");
        assert_eq!(eval(&["-7", "/", "2"]).unwrap().value, -3);
    }

    #[test]
    fn test_prints_parsed_operands() {
        assert_eq!(eval(&["+5", "-", "007"]).unwrap().to_string(), "5 - 7 = -2");
    }

    #[test]
    fn test_wrong_token_count() {
        assert_eq!(
            eval(&["5"]),
            Err(EvalError::MalformedExpression(vec!["5".to_string()]))
        );
        assert!(matches!(eval(&[]), Err(EvalError::MalformedExpression(_))));
        assert!(matches!(
            eval(&["1", "+", "2", "+", "3"]),
            Err(EvalError::MalformedExpression(t)) if t.len() == 5
        ));
    }

    #[test]
    fn test_left_operand_checked_before_operator() {
        assert_eq!(
            eval(&["two", "%", "zero"]),
            Err(EvalError::InvalidLeftOperand("two".to_string()))
        );
    }

    #[test]
    fn test_operator_checked_before_right_operand() {
        assert_eq!(
            eval(&["2", "%", "zero"]),
            Err(EvalError::UnknownOperator("%".to_string()))
        );
        assert_eq!(
            eval(&["2", "+", "zero"]),
            Err(EvalError::InvalidRightOperand("zero".to_string()))
        );
    }

    #[test]
    fn test_out_of_range_operand_is_invalid() {
        assert_eq!(
            eval(&["9223372036854775808", "+", "1"]),
            Err(EvalError::InvalidLeftOperand("9223372036854775808".to_string()))
        );
    }

    #[test]
    fn test_divide_by_zero_is_a_fault() {
        let err = eval(&["7", "/", "0"]).unwrap_err();
        assert!(!err.is_soft());
        assert_eq!(err.to_string(), "arithmetic fault: 7 / 0: integer divide by zero");
    }

    #[test]
    fn test_batch_continues_past_soft_errors() {
        let (out, res) = run(
            &["10 + 5", "two + zero", "5", "4 ^ 2", "16 / 2"],
            FaultPolicy::Abort,
        );
        assert_eq!(
            out,
            "10 + 5 = 15\ninvalid operand: two\ninvalid expression: [5]\ninvalid operator: ^\n16 / 2 = 8\n"
        );
        let summary = res.unwrap();
        assert_eq!(summary.total, 5);
        assert_eq!(summary.succeeded, 2);
        assert_eq!(summary.failed, 3);
    }

    #[test]
    fn test_abort_policy_stops_at_fault() {
        let (out, res) = run(&["1 + 1", "7 / 0", "2 + 2"], FaultPolicy::Abort);
        assert_eq!(out, "1 + 1 = 2\n");
        match res {
            Err(OpcalcError::Aborted { index, error }) => {
                assert_eq!(index, 1);
                assert!(!error.is_soft());
            }
            other => panic!("expected abort, got {:?}", other),
        }
    }

    #[test]
    fn test_report_policy_continues() {
        let (out, res) = run(&["1 + 1", "7 / 0", "2 + 2"], FaultPolicy::Report);
        assert_eq!(
            out,
            "1 + 1 = 2\narithmetic fault: 7 / 0: integer divide by zero\n2 + 2 = 4\n"
        );
        assert_eq!(res.unwrap().failed, 1);
    }

    #[test]
    fn test_rerun_is_identical() {
        let lines = ["10 + 5", "two + zero", "5", "3 * 7"];
        let (first, _) = run(&lines, FaultPolicy::Abort);
        let (second, _) = run(&lines, FaultPolicy::Abort);
        assert_eq!(first, second);
    }

    #[test]
    fn test_json_lines() {
        let exprs = vec![Expression::parse("10 + 5"), Expression::parse("two + zero")];
        let mut out = Vec::new();
        Evaluator::default()
            .run_batch(&exprs, OutputFormat::Json, &mut out)
            .unwrap();

        let text = String::from_utf8(out).unwrap();
        let outcomes: Vec<Outcome> = text
            .lines()
            .map(|l| serde_json::from_str(l).unwrap())
            .collect();

        assert_eq!(
            text.lines().next().unwrap(),
            r#"{"status":"ok","expression":"10 + 5","left":10,"operator":"+","right":5,"value":15}"#
        );
        assert!(outcomes[0].is_ok());
        assert!(matches!(
            &outcomes[1],
            Outcome::Error { token: Some(t), .. } if t == "two"
        ));
    }
}
