use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::str::FromStr;

/// Binary integer operation. `None` means the operation faulted.
pub type OpFn = fn(i64, i64) -> Option<i64>;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Operator {
    #[serde(rename = "+")]
    Add,
    #[serde(rename = "-")]
    Sub,
    #[serde(rename = "*")]
    Mul,
    #[serde(rename = "/")]
    Div,
}

impl Operator {
    pub const ALL: [Operator; 4] = [Operator::Add, Operator::Sub, Operator::Mul, Operator::Div];

    pub fn symbol(self) -> &'static str {
        match self {
            Operator::Add => "+",
            Operator::Sub => "-",
            Operator::Mul => "*",
            Operator::Div => "/",
        }
    }
}

impl FromStr for Operator {
    type Err = ();

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Operator::ALL
            .into_iter()
            .find(|op| op.symbol() == s)
            .ok_or(())
    }
}

impl std::fmt::Display for Operator {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.symbol())
    }
}

fn add(l: i64, r: i64) -> Option<i64> {
    Some(l.wrapping_add(r))
}

fn sub(l: i64, r: i64) -> Option<i64> {
    Some(l.wrapping_sub(r))
}

fn mul(l: i64, r: i64) -> Option<i64> {
    Some(l.wrapping_mul(r))
}

// Truncates toward zero; i64::MIN / -1 wraps.
fn div(l: i64, r: i64) -> Option<i64> {
    if r == 0 {
        None
    } else {
        Some(l.wrapping_div(r))
    }
}

/// Operator symbol to function table, assembled before a run and read-only after.
#[derive(Debug, Clone)]
pub struct Registry {
    ops: HashMap<Operator, OpFn>,
}

impl Registry {
    pub fn empty() -> Self {
        Registry { ops: HashMap::new() }
    }

    /// `+ - * /` with two's-complement semantics.
    pub fn standard() -> Self {
        Self::empty()
            .with(Operator::Add, add)
            .with(Operator::Sub, sub)
            .with(Operator::Mul, mul)
            .with(Operator::Div, div)
    }

    pub fn with(mut self, op: Operator, f: OpFn) -> Self {
        self.ops.insert(op, f);
        self
    }

    /// Resolve a symbol. Symbols that parse but are not registered miss too.
    pub fn lookup(&self, symbol: &str) -> Option<(Operator, OpFn)> {
        let op: Operator = symbol.parse().ok()?;
        self.ops.get(&op).map(|f| (op, *f))
    }

    pub fn len(&self) -> usize {
        self.ops.len()
    }

    pub fn is_empty(&self) -> bool {
        self.ops.is_empty()
    }
}

impl Default for Registry {
    fn default() -> Self {
        Self::standard()
    }
}
