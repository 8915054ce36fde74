/// An ordered list of tokens, nominally `left operator right`.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct Expression {
    tokens: Vec<String>,
}

impl Expression {
    pub fn new<I, S>(tokens: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Expression {
            tokens: tokens.into_iter().map(Into::into).collect(),
        }
    }

    /// Split a line on whitespace.
    pub fn parse(line: &str) -> Self {
        Self::new(line.split_whitespace())
    }

    pub fn tokens(&self) -> &[String] {
        &self.tokens
    }
}

impl From<&str> for Expression {
    fn from(line: &str) -> Self {
        Self::parse(line)
    }
}

impl std::fmt::Display for Expression {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.tokens.join(" "))
    }
}
