// Error handling for uritemplate

use std::fmt;
use thiserror::Error;

/// Crate-wide result alias
pub type Result<T> = std::result::Result<T, Error>;

/// Everything that can go wrong while parsing or expanding a template
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum Error {
    /// Malformed template text: bad expression grammar, an illegal literal
    /// character or an unknown operator symbol.
    #[error("Syntax error: {0}")]
    Syntax(#[from] SyntaxError),

    /// A well-formed template that cannot be expanded with the given values.
    #[error("Expanding error: {0}")]
    Expanding(String),

    /// Variable bindings that could not be loaded into the value model.
    #[error("Invalid values: {0}")]
    InvalidValues(String),
}

impl Error {
    pub(crate) fn expanding(message: impl Into<String>) -> Self {
        Error::Expanding(message.into())
    }

    pub fn is_syntax(&self) -> bool {
        matches!(self, Error::Syntax(_))
    }

    pub fn is_expanding(&self) -> bool {
        matches!(self, Error::Expanding(_))
    }
}

/// Diagnostic details for a syntax failure
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SyntaxError {
    pub message: String,
    /// What the grammar would have accepted at `position`
    pub expected: Option<String>,
    /// What was actually there (`None` at end of input)
    pub found: Option<String>,
    /// Byte offset into the template source
    pub position: Option<usize>,
}

impl SyntaxError {
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
            expected: None,
            found: None,
            position: None,
        }
    }

    pub fn at(mut self, position: usize) -> Self {
        self.position = Some(position);
        self
    }

    pub fn expected(mut self, expected: impl Into<String>) -> Self {
        self.expected = Some(expected.into());
        self
    }

    pub fn found(mut self, found: Option<char>) -> Self {
        self.found = found.map(|ch| ch.to_string());
        self
    }
}

impl fmt::Display for SyntaxError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.message)?;
        if let Some(expected) = &self.expected {
            match &self.found {
                Some(found) => write!(f, " (expected {} but found '{}')", expected, found)?,
                None => write!(f, " (expected {} but found end of input)", expected)?,
            }
        }
        if let Some(position) = self.position {
            write!(f, " at position {}", position)?;
        }
        Ok(())
    }
}

impl std::error::Error for SyntaxError {}
