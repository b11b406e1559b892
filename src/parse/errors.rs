//! Grounded on helium's hand-written error enums (`src/api/errors.rs`,
//! `src/optimizer/errors.rs`): a plain enum with a manual `Display`/`Error`
//! impl, no `thiserror`, since helium reserves `anyhow` for the CLI
//! boundary and writes its library-facing errors by hand.

use std::fmt;

#[derive(Debug, Clone, PartialEq)]
pub enum ParseError {
    UnexpectedToken { found: String, expected: &'static str },
    UnexpectedEof { expected: &'static str },
    InvalidNumber(String),
}

impl fmt::Display for ParseError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ParseError::UnexpectedToken { found, expected } => {
                write!(f, "unexpected token `{found}`, expected {expected}")
            }
            ParseError::UnexpectedEof { expected } => {
                write!(f, "unexpected end of input, expected {expected}")
            }
            ParseError::InvalidNumber(text) => write!(f, "invalid number literal `{text}`"),
        }
    }
}

impl std::error::Error for ParseError {}
