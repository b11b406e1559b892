//! Crate-wide error type.
//!
//! Grounded on helium's `api::errors::QueryError` (`src/api/errors.rs`): a
//! small enum wrapping each subsystem's own error type behind a manual
//! `Display`/`Error` impl and `From` conversions, so callers of
//! [`crate::set::IndexedSet::filter`] see one error type regardless of which
//! stage failed.

use crate::parse::ParseError;
use std::fmt;

#[derive(Debug, Clone, PartialEq)]
pub enum Error {
    Parse(ParseError),
    /// An index was asked for an operation it does not support (e.g. `range`
    /// on a `HashIndex`). The optimizer is responsible for never producing
    /// such a plan; seeing this means a custom rule built one anyway.
    UnsupportedIndexOperation {
        index: String,
        operation: &'static str,
    },
}

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Error::Parse(e) => write!(f, "parse error: {e}"),
            Error::UnsupportedIndexOperation { index, operation } => {
                write!(f, "{index} does not support `{operation}`")
            }
        }
    }
}

impl std::error::Error for Error {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Error::Parse(e) => Some(e),
            Error::UnsupportedIndexOperation { .. } => None,
        }
    }
}

impl From<ParseError> for Error {
    fn from(e: ParseError) -> Self {
        Error::Parse(e)
    }
}
