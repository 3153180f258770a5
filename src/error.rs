use std::io;

use thiserror::Error;

#[non_exhaustive]
#[derive(Debug, Error)]
pub enum DecodeError {
    #[error("failed to read data")]
    ReadFailure {
        #[source]
        source: io::Error,
    },
    /// The header is missing its closing bracket, or is followed by something other than a
    /// comment.
    #[error("Invalid section header on line {line}: {header:?}")]
    InvalidSectionHeader { line: usize, header: String },
}

impl DecodeError {
    /// The 1-based line the error was found on, if it came from the text itself.
    #[must_use]
    pub fn line(&self) -> Option<usize> {
        match *self {
            Self::InvalidSectionHeader { line, .. } => Some(line),
            Self::ReadFailure { .. } => None,
        }
    }
}
