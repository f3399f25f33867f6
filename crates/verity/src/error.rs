use thiserror::Error;
use verity_types::ConfigError;

/// Errors produced by checks.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum CheckError {
    /// The check did not hold. The payload is the full failure message,
    /// starting with a line break.
    #[error("{0}")]
    Failed(String),

    #[error("invalid argument: {0}")]
    InvalidArgument(String),

    #[error("invalid operation: {0}")]
    InvalidOperation(String),

    #[error("configuration error: {0}")]
    Config(#[from] ConfigError),
}

impl CheckError {
    /// Returns `true` for a failed check, as opposed to a misuse of the API.
    pub fn is_failure(&self) -> bool {
        matches!(self, Self::Failed(_))
    }
}

pub type CheckResult<T> = Result<T, CheckError>;
