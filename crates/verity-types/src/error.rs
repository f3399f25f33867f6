use thiserror::Error;

/// Errors produced while building or loading a check configuration.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum ConfigError {
    #[error("string truncation length must be at least {minimum}, got {requested}")]
    InvalidTruncationLength { requested: usize, minimum: usize },

    #[error("collection display length must be at least 1")]
    InvalidMaxItems,

    #[error("configuration parse error: {0}")]
    Parse(String),
}

/// Convenience alias for configuration results.
pub type ConfigResult<T> = Result<T, ConfigError>;
