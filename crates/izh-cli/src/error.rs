//! Error handling for the izh CLI

use thiserror::Error;

/// Result type for CLI operations
pub type CliResult<T> = Result<T, CliError>;

/// CLI-specific errors
#[derive(Error, Debug)]
pub enum CliError {
    /// Simulation harness error
    #[error("Runtime error: {0}")]
    Runtime(#[from] izh_runtime::RuntimeError),

    /// Configuration error
    #[error("Configuration error: {0}")]
    Config(String),

    /// IO error
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// TOML parse error
    #[error("Serialization error: {0}")]
    Serde(#[from] toml::de::Error),

    /// Generic error
    #[error("Error: {0}")]
    Generic(#[from] anyhow::Error),

    /// Invalid command arguments
    #[error("Invalid arguments: {0}")]
    InvalidArgs(String),
}

impl CliError {
    /// Create a configuration error
    pub fn config(msg: impl Into<String>) -> Self {
        Self::Config(msg.into())
    }

    /// Create an invalid arguments error
    pub fn invalid_args(msg: impl Into<String>) -> Self {
        Self::InvalidArgs(msg.into())
    }

    /// Wrap an export serialization failure
    pub fn export(err: impl std::error::Error + Send + Sync + 'static) -> Self {
        Self::Generic(anyhow::Error::new(err).context("export failed"))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_runtime_errors_convert() {
        let err: CliError = izh_runtime::RuntimeError::invalid_stimulus("empty").into();
        assert!(err.to_string().starts_with("Runtime error: Invalid stimulus pattern"));
    }

    #[test]
    fn test_helpers() {
        assert!(matches!(CliError::config("x"), CliError::Config(_)));
        assert_eq!(
            CliError::invalid_args("bincode needs --out").to_string(),
            "Invalid arguments: bincode needs --out"
        );
    }
}
