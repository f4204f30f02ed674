//! Error types for configuration loading and validation.

use std::path::PathBuf;

use thiserror::Error;

pub type Result<T> = std::result::Result<T, ConfigError>;

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("config file not found: {}", .0.display())]
    NotFound(PathBuf),

    #[error("invalid config value for '{field}': {hint}")]
    InvalidValue { field: String, hint: String },

    // Boxed: figment errors carry their full provenance chain.
    #[error("failed to extract configuration: {0}")]
    Extract(#[from] Box<figment::Error>),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

impl From<figment::Error> for ConfigError {
    fn from(err: figment::Error) -> Self {
        Self::Extract(Box::new(err))
    }
}

impl ConfigError {
    pub(crate) fn invalid(field: impl Into<String>, hint: impl Into<String>) -> Self {
        Self::InvalidValue {
            field: field.into(),
            hint: hint.into(),
        }
    }
}
