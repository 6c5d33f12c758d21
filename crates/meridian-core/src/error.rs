use thiserror::Error;

/// Top-level error type for the Meridian service.
///
/// Crates with their own error enums convert into this one at the binary
/// boundary so `?` works from `main`.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum MeridianError {
    #[error("Configuration error: {0}")]
    Config(String),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Server error: {0}")]
    Server(String),
}

impl From<toml::de::Error> for MeridianError {
    fn from(err: toml::de::Error) -> Self {
        MeridianError::Config(err.to_string())
    }
}

impl From<toml::ser::Error> for MeridianError {
    fn from(err: toml::ser::Error) -> Self {
        MeridianError::Config(err.to_string())
    }
}

/// A specialized `Result` type for Meridian operations.
pub type Result<T> = std::result::Result<T, MeridianError>;
