//! Unified error type for the alarm controller.
//!
//! The rules themselves never fail. Everything that can fail lives behind a
//! port, and each port error converts into [`Error`] so service operations
//! can propagate with `?` and callers match on one type.

use core::fmt;

use crate::app::ports::{AnalyzerError, ConfigError, RepositoryError, StorageError};
use crate::sensors::SensorName;

/// Every fallible service operation funnels into this type.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Error {
    /// The state repository failed; the operation stopped at that write.
    Repository(RepositoryError),
    /// The image analyzer failed; no state was changed.
    Analyzer(AnalyzerError),
    /// Configuration is invalid or could not be loaded.
    Config(ConfigError),
    /// A command named a sensor the repository does not know.
    UnknownSensor(SensorName),
}

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Repository(e) => write!(f, "repository: {e}"),
            Self::Analyzer(e) => write!(f, "analyzer: {e}"),
            Self::Config(e) => write!(f, "config: {e}"),
            Self::UnknownSensor(name) => write!(f, "unknown sensor '{name}'"),
        }
    }
}

impl std::error::Error for Error {}

impl From<RepositoryError> for Error {
    fn from(e: RepositoryError) -> Self {
        Self::Repository(e)
    }
}

impl From<AnalyzerError> for Error {
    fn from(e: AnalyzerError) -> Self {
        Self::Analyzer(e)
    }
}

impl From<ConfigError> for Error {
    fn from(e: ConfigError) -> Self {
        Self::Config(e)
    }
}

impl From<StorageError> for Error {
    fn from(e: StorageError) -> Self {
        Self::Repository(RepositoryError::Storage(e))
    }
}

/// Crate-wide `Result` alias.
pub type Result<T> = core::result::Result<T, Error>;
