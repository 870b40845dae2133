use thiserror::Error;

use crate::boundary::BoundaryWarning;

/// Unified error type for bump-version operations
#[derive(Error, Debug)]
pub enum BumpError {
    #[error("Git operation failed: {0}")]
    Git(#[from] git2::Error),

    #[error("Configuration error: {0}")]
    Config(String),

    #[error("Version error: {0}")]
    Version(String),

    #[error("Version file error: {0}")]
    VersionFile(String),

    #[error("CI output error: {0}")]
    CiOutput(String),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

/// Convenience type alias for Results in bump-version
pub type Result<T> = std::result::Result<T, BumpError>;

impl BumpError {
    /// Create a configuration error with context
    pub fn config(msg: impl Into<String>) -> Self {
        BumpError::Config(msg.into())
    }

    /// Create a version error with context
    pub fn version(msg: impl Into<String>) -> Self {
        BumpError::Version(msg.into())
    }

    /// Create a version file error with context
    pub fn version_file(msg: impl Into<String>) -> Self {
        BumpError::VersionFile(msg.into())
    }

    /// Create a CI output error with context
    pub fn ci_output(msg: impl Into<String>) -> Self {
        BumpError::CiOutput(msg.into())
    }
}

/// The single place where a failed repository query turns into a default answer.
///
/// Repository reads never abort a run: a failed tag listing means "no tags",
/// a failed log query means "no commits". Every such fallback goes through
/// [`Degrade::or_degraded`] so it is logged the same way and can be found by
/// searching for one name.
pub trait Degrade<T> {
    /// Return the value, or `T::default()` after logging a warning naming `operation`.
    fn or_degraded(self, operation: &str) -> T;
}

impl<T: Default> Degrade<T> for Result<T> {
    fn or_degraded(self, operation: &str) -> T {
        match self {
            Ok(value) => value,
            Err(e) => {
                let warning = BoundaryWarning::RepositoryQueryFailed {
                    operation: operation.to_string(),
                    reason: e.to_string(),
                };
                tracing::warn!(%warning, "falling back to default");
                T::default()
            }
        }
    }
}
