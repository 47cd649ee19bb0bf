//! Error types for cachedisk
//!
//! All modules use `CacheDiskResult<T>` as their return type.

use std::path::PathBuf;
use thiserror::Error;

/// Result type alias for cachedisk operations
pub type CacheDiskResult<T> = Result<T, CacheDiskError>;

/// All errors that can occur in cachedisk
#[derive(Error, Debug)]
pub enum CacheDiskError {
    // Resolution errors
    #[error("Invalid argument: {message}")]
    InvalidArgument { message: String },

    #[error("Home directory unavailable: {reason}")]
    HomeUnavailable { reason: String },

    // Configuration errors
    #[error("Invalid configuration at {path}: {reason}")]
    ConfigInvalid { path: PathBuf, reason: String },

    #[error("Failed to create config directory {path}: {source}")]
    ConfigDirCreate {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    // IO errors
    #[error("IO error: {context}")]
    Io {
        context: String,
        #[source]
        source: std::io::Error,
    },

    // Serialization errors
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("TOML serialize error: {0}")]
    TomlSerialize(#[from] toml::ser::Error),

    // General errors
    #[error("{0}")]
    User(String),
}

impl CacheDiskError {
    /// Create an IO error with context
    pub fn io(context: impl Into<String>, source: std::io::Error) -> Self {
        Self::Io {
            context: context.into(),
            source,
        }
    }

    /// Create an invalid argument error
    pub fn invalid_argument(message: impl Into<String>) -> Self {
        Self::InvalidArgument {
            message: message.into(),
        }
    }

    /// Check if this is a caller error (bad input or environment rather than
    /// a runtime failure)
    ///
    /// The CLI exits with code 2 for these, matching clap's usage-error
    /// convention.
    pub fn is_invalid_argument(&self) -> bool {
        matches!(
            self,
            Self::InvalidArgument { .. } | Self::HomeUnavailable { .. }
        )
    }

    /// Get actionable hint for the error
    pub fn hint(&self) -> Option<&'static str> {
        match self {
            Self::ConfigInvalid { .. } => {
                Some("Check the TOML syntax, or regenerate with: cachedisk config init --force")
            }
            Self::InvalidArgument { .. } => {
                Some("The cache directory must be relative to the volume root, e.g. '_caches/nuke'")
            }
            Self::HomeUnavailable { .. } => {
                Some("Check that HOME points at a writable directory")
            }
            _ => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn error_display() {
        let err = CacheDiskError::invalid_argument("cache directory must be a relative path");
        assert!(err.to_string().contains("Invalid argument"));
        assert!(err.to_string().contains("relative path"));
    }

    #[test]
    fn error_hint() {
        let err = CacheDiskError::ConfigInvalid {
            path: PathBuf::from("/tmp/config.toml"),
            reason: "bad toml".to_string(),
        };
        assert!(err.hint().unwrap().contains("config init"));
    }

    #[test]
    fn invalid_argument_classification() {
        assert!(CacheDiskError::invalid_argument("x").is_invalid_argument());
        let home = CacheDiskError::HomeUnavailable {
            reason: "not found".to_string(),
        };
        assert!(home.is_invalid_argument());
        assert!(!CacheDiskError::User("x".to_string()).is_invalid_argument());
    }

    #[test]
    fn io_error_carries_context() {
        let err = CacheDiskError::io(
            "reading /proc/mounts",
            std::io::Error::new(std::io::ErrorKind::PermissionDenied, "denied"),
        );
        assert!(err.to_string().contains("/proc/mounts"));
    }
}
