//! Error types for the install hook.
//!
//! Every install step returns these errors; the installer turns them into
//! error-log entries instead of aborting.

use std::path::PathBuf;
use thiserror::Error;

/// Main error type for install steps.
#[derive(Debug, Error)]
pub enum ReadyError {
    // File system errors
    #[error("IO error at {path:?}: {message}")]
    Io {
        message: String,
        path: Option<PathBuf>,
        #[source]
        source: Option<std::io::Error>,
    },

    // INI errors
    #[error("Failed to parse INI file {path:?}: {message}")]
    IniParse { path: PathBuf, message: String },

    // Shortcut errors
    #[error("Executable not found: {name}")]
    ExecutableNotFound { name: String },

    #[error("Failed to create shortcut {name:?}: {message}")]
    Shortcut { name: String, message: String },

    // External commands
    #[error("Command `{program}` failed: {message}")]
    Command { program: String, message: String },

    // Configuration errors
    #[error("Configuration error: {message}")]
    Config { message: String },

    #[error("{0}")]
    Other(String),
}

/// Result type alias for install steps.
pub type Result<T> = std::result::Result<T, ReadyError>;

impl From<std::io::Error> for ReadyError {
    fn from(err: std::io::Error) -> Self {
        ReadyError::Io {
            message: err.to_string(),
            path: None,
            source: Some(err),
        }
    }
}

impl From<serde_json::Error> for ReadyError {
    fn from(err: serde_json::Error) -> Self {
        ReadyError::Other(format!("JSON error: {}", err))
    }
}

impl ReadyError {
    /// Create an IO error with path context.
    pub fn io_with_path(err: std::io::Error, path: impl Into<PathBuf>) -> Self {
        ReadyError::Io {
            message: err.to_string(),
            path: Some(path.into()),
            source: Some(err),
        }
    }

    /// Create an IO error with a description of the failed action.
    pub fn io_action(action: &str, path: impl Into<PathBuf>, err: std::io::Error) -> Self {
        ReadyError::Io {
            message: format!("{}: {}", action, err),
            path: Some(path.into()),
            source: Some(err),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_display() {
        let err = ReadyError::ExecutableNotFound {
            name: "pandoctools".into(),
        };
        assert_eq!(err.to_string(), "Executable not found: pandoctools");
    }

    #[test]
    fn test_io_with_path_keeps_path() {
        let io = std::io::Error::new(std::io::ErrorKind::PermissionDenied, "denied");
        let err = ReadyError::io_with_path(io, "/tmp/Defaults.ini");

        assert!(matches!(
            err,
            ReadyError::Io { path: Some(ref p), .. } if p == std::path::Path::new("/tmp/Defaults.ini")
        ));
        assert!(err.to_string().contains("denied"));
    }

    #[test]
    fn test_io_action_message() {
        let io = std::io::Error::new(std::io::ErrorKind::NotFound, "missing");
        let err = ReadyError::io_action("create shortcut", "/x", io);
        assert!(err.to_string().contains("create shortcut: missing"));
    }
}
