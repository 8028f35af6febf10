use std::io;
use std::path::PathBuf;

use crate::interfaces::Level;

/// Errors that can occur while compiling or running a source file
#[derive(Debug, thiserror::Error)]
pub enum Error {
    #[error("Configuration error: {0}")]
    ConfigError(String),

    #[error("IO error: {0}")]
    IoError(#[from] io::Error),

    #[error("Serialization error: {0}")]
    SerializationError(#[from] serde_json::Error),

    #[error("Compiler not found: {compiler}, try to change path in settings!")]
    CompilerNotFound { compiler: String },

    #[error("Unsupported file extension: {0:?}")]
    UnsupportedExtension(String),

    #[error("\"{}\" doesn't exist!", .0.display())]
    SourceMissing(PathBuf),

    #[error("\"{}\" doesn't exist!", .0.display())]
    ExecutableMissing(PathBuf),

    #[error("Error compiling!")]
    CompileFailed { code: Option<i32> },

    #[error("{0}")]
    UnsupportedTerminal(String),

    #[error("Cancelled")]
    Cancelled,
}

impl Error {
    /// How the error is surfaced to the user. `None` means the error is a
    /// silent abort (a dismissed prompt, a file we don't handle).
    pub fn level(&self) -> Option<Level> {
        match self {
            Error::Cancelled | Error::UnsupportedExtension(_) => None,
            _ => Some(Level::Error),
        }
    }
}

/// Result type alias for ccrun operations
pub type Result<T> = std::result::Result<T, Error>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_silent_errors() {
        assert_eq!(Error::Cancelled.level(), None);
        assert_eq!(Error::UnsupportedExtension("rs".into()).level(), None);
        assert_eq!(
            Error::CompileFailed { code: Some(1) }.level(),
            Some(Level::Error)
        );
    }

    #[test]
    fn test_missing_file_message() {
        let err = Error::ExecutableMissing(PathBuf::from("/tmp/a"));
        assert_eq!(err.to_string(), "\"/tmp/a\" doesn't exist!");
    }
}
