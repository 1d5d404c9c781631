use std::path::PathBuf;
use thiserror::Error;

/// Errors that end a codeclip run
#[derive(Error, Debug)]
pub enum CodeclipError {
    #[error("Cannot determine current directory: {0}")]
    CurrentDir(#[source] std::io::Error),

    #[error("Failed to read confirmation: {0}")]
    Prompt(#[source] std::io::Error),

    #[error("Failed to access '{path}': {source}")]
    IoError {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Clipboard error: {0}")]
    ClipboardError(String),
}

pub type Result<T> = std::result::Result<T, CodeclipError>;

#[cfg(test)]
mod tests {
    use super::*;
    use std::io;

    #[test]
    fn test_clipboard_error_display() {
        let err = CodeclipError::ClipboardError("No display available".to_string());
        assert_eq!(err.to_string(), "Clipboard error: No display available");
    }

    #[test]
    fn test_current_dir_error_display() {
        let err = CodeclipError::CurrentDir(io::Error::new(io::ErrorKind::NotFound, "gone"));
        assert_eq!(err.to_string(), "Cannot determine current directory: gone");
    }

    #[test]
    fn test_prompt_error_display() {
        let err = CodeclipError::Prompt(io::Error::new(io::ErrorKind::BrokenPipe, "closed"));
        assert_eq!(err.to_string(), "Failed to read confirmation: closed");
    }

    #[test]
    fn test_io_error_display() {
        let err = CodeclipError::IoError {
            path: PathBuf::from("src"),
            source: io::Error::new(io::ErrorKind::Other, "disk full"),
        };
        assert_eq!(err.to_string(), "Failed to access 'src': disk full");
    }
}
