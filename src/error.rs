use std::path::PathBuf;

use thiserror::Error;

/// Application-wide result type alias.
pub type Result<T> = std::result::Result<T, AppError>;

/// Application error types.
///
/// Navigation rejections (`NotADirectory`, `NoSelection`, `RootBoundary`)
/// leave all state unchanged; the UI layer decides whether to surface them
/// or drop the keypress.
#[derive(Debug, Error)]
pub enum AppError {
    /// I/O errors from filesystem operations.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Terminal initialization or rendering errors.
    #[error("Terminal error: {0}")]
    Terminal(String),

    /// Invalid path provided by the user.
    #[error("Invalid path: {0}")]
    InvalidPath(String),

    /// Descending into an entry that is not a directory.
    #[error("Not a directory: {}", .0.display())]
    NotADirectory(PathBuf),

    /// A command that needs a selected entry ran against an empty directory.
    #[error("Nothing is selected")]
    NoSelection,

    /// Ascending above the filesystem root.
    #[error("Already at the filesystem root")]
    RootBoundary,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn io_error_conversion() {
        let io_err = std::io::Error::new(std::io::ErrorKind::NotFound, "file not found");
        let app_err: AppError = io_err.into();
        assert!(matches!(app_err, AppError::Io(_)));
        assert!(app_err.to_string().contains("file not found"));
    }

    #[test]
    fn terminal_error_display() {
        let err = AppError::Terminal("failed to enter raw mode".into());
        assert_eq!(err.to_string(), "Terminal error: failed to enter raw mode");
    }

    #[test]
    fn not_a_directory_display() {
        let err = AppError::NotADirectory(PathBuf::from("/tmp/notes.txt"));
        assert_eq!(err.to_string(), "Not a directory: /tmp/notes.txt");
    }

    #[test]
    fn root_boundary_display() {
        assert_eq!(
            AppError::RootBoundary.to_string(),
            "Already at the filesystem root"
        );
    }
}
