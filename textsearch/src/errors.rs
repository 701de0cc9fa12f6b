/// Error types for the search pipeline.
///
/// Every stage reports failure through [`SearchError`] so the caller decides
/// whether a failed search ends the session or just the current iteration.
///
/// ```rust,ignore
/// match search(&request) {
///     Ok(output) => // Report output,
///     Err(SearchError::PathNotFound(path)) => // Ask for another root,
///     Err(e) if e.is_io() => // A matched file could not be read,
///     Err(e) => // Configuration or setup problem
/// }
/// ```
use std::path::{Path, PathBuf};
use thiserror::Error;

/// Result type for search operations
pub type SearchResult<T> = Result<T, SearchError>;

/// Errors that can occur during search operations
#[derive(Error, Debug)]
pub enum SearchError {
    #[error("Directory not found: {0}")]
    PathNotFound(PathBuf),
    #[error("File not found: {0}")]
    FileNotFound(PathBuf),
    #[error("Permission denied: {0}")]
    PermissionDenied(PathBuf),
    #[error("IO error reading {path}: {source}")]
    Io {
        path: PathBuf,
        source: std::io::Error,
    },
    #[error("Invalid UTF-8 in file {path} at line {line}: {source}")]
    Encoding {
        path: PathBuf,
        line: usize,
        source: std::str::Utf8Error,
    },
    #[error("Failed to walk directory tree: {0}")]
    Traversal(String),
    /// A name pattern `glob` refused to compile. Name patterns are escaped
    /// first, so this only reports a `glob` failure instead of panicking.
    #[error("Invalid pattern: {0}")]
    InvalidPattern(String),
    #[error("Configuration missing: {0}")]
    ConfigMissing(String),
    #[error("Configuration error: {0}")]
    Config(#[from] config::ConfigError),
    #[error("Failed to start search threads: {0}")]
    ThreadPool(String),
}

impl SearchError {
    pub fn path_not_found(path: impl Into<PathBuf>) -> Self {
        Self::PathNotFound(path.into())
    }

    pub fn invalid_pattern(pattern: impl Into<String>) -> Self {
        Self::InvalidPattern(pattern.into())
    }

    pub fn config_missing(msg: impl Into<String>) -> Self {
        Self::ConfigMissing(msg.into())
    }

    pub fn traversal(msg: impl Into<String>) -> Self {
        Self::Traversal(msg.into())
    }

    pub fn encoding_error(path: impl Into<PathBuf>, line: usize, source: std::str::Utf8Error) -> Self {
        Self::Encoding {
            path: path.into(),
            line,
            source,
        }
    }

    /// Maps an I/O error raised while opening or reading `path`.
    pub fn from_io(path: &Path, err: std::io::Error) -> Self {
        match err.kind() {
            std::io::ErrorKind::NotFound => Self::FileNotFound(path.to_path_buf()),
            std::io::ErrorKind::PermissionDenied => Self::PermissionDenied(path.to_path_buf()),
            _ => Self::Io {
                path: path.to_path_buf(),
                source: err,
            },
        }
    }

    /// True for failures reading a matched file's contents.
    pub fn is_io(&self) -> bool {
        matches!(
            self,
            Self::FileNotFound(_) | Self::PermissionDenied(_) | Self::Io { .. } | Self::Encoding { .. }
        )
    }
}
