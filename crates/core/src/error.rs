use std::path::PathBuf;
use thiserror::Error;

/// Failures raised while resolving a URI into a [`crate::models::FileRecord`].
#[derive(Debug, Error)]
pub enum ResolveError {
    #[error("invalid uri: {0}")]
    InvalidUri(String),
    #[error("unsupported uri scheme: {0}")]
    UnsupportedScheme(String),
    #[error("no such file: {}", .0.display())]
    NotFound(PathBuf),
    #[error("not a regular file: {}", .0.display())]
    NotAFile(PathBuf),
    #[error("failed to read metadata for {}: {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("resolver task failed: {0}")]
    Join(String),
}

impl ResolveError {
    pub(crate) fn io(path: PathBuf, source: std::io::Error) -> Self {
        if source.kind() == std::io::ErrorKind::NotFound {
            ResolveError::NotFound(path)
        } else {
            ResolveError::Io { path, source }
        }
    }
}
