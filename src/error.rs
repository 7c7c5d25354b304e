use std::path::PathBuf;

use thiserror::Error;

#[derive(Debug, Error)]
pub enum Error {
    #[error("{}: {message}", .path.display())]
    Io { path: PathBuf, message: String },

    #[error("file not found: {}", .0.display())]
    NotFound(PathBuf),

    #[error("invalid config {}: {message}", .path.display())]
    Config { path: PathBuf, message: String },

    #[error("invalid arguments: {0}")]
    Args(#[from] pico_args::Error),
}

impl Error {
    /// Classify an I/O error raised while touching `path`.
    pub fn from_io(path: impl Into<PathBuf>, err: std::io::Error) -> Self {
        let path = path.into();
        if err.kind() == std::io::ErrorKind::NotFound {
            Error::NotFound(path)
        } else {
            Error::Io {
                path,
                message: err.to_string(),
            }
        }
    }
}

pub type Result<T> = std::result::Result<T, Error>;
