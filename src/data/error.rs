//! Errors raised while reading the tabular inputs

use std::path::PathBuf;

pub type DataResult<T> = Result<T, DataError>;

#[derive(Debug, thiserror::Error)]
pub enum DataError {
    /// File could not be opened or read
    #[error("Failed to read {}: {source}", .path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// File has no header row
    #[error("{} is empty", .path.display())]
    Empty { path: PathBuf },

    /// A required column is absent from the header
    #[error("{} is missing column '{column}'", .path.display())]
    MissingColumn { path: PathBuf, column: String },
}

impl DataError {
    pub fn io(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        DataError::Io {
            path: path.into(),
            source,
        }
    }
}
