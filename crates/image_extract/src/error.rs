//! Error types for the image_extract crate

use std::path::PathBuf;

use zip::result::ZipError;

/// Result type for extraction operations
pub type Result<T> = std::result::Result<T, ExtractError>;

/// Error type for extraction operations
#[derive(Debug, thiserror::Error)]
pub enum ExtractError {
    /// The destination directory could not be derived, cleared or created
    #[error("failed to prepare destination directory {}", path.display())]
    DirectoryPreparation {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// The input is missing, unreadable or not a zip archive
    #[error("failed to open archive {}", path.display())]
    ArchiveOpen {
        path: PathBuf,
        #[source]
        source: ZipError,
    },

    /// Reading, decompressing or writing an accepted entry failed
    #[error("failed to extract entry '{entry}'")]
    Extraction {
        entry: String,
        #[source]
        source: ZipError,
    },

    /// An entry would be written outside of the destination directory
    #[error("entry '{entry}' escapes destination directory {}", destination.display())]
    PathTraversal { entry: String, destination: PathBuf },

    /// The blocking extraction task panicked or was cancelled
    #[cfg(feature = "tokio")]
    #[error("extraction task failed")]
    Task(#[from] tokio::task::JoinError),
}

impl ExtractError {
    /// Create a new directory preparation error
    pub fn directory_preparation(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        Self::DirectoryPreparation {
            path: path.into(),
            source,
        }
    }

    /// Create a new archive open error
    pub fn archive_open(path: impl Into<PathBuf>, source: impl Into<ZipError>) -> Self {
        Self::ArchiveOpen {
            path: path.into(),
            source: source.into(),
        }
    }

    /// Create a new extraction error for the named entry
    pub fn extraction(entry: impl Into<String>, source: impl Into<ZipError>) -> Self {
        Self::Extraction {
            entry: entry.into(),
            source: source.into(),
        }
    }

    /// Create a new path traversal error
    pub fn path_traversal(entry: impl Into<String>, destination: impl Into<PathBuf>) -> Self {
        Self::PathTraversal {
            entry: entry.into(),
            destination: destination.into(),
        }
    }
}
