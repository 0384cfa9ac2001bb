use std::path::PathBuf;
use thiserror::Error;

/// Failures that stop a sweep before any entry is looked at.
#[derive(Error, Debug)]
pub enum OrganizeError {
    #[error("Invalid or overlong path: {0:?}")]
    InvalidPath(PathBuf),

    #[error("Path does not exist or is not a directory: {}", .0.display())]
    NotADirectory(PathBuf),

    #[error("Cannot open directory {}: {source}", .path.display())]
    OpenFailed {
        path: PathBuf,
        source: std::io::Error,
    },
}

/// Failures confined to a single file. The sweep records them and moves on.
#[derive(Error, Debug)]
pub enum RelocateError {
    #[error("Destination path too long for {0}")]
    DestinationTooLong(String),

    #[error("Cannot create directory {}: {source}", .path.display())]
    DirectoryCreationFailed {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("Cannot move {name}: {} already exists", .destination.display())]
    DestinationExists { name: String, destination: PathBuf },

    #[error("Cannot move {name}: {source}")]
    MoveFailed {
        name: String,
        source: std::io::Error,
    },

    #[error("Cannot read directory entry: {0}")]
    UnreadableEntry(#[source] std::io::Error),
}

pub type Result<T> = std::result::Result<T, OrganizeError>;
