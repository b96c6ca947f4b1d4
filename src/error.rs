use std::path::{Path, PathBuf};

use thiserror::Error;

pub type Result<T> = std::result::Result<T, ExportError>;

/// Failures that abort an export. None of them are retried.
#[derive(Error, Debug)]
pub enum ExportError {
    #[error("{} is not a git working tree: {reason}", path.display())]
    NotARepository { path: PathBuf, reason: String },

    #[error("reference '{reference}' does not name a commit: {reason}")]
    UnknownReference { reference: String, reason: String },

    #[error("diff {from}..{to} failed: {reason}")]
    DiffFailed {
        from: String,
        to: String,
        reason: String,
    },

    #[error("{path} does not exist in the working tree (deleted locally, or the checkout does not match the target revision?)")]
    SourceFileMissing { path: String },

    #[error("could not read {path}: {source}")]
    SourceUnreadable {
        path: String,
        #[source]
        source: std::io::Error,
    },

    #[error("could not write archive {}: {source}", path.display())]
    ArchiveWrite {
        path: PathBuf,
        #[source]
        source: zip::result::ZipError,
    },

    #[error("could not read path list {}: {source}", path.display())]
    PathListUnreadable {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

impl ExportError {
    pub fn unknown_reference(reference: &str, reason: impl ToString) -> Self {
        ExportError::UnknownReference {
            reference: reference.to_string(),
            reason: reason.to_string(),
        }
    }

    pub fn archive_write(path: &Path, source: impl Into<zip::result::ZipError>) -> Self {
        ExportError::ArchiveWrite {
            path: path.to_path_buf(),
            source: source.into(),
        }
    }

    /// Stable name of the failure kind, printed in front of the message.
    pub fn kind(&self) -> &'static str {
        match self {
            ExportError::NotARepository { .. } => "NotARepository",
            ExportError::UnknownReference { .. } => "UnknownReference",
            ExportError::DiffFailed { .. } => "DiffFailed",
            ExportError::SourceFileMissing { .. } => "SourceFileMissing",
            ExportError::SourceUnreadable { .. } => "SourceUnreadable",
            ExportError::ArchiveWrite { .. } => "ArchiveWriteError",
            ExportError::PathListUnreadable { .. } => "PathListUnreadable",
        }
    }

    pub fn exit_code(&self) -> u8 {
        match self {
            ExportError::NotARepository { .. } => 3,
            ExportError::UnknownReference { .. } => 4,
            ExportError::DiffFailed { .. } => 5,
            ExportError::SourceFileMissing { .. } | ExportError::SourceUnreadable { .. } => 6,
            ExportError::ArchiveWrite { .. } => 7,
            ExportError::PathListUnreadable { .. } => 8,
        }
    }
}
