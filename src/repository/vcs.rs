//! Version-control collaborator abstraction
//!
//! Decouples change classification and archive assembly from libgit2.

use std::path::PathBuf;

use crate::error::Result;
use crate::model::Revision;

/// Delta status as reported by the version-control engine
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RawStatus {
    Added,
    Deleted,
    Modified,
    Renamed,
    Copied,
    TypeChanged,
}

impl RawStatus {
    pub fn as_str(&self) -> &str {
        match self {
            RawStatus::Added => "added",
            RawStatus::Deleted => "deleted",
            RawStatus::Modified => "modified",
            RawStatus::Renamed => "renamed",
            RawStatus::Copied => "copied",
            RawStatus::TypeChanged => "typechange",
        }
    }
}

/// One unprocessed line of diff output: a status plus the paths on either side.
///
/// Paths are kept exactly as the engine reported them, which need not be
/// valid UTF-8.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RawChange {
    pub status: RawStatus,
    pub old_path: Option<PathBuf>,
    pub new_path: Option<PathBuf>,
}

impl RawChange {
    pub fn new(status: RawStatus, old_path: Option<&str>, new_path: Option<&str>) -> Self {
        Self {
            status,
            old_path: old_path.map(PathBuf::from),
            new_path: new_path.map(PathBuf::from),
        }
    }

    pub fn added(path: &str) -> Self {
        Self::new(RawStatus::Added, None, Some(path))
    }

    pub fn deleted(path: &str) -> Self {
        Self::new(RawStatus::Deleted, Some(path), None)
    }

    pub fn modified(path: &str) -> Self {
        Self::new(RawStatus::Modified, Some(path), Some(path))
    }

    pub fn renamed(old_path: &str, new_path: &str) -> Self {
        Self::new(RawStatus::Renamed, Some(old_path), Some(new_path))
    }
}

/// The two operations the exporter needs from a version-control engine.
///
/// `GitRepository` implements this on top of libgit2; tests substitute
/// in-memory fakes.
pub trait VersionControl {
    /// Resolve a reference (branch, tag, hash, `HEAD`, ...) to a commit.
    fn resolve(&self, reference: &str) -> Result<Revision>;

    /// List the file-level differences going from `from` to `to`, in the
    /// engine's own order. Paths may repeat.
    fn diff(&self, from: &Revision, to: &Revision) -> Result<Vec<RawChange>>;
}
