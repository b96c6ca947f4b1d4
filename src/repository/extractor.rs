use std::path::{Path, PathBuf};
use tracing::{debug, warn};

use crate::error::{ExportError, Result};
use crate::model::{ChangeEntry, ChangeKind, ChangeSet, Revision};
use crate::util::{entry_name, normalize_relative};

use super::vcs::{RawChange, RawStatus, VersionControl};

/// Compute the change set for moving from `from` (base) to `to` (target).
pub fn extract(vcs: &impl VersionControl, from: &Revision, to: &Revision) -> Result<ChangeSet> {
    if from.id == to.id {
        debug!(revision = %to, "base and target are the same commit");
        return Ok(ChangeSet::new());
    }

    let raw = vcs.diff(from, to)?;
    let raw_len = raw.len();

    let entries = raw
        .iter()
        .map(|change| {
            classify(change).map_err(|reason| ExportError::DiffFailed {
                from: from.reference.clone(),
                to: to.reference.clone(),
                reason,
            })
        })
        .collect::<Result<Vec<_>>>()?;

    let changes = ChangeSet::from_entries(entries);
    if changes.len() < raw_len {
        debug!(
            raw = raw_len,
            unique = changes.len(),
            "collapsed repeated paths in diff output"
        );
    }
    Ok(changes)
}

/// Turn one raw diff record into a change entry keyed by its final path.
pub fn classify(change: &RawChange) -> std::result::Result<ChangeEntry, String> {
    let status = change.status;
    let new_path = || normalize(change.new_path.as_deref().or(change.old_path.as_deref()), status);
    let old_path = || normalize(change.old_path.as_deref().or(change.new_path.as_deref()), status);

    let entry = match status {
        RawStatus::Added | RawStatus::Copied => {
            ChangeEntry::from_path(new_path()?, ChangeKind::Added)
        }
        RawStatus::Deleted => ChangeEntry::from_path(old_path()?, ChangeKind::Deleted),
        RawStatus::Modified | RawStatus::TypeChanged => {
            ChangeEntry::from_path(new_path()?, ChangeKind::Modified)
        }
        RawStatus::Renamed => {
            let new = new_path()?;
            let old = old_path()?;
            if old == new {
                ChangeEntry::from_path(new, ChangeKind::Modified)
            } else {
                let old_path = entry_name(&old);
                ChangeEntry::from_path(new, ChangeKind::Renamed { old_path })
            }
        }
    };
    Ok(entry)
}

fn normalize(path: Option<&Path>, status: RawStatus) -> std::result::Result<PathBuf, String> {
    let raw = path.ok_or_else(|| format!("{} change reported without a path", status.as_str()))?;
    let normalized = normalize_relative(raw)
        .ok_or_else(|| format!("'{}' is not a path inside the repository", raw.display()))?;
    if normalized.to_str().is_none() {
        warn!(
            path = ?normalized,
            entry = %entry_name(&normalized),
            "path is not valid UTF-8; archive entry name is lossy"
        );
    }
    Ok(normalized)
}
