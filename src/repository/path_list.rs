//! Change sets from a plain list of paths instead of a git diff

use std::fs;
use std::path::Path;
use tracing::{info, warn};

use crate::error::{ExportError, Result};
use crate::model::{ChangeEntry, ChangeKind, ChangeSet};
use crate::util::{normalize_relative, relative_to_root};

/// Read a newline-separated path list and turn it into a change set.
pub fn read_path_list(list: &Path, repo_root: &Path) -> Result<ChangeSet> {
    let text = fs::read_to_string(list).map_err(|source| ExportError::PathListUnreadable {
        path: list.to_path_buf(),
        source,
    })?;

    let changes = parse_path_list(&text, repo_root);
    info!(list = %list.display(), paths = changes.len(), "loaded path list");
    Ok(changes)
}

/// Every listed path becomes a `Modified` entry. Blank lines are ignored;
/// paths that do not resolve to somewhere under `repo_root` are skipped.
pub fn parse_path_list(text: &str, repo_root: &Path) -> ChangeSet {
    let entries = text
        .lines()
        .map(str::trim)
        .filter(|line| !line.is_empty())
        .filter_map(|line| {
            match relative_to_root(repo_root, Path::new(line)).and_then(normalize_relative) {
                Some(path) => Some(ChangeEntry::from_path(path, ChangeKind::Modified)),
                None => {
                    warn!(
                        path = line,
                        "skipping path that does not name a file under the repository root"
                    );
                    None
                }
            }
        });

    ChangeSet::from_entries(entries)
}
