use rustc_hash::FxHashMap;
use std::path::PathBuf;

use crate::util::entry_name;

/// How a path differs between the base and the target revision
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ChangeKind {
    Added,
    Modified,
    Deleted,
    /// The path was moved here from `old_path`
    Renamed { old_path: String },
}

impl ChangeKind {
    pub fn as_str(&self) -> &str {
        match self {
            ChangeKind::Added => "added",
            ChangeKind::Modified => "modified",
            ChangeKind::Deleted => "deleted",
            ChangeKind::Renamed { .. } => "renamed",
        }
    }

    pub fn is_deleted(&self) -> bool {
        matches!(self, ChangeKind::Deleted)
    }

    /// Combine two kinds reported for the same final path.
    ///
    /// A rename always wins (the later one if both are renames), identical
    /// kinds are kept, and any other combination means the path exists on
    /// both sides with different content.
    fn merge(self, later: ChangeKind) -> ChangeKind {
        match (self, later) {
            (_, renamed @ ChangeKind::Renamed { .. }) => renamed,
            (renamed @ ChangeKind::Renamed { .. }, _) => renamed,
            (earlier, later) if earlier == later => later,
            _ => ChangeKind::Modified,
        }
    }
}

/// One changed path and how it changed
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ChangeEntry {
    /// `/`-separated path relative to the repository root, used as the
    /// archive entry name
    pub relative_path: String,
    /// The same path as the filesystem spells it, raw bytes intact
    pub source: PathBuf,
    pub kind: ChangeKind,
}

impl ChangeEntry {
    pub fn new(relative_path: impl Into<String>, kind: ChangeKind) -> Self {
        let relative_path = relative_path.into();
        Self {
            source: PathBuf::from(&relative_path),
            relative_path,
            kind,
        }
    }

    /// Entry for a normalized filesystem path. The name is derived from it
    /// and is lossy when the path is not valid UTF-8.
    pub fn from_path(source: PathBuf, kind: ChangeKind) -> Self {
        Self {
            relative_path: entry_name(&source),
            source,
            kind,
        }
    }
}

/// The changed paths between two revisions, unique by path and sorted by path
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ChangeSet {
    entries: Vec<ChangeEntry>,
}

impl ChangeSet {
    pub fn new() -> Self {
        Self::default()
    }

    /// Build a change set from raw entries, collapsing repeated paths.
    pub fn from_entries(raw: impl IntoIterator<Item = ChangeEntry>) -> Self {
        let mut entries: Vec<ChangeEntry> = Vec::new();
        let mut by_path: FxHashMap<String, usize> = FxHashMap::default();

        for entry in raw {
            match by_path.get(&entry.relative_path) {
                Some(&idx) => {
                    let slot = &mut entries[idx];
                    let earlier = std::mem::replace(&mut slot.kind, ChangeKind::Modified);
                    slot.kind = earlier.merge(entry.kind);
                }
                None => {
                    by_path.insert(entry.relative_path.clone(), entries.len());
                    entries.push(entry);
                }
            }
        }

        entries.sort_by(|a, b| a.relative_path.cmp(&b.relative_path));
        Self { entries }
    }

    pub fn entries(&self) -> &[ChangeEntry] {
        &self.entries
    }

    pub fn iter(&self) -> std::slice::Iter<'_, ChangeEntry> {
        self.entries.iter()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn get(&self, relative_path: &str) -> Option<&ChangeEntry> {
        self.entries
            .binary_search_by(|e| e.relative_path.as_str().cmp(relative_path))
            .ok()
            .map(|idx| &self.entries[idx])
    }

    /// Entries whose content still exists in the target (everything but deletions)
    pub fn archivable(&self) -> impl Iterator<Item = &ChangeEntry> {
        self.entries.iter().filter(|e| !e.kind.is_deleted())
    }

    pub fn deleted_count(&self) -> usize {
        self.entries.iter().filter(|e| e.kind.is_deleted()).count()
    }
}

impl<'a> IntoIterator for &'a ChangeSet {
    type Item = &'a ChangeEntry;
    type IntoIter = std::slice::Iter<'a, ChangeEntry>;

    fn into_iter(self) -> Self::IntoIter {
        self.entries.iter()
    }
}
