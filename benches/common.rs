// Shared benchmark helpers
#![allow(dead_code)]

use gitzip::model::Revision;
use gitzip::repository::{RawChange, RawStatus, VersionControl};

/// Generate a diff of `num_changes` raw records spread over nested directories.
///
/// Every tenth record repeats the previous path so deduplication has work to do.
pub fn generate_raw_changes(num_changes: usize) -> Vec<RawChange> {
    let dirs = ["src", "lib", "test", "pkg", "mod"];

    (0..num_changes)
        .map(|i| {
            let file_idx = if i % 10 == 9 { i - 1 } else { i };
            let depth = (file_idx % 5) + 1;
            let mut parts: Vec<String> = (0..depth)
                .map(|d| format!("{}_{}", dirs[d], file_idx / 1000))
                .collect();
            parts.push(format!("file_{}.rs", file_idx));
            let path = parts.join("/");

            match i % 4 {
                0 => RawChange::added(&path),
                1 => RawChange::modified(&path),
                2 => RawChange::renamed(&format!("old/{path}"), &path),
                _ => RawChange::new(RawStatus::Deleted, Some(&path), Some(&path)),
            }
        })
        .collect()
}

/// In-memory diff engine serving a pre-generated diff
pub struct StaticDiff(pub Vec<RawChange>);

impl VersionControl for StaticDiff {
    fn resolve(&self, reference: &str) -> gitzip::Result<Revision> {
        Ok(Revision::new(reference, reference, 0))
    }

    fn diff(&self, _from: &Revision, _to: &Revision) -> gitzip::Result<Vec<RawChange>> {
        Ok(self.0.clone())
    }
}
