use git2::{Delta, DiffFindOptions, DiffOptions, FileMode, Oid, Repository, Tree};
use std::path::Path;
use tracing::{debug, warn};

use crate::error::{ExportError, Result};
use crate::model::Revision;

use super::vcs::{RawChange, RawStatus, VersionControl};

/// A git working tree opened through libgit2
pub struct GitRepository {
    repo: Repository,
}

impl GitRepository {
    /// Open the repository whose working tree is rooted at `root`.
    ///
    /// The root itself must hold the git metadata; parent directories are
    /// not searched.
    pub fn open(root: &Path) -> Result<Self> {
        let repo = Repository::open(root).map_err(|e| ExportError::NotARepository {
            path: root.to_path_buf(),
            reason: e.message().to_string(),
        })?;

        if repo.is_bare() {
            return Err(ExportError::NotARepository {
                path: root.to_path_buf(),
                reason: "bare repository has no working tree".to_string(),
            });
        }

        debug!(root = %root.display(), "opened git repository");
        Ok(Self { repo })
    }

    fn tree_of(&self, revision: &Revision) -> std::result::Result<Tree<'_>, git2::Error> {
        let oid = Oid::from_str(&revision.id)?;
        self.repo.find_commit(oid)?.tree()
    }
}

fn diff_failed(from: &Revision, to: &Revision, err: git2::Error) -> ExportError {
    ExportError::DiffFailed {
        from: from.reference.clone(),
        to: to.reference.clone(),
        reason: err.message().to_string(),
    }
}

impl VersionControl for GitRepository {
    fn resolve(&self, reference: &str) -> Result<Revision> {
        let object = self
            .repo
            .revparse_single(reference)
            .map_err(|e| ExportError::unknown_reference(reference, e.message()))?;
        let commit = object
            .peel_to_commit()
            .map_err(|e| ExportError::unknown_reference(reference, e.message()))?;

        Ok(Revision::new(
            reference,
            commit.id().to_string(),
            commit.time().seconds(),
        ))
    }

    fn diff(&self, from: &Revision, to: &Revision) -> Result<Vec<RawChange>> {
        let from_tree = self.tree_of(from).map_err(|e| diff_failed(from, to, e))?;
        let to_tree = self.tree_of(to).map_err(|e| diff_failed(from, to, e))?;

        let mut opts = DiffOptions::new();
        opts.include_typechange(true);
        let mut diff = self
            .repo
            .diff_tree_to_tree(Some(&from_tree), Some(&to_tree), Some(&mut opts))
            .map_err(|e| diff_failed(from, to, e))?;

        let mut find = DiffFindOptions::new();
        find.renames(true);
        diff.find_similar(Some(&mut find))
            .map_err(|e| diff_failed(from, to, e))?;

        let mut changes = Vec::with_capacity(diff.deltas().len());
        for delta in diff.deltas() {
            let old_file = delta.old_file();
            let new_file = delta.new_file();

            // Submodule checkouts are directories; there is no file content to archive.
            if old_file.mode() == FileMode::Commit || new_file.mode() == FileMode::Commit {
                warn!(
                    path = ?new_file.path().or(old_file.path()),
                    "skipping submodule entry"
                );
                continue;
            }

            let status = match delta.status() {
                Delta::Added => RawStatus::Added,
                Delta::Deleted => RawStatus::Deleted,
                Delta::Modified => RawStatus::Modified,
                Delta::Renamed => RawStatus::Renamed,
                Delta::Copied => RawStatus::Copied,
                Delta::Typechange => RawStatus::TypeChanged,
                other => {
                    debug!(status = ?other, path = ?new_file.path(), "ignoring delta");
                    continue;
                }
            };

            changes.push(RawChange {
                status,
                old_path: old_file.path().map(Path::to_path_buf),
                new_path: new_file.path().map(Path::to_path_buf),
            });
        }

        debug!(
            from = %from,
            to = %to,
            deltas = changes.len(),
            "computed tree diff"
        );
        Ok(changes)
    }
}
