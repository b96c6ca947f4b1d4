//! End-to-end export: resolve references, extract the change set, build the archive.
//!
//! # Phases
//!
//! - **resolve**: both references to commits (nothing is written on failure)
//! - **extract**: classified, deduplicated change set
//! - **build**: read sources, then write the archive

use std::path::{Path, PathBuf};
use std::time::Instant;
use tracing::{debug, info, warn};

use crate::archive::{ArchiveBuilder, ArchiveSummary, ProgressReporter};
use crate::error::Result;
use crate::model::Revision;
use crate::repository::{
    extract, read_path_list, resolve, resolve_target, GitRepository, VersionControl, HEAD,
};

/// Where the list of files to export comes from
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ChangeSource {
    /// Files changed between two revisions; `to` defaults to `HEAD`
    Diff { from: String, to: Option<String> },
    /// Files listed one per line in a text file
    PathList(PathBuf),
}

/// A fully specified export run
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExportRequest {
    /// Repository working tree; relative paths are resolved against it
    pub repo_root: PathBuf,
    pub output: PathBuf,
    pub source: ChangeSource,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ExportSummary {
    /// Unique changed paths, deletions included
    pub changes: usize,
    pub deleted: usize,
    pub archive: ArchiveSummary,
}

/// Run an export against the git repository at `request.repo_root`.
pub fn export(request: &ExportRequest, progress: Box<dyn ProgressReporter>) -> Result<ExportSummary> {
    match &request.source {
        ChangeSource::Diff { from, to } => {
            let repo = GitRepository::open(&request.repo_root)?;
            export_diff(
                &repo,
                &request.repo_root,
                &request.output,
                from,
                to.as_deref(),
                progress,
            )
        }
        ChangeSource::PathList(list) => {
            export_path_list(list, &request.repo_root, &request.output, progress)
        }
    }
}

/// Export the files changed between `from` and `to` using any version-control backend.
pub fn export_diff(
    vcs: &impl VersionControl,
    repo_root: &Path,
    output: &Path,
    from: &str,
    to: Option<&str>,
    progress: Box<dyn ProgressReporter>,
) -> Result<ExportSummary> {
    let total_start = Instant::now();

    let phase_start = Instant::now();
    let from_rev = resolve(vcs, from)?;
    let to_rev = resolve_target(vcs, to)?;
    debug!(elapsed = ?phase_start.elapsed(), "resolved references");
    if to.is_some() {
        warn_if_not_checked_out(vcs, &to_rev);
    }

    let phase_start = Instant::now();
    let changes = extract(vcs, &from_rev, &to_rev)?;
    info!(
        from = %from_rev,
        to = %to_rev,
        changes = changes.len(),
        deleted = changes.deleted_count(),
        "extracted change set"
    );
    for change in &changes {
        debug!(path = %change.relative_path, kind = change.kind.as_str(), "change");
    }
    debug!(elapsed = ?phase_start.elapsed(), "extract phase");

    let archive = ArchiveBuilder::new(repo_root)
        .with_comment(format!(
            "Files from git diff {}..{}",
            from_rev.reference, to_rev.reference
        ))
        .with_progress(progress)
        .build(&to_rev, &changes, output)?;
    debug!(elapsed = ?total_start.elapsed(), "export finished");

    Ok(ExportSummary {
        changes: changes.len(),
        deleted: changes.deleted_count(),
        archive,
    })
}

/// Export the files named in a path list; no repository is needed.
///
/// Entries carry the zip epoch as their timestamp so output stays reproducible.
pub fn export_path_list(
    list: &Path,
    repo_root: &Path,
    output: &Path,
    progress: Box<dyn ProgressReporter>,
) -> Result<ExportSummary> {
    let changes = read_path_list(list, repo_root)?;

    let archive = ArchiveBuilder::new(repo_root)
        .with_comment(format!("Files from {}", list.display()))
        .with_progress(progress)
        .build_at(zip::DateTime::default(), &changes, output)?;

    Ok(ExportSummary {
        changes: changes.len(),
        deleted: 0,
        archive,
    })
}

/// Content always comes from the working tree, which normally holds `HEAD`.
fn warn_if_not_checked_out(vcs: &impl VersionControl, to: &Revision) {
    match vcs.resolve(HEAD) {
        Ok(head) if head.id != to.id => warn!(
            target_revision = %to,
            head = %head,
            "target is not the checked-out commit; file contents are taken from the working tree, not from the target"
        ),
        Ok(_) => {}
        Err(e) => debug!(error = %e, "could not resolve HEAD"),
    }
}
