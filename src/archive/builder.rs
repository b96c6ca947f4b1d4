//! Zip archive assembly from a change set.
//!
//! Sources are read from the working tree first; the output file is only
//! created once every source has been read.

use std::fs::{self, File};
use std::io::{BufWriter, ErrorKind, Write};
use std::path::{Path, PathBuf};
use std::time::Instant;
use tracing::{debug, info};
use zip::write::{FileOptions, ZipWriter};
use zip::CompressionMethod;

use crate::error::{ExportError, Result};
use crate::model::{ChangeEntry, ChangeSet, Revision};
use crate::util::zip_timestamp;

use super::progress::{NoopProgress, ProgressReporter};

/// One file destined for the archive
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ArchiveEntry {
    /// Name inside the archive, `/`-separated
    pub internal_path: String,
    pub content: Vec<u8>,
}

/// What ended up in a written archive
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ArchiveSummary {
    pub entries: usize,
    /// Uncompressed bytes
    pub bytes: u64,
}

/// Writes change sets into zip archives
pub struct ArchiveBuilder {
    repo_root: PathBuf,
    comment: Option<String>,
    progress: Box<dyn ProgressReporter>,
}

impl ArchiveBuilder {
    pub fn new(repo_root: impl Into<PathBuf>) -> Self {
        Self {
            repo_root: repo_root.into(),
            comment: None,
            progress: Box::new(NoopProgress),
        }
    }

    /// Set the archive-level comment.
    pub fn with_comment(mut self, comment: impl Into<String>) -> Self {
        self.comment = Some(comment.into());
        self
    }

    pub fn with_progress(mut self, progress: Box<dyn ProgressReporter>) -> Self {
        self.progress = progress;
        self
    }

    /// Archive the working-tree content of every non-deleted change.
    ///
    /// Entries are stamped with the commit time of `to`, so identical inputs
    /// produce identical archives.
    pub fn build(&self, to: &Revision, changes: &ChangeSet, output: &Path) -> Result<ArchiveSummary> {
        self.build_at(zip_timestamp(to.time), changes, output)
    }

    /// Like [`build`](Self::build) with an explicit entry timestamp.
    pub fn build_at(
        &self,
        modified: zip::DateTime,
        changes: &ChangeSet,
        output: &Path,
    ) -> Result<ArchiveSummary> {
        let phase_start = Instant::now();
        let entries = self.read_entries(changes)?;
        debug!(
            entries = entries.len(),
            elapsed = ?phase_start.elapsed(),
            "read sources from working tree"
        );

        self.write(&entries, modified, output)
    }

    /// Read the current content of every non-deleted change, in change-set order.
    ///
    /// Stops at the first source that is missing or unreadable.
    pub fn read_entries(&self, changes: &ChangeSet) -> Result<Vec<ArchiveEntry>> {
        changes
            .archivable()
            .map(|change| -> Result<ArchiveEntry> {
                Ok(ArchiveEntry {
                    content: self.read_source(change)?,
                    internal_path: change.relative_path.clone(),
                })
            })
            .collect()
    }

    fn read_source(&self, change: &ChangeEntry) -> Result<Vec<u8>> {
        let missing = || ExportError::SourceFileMissing {
            path: change.relative_path.clone(),
        };
        let unreadable = |source| ExportError::SourceUnreadable {
            path: change.relative_path.clone(),
            source,
        };

        let source = self.repo_root.join(&change.source);
        match fs::metadata(&source) {
            Ok(meta) if meta.is_file() => {}
            Ok(_) => return Err(missing()),
            Err(e) if e.kind() == ErrorKind::NotFound => return Err(missing()),
            Err(e) => return Err(unreadable(e)),
        }

        fs::read(&source).map_err(|e| {
            if e.kind() == ErrorKind::NotFound {
                missing()
            } else {
                unreadable(e)
            }
        })
    }

    /// Write entries to `output`, replacing any existing file.
    pub fn write(
        &self,
        entries: &[ArchiveEntry],
        modified: zip::DateTime,
        output: &Path,
    ) -> Result<ArchiveSummary> {
        let fail = |e: zip::result::ZipError| ExportError::archive_write(output, e);

        let file = File::create(output).map_err(|e| ExportError::archive_write(output, e))?;
        let mut zip = ZipWriter::new(BufWriter::new(file));
        if let Some(comment) = &self.comment {
            zip.set_comment(comment.as_str());
        }

        let options: FileOptions<'_, ()> = FileOptions::default()
            .compression_method(CompressionMethod::Deflated)
            .last_modified_time(modified)
            .unix_permissions(0o644);

        let progress = self.progress.start("Writing archive", entries.len() as u64);
        let mut bytes = 0u64;
        for entry in entries {
            progress.set_message(&entry.internal_path);
            zip.start_file(entry.internal_path.as_str(), options)
                .map_err(fail)?;
            zip.write_all(&entry.content)
                .map_err(|e| ExportError::archive_write(output, e))?;

            bytes += entry.content.len() as u64;
            progress.inc(1);
            debug!(path = %entry.internal_path, bytes = entry.content.len(), "added to archive");
        }

        let mut writer = zip.finish().map_err(fail)?;
        writer
            .flush()
            .map_err(|e| ExportError::archive_write(output, e))?;
        progress.finish();

        info!(
            path = %output.display(),
            entries = entries.len(),
            bytes,
            "archive written"
        );

        Ok(ArchiveSummary {
            entries: entries.len(),
            bytes,
        })
    }
}
