// Shared test fixtures for integration tests
// Functions here are used across different test files
#![allow(dead_code)]

use git2::{Oid, Repository, Signature};
use std::fs::File;
use std::io::{self, Read, Write};
use std::path::{Path, PathBuf};
use std::sync::{Arc, Mutex};
use tempfile::TempDir;

/// Create a temporary git repository (no commits yet)
pub fn create_test_repo() -> (TempDir, PathBuf, Repository) {
    let dir = TempDir::new().unwrap();
    let repo_path = dir.path().to_path_buf();
    let repo = Repository::init(&repo_path).unwrap();

    // Configure git user for commits
    let mut config = repo.config().unwrap();
    config.set_str("user.name", "Test User").unwrap();
    config.set_str("user.email", "test@example.com").unwrap();

    (dir, repo_path, repo)
}

/// Write files, remove paths, and commit the result on HEAD
pub fn commit(
    repo: &Repository,
    files: &[(&str, &[u8])],
    removed: &[&str],
    message: &str,
) -> Oid {
    let files: Vec<(&Path, &[u8])> = files.iter().map(|&(p, c)| (Path::new(p), c)).collect();
    let removed: Vec<&Path> = removed.iter().map(Path::new).collect();
    commit_paths(repo, &files, &removed, message)
}

/// Same as `commit`, for paths that are not necessarily valid UTF-8
pub fn commit_paths(
    repo: &Repository,
    files: &[(&Path, &[u8])],
    removed: &[&Path],
    message: &str,
) -> Oid {
    let sig = Signature::now("Test User", "test@example.com").unwrap();
    let workdir = repo.workdir().unwrap().to_path_buf();
    let mut index = repo.index().unwrap();

    for path in removed {
        std::fs::remove_file(workdir.join(path)).unwrap();
        index.remove_path(path).unwrap();
    }

    for (path, content) in files {
        // Write file to working directory
        let full_path = workdir.join(path);
        if let Some(parent) = full_path.parent() {
            std::fs::create_dir_all(parent).unwrap();
        }
        std::fs::write(&full_path, content).unwrap();

        index.add_path(path).unwrap();
    }

    index.write().unwrap();
    let tree_id = index.write_tree().unwrap();
    let tree = repo.find_tree(tree_id).unwrap();

    let parent = repo.head().ok().and_then(|h| h.peel_to_commit().ok());
    let parents: Vec<&git2::Commit> = parent.iter().collect();

    repo.commit(Some("HEAD"), &sig, &sig, message, &tree, &parents)
        .unwrap()
}

/// Add or update files and commit
pub fn add_commit(repo: &Repository, files: &[(&str, &[u8])], message: &str) -> Oid {
    commit(repo, files, &[], message)
}

/// Delete files and commit
pub fn remove_commit(repo: &Repository, paths: &[&str], message: &str) -> Oid {
    commit(repo, &[], paths, message)
}

/// Move a file, optionally changing its content, and commit
pub fn rename_commit(
    repo: &Repository,
    from: &str,
    to: &str,
    content: &[u8],
    message: &str,
) -> Oid {
    commit(repo, &[(to, content)], &[from], message)
}

/// Point a branch at a commit
pub fn branch(repo: &Repository, name: &str, target: Oid) {
    let commit = repo.find_commit(target).unwrap();
    repo.branch(name, &commit, true).unwrap();
}

/// Read every entry of a zip archive, in archive order
pub fn read_zip(path: &Path) -> Vec<(String, Vec<u8>)> {
    let mut archive = zip::ZipArchive::new(File::open(path).unwrap()).unwrap();
    (0..archive.len())
        .map(|i| {
            let mut file = archive.by_index(i).unwrap();
            let mut content = Vec::new();
            file.read_to_end(&mut content).unwrap();
            (file.name().to_string(), content)
        })
        .collect()
}

/// Text long enough for rename detection to survive a small edit
pub fn long_text(tag: &str) -> Vec<u8> {
    (0..40)
        .map(|i| format!("line {i} of a reasonably long file\n"))
        .chain(std::iter::once(format!("{tag}\n")))
        .collect::<String>()
        .into_bytes()
}

/// In-memory sink for formatted log lines
#[derive(Clone, Default)]
pub struct LogBuffer(Arc<Mutex<Vec<u8>>>);

impl LogBuffer {
    pub fn contents(&self) -> String {
        String::from_utf8_lossy(&self.0.lock().unwrap()).into_owned()
    }
}

impl Write for LogBuffer {
    fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
        self.0.lock().unwrap().extend_from_slice(buf);
        Ok(buf.len())
    }

    fn flush(&mut self) -> io::Result<()> {
        Ok(())
    }
}

/// Run `f` with a subscriber that records everything it logs on this thread
pub fn capture_logs<T>(f: impl FnOnce() -> T) -> (T, String) {
    let buffer = LogBuffer::default();
    let writer = buffer.clone();
    let subscriber = tracing_subscriber::fmt()
        .with_max_level(tracing::Level::DEBUG)
        .with_ansi(false)
        .with_writer(move || writer.clone())
        .finish();

    let result = tracing::subscriber::with_default(subscriber, f);
    (result, buffer.contents())
}
