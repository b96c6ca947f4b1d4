use clap::{ArgAction, Parser};
use std::path::PathBuf;
use tracing::Level;

use crate::export::{ChangeSource, ExportRequest};

#[derive(Parser, Debug)]
#[command(
    name = "gitzip",
    version,
    about = "Export the files changed between two git revisions into a zip archive",
    long_about = "Export the files changed between two git revisions into a zip archive.\n\n\
        File contents are taken from the current working tree, so the target \
        revision should be what is checked out."
)]
pub struct Cli {
    /// Zip archive to create (replaced if it exists)
    pub output: PathBuf,

    /// Base revision (commit, branch, tag, ...)
    #[arg(required_unless_present = "text_file")]
    pub from_ref: Option<String>,

    /// Target revision [default: HEAD]
    pub to_ref: Option<String>,

    /// Take paths from a text file (one per line) instead of a git diff
    #[arg(
        short = 't',
        long = "text-file",
        visible_aliases = ["txt", "text-mode"],
        value_name = "LIST",
        conflicts_with_all = ["from_ref", "to_ref"]
    )]
    pub text_file: Option<PathBuf>,

    /// More log output (-v info, -vv debug)
    #[arg(short, long, action = ArgAction::Count)]
    pub verbose: u8,

    /// No progress bar or summary
    #[arg(short, long)]
    pub quiet: bool,
}

impl Cli {
    pub fn log_level(&self) -> Level {
        match self.verbose {
            0 => Level::WARN,
            1 => Level::INFO,
            _ => Level::DEBUG,
        }
    }

    /// Bind the parsed arguments to a repository root.
    pub fn into_request(self, repo_root: PathBuf) -> ExportRequest {
        let source = match (self.text_file, self.from_ref) {
            (Some(list), _) => ChangeSource::PathList(list),
            (None, from) => ChangeSource::Diff {
                from: from.unwrap_or_default(),
                to: self.to_ref,
            },
        };

        ExportRequest {
            repo_root,
            output: self.output,
            source,
        }
    }
}
