use anyhow::{Context, Result};
use clap::Parser;
use std::process::ExitCode;
use tracing::Level;

use gitzip::archive::reporter;
use gitzip::cli::Cli;
use gitzip::util::format_size;
use gitzip::{export, ExportError};

fn main() -> ExitCode {
    let cli = Cli::parse();
    init_logging(cli.log_level());

    match run(cli) {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => match err.downcast_ref::<ExportError>() {
            Some(export_err) => {
                eprintln!("gitzip: error: {}: {}", export_err.kind(), export_err);
                ExitCode::from(export_err.exit_code())
            }
            None => {
                eprintln!("gitzip: error: {:#}", err);
                ExitCode::FAILURE
            }
        },
    }
}

fn init_logging(level: Level) {
    let builder = tracing_subscriber::fmt()
        .with_max_level(level)
        .with_writer(std::io::stderr);

    if level >= Level::DEBUG {
        builder.init();
    } else {
        builder.without_time().with_target(false).init();
    }
}

fn run(cli: Cli) -> Result<()> {
    let quiet = cli.quiet;
    let repo_root = std::env::current_dir().context("Could not determine the current directory")?;
    let request = cli.into_request(repo_root);

    let summary = export(&request, reporter(quiet))?;

    if !quiet {
        println!(
            "Wrote {} files ({}) to {}",
            summary.archive.entries,
            format_size(summary.archive.bytes),
            request.output.display()
        );
        if summary.deleted > 0 {
            println!("Skipped {} deleted files", summary.deleted);
        }
    }

    Ok(())
}
