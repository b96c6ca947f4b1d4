// Library crate exposing modules for the binary and integration tests

pub mod archive;
pub mod cli;
pub mod error;
pub mod export;
pub mod model;
pub mod repository;
pub mod util;

pub use error::{ExportError, Result};
pub use export::{export, export_diff, export_path_list, ChangeSource, ExportRequest, ExportSummary};
