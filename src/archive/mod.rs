mod builder;
mod progress;

pub use builder::{ArchiveBuilder, ArchiveEntry, ArchiveSummary};
pub use progress::{reporter, IndicatifProgress, NoopProgress, ProgressHandle, ProgressReporter};
