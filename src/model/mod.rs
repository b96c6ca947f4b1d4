mod change;
mod revision;

pub use change::{ChangeEntry, ChangeKind, ChangeSet};
pub use revision::Revision;
