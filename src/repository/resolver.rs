use tracing::debug;

use crate::error::{ExportError, Result};
use crate::model::Revision;

use super::vcs::VersionControl;

/// Reference used when no target revision is given
pub const HEAD: &str = "HEAD";

/// Resolve a user-supplied reference to a commit.
pub fn resolve(vcs: &impl VersionControl, reference: &str) -> Result<Revision> {
    let reference = reference.trim();
    if reference.is_empty() {
        return Err(ExportError::unknown_reference(reference, "empty reference"));
    }

    let revision = vcs.resolve(reference)?;
    debug!(reference, id = %revision.id, "resolved reference");
    Ok(revision)
}

/// Resolve the target revision, falling back to the checked-out commit.
pub fn resolve_target(vcs: &impl VersionControl, reference: Option<&str>) -> Result<Revision> {
    resolve(vcs, reference.unwrap_or(HEAD))
}
