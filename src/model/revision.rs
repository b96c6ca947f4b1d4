use std::fmt;

/// A reference resolved to a concrete commit
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Revision {
    /// The reference as the user wrote it (branch, tag, hash, `HEAD`, ...)
    pub reference: String,
    /// Full hex id of the commit it resolved to
    pub id: String,
    /// Commit time, seconds since the Unix epoch
    pub time: i64,
}

impl Revision {
    pub fn new(reference: impl Into<String>, id: impl Into<String>, time: i64) -> Self {
        Self {
            reference: reference.into(),
            id: id.into(),
            time,
        }
    }

    /// Abbreviated commit id for log output
    pub fn short_id(&self) -> &str {
        self.id.get(..8).unwrap_or(&self.id)
    }
}

impl fmt::Display for Revision {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.reference == self.id {
            write!(f, "{}", self.short_id())
        } else {
            write!(f, "{} ({})", self.reference, self.short_id())
        }
    }
}
