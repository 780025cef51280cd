//! Handling of repeated hand-ins.

use serde::{Deserialize, Serialize};

/// What the ledger does when a user hands in a task they already have an
/// entry for.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ResubmissionPolicy {
    /// Keep every entry; readers pick the newest.
    #[default]
    Append,
    /// Refuse the second entry with a conflict.
    Reject,
}

impl ResubmissionPolicy {
    /// Returns `true` when a new entry may be written given whether the user
    /// already has one.
    #[must_use]
    pub const fn permits(self, already_submitted: bool) -> bool {
        match self {
            Self::Append => true,
            Self::Reject => !already_submitted,
        }
    }
}
