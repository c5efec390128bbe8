//! Edit access derived from role and tournament lock status.

use serde::{Deserialize, Serialize};

/// The two externally supplied facts that decide whether arrangement state
/// may change.
///
/// Callers construct this fresh from their current role and tournament status
/// for every mutating call; it is never stored by the engine.
#[derive(Clone, Copy, Debug, Default, Deserialize, Eq, PartialEq, Serialize)]
pub struct Access {
    /// Caller holds organizer rights for the tournament
    pub has_edit_rights: bool,
    /// Tournament results are already final
    pub is_locked: bool,
}

impl Access {
    pub fn new(has_edit_rights: bool, is_locked: bool) -> Self {
        Self {
            has_edit_rights,
            is_locked,
        }
    }

    /// Organizer access on an unlocked tournament
    pub fn editor() -> Self {
        Self::new(true, false)
    }

    /// Viewer access: never editable
    pub fn viewer() -> Self {
        Self::new(false, false)
    }

    /// `has_edit_rights AND NOT is_locked`
    pub fn editable(self) -> bool {
        self.has_edit_rights && !self.is_locked
    }
}
