//! Team data models.

use serde::{Deserialize, Serialize};
use std::{
    borrow::Borrow,
    fmt,
    hash::{Hash, Hasher},
};

/// Canonical team identity.
#[derive(Clone, Debug, Deserialize, Eq, Hash, Ord, PartialEq, PartialOrd, Serialize)]
#[serde(transparent)]
pub struct TeamId(String);

impl TeamId {
    pub fn new(id: &str) -> Self {
        Self(id.to_string())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for TeamId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl From<String> for TeamId {
    fn from(value: String) -> Self {
        Self(value)
    }
}

impl From<&str> for TeamId {
    fn from(value: &str) -> Self {
        Self::new(value)
    }
}

impl Borrow<str> for TeamId {
    fn borrow(&self) -> &str {
        &self.0
    }
}

/// A competing team, immutable once registered for a session.
///
/// Two teams are the same team when their ids match; name and members are
/// display data only.
#[derive(Clone, Debug, Deserialize, Serialize)]
pub struct Team {
    /// Unique identity
    pub id: TeamId,
    /// Display name
    pub name: String,
    /// Member display names (may be empty)
    pub members: Vec<String>,
}

impl Team {
    /// Create a team without members
    pub fn new(id: impl Into<TeamId>, name: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            members: Vec::new(),
        }
    }

    /// Attach a member list
    pub fn with_members(mut self, members: Vec<String>) -> Self {
        self.members = members;
        self
    }
}

impl PartialEq for Team {
    fn eq(&self, other: &Self) -> bool {
        self.id == other.id
    }
}

impl Eq for Team {}

impl Hash for Team {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.id.hash(state);
    }
}

impl fmt::Display for Team {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.name)
    }
}
