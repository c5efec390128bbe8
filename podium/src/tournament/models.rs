//! Tournament session models.

use crate::{arrangement::DEFAULT_SLOT_COUNT, finalize::MAX_RANKS};
use serde::{Deserialize, Serialize};

/// Tournament ID type
pub type TournamentId = String;

/// Tournament status as reported by the tournament service
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TournamentStatus {
    /// Matches still being played or results being arranged
    #[default]
    Ongoing,
    /// Play is over; results can no longer change
    Ended,
    /// Standings have been submitted
    Finalized,
}

impl TournamentStatus {
    /// Whether arrangement must be read-only regardless of role
    pub fn is_locked(self) -> bool {
        !matches!(self, Self::Ongoing)
    }
}

impl std::fmt::Display for TournamentStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            TournamentStatus::Ongoing => write!(f, "ongoing"),
            TournamentStatus::Ended => write!(f, "ended"),
            TournamentStatus::Finalized => write!(f, "finalized"),
        }
    }
}

/// Ranking session configuration
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SessionConfig {
    /// Tournament being ranked
    pub tournament_id: TournamentId,

    /// Game category sent with the final standings
    pub game_category: String,

    /// Number of ranked slots, fixed for the session (default: 25)
    pub slot_count: usize,
}

impl SessionConfig {
    pub fn new(tournament_id: &str, game_category: &str) -> Self {
        Self {
            tournament_id: tournament_id.to_string(),
            game_category: game_category.to_string(),
            slot_count: DEFAULT_SLOT_COUNT,
        }
    }

    pub fn with_slot_count(mut self, slot_count: usize) -> Self {
        self.slot_count = slot_count;
        self
    }

    /// Validate configuration
    pub fn validate(&self) -> Result<(), String> {
        if self.tournament_id.trim().is_empty() {
            return Err("Tournament id must not be empty".to_string());
        }

        if self.game_category.trim().is_empty() {
            return Err("Game category must not be empty".to_string());
        }

        if self.slot_count == 0 || self.slot_count > MAX_RANKS {
            return Err(format!("Slot count must be between 1 and {MAX_RANKS}"));
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_slot_count() {
        let config = SessionConfig::new("t-1", "valorant");
        assert_eq!(config.slot_count, 25);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_validate_rejects_empty_ids() {
        assert!(SessionConfig::new(" ", "valorant").validate().is_err());
        assert!(SessionConfig::new("t-1", "").validate().is_err());
    }

    #[test]
    fn test_validate_slot_bounds() {
        let config = SessionConfig::new("t", "c");
        assert!(config.clone().with_slot_count(0).validate().is_err());
        assert!(config.clone().with_slot_count(26).validate().is_err());
        assert!(config.clone().with_slot_count(1).validate().is_ok());
        assert!(config.with_slot_count(25).validate().is_ok());
    }

    #[test]
    fn test_status_lock() {
        assert!(!TournamentStatus::Ongoing.is_locked());
        assert!(TournamentStatus::Ended.is_locked());
        assert!(TournamentStatus::Finalized.is_locked());
    }

    #[test]
    fn test_status_serde_lowercase() {
        let status: TournamentStatus = serde_json::from_str("\"ended\"").unwrap();
        assert_eq!(status, TournamentStatus::Ended);
        assert_eq!(status.to_string(), "ended");
    }
}
