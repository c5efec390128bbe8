//! Client configuration management.
//!
//! Consolidates all environment variable reads and provides validated configuration.

use podium::{MAX_RANKS, SessionConfig, TournamentStatus};
use std::path::PathBuf;

const DEFAULT_SERVER_URL: &str = "http://localhost:8080";
const DEFAULT_LOG_FILE: &str = "podium_client.log";

/// Complete client configuration loaded from environment variables
#[derive(Debug, Clone)]
pub struct ClientConfig {
    /// Base URL of the tournament service
    pub server_url: String,
    /// Tournament being ranked
    pub tournament_id: String,
    /// Game category sent with the final standings
    pub game_category: String,
    /// Number of ranked slots
    pub rank_slots: usize,
    /// Whether this user may edit the standings
    pub editor: bool,
    /// Whether the tournament has already ended
    pub locked: bool,
    /// Bearer token for the finalize call
    pub access_token: Option<String>,
    /// File receiving log output while the TUI owns the terminal
    pub log_file: PathBuf,
}

/// Values given on the command line, taking precedence over the environment
#[derive(Debug, Clone, Default)]
pub struct Overrides {
    pub server_url: Option<String>,
    pub tournament_id: Option<String>,
    pub game_category: Option<String>,
    pub editor: Option<bool>,
}

impl ClientConfig {
    /// Load configuration from environment variables
    ///
    /// # Errors
    ///
    /// Returns error if required variables are missing or invalid
    pub fn from_env(overrides: Overrides) -> Result<Self, ConfigError> {
        let server_url = overrides
            .server_url
            .or_else(|| std::env::var("PODIUM_SERVER_URL").ok())
            .unwrap_or_else(|| DEFAULT_SERVER_URL.to_string());

        // Tournament identity (REQUIRED)
        let tournament_id = overrides
            .tournament_id
            .or_else(|| std::env::var("PODIUM_TOURNAMENT_ID").ok())
            .ok_or_else(|| ConfigError::MissingRequired {
                var: "PODIUM_TOURNAMENT_ID".to_string(),
                hint: "Pass --tournament ID or set it in .env".to_string(),
            })?;

        let game_category = overrides
            .game_category
            .or_else(|| std::env::var("PODIUM_GAME_CATEGORY").ok())
            .ok_or_else(|| ConfigError::MissingRequired {
                var: "PODIUM_GAME_CATEGORY".to_string(),
                hint: "Pass --category NAME or set it in .env".to_string(),
            })?;

        let access_token = std::env::var("PODIUM_ACCESS_TOKEN")
            .ok()
            .filter(|token| !token.trim().is_empty());

        Ok(ClientConfig {
            server_url: server_url.trim_end_matches('/').to_string(),
            tournament_id,
            game_category,
            rank_slots: parse_env_or("PODIUM_RANK_SLOTS", MAX_RANKS),
            editor: overrides
                .editor
                .unwrap_or_else(|| parse_env_or("PODIUM_EDITOR", false)),
            locked: parse_env_or("PODIUM_LOCKED", false),
            access_token,
            log_file: std::env::var("PODIUM_LOG_FILE")
                .map(PathBuf::from)
                .unwrap_or_else(|_| PathBuf::from(DEFAULT_LOG_FILE)),
        })
    }

    /// Validate configuration after loading
    pub fn validate(&self) -> Result<(), ConfigError> {
        if !self.server_url.starts_with("http://") && !self.server_url.starts_with("https://") {
            return Err(ConfigError::Invalid {
                var: "PODIUM_SERVER_URL".to_string(),
                reason: "Must start with http:// or https://".to_string(),
            });
        }

        if self.tournament_id.trim().is_empty() {
            return Err(ConfigError::Invalid {
                var: "PODIUM_TOURNAMENT_ID".to_string(),
                reason: "Must not be empty".to_string(),
            });
        }

        if self.game_category.trim().is_empty() {
            return Err(ConfigError::Invalid {
                var: "PODIUM_GAME_CATEGORY".to_string(),
                reason: "Must not be empty".to_string(),
            });
        }

        if self.rank_slots == 0 || self.rank_slots > MAX_RANKS {
            return Err(ConfigError::Invalid {
                var: "PODIUM_RANK_SLOTS".to_string(),
                reason: format!("Must be between 1 and {MAX_RANKS}"),
            });
        }

        Ok(())
    }

    pub fn session_config(&self) -> SessionConfig {
        SessionConfig::new(&self.tournament_id, &self.game_category)
            .with_slot_count(self.rank_slots)
    }

    /// Status the session starts in
    pub fn initial_status(&self) -> TournamentStatus {
        if self.locked {
            TournamentStatus::Ended
        } else {
            TournamentStatus::Ongoing
        }
    }
}

/// Configuration error types
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("Missing required environment variable: {var}\nHint: {hint}")]
    MissingRequired { var: String, hint: String },

    #[error("Invalid configuration for {var}: {reason}")]
    Invalid { var: String, reason: String },
}

/// Helper to parse environment variable with default fallback
fn parse_env_or<T>(key: &str, default: T) -> T
where
    T: std::str::FromStr,
{
    std::env::var(key)
        .ok()
        .and_then(|v| v.parse().ok())
        .unwrap_or(default)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn config() -> ClientConfig {
        ClientConfig {
            server_url: "http://localhost:8080".to_string(),
            tournament_id: "spring-cup".to_string(),
            game_category: "valorant".to_string(),
            rank_slots: 25,
            editor: true,
            locked: false,
            access_token: None,
            log_file: PathBuf::from(DEFAULT_LOG_FILE),
        }
    }

    #[test]
    fn test_config_error_display() {
        let err = ConfigError::MissingRequired {
            var: "PODIUM_TOURNAMENT_ID".to_string(),
            hint: "Pass --tournament".to_string(),
        };
        let msg = err.to_string();
        assert!(msg.contains("PODIUM_TOURNAMENT_ID"));
        assert!(msg.contains("Pass --tournament"));
    }

    #[test]
    fn test_valid_config() {
        assert!(config().validate().is_ok());
    }

    #[test]
    fn test_config_validation_rank_slots() {
        let mut config = config();
        config.rank_slots = 0;
        assert!(matches!(config.validate(), Err(ConfigError::Invalid { .. })));

        config.rank_slots = MAX_RANKS + 1;
        assert!(matches!(config.validate(), Err(ConfigError::Invalid { .. })));
    }

    #[test]
    fn test_config_validation_server_url() {
        let mut config = config();
        config.server_url = "localhost:8080".to_string();
        let err = config.validate().unwrap_err();
        assert!(err.to_string().contains("PODIUM_SERVER_URL"));
    }

    #[test]
    fn test_session_config_and_status() {
        let mut config = config();
        config.rank_slots = 10;
        let session = config.session_config();
        assert_eq!(session.slot_count, 10);
        assert!(session.validate().is_ok());
        assert_eq!(config.initial_status(), TournamentStatus::Ongoing);

        config.locked = true;
        assert!(config.initial_status().is_locked());
    }

    #[test]
    fn test_overrides_take_precedence() {
        let overrides = Overrides {
            server_url: Some("https://ranks.example.org/".to_string()),
            tournament_id: Some("override-cup".to_string()),
            game_category: Some("chess".to_string()),
            editor: Some(true),
        };

        let config = ClientConfig::from_env(overrides).unwrap();

        assert_eq!(config.server_url, "https://ranks.example.org");
        assert_eq!(config.tournament_id, "override-cup");
        assert_eq!(config.game_category, "chess");
        assert!(config.editor);
    }
}
