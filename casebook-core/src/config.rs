//! Configuration loading.
//!
//! The current user is always explicit; nothing in the engine reads an ambient
//! "signed in" user.

use crate::{ConfigError, UserId};
use chrono::Weekday;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

/// Environment variable naming the config file path.
pub const CONFIG_ENV_VAR: &str = "CASEBOOK_CONFIG";

/// Engine configuration.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct CasebookConfig {
    pub current_user_id: UserId,
    /// Coordinated-entry score at or above which a client is high priority.
    pub high_priority_score: i32,
    /// Dashboard spotlight threshold on client priority score.
    pub spotlight_priority_score: i32,
    pub spotlight_limit: usize,
    pub recent_clients_limit: usize,
    pub recent_interactions_limit: usize,
    pub upcoming_tasks_limit: usize,
    /// First day of the "this week" note window.
    pub week_starts_on: Weekday,
}

impl CasebookConfig {
    /// Defaults matching the dashboard's stock behavior.
    pub fn default_for_user(current_user_id: UserId) -> Self {
        Self {
            current_user_id,
            high_priority_score: 15,
            spotlight_priority_score: 80,
            spotlight_limit: 3,
            recent_clients_limit: 4,
            recent_interactions_limit: 5,
            upcoming_tasks_limit: 3,
            week_starts_on: Weekday::Sun,
        }
    }

    /// Load from the path named by `CASEBOOK_CONFIG`, then validate.
    pub fn from_env() -> Result<Self, ConfigError> {
        let path = std::env::var_os(CONFIG_ENV_VAR)
            .map(PathBuf::from)
            .ok_or(ConfigError::MissingConfigPath)?;
        Self::from_path(&path)
    }

    /// Load from a TOML file, then validate.
    pub fn from_path(path: &Path) -> Result<Self, ConfigError> {
        let contents = std::fs::read_to_string(path)?;
        Self::from_toml_str(&contents)
    }

    /// Parse TOML text, then validate.
    pub fn from_toml_str(contents: &str) -> Result<Self, ConfigError> {
        let config: CasebookConfig = toml::from_str(contents)?;
        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.high_priority_score < 0 {
            return Err(ConfigError::InvalidValue {
                field: "high_priority_score",
                reason: "must be >= 0".to_string(),
            });
        }
        if self.spotlight_priority_score < 0 {
            return Err(ConfigError::InvalidValue {
                field: "spotlight_priority_score",
                reason: "must be >= 0".to_string(),
            });
        }
        let limits = [
            ("spotlight_limit", self.spotlight_limit),
            ("recent_clients_limit", self.recent_clients_limit),
            ("recent_interactions_limit", self.recent_interactions_limit),
            ("upcoming_tasks_limit", self.upcoming_tasks_limit),
        ];
        for (field, value) in limits {
            if value == 0 {
                return Err(ConfigError::InvalidValue {
                    field,
                    reason: "must be > 0".to_string(),
                });
            }
        }
        Ok(())
    }
}
