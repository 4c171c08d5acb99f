//! Error types for Casebook operations
//!
//! Read paths never fail: a missing record is `None` or an empty list. Only
//! mutations, fixture loading and configuration loading return errors.

use crate::EntityType;
use thiserror::Error;
use uuid::Uuid;

/// Record store errors.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum StoreError {
    #[error("Record not found: {entity_type:?} with id {id}")]
    NotFound { entity_type: EntityType, id: Uuid },

    #[error("Duplicate id for {entity_type:?}: {id}")]
    DuplicateId { entity_type: EntityType, id: Uuid },
}

/// Record validation errors.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum ValidationError {
    #[error("Required field missing: {field}")]
    RequiredFieldMissing { field: String },

    #[error("Invalid value for {field}: {reason}")]
    InvalidValue { field: String, reason: String },
}

/// Configuration errors.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Missing configuration file path (set CASEBOOK_CONFIG)")]
    MissingConfigPath,

    #[error("Failed to read config file: {0}")]
    Io(#[from] std::io::Error),

    #[error("Failed to parse config TOML: {0}")]
    Parse(#[from] toml::de::Error),

    #[error("Invalid config value for {field}: {reason}")]
    InvalidValue { field: &'static str, reason: String },
}

/// Fixture loading errors.
#[derive(Debug, Error)]
pub enum FixtureError {
    #[error("Failed to read fixture file: {0}")]
    Io(#[from] std::io::Error),

    #[error("Failed to parse fixture JSON: {0}")]
    Parse(#[from] serde_json::Error),
}

/// Master error type for all Casebook errors.
#[derive(Debug, Error)]
pub enum CasebookError {
    #[error("Store error: {0}")]
    Store(#[from] StoreError),

    #[error("Validation error: {0}")]
    Validation(#[from] ValidationError),

    #[error("Config error: {0}")]
    Config(#[from] ConfigError),

    #[error("Fixture error: {0}")]
    Fixture(#[from] FixtureError),
}

/// Result type alias for Casebook operations.
pub type CasebookResult<T> = Result<T, CasebookError>;

// =============================================================================
// TESTS
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_store_error_display_not_found() {
        let err = StoreError::NotFound {
            entity_type: EntityType::Client,
            id: Uuid::nil(),
        };
        let msg = format!("{}", err);
        assert!(msg.contains("Record not found"));
        assert!(msg.contains("Client"));
        assert!(msg.contains("00000000-0000-0000-0000-000000000000"));
    }

    #[test]
    fn test_store_error_display_duplicate() {
        let err = StoreError::DuplicateId {
            entity_type: EntityType::Note,
            id: Uuid::nil(),
        };
        assert!(format!("{}", err).contains("Duplicate id for Note"));
    }

    #[test]
    fn test_validation_error_display() {
        let err = ValidationError::RequiredFieldMissing {
            field: "content".to_string(),
        };
        assert_eq!(format!("{}", err), "Required field missing: content");
    }

    #[test]
    fn test_config_error_display_invalid_value() {
        let err = ConfigError::InvalidValue {
            field: "spotlight_limit",
            reason: "must be > 0".to_string(),
        };
        let msg = format!("{}", err);
        assert!(msg.contains("spotlight_limit"));
        assert!(msg.contains("must be > 0"));
    }

    #[test]
    fn test_casebook_error_from_variants() {
        let store = CasebookError::from(StoreError::NotFound {
            entity_type: EntityType::Task,
            id: Uuid::nil(),
        });
        assert!(matches!(store, CasebookError::Store(_)));

        let validation = CasebookError::from(ValidationError::InvalidValue {
            field: "score".to_string(),
            reason: "negative".to_string(),
        });
        assert!(matches!(validation, CasebookError::Validation(_)));

        let config = CasebookError::from(ConfigError::MissingConfigPath);
        assert!(matches!(config, CasebookError::Config(_)));

        let parse = serde_json::from_str::<serde_json::Value>("{").unwrap_err();
        let fixture = CasebookError::from(FixtureError::from(parse));
        assert!(matches!(fixture, CasebookError::Fixture(_)));
    }
}
