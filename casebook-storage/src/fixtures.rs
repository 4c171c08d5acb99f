//! Fixture loading.
//!
//! A fixture set is the whole session's record population, supplied once at
//! start-up as JSON. Every collection is optional in the document.

use casebook_core::{
    Assessment, Client, FixtureError, Note, Program, Provider, Referral, Service, Task,
    TimeEntry, User,
};
use serde::{Deserialize, Serialize};
use std::path::Path;

/// Every record collection, in stored order.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct FixtureSet {
    pub users: Vec<User>,
    pub clients: Vec<Client>,
    pub programs: Vec<Program>,
    pub notes: Vec<Note>,
    pub services: Vec<Service>,
    pub assessments: Vec<Assessment>,
    pub tasks: Vec<Task>,
    pub providers: Vec<Provider>,
    pub referrals: Vec<Referral>,
    pub time_entries: Vec<TimeEntry>,
}

impl FixtureSet {
    pub fn from_json_str(contents: &str) -> Result<Self, FixtureError> {
        Ok(serde_json::from_str(contents)?)
    }

    pub fn from_path(path: &Path) -> Result<Self, FixtureError> {
        let contents = std::fs::read_to_string(path)?;
        Self::from_json_str(&contents)
    }

    pub fn to_json_string(&self) -> Result<String, FixtureError> {
        Ok(serde_json::to_string_pretty(self)?)
    }

    /// Total number of records across all collections.
    pub fn record_count(&self) -> usize {
        self.users.len()
            + self.clients.len()
            + self.programs.len()
            + self.notes.len()
            + self.services.len()
            + self.assessments.len()
            + self.tasks.len()
            + self.providers.len()
            + self.referrals.len()
            + self.time_entries.len()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_document_is_empty_set() {
        let set = FixtureSet::from_json_str("{}").unwrap();
        assert_eq!(set.record_count(), 0);
    }

    #[test]
    fn test_unknown_collection_rejected() {
        let result = FixtureSet::from_json_str(r#"{"widgets": []}"#);
        assert!(matches!(result, Err(FixtureError::Parse(_))));
    }

    #[test]
    fn test_parses_program() {
        let json = r#"{
            "programs": [{
                "id": "0190f6a0-0000-7000-8000-0000000000a1",
                "name": "Harbor House",
                "type": "rapid_rehousing",
                "provider": "Harbor Services",
                "address": "1 Pier Rd",
                "capacity": 20,
                "current_occupancy": 17
            }]
        }"#;
        let set = FixtureSet::from_json_str(json).unwrap();
        assert_eq!(set.programs.len(), 1);
        assert_eq!(set.programs[0].occupancy_rate(), 85);
    }

    #[test]
    fn test_missing_file_is_io_error() {
        let result = FixtureSet::from_path(Path::new("/nonexistent/fixtures.json"));
        assert!(matches!(result, Err(FixtureError::Io(_))));
    }
}
