//! Core record structures
//!
//! Records are immutable snapshots for the lifetime of a session. Relations are
//! held by id; resolving a client's program is a join against the program table.

use crate::{
    ActivityType, AssessmentId, ClientId, HousingStatus, HouseholdMemberId, NoteCategory, NoteId,
    ProgramId, ProgramType, ProviderId, ReferralId, ReferralStatus, ServiceId, ServiceStatus,
    TaskId, TaskPriority, TaskStatus, TimeEntryId, TimeEntryStatus, Timestamp, UserId, UserRole,
};
use chrono::{NaiveDate, NaiveTime};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Staff member using the dashboard.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct User {
    pub id: UserId,
    pub name: String,
    pub email: String,
    pub role: UserRole,
    #[serde(default)]
    pub avatar_url: Option<String>,
    #[serde(default)]
    pub organization: Option<String>,
}

/// Geographic point with an optional street address.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Location {
    pub lat: f64,
    pub lng: f64,
    #[serde(default)]
    pub address: Option<String>,
}

/// Person receiving services.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Client {
    pub id: ClientId,
    pub first_name: String,
    pub last_name: String,
    #[serde(default)]
    pub date_of_birth: Option<NaiveDate>,
    #[serde(default)]
    pub gender: Option<String>,
    #[serde(default)]
    pub ethnicity: Option<String>,
    #[serde(default)]
    pub race: Option<String>,
    #[serde(default)]
    pub phone: Option<String>,
    #[serde(default)]
    pub email: Option<String>,
    pub is_veteran: bool,
    pub has_disability: bool,
    pub housing_status: HousingStatus,
    #[serde(default)]
    pub location: Option<Location>,
    #[serde(default)]
    pub profile_image: Option<String>,
    pub intake_date: Timestamp,
    pub last_updated: Timestamp,
    #[serde(default)]
    pub case_manager_id: Option<UserId>,
    /// Nominal range 0-100.
    #[serde(default)]
    pub priority_score: Option<i32>,
    /// Ordered; the head of household is not necessarily first.
    #[serde(default)]
    pub household: Vec<HouseholdMember>,
    #[serde(default)]
    pub program_id: Option<ProgramId>,
}

impl Client {
    /// `"{first_name} {last_name}"`, the form every name search matches against.
    pub fn full_name(&self) -> String {
        format!("{} {}", self.first_name, self.last_name)
    }

    /// Priority score with a missing value read as zero.
    pub fn priority(&self) -> i32 {
        self.priority_score.unwrap_or(0)
    }

    /// Head of household, if one is recorded.
    pub fn head_of_household(&self) -> Option<&HouseholdMember> {
        self.household.iter().find(|m| m.is_head_of_household)
    }
}

/// Member of a client's household.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct HouseholdMember {
    pub id: HouseholdMemberId,
    pub first_name: String,
    pub last_name: String,
    pub date_of_birth: NaiveDate,
    pub relationship: String,
    pub is_head_of_household: bool,
    #[serde(default)]
    pub profile_image: Option<String>,
}

/// Housing or shelter offering.
///
/// `current_occupancy <= capacity` is a display convention and is not enforced.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Program {
    pub id: ProgramId,
    pub name: String,
    #[serde(rename = "type")]
    pub program_type: ProgramType,
    pub provider: String,
    #[serde(default)]
    pub address: String,
    pub capacity: u32,
    pub current_occupancy: u32,
}

impl Program {
    /// `round(current_occupancy / capacity * 100)`; zero capacity yields 0.
    pub fn occupancy_rate(&self) -> u32 {
        occupancy_rate(u64::from(self.current_occupancy), u64::from(self.capacity))
    }

    /// Beds still open. Saturates at zero for an over-capacity program.
    pub fn available_capacity(&self) -> u32 {
        self.capacity.saturating_sub(self.current_occupancy)
    }

    /// Whether occupancy exceeds capacity.
    pub fn is_over_capacity(&self) -> bool {
        self.current_occupancy > self.capacity
    }
}

/// Percentage of `capacity` taken by `occupancy`, rounded half away from zero.
/// A zero capacity is defined as 0%.
pub fn occupancy_rate(occupancy: u64, capacity: u64) -> u32 {
    if capacity == 0 {
        return 0;
    }
    let rate = (occupancy as f64 / capacity as f64 * 100.0).round();
    rate.min(u32::MAX as f64) as u32
}

/// Free-text record of a staff-client interaction.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Note {
    pub id: NoteId,
    pub client_id: ClientId,
    pub author_id: UserId,
    pub author_name: String,
    pub content: String,
    pub created_at: Timestamp,
    pub category: NoteCategory,
    pub is_private: bool,
}

/// Service delivered to a client by a provider.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Service {
    pub id: ServiceId,
    pub client_id: ClientId,
    pub service_type: String,
    pub provider_id: ProviderId,
    pub provider_name: String,
    #[serde(default)]
    pub program_id: Option<ProgramId>,
    #[serde(default)]
    pub program_name: Option<String>,
    pub start_date: NaiveDate,
    #[serde(default)]
    pub end_date: Option<NaiveDate>,
    pub status: ServiceStatus,
    #[serde(default)]
    pub notes: Option<String>,
}

/// Scored needs assessment (e.g. VI-SPDAT).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Assessment {
    pub id: AssessmentId,
    pub client_id: ClientId,
    #[serde(rename = "type")]
    pub assessment_type: String,
    pub assessor_id: UserId,
    pub assessor_name: String,
    pub date: NaiveDate,
    pub score: i32,
    #[serde(default)]
    pub responses: BTreeMap<String, serde_json::Value>,
    #[serde(default)]
    pub recommendations: Option<String>,
}

/// Case-management follow-up item.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Task {
    pub id: TaskId,
    pub title: String,
    pub client_id: ClientId,
    pub due_date: NaiveDate,
    pub status: TaskStatus,
    pub priority: TaskPriority,
}

/// Organization delivering services.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Provider {
    pub id: ProviderId,
    pub name: String,
    #[serde(default)]
    pub service_types: Vec<String>,
    pub address: String,
    pub phone: String,
    pub email: String,
    #[serde(default)]
    pub website: Option<String>,
    #[serde(default)]
    pub capacity: Option<u32>,
    #[serde(default)]
    pub current_occupancy: Option<u32>,
    pub lat: f64,
    pub lng: f64,
}

/// Hand-off of a client between providers.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Referral {
    pub id: ReferralId,
    pub client_id: ClientId,
    pub from_provider_id: ProviderId,
    pub to_provider_id: ProviderId,
    pub service_type: String,
    pub status: ReferralStatus,
    pub created_at: Timestamp,
    #[serde(default)]
    pub notes: Option<String>,
}

/// One block of logged staff time.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TimeEntry {
    pub id: TimeEntryId,
    pub user_id: UserId,
    #[serde(default)]
    pub client_id: Option<ClientId>,
    pub date: NaiveDate,
    pub start_time: NaiveTime,
    pub end_time: NaiveTime,
    pub duration_hours: f64,
    pub activity_type: ActivityType,
    pub description: String,
    pub status: TimeEntryStatus,
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::EntityIdType;
    use chrono::Utc;

    fn program(capacity: u32, current_occupancy: u32) -> Program {
        Program {
            id: ProgramId::now_v7(),
            name: "Hope Haven".to_string(),
            program_type: ProgramType::Emergency,
            provider: "City Shelter Network".to_string(),
            address: "12 Main St".to_string(),
            capacity,
            current_occupancy,
        }
    }

    #[test]
    fn test_occupancy_rate_rounds() {
        assert_eq!(program(40, 34).occupancy_rate(), 85);
        assert_eq!(program(3, 2).occupancy_rate(), 67);
        assert_eq!(program(8, 1).occupancy_rate(), 13);
    }

    #[test]
    fn test_occupancy_rate_zero_capacity_is_zero() {
        assert_eq!(program(0, 0).occupancy_rate(), 0);
        assert_eq!(program(0, 5).occupancy_rate(), 0);
    }

    #[test]
    fn test_over_capacity_is_reported_not_clamped() {
        let p = program(10, 12);
        assert_eq!(p.occupancy_rate(), 120);
        assert_eq!(p.available_capacity(), 0);
        assert!(p.is_over_capacity());
    }

    #[test]
    fn test_client_full_name_and_priority() {
        let now = Utc::now();
        let client = Client {
            id: ClientId::now_v7(),
            first_name: "John".to_string(),
            last_name: "Doe".to_string(),
            date_of_birth: None,
            gender: None,
            ethnicity: None,
            race: None,
            phone: None,
            email: None,
            is_veteran: false,
            has_disability: false,
            housing_status: HousingStatus::Homeless,
            location: None,
            profile_image: None,
            intake_date: now,
            last_updated: now,
            case_manager_id: None,
            priority_score: None,
            household: Vec::new(),
            program_id: None,
        };
        assert_eq!(client.full_name(), "John Doe");
        assert_eq!(client.priority(), 0);
        assert!(client.head_of_household().is_none());
    }

    #[test]
    fn test_program_type_field_is_named_type() {
        let json = serde_json::to_value(program(10, 5)).unwrap();
        assert_eq!(json["type"], "emergency");
    }
}
