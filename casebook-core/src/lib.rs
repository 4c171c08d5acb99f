//! Casebook Core - Record Types
//!
//! Pure data structures for the case-management engine: typed ids, enums,
//! records, errors and configuration. All other crates depend on this one.

pub mod config;
pub mod entities;
pub mod enums;
pub mod error;
pub mod identity;

pub use config::{CasebookConfig, CONFIG_ENV_VAR};
pub use entities::{
    occupancy_rate, Assessment, Client, HouseholdMember, Location, Note, Program, Provider,
    Referral, Service, Task, TimeEntry, User,
};
pub use enums::{
    ActivityType, EntityType, EnumParseError, HousingStatus, NoteCategory, ProgramType,
    ReferralStatus, ServiceStatus, TaskPriority, TaskStatus, TimeEntryStatus, UserRole,
};
pub use error::{
    CasebookError, CasebookResult, ConfigError, FixtureError, StoreError, ValidationError,
};
pub use identity::{
    AssessmentId, ClientId, EntityIdType, HouseholdMemberId, NoteId, ProgramId, ProviderId,
    ReferralId, ServiceId, TaskId, TimeEntryId, Timestamp, UserId,
};
