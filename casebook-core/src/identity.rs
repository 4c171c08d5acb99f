//! Identity types for Casebook records

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use uuid::Uuid;

/// Timestamp type using UTC timezone.
pub type Timestamp = DateTime<Utc>;

/// Common behavior of every strongly-typed record id.
pub trait EntityIdType: Copy + Eq + std::hash::Hash + fmt::Debug + fmt::Display {
    /// Wrap an existing UUID.
    fn new(uuid: Uuid) -> Self;

    /// The underlying UUID.
    fn as_uuid(&self) -> Uuid;

    /// Mint a new UUIDv7 id (timestamp-sortable).
    fn now_v7() -> Self {
        Self::new(Uuid::now_v7())
    }

    /// The all-zero id. Never assigned to a stored record.
    fn nil() -> Self {
        Self::new(Uuid::nil())
    }
}

/// Declares a transparent UUID newtype id.
///
/// ```ignore
/// entity_id!(ClientId, "Identifier of a client record.");
/// ```
macro_rules! entity_id {
    ($name:ident, $doc:literal) => {
        #[doc = $doc]
        #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
        #[serde(transparent)]
        pub struct $name(Uuid);

        impl EntityIdType for $name {
            fn new(uuid: Uuid) -> Self {
                Self(uuid)
            }

            fn as_uuid(&self) -> Uuid {
                self.0
            }
        }

        impl fmt::Display for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                write!(f, "{}", self.0)
            }
        }

        impl FromStr for $name {
            type Err = uuid::Error;

            fn from_str(s: &str) -> Result<Self, Self::Err> {
                Uuid::parse_str(s).map(Self)
            }
        }

        impl From<Uuid> for $name {
            fn from(uuid: Uuid) -> Self {
                Self(uuid)
            }
        }
    };
}

entity_id!(UserId, "Identifier of a staff user.");
entity_id!(ClientId, "Identifier of a client record.");
entity_id!(HouseholdMemberId, "Identifier of a household member.");
entity_id!(ProgramId, "Identifier of a housing program.");
entity_id!(NoteId, "Identifier of a case note.");
entity_id!(ServiceId, "Identifier of a service record.");
entity_id!(AssessmentId, "Identifier of an assessment.");
entity_id!(TaskId, "Identifier of a case-management task.");
entity_id!(ProviderId, "Identifier of a service provider.");
entity_id!(ReferralId, "Identifier of a referral.");
entity_id!(TimeEntryId, "Identifier of a time-card entry.");
