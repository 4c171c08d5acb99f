//! Enum types for Casebook records

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use thiserror::Error;

/// Error when parsing an unknown enum string.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("Invalid {kind}: {value}")]
pub struct EnumParseError {
    pub kind: &'static str,
    pub value: String,
}

/// Declares a closed enum with a canonical snake_case string form and a
/// human-facing label.
macro_rules! string_enum {
    (
        $(#[$meta:meta])*
        $name:ident, $kind:literal {
            $( $(#[$vmeta:meta])* $variant:ident => ($text:literal, $label:literal) ),+ $(,)?
        }
    ) => {
        $(#[$meta])*
        #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
        #[serde(rename_all = "snake_case")]
        pub enum $name {
            $( $(#[$vmeta])* $variant ),+
        }

        impl $name {
            /// Every variant, in declaration order.
            pub const ALL: &'static [$name] = &[$($name::$variant),+];

            /// Canonical string form (matches the serialized form).
            pub fn as_str(&self) -> &'static str {
                match self {
                    $( $name::$variant => $text ),+
                }
            }

            /// Human-facing label.
            pub fn label(&self) -> &'static str {
                match self {
                    $( $name::$variant => $label ),+
                }
            }
        }

        impl fmt::Display for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                f.write_str(self.as_str())
            }
        }

        impl FromStr for $name {
            type Err = EnumParseError;

            fn from_str(s: &str) -> Result<Self, Self::Err> {
                let lowered = s.trim().to_lowercase();
                $(
                    if lowered == $text {
                        return Ok($name::$variant);
                    }
                )+
                Err(EnumParseError {
                    kind: $kind,
                    value: s.to_string(),
                })
            }
        }
    };
}

string_enum! {
    /// Role of a staff user.
    UserRole, "user role" {
        Admin => ("admin", "Administrator"),
        CaseManager => ("case_manager", "Case Manager"),
        Staff => ("staff", "Staff"),
        Viewer => ("viewer", "Viewer"),
    }
}

string_enum! {
    /// Current housing situation of a client.
    HousingStatus, "housing status" {
        Housed => ("housed", "housed"),
        Homeless => ("homeless", "homeless"),
        AtRisk => ("at_risk", "at risk"),
        Transitional => ("transitional", "transitional"),
    }
}

string_enum! {
    /// Kind of housing a program offers.
    ProgramType, "program type" {
        Permanent => ("permanent", "Permanent Housing"),
        Transitional => ("transitional", "Transitional Housing"),
        Emergency => ("emergency", "Emergency Shelter"),
        RapidRehousing => ("rapid_rehousing", "Rapid Re-housing"),
    }
}

string_enum! {
    /// Topic of a case note.
    NoteCategory, "note category" {
        General => ("general", "General"),
        Housing => ("housing", "Housing"),
        Health => ("health", "Health"),
        Employment => ("employment", "Employment"),
        Financial => ("financial", "Financial"),
        Other => ("other", "Other"),
    }
}

string_enum! {
    /// Lifecycle of a delivered service.
    ServiceStatus, "service status" {
        Scheduled => ("scheduled", "Scheduled"),
        InProgress => ("in_progress", "In Progress"),
        Completed => ("completed", "Completed"),
        Cancelled => ("cancelled", "Cancelled"),
    }
}

string_enum! {
    /// Lifecycle of a case-management task.
    TaskStatus, "task status" {
        Pending => ("pending", "Pending"),
        InProgress => ("in_progress", "In Progress"),
        Completed => ("completed", "Completed"),
        Overdue => ("overdue", "Overdue"),
    }
}

string_enum! {
    /// Urgency of a case-management task.
    TaskPriority, "task priority" {
        Low => ("low", "Low"),
        Medium => ("medium", "Medium"),
        High => ("high", "High"),
    }
}

string_enum! {
    /// Lifecycle of a referral between providers.
    ReferralStatus, "referral status" {
        Pending => ("pending", "Pending"),
        Accepted => ("accepted", "Accepted"),
        Declined => ("declined", "Declined"),
        Cancelled => ("cancelled", "Cancelled"),
    }
}

string_enum! {
    /// What a time-card entry was spent on.
    ActivityType, "activity type" {
        ClientMeeting => ("client_meeting", "Client Meeting"),
        CaseNotes => ("case_notes", "Case Notes"),
        Assessment => ("assessment", "Assessment"),
        Coordination => ("coordination", "Service Coordination"),
        Admin => ("admin", "Administrative"),
        Travel => ("travel", "Travel Time"),
        Training => ("training", "Training"),
        Other => ("other", "Other"),
    }
}

string_enum! {
    /// Approval state of a time-card entry.
    TimeEntryStatus, "time entry status" {
        Pending => ("pending", "Pending"),
        Submitted => ("submitted", "Submitted"),
        Approved => ("approved", "Approved"),
    }
}

/// Record kind discriminator, used in error reporting.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum EntityType {
    User,
    Client,
    Program,
    Note,
    Service,
    Assessment,
    Task,
    Provider,
    Referral,
    TimeEntry,
}

impl TaskStatus {
    /// Whether the task still needs work.
    pub fn is_open(&self) -> bool {
        !matches!(self, TaskStatus::Completed)
    }
}
