//! Daily time card.

use casebook_core::{ActivityType, TimeEntry, TimeEntryStatus, UserId};
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

/// Entries logged by `user_id` on `date`, in stored order.
pub fn entries_for_day(entries: &[TimeEntry], user_id: UserId, date: NaiveDate) -> Vec<&TimeEntry> {
    entries
        .iter()
        .filter(|e| e.user_id == user_id && e.date == date)
        .collect()
}

/// Header figures for one user's day.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct TimeCardSummary {
    pub entry_count: usize,
    pub total_hours: f64,
    pub client_meetings: usize,
    pub pending: usize,
}

pub fn time_card_summary(entries: &[TimeEntry], user_id: UserId, date: NaiveDate) -> TimeCardSummary {
    entries_for_day(entries, user_id, date)
        .into_iter()
        .fold(TimeCardSummary::default(), |mut summary, entry| {
            summary.entry_count += 1;
            summary.total_hours += entry.duration_hours;
            if entry.activity_type == ActivityType::ClientMeeting {
                summary.client_meetings += 1;
            }
            if entry.status == TimeEntryStatus::Pending {
                summary.pending += 1;
            }
            summary
        })
}
