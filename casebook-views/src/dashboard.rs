//! Dashboard aggregates.
//!
//! Everything here is recomputed from the full, unfiltered population on every
//! call. "Current user" is always an explicit argument.

use crate::programs::program_totals;
use crate::SearchQuery;
use casebook_core::{CasebookConfig, Client, Note, Program, Timestamp, UserId};
use casebook_storage::{distinct_programs, find_all_by_key};
use chrono::{Datelike, Duration, NaiveTime, Weekday};
use serde::{Deserialize, Serialize};

/// Headline numbers for the current user's dashboard.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct DashboardStats {
    /// Clients assigned to the current user.
    pub my_clients: usize,
    /// Distinct loaded programs among the current user's clients.
    pub my_programs: usize,
    /// Distinct loaded programs among all clients.
    pub abodes_served: usize,
    pub notes_this_month: usize,
    pub notes_this_week: usize,
    /// Most recent note by the current user in the month window.
    pub last_note_at: Option<Timestamp>,
    /// Overall occupancy of the current user's programs.
    pub my_occupancy_rate: u32,
}

/// Clients whose case manager is `user_id`, in stored order.
pub fn my_clients(clients: &[Client], user_id: UserId) -> Vec<&Client> {
    find_all_by_key(clients, |c| c.case_manager_id, Some(user_id))
}

/// Midnight UTC on the most recent `starts_on` at or before `now`.
pub fn week_start(now: Timestamp, starts_on: Weekday) -> Timestamp {
    let today = now.date_naive();
    let back = (today.weekday().num_days_from_monday() + 7 - starts_on.num_days_from_monday()) % 7;
    (today - Duration::days(i64::from(back)))
        .and_time(NaiveTime::MIN)
        .and_utc()
}

/// Notes by `author_id` created in the same UTC year and month as `now`.
pub fn notes_this_month(notes: &[Note], author_id: UserId, now: Timestamp) -> Vec<&Note> {
    notes
        .iter()
        .filter(|n| {
            n.author_id == author_id
                && n.created_at.year() == now.year()
                && n.created_at.month() == now.month()
        })
        .collect()
}

/// Notes by `author_id` created at or after the start of the current week.
pub fn notes_this_week(
    notes: &[Note],
    author_id: UserId,
    now: Timestamp,
    starts_on: Weekday,
) -> Vec<&Note> {
    let start = week_start(now, starts_on);
    notes
        .iter()
        .filter(|n| n.author_id == author_id && n.created_at >= start)
        .collect()
}

pub fn dashboard_stats(
    clients: &[Client],
    programs: &[Program],
    notes: &[Note],
    config: &CasebookConfig,
    now: Timestamp,
) -> DashboardStats {
    let user_id = config.current_user_id;
    let mine = my_clients(clients, user_id);
    let month = notes_this_month(notes, user_id, now);
    let week = notes_this_week(notes, user_id, now, config.week_starts_on);
    let my_programs = distinct_programs(mine.iter().copied(), programs);

    let stats = DashboardStats {
        my_clients: mine.len(),
        my_programs: my_programs.len(),
        abodes_served: distinct_programs(clients, programs).len(),
        notes_this_month: month.len(),
        notes_this_week: week.len(),
        last_note_at: month.iter().map(|n| n.created_at).max(),
        my_occupancy_rate: program_totals(my_programs.iter().copied()).occupancy_rate,
    };
    tracing::debug!(
        user = %user_id,
        my_clients = stats.my_clients,
        abodes_served = stats.abodes_served,
        notes_this_week = stats.notes_this_week,
        "Dashboard stats recomputed"
    );
    stats
}

/// Spotlight list for the dashboard search box.
///
/// With no query, clients at or above `threshold` priority. With a query, a
/// case-insensitive match on full name or email, or the lowered query as a
/// substring of the phone number as stored. At most `limit` clients, in stored order.
pub fn spotlight_clients<'a>(
    clients: &'a [Client],
    query: Option<&str>,
    threshold: i32,
    limit: usize,
) -> Vec<&'a Client> {
    let search = SearchQuery::parse(query);
    clients
        .iter()
        .filter(|c| match &search {
            Some(q) => {
                q.matches(&c.full_name())
                    || c.email.as_deref().is_some_and(|e| q.matches(e))
                    || c.phone.as_deref().is_some_and(|p| p.contains(q.as_str()))
            }
            None => c.priority() >= threshold,
        })
        .take(limit)
        .collect()
}

/// First `limit` of the current user's clients.
pub fn recent_clients(clients: &[Client], user_id: UserId, limit: usize) -> Vec<&Client> {
    let mut mine = my_clients(clients, user_id);
    mine.truncate(limit);
    mine
}

/// Most recent note by `author_id` in the month window.
pub fn last_note_at(notes: &[Note], author_id: UserId, now: Timestamp) -> Option<Timestamp> {
    notes_this_month(notes, author_id, now)
        .into_iter()
        .map(|n| n.created_at)
        .max()
}
