//! Case-management board: task sidebar, interaction feed and case notes.

use casebook_core::{
    CasebookResult, Client, ClientId, EntityIdType, EntityType, Note, NoteCategory, NoteId,
    StoreError, Task, TaskStatus, Timestamp, User, UserId, ValidationError,
};
use casebook_storage::{find_by_id, RecordStore};
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

/// Shown wherever a note or task points at a client that is not loaded.
pub const UNKNOWN_CLIENT: &str = "Unknown Client";

// ============================================================================
// TASKS
// ============================================================================

/// Open tasks in stored order, at most `limit`.
pub fn upcoming_tasks(tasks: &[Task], limit: usize) -> Vec<&Task> {
    tasks.iter().filter(|t| t.status.is_open()).take(limit).collect()
}

/// Task board counts by status.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct TaskCounts {
    pub pending: usize,
    pub in_progress: usize,
    pub completed: usize,
    pub overdue: usize,
    /// Open tasks due on `today`.
    pub due_today: usize,
}

pub fn task_counts(tasks: &[Task], today: NaiveDate) -> TaskCounts {
    tasks.iter().fold(TaskCounts::default(), |mut counts, task| {
        match task.status {
            TaskStatus::Pending => counts.pending += 1,
            TaskStatus::InProgress => counts.in_progress += 1,
            TaskStatus::Completed => counts.completed += 1,
            TaskStatus::Overdue => counts.overdue += 1,
        }
        if task.status.is_open() && task.due_date == today {
            counts.due_today += 1;
        }
        counts
    })
}

// ============================================================================
// INTERACTIONS
// ============================================================================

/// Newest notes first, at most `limit`. Notes with equal timestamps keep stored order.
pub fn recent_interactions(notes: &[Note], limit: usize) -> Vec<&Note> {
    let mut sorted: Vec<&Note> = notes.iter().collect();
    sorted.sort_by(|a, b| b.created_at.cmp(&a.created_at));
    sorted.truncate(limit);
    sorted
}

/// Client full name, or [`UNKNOWN_CLIENT`] for an id with no loaded client.
pub fn client_display_name(clients: &[Client], client_id: ClientId) -> String {
    find_by_id(clients, client_id)
        .map(Client::full_name)
        .unwrap_or_else(|| UNKNOWN_CLIENT.to_string())
}

// ============================================================================
// CASE NOTES
// ============================================================================

/// Case note as entered in the note dialog, before it has an id or author.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NewCaseNote {
    pub client_id: ClientId,
    pub category: NoteCategory,
    pub content: String,
    #[serde(default)]
    pub is_private: bool,
    pub created_at: Timestamp,
}

/// Turn a draft into a note written by `author`.
///
/// The client must be loaded and the content must not be blank.
pub fn compose_case_note(
    draft: NewCaseNote,
    author: &User,
    clients: &[Client],
) -> CasebookResult<Note> {
    if draft.content.trim().is_empty() {
        return Err(ValidationError::RequiredFieldMissing {
            field: "content".to_string(),
        }
        .into());
    }
    if find_by_id(clients, draft.client_id).is_none() {
        return Err(StoreError::NotFound {
            entity_type: EntityType::Client,
            id: draft.client_id.as_uuid(),
        }
        .into());
    }

    Ok(Note {
        id: NoteId::now_v7(),
        client_id: draft.client_id,
        author_id: author.id,
        author_name: author.name.clone(),
        content: draft.content,
        created_at: draft.created_at,
        category: draft.category,
        is_private: draft.is_private,
    })
}

/// Compose a note authored by `author_id` and append it to `store`.
pub fn record_case_note<S: RecordStore>(
    store: &mut S,
    draft: NewCaseNote,
    author_id: UserId,
) -> CasebookResult<NoteId> {
    let author = store.user_get(author_id).ok_or(StoreError::NotFound {
        entity_type: EntityType::User,
        id: author_id.as_uuid(),
    })?;
    let note = compose_case_note(draft, author, store.clients())?;
    let id = note.id;
    store.note_append(note)?;
    tracing::debug!(note_id = %id, author = %author_id, "Case note recorded");
    Ok(id)
}

#[cfg(test)]
mod tests {
    use super::*;
    use casebook_core::CasebookError;
    use casebook_storage::{FixtureSet, InMemoryStore};
    use casebook_test_utils::assertions::{assert_not_found, assert_validation_error};
    use casebook_test_utils::fixtures;
    use chrono::{TimeZone, Utc};

    fn day(d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(2024, 4, d).unwrap()
    }

    fn at(d: u32, h: u32) -> Timestamp {
        Utc.with_ymd_and_hms(2024, 4, d, h, 0, 0).unwrap()
    }

    fn draft(client_id: ClientId, content: &str) -> NewCaseNote {
        NewCaseNote {
            client_id,
            category: NoteCategory::Housing,
            content: content.to_string(),
            is_private: false,
            created_at: at(2, 10),
        }
    }

    #[test]
    fn test_upcoming_tasks_skips_completed_and_limits() {
        let client = ClientId::now_v7();
        let tasks = vec![
            fixtures::task(client, "Call landlord", day(3), TaskStatus::Completed),
            fixtures::task(client, "Renew ID", day(4), TaskStatus::Pending),
            fixtures::task(client, "File SSI", day(1), TaskStatus::Overdue),
            fixtures::task(client, "Book clinic", day(8), TaskStatus::InProgress),
            fixtures::task(client, "Lease review", day(9), TaskStatus::Pending),
        ];
        let titles: Vec<_> = upcoming_tasks(&tasks, 3).iter().map(|t| t.title.as_str()).collect();
        assert_eq!(titles, vec!["Renew ID", "File SSI", "Book clinic"]);
    }

    #[test]
    fn test_task_counts() {
        let client = ClientId::now_v7();
        let tasks = vec![
            fixtures::task(client, "a", day(5), TaskStatus::Pending),
            fixtures::task(client, "b", day(5), TaskStatus::Completed),
            fixtures::task(client, "c", day(5), TaskStatus::InProgress),
            fixtures::task(client, "d", day(1), TaskStatus::Overdue),
            fixtures::task(client, "e", day(6), TaskStatus::Pending),
        ];
        assert_eq!(
            task_counts(&tasks, day(5)),
            TaskCounts {
                pending: 2,
                in_progress: 1,
                completed: 1,
                overdue: 1,
                due_today: 2,
            }
        );
    }

    #[test]
    fn test_recent_interactions_newest_first() {
        let client = ClientId::now_v7();
        let author = UserId::now_v7();
        let notes = vec![
            fixtures::note(client, author, at(1, 9)),
            fixtures::note(client, author, at(5, 9)),
            fixtures::note(client, author, at(3, 9)),
        ];
        let feed = recent_interactions(&notes, 2);
        let times: Vec<_> = feed.iter().map(|n| n.created_at).collect();
        assert_eq!(times, vec![at(5, 9), at(3, 9)]);
    }

    #[test]
    fn test_client_display_name() {
        let client = fixtures::client("Rosa", "Park");
        let clients = vec![client.clone()];
        assert_eq!(client_display_name(&clients, client.id), "Rosa Park");
        assert_eq!(client_display_name(&clients, ClientId::now_v7()), UNKNOWN_CLIENT);
    }

    #[test]
    fn test_compose_case_note() {
        let author = fixtures::user("John Appleseed");
        let client = fixtures::client("Rosa", "Park");
        let clients = vec![client.clone()];

        let note = compose_case_note(draft(client.id, "Met at shelter."), &author, &clients).unwrap();
        assert_eq!(note.author_id, author.id);
        assert_eq!(note.author_name, "John Appleseed");
        assert_eq!(note.client_id, client.id);
        assert_eq!(note.category, NoteCategory::Housing);
        assert_eq!(note.created_at, at(2, 10));
    }

    #[test]
    fn test_compose_rejects_blank_content() {
        let author = fixtures::user("John Appleseed");
        let client = fixtures::client("Rosa", "Park");
        let result = compose_case_note(draft(client.id, "  \n"), &author, &[client]);
        assert_validation_error(&result);
    }

    #[test]
    fn test_compose_rejects_unknown_client() {
        let author = fixtures::user("John Appleseed");
        let result = compose_case_note(draft(ClientId::now_v7(), "Hello"), &author, &[]);
        assert_not_found(&result, EntityType::Client);
    }

    #[test]
    fn test_record_case_note_appends_to_store() {
        let author = fixtures::user("John Appleseed");
        let client = fixtures::client("Rosa", "Park");
        let mut store = InMemoryStore::from_fixtures(FixtureSet {
            users: vec![author.clone()],
            clients: vec![client.clone()],
            ..FixtureSet::default()
        })
        .unwrap();

        let id = record_case_note(&mut store, draft(client.id, "Follow-up call"), author.id).unwrap();
        let stored = store.note_get(id).unwrap();
        assert_eq!(stored.content, "Follow-up call");
        assert_eq!(store.notes_for_client(client.id).len(), 1);
    }

    #[test]
    fn test_record_case_note_unknown_author() {
        let client = fixtures::client("Rosa", "Park");
        let mut store = InMemoryStore::from_fixtures(FixtureSet {
            clients: vec![client.clone()],
            ..FixtureSet::default()
        })
        .unwrap();
        let result = record_case_note(&mut store, draft(client.id, "Hi"), UserId::now_v7());
        assert!(matches!(
            result,
            Err(CasebookError::Store(StoreError::NotFound {
                entity_type: EntityType::User,
                ..
            }))
        ));
        assert!(store.notes().is_empty());
    }
}
