//! Casebook Storage - Record Store
//!
//! Defines the record store abstraction and its ordered in-memory
//! implementation. Records are loaded once from fixtures; the only mutations
//! are appending case notes and inserting or updating tasks.

pub mod fixtures;
pub mod lookup;

pub use fixtures::FixtureSet;
pub use lookup::{
    distinct_program_ids, distinct_programs, find_all_by_key, find_by_id, join_program,
    provider_names, Record,
};

use casebook_core::{
    Assessment, CasebookResult, Client, ClientId, EntityIdType, EntityType, Note, NoteId,
    Program, ProgramId, Provider, ProviderId, Referral, Service, StoreError, Task, TaskId,
    TaskPriority, TaskStatus, TimeEntry, User, UserId,
};
use chrono::NaiveDate;
use std::collections::HashSet;

// ============================================================================
// UPDATE TYPES
// ============================================================================

/// Update payload for tasks. `None` leaves a field unchanged.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct TaskUpdate {
    pub status: Option<TaskStatus>,
    pub due_date: Option<NaiveDate>,
    pub title: Option<String>,
    pub priority: Option<TaskPriority>,
}

// ============================================================================
// RECORD STORE TRAIT
// ============================================================================

/// Read access to every collection plus the session's few mutations.
///
/// Lookups never fail: a missing id is `None` and an unmatched foreign key is
/// an empty list. Lists follow stored order.
pub trait RecordStore {
    // === Collections ===

    fn users(&self) -> &[User];
    fn clients(&self) -> &[Client];
    fn programs(&self) -> &[Program];
    fn notes(&self) -> &[Note];
    fn services(&self) -> &[Service];
    fn assessments(&self) -> &[Assessment];
    fn tasks(&self) -> &[Task];
    fn providers(&self) -> &[Provider];
    fn referrals(&self) -> &[Referral];
    fn time_entries(&self) -> &[TimeEntry];

    // === Mutations ===

    /// Append a case note. Rejects a duplicate id.
    fn note_append(&mut self, note: Note) -> CasebookResult<()>;

    /// Insert a task. Rejects a duplicate id.
    fn task_insert(&mut self, task: Task) -> CasebookResult<()>;

    /// Replace the given fields of an existing task.
    fn task_update(&mut self, id: TaskId, update: TaskUpdate) -> CasebookResult<Task>;

    // === Point Lookups ===

    fn user_get(&self, id: UserId) -> Option<&User> {
        find_by_id(self.users(), id)
    }

    fn client_get(&self, id: ClientId) -> Option<&Client> {
        find_by_id(self.clients(), id)
    }

    fn program_get(&self, id: ProgramId) -> Option<&Program> {
        find_by_id(self.programs(), id)
    }

    fn note_get(&self, id: NoteId) -> Option<&Note> {
        find_by_id(self.notes(), id)
    }

    fn task_get(&self, id: TaskId) -> Option<&Task> {
        find_by_id(self.tasks(), id)
    }

    fn provider_get(&self, id: ProviderId) -> Option<&Provider> {
        find_by_id(self.providers(), id)
    }

    // === Foreign-Key Queries ===

    fn program_for_client(&self, client: &Client) -> Option<&Program> {
        join_program(client, self.programs())
    }

    fn clients_in_program(&self, program_id: ProgramId) -> Vec<&Client> {
        find_all_by_key(self.clients(), |c| c.program_id, Some(program_id))
    }

    fn clients_for_case_manager(&self, user_id: UserId) -> Vec<&Client> {
        find_all_by_key(self.clients(), |c| c.case_manager_id, Some(user_id))
    }

    fn notes_for_client(&self, client_id: ClientId) -> Vec<&Note> {
        find_all_by_key(self.notes(), |n| n.client_id, client_id)
    }

    fn services_for_client(&self, client_id: ClientId) -> Vec<&Service> {
        find_all_by_key(self.services(), |s| s.client_id, client_id)
    }

    fn assessments_for_client(&self, client_id: ClientId) -> Vec<&Assessment> {
        find_all_by_key(self.assessments(), |a| a.client_id, client_id)
    }

    fn tasks_for_client(&self, client_id: ClientId) -> Vec<&Task> {
        find_all_by_key(self.tasks(), |t| t.client_id, client_id)
    }

    fn referrals_for_client(&self, client_id: ClientId) -> Vec<&Referral> {
        find_all_by_key(self.referrals(), |r| r.client_id, client_id)
    }

    /// Most recent assessment by date; the earliest stored wins a tie.
    fn latest_assessment_for_client(&self, client_id: ClientId) -> Option<&Assessment> {
        latest_assessment(self.assessments(), client_id)
    }

    /// Programs referenced by any client, first occurrence first.
    fn distinct_programs(&self) -> Vec<&Program> {
        distinct_programs(self.clients(), self.programs())
    }
}

/// Most recent assessment for `client_id` by date; the earliest stored wins a tie.
pub fn latest_assessment(assessments: &[Assessment], client_id: ClientId) -> Option<&Assessment> {
    assessments
        .iter()
        .filter(|a| a.client_id == client_id)
        .fold(None, |best: Option<&Assessment>, a| match best {
            Some(b) if b.date >= a.date => Some(b),
            _ => Some(a),
        })
}

// ============================================================================
// IN-MEMORY STORE
// ============================================================================

/// Ordered in-memory record store.
#[derive(Debug, Clone, Default)]
pub struct InMemoryStore {
    users: Vec<User>,
    clients: Vec<Client>,
    programs: Vec<Program>,
    notes: Vec<Note>,
    services: Vec<Service>,
    assessments: Vec<Assessment>,
    tasks: Vec<Task>,
    providers: Vec<Provider>,
    referrals: Vec<Referral>,
    time_entries: Vec<TimeEntry>,
}

impl InMemoryStore {
    /// Create an empty store.
    pub fn new() -> Self {
        Self::default()
    }

    /// Build a store from a fixture set.
    ///
    /// Duplicate ids within a collection are rejected. Dangling foreign keys and
    /// over-capacity programs are logged and kept as-is.
    pub fn from_fixtures(set: FixtureSet) -> CasebookResult<Self> {
        ensure_unique(&set.users)?;
        ensure_unique(&set.clients)?;
        ensure_unique(&set.programs)?;
        ensure_unique(&set.notes)?;
        ensure_unique(&set.services)?;
        ensure_unique(&set.assessments)?;
        ensure_unique(&set.tasks)?;
        ensure_unique(&set.providers)?;
        ensure_unique(&set.referrals)?;
        ensure_unique(&set.time_entries)?;

        let store = Self {
            users: set.users,
            clients: set.clients,
            programs: set.programs,
            notes: set.notes,
            services: set.services,
            assessments: set.assessments,
            tasks: set.tasks,
            providers: set.providers,
            referrals: set.referrals,
            time_entries: set.time_entries,
        };
        store.audit_references();

        tracing::debug!(
            users = store.users.len(),
            clients = store.clients.len(),
            programs = store.programs.len(),
            notes = store.notes.len(),
            services = store.services.len(),
            assessments = store.assessments.len(),
            tasks = store.tasks.len(),
            "Record store loaded"
        );
        Ok(store)
    }

    /// Count of stored records across all collections.
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

    /// Snapshot the store back into a fixture set.
    pub fn to_fixtures(&self) -> FixtureSet {
        FixtureSet {
            users: self.users.clone(),
            clients: self.clients.clone(),
            programs: self.programs.clone(),
            notes: self.notes.clone(),
            services: self.services.clone(),
            assessments: self.assessments.clone(),
            tasks: self.tasks.clone(),
            providers: self.providers.clone(),
            referrals: self.referrals.clone(),
            time_entries: self.time_entries.clone(),
        }
    }

    fn audit_references(&self) {
        let client_ids: HashSet<ClientId> = self.clients.iter().map(|c| c.id).collect();
        let program_ids: HashSet<ProgramId> = self.programs.iter().map(|p| p.id).collect();
        let user_ids: HashSet<UserId> = self.users.iter().map(|u| u.id).collect();

        for client in &self.clients {
            if let Some(program_id) = client.program_id {
                if !program_ids.contains(&program_id) {
                    tracing::warn!(client_id = %client.id, %program_id, "Client references unknown program");
                }
            }
            if let Some(user_id) = client.case_manager_id {
                if !user_ids.is_empty() && !user_ids.contains(&user_id) {
                    tracing::warn!(client_id = %client.id, case_manager_id = %user_id, "Client references unknown case manager");
                }
            }
        }

        let dangling = self
            .notes
            .iter()
            .map(|n| n.client_id)
            .chain(self.services.iter().map(|s| s.client_id))
            .chain(self.assessments.iter().map(|a| a.client_id))
            .chain(self.tasks.iter().map(|t| t.client_id))
            .chain(self.referrals.iter().map(|r| r.client_id))
            .filter(|id| !client_ids.contains(id))
            .count();
        if dangling > 0 {
            tracing::warn!(count = dangling, "Records reference unknown clients");
        }

        for program in self.programs.iter().filter(|p| p.is_over_capacity()) {
            tracing::warn!(
                program_id = %program.id,
                capacity = program.capacity,
                current_occupancy = program.current_occupancy,
                "Program occupancy exceeds capacity"
            );
        }
    }
}

fn ensure_unique<R: Record>(records: &[R]) -> Result<(), StoreError>
where
    R::Id: EntityIdType,
{
    let mut seen = HashSet::with_capacity(records.len());
    for record in records {
        let id = record.id();
        if !seen.insert(id) {
            return Err(StoreError::DuplicateId {
                entity_type: R::ENTITY_TYPE,
                id: id.as_uuid(),
            });
        }
    }
    Ok(())
}

impl From<FixtureSet> for InMemoryStore {
    /// Build without duplicate checks. Prefer [`InMemoryStore::from_fixtures`].
    fn from(set: FixtureSet) -> Self {
        Self {
            users: set.users,
            clients: set.clients,
            programs: set.programs,
            notes: set.notes,
            services: set.services,
            assessments: set.assessments,
            tasks: set.tasks,
            providers: set.providers,
            referrals: set.referrals,
            time_entries: set.time_entries,
        }
    }
}

impl RecordStore for InMemoryStore {
    fn users(&self) -> &[User] {
        &self.users
    }

    fn clients(&self) -> &[Client] {
        &self.clients
    }

    fn programs(&self) -> &[Program] {
        &self.programs
    }

    fn notes(&self) -> &[Note] {
        &self.notes
    }

    fn services(&self) -> &[Service] {
        &self.services
    }

    fn assessments(&self) -> &[Assessment] {
        &self.assessments
    }

    fn tasks(&self) -> &[Task] {
        &self.tasks
    }

    fn providers(&self) -> &[Provider] {
        &self.providers
    }

    fn referrals(&self) -> &[Referral] {
        &self.referrals
    }

    fn time_entries(&self) -> &[TimeEntry] {
        &self.time_entries
    }

    fn note_append(&mut self, note: Note) -> CasebookResult<()> {
        if find_by_id(&self.notes, note.id).is_some() {
            return Err(StoreError::DuplicateId {
                entity_type: EntityType::Note,
                id: note.id.as_uuid(),
            }
            .into());
        }
        tracing::debug!(note_id = %note.id, client_id = %note.client_id, "Case note appended");
        self.notes.push(note);
        Ok(())
    }

    fn task_insert(&mut self, task: Task) -> CasebookResult<()> {
        if find_by_id(&self.tasks, task.id).is_some() {
            return Err(StoreError::DuplicateId {
                entity_type: EntityType::Task,
                id: task.id.as_uuid(),
            }
            .into());
        }
        self.tasks.push(task);
        Ok(())
    }

    fn task_update(&mut self, id: TaskId, update: TaskUpdate) -> CasebookResult<Task> {
        let task = self
            .tasks
            .iter_mut()
            .find(|t| t.id == id)
            .ok_or(StoreError::NotFound {
                entity_type: EntityType::Task,
                id: id.as_uuid(),
            })?;

        if let Some(status) = update.status {
            task.status = status;
        }
        if let Some(due_date) = update.due_date {
            task.due_date = due_date;
        }
        if let Some(title) = update.title {
            task.title = title;
        }
        if let Some(priority) = update.priority {
            task.priority = priority;
        }
        tracing::debug!(task_id = %id, status = %task.status, "Task updated");
        Ok(task.clone())
    }
}

// ============================================================================
// TESTS
// ============================================================================
