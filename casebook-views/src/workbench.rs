//! Store-backed facade.
//!
//! `Workbench` binds a [`RecordStore`] to a validated [`CasebookConfig`] and
//! exposes every page derivation with the configured user and limits applied.

use crate::case_management::{
    record_case_note, recent_interactions, task_counts, upcoming_tasks, NewCaseNote, TaskCounts,
};
use crate::clients::{filter_clients, ClientCriteria};
use crate::coordinated_entry::{
    build_queue, coordinated_entry, CoordinatedEntryView, QueueOrder, QueueStats,
};
use crate::dashboard::{dashboard_stats, recent_clients, spotlight_clients, DashboardStats};
use crate::programs::{
    filter_programs, program_residents, program_totals, ProgramCriteria, ProgramTotals,
};
use crate::services::{filter_services, service_stats, ServiceCriteria, ServiceStats};
use crate::timecard::{time_card_summary, TimeCardSummary};
use casebook_core::{
    CasebookConfig, CasebookResult, Client, Note, NoteId, Program, ProgramId, Service, Task,
    TaskId, Timestamp, User,
};
use casebook_storage::{provider_names, RecordStore, TaskUpdate};
use chrono::NaiveDate;
use serde::Serialize;

/// Snapshot printed by the `dashboard_report` binary.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct DashboardReport {
    pub generated_at: Timestamp,
    pub current_user: Option<String>,
    pub dashboard: DashboardStats,
    pub coordinated_entry: QueueStats,
    pub programs: ProgramTotals,
    pub services: ServiceStats,
    pub tasks: TaskCounts,
}

/// Record store plus the configuration every derivation reads.
#[derive(Debug, Clone)]
pub struct Workbench<S: RecordStore> {
    store: S,
    config: CasebookConfig,
}

impl<S: RecordStore> Workbench<S> {
    /// Bind `store` to `config`. Fails if the config does not validate.
    pub fn new(store: S, config: CasebookConfig) -> CasebookResult<Self> {
        config.validate()?;
        Ok(Self { store, config })
    }

    pub fn store(&self) -> &S {
        &self.store
    }

    pub fn config(&self) -> &CasebookConfig {
        &self.config
    }

    pub fn into_store(self) -> S {
        self.store
    }

    pub fn current_user(&self) -> Option<&User> {
        self.store.user_get(self.config.current_user_id)
    }

    // === Clients & Programs ===

    pub fn clients(&self, criteria: &ClientCriteria) -> Vec<&Client> {
        filter_clients(self.store.clients(), self.store.programs(), criteria)
    }

    /// Clients assigned to the current user, further narrowed by `criteria`.
    pub fn my_clients(&self, criteria: &ClientCriteria) -> Vec<&Client> {
        let criteria = criteria.clone().with_case_manager(self.config.current_user_id);
        self.clients(&criteria)
    }

    pub fn programs(&self, criteria: &ProgramCriteria) -> Vec<&Program> {
        filter_programs(self.store.programs(), criteria)
    }

    pub fn program_totals(&self, criteria: &ProgramCriteria) -> ProgramTotals {
        program_totals(self.programs(criteria))
    }

    pub fn program_residents(&self, program_id: ProgramId) -> Vec<&Client> {
        program_residents(self.store.clients(), program_id)
    }

    /// Provider facet for the program filter.
    pub fn provider_names(&self) -> Vec<&str> {
        provider_names(self.store.programs())
    }

    // === Coordinated Entry ===

    pub fn coordinated_entry(
        &self,
        query: Option<&str>,
        order: QueueOrder,
        as_of: Timestamp,
    ) -> CoordinatedEntryView<'_> {
        let queue = build_queue(self.store.clients(), self.store.assessments(), as_of);
        coordinated_entry(&queue, query, order, self.config.high_priority_score)
    }

    // === Dashboard ===

    pub fn dashboard(&self, now: Timestamp) -> DashboardStats {
        dashboard_stats(
            self.store.clients(),
            self.store.programs(),
            self.store.notes(),
            &self.config,
            now,
        )
    }

    pub fn spotlight(&self, query: Option<&str>) -> Vec<&Client> {
        spotlight_clients(
            self.store.clients(),
            query,
            self.config.spotlight_priority_score,
            self.config.spotlight_limit,
        )
    }

    pub fn recent_clients(&self) -> Vec<&Client> {
        recent_clients(
            self.store.clients(),
            self.config.current_user_id,
            self.config.recent_clients_limit,
        )
    }

    // === Services ===

    pub fn services(&self, criteria: &ServiceCriteria) -> Vec<&Service> {
        filter_services(self.store.services(), criteria)
    }

    pub fn service_stats(&self) -> ServiceStats {
        service_stats(self.store.services(), self.store.providers())
    }

    // === Case Management ===

    pub fn upcoming_tasks(&self) -> Vec<&Task> {
        upcoming_tasks(self.store.tasks(), self.config.upcoming_tasks_limit)
    }

    pub fn recent_interactions(&self) -> Vec<&Note> {
        recent_interactions(self.store.notes(), self.config.recent_interactions_limit)
    }

    pub fn task_counts(&self, today: NaiveDate) -> TaskCounts {
        task_counts(self.store.tasks(), today)
    }

    /// Record a case note authored by the current user.
    pub fn add_case_note(&mut self, draft: NewCaseNote) -> CasebookResult<NoteId> {
        record_case_note(&mut self.store, draft, self.config.current_user_id)
    }

    pub fn update_task(&mut self, id: TaskId, update: TaskUpdate) -> CasebookResult<Task> {
        self.store.task_update(id, update)
    }

    // === Time Card ===

    pub fn time_card(&self, date: NaiveDate) -> TimeCardSummary {
        time_card_summary(self.store.time_entries(), self.config.current_user_id, date)
    }

    /// Every headline figure as of `now`.
    pub fn report(&self, now: Timestamp) -> DashboardReport {
        DashboardReport {
            generated_at: now,
            current_user: self.current_user().map(|u| u.name.clone()),
            dashboard: self.dashboard(now),
            coordinated_entry: self.coordinated_entry(None, QueueOrder::Score, now).stats,
            programs: self.program_totals(&ProgramCriteria::default()),
            services: self.service_stats(),
            tasks: self.task_counts(now.date_naive()),
        }
    }
}
