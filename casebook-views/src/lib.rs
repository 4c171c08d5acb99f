//! Casebook Views - Filter & Derivation Engine
//!
//! Pure functions from record slices to the lists and figures each page shows:
//! client and program filters, the coordinated-entry queue, dashboard
//! aggregates, services, case management and the time card. [`Workbench`]
//! binds them to a record store and a validated configuration.

pub mod case_management;
pub mod clients;
pub mod coordinated_entry;
pub mod dashboard;
pub mod programs;
pub mod search;
pub mod services;
pub mod timecard;
pub mod workbench;

pub use case_management::{
    client_display_name, compose_case_note, record_case_note, recent_interactions, task_counts,
    upcoming_tasks, NewCaseNote, TaskCounts, UNKNOWN_CLIENT,
};
pub use clients::{filter_clients, ClientCriteria};
pub use coordinated_entry::{
    build_queue, coordinated_entry, queue_stats, rank_queue, CoordinatedEntryView, QueueEntry,
    QueueOrder, QueueStats,
};
pub use dashboard::{
    dashboard_stats, last_note_at, my_clients, notes_this_month, notes_this_week, recent_clients,
    spotlight_clients, week_start, DashboardStats,
};
pub use programs::{
    filter_programs, program_residents, program_totals, ProgramCriteria, ProgramTotals,
};
pub use search::SearchQuery;
pub use services::{filter_services, service_stats, ServiceCriteria, ServiceStats};
pub use timecard::{entries_for_day, time_card_summary, TimeCardSummary};
pub use workbench::{DashboardReport, Workbench};
