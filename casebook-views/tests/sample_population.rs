//! End-to-end derivations over the deterministic sample population, loaded
//! from files the way the `dashboard_report` binary loads them.

use casebook_core::{CasebookConfig, Client, HousingStatus, ProgramType, Timestamp};
use casebook_storage::{FixtureSet, InMemoryStore};
use casebook_test_utils::fixtures::{sample_case_manager, sample_population};
use casebook_views::{
    ClientCriteria, DashboardStats, ProgramCriteria, QueueOrder, QueueStats, ServiceCriteria,
    TaskCounts, Workbench,
};
use chrono::{NaiveDate, TimeZone, Utc};
use std::io::Write;
use tempfile::NamedTempFile;

/// Thursday afternoon.
fn as_of() -> Timestamp {
    Utc.with_ymd_and_hms(2024, 6, 13, 12, 0, 0).unwrap()
}

fn load_workbench() -> Workbench<InMemoryStore> {
    let mut fixtures = NamedTempFile::new().unwrap();
    write!(fixtures, "{}", sample_population().to_json_string().unwrap()).unwrap();

    let mut config = NamedTempFile::new().unwrap();
    write!(
        config,
        r#"
current_user_id = "{}"
high_priority_score = 15
spotlight_priority_score = 80
spotlight_limit = 3
recent_clients_limit = 4
recent_interactions_limit = 5
upcoming_tasks_limit = 3
week_starts_on = "Sun"
"#,
        sample_case_manager()
    )
    .unwrap();

    let config = CasebookConfig::from_path(config.path()).unwrap();
    let set = FixtureSet::from_path(fixtures.path()).unwrap();
    let store = InMemoryStore::from_fixtures(set).unwrap();
    Workbench::new(store, config).unwrap()
}

fn names(clients: &[&Client]) -> Vec<String> {
    clients.iter().map(|c| c.full_name()).collect()
}

#[test]
fn test_dashboard_stats() {
    let bench = load_workbench();
    assert_eq!(
        bench.dashboard(as_of()),
        DashboardStats {
            my_clients: 4,
            my_programs: 2,
            abodes_served: 2,
            notes_this_month: 3,
            notes_this_week: 2,
            last_note_at: Some(Utc.with_ymd_and_hms(2024, 6, 12, 14, 0, 0).unwrap()),
            my_occupancy_rate: 80,
        }
    );
}

#[test]
fn test_week_starting_monday_narrows_window() {
    let bench = load_workbench();
    let mut config = bench.config().clone();
    config.week_starts_on = chrono::Weekday::Mon;
    let bench = Workbench::new(bench.into_store(), config).unwrap();
    assert_eq!(bench.dashboard(as_of()).notes_this_week, 2);

    config = bench.config().clone();
    config.week_starts_on = chrono::Weekday::Tue;
    let bench = Workbench::new(bench.into_store(), config).unwrap();
    assert_eq!(bench.dashboard(as_of()).notes_this_week, 1);
}

#[test]
fn test_spotlight_and_recent_clients() {
    let bench = load_workbench();
    assert_eq!(
        names(&bench.spotlight(None)),
        vec!["John Doe", "Marcus Reed", "Grace Lee"]
    );
    assert_eq!(names(&bench.spotlight(Some("555-0112"))), vec!["John Doe"]);
    assert_eq!(names(&bench.spotlight(Some("MAIL.TEST"))).len(), 3);
    assert_eq!(
        names(&bench.recent_clients()),
        vec!["John Doe", "Jane Smith", "Marcus Reed", "Lena Ortiz"]
    );
}

#[test]
fn test_coordinated_entry_by_score() {
    let bench = load_workbench();
    let view = bench.coordinated_entry(None, QueueOrder::Score, as_of());
    let ranked: Vec<_> = view.entries.iter().map(|e| e.client.full_name()).collect();
    assert_eq!(
        ranked,
        vec!["Marcus Reed", "John Doe", "Grace Lee", "Jane Smith", "Lena Ortiz", "Omar Hassan"]
    );
    assert_eq!(
        view.stats,
        QueueStats {
            total_clients: 6,
            high_priority: 3,
            average_wait_days: 115,
            pending_assessments: 2,
        }
    );
}

#[test]
fn test_coordinated_entry_filtered_by_status() {
    let bench = load_workbench();
    let view = bench.coordinated_entry(Some("at_risk"), QueueOrder::Waiting, as_of());
    let ranked: Vec<_> = view.entries.iter().map(|e| e.client.full_name()).collect();
    assert_eq!(ranked, vec!["Jane Smith", "Grace Lee"]);
    assert_eq!(
        view.stats,
        QueueStats {
            total_clients: 2,
            high_priority: 1,
            average_wait_days: 86,
            pending_assessments: 0,
        }
    );

    let empty = bench.coordinated_entry(Some("no such client"), QueueOrder::Score, as_of());
    assert_eq!(empty.stats, QueueStats::default());
}

#[test]
fn test_client_and_program_filters() {
    let bench = load_workbench();
    let criteria = ClientCriteria::new()
        .with_search("haven")
        .with_housing_status([HousingStatus::Homeless]);
    assert_eq!(names(&bench.clients(&criteria)), vec!["John Doe", "Marcus Reed"]);

    let mine = bench.my_clients(&ClientCriteria::new().with_housing_status([HousingStatus::AtRisk]));
    assert_eq!(names(&mine), vec!["Jane Smith"]);

    let shelters = bench.programs(&ProgramCriteria::new().with_providers(["City Shelter Network"]));
    assert_eq!(shelters.len(), 2);
    let permanent = bench.programs(&ProgramCriteria::new().with_types([ProgramType::Permanent]));
    assert_eq!(permanent[0].name, "Maple Court");

    let totals = bench.program_totals(&ProgramCriteria::default());
    assert_eq!((totals.total_capacity, totals.total_occupancy, totals.occupancy_rate), (75, 54, 72));
    assert_eq!(bench.provider_names(), vec!["City Shelter Network", "Maple Housing"]);
}

#[test]
fn test_services_tasks_and_time_card() {
    let bench = load_workbench();
    let housing = bench.services(&ServiceCriteria::new().with_category("housing"));
    assert_eq!(housing.len(), 2);
    let stats = bench.service_stats();
    assert_eq!((stats.active, stats.scheduled, stats.completed, stats.providers), (1, 1, 1, 2));

    let today = NaiveDate::from_ymd_opt(2024, 6, 14).unwrap();
    assert_eq!(
        bench.task_counts(today),
        TaskCounts {
            pending: 2,
            in_progress: 1,
            completed: 1,
            overdue: 1,
            due_today: 1,
        }
    );
    let upcoming: Vec<_> = bench.upcoming_tasks().iter().map(|t| t.title.as_str()).collect();
    assert_eq!(
        upcoming,
        vec!["Submit housing application", "Collect ID documents", "Lease review"]
    );

    let card = bench.time_card(NaiveDate::from_ymd_opt(2024, 6, 12).unwrap());
    assert_eq!(card.entry_count, 3);
    assert!((card.total_hours - 4.5).abs() < f64::EPSILON);
    assert_eq!((card.client_meetings, card.pending), (2, 2));
}

#[test]
fn test_report_serializes() {
    let bench = load_workbench();
    let report = bench.report(as_of());
    let json = serde_json::to_value(&report).unwrap();
    assert_eq!(json["current_user"], "John Appleseed");
    assert_eq!(json["dashboard"]["my_clients"], 4);
    assert_eq!(json["coordinated_entry"]["high_priority"], 3);
    assert_eq!(json["programs"]["occupancy_rate"], 72);
    assert_eq!(bench.store().record_count(), sample_population().record_count());
}
