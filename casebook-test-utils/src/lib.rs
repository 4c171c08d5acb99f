//! Casebook Test Utilities
//!
//! Shared test infrastructure for the Casebook workspace:
//! - Proptest generators for record types
//! - Fixtures, including a deterministic sample population
//! - Assertions for Casebook error variants

// Re-export the store from its source crate
pub use casebook_storage::{FixtureSet, InMemoryStore, RecordStore};

// Re-export core types for convenience
pub use casebook_core::{
    ActivityType, Assessment, AssessmentId, CasebookError, CasebookResult, Client, ClientId,
    EntityIdType, EntityType, HousingStatus, Note, NoteCategory, NoteId, Program, ProgramId,
    ProgramType, Provider, ProviderId, Referral, ReferralId, ReferralStatus, Service, ServiceId,
    ServiceStatus, StoreError, Task, TaskId, TaskPriority, TaskStatus, TimeEntry, TimeEntryId,
    TimeEntryStatus, Timestamp, User, UserId, UserRole, ValidationError,
};

use chrono::{NaiveDate, NaiveTime, TimeZone, Utc};
use std::collections::BTreeMap;
use uuid::Uuid;

// ============================================================================
// PROPTEST GENERATORS
// ============================================================================

pub mod generators {
    //! Proptest strategies for Casebook record types.

    use super::*;
    use proptest::prelude::*;

    // === Identity Generators ===

    /// Generate a random UUID.
    pub fn arb_uuid() -> impl Strategy<Value = Uuid> {
        any::<[u8; 16]>().prop_map(Uuid::from_bytes)
    }

    pub fn arb_client_id() -> impl Strategy<Value = ClientId> {
        arb_uuid().prop_map(ClientId::new)
    }

    pub fn arb_program_id() -> impl Strategy<Value = ProgramId> {
        arb_uuid().prop_map(ProgramId::new)
    }

    pub fn arb_user_id() -> impl Strategy<Value = UserId> {
        arb_uuid().prop_map(UserId::new)
    }

    /// Generate a Timestamp between 2020 and 2030.
    pub fn arb_timestamp() -> impl Strategy<Value = Timestamp> {
        (1577836800i64..1893456000i64).prop_map(|secs| {
            chrono::DateTime::from_timestamp(secs, 0).expect("timestamp within 2020..2030")
        })
    }

    /// Generate a calendar date between 2020 and 2030.
    pub fn arb_date() -> impl Strategy<Value = NaiveDate> {
        arb_timestamp().prop_map(|ts| ts.date_naive())
    }

    // === Enum Generators ===

    pub fn arb_housing_status() -> impl Strategy<Value = HousingStatus> {
        prop::sample::select(HousingStatus::ALL)
    }

    pub fn arb_program_type() -> impl Strategy<Value = ProgramType> {
        prop::sample::select(ProgramType::ALL)
    }

    pub fn arb_note_category() -> impl Strategy<Value = NoteCategory> {
        prop::sample::select(NoteCategory::ALL)
    }

    pub fn arb_task_status() -> impl Strategy<Value = TaskStatus> {
        prop::sample::select(TaskStatus::ALL)
    }

    pub fn arb_service_status() -> impl Strategy<Value = ServiceStatus> {
        prop::sample::select(ServiceStatus::ALL)
    }

    // === Record Generators ===

    /// Generate a program. Occupancy may exceed capacity.
    pub fn arb_program() -> impl Strategy<Value = Program> {
        (
            arb_program_id(),
            "[A-Z][a-z]{2,8}",
            prop::sample::select(vec!["House", "Haven", "Court", "Commons"]),
            arb_program_type(),
            prop::sample::select(vec!["City Shelter Network", "Maple Housing", "Rapid Path"]),
            0u32..60,
            0u32..60,
        )
            .prop_map(|(id, stem, suffix, program_type, provider, capacity, current_occupancy)| {
                Program {
                    id,
                    name: format!("{stem} {suffix}"),
                    program_type,
                    provider: provider.to_string(),
                    address: String::new(),
                    capacity,
                    current_occupancy,
                }
            })
    }

    /// Generate a client with no program and no case manager.
    pub fn arb_client() -> impl Strategy<Value = Client> {
        (
            arb_client_id(),
            "[A-Z][a-z]{1,8}",
            "[A-Z][a-z]{1,10}",
            arb_housing_status(),
            any::<bool>(),
            any::<bool>(),
            prop::option::of(0i32..=100),
            arb_timestamp(),
        )
            .prop_map(
                |(id, first_name, last_name, housing_status, is_veteran, has_disability, priority_score, intake_date)| {
                    Client {
                        id,
                        first_name,
                        last_name,
                        date_of_birth: None,
                        gender: None,
                        ethnicity: None,
                        race: None,
                        phone: None,
                        email: None,
                        is_veteran,
                        has_disability,
                        housing_status,
                        location: None,
                        profile_image: None,
                        intake_date,
                        last_updated: intake_date,
                        case_manager_id: None,
                        priority_score,
                        household: Vec::new(),
                        program_id: None,
                    }
                },
            )
    }

    /// Generate clients together with the program table they reference.
    ///
    /// Clients are spread across three case managers; some have no program.
    pub fn arb_client_population() -> impl Strategy<Value = (Vec<Client>, Vec<Program>)> {
        prop::collection::vec(arb_program(), 0..5)
            .prop_flat_map(|programs| {
                let slots = programs.len().max(1);
                let rows = prop::collection::vec(
                    (arb_client(), prop::option::of(0..slots), 0usize..3),
                    0..20,
                );
                (Just(programs), rows)
            })
            .prop_map(|(programs, rows)| {
                let managers = [
                    UserId::new(Uuid::from_u128(0xA1)),
                    UserId::new(Uuid::from_u128(0xA2)),
                    UserId::new(Uuid::from_u128(0xA3)),
                ];
                let clients = rows
                    .into_iter()
                    .map(|(mut client, slot, manager)| {
                        client.program_id = slot.and_then(|i| programs.get(i)).map(|p| p.id);
                        client.case_manager_id = Some(managers[manager]);
                        client
                    })
                    .collect();
                (clients, programs)
            })
    }

    /// Generate an assessment for `client_id`.
    pub fn arb_assessment(client_id: ClientId) -> impl Strategy<Value = Assessment> {
        (arb_uuid(), arb_date(), 0i32..=20).prop_map(move |(id, date, score)| Assessment {
            id: AssessmentId::new(id),
            client_id,
            assessment_type: "VI-SPDAT".to_string(),
            assessor_id: UserId::new(Uuid::from_u128(0xA1)),
            assessor_name: "Assessor".to_string(),
            date,
            score,
            responses: BTreeMap::new(),
            recommendations: None,
        })
    }

    /// Generate a note by `author_id` about `client_id`.
    pub fn arb_note(client_id: ClientId, author_id: UserId) -> impl Strategy<Value = Note> {
        (arb_uuid(), "[a-z ]{1,40}", arb_timestamp(), arb_note_category(), any::<bool>()).prop_map(
            move |(id, content, created_at, category, is_private)| Note {
                id: NoteId::new(id),
                client_id,
                author_id,
                author_name: "Case Manager".to_string(),
                content,
                created_at,
                category,
                is_private,
            },
        )
    }

    /// Generate a task for `client_id`.
    pub fn arb_task(client_id: ClientId) -> impl Strategy<Value = Task> {
        (arb_uuid(), "[A-Z][a-z ]{2,20}", arb_date(), arb_task_status()).prop_map(
            move |(id, title, due_date, status)| Task {
                id: TaskId::new(id),
                title,
                client_id,
                due_date,
                status,
                priority: TaskPriority::Medium,
            },
        )
    }
}

// ============================================================================
// TEST FIXTURES
// ============================================================================

pub mod fixtures {
    //! Pre-built records for common test scenarios.

    use super::*;

    fn ts(year: i32, month: u32, day: u32, hour: u32) -> Timestamp {
        Utc.with_ymd_and_hms(year, month, day, hour, 0, 0)
            .single()
            .expect("fixture timestamp must be valid")
    }

    pub(crate) fn date(year: i32, month: u32, day: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(year, month, day).expect("fixture date must be valid")
    }

    fn time(hour: u32, minute: u32) -> NaiveTime {
        NaiveTime::from_hms_opt(hour, minute, 0).expect("fixture time must be valid")
    }

    /// Create a staff user with the case-manager role.
    pub fn user(name: &str) -> User {
        let email = format!("{}@casebook.test", name.to_lowercase().replace(' ', "."));
        User {
            id: UserId::now_v7(),
            name: name.to_string(),
            email,
            role: UserRole::CaseManager,
            avatar_url: None,
            organization: None,
        }
    }

    /// Create a homeless client with no program, case manager or score.
    pub fn client(first_name: &str, last_name: &str) -> Client {
        let now = Utc::now();
        Client {
            id: ClientId::now_v7(),
            first_name: first_name.to_string(),
            last_name: last_name.to_string(),
            date_of_birth: None,
            gender: None,
            ethnicity: None,
            race: None,
            phone: None,
            email: None,
            is_veteran: false,
            has_disability: false,
            housing_status: HousingStatus::Homeless,
            location: None,
            profile_image: None,
            intake_date: now,
            last_updated: now,
            case_manager_id: None,
            priority_score: None,
            household: Vec::new(),
            program_id: None,
        }
    }

    pub fn program(
        name: &str,
        provider: &str,
        program_type: ProgramType,
        capacity: u32,
        current_occupancy: u32,
    ) -> Program {
        Program {
            id: ProgramId::now_v7(),
            name: name.to_string(),
            program_type,
            provider: provider.to_string(),
            address: String::new(),
            capacity,
            current_occupancy,
        }
    }

    /// Create a general, non-private note.
    pub fn note(client_id: ClientId, author_id: UserId, created_at: Timestamp) -> Note {
        Note {
            id: NoteId::now_v7(),
            client_id,
            author_id,
            author_name: "Case Manager".to_string(),
            content: "Checked in with client.".to_string(),
            created_at,
            category: NoteCategory::General,
            is_private: false,
        }
    }

    /// Create a VI-SPDAT assessment dated 2024-01-15.
    pub fn assessment(client_id: ClientId, score: i32) -> Assessment {
        Assessment {
            id: AssessmentId::now_v7(),
            client_id,
            assessment_type: "VI-SPDAT".to_string(),
            assessor_id: UserId::now_v7(),
            assessor_name: "Assessor".to_string(),
            date: date(2024, 1, 15),
            score,
            responses: BTreeMap::new(),
            recommendations: None,
        }
    }

    /// Create a medium-priority task.
    pub fn task(client_id: ClientId, title: &str, due_date: NaiveDate, status: TaskStatus) -> Task {
        Task {
            id: TaskId::now_v7(),
            title: title.to_string(),
            client_id,
            due_date,
            status,
            priority: TaskPriority::Medium,
        }
    }

    pub fn service(
        client_id: ClientId,
        service_type: &str,
        provider_name: &str,
        status: ServiceStatus,
    ) -> Service {
        Service {
            id: ServiceId::now_v7(),
            client_id,
            service_type: service_type.to_string(),
            provider_id: ProviderId::now_v7(),
            provider_name: provider_name.to_string(),
            program_id: None,
            program_name: None,
            start_date: date(2024, 2, 1),
            end_date: None,
            status,
            notes: None,
        }
    }

    pub fn provider(name: &str) -> Provider {
        Provider {
            id: ProviderId::now_v7(),
            name: name.to_string(),
            service_types: Vec::new(),
            address: "1 Main St".to_string(),
            phone: "555-0100".to_string(),
            email: "intake@provider.test".to_string(),
            website: None,
            capacity: None,
            current_occupancy: None,
            lat: 0.0,
            lng: 0.0,
        }
    }

    /// Create a pending 9:00 time entry lasting `duration_hours`.
    pub fn time_entry(
        user_id: UserId,
        date: NaiveDate,
        activity_type: ActivityType,
        duration_hours: f64,
    ) -> TimeEntry {
        TimeEntry {
            id: TimeEntryId::now_v7(),
            user_id,
            client_id: None,
            date,
            start_time: time(9, 0),
            end_time: time(9, 0) + chrono::Duration::minutes((duration_hours * 60.0) as i64),
            duration_hours,
            activity_type,
            description: activity_type.label().to_string(),
            status: TimeEntryStatus::Pending,
        }
    }

    // === Sample Population ===

    fn id(n: u128) -> Uuid {
        Uuid::from_u128(n)
    }

    /// Id of the case manager who owns most of [`sample_population`].
    pub fn sample_case_manager() -> UserId {
        UserId::new(id(0x1))
    }

    /// A small, fully deterministic population with every collection filled.
    ///
    /// - Two users; the first is [`sample_case_manager`].
    /// - Three programs, one of them unreferenced.
    /// - Six clients: four for the sample case manager, one without a program.
    /// - Notes dated across May and June 2024.
    pub fn sample_population() -> FixtureSet {
        let manager = sample_case_manager();
        let colleague = UserId::new(id(0x2));

        let users = vec![
            User {
                id: manager,
                name: "John Appleseed".to_string(),
                email: "john.appleseed@casebook.test".to_string(),
                role: UserRole::CaseManager,
                avatar_url: None,
                organization: Some("Metro Outreach".to_string()),
            },
            User {
                id: colleague,
                name: "Sarah Chen".to_string(),
                email: "sarah.chen@casebook.test".to_string(),
                role: UserRole::Staff,
                avatar_url: None,
                organization: Some("Metro Outreach".to_string()),
            },
        ];

        let hope = ProgramId::new(id(0x100));
        let maple = ProgramId::new(id(0x101));
        let bridge = ProgramId::new(id(0x102));
        let programs = vec![
            Program {
                id: hope,
                name: "Hope Haven".to_string(),
                program_type: ProgramType::Emergency,
                provider: "City Shelter Network".to_string(),
                address: "12 Main St".to_string(),
                capacity: 40,
                current_occupancy: 34,
            },
            Program {
                id: maple,
                name: "Maple Court".to_string(),
                program_type: ProgramType::Permanent,
                provider: "Maple Housing".to_string(),
                address: "400 Maple Ave".to_string(),
                capacity: 20,
                current_occupancy: 14,
            },
            Program {
                id: bridge,
                name: "Bridge Point".to_string(),
                program_type: ProgramType::Transitional,
                provider: "City Shelter Network".to_string(),
                address: "9 River Rd".to_string(),
                capacity: 15,
                current_occupancy: 6,
            },
        ];

        let sample_client = |n: u128,
                             first: &str,
                             last: &str,
                             status: HousingStatus,
                             score: Option<i32>,
                             case_manager: UserId,
                             program: Option<ProgramId>,
                             intake: Timestamp| Client {
            id: ClientId::new(id(n)),
            first_name: first.to_string(),
            last_name: last.to_string(),
            date_of_birth: Some(date(1980, 1, 1)),
            gender: None,
            ethnicity: None,
            race: None,
            phone: Some(format!("555-01{:02}", n % 100)),
            email: Some(format!("{}.{}@mail.test", first.to_lowercase(), last.to_lowercase())),
            is_veteran: n % 2 == 0,
            has_disability: n % 3 == 0,
            housing_status: status,
            location: None,
            profile_image: None,
            intake_date: intake,
            last_updated: intake,
            case_manager_id: Some(case_manager),
            priority_score: score,
            household: Vec::new(),
            program_id: program,
        };

        let clients = vec![
            sample_client(0x200, "John", "Doe", HousingStatus::Homeless, Some(85), manager, Some(hope), ts(2024, 1, 10, 9)),
            sample_client(0x201, "Jane", "Smith", HousingStatus::AtRisk, Some(72), manager, Some(maple), ts(2024, 2, 1, 9)),
            sample_client(0x202, "Marcus", "Reed", HousingStatus::Homeless, Some(91), manager, Some(hope), ts(2023, 11, 20, 9)),
            sample_client(0x203, "Lena", "Ortiz", HousingStatus::Transitional, None, manager, None, ts(2024, 4, 2, 9)),
            sample_client(0x204, "Omar", "Hassan", HousingStatus::Housed, Some(40), colleague, Some(maple), ts(2024, 3, 15, 9)),
            sample_client(0x205, "Grace", "Lee", HousingStatus::AtRisk, Some(80), colleague, Some(hope), ts(2024, 5, 5, 9)),
        ];
        let client = |n: u128| ClientId::new(id(n));

        let sample_note = |n: u128, about: u128, author: UserId, created_at: Timestamp, category: NoteCategory| Note {
            id: NoteId::new(id(n)),
            client_id: client(about),
            author_id: author,
            author_name: if author == manager { "John Appleseed" } else { "Sarah Chen" }.to_string(),
            content: format!("{} follow-up.", category.label()),
            created_at,
            category,
            is_private: false,
        };
        let notes = vec![
            sample_note(0x300, 0x200, manager, ts(2024, 6, 3, 10), NoteCategory::Housing),
            sample_note(0x301, 0x201, manager, ts(2024, 6, 12, 14), NoteCategory::Health),
            sample_note(0x302, 0x202, manager, ts(2024, 5, 28, 11), NoteCategory::Employment),
            sample_note(0x303, 0x204, colleague, ts(2024, 6, 11, 9), NoteCategory::Financial),
            sample_note(0x304, 0x203, manager, ts(2024, 6, 10, 16), NoteCategory::General),
        ];

        let sample_assessment = |n: u128, about: u128, on: NaiveDate, score: i32| Assessment {
            id: AssessmentId::new(id(n)),
            client_id: client(about),
            assessment_type: "VI-SPDAT".to_string(),
            assessor_id: manager,
            assessor_name: "John Appleseed".to_string(),
            date: on,
            score,
            responses: BTreeMap::from([("sleeps_outside".to_string(), serde_json::Value::Bool(score >= 10))]),
            recommendations: None,
        };
        let assessments = vec![
            sample_assessment(0x400, 0x200, date(2024, 1, 20), 12),
            sample_assessment(0x401, 0x200, date(2024, 4, 20), 16),
            sample_assessment(0x402, 0x202, date(2024, 2, 2), 18),
            sample_assessment(0x403, 0x201, date(2024, 3, 1), 7),
            sample_assessment(0x404, 0x205, date(2024, 5, 6), 15),
        ];

        let sample_task = |n: u128, about: u128, title: &str, due: NaiveDate, status: TaskStatus, priority: TaskPriority| Task {
            id: TaskId::new(id(n)),
            title: title.to_string(),
            client_id: client(about),
            due_date: due,
            status,
            priority,
        };
        let tasks = vec![
            sample_task(0x500, 0x200, "Submit housing application", date(2024, 6, 14), TaskStatus::Pending, TaskPriority::High),
            sample_task(0x501, 0x201, "Schedule clinic visit", date(2024, 6, 10), TaskStatus::Completed, TaskPriority::Medium),
            sample_task(0x502, 0x202, "Collect ID documents", date(2024, 6, 1), TaskStatus::Overdue, TaskPriority::High),
            sample_task(0x503, 0x203, "Lease review", date(2024, 6, 15), TaskStatus::InProgress, TaskPriority::Low),
            sample_task(0x504, 0x204, "Benefits renewal", date(2024, 6, 20), TaskStatus::Pending, TaskPriority::Medium),
        ];

        let city = ProviderId::new(id(0x600));
        let clinic = ProviderId::new(id(0x601));
        let providers = vec![
            Provider {
                id: city,
                name: "City Shelter Network".to_string(),
                service_types: vec!["Housing Assistance".to_string()],
                address: "12 Main St".to_string(),
                phone: "555-0142".to_string(),
                email: "intake@citynet.test".to_string(),
                website: None,
                capacity: Some(55),
                current_occupancy: Some(40),
                lat: 40.71,
                lng: -74.0,
            },
            Provider {
                id: clinic,
                name: "Metro Clinic".to_string(),
                service_types: vec!["Healthcare".to_string()],
                address: "80 Health Way".to_string(),
                phone: "555-0177".to_string(),
                email: "front@metroclinic.test".to_string(),
                website: Some("https://metroclinic.test".to_string()),
                capacity: None,
                current_occupancy: None,
                lat: 40.73,
                lng: -73.99,
            },
        ];

        let sample_service = |n: u128, about: u128, kind: &str, provider: (ProviderId, &str), status: ServiceStatus| Service {
            id: ServiceId::new(id(n)),
            client_id: client(about),
            service_type: kind.to_string(),
            provider_id: provider.0,
            provider_name: provider.1.to_string(),
            program_id: None,
            program_name: None,
            start_date: date(2024, 5, 1),
            end_date: None,
            status,
            notes: None,
        };
        let services = vec![
            sample_service(0x700, 0x200, "Housing Search", (city, "City Shelter Network"), ServiceStatus::InProgress),
            sample_service(0x701, 0x201, "Health Screening", (clinic, "Metro Clinic"), ServiceStatus::Completed),
            sample_service(0x702, 0x202, "Housing Deposit", (city, "City Shelter Network"), ServiceStatus::Scheduled),
            sample_service(0x703, 0x204, "Dental Care", (clinic, "Metro Clinic"), ServiceStatus::Cancelled),
        ];

        let referrals = vec![Referral {
            id: ReferralId::new(id(0x800)),
            client_id: client(0x202),
            from_provider_id: city,
            to_provider_id: clinic,
            service_type: "Healthcare".to_string(),
            status: ReferralStatus::Pending,
            created_at: ts(2024, 6, 4, 13),
            notes: None,
        }];

        let sample_entry = |n: u128, on: NaiveDate, start: NaiveTime, end: NaiveTime, hours: f64, activity: ActivityType, status: TimeEntryStatus| TimeEntry {
            id: TimeEntryId::new(id(n)),
            user_id: manager,
            client_id: None,
            date: on,
            start_time: start,
            end_time: end,
            duration_hours: hours,
            activity_type: activity,
            description: activity.label().to_string(),
            status,
        };
        let time_entries = vec![
            sample_entry(0x900, date(2024, 6, 12), time(9, 0), time(10, 30), 1.5, ActivityType::ClientMeeting, TimeEntryStatus::Pending),
            sample_entry(0x901, date(2024, 6, 12), time(11, 0), time(12, 0), 1.0, ActivityType::CaseNotes, TimeEntryStatus::Submitted),
            sample_entry(0x902, date(2024, 6, 12), time(13, 0), time(15, 0), 2.0, ActivityType::ClientMeeting, TimeEntryStatus::Pending),
            sample_entry(0x903, date(2024, 6, 11), time(9, 0), time(11, 0), 2.0, ActivityType::Travel, TimeEntryStatus::Approved),
        ];

        FixtureSet {
            users,
            clients,
            programs,
            notes,
            services,
            assessments,
            tasks,
            providers,
            referrals,
            time_entries,
        }
    }

    /// [`sample_population`] loaded into an in-memory store.
    pub fn sample_store() -> InMemoryStore {
        InMemoryStore::from(sample_population())
    }
}

// ============================================================================
// ASSERTIONS
// ============================================================================

pub mod assertions {
    //! Assertions for Casebook error variants.

    use super::*;

    /// Assert that a CasebookResult is Ok.
    #[track_caller]
    pub fn assert_ok<T: std::fmt::Debug>(result: &CasebookResult<T>) {
        assert!(result.is_ok(), "Expected Ok, got Err: {:?}", result);
    }

    /// Assert that a CasebookResult is a NotFound store error for `entity_type`.
    #[track_caller]
    pub fn assert_not_found<T: std::fmt::Debug>(result: &CasebookResult<T>, entity_type: EntityType) {
        match result {
            Err(CasebookError::Store(StoreError::NotFound { entity_type: et, .. })) => {
                assert_eq!(*et, entity_type, "Wrong entity type in NotFound error");
            }
            other => panic!("Expected NotFound error for {:?}, got: {:?}", entity_type, other),
        }
    }

    /// Assert that a CasebookResult is a DuplicateId store error for `entity_type`.
    #[track_caller]
    pub fn assert_duplicate_id<T: std::fmt::Debug>(result: &CasebookResult<T>, entity_type: EntityType) {
        match result {
            Err(CasebookError::Store(StoreError::DuplicateId { entity_type: et, .. })) => {
                assert_eq!(*et, entity_type, "Wrong entity type in DuplicateId error");
            }
            other => panic!("Expected DuplicateId error for {:?}, got: {:?}", entity_type, other),
        }
    }

    /// Assert that a CasebookResult is a Validation error.
    #[track_caller]
    pub fn assert_validation_error<T: std::fmt::Debug>(result: &CasebookResult<T>) {
        match result {
            Err(CasebookError::Validation(_)) => {}
            other => panic!("Expected Validation error, got: {:?}", other),
        }
    }

    /// Assert that a CasebookResult is a Config error.
    #[track_caller]
    pub fn assert_config_error<T: std::fmt::Debug>(result: &CasebookResult<T>) {
        match result {
            Err(CasebookError::Config(_)) => {}
            other => panic!("Expected Config error, got: {:?}", other),
        }
    }
}
