//! Client list filtering.
//!
//! Every active criterion is an independent predicate; a client is kept only if
//! all of them pass. Unset criteria impose no constraint.

use crate::SearchQuery;
use casebook_core::{Client, HousingStatus, Program, ProgramId, UserId};
use casebook_storage::join_program;
use serde::{Deserialize, Serialize};

/// Optional constraints for [`filter_clients`].
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ClientCriteria {
    /// Keep only clients assigned to this case manager.
    pub case_manager_id: Option<UserId>,
    /// Substring of the full name or program name.
    pub search_query: Option<String>,
    /// Allowed housing statuses; empty means any.
    pub housing_status: Vec<HousingStatus>,
    /// Allowed program ids; empty means any. Clients without a loaded program
    /// never pass a non-empty set.
    pub program_ids: Vec<ProgramId>,
}

impl ClientCriteria {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_case_manager(mut self, user_id: UserId) -> Self {
        self.case_manager_id = Some(user_id);
        self
    }

    pub fn with_search(mut self, query: impl Into<String>) -> Self {
        self.search_query = Some(query.into());
        self
    }

    pub fn with_housing_status(mut self, statuses: impl IntoIterator<Item = HousingStatus>) -> Self {
        self.housing_status = statuses.into_iter().collect();
        self
    }

    pub fn with_programs(mut self, program_ids: impl IntoIterator<Item = ProgramId>) -> Self {
        self.program_ids = program_ids.into_iter().collect();
        self
    }

    /// Whether `client`, joined to `program`, passes every active criterion.
    pub fn matches(&self, client: &Client, program: Option<&Program>) -> bool {
        if let Some(case_manager_id) = self.case_manager_id {
            if client.case_manager_id != Some(case_manager_id) {
                return false;
            }
        }

        if let Some(query) = SearchQuery::parse(self.search_query.as_deref()) {
            let full_name = client.full_name();
            let program_name = program.map(|p| p.name.as_str()).unwrap_or("");
            if !query.matches_any([full_name.as_str(), program_name]) {
                return false;
            }
        }

        if !self.housing_status.is_empty() && !self.housing_status.contains(&client.housing_status)
        {
            return false;
        }

        if !self.program_ids.is_empty() {
            match program {
                Some(p) if self.program_ids.contains(&p.id) => {}
                _ => return false,
            }
        }

        true
    }
}

/// Clients passing every active criterion, in input order.
pub fn filter_clients<'a>(
    clients: &'a [Client],
    programs: &[Program],
    criteria: &ClientCriteria,
) -> Vec<&'a Client> {
    clients
        .iter()
        .filter(|c| criteria.matches(c, join_program(c, programs)))
        .collect()
}
