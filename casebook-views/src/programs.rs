//! Program list filtering and occupancy aggregates.

use crate::SearchQuery;
use casebook_core::{occupancy_rate, Client, Program, ProgramId, ProgramType};
use casebook_storage::find_all_by_key;
use serde::{Deserialize, Serialize};

/// Optional constraints for [`filter_programs`].
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ProgramCriteria {
    /// Substring of the program name or provider.
    pub search_query: Option<String>,
    /// Allowed program types; empty means any.
    pub types: Vec<ProgramType>,
    /// Allowed provider names (exact); empty means any.
    pub providers: Vec<String>,
}

impl ProgramCriteria {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_search(mut self, query: impl Into<String>) -> Self {
        self.search_query = Some(query.into());
        self
    }

    pub fn with_types(mut self, types: impl IntoIterator<Item = ProgramType>) -> Self {
        self.types = types.into_iter().collect();
        self
    }

    pub fn with_providers<S: Into<String>>(mut self, providers: impl IntoIterator<Item = S>) -> Self {
        self.providers = providers.into_iter().map(Into::into).collect();
        self
    }

    pub fn matches(&self, program: &Program) -> bool {
        if let Some(query) = SearchQuery::parse(self.search_query.as_deref()) {
            if !query.matches_any([program.name.as_str(), program.provider.as_str()]) {
                return false;
            }
        }

        if !self.types.is_empty() && !self.types.contains(&program.program_type) {
            return false;
        }

        if !self.providers.is_empty() && !self.providers.iter().any(|p| *p == program.provider) {
            return false;
        }

        true
    }
}

/// Programs passing every active criterion, in input order.
pub fn filter_programs<'a, I>(programs: I, criteria: &ProgramCriteria) -> Vec<&'a Program>
where
    I: IntoIterator<Item = &'a Program>,
{
    programs.into_iter().filter(|p| criteria.matches(p)).collect()
}

/// Capacity roll-up across a set of programs.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProgramTotals {
    pub program_count: usize,
    pub total_capacity: u64,
    pub total_occupancy: u64,
    /// `round(total_occupancy / total_capacity * 100)`, 0 when there is no capacity.
    pub occupancy_rate: u32,
}

pub fn program_totals<'a, I>(programs: I) -> ProgramTotals
where
    I: IntoIterator<Item = &'a Program>,
{
    let mut totals = programs
        .into_iter()
        .fold(ProgramTotals::default(), |mut acc, p| {
            acc.program_count += 1;
            acc.total_capacity += u64::from(p.capacity);
            acc.total_occupancy += u64::from(p.current_occupancy);
            acc
        });
    totals.occupancy_rate = occupancy_rate(totals.total_occupancy, totals.total_capacity);
    totals
}

/// Clients enrolled in `program_id`, in input order.
pub fn program_residents(clients: &[Client], program_id: ProgramId) -> Vec<&Client> {
    find_all_by_key(clients, |c| c.program_id, Some(program_id))
}
