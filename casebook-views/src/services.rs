//! Service directory filtering and status counts.

use crate::SearchQuery;
use casebook_core::{Provider, Service, ServiceStatus};
use serde::{Deserialize, Serialize};

/// Constraints for [`filter_services`].
///
/// A non-empty search query takes precedence; the category is consulted only
/// when there is no query.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ServiceCriteria {
    /// Substring of the service type or provider name.
    pub search_query: Option<String>,
    /// Substring of the service type, e.g. `"housing"`.
    pub category: Option<String>,
}

impl ServiceCriteria {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_search(mut self, query: impl Into<String>) -> Self {
        self.search_query = Some(query.into());
        self
    }

    pub fn with_category(mut self, category: impl Into<String>) -> Self {
        self.category = Some(category.into());
        self
    }

    pub fn matches(&self, service: &Service) -> bool {
        if let Some(query) = SearchQuery::parse(self.search_query.as_deref()) {
            return query.matches_any([service.service_type.as_str(), service.provider_name.as_str()]);
        }
        if let Some(category) = SearchQuery::parse(self.category.as_deref()) {
            return category.matches(&service.service_type);
        }
        true
    }
}

pub fn filter_services<'a>(services: &'a [Service], criteria: &ServiceCriteria) -> Vec<&'a Service> {
    services.iter().filter(|s| criteria.matches(s)).collect()
}

/// Status counts for the services page header.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ServiceStats {
    /// Services in progress.
    pub active: usize,
    pub scheduled: usize,
    pub completed: usize,
    pub providers: usize,
}

pub fn service_stats(services: &[Service], providers: &[Provider]) -> ServiceStats {
    let count = |status: ServiceStatus| services.iter().filter(|s| s.status == status).count();
    ServiceStats {
        active: count(ServiceStatus::InProgress),
        scheduled: count(ServiceStatus::Scheduled),
        completed: count(ServiceStatus::Completed),
        providers: providers.len(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use casebook_core::{ClientId, EntityIdType};
    use casebook_test_utils::fixtures;

    fn directory() -> Vec<Service> {
        let client = ClientId::now_v7();
        vec![
            fixtures::service(client, "Housing Search", "Metro Housing", ServiceStatus::InProgress),
            fixtures::service(client, "Job Training", "Work First", ServiceStatus::Scheduled),
            fixtures::service(client, "Health Screening", "Metro Clinic", ServiceStatus::Completed),
            fixtures::service(client, "Housing Deposit", "Fund Co", ServiceStatus::Cancelled),
        ]
    }

    fn types<'a>(found: &[&'a Service]) -> Vec<&'a str> {
        found.iter().map(|s| s.service_type.as_str()).collect()
    }

    #[test]
    fn test_search_matches_type_or_provider() {
        let services = directory();
        let found = filter_services(&services, &ServiceCriteria::new().with_search("metro"));
        assert_eq!(types(&found), vec!["Housing Search", "Health Screening"]);
    }

    #[test]
    fn test_category_matches_type() {
        let services = directory();
        let found = filter_services(&services, &ServiceCriteria::new().with_category("Housing"));
        assert_eq!(types(&found), vec!["Housing Search", "Housing Deposit"]);
    }

    #[test]
    fn test_search_takes_precedence_over_category() {
        let services = directory();
        let criteria = ServiceCriteria::new()
            .with_search("job")
            .with_category("housing");
        assert_eq!(types(&filter_services(&services, &criteria)), vec!["Job Training"]);

        let criteria = ServiceCriteria::new().with_search("").with_category("health");
        assert_eq!(types(&filter_services(&services, &criteria)), vec!["Health Screening"]);
    }

    #[test]
    fn test_no_criteria_keeps_everything() {
        let services = directory();
        assert_eq!(filter_services(&services, &ServiceCriteria::new()).len(), 4);
    }

    #[test]
    fn test_service_stats() {
        let services = directory();
        let providers = vec![fixtures::provider("Metro Housing"), fixtures::provider("Work First")];
        assert_eq!(
            service_stats(&services, &providers),
            ServiceStats {
                active: 1,
                scheduled: 1,
                completed: 1,
                providers: 2,
            }
        );
    }
}
