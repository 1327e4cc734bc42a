//! Priority lookup service.

use wishlinker_common::AppResult;
use wishlinker_db::{entities::priority, repositories::PriorityRepository};

/// Priority service. The priority table is a global lookup.
#[derive(Clone)]
pub struct PriorityService {
    priority_repo: PriorityRepository,
}

impl PriorityService {
    /// Create a new priority service.
    #[must_use]
    pub const fn new(priority_repo: PriorityRepository) -> Self {
        Self { priority_repo }
    }

    /// All priority levels.
    pub async fn list(&self) -> AppResult<Vec<priority::Model>> {
        self.priority_repo.find_all().await
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use sea_orm::{DatabaseBackend, MockDatabase};
    use std::sync::Arc;

    #[tokio::test]
    async fn test_list() {
        let rows = vec![
            priority::Model {
                id: "pr1".to_string(),
                name: "Low".to_string(),
            },
            priority::Model {
                id: "pr2".to_string(),
                name: "High".to_string(),
            },
        ];

        let db = Arc::new(
            MockDatabase::new(DatabaseBackend::Postgres)
                .append_query_results([rows])
                .into_connection(),
        );

        let svc = PriorityService::new(PriorityRepository::new(db));
        let result = svc.list().await.unwrap();

        assert_eq!(result.len(), 2);
        assert_eq!(result[0].name, "Low");
    }
}
