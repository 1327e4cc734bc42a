//! Friend graph service.

use sea_orm::Set;
use wishlinker_common::{AppError, AppResult, IdGenerator};
use wishlinker_db::{
    entities::{friend, user},
    repositories::{FriendRepository, UserRepository},
};

/// Friend service for managing friendship edges and discovery.
#[derive(Clone)]
pub struct FriendService {
    friend_repo: FriendRepository,
    user_repo: UserRepository,
    id_gen: IdGenerator,
}

/// A friend edge resolved to the user on the far end.
#[derive(Debug, Clone)]
pub struct FriendView {
    /// Edge ID.
    pub edge_id: String,
    /// Acceptance status of the edge.
    pub accepted: bool,
    /// The user on the other end of the edge.
    pub user: user::Model,
}

/// A user eligible to be friended, annotated with pending-request state.
#[derive(Debug, Clone)]
pub struct CandidateView {
    /// The candidate user.
    pub user: user::Model,
    /// A pending request from the caller to this user exists.
    pub pending_sent: bool,
    /// A pending request from this user to the caller exists.
    pub pending_received: bool,
}

impl FriendService {
    /// Create a new friend service.
    #[must_use]
    pub const fn new(friend_repo: FriendRepository, user_repo: UserRepository) -> Self {
        Self {
            friend_repo,
            user_repo,
            id_gen: IdGenerator::new(),
        }
    }

    /// Send a friend request (pending edge) from `requester` to `target`.
    ///
    /// Duplicate edges for the same pair are permitted.
    pub async fn create(&self, requester: &str, target: &str) -> AppResult<friend::Model> {
        if requester == target {
            return Err(AppError::BadRequest(
                "Cannot send a friend request to yourself".to_string(),
            ));
        }

        // Target must exist
        self.user_repo.get_by_id(target).await?;

        let model = friend::ActiveModel {
            id: Set(self.id_gen.generate()),
            user1_id: Set(requester.to_string()),
            user2_id: Set(target.to_string()),
            accepted: Set(false),
            created_at: Set(chrono::Utc::now().into()),
        };

        self.friend_repo.create(model).await
    }

    /// Flip the acceptance status of an edge.
    ///
    /// The caller is not verified to be one of the edge's endpoints; any
    /// authenticated user may update any edge by ID.
    pub async fn update(&self, _caller: &str, edge_id: &str, accepted: bool) -> AppResult<friend::Model> {
        let edge = self.friend_repo.get_by_id(edge_id).await?;

        let mut active: friend::ActiveModel = edge.into();
        active.accepted = Set(accepted);

        self.friend_repo.update(active).await
    }

    /// Remove an edge (unfriend, or reject a pending request).
    ///
    /// The caller is not verified to be one of the edge's endpoints.
    pub async fn delete(&self, _caller: &str, edge_id: &str) -> AppResult<()> {
        // 404 for unknown edges, then unconditional removal
        self.friend_repo.get_by_id(edge_id).await?;
        self.friend_repo.delete(edge_id).await
    }

    /// A user's accepted friends, resolved to the far endpoint.
    pub async fn accepted_friends(&self, user_id: &str) -> AppResult<Vec<FriendView>> {
        let edges = self.friend_repo.find_for_user(user_id, true).await?;
        self.resolve_edges(user_id, edges).await
    }

    /// A user's pending edges (sent and received), resolved to the far
    /// endpoint.
    pub async fn pending_for(&self, user_id: &str) -> AppResult<Vec<FriendView>> {
        let edges = self.friend_repo.find_for_user(user_id, false).await?;
        self.resolve_edges(user_id, edges).await
    }

    /// IDs of a user's accepted friends.
    pub async fn accepted_friend_ids(&self, user_id: &str) -> AppResult<Vec<String>> {
        let edges = self.friend_repo.find_for_user(user_id, true).await?;
        Ok(edges
            .iter()
            .map(|e| e.other_endpoint(user_id).to_string())
            .collect())
    }

    /// Users eligible to be friended by `user_id`.
    ///
    /// Excludes the caller and everyone already connected by an accepted
    /// edge. Each candidate is annotated with whether a pending request has
    /// been sent to or received from the caller.
    pub async fn candidates(
        &self,
        user_id: &str,
        search: Option<&str>,
    ) -> AppResult<Vec<CandidateView>> {
        let users = self.user_repo.find_all_except(user_id, search).await?;
        let edges = self.friend_repo.find_edges_for_user(user_id).await?;

        let mut accepted = std::collections::HashSet::new();
        let mut pending_sent = std::collections::HashSet::new();
        let mut pending_received = std::collections::HashSet::new();

        for edge in &edges {
            let other = edge.other_endpoint(user_id).to_string();
            if edge.accepted {
                accepted.insert(other);
            } else if edge.user1_id == user_id {
                pending_sent.insert(other);
            } else {
                pending_received.insert(other);
            }
        }

        Ok(users
            .into_iter()
            .filter(|u| !accepted.contains(&u.id))
            .map(|u| {
                let sent = pending_sent.contains(&u.id);
                let received = pending_received.contains(&u.id);
                CandidateView {
                    user: u,
                    pending_sent: sent,
                    pending_received: received,
                }
            })
            .collect())
    }

    /// Resolve the far endpoint of each edge to a user model.
    async fn resolve_edges(
        &self,
        user_id: &str,
        edges: Vec<friend::Model>,
    ) -> AppResult<Vec<FriendView>> {
        let other_ids: Vec<String> = edges
            .iter()
            .map(|e| e.other_endpoint(user_id).to_string())
            .collect();

        let users = self.user_repo.find_by_ids(&other_ids).await?;

        Ok(edges
            .into_iter()
            .filter_map(|edge| {
                let other_id = edge.other_endpoint(user_id).to_string();
                users.iter().find(|u| u.id == other_id).map(|u| FriendView {
                    edge_id: edge.id.clone(),
                    accepted: edge.accepted,
                    user: u.clone(),
                })
            })
            .collect())
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use chrono::Utc;
    use sea_orm::{DatabaseBackend, MockDatabase};
    use std::sync::Arc;

    fn test_user(id: &str, username: &str) -> user::Model {
        user::Model {
            id: id.to_string(),
            username: username.to_string(),
            username_lower: username.to_lowercase(),
            token: None,
            password: None,
            first_name: None,
            last_name: None,
            created_at: Utc::now().into(),
            updated_at: None,
        }
    }

    fn test_edge(id: &str, user1: &str, user2: &str, accepted: bool) -> friend::Model {
        friend::Model {
            id: id.to_string(),
            user1_id: user1.to_string(),
            user2_id: user2.to_string(),
            accepted,
            created_at: Utc::now().into(),
        }
    }

    fn service(friend_db: MockDatabase, user_db: MockDatabase) -> FriendService {
        FriendService::new(
            FriendRepository::new(Arc::new(friend_db.into_connection())),
            UserRepository::new(Arc::new(user_db.into_connection())),
        )
    }

    #[tokio::test]
    async fn test_create_rejects_self_friending() {
        let svc = service(
            MockDatabase::new(DatabaseBackend::Postgres),
            MockDatabase::new(DatabaseBackend::Postgres),
        );

        let result = svc.create("u1", "u1").await;
        assert!(matches!(result, Err(AppError::BadRequest(_))));
    }

    #[tokio::test]
    async fn test_create_target_missing() {
        let svc = service(
            MockDatabase::new(DatabaseBackend::Postgres),
            MockDatabase::new(DatabaseBackend::Postgres)
                .append_query_results([Vec::<user::Model>::new()]),
        );

        let result = svc.create("u1", "ghost").await;
        assert!(matches!(result, Err(AppError::UserNotFound(_))));
    }

    #[tokio::test]
    async fn test_create_yields_pending_edge() {
        let pending = test_edge("f1", "u1", "u2", false);
        let svc = service(
            MockDatabase::new(DatabaseBackend::Postgres).append_query_results([[pending]]),
            MockDatabase::new(DatabaseBackend::Postgres)
                .append_query_results([[test_user("u2", "ryan")]]),
        );

        let edge = svc.create("u1", "u2").await.unwrap();
        assert!(!edge.accepted);
        assert_eq!(edge.user1_id, "u1");
        assert_eq!(edge.user2_id, "u2");
    }

    #[tokio::test]
    async fn test_update_flips_acceptance() {
        let pending = test_edge("f1", "u1", "u2", false);
        let accepted = test_edge("f1", "u1", "u2", true);
        let svc = service(
            MockDatabase::new(DatabaseBackend::Postgres)
                .append_query_results([[pending]])
                .append_query_results([[accepted]]),
            MockDatabase::new(DatabaseBackend::Postgres),
        );

        let edge = svc.update("u2", "f1", true).await.unwrap();
        assert!(edge.accepted);
    }

    #[tokio::test]
    async fn test_update_unknown_edge() {
        let svc = service(
            MockDatabase::new(DatabaseBackend::Postgres)
                .append_query_results([Vec::<friend::Model>::new()]),
            MockDatabase::new(DatabaseBackend::Postgres),
        );

        let result = svc.update("u2", "missing", true).await;
        assert!(matches!(result, Err(AppError::NotFound(_))));
    }

    #[tokio::test]
    async fn test_accepted_friends_resolves_far_endpoint() {
        // u1 is user1 on one edge and user2 on the other
        let e1 = test_edge("f1", "u1", "u2", true);
        let e2 = test_edge("f2", "u3", "u1", true);
        let svc = service(
            MockDatabase::new(DatabaseBackend::Postgres).append_query_results([[e1, e2]]),
            MockDatabase::new(DatabaseBackend::Postgres)
                .append_query_results([[test_user("u2", "ryan"), test_user("u3", "tyler")]]),
        );

        let friends = svc.accepted_friends("u1").await.unwrap();
        let ids: Vec<&str> = friends.iter().map(|f| f.user.id.as_str()).collect();
        assert_eq!(ids, vec!["u2", "u3"]);
    }

    #[tokio::test]
    async fn test_candidates_excludes_accepted_and_annotates_pending() {
        // u2: accepted friend; u3: pending sent; u4: pending received; u5: none
        let users = vec![
            test_user("u2", "ryan"),
            test_user("u3", "tyler"),
            test_user("u4", "meg"),
            test_user("u5", "juan"),
        ];
        let edges = vec![
            test_edge("f1", "u1", "u2", true),
            test_edge("f2", "u1", "u3", false),
            test_edge("f3", "u4", "u1", false),
        ];

        let svc = service(
            MockDatabase::new(DatabaseBackend::Postgres).append_query_results([edges]),
            MockDatabase::new(DatabaseBackend::Postgres).append_query_results([users]),
        );

        let candidates = svc.candidates("u1", None).await.unwrap();
        let ids: Vec<&str> = candidates.iter().map(|c| c.user.id.as_str()).collect();
        assert_eq!(ids, vec!["u3", "u4", "u5"]);

        let by_id = |id: &str| candidates.iter().find(|c| c.user.id == id).unwrap();
        assert!(by_id("u3").pending_sent);
        assert!(!by_id("u3").pending_received);
        assert!(by_id("u4").pending_received);
        assert!(!by_id("u4").pending_sent);
        assert!(!by_id("u5").pending_sent && !by_id("u5").pending_received);
    }
}
