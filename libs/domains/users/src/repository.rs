use async_trait::async_trait;
use std::collections::HashMap;
use std::sync::Arc;
use tokio::sync::RwLock;
use uuid::Uuid;

use crate::error::{UserError, UserResult};
use crate::models::{NewUser, User};

/// Repository trait for User persistence
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait UserRepository: Send + Sync {
    /// Create a new user; fails with `DuplicateUsername` on a name clash
    async fn create(&self, input: NewUser) -> UserResult<User>;

    /// Get a user by ID
    async fn get_by_id(&self, id: Uuid) -> UserResult<Option<User>>;

    /// Get a user by username (case-insensitive)
    async fn get_by_username(&self, username: &str) -> UserResult<Option<User>>;
}

/// In-memory implementation of UserRepository (for development/testing)
#[derive(Debug, Default, Clone)]
pub struct InMemoryUserRepository {
    users: Arc<RwLock<HashMap<Uuid, User>>>,
}

impl InMemoryUserRepository {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl UserRepository for InMemoryUserRepository {
    async fn create(&self, input: NewUser) -> UserResult<User> {
        let mut users = self.users.write().await;

        let username_taken = users
            .values()
            .any(|u| u.username.eq_ignore_ascii_case(&input.username));

        if username_taken {
            return Err(UserError::DuplicateUsername(input.username));
        }

        let user = User::new(input.username, input.password_hash);
        users.insert(user.id, user.clone());

        tracing::info!(user_id = %user.id, username = %user.username, "Created user");
        Ok(user)
    }

    async fn get_by_id(&self, id: Uuid) -> UserResult<Option<User>> {
        let users = self.users.read().await;
        Ok(users.get(&id).cloned())
    }

    async fn get_by_username(&self, username: &str) -> UserResult<Option<User>> {
        let users = self.users.read().await;
        let user = users
            .values()
            .find(|u| u.username.eq_ignore_ascii_case(username))
            .cloned();
        Ok(user)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn new_user(username: &str) -> NewUser {
        NewUser {
            username: username.to_string(),
            password_hash: "$argon2id$stub".to_string(),
        }
    }

    #[tokio::test]
    async fn test_create_and_fetch() {
        let repo = InMemoryUserRepository::new();
        let created = repo.create(new_user("alice")).await.unwrap();

        let by_id = repo.get_by_id(created.id).await.unwrap().unwrap();
        assert_eq!(by_id.username, "alice");

        let by_name = repo.get_by_username("ALICE").await.unwrap().unwrap();
        assert_eq!(by_name.id, created.id);
    }

    #[tokio::test]
    async fn test_duplicate_username_rejected() {
        let repo = InMemoryUserRepository::new();
        repo.create(new_user("alice")).await.unwrap();

        let err = repo.create(new_user("Alice")).await.unwrap_err();
        assert!(matches!(err, UserError::DuplicateUsername(_)));
    }

    #[tokio::test]
    async fn test_missing_user_is_none() {
        let repo = InMemoryUserRepository::new();
        assert!(repo.get_by_id(Uuid::now_v7()).await.unwrap().is_none());
        assert!(repo.get_by_username("ghost").await.unwrap().is_none());
    }
}
