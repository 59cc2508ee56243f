use argon2::{
    Argon2,
    password_hash::{PasswordHash, PasswordHasher, PasswordVerifier, SaltString, rand_core::OsRng},
};
use std::sync::Arc;

use crate::error::{UserError, UserResult};
use crate::models::{NewUser, RegisterRequest, User};
use crate::repository::UserRepository;

/// Service layer for account business logic
#[derive(Clone)]
pub struct UserService<R: UserRepository> {
    repository: Arc<R>,
}

impl<R: UserRepository> UserService<R> {
    pub fn new(repository: R) -> Self {
        Self {
            repository: Arc::new(repository),
        }
    }

    /// Register a new account with a freshly hashed password
    pub async fn register(&self, input: RegisterRequest) -> UserResult<User> {
        let password_hash = self.hash_password(&input.password)?;

        self.repository
            .create(NewUser {
                username: input.username,
                password_hash,
            })
            .await
    }

    /// Verify a username/password pair (for login)
    pub async fn verify_credentials(&self, username: &str, password: &str) -> UserResult<User> {
        let user = self
            .repository
            .get_by_username(username)
            .await?
            .ok_or(UserError::InvalidCredentials)?;

        if !self.verify_password(password, &user.password_hash)? {
            return Err(UserError::InvalidCredentials);
        }

        Ok(user)
    }

    // Password helpers

    fn hash_password(&self, password: &str) -> UserResult<String> {
        let salt = SaltString::generate(&mut OsRng);
        let argon2 = Argon2::default();

        argon2
            .hash_password(password.as_bytes(), &salt)
            .map(|hash| hash.to_string())
            .map_err(|e| UserError::PasswordHash(e.to_string()))
    }

    fn verify_password(&self, password: &str, hash: &str) -> UserResult<bool> {
        let parsed = PasswordHash::new(hash).map_err(|e| UserError::PasswordHash(e.to_string()))?;

        Ok(Argon2::default()
            .verify_password(password.as_bytes(), &parsed)
            .is_ok())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::repository::InMemoryUserRepository;

    fn service() -> UserService<InMemoryUserRepository> {
        UserService::new(InMemoryUserRepository::new())
    }

    fn register_request(username: &str) -> RegisterRequest {
        RegisterRequest {
            username: username.to_string(),
            password: "correct horse battery".to_string(),
        }
    }

    #[tokio::test]
    async fn test_register_hashes_password() {
        let service = service();
        let user = service.register(register_request("alice")).await.unwrap();

        assert_ne!(user.password_hash, "correct horse battery");
        assert!(user.password_hash.starts_with("$argon2"));
    }

    #[tokio::test]
    async fn test_register_then_login() {
        let service = service();
        service.register(register_request("alice")).await.unwrap();

        let user = service
            .verify_credentials("alice", "correct horse battery")
            .await
            .unwrap();
        assert_eq!(user.username, "alice");
    }

    #[tokio::test]
    async fn test_wrong_password_rejected() {
        let service = service();
        service.register(register_request("alice")).await.unwrap();

        let err = service
            .verify_credentials("alice", "wrong password!")
            .await
            .unwrap_err();
        assert!(matches!(err, UserError::InvalidCredentials));
    }

    #[tokio::test]
    async fn test_unknown_user_rejected() {
        let err = service()
            .verify_credentials("ghost", "whatever password")
            .await
            .unwrap_err();
        assert!(matches!(err, UserError::InvalidCredentials));
    }

    #[tokio::test]
    async fn test_duplicate_registration_conflicts() {
        let service = service();
        service.register(register_request("alice")).await.unwrap();

        let err = service.register(register_request("alice")).await.unwrap_err();
        assert!(matches!(err, UserError::DuplicateUsername(_)));
    }
}
