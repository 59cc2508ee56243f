use async_trait::async_trait;
use sea_orm::{ColumnTrait, DatabaseConnection, DbErr, EntityTrait, QueryFilter, RuntimeErr};
use uuid::Uuid;

use crate::{
    entity,
    error::{UserError, UserResult},
    models::{NewUser, User},
    repository::UserRepository,
};

/// PostgreSQL implementation of UserRepository using SeaORM
#[derive(Clone)]
pub struct PgUserRepository {
    db: DatabaseConnection,
}

impl PgUserRepository {
    pub fn new(db: DatabaseConnection) -> Self {
        Self { db }
    }
}

/// Detect a unique-constraint violation so concurrent registrations surface
/// as `DuplicateUsername` rather than an opaque internal error.
fn is_unique_violation(err: &DbErr) -> bool {
    match err {
        DbErr::Query(RuntimeErr::SqlxError(e)) | DbErr::Exec(RuntimeErr::SqlxError(e)) => e
            .as_database_error()
            .and_then(|dbe| dbe.code())
            .is_some_and(|code| code == "23505"),
        _ => false,
    }
}

#[async_trait]
impl UserRepository for PgUserRepository {
    async fn create(&self, input: NewUser) -> UserResult<User> {
        let username = input.username.clone();
        let active_model: entity::ActiveModel = input.into();

        let model = entity::Entity::insert(active_model)
            .exec_with_returning(&self.db)
            .await
            .map_err(|e| {
                if is_unique_violation(&e) {
                    UserError::DuplicateUsername(username.clone())
                } else {
                    UserError::Internal(format!("Database error: {}", e))
                }
            })?;

        tracing::info!(user_id = %model.id, username = %model.username, "Created user");
        Ok(model.into())
    }

    async fn get_by_id(&self, id: Uuid) -> UserResult<Option<User>> {
        let model = entity::Entity::find_by_id(id)
            .one(&self.db)
            .await
            .map_err(|e| UserError::Internal(format!("Database error: {}", e)))?;

        Ok(model.map(|m| m.into()))
    }

    async fn get_by_username(&self, username: &str) -> UserResult<Option<User>> {
        let model = entity::Entity::find()
            .filter(entity::Column::Username.eq(username))
            .one(&self.db)
            .await
            .map_err(|e| UserError::Internal(format!("Database error: {}", e)))?;

        Ok(model.map(|m| m.into()))
    }
}
