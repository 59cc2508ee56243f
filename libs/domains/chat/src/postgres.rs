use async_trait::async_trait;
use sea_orm::{
    ColumnTrait, ConnectionTrait, DatabaseConnection, DbBackend, EntityTrait, QueryFilter,
    QueryOrder, Statement, TransactionTrait,
};
use uuid::Uuid;

use crate::{
    entity::{chat_messages, chat_sessions},
    error::{ChatError, ChatResult},
    models::{ChatMessage, ChatSession, MessageRole},
    repository::ChatRepository,
};

/// PostgreSQL implementation of ChatRepository using SeaORM
#[derive(Clone)]
pub struct PgChatRepository {
    db: DatabaseConnection,
}

impl PgChatRepository {
    pub fn new(db: DatabaseConnection) -> Self {
        Self { db }
    }
}

fn store_err(e: sea_orm::DbErr) -> ChatError {
    ChatError::Store(format!("Database error: {}", e))
}

/// Advisory-lock key for per-user session creation. Only used for mutual
/// exclusion, so truncating the UUID to its low 64 bits is fine.
fn advisory_key(user_id: Uuid) -> i64 {
    let bytes = user_id.as_bytes();
    i64::from_le_bytes(bytes[8..16].try_into().expect("uuid has 16 bytes"))
}

#[async_trait]
impl ChatRepository for PgChatRepository {
    async fn create_session(&self, user_id: Uuid) -> ChatResult<ChatSession> {
        let model = chat_sessions::Entity::insert(chat_sessions::Model::new_active(user_id))
            .exec_with_returning(&self.db)
            .await
            .map_err(store_err)?;

        tracing::info!(session_id = %model.id, user_id = %user_id, "Created chat session");
        Ok(model.into())
    }

    async fn get_session(
        &self,
        session_id: Uuid,
        user_id: Uuid,
    ) -> ChatResult<Option<ChatSession>> {
        let model = chat_sessions::Entity::find_by_id(session_id)
            .filter(chat_sessions::Column::UserId.eq(user_id))
            .one(&self.db)
            .await
            .map_err(store_err)?;

        Ok(model.map(|m| m.into()))
    }

    async fn get_or_create_current(&self, user_id: Uuid) -> ChatResult<ChatSession> {
        let txn = self.db.begin().await.map_err(store_err)?;

        // Serialize creation per user: concurrent first messages block here
        // instead of racing the select-or-insert below. The lock is scoped to
        // the transaction and released on commit/rollback.
        txn.execute_raw(Statement::from_sql_and_values(
            DbBackend::Postgres,
            "SELECT pg_advisory_xact_lock($1)",
            [advisory_key(user_id).into()],
        ))
        .await
        .map_err(store_err)?;

        let existing = chat_sessions::Entity::find()
            .filter(chat_sessions::Column::UserId.eq(user_id))
            .order_by_desc(chat_sessions::Column::CreatedAt)
            .order_by_desc(chat_sessions::Column::Id)
            .one(&txn)
            .await
            .map_err(store_err)?;

        let session: ChatSession = match existing {
            Some(model) => model.into(),
            None => {
                let model = chat_sessions::Entity::insert(chat_sessions::Model::new_active(user_id))
                    .exec_with_returning(&txn)
                    .await
                    .map_err(store_err)?;

                tracing::info!(session_id = %model.id, user_id = %user_id, "Created first chat session");
                model.into()
            }
        };

        txn.commit().await.map_err(store_err)?;
        Ok(session)
    }

    async fn append_message(
        &self,
        session_id: Uuid,
        role: MessageRole,
        content: &str,
    ) -> ChatResult<ChatMessage> {
        let model = chat_messages::Entity::insert(chat_messages::Model::new_active(
            session_id, role, content,
        ))
        .exec_with_returning(&self.db)
        .await
        .map_err(store_err)?;

        model.try_into()
    }

    async fn list_sessions(&self, user_id: Uuid) -> ChatResult<Vec<ChatSession>> {
        let models = chat_sessions::Entity::find()
            .filter(chat_sessions::Column::UserId.eq(user_id))
            .order_by_desc(chat_sessions::Column::CreatedAt)
            .order_by_desc(chat_sessions::Column::Id)
            .all(&self.db)
            .await
            .map_err(store_err)?;

        Ok(models.into_iter().map(|m| m.into()).collect())
    }

    async fn list_messages(&self, session_id: Uuid) -> ChatResult<Vec<ChatMessage>> {
        let models = chat_messages::Entity::find()
            .filter(chat_messages::Column::SessionId.eq(session_id))
            .order_by_asc(chat_messages::Column::CreatedAt)
            .order_by_asc(chat_messages::Column::Id)
            .all(&self.db)
            .await
            .map_err(store_err)?;

        models.into_iter().map(|m| m.try_into()).collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_advisory_key_is_stable_per_user() {
        let user_id = Uuid::now_v7();
        assert_eq!(advisory_key(user_id), advisory_key(user_id));
        assert_ne!(advisory_key(user_id), advisory_key(Uuid::now_v7()));
    }
}
