use sea_orm::ActiveValue::Set;
use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

// ===== Chat Sessions Entity =====

pub mod chat_sessions {
    use super::*;

    #[derive(Clone, Debug, PartialEq, DeriveEntityModel, Serialize, Deserialize)]
    #[sea_orm(table_name = "chat_sessions")]
    pub struct Model {
        #[sea_orm(primary_key, auto_increment = false)]
        pub id: Uuid,
        pub user_id: Uuid,
        pub created_at: DateTimeWithTimeZone,
    }

    #[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
    pub enum Relation {
        #[sea_orm(has_many = "super::chat_messages::Entity")]
        Messages,
    }

    impl Related<super::chat_messages::Entity> for Entity {
        fn to() -> RelationDef {
            Relation::Messages.def()
        }
    }

    impl ActiveModelBehavior for ActiveModel {}

    impl From<Model> for crate::models::ChatSession {
        fn from(model: Model) -> Self {
            Self {
                id: model.id,
                user_id: model.user_id,
                created_at: model.created_at.into(),
            }
        }
    }

    impl Model {
        /// Fresh active model for a new session owned by `user_id`
        pub fn new_active(user_id: Uuid) -> ActiveModel {
            ActiveModel {
                id: Set(Uuid::now_v7()),
                user_id: Set(user_id),
                created_at: Set(chrono::Utc::now().into()),
            }
        }
    }
}

// ===== Chat Messages Entity =====

pub mod chat_messages {
    use super::*;
    use crate::models::MessageRole;

    #[derive(Clone, Debug, PartialEq, DeriveEntityModel, Serialize, Deserialize)]
    #[sea_orm(table_name = "chat_messages")]
    pub struct Model {
        #[sea_orm(primary_key, auto_increment = false)]
        pub id: Uuid,
        pub session_id: Uuid,
        #[sea_orm(column_type = "String(StringLen::N(20))")]
        pub role: String,
        #[sea_orm(column_type = "Text")]
        pub content: String,
        pub created_at: DateTimeWithTimeZone,
    }

    #[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
    pub enum Relation {
        #[sea_orm(
            belongs_to = "super::chat_sessions::Entity",
            from = "Column::SessionId",
            to = "super::chat_sessions::Column::Id"
        )]
        Session,
    }

    impl Related<super::chat_sessions::Entity> for Entity {
        fn to() -> RelationDef {
            Relation::Session.def()
        }
    }

    impl ActiveModelBehavior for ActiveModel {}

    impl TryFrom<Model> for crate::models::ChatMessage {
        type Error = crate::error::ChatError;

        fn try_from(model: Model) -> Result<Self, Self::Error> {
            let role = model.role.parse().map_err(|_| {
                crate::error::ChatError::Store(format!(
                    "Message {} has unknown role '{}'",
                    model.id, model.role
                ))
            })?;

            Ok(Self {
                id: model.id,
                session_id: model.session_id,
                role,
                content: model.content,
                created_at: model.created_at.into(),
            })
        }
    }

    impl Model {
        /// Fresh active model with a server-assigned timestamp
        pub fn new_active(session_id: Uuid, role: MessageRole, content: &str) -> ActiveModel {
            ActiveModel {
                id: Set(Uuid::now_v7()),
                session_id: Set(session_id),
                role: Set(role.to_string()),
                content: Set(content.to_string()),
                created_at: Set(chrono::Utc::now().into()),
            }
        }
    }
}
