use sea_orm::ActiveValue::Set;
use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

/// SeaORM entity for the users table
#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "users")]
pub struct Model {
    #[sea_orm(primary_key, auto_increment = false)]
    pub id: Uuid,
    #[sea_orm(column_type = "String(StringLen::N(80))", unique)]
    pub username: String,
    #[sea_orm(column_type = "String(StringLen::N(255))")]
    pub password_hash: String,
    pub created_at: DateTimeWithTimeZone,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {}

impl ActiveModelBehavior for ActiveModel {}

impl From<Model> for crate::models::User {
    fn from(model: Model) -> Self {
        Self {
            id: model.id,
            username: model.username,
            password_hash: model.password_hash,
            created_at: model.created_at.into(),
        }
    }
}

impl From<crate::models::NewUser> for ActiveModel {
    fn from(input: crate::models::NewUser) -> Self {
        ActiveModel {
            id: Set(Uuid::now_v7()),
            username: Set(input.username),
            password_hash: Set(input.password_hash),
            created_at: Set(chrono::Utc::now().into()),
        }
    }
}
