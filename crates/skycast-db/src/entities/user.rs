//! User entity for authentication and saved-city history

use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "users")]
pub struct Model {
    /// User UUID (primary key)
    #[sea_orm(primary_key, auto_increment = false)]
    pub id: Uuid,

    /// Login username (unique, case-sensitive as stored)
    #[sea_orm(unique)]
    pub username: String,

    /// Argon2id password hash; the plaintext is never stored
    pub password_hash: String,

    /// Display name (optional)
    pub name: Option<String>,

    /// Default city for weather lookups (optional)
    pub location: Option<String>,

    /// When the account was created
    pub created_at: ChronoDateTimeUtc,

    /// When the record was last updated
    pub updated_at: ChronoDateTimeUtc,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    /// Cities the user has saved
    #[sea_orm(has_many = "super::saved_city::Entity")]
    SavedCities,
}

impl Related<super::saved_city::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::SavedCities.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}
