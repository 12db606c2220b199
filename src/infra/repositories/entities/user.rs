//! User database entity for SeaORM.

use sea_orm::entity::prelude::*;

use crate::domain::{PreferredLanguage, User, UserRole};

#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel)]
#[sea_orm(table_name = "users")]
pub struct Model {
    #[sea_orm(primary_key, auto_increment = false)]
    pub id: Uuid,
    #[sea_orm(unique)]
    pub phone_number: String,
    pub name: String,
    pub preferred_language: String,
    /// NULL until an admin/owner assigns a role
    pub role: Option<String>,
    pub is_active: bool,
    pub created_at: DateTimeUtc,
    pub updated_at: DateTimeUtc,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(has_many = "super::inward_entry::Entity")]
    InwardEntries,
    #[sea_orm(has_many = "super::temperature_log::Entity")]
    TemperatureLogs,
}

impl Related<super::inward_entry::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::InwardEntries.def()
    }
}

impl Related<super::temperature_log::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::TemperatureLogs.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}

/// Convert database model to domain entity
impl From<Model> for User {
    fn from(model: Model) -> Self {
        User {
            id: model.id,
            phone_number: model.phone_number,
            name: model.name,
            preferred_language: PreferredLanguage::parse(&model.preferred_language)
                .unwrap_or_default(),
            role: model.role.as_deref().and_then(UserRole::parse),
            is_active: model.is_active,
            created_at: model.created_at,
            updated_at: model.updated_at,
        }
    }
}
