//! Cold storage database entity for SeaORM.

use sea_orm::entity::prelude::*;

use crate::domain::ColdStorage;

#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel)]
#[sea_orm(table_name = "cold_storages")]
pub struct Model {
    #[sea_orm(primary_key, auto_increment = false)]
    pub id: Uuid,
    pub name: String,
    #[sea_orm(unique)]
    pub code: String,
    pub address: String,
    pub city: String,
    pub state: String,
    /// Total capacity in MT
    #[sea_orm(column_type = "Decimal(Some((12, 2)))")]
    pub total_capacity: Decimal,
    pub owner_id: Uuid,
    pub manager_id: Option<Uuid>,
    pub contact_phone: String,
    pub contact_email: String,
    pub is_active: bool,
    pub created_at: DateTimeUtc,
    pub updated_at: DateTimeUtc,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(has_many = "super::inward_entry::Entity")]
    InwardEntries,
    #[sea_orm(has_many = "super::storage_room::Entity")]
    StorageRooms,
}

impl Related<super::inward_entry::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::InwardEntries.def()
    }
}

impl Related<super::storage_room::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::StorageRooms.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}

impl From<Model> for ColdStorage {
    fn from(model: Model) -> Self {
        ColdStorage {
            id: model.id,
            name: model.name,
            code: model.code,
            address: model.address,
            city: model.city,
            state: model.state,
            total_capacity: model.total_capacity,
            owner_id: model.owner_id,
            manager_id: model.manager_id,
            contact_phone: model.contact_phone,
            contact_email: model.contact_email,
            is_active: model.is_active,
            created_at: model.created_at,
            updated_at: model.updated_at,
        }
    }
}
