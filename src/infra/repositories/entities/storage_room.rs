//! Storage room database entity for SeaORM.

use sea_orm::entity::prelude::*;

use crate::domain::StorageRoom;

#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel)]
#[sea_orm(table_name = "storage_rooms")]
pub struct Model {
    #[sea_orm(primary_key, auto_increment = false)]
    pub id: Uuid,
    pub cold_storage_id: Option<Uuid>,
    pub name: String,
    #[sea_orm(column_type = "Decimal(Some((6, 2)))")]
    pub min_temperature: Decimal,
    #[sea_orm(column_type = "Decimal(Some((6, 2)))")]
    pub max_temperature: Decimal,
    pub is_active: bool,
    pub created_at: DateTimeUtc,
    pub updated_at: DateTimeUtc,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(
        belongs_to = "super::cold_storage::Entity",
        from = "Column::ColdStorageId",
        to = "super::cold_storage::Column::Id"
    )]
    ColdStorage,
    #[sea_orm(has_many = "super::temperature_log::Entity")]
    TemperatureLogs,
    #[sea_orm(has_many = "super::temperature_alert::Entity")]
    TemperatureAlerts,
}

impl Related<super::cold_storage::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::ColdStorage.def()
    }
}

impl Related<super::temperature_log::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::TemperatureLogs.def()
    }
}

impl Related<super::temperature_alert::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::TemperatureAlerts.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}

impl From<Model> for StorageRoom {
    fn from(model: Model) -> Self {
        StorageRoom {
            id: model.id,
            cold_storage_id: model.cold_storage_id,
            name: model.name,
            min_temperature: model.min_temperature,
            max_temperature: model.max_temperature,
            is_active: model.is_active,
            created_at: model.created_at,
            updated_at: model.updated_at,
        }
    }
}
