//! Temperature log database entity for SeaORM.

use sea_orm::entity::prelude::*;

use crate::domain::TemperatureLog;

#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel)]
#[sea_orm(table_name = "temperature_logs")]
pub struct Model {
    #[sea_orm(primary_key, auto_increment = false)]
    pub id: Uuid,
    pub storage_room_id: Option<Uuid>,
    pub logged_at: DateTimeUtc,
    #[sea_orm(column_type = "Decimal(Some((6, 2)))")]
    pub temperature: Decimal,
    pub created_by: Uuid,
    pub created_at: DateTimeUtc,
    pub updated_at: DateTimeUtc,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(
        belongs_to = "super::storage_room::Entity",
        from = "Column::StorageRoomId",
        to = "super::storage_room::Column::Id"
    )]
    StorageRoom,
    #[sea_orm(
        belongs_to = "super::user::Entity",
        from = "Column::CreatedBy",
        to = "super::user::Column::Id"
    )]
    CreatedBy,
}

impl Related<super::storage_room::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::StorageRoom.def()
    }
}

impl Related<super::user::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::CreatedBy.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}

impl From<Model> for TemperatureLog {
    fn from(model: Model) -> Self {
        TemperatureLog {
            id: model.id,
            storage_room_id: model.storage_room_id,
            logged_at: model.logged_at,
            temperature: model.temperature,
            created_by: model.created_by,
            created_at: model.created_at,
            updated_at: model.updated_at,
        }
    }
}
