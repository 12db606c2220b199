//! Temperature alert database entity for SeaORM.

use sea_orm::entity::prelude::*;

use crate::domain::{AlertStatus, TemperatureAlert};

#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel)]
#[sea_orm(table_name = "temperature_alerts")]
pub struct Model {
    #[sea_orm(primary_key, auto_increment = false)]
    pub id: Uuid,
    pub storage_room_id: Uuid,
    pub temperature_log_id: Option<Uuid>,
    #[sea_orm(column_type = "Decimal(Some((6, 2)))")]
    pub temperature: Decimal,
    pub message: String,
    pub status: String,
    pub created_at: DateTimeUtc,
    pub resolved_at: Option<DateTimeUtc>,
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
        belongs_to = "super::temperature_log::Entity",
        from = "Column::TemperatureLogId",
        to = "super::temperature_log::Column::Id"
    )]
    TemperatureLog,
}

impl Related<super::storage_room::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::StorageRoom.def()
    }
}

impl Related<super::temperature_log::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::TemperatureLog.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}

impl From<Model> for TemperatureAlert {
    fn from(model: Model) -> Self {
        TemperatureAlert {
            id: model.id,
            storage_room_id: model.storage_room_id,
            temperature_log_id: model.temperature_log_id,
            temperature: model.temperature,
            message: model.message,
            status: AlertStatus::parse(&model.status).unwrap_or(AlertStatus::Active),
            created_at: model.created_at,
            resolved_at: model.resolved_at,
        }
    }
}
