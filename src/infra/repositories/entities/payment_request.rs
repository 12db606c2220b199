//! Payment request database entity for SeaORM.

use sea_orm::entity::prelude::*;

use crate::domain::{PaymentRequest, PaymentRequestStatus};

#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel)]
#[sea_orm(table_name = "payment_requests")]
pub struct Model {
    #[sea_orm(primary_key, auto_increment = false)]
    pub id: Uuid,
    #[sea_orm(unique)]
    pub outward_entry_id: Uuid,
    pub status: String,
    pub method: String,
    pub payload: Json,
    pub created_at: DateTimeUtc,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(
        belongs_to = "super::outward_entry::Entity",
        from = "Column::OutwardEntryId",
        to = "super::outward_entry::Column::Id"
    )]
    OutwardEntry,
}

impl Related<super::outward_entry::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::OutwardEntry.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}

impl From<Model> for PaymentRequest {
    fn from(model: Model) -> Self {
        PaymentRequest {
            id: model.id,
            outward_entry_id: model.outward_entry_id,
            status: PaymentRequestStatus::parse(&model.status)
                .unwrap_or(PaymentRequestStatus::Requested),
            method: model.method,
            payload: model.payload,
            created_at: model.created_at,
        }
    }
}
