//! Outward entry database entity for SeaORM.

use sea_orm::entity::prelude::*;

use crate::domain::{OutwardEntry, PackagingType, PaymentMethod, PaymentStatus};

#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel)]
#[sea_orm(table_name = "outward_entries")]
pub struct Model {
    #[sea_orm(primary_key, auto_increment = false)]
    pub id: Uuid,
    pub inward_entry_id: Uuid,
    #[sea_orm(column_type = "Decimal(Some((12, 3)))")]
    pub quantity: Decimal,
    pub packaging_type: String,
    #[sea_orm(unique)]
    pub receipt_number: String,
    pub payment_status: String,
    /// Empty string when no method has been chosen yet
    pub payment_method: String,
    pub created_by: Uuid,
    pub created_at: DateTimeUtc,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(
        belongs_to = "super::inward_entry::Entity",
        from = "Column::InwardEntryId",
        to = "super::inward_entry::Column::Id"
    )]
    InwardEntry,
    #[sea_orm(has_one = "super::payment_request::Entity")]
    PaymentRequest,
}

impl Related<super::inward_entry::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::InwardEntry.def()
    }
}

impl Related<super::payment_request::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::PaymentRequest.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}

impl From<Model> for OutwardEntry {
    fn from(model: Model) -> Self {
        OutwardEntry {
            id: model.id,
            inward_entry_id: model.inward_entry_id,
            quantity: model.quantity,
            packaging_type: PackagingType::parse(&model.packaging_type)
                .unwrap_or(PackagingType::Crate),
            receipt_number: model.receipt_number,
            payment_status: PaymentStatus::parse(&model.payment_status)
                .unwrap_or(PaymentStatus::Pending),
            payment_method: PaymentMethod::parse(&model.payment_method),
            created_by: model.created_by,
            created_at: model.created_at,
        }
    }
}
