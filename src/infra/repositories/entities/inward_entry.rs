//! Inward entry database entity for SeaORM.

use sea_orm::entity::prelude::*;

use crate::domain::{InwardEntry, PackagingType, QualityGrade};

#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel)]
#[sea_orm(table_name = "inward_entries")]
pub struct Model {
    #[sea_orm(primary_key, auto_increment = false)]
    pub id: Uuid,
    pub person_id: Uuid,
    pub cold_storage_id: Option<Uuid>,
    pub crop_name: String,
    pub crop_variety: String,
    pub size_grade: String,
    #[sea_orm(column_type = "Decimal(Some((12, 3)))")]
    pub quantity: Decimal,
    pub packaging_type: String,
    pub quality_grade: String,
    pub rack_number: String,
    pub storage_room: String,
    pub expected_storage_duration_days: Option<i32>,
    pub entry_date: Date,
    pub created_by: Option<Uuid>,
    pub created_at: DateTimeUtc,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(
        belongs_to = "super::person::Entity",
        from = "Column::PersonId",
        to = "super::person::Column::Id"
    )]
    Person,
    #[sea_orm(
        belongs_to = "super::cold_storage::Entity",
        from = "Column::ColdStorageId",
        to = "super::cold_storage::Column::Id"
    )]
    ColdStorage,
    #[sea_orm(
        belongs_to = "super::user::Entity",
        from = "Column::CreatedBy",
        to = "super::user::Column::Id"
    )]
    CreatedBy,
    #[sea_orm(has_many = "super::outward_entry::Entity")]
    OutwardEntries,
}

impl Related<super::person::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Person.def()
    }
}

impl Related<super::cold_storage::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::ColdStorage.def()
    }
}

impl Related<super::user::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::CreatedBy.def()
    }
}

impl Related<super::outward_entry::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::OutwardEntries.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}

impl From<Model> for InwardEntry {
    fn from(model: Model) -> Self {
        InwardEntry {
            id: model.id,
            person_id: model.person_id,
            cold_storage_id: model.cold_storage_id,
            crop_name: model.crop_name,
            crop_variety: model.crop_variety,
            size_grade: model.size_grade,
            quantity: model.quantity,
            packaging_type: PackagingType::parse(&model.packaging_type)
                .unwrap_or(PackagingType::Crate),
            quality_grade: QualityGrade::parse(&model.quality_grade).unwrap_or_default(),
            rack_number: model.rack_number,
            storage_room: model.storage_room,
            expected_storage_duration_days: model.expected_storage_duration_days,
            entry_date: model.entry_date,
            created_by: model.created_by,
            created_at: model.created_at,
        }
    }
}
