//! Person database entity for SeaORM.

use sea_orm::entity::prelude::*;

use crate::domain::{Person, PersonType};

#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel)]
#[sea_orm(table_name = "persons")]
pub struct Model {
    #[sea_orm(primary_key, auto_increment = false)]
    pub id: Uuid,
    pub person_type: String,
    pub name: String,
    #[sea_orm(unique)]
    pub mobile_number: String,
    pub address: String,
    pub created_at: DateTimeUtc,
    pub updated_at: DateTimeUtc,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(has_many = "super::inward_entry::Entity")]
    InwardEntries,
}

impl Related<super::inward_entry::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::InwardEntries.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}

impl From<Model> for Person {
    fn from(model: Model) -> Self {
        Person {
            id: model.id,
            person_type: PersonType::parse(&model.person_type).unwrap_or(PersonType::Farmer),
            name: model.name,
            mobile_number: model.mobile_number,
            address: model.address,
            created_at: model.created_at,
            updated_at: model.updated_at,
        }
    }
}
