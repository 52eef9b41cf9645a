use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

/// A city picnics can take place in. Only cities known to the weather service are ever stored.
#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "city")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i32,
    #[sea_orm(unique)]
    pub name: String,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(has_many = "super::picnic::Entity")]
    Picnic,
}

impl Related<super::picnic::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Picnic.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}
