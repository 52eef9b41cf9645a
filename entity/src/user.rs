use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "user")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i32,
    pub name: String,
    pub surname: String,
    pub age: Option<i32>,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(has_many = "super::picnic_registration::Entity")]
    PicnicRegistration,
}

impl Related<super::picnic_registration::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::PicnicRegistration.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}
