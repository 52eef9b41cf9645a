use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

/// A picnic held in one city at a given (UTC, zone-less) time.
#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "picnic")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i32,
    pub city_id: i32,
    pub time: DateTime,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(
        belongs_to = "super::city::Entity",
        from = "Column::CityId",
        to = "super::city::Column::Id"
    )]
    City,
    #[sea_orm(has_many = "super::picnic_registration::Entity")]
    PicnicRegistration,
}

impl Related<super::city::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::City.def()
    }
}

impl Related<super::picnic_registration::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::PicnicRegistration.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}
