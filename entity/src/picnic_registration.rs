use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

/// Links a user to a picnic they attend.
///
/// The `(user_id, picnic_id)` pair is unique; the index is created alongside the table.
#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "picnic_registration")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i32,
    pub user_id: i32,
    pub picnic_id: i32,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(
        belongs_to = "super::user::Entity",
        from = "Column::UserId",
        to = "super::user::Column::Id"
    )]
    User,
    #[sea_orm(
        belongs_to = "super::picnic::Entity",
        from = "Column::PicnicId",
        to = "super::picnic::Column::Id"
    )]
    Picnic,
}

impl Related<super::user::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::User.def()
    }
}

impl Related<super::picnic::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Picnic.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}
