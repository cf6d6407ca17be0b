use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "gather_room_category")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i64,
    pub name: String,
    pub description: Option<String>,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(has_many = "super::gather_room::Entity")]
    GatherRoom,
}

impl Related<super::gather_room::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::GatherRoom.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}
