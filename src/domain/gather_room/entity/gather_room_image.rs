use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "gather_room_image")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i64,
    pub gather_room_id: i64,
    /// 업로드 실패 시 NULL
    pub img_url: Option<String>,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(
        belongs_to = "super::gather_room::Entity",
        from = "Column::GatherRoomId",
        to = "super::gather_room::Column::Id",
        on_update = "NoAction",
        on_delete = "Cascade"
    )]
    GatherRoom,
}

impl Related<super::gather_room::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::GatherRoom.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}
