use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "gather_room_review")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i64,
    pub content: String,
    pub rating: f64,
    pub user_id: i64,
    pub gather_room_id: i64,
    pub created_at: DateTime,
    pub deleted_at: Option<DateTime>,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(
        belongs_to = "crate::domain::user::entity::user::Entity",
        from = "Column::UserId",
        to = "crate::domain::user::entity::user::Column::Id",
        on_update = "NoAction",
        on_delete = "Cascade"
    )]
    User,
    #[sea_orm(
        belongs_to = "crate::domain::gather_room::entity::gather_room::Entity",
        from = "Column::GatherRoomId",
        to = "crate::domain::gather_room::entity::gather_room::Column::Id",
        on_update = "NoAction",
        on_delete = "Cascade"
    )]
    GatherRoom,
}

impl Related<crate::domain::user::entity::user::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::User.def()
    }
}

impl Related<crate::domain::gather_room::entity::gather_room::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::GatherRoom.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}
