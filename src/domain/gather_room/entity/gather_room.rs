use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "gather_room")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i64,
    pub subject: String,
    #[sea_orm(column_type = "Text")]
    pub content: String,
    /// 오프라인 모임은 필수, 온라인 모임은 선택 (링크 등)
    pub address: Option<String>,
    pub is_online: bool,
    pub user_limit: i32,
    pub date_time: DateTime,
    pub creator_id: i64,
    pub gather_room_category_id: i64,
    pub created_at: DateTime,
    pub updated_at: DateTime,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(
        belongs_to = "crate::domain::user::entity::user::Entity",
        from = "Column::CreatorId",
        to = "crate::domain::user::entity::user::Column::Id",
        on_update = "NoAction",
        on_delete = "Cascade"
    )]
    Creator,
    #[sea_orm(
        belongs_to = "super::gather_room_category::Entity",
        from = "Column::GatherRoomCategoryId",
        to = "super::gather_room_category::Column::Id",
        on_update = "NoAction",
        on_delete = "NoAction"
    )]
    GatherRoomCategory,
    #[sea_orm(has_many = "super::gather_room_image::Entity")]
    GatherRoomImage,
    #[sea_orm(has_many = "crate::domain::reservation::entity::reservation::Entity")]
    Reservation,
    #[sea_orm(has_many = "crate::domain::review::entity::review::Entity")]
    Review,
}

impl Related<crate::domain::user::entity::user::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Creator.def()
    }
}

impl Related<super::gather_room_category::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::GatherRoomCategory.def()
    }
}

impl Related<super::gather_room_image::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::GatherRoomImage.def()
    }
}

impl Related<crate::domain::reservation::entity::reservation::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Reservation.def()
    }
}

impl Related<crate::domain::review::entity::review::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Review.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}
