use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};
use utoipa::{IntoParams, ToSchema};

use super::entity::{gather_room, gather_room_category, gather_room_image};
use crate::domain::user::entity::user;

/// 모임방 목록 필터
#[derive(Debug, Default, Deserialize, IntoParams)]
#[into_params(parameter_in = Query)]
pub struct GatherRoomListQuery {
    /// 카테고리 ID
    pub category: Option<i64>,
    /// 개설자 사용자 ID
    pub creator: Option<i64>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
pub struct CategoryResponse {
    pub id: i64,
    pub name: String,
}

impl From<&gather_room_category::Model> for CategoryResponse {
    fn from(model: &gather_room_category::Model) -> Self {
        Self {
            id: model.id,
            name: model.name.clone(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
pub struct GatherRoomImageResponse {
    pub id: i64,
    pub img_url: Option<String>,
}

impl From<&gather_room_image::Model> for GatherRoomImageResponse {
    fn from(model: &gather_room_image::Model) -> Self {
        Self {
            id: model.id,
            img_url: model.img_url.clone(),
        }
    }
}

/// 개설자 요약
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
pub struct CreatorResponse {
    pub id: i64,
    pub name: String,
    pub profile_img_url: Option<String>,
}

impl From<&user::Model> for CreatorResponse {
    fn from(model: &user::Model) -> Self {
        Self {
            id: model.id,
            name: model.name.clone(),
            profile_img_url: model.profile_img_url.clone(),
        }
    }
}

/// 목록 조회용 요약
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct GatherRoomSummary {
    pub id: i64,
    pub subject: String,
    pub address: Option<String>,
    pub is_online: bool,
    pub user_limit: i32,
    pub date_time: NaiveDateTime,
    pub creator_id: i64,
    pub gather_room_category: CategoryResponse,
    /// 업로드에 성공한 첫 번째 이미지
    pub thumbnail_url: Option<String>,
}

/// 단건 조회 / 생성 / 수정 응답
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
pub struct GatherRoomDetail {
    pub id: i64,
    pub subject: String,
    pub content: String,
    pub address: Option<String>,
    pub is_online: bool,
    pub user_limit: i32,
    pub date_time: NaiveDateTime,
    pub creator: CreatorResponse,
    pub gather_room_category: CategoryResponse,
    pub gather_room_images: Vec<GatherRoomImageResponse>,
    pub reservation_count: u64,
    pub created_at: NaiveDateTime,
    pub updated_at: NaiveDateTime,
}

impl GatherRoomSummary {
    pub fn new(
        room: &gather_room::Model,
        category: &gather_room_category::Model,
        images: &[gather_room_image::Model],
    ) -> Self {
        Self {
            id: room.id,
            subject: room.subject.clone(),
            address: room.address.clone(),
            is_online: room.is_online,
            user_limit: room.user_limit,
            date_time: room.date_time,
            creator_id: room.creator_id,
            gather_room_category: category.into(),
            thumbnail_url: images.iter().find_map(|i| i.img_url.clone()),
        }
    }
}
