use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use validator::Validate;

use super::entity::reservation;
use crate::domain::gather_room::entity::gather_room;

/// 모임방 예약 요청
#[derive(Debug, Deserialize, Validate, ToSchema)]
pub struct CreateReservationRequest {
    #[validate(range(min = 1, message = "유효하지 않은 모임방 ID입니다"))]
    pub gather_room_id: i64,
}

/// 예약 목록에 함께 내려가는 모임방 요약
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
pub struct ReservedGatherRoom {
    pub id: i64,
    pub subject: String,
    pub is_online: bool,
    pub date_time: NaiveDateTime,
}

impl From<&gather_room::Model> for ReservedGatherRoom {
    fn from(room: &gather_room::Model) -> Self {
        Self {
            id: room.id,
            subject: room.subject.clone(),
            is_online: room.is_online,
            date_time: room.date_time,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
pub struct ReservationResponse {
    pub id: i64,
    pub user_id: i64,
    pub gather_room: ReservedGatherRoom,
    pub created_at: NaiveDateTime,
}

impl ReservationResponse {
    pub fn new(model: &reservation::Model, room: &gather_room::Model) -> Self {
        Self {
            id: model.id,
            user_id: model.user_id,
            gather_room: room.into(),
            created_at: model.created_at,
        }
    }
}
