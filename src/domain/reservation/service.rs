use std::collections::HashMap;

use chrono::Utc;
use sea_orm::{ActiveModelTrait, ColumnTrait, EntityTrait, QueryFilter, QueryOrder, Set};
use tracing::info;

use super::dto::{CreateReservationRequest, ReservationResponse};
use super::entity::reservation;
use crate::domain::gather_room::entity::gather_room;
use crate::domain::user::UserService;
use crate::state::AppState;
use crate::utils::error::AppError;

pub struct ReservationService;

impl ReservationService {
    /// 요청자의 예약 목록 (최신순)
    pub async fn list(state: &AppState, user_id: i64) -> Result<Vec<ReservationResponse>, AppError> {
        let reservations = reservation::Entity::find()
            .filter(reservation::Column::UserId.eq(user_id))
            .order_by_desc(reservation::Column::Id)
            .all(&state.db)
            .await?;
        if reservations.is_empty() {
            return Ok(Vec::new());
        }

        let room_ids: Vec<i64> = reservations.iter().map(|r| r.gather_room_id).collect();
        let rooms: HashMap<i64, gather_room::Model> = gather_room::Entity::find()
            .filter(gather_room::Column::Id.is_in(room_ids))
            .all(&state.db)
            .await?
            .into_iter()
            .map(|room| (room.id, room))
            .collect();

        Ok(reservations
            .iter()
            .filter_map(|r| {
                rooms
                    .get(&r.gather_room_id)
                    .map(|room| ReservationResponse::new(r, room))
            })
            .collect())
    }

    /// 모임방 예약
    ///
    /// 같은 모임방을 두 번 예약하면 Conflict. 동시에 들어온 중복 요청은
    /// 유니크 인덱스 위반이 Conflict로 변환됩니다.
    pub async fn create(
        state: &AppState,
        user_id: i64,
        req: CreateReservationRequest,
    ) -> Result<ReservationResponse, AppError> {
        UserService::require_active(&state.db, user_id).await?;
        let room = gather_room::Entity::find_by_id(req.gather_room_id)
            .one(&state.db)
            .await?
            .ok_or_else(|| AppError::not_found("존재하지 않는 모임방입니다."))?;

        let duplicated = reservation::Entity::find()
            .filter(reservation::Column::UserId.eq(user_id))
            .filter(reservation::Column::GatherRoomId.eq(room.id))
            .one(&state.db)
            .await?;
        if duplicated.is_some() {
            return Err(AppError::conflict("이미 예약한 모임방입니다."));
        }

        let created = reservation::ActiveModel {
            user_id: Set(user_id),
            gather_room_id: Set(room.id),
            created_at: Set(Utc::now().naive_utc()),
            ..Default::default()
        }
        .insert(&state.db)
        .await?;

        info!(reservation_id = created.id, user_id, gather_room_id = room.id, "reservation created");
        Ok(ReservationResponse::new(&created, &room))
    }

    /// 예약 취소 (본인 예약만)
    pub async fn destroy(state: &AppState, user_id: i64, id: i64) -> Result<(), AppError> {
        UserService::require_active(&state.db, user_id).await?;
        let result = reservation::Entity::delete_many()
            .filter(reservation::Column::Id.eq(id))
            .filter(reservation::Column::UserId.eq(user_id))
            .exec(&state.db)
            .await?;

        if result.rows_affected == 0 {
            return Err(AppError::not_found("존재하지 않는 예약입니다."));
        }

        info!(reservation_id = id, user_id, "reservation deleted");
        Ok(())
    }
}
