use axum::{
    extract::{rejection::JsonRejection, Path, State},
    http::StatusCode,
    Json,
};
use validator::Validate;

use super::dto::{CreateReservationRequest, ReservationResponse};
use super::service::ReservationService;
use crate::state::AppState;
use crate::utils::auth::AuthUser;
use crate::utils::error::AppError;

/// 내 예약 목록
#[utoipa::path(
    get,
    path = "/gather-room-reservations/",
    security(("bearer_auth" = [])),
    responses(
        (status = 200, description = "조회 성공", body = [ReservationResponse]),
        (status = 401, description = "인증 실패", body = ErrorResponse)
    ),
    tag = "Reservation"
)]
pub async fn list_reservations(
    State(state): State<AppState>,
    user: AuthUser,
) -> Result<Json<Vec<ReservationResponse>>, AppError> {
    let user_id = user.user_id()?;
    let reservations = ReservationService::list(&state, user_id).await?;
    Ok(Json(reservations))
}

/// 모임방 예약
#[utoipa::path(
    post,
    path = "/gather-room-reservations/",
    request_body = CreateReservationRequest,
    security(("bearer_auth" = [])),
    responses(
        (status = 201, description = "예약 성공", body = ReservationResponse),
        (status = 404, description = "존재하지 않는 모임방", body = ErrorResponse),
        (status = 409, description = "중복 예약", body = ErrorResponse)
    ),
    tag = "Reservation"
)]
pub async fn create_reservation(
    State(state): State<AppState>,
    user: AuthUser,
    request: Result<Json<CreateReservationRequest>, JsonRejection>,
) -> Result<(StatusCode, Json<ReservationResponse>), AppError> {
    let Json(req) = request.map_err(AppError::from)?;
    req.validate()?;
    let user_id = user.user_id()?;

    let created = ReservationService::create(&state, user_id, req).await?;
    Ok((StatusCode::CREATED, Json(created)))
}

/// 예약 취소
#[utoipa::path(
    delete,
    path = "/gather-room-reservations/{id}/",
    params(("id" = i64, Path, description = "예약 ID")),
    security(("bearer_auth" = [])),
    responses(
        (status = 204, description = "취소 성공"),
        (status = 404, description = "존재하지 않거나 본인 예약이 아님", body = ErrorResponse)
    ),
    tag = "Reservation"
)]
pub async fn delete_reservation(
    State(state): State<AppState>,
    user: AuthUser,
    Path(id): Path<i64>,
) -> Result<StatusCode, AppError> {
    let user_id = user.user_id()?;
    ReservationService::destroy(&state, user_id, id).await?;
    Ok(StatusCode::NO_CONTENT)
}
