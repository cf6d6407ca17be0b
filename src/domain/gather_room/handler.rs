use axum::{
    extract::{Multipart, Path, Query, State},
    http::StatusCode,
    Json,
};

use super::dto::{GatherRoomDetail, GatherRoomListQuery, GatherRoomSummary};
use super::service::GatherRoomService;
use crate::state::AppState;
use crate::utils::auth::AuthUser;
use crate::utils::error::AppError;
use crate::utils::multipart::MultipartForm;

/// 모임방 목록 조회
///
/// `category`, `creator` 쿼리로 좁힐 수 있습니다.
#[utoipa::path(
    get,
    path = "/gather-rooms/",
    params(GatherRoomListQuery),
    responses(
        (status = 200, description = "목록 조회 성공", body = [GatherRoomSummary]),
        (status = 400, description = "잘못된 요청", body = ErrorResponse)
    ),
    tag = "GatherRoom"
)]
pub async fn list_gather_rooms(
    State(state): State<AppState>,
    Query(query): Query<GatherRoomListQuery>,
) -> Result<Json<Vec<GatherRoomSummary>>, AppError> {
    let rooms = GatherRoomService::list(&state, query).await?;
    Ok(Json(rooms))
}

/// 특정 사용자가 개설한 모임방 목록
#[utoipa::path(
    get,
    path = "/users/{user_id}/gather-rooms/",
    params(("user_id" = i64, Path, description = "개설자 ID")),
    responses(
        (status = 200, description = "목록 조회 성공", body = [GatherRoomSummary])
    ),
    tag = "GatherRoom"
)]
pub async fn list_gather_rooms_by_creator(
    State(state): State<AppState>,
    Path(user_id): Path<i64>,
) -> Result<Json<Vec<GatherRoomSummary>>, AppError> {
    let query = GatherRoomListQuery {
        creator: Some(user_id),
        ..Default::default()
    };
    let rooms = GatherRoomService::list(&state, query).await?;
    Ok(Json(rooms))
}

/// 모임방 단건 조회
#[utoipa::path(
    get,
    path = "/gather-rooms/{id}/",
    params(("id" = i64, Path, description = "모임방 ID")),
    responses(
        (status = 200, description = "조회 성공", body = GatherRoomDetail),
        (status = 404, description = "존재하지 않는 모임방", body = ErrorResponse)
    ),
    tag = "GatherRoom"
)]
pub async fn retrieve_gather_room(
    State(state): State<AppState>,
    Path(id): Path<i64>,
) -> Result<Json<GatherRoomDetail>, AppError> {
    let room = GatherRoomService::retrieve(&state, id).await?;
    Ok(Json(room))
}

/// 모임방 생성
///
/// multipart/form-data. `is_online`과 `gather_room_category` 값에 따라
/// 온라인/오프라인 검증 규칙이 달라집니다. 이미지는 `gather_room_images`로 여러 장.
#[utoipa::path(
    post,
    path = "/gather-rooms/",
    request_body(content = RawGatherRoomForm, content_type = "multipart/form-data"),
    security(("bearer_auth" = [])),
    responses(
        (status = 201, description = "생성 성공", body = GatherRoomDetail),
        (status = 400, description = "검증 실패", body = ErrorResponse),
        (status = 401, description = "인증 실패", body = ErrorResponse)
    ),
    tag = "GatherRoom"
)]
pub async fn create_gather_room(
    State(state): State<AppState>,
    user: AuthUser,
    multipart: Multipart,
) -> Result<(StatusCode, Json<GatherRoomDetail>), AppError> {
    let user_id = user.user_id()?;
    let form = MultipartForm::read(multipart).await?;

    let room = GatherRoomService::create(&state, user_id, form).await?;
    Ok((StatusCode::CREATED, Json(room)))
}

/// 모임방 부분 수정 (개설자만)
#[utoipa::path(
    patch,
    path = "/gather-rooms/{id}/",
    params(("id" = i64, Path, description = "모임방 ID")),
    request_body(content = RawGatherRoomForm, content_type = "multipart/form-data"),
    security(("bearer_auth" = [])),
    responses(
        (status = 200, description = "수정 성공", body = GatherRoomDetail),
        (status = 400, description = "검증 실패", body = ErrorResponse),
        (status = 404, description = "존재하지 않거나 본인 모임방이 아님", body = ErrorResponse)
    ),
    tag = "GatherRoom"
)]
pub async fn update_gather_room(
    State(state): State<AppState>,
    user: AuthUser,
    Path(id): Path<i64>,
    multipart: Multipart,
) -> Result<Json<GatherRoomDetail>, AppError> {
    let user_id = user.user_id()?;
    let form = MultipartForm::read(multipart).await?;

    let room = GatherRoomService::partial_update(&state, user_id, id, form).await?;
    Ok(Json(room))
}

/// 모임방 삭제 (개설자만)
#[utoipa::path(
    delete,
    path = "/gather-rooms/{id}/",
    params(("id" = i64, Path, description = "모임방 ID")),
    security(("bearer_auth" = [])),
    responses(
        (status = 204, description = "삭제 성공"),
        (status = 404, description = "존재하지 않거나 본인 모임방이 아님", body = ErrorResponse)
    ),
    tag = "GatherRoom"
)]
pub async fn delete_gather_room(
    State(state): State<AppState>,
    user: AuthUser,
    Path(id): Path<i64>,
) -> Result<StatusCode, AppError> {
    let user_id = user.user_id()?;
    GatherRoomService::destroy(&state, user_id, id).await?;
    Ok(StatusCode::NO_CONTENT)
}
