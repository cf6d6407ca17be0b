use axum::{
    extract::{rejection::JsonRejection, Path, Query, State},
    http::StatusCode,
    Json,
};
use validator::Validate;

use super::dto::{CreateReviewRequest, ReviewListQuery, ReviewResponse};
use super::service::ReviewService;
use crate::state::AppState;
use crate::utils::auth::AuthUser;
use crate::utils::error::AppError;

/// 리뷰 목록 (익명 허용)
#[utoipa::path(
    get,
    path = "/gather-room-reviews/",
    params(ReviewListQuery),
    responses(
        (status = 200, description = "조회 성공", body = [ReviewResponse])
    ),
    tag = "Review"
)]
pub async fn list_reviews(
    State(state): State<AppState>,
    Query(query): Query<ReviewListQuery>,
) -> Result<Json<Vec<ReviewResponse>>, AppError> {
    let reviews = ReviewService::list(&state, query).await?;
    Ok(Json(reviews))
}

/// 리뷰 작성
#[utoipa::path(
    post,
    path = "/gather-room-reviews/",
    request_body = CreateReviewRequest,
    security(("bearer_auth" = [])),
    responses(
        (status = 201, description = "작성 성공", body = ReviewResponse),
        (status = 400, description = "검증 실패", body = ErrorResponse),
        (status = 404, description = "존재하지 않는 모임방", body = ErrorResponse)
    ),
    tag = "Review"
)]
pub async fn create_review(
    State(state): State<AppState>,
    user: AuthUser,
    request: Result<Json<CreateReviewRequest>, JsonRejection>,
) -> Result<(StatusCode, Json<ReviewResponse>), AppError> {
    let Json(req) = request.map_err(AppError::from)?;
    req.validate()?;
    let user_id = user.user_id()?;

    let created = ReviewService::create(&state, user_id, req).await?;
    Ok((StatusCode::CREATED, Json(created)))
}

/// 리뷰 삭제
#[utoipa::path(
    delete,
    path = "/gather-room-reviews/{id}/",
    params(("id" = i64, Path, description = "리뷰 ID")),
    security(("bearer_auth" = [])),
    responses(
        (status = 204, description = "삭제 성공"),
        (status = 404, description = "존재하지 않거나 본인 리뷰가 아님", body = ErrorResponse)
    ),
    tag = "Review"
)]
pub async fn delete_review(
    State(state): State<AppState>,
    user: AuthUser,
    Path(id): Path<i64>,
) -> Result<StatusCode, AppError> {
    let user_id = user.user_id()?;
    ReviewService::destroy(&state, user_id, id).await?;
    Ok(StatusCode::NO_CONTENT)
}
