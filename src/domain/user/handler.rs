use axum::{
    extract::{Multipart, Path, State},
    http::{header::SET_COOKIE, HeaderMap, StatusCode},
    Json,
};

use super::dto::UserResponse;
use super::service::UserService;
use crate::state::AppState;
use crate::utils::auth::AuthUser;
use crate::utils::cookie::{clear_access_token_cookie, clear_refresh_token_cookie};
use crate::utils::error::AppError;
use crate::utils::multipart::MultipartForm;

/// 사용자 조회 (익명 허용)
#[utoipa::path(
    get,
    path = "/users/{id}/",
    params(("id" = i64, Path, description = "사용자 ID")),
    responses(
        (status = 200, description = "조회 성공", body = UserResponse),
        (status = 404, description = "존재하지 않거나 탈퇴한 사용자", body = ErrorResponse)
    ),
    tag = "User"
)]
pub async fn get_user(
    State(state): State<AppState>,
    Path(id): Path<i64>,
) -> Result<Json<UserResponse>, AppError> {
    let user = UserService::retrieve(&state, id).await?;
    Ok(Json(user))
}

/// 내 정보 조회
#[utoipa::path(
    get,
    path = "/users/me/",
    security(("bearer_auth" = [])),
    responses(
        (status = 200, description = "조회 성공", body = UserResponse),
        (status = 401, description = "인증 실패", body = ErrorResponse)
    ),
    tag = "User"
)]
pub async fn get_me(
    State(state): State<AppState>,
    user: AuthUser,
) -> Result<Json<UserResponse>, AppError> {
    let user_id = user.user_id()?;
    let me = UserService::retrieve(&state, user_id).await?;
    Ok(Json(me))
}

/// 내 프로필 수정
///
/// multipart/form-data. 텍스트 필드와 `profile_image` 파일을 받습니다.
#[utoipa::path(
    patch,
    path = "/users/me/",
    request_body(content = UpdateProfileForm, content_type = "multipart/form-data"),
    security(("bearer_auth" = [])),
    responses(
        (status = 200, description = "수정 성공", body = UserResponse),
        (status = 400, description = "검증 실패", body = ErrorResponse),
        (status = 401, description = "인증 실패", body = ErrorResponse)
    ),
    tag = "User"
)]
pub async fn update_me(
    State(state): State<AppState>,
    user: AuthUser,
    multipart: Multipart,
) -> Result<Json<UserResponse>, AppError> {
    let user_id = user.user_id()?;
    let form = MultipartForm::read(multipart).await?;

    let updated = UserService::update_profile(&state, user_id, form).await?;
    Ok(Json(updated))
}

/// 회원 탈퇴
///
/// 계정을 소프트 삭제하고 토큰 쿠키를 만료시킵니다.
#[utoipa::path(
    delete,
    path = "/users/me/",
    security(("bearer_auth" = [])),
    responses(
        (status = 204, description = "탈퇴 성공"),
        (status = 401, description = "인증 실패", body = ErrorResponse)
    ),
    tag = "User"
)]
pub async fn delete_me(
    State(state): State<AppState>,
    user: AuthUser,
) -> Result<(StatusCode, HeaderMap), AppError> {
    let user_id = user.user_id()?;
    UserService::withdraw(&state, user_id).await?;

    let mut headers = HeaderMap::new();
    headers.append(SET_COOKIE, clear_access_token_cookie()?);
    headers.append(SET_COOKIE, clear_refresh_token_cookie()?);

    Ok((StatusCode::NO_CONTENT, headers))
}
