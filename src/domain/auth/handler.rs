use axum::{
    extract::{rejection::JsonRejection, State},
    http::StatusCode,
    Json,
};
use validator::Validate;

use super::credentials::IssuedCredentials;
use super::dto::{KakaoLoginRequest, LoginRequest, SignupRequest, TokenRefreshRequest};
use super::service::AuthService;
use crate::state::AppState;
use crate::utils::error::AppError;

/// 이메일 회원가입
///
/// 가입과 동시에 토큰을 발급합니다.
#[utoipa::path(
    post,
    path = "/users/signup/",
    request_body = SignupRequest,
    responses(
        (status = 201, description = "가입 성공", body = CredentialResponse),
        (status = 400, description = "검증 실패", body = ErrorResponse),
        (status = 409, description = "이미 가입된 이메일", body = ErrorResponse)
    ),
    tag = "Auth"
)]
pub async fn signup(
    State(state): State<AppState>,
    request: Result<Json<SignupRequest>, JsonRejection>,
) -> Result<(StatusCode, IssuedCredentials), AppError> {
    let Json(req) = request.map_err(AppError::from)?;
    req.validate()?;

    let issued = AuthService::signup(&state, req).await?;
    Ok((StatusCode::CREATED, issued))
}

/// 이메일 로그인
#[utoipa::path(
    post,
    path = "/users/login/",
    request_body = LoginRequest,
    responses(
        (status = 200, description = "로그인 성공", body = CredentialResponse),
        (status = 401, description = "이메일 또는 비밀번호 불일치", body = ErrorResponse)
    ),
    tag = "Auth"
)]
pub async fn login(
    State(state): State<AppState>,
    request: Result<Json<LoginRequest>, JsonRejection>,
) -> Result<IssuedCredentials, AppError> {
    let Json(req) = request.map_err(AppError::from)?;
    req.validate()?;

    AuthService::login(&state, req).await
}

/// 토큰 갱신
#[utoipa::path(
    post,
    path = "/users/token/refresh/",
    request_body = TokenRefreshRequest,
    responses(
        (status = 200, description = "갱신 성공", body = CredentialResponse),
        (status = 401, description = "유효하지 않은 토큰", body = ErrorResponse)
    ),
    tag = "Auth"
)]
pub async fn refresh(
    State(state): State<AppState>,
    request: Result<Json<TokenRefreshRequest>, JsonRejection>,
) -> Result<IssuedCredentials, AppError> {
    let Json(req) = request.map_err(AppError::from)?;
    req.validate()?;

    AuthService::refresh(&state, req).await
}

/// 카카오 로그인 및 회원가입
///
/// 카카오 인가 코드를 받아 토큰 교환, 프로필 조회 후 JWT를 발급합니다.
/// 처음 보는 이메일이면 카카오 계정으로 가입 처리됩니다.
#[utoipa::path(
    post,
    path = "/users/kakao/login/",
    request_body = KakaoLoginRequest,
    responses(
        (status = 200, description = "로그인 성공", body = CredentialResponse),
        (status = 400, description = "카카오 연동 실패", body = ErrorResponse),
        (status = 409, description = "다른 방식으로 가입된 이메일", body = ErrorResponse)
    ),
    tag = "Auth"
)]
pub async fn kakao_login(
    State(state): State<AppState>,
    request: Result<Json<KakaoLoginRequest>, JsonRejection>,
) -> Result<IssuedCredentials, AppError> {
    let Json(req) = request.map_err(AppError::from)?;
    req.validate()?;

    AuthService::kakao_login(&state, &req.code).await
}
