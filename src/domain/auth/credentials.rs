use axum::{
    http::{header::SET_COOKIE, HeaderMap},
    response::{IntoResponse, Response},
    Json,
};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use crate::config::AppConfig;
use crate::domain::user::entity::user;
use crate::utils::cookie::{create_access_token_cookie, create_refresh_token_cookie};
use crate::utils::error::AppError;
use crate::utils::jwt::{encode_refresh_token, encode_token};

/// 로그인 성공 응답 (토큰과 사용자 정보를 한 단계로 평탄화)
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
pub struct CredentialResponse {
    pub access_token: String,
    pub refresh_token: String,
    pub user_id: i64,
    pub user_name: String,
}

/// 발급된 토큰과 함께 내려갈 Set-Cookie 헤더
#[derive(Debug)]
pub struct IssuedCredentials {
    pub body: CredentialResponse,
    pub cookies: HeaderMap,
}

/// 사용자에게 access/refresh 토큰을 발급합니다.
///
/// `jwt_cookie_delivery`가 켜져 있으면 같은 토큰을 쿠키로도 내려줍니다.
pub fn issue(config: &AppConfig, user: &user::Model) -> Result<IssuedCredentials, AppError> {
    let access_token = encode_token(user.id.to_string(), &config.jwt_secret, config.jwt_expiration)?;
    let refresh_token = encode_refresh_token(
        user.id.to_string(),
        &config.jwt_secret,
        config.refresh_token_expiration,
    )?;

    let mut cookies = HeaderMap::new();
    if config.jwt_cookie_delivery {
        cookies.append(
            SET_COOKIE,
            create_access_token_cookie(&access_token, config.jwt_expiration)?,
        );
        cookies.append(
            SET_COOKIE,
            create_refresh_token_cookie(&refresh_token, config.refresh_token_expiration)?,
        );
    }

    Ok(IssuedCredentials {
        body: CredentialResponse {
            access_token,
            refresh_token,
            user_id: user.id,
            user_name: user.name.clone(),
        },
        cookies,
    })
}

impl IntoResponse for IssuedCredentials {
    fn into_response(self) -> Response {
        (self.cookies, Json(self.body)).into_response()
    }
}
