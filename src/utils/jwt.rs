use chrono::{Duration, Utc};
use jsonwebtoken::{decode, encode, DecodingKey, EncodingKey, Header, Validation};
use serde::{Deserialize, Serialize};

use super::error::AppError;

const ACCESS_TOKEN_TYPE: &str = "access";
const REFRESH_TOKEN_TYPE: &str = "refresh";

/// JWT Claims 구조체
#[derive(Debug, Serialize, Deserialize)]
pub struct Claims {
    /// Subject (User ID)
    pub sub: String,
    /// Issued At
    pub iat: usize,
    /// Expiration
    pub exp: usize,
    /// Token Type (access, refresh)
    #[serde(skip_serializing_if = "Option::is_none")]
    pub token_type: Option<String>,
}

fn encode_with_type(
    sub: String,
    secret: &str,
    expiration_seconds: i64,
    token_type: &str,
) -> Result<String, AppError> {
    let now = Utc::now();
    let expiration = now
        .checked_add_signed(Duration::seconds(expiration_seconds))
        .ok_or_else(|| AppError::internal_error("토큰 만료 시간 계산에 실패했습니다."))?
        .timestamp() as usize;

    let claims = Claims {
        sub,
        iat: now.timestamp() as usize,
        exp: expiration,
        token_type: Some(token_type.to_string()),
    };

    encode(
        &Header::default(),
        &claims,
        &EncodingKey::from_secret(secret.as_bytes()),
    )
    .map_err(|e| AppError::InternalError(format!("Token creation failed: {}", e)))
}

/// JWT 토큰 생성 (Access Token)
pub fn encode_token(
    sub: String,
    secret: &str,
    expiration_seconds: i64,
) -> Result<String, AppError> {
    encode_with_type(sub, secret, expiration_seconds, ACCESS_TOKEN_TYPE)
}

/// Refresh Token 생성
pub fn encode_refresh_token(
    sub: String,
    secret: &str,
    expiration_seconds: i64,
) -> Result<String, AppError> {
    encode_with_type(sub, secret, expiration_seconds, REFRESH_TOKEN_TYPE)
}

/// JWT 토큰 검증
pub fn decode_token(token: &str, secret: &str) -> Result<Claims, AppError> {
    let validation = Validation::default();

    decode::<Claims>(
        token,
        &DecodingKey::from_secret(secret.as_bytes()),
        &validation,
    )
    .map(|data| data.claims)
    .map_err(|e| match e.kind() {
        jsonwebtoken::errors::ErrorKind::ExpiredSignature => {
            AppError::Unauthorized("토큰이 만료되었습니다.".into())
        }
        _ => AppError::Unauthorized("유효하지 않은 토큰입니다.".into()),
    })
}

fn decode_expecting(token: &str, secret: &str, expected: &str) -> Result<Claims, AppError> {
    let claims = decode_token(token, secret)?;
    if claims.token_type.as_deref() != Some(expected) {
        return Err(AppError::Unauthorized(
            "유효하지 않은 토큰 타입입니다.".into(),
        ));
    }
    Ok(claims)
}

/// Access Token만 허용하는 검증
pub fn decode_access_token(token: &str, secret: &str) -> Result<Claims, AppError> {
    decode_expecting(token, secret, ACCESS_TOKEN_TYPE)
}

/// Refresh Token만 허용하는 검증
pub fn decode_refresh_token(token: &str, secret: &str) -> Result<Claims, AppError> {
    decode_expecting(token, secret, REFRESH_TOKEN_TYPE)
}
