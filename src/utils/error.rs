use axum::{
    extract::multipart::MultipartError,
    extract::rejection::JsonRejection,
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use sea_orm::{DbErr, SqlErr};
use tracing::{error, warn};
use validator::ValidationErrors;

use super::response::ErrorResponse;

/// 애플리케이션 전역 에러 타입
#[derive(Debug)]
pub enum AppError {
    BadRequest(String),
    ValidationError(String),
    JsonParseFailed(String),
    Unauthorized(String),
    Forbidden(String),
    NotFound(String),
    Conflict(String),
    SocialAuthFailed(String),
    InternalError(String),
}

/// 에러 응답에 실려 호환 모드 미들웨어까지 전달되는 메시지
#[derive(Debug, Clone)]
pub struct ErrorMessage(pub String);

impl AppError {
    /// 에러 메시지 반환
    pub fn message(&self) -> String {
        match self {
            AppError::BadRequest(msg) => msg.clone(),
            AppError::ValidationError(msg) => msg.clone(),
            AppError::JsonParseFailed(msg) => format!("잘못된 요청 형식입니다: {}", msg),
            AppError::Unauthorized(msg) => msg.clone(),
            AppError::Forbidden(msg) => msg.clone(),
            AppError::NotFound(msg) => msg.clone(),
            AppError::Conflict(msg) => msg.clone(),
            AppError::SocialAuthFailed(msg) => msg.clone(),
            AppError::InternalError(msg) => msg.clone(),
        }
    }

    /// 에러 코드 반환
    pub fn error_code(&self) -> String {
        match self {
            AppError::BadRequest(_) => "COMMON400",
            AppError::ValidationError(_) => "COMMON400",
            AppError::JsonParseFailed(_) => "COMMON400",
            AppError::Unauthorized(_) => "COMMON401",
            AppError::Forbidden(_) => "COMMON403",
            AppError::NotFound(_) => "COMMON404",
            AppError::Conflict(_) => "COMMON409",
            AppError::SocialAuthFailed(_) => "AUTH4001",
            AppError::InternalError(_) => "COMMON500",
        }
        .to_string()
    }

    /// HTTP 상태 코드 반환
    pub fn status_code(&self) -> StatusCode {
        match self {
            AppError::BadRequest(_) => StatusCode::BAD_REQUEST,
            AppError::ValidationError(_) => StatusCode::BAD_REQUEST,
            AppError::JsonParseFailed(_) => StatusCode::BAD_REQUEST,
            AppError::Unauthorized(_) => StatusCode::UNAUTHORIZED,
            AppError::Forbidden(_) => StatusCode::FORBIDDEN,
            AppError::NotFound(_) => StatusCode::NOT_FOUND,
            AppError::Conflict(_) => StatusCode::CONFLICT,
            AppError::SocialAuthFailed(_) => StatusCode::BAD_REQUEST,
            AppError::InternalError(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

impl std::fmt::Display for AppError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "[{}] {}", self.error_code(), self.message())
    }
}

impl std::error::Error for AppError {}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let status = self.status_code();
        let error_code = self.error_code();
        let message = self.message();

        if status.is_server_error() {
            error!("Internal Server Error: {}", message);
        } else {
            warn!("Error [{}]: {}", error_code, message);
        }

        let mut response = (status, Json(ErrorResponse::new(error_code, message.clone())))
            .into_response();
        response.extensions_mut().insert(ErrorMessage(message));
        response
    }
}

/// JsonRejection을 AppError로 변환
impl From<JsonRejection> for AppError {
    fn from(rejection: JsonRejection) -> Self {
        AppError::JsonParseFailed(rejection.body_text())
    }
}

impl From<MultipartError> for AppError {
    fn from(err: MultipartError) -> Self {
        AppError::BadRequest(format!("multipart 요청을 읽을 수 없습니다: {}", err.body_text()))
    }
}

impl From<ValidationErrors> for AppError {
    fn from(errors: ValidationErrors) -> Self {
        let mut messages: Vec<String> = errors
            .field_errors()
            .iter()
            .flat_map(|(field, errs)| {
                errs.iter().map(move |e| match &e.message {
                    Some(msg) => format!("{}: {}", field, msg),
                    None => format!("{}: 올바르지 않은 값입니다", field),
                })
            })
            .collect();
        messages.sort();
        AppError::ValidationError(messages.join(", "))
    }
}

impl From<DbErr> for AppError {
    fn from(err: DbErr) -> Self {
        match err.sql_err() {
            Some(SqlErr::UniqueConstraintViolation(detail)) => {
                AppError::Conflict(format!("이미 존재하는 데이터입니다: {}", detail))
            }
            _ => AppError::InternalError(format!("DB Error: {}", err)),
        }
    }
}

/// 편의 함수들
impl AppError {
    pub fn bad_request(msg: impl Into<String>) -> Self {
        AppError::BadRequest(msg.into())
    }

    pub fn not_found(msg: impl Into<String>) -> Self {
        AppError::NotFound(msg.into())
    }

    pub fn unauthorized(msg: impl Into<String>) -> Self {
        AppError::Unauthorized(msg.into())
    }

    pub fn conflict(msg: impl Into<String>) -> Self {
        AppError::Conflict(msg.into())
    }

    pub fn internal_error(msg: impl Into<String>) -> Self {
        AppError::InternalError(msg.into())
    }

    pub fn validation_error(msg: impl Into<String>) -> Self {
        AppError::ValidationError(msg.into())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use validator::Validate;

    #[derive(Validate)]
    struct Sample {
        #[validate(length(min = 1, message = "필수 값입니다"))]
        name: String,
    }

    #[test]
    fn should_map_every_variant_to_its_status() {
        let table = [
            (AppError::bad_request("x"), StatusCode::BAD_REQUEST),
            (AppError::validation_error("x"), StatusCode::BAD_REQUEST),
            (AppError::JsonParseFailed("x".into()), StatusCode::BAD_REQUEST),
            (AppError::unauthorized("x"), StatusCode::UNAUTHORIZED),
            (AppError::Forbidden("x".into()), StatusCode::FORBIDDEN),
            (AppError::not_found("x"), StatusCode::NOT_FOUND),
            (AppError::conflict("x"), StatusCode::CONFLICT),
            (AppError::SocialAuthFailed("x".into()), StatusCode::BAD_REQUEST),
            (AppError::internal_error("x"), StatusCode::INTERNAL_SERVER_ERROR),
        ];

        for (err, expected) in table {
            assert_eq!(err.status_code(), expected, "{:?}", err);
        }
    }

    #[test]
    fn should_attach_message_extension_to_response() {
        // Arrange
        let err = AppError::not_found("존재하지 않는 모임방입니다.");

        // Act
        let response = err.into_response();

        // Assert
        assert_eq!(response.status(), StatusCode::NOT_FOUND);
        let message = response.extensions().get::<ErrorMessage>().unwrap();
        assert_eq!(message.0, "존재하지 않는 모임방입니다.");
    }

    #[test]
    fn should_convert_validation_errors_with_field_name() {
        // Arrange
        let sample = Sample {
            name: String::new(),
        };

        // Act
        let err: AppError = sample.validate().unwrap_err().into();

        // Assert
        assert!(matches!(err, AppError::ValidationError(_)));
        assert_eq!(err.message(), "name: 필수 값입니다");
    }
}
