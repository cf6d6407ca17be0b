use serde::Deserialize;
use utoipa::ToSchema;
use validator::Validate;

/// 이메일 회원가입 요청
#[derive(Debug, Deserialize, Validate, ToSchema)]
pub struct SignupRequest {
    #[validate(email(message = "이메일 형식이 올바르지 않습니다"))]
    pub email: String,
    #[validate(length(min = 8, max = 64, message = "비밀번호는 8~64자여야 합니다"))]
    pub password: String,
    #[validate(length(min = 1, max = 30, message = "이름은 1~30자여야 합니다"))]
    pub name: String,
}

/// 이메일 로그인 요청
#[derive(Debug, Deserialize, Validate, ToSchema)]
pub struct LoginRequest {
    #[validate(email(message = "이메일 형식이 올바르지 않습니다"))]
    pub email: String,
    #[validate(length(min = 1, message = "비밀번호를 입력해주세요"))]
    pub password: String,
}

/// 토큰 갱신 요청
#[derive(Debug, Deserialize, Validate, ToSchema)]
pub struct TokenRefreshRequest {
    #[validate(length(min = 1, message = "refresh_token이 필요합니다"))]
    pub refresh_token: String,
}

/// 카카오 로그인 요청 (인가 코드)
#[derive(Debug, Deserialize, Validate, ToSchema)]
pub struct KakaoLoginRequest {
    #[validate(length(min = 1, message = "인가 코드가 필요합니다"))]
    pub code: String,
}
