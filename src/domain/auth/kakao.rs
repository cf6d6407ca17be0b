use std::time::Duration;

use async_trait::async_trait;
use reqwest::Client;
use serde::Deserialize;
use tracing::{debug, warn};

use crate::config::KakaoConfig;
use crate::utils::error::AppError;

/// 카카오 프로필에서 로그인에 필요한 값
#[derive(Debug, Clone, PartialEq)]
pub struct KakaoProfile {
    /// 카카오 회원번호
    pub uid: String,
    pub email: String,
    pub nickname: Option<String>,
    pub profile_image_url: Option<String>,
}

/// 카카오 OAuth 연동
///
/// 인가 코드를 액세스 토큰으로 바꾸고, 그 토큰으로 프로필을 가져옵니다.
/// 어느 단계든 실패하면 `SocialAuthFailed`로 끝납니다.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait KakaoClient: Send + Sync {
    async fn exchange_code(&self, code: &str) -> Result<String, AppError>;
    async fn fetch_profile(&self, access_token: &str) -> Result<KakaoProfile, AppError>;
}

#[derive(Debug, Deserialize)]
struct TokenResponse {
    access_token: Option<String>,
    error: Option<String>,
    error_description: Option<String>,
}

#[derive(Debug, Deserialize)]
struct ProfileResponse {
    id: Option<i64>,
    kakao_account: Option<KakaoAccount>,
}

#[derive(Debug, Deserialize)]
struct KakaoAccount {
    email: Option<String>,
    profile: Option<KakaoAccountProfile>,
}

#[derive(Debug, Deserialize)]
struct KakaoAccountProfile {
    nickname: Option<String>,
    profile_image_url: Option<String>,
}

pub struct HttpKakaoClient {
    client: Client,
    config: KakaoConfig,
}

impl HttpKakaoClient {
    pub fn new(config: &KakaoConfig) -> Result<Self, AppError> {
        let client = Client::builder()
            .timeout(Duration::from_secs(config.timeout_secs))
            .build()
            .map_err(|e| AppError::InternalError(format!("HTTP client build failed: {}", e)))?;

        Ok(Self {
            client,
            config: config.clone(),
        })
    }
}

fn social_failure(stage: &str, detail: impl std::fmt::Display) -> AppError {
    warn!(stage, error = %detail, "kakao login failed");
    AppError::SocialAuthFailed("카카오 로그인에 실패했습니다.".into())
}

#[async_trait]
impl KakaoClient for HttpKakaoClient {
    async fn exchange_code(&self, code: &str) -> Result<String, AppError> {
        let mut params = vec![
            ("grant_type", "authorization_code"),
            ("client_id", self.config.rest_api_key.as_str()),
            ("redirect_uri", self.config.redirect_uri.as_str()),
            ("code", code),
        ];
        if let Some(secret) = self.config.client_secret.as_deref() {
            params.push(("client_secret", secret));
        }

        let response = self
            .client
            .post(&self.config.token_url)
            .form(&params)
            .send()
            .await
            .map_err(|e| social_failure("token_exchange", e))?;

        let status = response.status();
        let body: TokenResponse = response
            .json()
            .await
            .map_err(|e| social_failure("token_exchange", e))?;

        if let Some(error) = body.error {
            let detail = body.error_description.unwrap_or_default();
            return Err(social_failure("token_exchange", format!("{} {}", error, detail)));
        }
        if !status.is_success() {
            return Err(social_failure("token_exchange", status));
        }

        debug!("kakao token exchanged");
        body.access_token
            .ok_or_else(|| social_failure("token_exchange", "access_token 없음"))
    }

    async fn fetch_profile(&self, access_token: &str) -> Result<KakaoProfile, AppError> {
        let response = self
            .client
            .get(&self.config.profile_url)
            .bearer_auth(access_token)
            .send()
            .await
            .map_err(|e| social_failure("profile", e))?;

        if !response.status().is_success() {
            return Err(social_failure("profile", response.status()));
        }

        let body: ProfileResponse = response
            .json()
            .await
            .map_err(|e| social_failure("profile", e))?;

        let uid = body
            .id
            .ok_or_else(|| social_failure("profile", "회원번호 없음"))?
            .to_string();
        let account = body
            .kakao_account
            .ok_or_else(|| social_failure("profile", "kakao_account 없음"))?;
        let email = account
            .email
            .filter(|e| !e.trim().is_empty())
            .ok_or_else(|| social_failure("profile", "이메일 동의 필요"))?;
        let (nickname, profile_image_url) = match account.profile {
            Some(p) => (p.nickname, p.profile_image_url),
            None => (None, None),
        };

        Ok(KakaoProfile {
            uid,
            email,
            nickname,
            profile_image_url,
        })
    }
}
