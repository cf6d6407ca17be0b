//! 통합 테스트 공용 헬퍼
//!
//! 실제 라우터를 in-memory SQLite 위에 띄우고, S3와 카카오는 가짜 구현으로 바꿉니다.
#![allow(dead_code)]

use std::sync::{Arc, Mutex};

use async_trait::async_trait;
use axum::{
    body::Body,
    http::{header, Method, Request, Response},
    Router,
};
use chrono::Utc;
use http_body_util::BodyExt;
use sea_orm::{ActiveModelTrait, ConnectOptions, Database, DatabaseConnection, Set};
use serde_json::Value;
use tower::ServiceExt;

use foreatown::config::{sync_schema, AppConfig, KakaoConfig, StorageConfig};
use foreatown::domain::auth::{KakaoClient, KakaoProfile};
use foreatown::domain::user::entity::user;
use foreatown::utils::error::AppError;
use foreatown::utils::jwt::encode_token;
use foreatown::utils::multipart::UploadFile;
use foreatown::utils::storage::ObjectStorage;
use foreatown::{app, AppState};

pub const JWT_SECRET: &str = "integration-test-secret";
pub const BOUNDARY: &str = "foreatown-test-boundary";

/// 파일명에 `broken`이 들어가면 업로드 실패로 응답하는 스토리지
#[derive(Default)]
pub struct FakeStorage {
    pub uploaded: Mutex<Vec<String>>,
}

#[async_trait]
impl ObjectStorage for FakeStorage {
    async fn upload(&self, file: &UploadFile) -> Option<String> {
        let name = file.file_name.clone().unwrap_or_default();
        if name.contains("broken") {
            return None;
        }
        if let Ok(mut uploaded) = self.uploaded.lock() {
            uploaded.push(name.clone());
        }
        Some(format!("https://cdn.test/free{}", name))
    }
}

/// 미리 정해 둔 프로필을 돌려주는 카카오 클라이언트
pub struct FakeKakao {
    pub profile: Option<KakaoProfile>,
    pub exchanges: Mutex<u32>,
}

impl FakeKakao {
    pub fn returning(profile: KakaoProfile) -> Self {
        Self {
            profile: Some(profile),
            exchanges: Mutex::new(0),
        }
    }

    pub fn rejecting() -> Self {
        Self {
            profile: None,
            exchanges: Mutex::new(0),
        }
    }
}

#[async_trait]
impl KakaoClient for FakeKakao {
    async fn exchange_code(&self, code: &str) -> Result<String, AppError> {
        if let Ok(mut count) = self.exchanges.lock() {
            *count += 1;
        }
        match (&self.profile, code) {
            (Some(_), "valid-code") => Ok("kakao-access-token".to_string()),
            _ => Err(AppError::SocialAuthFailed(
                "카카오 로그인에 실패했습니다.".into(),
            )),
        }
    }

    async fn fetch_profile(&self, access_token: &str) -> Result<KakaoProfile, AppError> {
        match (&self.profile, access_token) {
            (Some(profile), "kakao-access-token") => Ok(profile.clone()),
            _ => Err(AppError::SocialAuthFailed(
                "카카오 로그인에 실패했습니다.".into(),
            )),
        }
    }
}

pub fn kakao_profile(email: &str, photo: Option<&str>) -> KakaoProfile {
    KakaoProfile {
        uid: "900001".to_string(),
        email: email.to_string(),
        nickname: Some("카카오친구".to_string()),
        profile_image_url: photo.map(str::to_string),
    }
}

pub fn test_config(error_compat_mode: bool, jwt_cookie_delivery: bool) -> AppConfig {
    AppConfig {
        server_port: 0,
        database_url: "sqlite::memory:".to_string(),
        service_base_url: "http://localhost:8000/".to_string(),
        jwt_secret: JWT_SECRET.to_string(),
        jwt_expiration: 3600,
        refresh_token_expiration: 86400,
        jwt_cookie_delivery,
        error_compat_mode,
        max_upload_bytes: 5 * 1024 * 1024,
        kakao: KakaoConfig {
            rest_api_key: "rest-key".to_string(),
            client_secret: None,
            redirect_uri: "http://localhost:3000/kakao".to_string(),
            token_url: "http://127.0.0.1:9/oauth/token".to_string(),
            profile_url: "http://127.0.0.1:9/v2/user/me".to_string(),
            timeout_secs: 2,
        },
        storage: StorageConfig {
            access_key_id: "key".to_string(),
            secret_access_key: "secret".to_string(),
            bucket_name: "bucket".to_string(),
            region: "ap-northeast-2".to_string(),
            endpoint: None,
            key_prefix: "free".to_string(),
        },
    }
}

pub struct TestApp {
    pub router: Router,
    pub db: DatabaseConnection,
    pub storage: Arc<FakeStorage>,
}

pub struct TestOptions {
    pub error_compat_mode: bool,
    pub jwt_cookie_delivery: bool,
    pub kakao: FakeKakao,
}

impl Default for TestOptions {
    fn default() -> Self {
        Self {
            error_compat_mode: false,
            jwt_cookie_delivery: false,
            kakao: FakeKakao::rejecting(),
        }
    }
}

pub async fn setup() -> TestApp {
    setup_with(TestOptions::default()).await
}

pub async fn setup_with(options: TestOptions) -> TestApp {
    // in-memory DB는 커넥션마다 따로 생기므로 하나만 씁니다.
    let mut opts = ConnectOptions::new("sqlite::memory:");
    opts.max_connections(1).min_connections(1).sqlx_logging(false);
    let db = Database::connect(opts).await.expect("sqlite 연결 실패");
    sync_schema(&db).await.expect("스키마 생성 실패");

    let storage = Arc::new(FakeStorage::default());
    let state = AppState {
        db: db.clone(),
        config: Arc::new(test_config(
            options.error_compat_mode,
            options.jwt_cookie_delivery,
        )),
        storage: storage.clone(),
        kakao: Arc::new(options.kakao),
    };

    TestApp {
        router: app(state),
        db,
        storage,
    }
}

/// 비밀번호 없는 사용자를 바로 만듭니다.
pub async fn create_user(db: &DatabaseConnection, email: &str, name: &str) -> user::Model {
    let now = Utc::now().naive_utc();
    user::ActiveModel {
        email: Set(email.to_string()),
        password: Set(None),
        name: Set(name.to_string()),
        created_at: Set(now),
        updated_at: Set(now),
        ..Default::default()
    }
    .insert(db)
    .await
    .expect("사용자 생성 실패")
}

pub fn bearer(user_id: i64) -> String {
    let token = encode_token(user_id.to_string(), JWT_SECRET, 3600).expect("토큰 생성 실패");
    format!("Bearer {}", token)
}

/// multipart 본문 조립 (`(필드명, 값)` 텍스트와 `(필드명, 파일명)` 파일)
pub fn multipart_body(fields: &[(&str, &str)], files: &[(&str, &str)]) -> Vec<u8> {
    let mut body = Vec::new();
    for (name, value) in fields {
        body.extend_from_slice(
            format!(
                "--{}\r\nContent-Disposition: form-data; name=\"{}\"\r\n\r\n{}\r\n",
                BOUNDARY, name, value
            )
            .as_bytes(),
        );
    }
    for (name, file_name) in files {
        body.extend_from_slice(
            format!(
                "--{}\r\nContent-Disposition: form-data; name=\"{}\"; filename=\"{}\"\r\nContent-Type: image/png\r\n\r\n",
                BOUNDARY, name, file_name
            )
            .as_bytes(),
        );
        body.extend_from_slice(b"\x89PNG\r\n\x1a\nfake-image");
        body.extend_from_slice(b"\r\n");
    }
    body.extend_from_slice(format!("--{}--\r\n", BOUNDARY).as_bytes());
    body
}

pub fn multipart_request(
    method: Method,
    uri: &str,
    auth: Option<&str>,
    fields: &[(&str, &str)],
    files: &[(&str, &str)],
) -> Request<Body> {
    let mut builder = Request::builder().method(method).uri(uri).header(
        header::CONTENT_TYPE,
        format!("multipart/form-data; boundary={}", BOUNDARY),
    );
    if let Some(auth) = auth {
        builder = builder.header(header::AUTHORIZATION, auth);
    }
    builder
        .body(Body::from(multipart_body(fields, files)))
        .expect("요청 생성 실패")
}

pub fn json_request(method: Method, uri: &str, auth: Option<&str>, body: Value) -> Request<Body> {
    let mut builder = Request::builder()
        .method(method)
        .uri(uri)
        .header(header::CONTENT_TYPE, "application/json");
    if let Some(auth) = auth {
        builder = builder.header(header::AUTHORIZATION, auth);
    }
    builder
        .body(Body::from(body.to_string()))
        .expect("요청 생성 실패")
}

pub fn empty_request(method: Method, uri: &str, auth: Option<&str>) -> Request<Body> {
    let mut builder = Request::builder().method(method).uri(uri);
    if let Some(auth) = auth {
        builder = builder.header(header::AUTHORIZATION, auth);
    }
    builder.body(Body::empty()).expect("요청 생성 실패")
}

pub async fn send(router: &Router, request: Request<Body>) -> Response<Body> {
    router.clone().oneshot(request).await.expect("요청 처리 실패")
}

pub async fn body_json(response: Response<Body>) -> Value {
    let bytes = response
        .into_body()
        .collect()
        .await
        .expect("본문 읽기 실패")
        .to_bytes();
    if bytes.is_empty() {
        return Value::Null;
    }
    serde_json::from_slice(&bytes).expect("JSON 파싱 실패")
}

/// 오프라인 Hiring 모임방 생성용 필드
pub fn hiring_room_fields() -> Vec<(&'static str, &'static str)> {
    vec![
        ("subject", "백엔드 개발자 구합니다"),
        ("content", "사이드 프로젝트 함께 하실 분"),
        ("address", "서울시 강남구 테헤란로 1"),
        ("is_online", "False"),
        ("user_limit", "4"),
        ("date_time", "2026-11-20 19:30:00"),
        ("gather_room_category", "Hiring"),
    ]
}
