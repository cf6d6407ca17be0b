use std::env;

/// 오브젝트 스토리지(S3) 설정
#[derive(Debug, Clone)]
pub struct StorageConfig {
    pub access_key_id: String,
    pub secret_access_key: String,
    pub bucket_name: String,
    pub region: String,
    /// MinIO, LocalStack 등 S3 호환 엔드포인트 (없으면 AWS 기본값)
    pub endpoint: Option<String>,
    /// 업로드 키 앞에 붙는 등급 태그
    pub key_prefix: String,
}

/// 카카오 OAuth 설정
#[derive(Debug, Clone)]
pub struct KakaoConfig {
    pub rest_api_key: String,
    pub client_secret: Option<String>,
    pub redirect_uri: String,
    pub token_url: String,
    pub profile_url: String,
    pub timeout_secs: u64,
}

/// 애플리케이션 설정
///
/// 프로세스 시작 시 한 번만 읽고, 이후에는 `AppState`를 통해 참조로 전달합니다.
#[derive(Debug, Clone)]
pub struct AppConfig {
    pub server_port: u16,
    pub database_url: String,
    pub service_base_url: String,

    pub jwt_secret: String,
    pub jwt_expiration: i64,
    pub refresh_token_expiration: i64,
    /// 토큰을 응답 본문과 함께 쿠키로도 전달할지 여부
    pub jwt_cookie_delivery: bool,

    /// true면 모든 에러를 400 + {"ERROR_MESSAGE": [...]} 형태로 응답
    pub error_compat_mode: bool,
    pub max_upload_bytes: usize,

    pub kakao: KakaoConfig,
    pub storage: StorageConfig,
}

impl AppConfig {
    /// 환경 변수에서 설정 로드
    pub fn from_env() -> Result<Self, ConfigError> {
        let server_port = env::var("SERVER_PORT")
            .unwrap_or_else(|_| "8080".to_string())
            .parse()
            .map_err(|_| ConfigError::InvalidPort)?;

        let database_url = env::var("DATABASE_URL").map_err(|_| ConfigError::MissingDatabaseUrl)?;
        let service_base_url =
            env::var("SERVICE_BASE_URL").unwrap_or_else(|_| "http://localhost:8080/".to_string());

        let jwt_secret = env::var("JWT_SECRET").unwrap_or_else(|_| {
            tracing::warn!(
                "JWT_SECRET 환경변수가 설정되지 않았습니다. 프로덕션 환경에서는 반드시 설정하세요."
            );
            "secret".to_string()
        });

        let jwt_expiration = parse_i64("JWT_EXPIRATION", 86400)?;
        let refresh_token_expiration = parse_i64("REFRESH_TOKEN_EXPIRATION", 1_209_600)?;
        let jwt_cookie_delivery = parse_bool("JWT_COOKIE_DELIVERY", true);
        let error_compat_mode = parse_bool("ERROR_COMPAT_MODE", true);

        let max_upload_bytes = env::var("MAX_UPLOAD_BYTES")
            .unwrap_or_else(|_| (10 * 1024 * 1024).to_string())
            .parse()
            .map_err(|_| ConfigError::InvalidNumber("MAX_UPLOAD_BYTES"))?;

        let timeout_secs = env::var("HTTP_CLIENT_TIMEOUT_SECS")
            .unwrap_or_else(|_| "10".to_string())
            .parse()
            .map_err(|_| ConfigError::InvalidNumber("HTTP_CLIENT_TIMEOUT_SECS"))?;

        let kakao = KakaoConfig {
            rest_api_key: env::var("KAKAO_REST_API_KEY").unwrap_or_default(),
            client_secret: env::var("KAKAO_CLIENT_SECRET").ok().filter(|s| !s.is_empty()),
            redirect_uri: env::var("KAKAO_REDIRECT_URI").unwrap_or_default(),
            token_url: env::var("KAKAO_TOKEN_URL")
                .unwrap_or_else(|_| "https://kauth.kakao.com/oauth/token".to_string()),
            profile_url: env::var("KAKAO_PROFILE_URL")
                .unwrap_or_else(|_| "https://kapi.kakao.com/v2/user/me".to_string()),
            timeout_secs,
        };

        let storage = StorageConfig {
            access_key_id: env::var("AWS_ACCESS_KEY_ID").unwrap_or_default(),
            secret_access_key: env::var("AWS_SECRET_ACCESS_KEY").unwrap_or_default(),
            bucket_name: env::var("AWS_S3_BUCKET_NAME")
                .map_err(|_| ConfigError::MissingBucketName)?,
            region: env::var("AWS_REGION").unwrap_or_else(|_| "ap-northeast-2".to_string()),
            endpoint: env::var("AWS_S3_ENDPOINT").ok().filter(|s| !s.is_empty()),
            key_prefix: env::var("UPLOAD_KEY_PREFIX").unwrap_or_else(|_| "free".to_string()),
        };

        Ok(Self {
            server_port,
            database_url,
            service_base_url,
            jwt_secret,
            jwt_expiration,
            refresh_token_expiration,
            jwt_cookie_delivery,
            error_compat_mode,
            max_upload_bytes,
            kakao,
            storage,
        })
    }
}

fn parse_i64(key: &'static str, default: i64) -> Result<i64, ConfigError> {
    match env::var(key) {
        Ok(value) => value.parse().map_err(|_| ConfigError::InvalidNumber(key)),
        Err(_) => Ok(default),
    }
}

fn parse_bool(key: &str, default: bool) -> bool {
    env::var(key)
        .ok()
        .and_then(|v| v.parse::<bool>().ok())
        .unwrap_or_else(|| {
            tracing::debug!("{} 미설정 또는 잘못된 값, 기본값 {} 사용", key, default);
            default
        })
}

#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("Invalid port number")]
    InvalidPort,
    #[error("Invalid numeric value for {0}")]
    InvalidNumber(&'static str),
    #[error("DATABASE_URL environment variable is required")]
    MissingDatabaseUrl,
    #[error("AWS_S3_BUCKET_NAME environment variable is required")]
    MissingBucketName,
}
