//! 로깅 초기화 모듈
//!
//! stdout과 일별 로그 파일에 JSON 구조화 로그를 남깁니다.

use tracing_appender::{non_blocking::WorkerGuard, rolling};
use tracing_subscriber::{fmt, layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

const DEFAULT_FILTER: &str = "info,foreatown=debug,tower_http=debug,sqlx=warn";
const LOG_FILE_PREFIX: &str = "foreatown.log";

/// 로깅 시스템을 초기화합니다.
///
/// - `RUST_LOG`: 필터 (기본값 `info,foreatown=debug,tower_http=debug,sqlx=warn`)
/// - `LOG_DIR`: 파일 로그 디렉토리 (기본값 `logs`, 파일명 `foreatown.log.YYYY-MM-DD`)
///
/// 반환되는 `WorkerGuard`는 main에서 들고 있어야 종료 시 버퍼가 flush됩니다.
pub fn init_logging() -> WorkerGuard {
    let log_dir = std::env::var("LOG_DIR").unwrap_or_else(|_| "logs".to_string());
    let (file_writer, guard) = tracing_appender::non_blocking(rolling::daily(&log_dir, LOG_FILE_PREFIX));

    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(DEFAULT_FILTER));

    let stdout_layer = fmt::layer()
        .json()
        .with_timer(fmt::time::UtcTime::rfc_3339())
        .with_current_span(true);

    let file_layer = fmt::layer()
        .json()
        .with_timer(fmt::time::UtcTime::rfc_3339())
        .with_current_span(true)
        .with_ansi(false)
        .with_writer(file_writer);

    if let Err(err) = tracing_subscriber::registry()
        .with(filter)
        .with(stdout_layer)
        .with(file_layer)
        .try_init()
    {
        // 테스트 등에서 이미 구독자가 설정된 경우
        eprintln!("tracing subscriber was not installed: {}", err);
    }

    guard
}
