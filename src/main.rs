use std::net::SocketAddr;
use std::sync::Arc;

use foreatown::config::{establish_connection, AppConfig};
use foreatown::domain::auth::HttpKakaoClient;
use foreatown::domain::health::init_start_time;
use foreatown::utils::logging::init_logging;
use foreatown::utils::storage::S3Storage;
use foreatown::{app, AppState};

#[tokio::main]
async fn main() {
    // 1. 환경변수 로드
    dotenvy::dotenv().ok();

    // 2. 로깅 초기화 (guard는 종료 시까지 유지)
    let _guard = init_logging();
    init_start_time();

    // 3. 설정
    let config = match AppConfig::from_env() {
        Ok(config) => config,
        Err(e) => {
            tracing::error!("설정을 읽을 수 없습니다: {}", e);
            std::process::exit(1);
        }
    };

    // 4. 데이터베이스
    let db = match establish_connection(&config.database_url).await {
        Ok(db) => db,
        Err(e) => {
            tracing::error!("데이터베이스 연결 실패: {}", e);
            std::process::exit(1);
        }
    };

    // 5. 외부 연동 (스토리지, 카카오)
    let storage = Arc::new(S3Storage::new(&config.storage));
    let kakao = match HttpKakaoClient::new(&config.kakao) {
        Ok(client) => Arc::new(client),
        Err(e) => {
            tracing::error!("카카오 클라이언트 초기화 실패: {}", e);
            std::process::exit(1);
        }
    };

    let addr = SocketAddr::from(([0, 0, 0, 0], config.server_port));
    let state = AppState {
        db,
        config: Arc::new(config),
        storage,
        kakao,
    };

    // 6. 서버 실행
    let listener = match tokio::net::TcpListener::bind(addr).await {
        Ok(listener) => listener,
        Err(e) => {
            tracing::error!("{} 바인드 실패: {}", addr, e);
            std::process::exit(1);
        }
    };
    tracing::info!("Server listening on {}", addr);

    if let Err(e) = axum::serve(listener, app(state)).await {
        tracing::error!("서버 오류: {}", e);
    }
}
