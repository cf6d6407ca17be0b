use axum::{
    extract::{Request, State},
    http::{HeaderValue, StatusCode},
    middleware::Next,
    response::{IntoResponse, Response},
    Json,
};
use tracing::{debug, info, Instrument};
use uuid::Uuid;

use crate::state::AppState;
use crate::utils::error::ErrorMessage;
use crate::utils::response::legacy_error_body;

pub const REQUEST_ID_HEADER: &str = "x-request-id";

#[derive(Clone, Debug)]
pub struct RequestId(pub String);

/// 요청마다 ID를 붙이고 처리 시간을 남깁니다.
pub async fn request_id_middleware(mut request: Request, next: Next) -> Response {
    let request_id = request
        .headers()
        .get(REQUEST_ID_HEADER)
        .and_then(|v| v.to_str().ok())
        .map(String::from)
        .unwrap_or_else(|| Uuid::new_v4().to_string());

    request
        .extensions_mut()
        .insert(RequestId(request_id.clone()));

    let method = request.method().to_string();
    let path = request.uri().path().to_string();
    let span = tracing::info_span!(
        "request",
        request_id = %request_id,
        method = %method,
        uri = %path,
    );
    let start = std::time::Instant::now();

    async move {
        let mut response = next.run(request).await;

        info!(
            duration_ms = start.elapsed().as_millis() as u64,
            status = response.status().as_u16(),
            "request completed"
        );

        response.headers_mut().insert(
            REQUEST_ID_HEADER,
            HeaderValue::from_str(&request_id)
                .unwrap_or_else(|_| HeaderValue::from_static("unknown")),
        );
        response
    }
    .instrument(span)
    .await
}

/// 호환 모드: 모든 실패 응답을 `400 {"ERROR_MESSAGE": [..]}`로 바꿉니다.
///
/// 메시지는 `AppError`가 남긴 `ErrorMessage`를 쓰고, 라우터가 직접 만든
/// 404/405 같은 응답은 상태 코드의 표준 문구를 씁니다.
pub async fn error_compat_middleware(
    State(state): State<AppState>,
    request: Request,
    next: Next,
) -> Response {
    let response = next.run(request).await;
    if !state.config.error_compat_mode {
        return response;
    }
    rewrite_error(response)
}

pub fn rewrite_error(response: Response) -> Response {
    let status = response.status();
    if !(status.is_client_error() || status.is_server_error()) {
        return response;
    }

    let message = response
        .extensions()
        .get::<ErrorMessage>()
        .map(|m| m.0.clone())
        .or_else(|| status.canonical_reason().map(str::to_string))
        .unwrap_or_else(|| "요청을 처리할 수 없습니다.".to_string());

    debug!(original_status = status.as_u16(), "error rewritten for compat mode");
    (StatusCode::BAD_REQUEST, Json(legacy_error_body(&message))).into_response()
}
