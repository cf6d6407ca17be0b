pub mod config;
pub mod domain;
pub mod global;
pub mod state;
pub mod utils;

pub use state::AppState;

use axum::{
    extract::DefaultBodyLimit,
    middleware,
    routing::{get, post},
    Router,
};
use tower_http::trace::TraceLayer;
use utoipa::{
    openapi::security::{HttpAuthScheme, HttpBuilder, SecurityScheme},
    openapi::server::Server,
    Modify, OpenApi,
};
use utoipa_swagger_ui::SwaggerUi;

use domain::{auth, country, gather_room, health, reservation, review, user};
use global::middleware::{error_compat_middleware, request_id_middleware};

#[derive(OpenApi)]
#[openapi(
    paths(
        health::handler::health_check,
        auth::handler::signup,
        auth::handler::login,
        auth::handler::refresh,
        auth::handler::kakao_login,
        user::handler::get_user,
        user::handler::get_me,
        user::handler::update_me,
        user::handler::delete_me,
        gather_room::handler::list_gather_rooms,
        gather_room::handler::list_gather_rooms_by_creator,
        gather_room::handler::retrieve_gather_room,
        gather_room::handler::create_gather_room,
        gather_room::handler::update_gather_room,
        gather_room::handler::delete_gather_room,
        reservation::handler::list_reservations,
        reservation::handler::create_reservation,
        reservation::handler::delete_reservation,
        review::handler::list_reviews,
        review::handler::create_review,
        review::handler::delete_review,
        country::handler::list_countries,
    ),
    components(
        schemas(
            utils::response::ErrorResponse,
            health::dto::HealthStatus,
            health::dto::HealthState,
            health::dto::DatabaseCheck,
            auth::dto::SignupRequest,
            auth::dto::LoginRequest,
            auth::dto::TokenRefreshRequest,
            auth::dto::KakaoLoginRequest,
            auth::credentials::CredentialResponse,
            user::dto::UserResponse,
            user::dto::UpdateProfileForm,
            user::entity::user::SocialProvider,
            gather_room::schema::RawGatherRoomForm,
            gather_room::dto::GatherRoomSummary,
            gather_room::dto::GatherRoomDetail,
            gather_room::dto::CategoryResponse,
            gather_room::dto::CreatorResponse,
            gather_room::dto::GatherRoomImageResponse,
            reservation::dto::CreateReservationRequest,
            reservation::dto::ReservationResponse,
            reservation::dto::ReservedGatherRoom,
            review::dto::CreateReviewRequest,
            review::dto::ReviewResponse,
            review::dto::ReviewerResponse,
            country::dto::CountryResponse,
        )
    ),
    modifiers(&SecurityAddon),
    tags(
        (name = "Health", description = "헬스체크"),
        (name = "Auth", description = "회원가입/로그인/카카오 로그인"),
        (name = "User", description = "사용자 프로필"),
        (name = "GatherRoom", description = "모임방"),
        (name = "Reservation", description = "모임방 예약"),
        (name = "Review", description = "모임방 리뷰"),
        (name = "Country", description = "국가 검색")
    )
)]
pub struct ApiDoc;

struct SecurityAddon;

impl Modify for SecurityAddon {
    fn modify(&self, openapi: &mut utoipa::openapi::OpenApi) {
        if let Some(components) = openapi.components.as_mut() {
            components.add_security_scheme(
                "bearer_auth",
                SecurityScheme::Http(
                    HttpBuilder::new()
                        .scheme(HttpAuthScheme::Bearer)
                        .bearer_format("JWT")
                        .build(),
                ),
            );
        }
    }
}

pub fn app(state: AppState) -> Router {
    let mut openapi = ApiDoc::openapi();
    openapi.servers = Some(vec![Server::new(state.config.service_base_url.clone())]);

    let api = Router::new()
        .route("/health", get(health::health_check))
        // 인증
        .route("/users/signup/", post(auth::handler::signup))
        .route("/users/login/", post(auth::handler::login))
        .route("/users/token/refresh/", post(auth::handler::refresh))
        .route("/users/kakao/login/", post(auth::handler::kakao_login))
        // 사용자
        .route(
            "/users/me/",
            get(user::handler::get_me)
                .patch(user::handler::update_me)
                .delete(user::handler::delete_me),
        )
        .route("/users/:id/", get(user::handler::get_user))
        .route(
            "/users/:id/gather-rooms/",
            get(gather_room::handler::list_gather_rooms_by_creator),
        )
        // 모임방
        .route(
            "/gather-rooms/",
            get(gather_room::handler::list_gather_rooms)
                .post(gather_room::handler::create_gather_room),
        )
        .route(
            "/gather-rooms/:id/",
            get(gather_room::handler::retrieve_gather_room)
                .patch(gather_room::handler::update_gather_room)
                .delete(gather_room::handler::delete_gather_room),
        )
        // 예약
        .route(
            "/gather-room-reservations/",
            get(reservation::handler::list_reservations)
                .post(reservation::handler::create_reservation),
        )
        .route(
            "/gather-room-reservations/:id/",
            axum::routing::delete(reservation::handler::delete_reservation),
        )
        // 리뷰
        .route(
            "/gather-room-reviews/",
            get(review::handler::list_reviews).post(review::handler::create_review),
        )
        .route(
            "/gather-room-reviews/:id/",
            axum::routing::delete(review::handler::delete_review),
        )
        .route("/countries/", get(country::handler::list_countries))
        .layer(DefaultBodyLimit::max(state.config.max_upload_bytes))
        .layer(middleware::from_fn_with_state(
            state.clone(),
            error_compat_middleware,
        ))
        .with_state(state);

    Router::new()
        .merge(SwaggerUi::new("/swagger-ui").url("/api-docs/openapi.json", openapi))
        .merge(api)
        .layer(middleware::from_fn(request_id_middleware))
        .layer(TraceLayer::new_for_http())
}
