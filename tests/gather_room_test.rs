//! 모임방 API 통합 테스트
//!
//! `/gather-rooms/` 생성, 조회, 수정, 삭제를 실제 라우터와 in-memory DB로 검증합니다.

mod common;

use axum::http::{Method, StatusCode};
use serde_json::{json, Value};

use common::*;

fn with_override(
    base: Vec<(&'static str, &'static str)>,
    key: &'static str,
    value: &'static str,
) -> Vec<(&'static str, &'static str)> {
    base.into_iter()
        .map(|(k, v)| if k == key { (k, value) } else { (k, v) })
        .collect()
}

async fn create_room(app: &TestApp, auth: &str, fields: &[(&str, &str)], files: &[(&str, &str)]) -> Value {
    let response = send(
        &app.router,
        multipart_request(Method::POST, "/gather-rooms/", Some(auth), fields, files),
    )
    .await;
    assert_eq!(response.status(), StatusCode::CREATED);
    body_json(response).await
}

#[tokio::test]
async fn should_create_hiring_room_and_return_same_record_on_retrieve() {
    // Arrange
    let app = setup().await;
    let owner = create_user(&app.db, "owner@test.com", "owner").await;
    let auth = bearer(owner.id);

    // Act
    let created = create_room(
        &app,
        &auth,
        &hiring_room_fields(),
        &[("gather_room_images[]", "a.png"), ("gather_room_images[]", "b.png")],
    )
    .await;
    let id = created["id"].as_i64().unwrap();
    let fetched = send(
        &app.router,
        empty_request(Method::GET, &format!("/gather-rooms/{}/", id), None),
    )
    .await;

    // Assert
    assert_eq!(created["gather_room_category"]["name"], "Hiring");
    assert_eq!(created["is_online"], false);
    assert_eq!(created["creator"]["id"], owner.id);
    assert_eq!(created["gather_room_images"].as_array().unwrap().len(), 2);
    assert_eq!(fetched.status(), StatusCode::OK);
    assert_eq!(body_json(fetched).await, created);
}

#[tokio::test]
async fn should_store_null_url_when_upload_fails() {
    let app = setup().await;
    let owner = create_user(&app.db, "owner@test.com", "owner").await;

    let created = create_room(
        &app,
        &bearer(owner.id),
        &hiring_room_fields(),
        &[("gather_room_images", "ok.png"), ("gather_room_images", "broken.png")],
    )
    .await;

    let images = created["gather_room_images"].as_array().unwrap();
    assert_eq!(images.len(), 2);
    assert_eq!(images[0]["img_url"], "https://cdn.test/freeok.png");
    assert_eq!(images[1]["img_url"], Value::Null);
}

#[tokio::test]
async fn should_require_address_for_offline_room() {
    // Arrange
    let app = setup().await;
    let owner = create_user(&app.db, "owner@test.com", "owner").await;
    let fields = with_override(hiring_room_fields(), "address", "");

    // Act
    let response = send(
        &app.router,
        multipart_request(Method::POST, "/gather-rooms/", Some(&bearer(owner.id)), &fields, &[]),
    )
    .await;

    // Assert
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    let body = body_json(response).await;
    assert!(body["message"].as_str().unwrap().contains("address"));
}

#[tokio::test]
async fn should_allow_online_room_without_address() {
    let app = setup().await;
    let owner = create_user(&app.db, "owner@test.com", "owner").await;
    let fields = with_override(
        with_override(
            with_override(hiring_room_fields(), "address", ""),
            "is_online",
            "True",
        ),
        "gather_room_category",
        "Study",
    );

    let created = create_room(&app, &bearer(owner.id), &fields, &[]).await;

    assert_eq!(created["is_online"], true);
    assert_eq!(created["address"], Value::Null);
    assert_eq!(created["gather_room_category"]["name"], "Study");
}

#[tokio::test]
async fn should_treat_hiring_as_offline_even_when_online_flag_set() {
    let app = setup().await;
    let owner = create_user(&app.db, "owner@test.com", "owner").await;
    let fields = with_override(
        with_override(hiring_room_fields(), "address", ""),
        "is_online",
        "True",
    );

    let response = send(
        &app.router,
        multipart_request(Method::POST, "/gather-rooms/", Some(&bearer(owner.id)), &fields, &[]),
    )
    .await;

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn should_reject_anonymous_create() {
    let app = setup().await;

    let response = send(
        &app.router,
        multipart_request(Method::POST, "/gather-rooms/", None, &hiring_room_fields(), &[]),
    )
    .await;

    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
}

#[tokio::test]
async fn should_hide_room_from_non_owner_update_and_delete() {
    // Arrange
    let app = setup().await;
    let owner = create_user(&app.db, "owner@test.com", "owner").await;
    let stranger = create_user(&app.db, "stranger@test.com", "stranger").await;
    let created = create_room(&app, &bearer(owner.id), &hiring_room_fields(), &[]).await;
    let uri = format!("/gather-rooms/{}/", created["id"]);

    // Act
    let patch = send(
        &app.router,
        multipart_request(
            Method::PATCH,
            &uri,
            Some(&bearer(stranger.id)),
            &[("subject", "가로채기")],
            &[],
        ),
    )
    .await;
    let delete = send(
        &app.router,
        empty_request(Method::DELETE, &uri, Some(&bearer(stranger.id))),
    )
    .await;

    // Assert
    assert_eq!(patch.status(), StatusCode::NOT_FOUND);
    assert_eq!(delete.status(), StatusCode::NOT_FOUND);
    let still_there = send(&app.router, empty_request(Method::GET, &uri, None)).await;
    assert_eq!(body_json(still_there).await["subject"], "백엔드 개발자 구합니다");
}

#[tokio::test]
async fn should_merge_partial_update_over_stored_record() {
    // Arrange
    let app = setup().await;
    let owner = create_user(&app.db, "owner@test.com", "owner").await;
    let auth = bearer(owner.id);
    let created = create_room(&app, &auth, &hiring_room_fields(), &[("gather_room_images", "a.png")]).await;
    let uri = format!("/gather-rooms/{}/", created["id"]);

    // Act
    let response = send(
        &app.router,
        multipart_request(Method::PATCH, &uri, Some(&auth), &[("user_limit", "10")], &[]),
    )
    .await;

    // Assert
    assert_eq!(response.status(), StatusCode::OK);
    let updated = body_json(response).await;
    assert_eq!(updated["user_limit"], 10);
    assert_eq!(updated["subject"], created["subject"]);
    assert_eq!(updated["address"], created["address"]);
    assert_eq!(updated["gather_room_images"], created["gather_room_images"]);
}

#[tokio::test]
async fn should_apply_same_schema_on_update_as_on_create() {
    let app = setup().await;
    let owner = create_user(&app.db, "owner@test.com", "owner").await;
    let auth = bearer(owner.id);
    let created = create_room(&app, &auth, &hiring_room_fields(), &[]).await;
    let uri = format!("/gather-rooms/{}/", created["id"]);

    // 오프라인 모임의 주소를 지우면 생성 때와 같은 이유로 거절됩니다.
    let response = send(
        &app.router,
        multipart_request(Method::PATCH, &uri, Some(&auth), &[("address", " ")], &[]),
    )
    .await;

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn should_delete_room_with_its_reservations() {
    // Arrange
    let app = setup().await;
    let owner = create_user(&app.db, "owner@test.com", "owner").await;
    let guest = create_user(&app.db, "guest@test.com", "guest").await;
    let created = create_room(&app, &bearer(owner.id), &hiring_room_fields(), &[]).await;
    let reserved = send(
        &app.router,
        json_request(
            Method::POST,
            "/gather-room-reservations/",
            Some(&bearer(guest.id)),
            json!({ "gather_room_id": created["id"] }),
        ),
    )
    .await;
    assert_eq!(reserved.status(), StatusCode::CREATED);
    let uri = format!("/gather-rooms/{}/", created["id"]);

    // Act
    let deleted = send(
        &app.router,
        empty_request(Method::DELETE, &uri, Some(&bearer(owner.id))),
    )
    .await;

    // Assert
    assert_eq!(deleted.status(), StatusCode::NO_CONTENT);
    let gone = send(&app.router, empty_request(Method::GET, &uri, None)).await;
    assert_eq!(gone.status(), StatusCode::NOT_FOUND);
    let reservations = send(
        &app.router,
        empty_request(Method::GET, "/gather-room-reservations/", Some(&bearer(guest.id))),
    )
    .await;
    assert_eq!(body_json(reservations).await, json!([]));
}

#[tokio::test]
async fn should_filter_list_by_category_and_creator() {
    // Arrange
    let app = setup().await;
    let alice = create_user(&app.db, "alice@test.com", "alice").await;
    let bob = create_user(&app.db, "bob@test.com", "bob").await;
    let hiring = create_room(&app, &bearer(alice.id), &hiring_room_fields(), &[]).await;
    let study_fields = with_override(hiring_room_fields(), "gather_room_category", "Study");
    create_room(&app, &bearer(bob.id), &study_fields, &[]).await;

    // Act
    let by_category = send(
        &app.router,
        empty_request(
            Method::GET,
            &format!("/gather-rooms/?category={}", hiring["gather_room_category"]["id"]),
            None,
        ),
    )
    .await;
    let by_creator = send(
        &app.router,
        empty_request(Method::GET, &format!("/users/{}/gather-rooms/", bob.id), None),
    )
    .await;
    let all = send(&app.router, empty_request(Method::GET, "/gather-rooms/", None)).await;

    // Assert
    let by_category = body_json(by_category).await;
    assert_eq!(by_category.as_array().unwrap().len(), 1);
    assert_eq!(by_category[0]["id"], hiring["id"]);
    let by_creator = body_json(by_creator).await;
    assert_eq!(by_creator.as_array().unwrap().len(), 1);
    assert_eq!(by_creator[0]["creator_id"], bob.id);
    assert_eq!(body_json(all).await.as_array().unwrap().len(), 2);
}

#[tokio::test]
async fn should_collapse_errors_to_legacy_shape_in_compat_mode() {
    // Arrange
    let app = setup_with(TestOptions {
        error_compat_mode: true,
        ..Default::default()
    })
    .await;

    // Act
    let missing = send(
        &app.router,
        empty_request(Method::GET, "/gather-rooms/9999/", None),
    )
    .await;
    let anonymous = send(
        &app.router,
        multipart_request(Method::POST, "/gather-rooms/", None, &hiring_room_fields(), &[]),
    )
    .await;

    // Assert
    assert_eq!(missing.status(), StatusCode::BAD_REQUEST);
    assert_eq!(
        body_json(missing).await,
        json!({ "ERROR_MESSAGE": ["존재하지 않는 모임방입니다."] })
    );
    assert_eq!(anonymous.status(), StatusCode::BAD_REQUEST);
    assert!(body_json(anonymous).await["ERROR_MESSAGE"].is_array());
}
