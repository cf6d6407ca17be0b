//! 사용자 API 통합 테스트
//!
//! GET /users/<id>/, GET|PATCH|DELETE /users/me/, GET /countries/

mod common;

use axum::http::{header, Method, StatusCode};
use serde_json::json;

use common::*;

#[tokio::test]
async fn should_read_active_user_anonymously() {
    let app = setup().await;
    let user = create_user(&app.db, "reader@test.com", "reader").await;

    let response = send(
        &app.router,
        empty_request(Method::GET, &format!("/users/{}/", user.id), None),
    )
    .await;

    assert_eq!(response.status(), StatusCode::OK);
    let body = body_json(response).await;
    assert_eq!(body["name"], "reader");
    assert!(body.get("password").is_none());
}

#[tokio::test]
async fn should_update_profile_with_lookup_names_and_photo() {
    // Arrange
    let app = setup().await;
    let user = create_user(&app.db, "me@test.com", "me").await;
    let auth = bearer(user.id);

    // Act
    let response = send(
        &app.router,
        multipart_request(
            Method::PATCH,
            "/users/me/",
            Some(&auth),
            &[
                ("nickname", "모임왕"),
                ("age", "29"),
                ("birthday", "1997-05-01"),
                ("is_male", "false"),
                ("country", "Korea"),
                ("personality_type", "ENFP"),
            ],
            &[("profile_image", "me.png")],
        ),
    )
    .await;

    // Assert
    assert_eq!(response.status(), StatusCode::OK);
    let body = body_json(response).await;
    assert_eq!(body["nickname"], "모임왕");
    assert_eq!(body["age"], 29);
    assert_eq!(body["birthday"], "1997-05-01");
    assert_eq!(body["is_male"], false);
    assert_eq!(body["country"], "Korea");
    assert_eq!(body["personality_type"], "ENFP");
    assert_eq!(body["profile_img_url"], "https://cdn.test/freeme.png");
}

#[tokio::test]
async fn should_store_null_photo_when_profile_upload_fails() {
    let app = setup().await;
    let user = create_user(&app.db, "me@test.com", "me").await;

    let response = send(
        &app.router,
        multipart_request(
            Method::PATCH,
            "/users/me/",
            Some(&bearer(user.id)),
            &[("location", "Seoul")],
            &[("profile_image", "broken.png")],
        ),
    )
    .await;

    assert_eq!(response.status(), StatusCode::OK);
    let body = body_json(response).await;
    assert_eq!(body["location"], "Seoul");
    assert_eq!(body["profile_img_url"], serde_json::Value::Null);
}

#[tokio::test]
async fn should_reject_invalid_birthday() {
    let app = setup().await;
    let user = create_user(&app.db, "me@test.com", "me").await;

    let response = send(
        &app.router,
        multipart_request(
            Method::PATCH,
            "/users/me/",
            Some(&bearer(user.id)),
            &[("birthday", "yesterday")],
            &[],
        ),
    )
    .await;

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn should_withdraw_and_hide_user() {
    // Arrange
    let app = setup().await;
    let user = create_user(&app.db, "bye@test.com", "bye").await;
    let auth = bearer(user.id);

    // Act
    let response = send(&app.router, empty_request(Method::DELETE, "/users/me/", Some(&auth))).await;

    // Assert
    assert_eq!(response.status(), StatusCode::NO_CONTENT);
    let cleared: Vec<&str> = response
        .headers()
        .get_all(header::SET_COOKIE)
        .iter()
        .filter_map(|v| v.to_str().ok())
        .collect();
    assert!(cleared.iter().all(|c| c.contains("Max-Age=0")));
    assert_eq!(cleared.len(), 2);

    let read = send(
        &app.router,
        empty_request(Method::GET, &format!("/users/{}/", user.id), None),
    )
    .await;
    assert_eq!(read.status(), StatusCode::NOT_FOUND);
    let me = send(&app.router, empty_request(Method::GET, "/users/me/", Some(&auth))).await;
    assert_eq!(me.status(), StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn should_block_login_after_withdraw() {
    let app = setup().await;
    let signup = send(
        &app.router,
        json_request(
            Method::POST,
            "/users/signup/",
            None,
            json!({ "email": "gone@test.com", "password": "password123", "name": "gone" }),
        ),
    )
    .await;
    let token = body_json(signup).await["access_token"]
        .as_str()
        .unwrap()
        .to_string();
    send(
        &app.router,
        empty_request(Method::DELETE, "/users/me/", Some(&format!("Bearer {}", token))),
    )
    .await;

    let login = send(
        &app.router,
        json_request(
            Method::POST,
            "/users/login/",
            None,
            json!({ "email": "gone@test.com", "password": "password123" }),
        ),
    )
    .await;

    assert_eq!(login.status(), StatusCode::UNAUTHORIZED);
}

#[tokio::test]
async fn should_reject_writes_with_token_of_withdrawn_user() {
    // Arrange
    let app = setup().await;
    let owner = create_user(&app.db, "host@test.com", "host").await;
    let leaver = create_user(&app.db, "leaver@test.com", "leaver").await;
    let room = send(
        &app.router,
        multipart_request(
            Method::POST,
            "/gather-rooms/",
            Some(&bearer(owner.id)),
            &hiring_room_fields(),
            &[],
        ),
    )
    .await;
    let room_id = body_json(room).await["id"].as_i64().unwrap();
    let auth = bearer(leaver.id);
    let withdraw = send(&app.router, empty_request(Method::DELETE, "/users/me/", Some(&auth))).await;
    assert_eq!(withdraw.status(), StatusCode::NO_CONTENT);

    // Act
    let create_room = send(
        &app.router,
        multipart_request(Method::POST, "/gather-rooms/", Some(&auth), &hiring_room_fields(), &[]),
    )
    .await;
    let reserve = send(
        &app.router,
        json_request(
            Method::POST,
            "/gather-room-reservations/",
            Some(&auth),
            json!({ "gather_room_id": room_id }),
        ),
    )
    .await;
    let review = send(
        &app.router,
        json_request(
            Method::POST,
            "/gather-room-reviews/",
            Some(&auth),
            json!({ "content": "좋았어요", "rating": 4.0, "gather_room_id": room_id }),
        ),
    )
    .await;

    // Assert
    assert_eq!(create_room.status(), StatusCode::UNAUTHORIZED);
    assert_eq!(reserve.status(), StatusCode::UNAUTHORIZED);
    assert_eq!(review.status(), StatusCode::UNAUTHORIZED);
    let listed = send(
        &app.router,
        empty_request(Method::GET, &format!("/users/{}/gather-rooms/", leaver.id), None),
    )
    .await;
    assert_eq!(body_json(listed).await, json!([]));
}

#[tokio::test]
async fn should_search_countries_created_by_profile_updates() {
    // Arrange
    let app = setup().await;
    for (email, country) in [("a@test.com", "South Korea"), ("b@test.com", "Japan"), ("c@test.com", "North Korea")] {
        let user = create_user(&app.db, email, email).await;
        send(
            &app.router,
            multipart_request(
                Method::PATCH,
                "/users/me/",
                Some(&bearer(user.id)),
                &[("country", country)],
                &[],
            ),
        )
        .await;
    }

    // Act
    let filtered = send(&app.router, empty_request(Method::GET, "/countries/?name=korea", None)).await;
    let all = send(&app.router, empty_request(Method::GET, "/countries/", None)).await;

    // Assert
    assert_eq!(
        body_json(filtered).await,
        json!([{ "name": "North Korea" }, { "name": "South Korea" }])
    );
    assert_eq!(body_json(all).await.as_array().unwrap().len(), 3);
}

#[tokio::test]
async fn should_report_database_in_health_check() {
    let app = setup().await;

    let response = send(&app.router, empty_request(Method::GET, "/health", None)).await;

    assert_eq!(response.status(), StatusCode::OK);
    let body = body_json(response).await;
    assert_eq!(body["status"], "healthy");
    assert_eq!(body["database"]["reachable"], true);
}
