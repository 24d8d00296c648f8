//! HTTP-level integration tests for the `/preferences` resource.

mod common;

use axum::http::StatusCode;
use common::{
    body_json, delete_auth, get_auth, patch_json_auth, post_json_auth, register_user,
};
use sqlx::PgPool;

async fn two_users(app: axum::Router) -> (String, String, String, String) {
    let alice = register_user(app.clone(), "alice", "pw1").await;
    let bob = register_user(app, "bob", "pw2").await;
    (
        alice["access_token"].as_str().unwrap().to_string(),
        alice["user"]["id"].as_str().unwrap().to_string(),
        bob["access_token"].as_str().unwrap().to_string(),
        bob["user"]["id"].as_str().unwrap().to_string(),
    )
}

/// Create a preference and return its JSON representation.
async fn create_preference(
    app: axum::Router,
    token: &str,
    user_id: &str,
    key: &str,
    value: &str,
) -> serde_json::Value {
    let body = serde_json::json!({ "user_id": user_id, "key": key, "value": value });
    let response = post_json_auth(app, "/api/v1/preferences", token, body).await;
    assert_eq!(response.status(), StatusCode::CREATED);
    body_json(response).await["data"].clone()
}

/// The preference key is unique per user, not globally.
#[sqlx::test(migrations = "../db/migrations")]
async fn test_key_unique_per_user(pool: PgPool) {
    let app = common::build_test_app(pool);
    let (token_a, id_a, token_b, id_b) = two_users(app.clone()).await;

    create_preference(app.clone(), &token_a, &id_a, "theme", "dark").await;

    // Same user, same key: conflict.
    let body = serde_json::json!({ "user_id": id_a, "key": "theme", "value": "light" });
    let response = post_json_auth(app.clone(), "/api/v1/preferences", &token_a, body).await;
    assert_eq!(response.status(), StatusCode::CONFLICT);

    // Different user, same key: fine.
    let preference = create_preference(app, &token_b, &id_b, "theme", "light").await;
    assert_eq!(preference["value"], "light");
}

/// Creating a preference for another user is 403.
#[sqlx::test(migrations = "../db/migrations")]
async fn test_create_owner_mismatch(pool: PgPool) {
    let app = common::build_test_app(pool);
    let (token_a, _, _, id_b) = two_users(app.clone()).await;

    let body = serde_json::json!({ "user_id": id_b, "key": "theme", "value": "dark" });
    let response = post_json_auth(app, "/api/v1/preferences", &token_a, body).await;
    assert_eq!(response.status(), StatusCode::FORBIDDEN);
}

/// Listing is scoped to the caller; `?key=` fetches one row or 404s.
#[sqlx::test(migrations = "../db/migrations")]
async fn test_list_and_key_lookup(pool: PgPool) {
    let app = common::build_test_app(pool);
    let (token_a, id_a, token_b, id_b) = two_users(app.clone()).await;

    create_preference(app.clone(), &token_a, &id_a, "theme", "dark").await;
    create_preference(app.clone(), &token_a, &id_a, "units", "metric").await;
    create_preference(app.clone(), &token_b, &id_b, "theme", "light").await;

    let response = get_auth(app.clone(), "/api/v1/preferences", &token_a).await;
    let json = body_json(response).await;
    assert_eq!(json["data"].as_array().unwrap().len(), 2);

    // Key lookup resolves within the caller's scope only.
    let response = get_auth(app.clone(), "/api/v1/preferences?key=theme", &token_b).await;
    assert_eq!(response.status(), StatusCode::OK);
    let json = body_json(response).await;
    assert_eq!(json["data"]["value"], "light");

    let response = get_auth(app, "/api/v1/preferences?key=missing", &token_a).await;
    assert_eq!(response.status(), StatusCode::NOT_FOUND);
}

/// Read/update/delete apply the ownership policy; the key is immutable.
#[sqlx::test(migrations = "../db/migrations")]
async fn test_single_preference_policy(pool: PgPool) {
    let app = common::build_test_app(pool);
    let (token_a, id_a, token_b, _) = two_users(app.clone()).await;

    let preference = create_preference(app.clone(), &token_a, &id_a, "theme", "dark").await;
    let preference_id = preference["id"].as_str().unwrap();
    let path = format!("/api/v1/preferences/{preference_id}");

    assert_eq!(
        get_auth(app.clone(), &path, &token_b).await.status(),
        StatusCode::FORBIDDEN
    );

    // Value updates are allowed.
    let response = patch_json_auth(
        app.clone(),
        &path,
        &token_a,
        serde_json::json!({ "value": "light" }),
    )
    .await;
    assert_eq!(response.status(), StatusCode::OK);
    let json = body_json(response).await;
    assert_eq!(json["data"]["value"], "light");

    // Key changes are rejected outright.
    let response = patch_json_auth(
        app.clone(),
        &path,
        &token_a,
        serde_json::json!({ "key": "other", "value": "x" }),
    )
    .await;
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);

    assert_eq!(
        delete_auth(app.clone(), &path, &token_b).await.status(),
        StatusCode::FORBIDDEN
    );
    assert_eq!(
        delete_auth(app.clone(), &path, &token_a).await.status(),
        StatusCode::NO_CONTENT
    );
    assert_eq!(
        delete_auth(app, &path, &token_a).await.status(),
        StatusCode::NOT_FOUND
    );
}
