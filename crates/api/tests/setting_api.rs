//! HTTP-level integration tests for the `/settings` resource and the
//! public `/status` probe.

mod common;

use axum::http::StatusCode;
use common::{
    body_json, delete_auth, get, get_auth, patch_json_auth, post_json_auth, register_user,
};
use sqlx::PgPool;

/// Register the admin (first user) and a regular user; return their
/// access tokens.
async fn admin_and_user(app: axum::Router) -> (String, String) {
    let admin = register_user(app.clone(), "admin", "pw1").await;
    let user = register_user(app, "user", "pw2").await;
    (
        admin["access_token"].as_str().unwrap().to_string(),
        user["access_token"].as_str().unwrap().to_string(),
    )
}

/// Mutations are admin-gated; reads only need authentication.
#[sqlx::test(migrations = "../db/migrations")]
async fn test_settings_admin_gate(pool: PgPool) {
    let app = common::build_test_app(pool);
    let (admin_token, user_token) = admin_and_user(app.clone()).await;

    let body = serde_json::json!({ "key": "registration", "value": "true" });
    let response = post_json_auth(app.clone(), "/api/v1/settings", &user_token, body.clone()).await;
    assert_eq!(response.status(), StatusCode::FORBIDDEN);

    let response = post_json_auth(app.clone(), "/api/v1/settings", &admin_token, body).await;
    assert_eq!(response.status(), StatusCode::CREATED);
    let setting = body_json(response).await["data"].clone();
    let setting_id = setting["id"].as_str().unwrap();
    let path = format!("/api/v1/settings/{setting_id}");

    // Reads work for any authenticated user, not just admins.
    let response = get_auth(app.clone(), "/api/v1/settings", &user_token).await;
    assert_eq!(response.status(), StatusCode::OK);
    let json = body_json(response).await;
    assert_eq!(json["data"][0]["key"], "registration");

    let response = get_auth(app.clone(), &path, &user_token).await;
    assert_eq!(response.status(), StatusCode::OK);

    // Updates and deletes are admin-only.
    let patch = serde_json::json!({ "value": "false" });
    let response = patch_json_auth(app.clone(), &path, &user_token, patch.clone()).await;
    assert_eq!(response.status(), StatusCode::FORBIDDEN);

    let response = patch_json_auth(app.clone(), &path, &admin_token, patch).await;
    assert_eq!(response.status(), StatusCode::OK);
    let json = body_json(response).await;
    assert_eq!(json["data"]["value"], "false");

    let response = delete_auth(app.clone(), &path, &user_token).await;
    assert_eq!(response.status(), StatusCode::FORBIDDEN);

    let response = delete_auth(app.clone(), &path, &admin_token).await;
    assert_eq!(response.status(), StatusCode::NO_CONTENT);

    let response = delete_auth(app, &path, &admin_token).await;
    assert_eq!(response.status(), StatusCode::NOT_FOUND);
}

/// Setting keys are globally unique.
#[sqlx::test(migrations = "../db/migrations")]
async fn test_setting_key_conflict(pool: PgPool) {
    let app = common::build_test_app(pool);
    let (admin_token, _) = admin_and_user(app.clone()).await;

    let body = serde_json::json!({ "key": "map_provider", "value": "osm" });
    let response = post_json_auth(app.clone(), "/api/v1/settings", &admin_token, body).await;
    assert_eq!(response.status(), StatusCode::CREATED);

    let body = serde_json::json!({ "key": "map_provider", "value": "other" });
    let response = post_json_auth(app, "/api/v1/settings", &admin_token, body).await;
    assert_eq!(response.status(), StatusCode::CONFLICT);
}

/// The public status probe reflects setup state and the registration
/// setting without requiring credentials.
#[sqlx::test(migrations = "../db/migrations")]
async fn test_status_probe(pool: PgPool) {
    let app = common::build_test_app(pool);

    // Fresh install: no admin, no registration setting.
    let response = get(app.clone(), "/api/v1/status").await;
    assert_eq!(response.status(), StatusCode::OK);
    let json = body_json(response).await;
    assert_eq!(json["is_setup"], false);
    assert_eq!(json["registration"], false);

    let admin = register_user(app.clone(), "admin", "pw").await;
    let admin_token = admin["access_token"].as_str().unwrap();

    let body = serde_json::json!({ "key": "registration", "value": "TRUE" });
    let response = post_json_auth(app.clone(), "/api/v1/settings", admin_token, body).await;
    assert_eq!(response.status(), StatusCode::CREATED);

    let response = get(app, "/api/v1/status").await;
    let json = body_json(response).await;
    assert_eq!(json["is_setup"], true);
    // The value comparison is case-insensitive.
    assert_eq!(json["registration"], true);
}
