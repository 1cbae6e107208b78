//! HTTP-level integration tests for login and the authorization gate.

mod common;

use axum::http::StatusCode;
use common::{body_json, get_auth, post_json, TEST_PASSWORD};
use sqlx::PgPool;

use peerhub_db::repositories::UserRepo;

/// Successful login returns 200 with an access token and expiry.
#[sqlx::test(migrations = "../../migrations")]
async fn test_login_success(pool: PgPool) {
    common::create_test_user(&pool, "loginuser", 1001, &["me"]).await;
    let app = common::build_test_app(pool);

    let body = serde_json::json!({
        "username": "loginuser",
        "password": TEST_PASSWORD,
        "scopes": ["me"],
    });
    let response = post_json(&app, "/api/v1/auth/login", body).await;

    assert_eq!(response.status(), StatusCode::OK);
    let json = body_json(response).await;
    assert!(
        json["access_token"].is_string(),
        "response must contain access_token"
    );
    assert_eq!(json["token_type"], "bearer");
    assert!(json["expires_in"].is_number(), "response must contain expires_in");
}

/// Login with an incorrect password returns 401.
#[sqlx::test(migrations = "../../migrations")]
async fn test_login_wrong_password(pool: PgPool) {
    common::create_test_user(&pool, "wrongpw", 1002, &["me"]).await;
    let app = common::build_test_app(pool);

    let body = serde_json::json!({
        "username": "wrongpw",
        "password": "incorrect_password",
        "scopes": ["me"],
    });
    let response = post_json(&app, "/api/v1/auth/login", body).await;

    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
}

/// Login with a nonexistent username returns 401.
#[sqlx::test(migrations = "../../migrations")]
async fn test_login_nonexistent_user(pool: PgPool) {
    let app = common::build_test_app(pool);

    let body = serde_json::json!({
        "username": "ghost",
        "password": "whatever",
        "scopes": [],
    });
    let response = post_json(&app, "/api/v1/auth/login", body).await;

    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
}

/// Login to a deactivated account returns 403.
#[sqlx::test(migrations = "../../migrations")]
async fn test_login_inactive_user(pool: PgPool) {
    let user = common::create_test_user(&pool, "inactive", 1003, &["me"]).await;
    UserRepo::deactivate(&pool, user.id)
        .await
        .expect("deactivation should succeed");

    let app = common::build_test_app(pool);

    let body = serde_json::json!({
        "username": "inactive",
        "password": TEST_PASSWORD,
        "scopes": ["me"],
    });
    let response = post_json(&app, "/api/v1/auth/login", body).await;

    assert_eq!(response.status(), StatusCode::FORBIDDEN);
}

/// Requesting a scope outside the registry rejects the login with 401.
#[sqlx::test(migrations = "../../migrations")]
async fn test_login_unregistered_scope(pool: PgPool) {
    common::create_test_user(&pool, "scopeless", 1004, &["me"]).await;
    let app = common::build_test_app(pool);

    let body = serde_json::json!({
        "username": "scopeless",
        "password": TEST_PASSWORD,
        "scopes": ["not_a_real_scope"],
    });
    let response = post_json(&app, "/api/v1/auth/login", body).await;

    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
    let json = body_json(response).await;
    assert!(
        json["error"].as_str().unwrap_or("").contains("Incorrect scope"),
        "error should name the scope problem"
    );
}

/// Requesting a registered scope the user does not hold rejects the login.
#[sqlx::test(migrations = "../../migrations")]
async fn test_login_ungranted_scope(pool: PgPool) {
    common::create_test_user(&pool, "undergranted", 1005, &["me"]).await;
    let app = common::build_test_app(pool);

    let body = serde_json::json!({
        "username": "undergranted",
        "password": TEST_PASSWORD,
        "scopes": ["me", "register"],
    });
    let response = post_json(&app, "/api/v1/auth/login", body).await;

    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
}

/// Protected endpoints require a token -- missing or garbage tokens are 401.
#[sqlx::test(migrations = "../../migrations")]
async fn test_protected_endpoint_requires_token(pool: PgPool) {
    let app = common::build_test_app(pool);

    let response = common::get(&app, "/api/v1/users/me").await;
    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);

    let response = get_auth(&app, "/api/v1/users/me", "garbage-token").await;
    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
}

/// A valid token without the route's scope is 403, not 401.
#[sqlx::test(migrations = "../../migrations")]
async fn test_scope_gate_rejects_missing_scope(pool: PgPool) {
    common::create_test_user(&pool, "gated", 1006, &["me", "p2p_request"]).await;
    let app = common::build_test_app(pool.clone());

    // The session only asked for `me`, so p2p routes must refuse it even
    // though the user holds the grant.
    let token = common::login(&app, "gated", &["me"]).await;

    let response = get_auth(&app, "/api/v1/p2p-requests", &token).await;
    assert_eq!(response.status(), StatusCode::FORBIDDEN);
}

/// A token issued before deactivation stops working afterwards.
#[sqlx::test(migrations = "../../migrations")]
async fn test_deactivated_user_token_is_rejected(pool: PgPool) {
    let user = common::create_test_user(&pool, "revoked", 1007, &["me"]).await;
    let app = common::build_test_app(pool.clone());

    let token = common::login(&app, "revoked", &["me"]).await;

    UserRepo::deactivate(&pool, user.id)
        .await
        .expect("deactivation should succeed");

    let response = get_auth(&app, "/api/v1/users/me", &token).await;
    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
}
