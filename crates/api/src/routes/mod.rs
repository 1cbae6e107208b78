pub mod auth;
pub mod health;
pub mod p2p_requests;
pub mod users;

use axum::Router;

use crate::state::AppState;

/// Build the `/api/v1` route tree.
///
/// Route hierarchy:
///
/// ```text
/// /auth/login                        login (public)
///
/// /users/me                          profile (scope: me)
/// /users                             register (scope: register)
/// /users/{id}/scopes                 grant scope (scope: register)
///
/// /p2p-requests                      submit, list own (scope: p2p_request)
/// /p2p-requests/review               claim oldest eligible (scope: p2p_request)
/// /p2p-requests/review/complete      finish in-progress review (scope: p2p_request)
/// ```
pub fn api_routes() -> Router<AppState> {
    Router::new()
        .nest("/auth", auth::router())
        .nest("/users", users::router())
        .nest("/p2p-requests", p2p_requests::router())
}
