//! Route definitions for the `/users` resource.

use axum::routing::{get, post};
use axum::Router;

use crate::handlers::users;
use crate::state::AppState;

/// Routes mounted at `/users`.
///
/// ```text
/// GET  /me           -> me (scope: me)
/// POST /             -> register (scope: register)
/// POST /{id}/scopes  -> grant_scope (scope: register)
/// ```
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/me", get(users::me))
        .route("/", post(users::register))
        .route("/{id}/scopes", post(users::grant_scope))
}
