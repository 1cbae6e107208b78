//! Route definitions for the `/p2p-requests` resource.

use axum::routing::{get, post};
use axum::Router;

use crate::handlers::p2p_requests;
use crate::state::AppState;

/// Routes mounted at `/p2p-requests`. All require the `p2p_request` scope.
///
/// ```text
/// POST /                  -> submit
/// GET  /                  -> list own submissions
/// GET  /review            -> claim the oldest eligible request
/// POST /review/complete   -> finish the in-progress review
/// ```
pub fn router() -> Router<AppState> {
    Router::new()
        .route(
            "/",
            post(p2p_requests::submit).get(p2p_requests::list),
        )
        .route("/review", get(p2p_requests::start_review))
        .route("/review/complete", post(p2p_requests::complete_review))
}
