//! Handlers for the `/p2p-requests` resource: submission, listing, and the
//! review claim/complete operations.
//!
//! "Already reviewing", "no pending requests" and "review not found" are
//! ordinary business outcomes: they serialize as tagged 200 responses, not
//! HTTP errors, so callers branch on a value instead of a status code.

use axum::extract::State;
use axum::http::StatusCode;
use axum::Json;
use serde::{Deserialize, Serialize};

use peerhub_core::error::CoreError;
use peerhub_core::types::DbId;
use peerhub_db::models::p2p_request::{CreateP2PRequest, P2PRequest};
use peerhub_db::models::p2p_review::P2PReview;
use peerhub_db::repositories::{
    CompleteReviewOutcome, P2PRequestRepo, P2PReviewRepo, StartReviewOutcome,
};

use crate::error::{AppError, AppResult};
use crate::middleware::scopes::RequireP2pRequest;
use crate::state::AppState;

/// Maximum accepted length for repository/result links and comments.
const MAX_LINK_LENGTH: usize = 2_000;
const MAX_COMMENT_LENGTH: usize = 10_000;

// ---------------------------------------------------------------------------
// Request / response types
// ---------------------------------------------------------------------------

/// Request body for `POST /p2p-requests`.
#[derive(Debug, Deserialize)]
pub struct SubmitRequest {
    pub repository_link: String,
    pub comment: String,
}

/// Request body for `POST /p2p-requests/review/complete`.
#[derive(Debug, Deserialize)]
pub struct CompleteReviewRequest {
    pub p2p_request_id: DbId,
    pub link: String,
}

/// Value result of `GET /p2p-requests/review`.
#[derive(Debug, Serialize)]
#[serde(tag = "status", rename_all = "snake_case")]
pub enum StartReviewResponse {
    /// The caller claimed this request and now has a review in progress.
    Claimed { request: P2PRequest },
    /// The caller must complete their current review first.
    AlreadyReviewing,
    /// Nothing to review right now.
    NoPendingRequests,
}

/// Value result of `POST /p2p-requests/review/complete`.
#[derive(Debug, Serialize)]
#[serde(tag = "status", rename_all = "snake_case")]
pub enum CompleteReviewResponse {
    /// The review reached its terminal state.
    Completed { review: P2PReview },
    /// The caller has no in-progress review of that request.
    ReviewNotFound,
}

// ---------------------------------------------------------------------------
// Handlers
// ---------------------------------------------------------------------------

/// POST /api/v1/p2p-requests
///
/// Submit a repository for peer review. Requires the `p2p_request` scope.
/// Duplicates are allowed; the server assigns the publication date.
pub async fn submit(
    State(state): State<AppState>,
    RequireP2pRequest(auth): RequireP2pRequest,
    Json(input): Json<SubmitRequest>,
) -> AppResult<(StatusCode, Json<P2PRequest>)> {
    validate_link(&input.repository_link)?;
    if input.comment.len() > MAX_COMMENT_LENGTH {
        return Err(AppError::Core(CoreError::Validation(format!(
            "Comment exceeds maximum length of {MAX_COMMENT_LENGTH} characters"
        ))));
    }

    let create_dto = CreateP2PRequest {
        repository_link: input.repository_link,
        comment: input.comment,
        creator_id: auth.user_id,
    };
    let request = P2PRequestRepo::create(&state.pool, &create_dto).await?;

    Ok((StatusCode::CREATED, Json(request)))
}

/// GET /api/v1/p2p-requests
///
/// List the caller's own submissions, oldest first. Requires the
/// `p2p_request` scope.
pub async fn list(
    State(state): State<AppState>,
    RequireP2pRequest(auth): RequireP2pRequest,
) -> AppResult<Json<Vec<P2PRequest>>> {
    let requests = P2PRequestRepo::list_by_creator(&state.pool, auth.user_id).await?;
    Ok(Json(requests))
}

/// GET /api/v1/p2p-requests/review
///
/// Claim the oldest unreviewed request not authored by the caller.
/// Requires the `p2p_request` scope. Always 200; the body says whether a
/// request was claimed.
pub async fn start_review(
    State(state): State<AppState>,
    RequireP2pRequest(auth): RequireP2pRequest,
) -> AppResult<Json<StartReviewResponse>> {
    let outcome = P2PReviewRepo::start_review(&state.pool, auth.user_id).await?;

    let response = match outcome {
        StartReviewOutcome::Claimed(request) => {
            tracing::info!(
                reviewer_id = auth.user_id,
                request_id = request.id,
                "Review claimed"
            );
            StartReviewResponse::Claimed { request }
        }
        StartReviewOutcome::AlreadyReviewing => StartReviewResponse::AlreadyReviewing,
        StartReviewOutcome::NoPendingRequests => StartReviewResponse::NoPendingRequests,
    };

    Ok(Json(response))
}

/// POST /api/v1/p2p-requests/review/complete
///
/// Finish the caller's in-progress review of the given request, recording
/// the result link. Requires the `p2p_request` scope.
pub async fn complete_review(
    State(state): State<AppState>,
    RequireP2pRequest(auth): RequireP2pRequest,
    Json(input): Json<CompleteReviewRequest>,
) -> AppResult<Json<CompleteReviewResponse>> {
    validate_link(&input.link)?;

    let outcome = P2PReviewRepo::complete_review(
        &state.pool,
        auth.user_id,
        input.p2p_request_id,
        &input.link,
    )
    .await?;

    let response = match outcome {
        CompleteReviewOutcome::Completed(review) => {
            tracing::info!(
                reviewer_id = auth.user_id,
                request_id = input.p2p_request_id,
                "Review completed"
            );
            CompleteReviewResponse::Completed { review }
        }
        CompleteReviewOutcome::NotFound => CompleteReviewResponse::ReviewNotFound,
    };

    Ok(Json(response))
}

// ---------------------------------------------------------------------------
// Helpers
// ---------------------------------------------------------------------------

/// Reject empty or oversized links before they reach the engine.
fn validate_link(link: &str) -> Result<(), AppError> {
    if link.trim().is_empty() {
        return Err(AppError::Core(CoreError::Validation(
            "Link must not be empty".to_string(),
        )));
    }
    if link.len() > MAX_LINK_LENGTH {
        return Err(AppError::Core(CoreError::Validation(format!(
            "Link exceeds maximum length of {MAX_LINK_LENGTH} characters"
        ))));
    }
    Ok(())
}
