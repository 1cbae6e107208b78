//! Repository for the `p2p_reviews` table: the review assignment engine.
//!
//! `start_review` and `complete_review` are the only places review rows are
//! written. Both are single bounded transactions; no lock is ever held
//! across two operations.

use sqlx::PgPool;

use peerhub_core::review::ReviewState;
use peerhub_core::types::DbId;

use crate::models::p2p_request::P2PRequest;
use crate::models::p2p_review::P2PReview;
use crate::repositories::p2p_request_repo;
use crate::unique_constraint;

/// Column list shared across queries to avoid repetition.
const COLUMNS: &str = "id, reviewer_id, p2p_request_id, review_state, creation_date, end_date, link";

/// Result of a claim attempt. "No work available" and "already busy" are
/// ordinary outcomes, not errors.
#[derive(Debug)]
pub enum StartReviewOutcome {
    /// The reviewer claimed this request; a `progress` review row exists.
    Claimed(P2PRequest),
    /// The reviewer already has a review in progress. Nothing was written.
    AlreadyReviewing,
    /// No unreviewed request by another user exists. Nothing was written.
    NoPendingRequests,
}

/// Result of a completion attempt.
#[derive(Debug)]
pub enum CompleteReviewOutcome {
    /// The review moved to `completed`; `end_date` and `link` are set.
    Completed(P2PReview),
    /// No `progress` review matches this reviewer and request.
    NotFound,
}

/// Provides the review lifecycle operations.
pub struct P2PReviewRepo;

impl P2PReviewRepo {
    /// Claim the oldest unreviewed request not authored by `reviewer_id`.
    ///
    /// Runs as one transaction:
    /// 1. bail out with [`StartReviewOutcome::AlreadyReviewing`] if the
    ///    reviewer has a `progress` review;
    /// 2. select the oldest request with no review row and a different
    ///    creator, `FOR UPDATE SKIP LOCKED` so concurrent claimants never
    ///    pick the same row;
    /// 3. insert the `progress` review row.
    ///
    /// Unique-index races (two claims by the same reviewer, or two claims
    /// of the last eligible request straddling a commit) surface as 23505
    /// and are mapped back to the corresponding outcome.
    pub async fn start_review(
        pool: &PgPool,
        reviewer_id: DbId,
    ) -> Result<StartReviewOutcome, sqlx::Error> {
        let mut tx = pool.begin().await?;

        let in_progress: Option<(DbId,)> = sqlx::query_as(
            "SELECT id FROM p2p_reviews
             WHERE reviewer_id = $1 AND review_state = $2
             LIMIT 1",
        )
        .bind(reviewer_id)
        .bind(ReviewState::Progress.as_str())
        .fetch_optional(&mut *tx)
        .await?;

        if in_progress.is_some() {
            // Nothing was written; dropping the transaction rolls it back.
            return Ok(StartReviewOutcome::AlreadyReviewing);
        }

        let select = format!(
            "SELECT {} FROM p2p_requests r
             WHERE r.creator_id <> $1
               AND NOT EXISTS (
                   SELECT 1 FROM p2p_reviews pr WHERE pr.p2p_request_id = r.id
               )
             ORDER BY r.publication_date ASC, r.id ASC
             LIMIT 1
             FOR UPDATE OF r SKIP LOCKED",
            p2p_request_repo::COLUMNS
        );
        let request: Option<P2PRequest> = sqlx::query_as(&select)
            .bind(reviewer_id)
            .fetch_optional(&mut *tx)
            .await?;

        let Some(request) = request else {
            return Ok(StartReviewOutcome::NoPendingRequests);
        };

        let insert = sqlx::query(
            "INSERT INTO p2p_reviews (reviewer_id, p2p_request_id, review_state)
             VALUES ($1, $2, $3)",
        )
        .bind(reviewer_id)
        .bind(request.id)
        .bind(ReviewState::Progress.as_str())
        .execute(&mut *tx)
        .await;

        match insert {
            Ok(_) => {
                tx.commit().await?;
                Ok(StartReviewOutcome::Claimed(request))
            }
            Err(err) => match unique_constraint(&err) {
                Some("uq_p2p_reviews_reviewer_in_progress") => {
                    Ok(StartReviewOutcome::AlreadyReviewing)
                }
                Some("uq_p2p_reviews_request") => Ok(StartReviewOutcome::NoPendingRequests),
                _ => Err(err),
            },
        }
    }

    /// Complete the reviewer's `progress` review of `request_id`.
    ///
    /// A single compare-and-swap UPDATE: the state filter makes repeating
    /// the call after success (or completing someone else's review) resolve
    /// to [`CompleteReviewOutcome::NotFound`] with no mutation.
    pub async fn complete_review(
        pool: &PgPool,
        reviewer_id: DbId,
        request_id: DbId,
        link: &str,
    ) -> Result<CompleteReviewOutcome, sqlx::Error> {
        let query = format!(
            "UPDATE p2p_reviews
             SET link = $3, end_date = NOW(), review_state = $4
             WHERE reviewer_id = $1 AND p2p_request_id = $2 AND review_state = $5
             RETURNING {COLUMNS}"
        );
        let review: Option<P2PReview> = sqlx::query_as(&query)
            .bind(reviewer_id)
            .bind(request_id)
            .bind(link)
            .bind(ReviewState::Completed.as_str())
            .bind(ReviewState::Progress.as_str())
            .fetch_optional(pool)
            .await?;

        Ok(match review {
            Some(review) => CompleteReviewOutcome::Completed(review),
            None => CompleteReviewOutcome::NotFound,
        })
    }

    /// Find the reviewer's current `progress` review, if any.
    pub async fn find_in_progress(
        pool: &PgPool,
        reviewer_id: DbId,
    ) -> Result<Option<P2PReview>, sqlx::Error> {
        let query = format!(
            "SELECT {COLUMNS} FROM p2p_reviews
             WHERE reviewer_id = $1 AND review_state = $2"
        );
        sqlx::query_as::<_, P2PReview>(&query)
            .bind(reviewer_id)
            .bind(ReviewState::Progress.as_str())
            .fetch_optional(pool)
            .await
    }

    /// Find the review of a request, if one exists.
    pub async fn find_by_request(
        pool: &PgPool,
        request_id: DbId,
    ) -> Result<Option<P2PReview>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM p2p_reviews WHERE p2p_request_id = $1");
        sqlx::query_as::<_, P2PReview>(&query)
            .bind(request_id)
            .fetch_optional(pool)
            .await
    }
}
