//! Peer-review record entity model.

use serde::Serialize;
use sqlx::FromRow;

use peerhub_core::error::CoreError;
use peerhub_core::review::ReviewState;
use peerhub_core::types::{DbId, Timestamp};

/// A row from the `p2p_reviews` table: a reviewer working on (or finished
/// with) a specific request.
///
/// `end_date` and `link` are set if and only if the state is `completed`.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct P2PReview {
    pub id: DbId,
    pub reviewer_id: DbId,
    pub p2p_request_id: DbId,
    pub review_state: String,
    pub creation_date: Timestamp,
    pub end_date: Option<Timestamp>,
    pub link: Option<String>,
}

impl P2PReview {
    /// The typed lifecycle state of this row.
    pub fn state(&self) -> Result<ReviewState, CoreError> {
        ReviewState::parse(&self.review_state)
    }
}
