//! Peer-review request entity model and DTOs.

use serde::{Deserialize, Serialize};
use sqlx::FromRow;

use peerhub_core::types::{DbId, Timestamp};

/// A row from the `p2p_requests` table: a submission awaiting peer review.
///
/// The creator is fixed at creation. `publication_date` is server-assigned
/// and, together with `id`, gives the FIFO order used by the claim query.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct P2PRequest {
    pub id: DbId,
    pub repository_link: String,
    pub comment: String,
    pub creator_id: DbId,
    pub publication_date: Timestamp,
}

/// DTO for submitting a new request.
#[derive(Debug, Deserialize)]
pub struct CreateP2PRequest {
    pub repository_link: String,
    pub comment: String,
    pub creator_id: DbId,
}
