//! Repository for the `p2p_requests` table.

use sqlx::PgPool;

use peerhub_core::types::DbId;

use crate::models::p2p_request::{CreateP2PRequest, P2PRequest};

/// Column list shared across queries to avoid repetition.
pub(crate) const COLUMNS: &str = "id, repository_link, comment, creator_id, publication_date";

/// Provides CRUD operations for peer-review requests.
pub struct P2PRequestRepo;

impl P2PRequestRepo {
    /// Insert a new request, returning the created row.
    ///
    /// Always succeeds for a valid creator: there is no uniqueness on
    /// link or comment, and the server assigns `publication_date`.
    pub async fn create(pool: &PgPool, input: &CreateP2PRequest) -> Result<P2PRequest, sqlx::Error> {
        let query = format!(
            "INSERT INTO p2p_requests (repository_link, comment, creator_id)
             VALUES ($1, $2, $3)
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, P2PRequest>(&query)
            .bind(&input.repository_link)
            .bind(&input.comment)
            .bind(input.creator_id)
            .fetch_one(pool)
            .await
    }

    /// List all requests submitted by a user, oldest first.
    pub async fn list_by_creator(
        pool: &PgPool,
        creator_id: DbId,
    ) -> Result<Vec<P2PRequest>, sqlx::Error> {
        let query = format!(
            "SELECT {COLUMNS} FROM p2p_requests
             WHERE creator_id = $1
             ORDER BY publication_date ASC, id ASC"
        );
        sqlx::query_as::<_, P2PRequest>(&query)
            .bind(creator_id)
            .fetch_all(pool)
            .await
    }
}
