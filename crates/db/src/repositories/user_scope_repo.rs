//! Repository for the `users_to_scopes` join table.

use sqlx::PgPool;

use peerhub_core::types::DbId;

use crate::models::scope::UserToScope;

/// Provides grant operations between users and scopes.
pub struct UserScopeRepo;

impl UserScopeRepo {
    /// Grant a scope to a user, returning the created join row.
    ///
    /// Fails with a 23505 unique violation if the user already holds the
    /// scope.
    pub async fn grant(
        pool: &PgPool,
        user_id: DbId,
        scope_id: DbId,
    ) -> Result<UserToScope, sqlx::Error> {
        sqlx::query_as::<_, UserToScope>(
            "INSERT INTO users_to_scopes (user_id, scope_id)
             VALUES ($1, $2)
             RETURNING id, user_id, scope_id",
        )
        .bind(user_id)
        .bind(scope_id)
        .fetch_one(pool)
        .await
    }

    /// Grant a scope unless the user already holds it. Returns `true` when
    /// a new grant row was created.
    pub async fn grant_if_absent(
        pool: &PgPool,
        user_id: DbId,
        scope_id: DbId,
    ) -> Result<bool, sqlx::Error> {
        let result = sqlx::query(
            "INSERT INTO users_to_scopes (user_id, scope_id)
             VALUES ($1, $2)
             ON CONFLICT (user_id, scope_id) DO NOTHING",
        )
        .bind(user_id)
        .bind(scope_id)
        .execute(pool)
        .await?;
        Ok(result.rows_affected() > 0)
    }

    /// Scope names granted to a user, in grant order.
    pub async fn names_for_user(pool: &PgPool, user_id: DbId) -> Result<Vec<String>, sqlx::Error> {
        let rows: Vec<(String,)> = sqlx::query_as(
            "SELECT s.name
             FROM scopes s
             JOIN users_to_scopes uts ON uts.scope_id = s.id
             WHERE uts.user_id = $1
             ORDER BY uts.id",
        )
        .bind(user_id)
        .fetch_all(pool)
        .await?;
        Ok(rows.into_iter().map(|(name,)| name).collect())
    }
}
