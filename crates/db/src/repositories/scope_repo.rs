//! Repository for the `scopes` table.

use sqlx::PgPool;

use crate::models::scope::Scope;

/// Provides operations for the scope registry rows.
pub struct ScopeRepo;

impl ScopeRepo {
    /// Idempotent reconciliation: insert every missing `name`, never delete
    /// extras. Run once at startup against the registry in
    /// `peerhub_core::scopes`.
    pub async fn ensure_registered(pool: &PgPool, names: &[&str]) -> Result<(), sqlx::Error> {
        for name in names {
            let result =
                sqlx::query("INSERT INTO scopes (name) VALUES ($1) ON CONFLICT (name) DO NOTHING")
                    .bind(name)
                    .execute(pool)
                    .await?;
            if result.rows_affected() > 0 {
                tracing::info!(scope = %name, "Registered missing scope");
            }
        }
        Ok(())
    }

    /// Find a scope by its unique name.
    pub async fn find_by_name(pool: &PgPool, name: &str) -> Result<Option<Scope>, sqlx::Error> {
        sqlx::query_as::<_, Scope>("SELECT id, name FROM scopes WHERE name = $1")
            .bind(name)
            .fetch_optional(pool)
            .await
    }

    /// List all persisted scopes.
    pub async fn list(pool: &PgPool) -> Result<Vec<Scope>, sqlx::Error> {
        sqlx::query_as::<_, Scope>("SELECT id, name FROM scopes ORDER BY id")
            .fetch_all(pool)
            .await
    }
}
