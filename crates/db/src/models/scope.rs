//! Scope entity and user<->scope grant models.

use serde::Serialize;
use sqlx::FromRow;

use peerhub_core::types::DbId;

/// A row from the `scopes` table: a named permission.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct Scope {
    pub id: DbId,
    pub name: String,
}

/// A row from the `users_to_scopes` join table.
///
/// The `(user_id, scope_id)` pair is unique: a user cannot hold the same
/// scope twice.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct UserToScope {
    pub id: DbId,
    pub user_id: DbId,
    pub scope_id: DbId,
}
