//! Superuser bootstrap for the `create-superuser` subcommand.

use peerhub_core::scopes::REGISTERED_SCOPES;
use peerhub_db::models::user::CreateUser;
use peerhub_db::repositories::{ScopeRepo, UserRepo, UserScopeRepo};
use peerhub_db::DbPool;

use crate::auth::password::hash_password;
use crate::error::{AppError, AppResult};

/// Create (or reuse) a user and grant it every registered scope.
///
/// Idempotent: an existing username is reused, and grants the user already
/// holds are skipped, so re-running the command is safe.
pub async fn create_superuser(
    pool: &DbPool,
    username: &str,
    password: &str,
    external_id: i64,
) -> AppResult<()> {
    let user = match UserRepo::find_by_username(pool, username).await? {
        Some(user) => {
            tracing::warn!(username, "User already exists, granting scopes only");
            user
        }
        None => {
            let hashed = hash_password(password)
                .map_err(|e| AppError::InternalError(format!("Password hashing error: {e}")))?;
            let input = CreateUser {
                username: username.to_string(),
                external_id,
                password_hash: hashed,
            };
            UserRepo::create(pool, &input).await?
        }
    };

    let names: Vec<&str> = REGISTERED_SCOPES.iter().map(|(name, _)| *name).collect();
    ScopeRepo::ensure_registered(pool, &names).await?;

    for scope in ScopeRepo::list(pool).await? {
        let granted = UserScopeRepo::grant_if_absent(pool, user.id, scope.id).await?;
        if granted {
            tracing::info!(username, scope = %scope.name, "Scope granted");
        }
    }

    Ok(())
}
