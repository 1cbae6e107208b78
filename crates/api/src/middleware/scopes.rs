//! Scope-based authorization extractors.
//!
//! Each extractor wraps [`AuthUser`] and runs the full authorization gate
//! before the handler body executes: validate the token, confirm the
//! account still exists and is active, then require the operation's scope.
//! Use these in route handlers to enforce authorization at the type level.

use axum::extract::FromRequestParts;
use axum::http::request::Parts;

use peerhub_core::error::CoreError;
use peerhub_core::scopes::{self, SCOPE_ME, SCOPE_P2P_REQUEST, SCOPE_REGISTER};
use peerhub_db::repositories::UserRepo;

use super::auth::AuthUser;
use crate::error::AppError;
use crate::state::AppState;

/// Shared gate behind every scope extractor.
///
/// Rejects with 401 when the token is missing/invalid or the account no
/// longer exists or is deactivated, and with 403 when the session token
/// does not carry the required registered scope.
async fn require_scope(
    parts: &mut Parts,
    state: &AppState,
    required: &'static str,
) -> Result<AuthUser, AppError> {
    let user = AuthUser::from_request_parts(parts, state).await?;

    let account = UserRepo::find_by_id(&state.pool, user.user_id)
        .await?
        .ok_or_else(|| AppError::Core(CoreError::Unauthorized("User no longer exists".into())))?;

    if !account.is_active {
        return Err(AppError::Core(CoreError::Unauthorized(
            "Account is deactivated".into(),
        )));
    }

    if !scopes::is_registered(required) || !user.has_scope(required) {
        return Err(AppError::Core(CoreError::Forbidden(format!(
            "Scope '{required}' required"
        ))));
    }

    Ok(user)
}

/// Requires the `me` scope.
pub struct RequireMe(pub AuthUser);

impl FromRequestParts<AppState> for RequireMe {
    type Rejection = AppError;

    async fn from_request_parts(
        parts: &mut Parts,
        state: &AppState,
    ) -> Result<Self, Self::Rejection> {
        Ok(RequireMe(require_scope(parts, state, SCOPE_ME).await?))
    }
}

/// Requires the `register` scope.
pub struct RequireRegister(pub AuthUser);

impl FromRequestParts<AppState> for RequireRegister {
    type Rejection = AppError;

    async fn from_request_parts(
        parts: &mut Parts,
        state: &AppState,
    ) -> Result<Self, Self::Rejection> {
        Ok(RequireRegister(
            require_scope(parts, state, SCOPE_REGISTER).await?,
        ))
    }
}

/// Requires the `p2p_request` scope.
pub struct RequireP2pRequest(pub AuthUser);

impl FromRequestParts<AppState> for RequireP2pRequest {
    type Rejection = AppError;

    async fn from_request_parts(
        parts: &mut Parts,
        state: &AppState,
    ) -> Result<Self, Self::Rejection> {
        Ok(RequireP2pRequest(
            require_scope(parts, state, SCOPE_P2P_REQUEST).await?,
        ))
    }
}
