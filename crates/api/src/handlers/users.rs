//! Handlers for the `/users` resource (profile, registration, scope grants).

use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::Json;
use serde::{Deserialize, Serialize};

use peerhub_core::error::CoreError;
use peerhub_core::scopes;
use peerhub_core::types::DbId;
use peerhub_db::models::user::{CreateUser, UserResponse};
use peerhub_db::repositories::{ScopeRepo, UserRepo, UserScopeRepo};

use crate::auth::password::{hash_password, validate_password_strength};
use crate::error::{AppError, AppResult};
use crate::middleware::scopes::{RequireMe, RequireRegister};
use crate::state::AppState;

/// Minimum password length enforced at registration.
const MIN_PASSWORD_LENGTH: usize = 12;

// ---------------------------------------------------------------------------
// Request / response types
// ---------------------------------------------------------------------------

/// Request body for `POST /users`.
#[derive(Debug, Deserialize)]
pub struct RegisterUserRequest {
    pub username: String,
    pub password: String,
    pub external_id: i64,
}

/// Request body for `POST /users/{id}/scopes`.
#[derive(Debug, Deserialize)]
pub struct GrantScopeRequest {
    pub scope: String,
}

/// Response body for `GET /users/me`: identity plus granted scope names.
#[derive(Debug, Serialize)]
pub struct MeResponse {
    pub id: DbId,
    pub username: String,
    pub external_id: i64,
    pub is_active: bool,
    /// All scopes granted to the user (not just the session's).
    pub scopes: Vec<String>,
}

// ---------------------------------------------------------------------------
// Handlers
// ---------------------------------------------------------------------------

/// GET /api/v1/users/me
///
/// The authenticated user's identity and granted scopes. Requires the
/// `me` scope.
pub async fn me(
    State(state): State<AppState>,
    RequireMe(auth): RequireMe,
) -> AppResult<Json<MeResponse>> {
    let user = UserRepo::find_by_id(&state.pool, auth.user_id)
        .await?
        .ok_or_else(|| AppError::Core(CoreError::Unauthorized("User no longer exists".into())))?;

    let granted = UserScopeRepo::names_for_user(&state.pool, user.id).await?;

    Ok(Json(MeResponse {
        id: user.id,
        username: user.username,
        external_id: user.external_id,
        is_active: user.is_active,
        scopes: granted,
    }))
}

/// POST /api/v1/users
///
/// Register a new user. Requires the `register` scope. A duplicate
/// username or external id is a 409; the constraint violation rolls the
/// whole insert back.
pub async fn register(
    State(state): State<AppState>,
    RequireRegister(_auth): RequireRegister,
    Json(input): Json<RegisterUserRequest>,
) -> AppResult<(StatusCode, Json<UserResponse>)> {
    validate_password_strength(&input.password, MIN_PASSWORD_LENGTH)
        .map_err(|msg| AppError::Core(CoreError::Validation(msg)))?;

    let hashed = hash_password(&input.password)
        .map_err(|e| AppError::InternalError(format!("Password hashing error: {e}")))?;

    let create_dto = CreateUser {
        username: input.username,
        external_id: input.external_id,
        password_hash: hashed,
    };

    let user = UserRepo::create(&state.pool, &create_dto)
        .await
        .map_err(|err| {
            if peerhub_db::unique_constraint(&err).is_some() {
                AppError::Core(CoreError::Conflict(
                    "Username or external id already registered".into(),
                ))
            } else {
                AppError::Database(err)
            }
        })?;

    Ok((StatusCode::CREATED, Json(UserResponse::from(&user))))
}

/// POST /api/v1/users/{id}/scopes
///
/// Grant a registered scope to a user. Requires the `register` scope.
/// Granting a scope the user already holds is a 409.
pub async fn grant_scope(
    State(state): State<AppState>,
    RequireRegister(_auth): RequireRegister,
    Path(user_id): Path<DbId>,
    Json(input): Json<GrantScopeRequest>,
) -> AppResult<StatusCode> {
    if !scopes::is_registered(&input.scope) {
        return Err(AppError::Core(CoreError::Validation(format!(
            "Unknown scope '{}'",
            input.scope
        ))));
    }

    let user = UserRepo::find_by_id(&state.pool, user_id)
        .await?
        .ok_or(AppError::Core(CoreError::NotFound {
            entity: "User",
            id: user_id,
        }))?;

    let scope = ScopeRepo::find_by_name(&state.pool, &input.scope)
        .await?
        .ok_or_else(|| {
            // Registered but missing from the table: reconciliation has not
            // run, which is a deployment fault rather than caller error.
            AppError::InternalError(format!("Scope '{}' not persisted", input.scope))
        })?;

    UserScopeRepo::grant(&state.pool, user.id, scope.id)
        .await
        .map_err(|err| {
            if peerhub_db::unique_constraint(&err).is_some() {
                AppError::Core(CoreError::Conflict(format!(
                    "User already holds scope '{}'",
                    input.scope
                )))
            } else {
                AppError::Database(err)
            }
        })?;

    Ok(StatusCode::CREATED)
}
