//! Well-known scope names and the scope registry.
//!
//! A scope is a named permission gating access to an operation. The
//! registry here is the single source of truth for which scope names exist;
//! it must match the seed data in `20260305000002_create_scopes_tables.sql`.
//! The server also reconciles missing rows at startup, so extending the
//! registry does not require a new migration.

use crate::error::CoreError;

/// Can see the logged in user's profile.
pub const SCOPE_ME: &str = "me";

/// Can register new users and grant scopes.
pub const SCOPE_REGISTER: &str = "register";

/// Can submit, list, claim and complete peer-review requests.
pub const SCOPE_P2P_REQUEST: &str = "p2p_request";

/// All registered scopes with their human-readable descriptions.
pub const REGISTERED_SCOPES: &[(&str, &str)] = &[
    (SCOPE_ME, "can see the logged in user profile"),
    (SCOPE_REGISTER, "can register new users"),
    (SCOPE_P2P_REQUEST, "can interact with p2p requests"),
];

/// Whether `name` is a registered scope.
pub fn is_registered(name: &str) -> bool {
    REGISTERED_SCOPES.iter().any(|(n, _)| *n == name)
}

/// Validate a requested scope set against a user's granted scopes.
///
/// Every requested name must be both registered and present among the
/// user's grants. The check is all-or-nothing; a single bad name rejects
/// the whole request.
pub fn validate_requested(requested: &[String], granted: &[String]) -> Result<(), CoreError> {
    for scope in requested {
        if !is_registered(scope) || !granted.iter().any(|g| g == scope) {
            return Err(CoreError::Unauthorized("Incorrect scope(s)".to_string()));
        }
    }
    Ok(())
}
