//! Request guards: token authentication and per-scope authorization.

pub mod auth;
pub mod scopes;
