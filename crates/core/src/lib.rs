//! Domain types shared across the peerhub crates.
//!
//! No I/O lives here: the scope registry, the review lifecycle and the
//! error taxonomy are plain types that the `db` and `api` crates build on.

pub mod error;
pub mod review;
pub mod scopes;
pub mod types;
