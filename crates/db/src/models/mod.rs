//! Domain model structs and DTOs.
//!
//! Each submodule contains:
//! - A `FromRow` entity struct matching the database row
//! - A create DTO for inserts
//!
//! Entities are append-only except for a review's completion fields, so
//! there are no update DTOs.

pub mod p2p_request;
pub mod p2p_review;
pub mod scope;
pub mod user;
