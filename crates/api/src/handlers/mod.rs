//! HTTP request handlers, grouped by resource.

pub mod auth;
pub mod p2p_requests;
pub mod users;
