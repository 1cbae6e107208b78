//! Repository layer.
//!
//! Each repository is a zero-sized struct providing async methods that
//! accept `&PgPool` as the first argument. The review claim and completion
//! live in [`P2PReviewRepo`]; everything else is plain CRUD.

pub mod p2p_request_repo;
pub mod p2p_review_repo;
pub mod scope_repo;
pub mod user_repo;
pub mod user_scope_repo;

pub use p2p_request_repo::P2PRequestRepo;
pub use p2p_review_repo::{CompleteReviewOutcome, P2PReviewRepo, StartReviewOutcome};
pub use scope_repo::ScopeRepo;
pub use user_repo::UserRepo;
pub use user_scope_repo::UserScopeRepo;
