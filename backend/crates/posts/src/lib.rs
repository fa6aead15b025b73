//! Posts Backend Module
//!
//! Clean Architecture structure:
//! - `domain/` - Entities and repository traits
//! - `application/` - Use cases
//! - `infra/` - Database implementations
//! - `presentation/` - HTTP handlers, DTOs, routers
//!
//! ## Behavior notes
//! - Like/dislike counters move by exactly one per request; no per-user
//!   deduplication exists on either surface
//! - API deletes are owner-only; page deletes are merely session-gated
//! - Deleting a post removes its stored image files, then the row (image
//!   and comment rows cascade)

pub mod application;
pub mod domain;
pub mod error;
pub mod infra;
pub mod presentation;

// Re-exports for convenience
pub use error::{PostsError, PostsResult};
pub use infra::postgres::PgPostsRepository;
pub use presentation::router::{
    posts_account_pages_router, posts_api_router, posts_public_pages_router,
};

// Re-export kernel error types for unified error handling
pub use kernel::error::{
    app_error::{AppError, AppResult},
    kind::ErrorKind,
};

// Convenience re-exports
pub mod models {
    pub use crate::domain::entities::*;
    pub use crate::presentation::dto::*;
}

pub mod handlers {
    pub use crate::presentation::handlers::*;
}

pub mod store {
    pub use crate::infra::postgres::PgPostsRepository as PostsStore;
}

pub mod router {
    pub use crate::presentation::router::*;
}
