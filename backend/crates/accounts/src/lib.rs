//! Accounts Backend Module
//!
//! Clean Architecture structure:
//! - `domain/` - Entities, value objects, repository traits
//! - `application/` - Use cases and application services
//! - `infra/` - Database implementations
//! - `presentation/` - HTTP handlers, DTOs, middleware, routers
//!
//! ## Features
//! - Registration with username + password pair + email; the profile row
//!   is created in the same transaction as the user
//! - Page-surface sessions (HttpOnly cookie, server-side session rows)
//! - API-surface access/refresh token pairs (stateless, HMAC-signed)
//! - Profile editing with photo upload and placeholder semantics
//!
//! ## Security Model
//! - Passwords hashed with Argon2id, optional application pepper
//! - Cookie and token values carry HMAC-SHA256 signatures
//! - Credential failures collapse to a single 401 without detail

pub mod application;
pub mod domain;
pub mod error;
pub mod infra;
pub mod presentation;

// Re-exports for convenience
pub use application::config::AccountsConfig;
pub use error::{AccountsError, AccountsResult};
pub use infra::postgres::PgAccountsRepository;
pub use presentation::router::{accounts_api_router, accounts_pages_router};

// Re-export kernel error types for unified error handling
pub use kernel::error::{
    app_error::{AppError, AppResult},
    kind::ErrorKind,
};

// Convenience re-exports
pub mod config {
    pub use crate::application::config::*;
}

pub mod models {
    pub use crate::domain::entity::credential::*;
    pub use crate::domain::entity::profile::*;
    pub use crate::domain::entity::session::*;
    pub use crate::domain::entity::user::*;
    pub use crate::domain::value_object::email::*;
    pub use crate::domain::value_object::user_name::*;
    pub use crate::domain::value_object::user_password::*;
    pub use crate::presentation::dto::*;
}

pub mod handlers {
    pub use crate::presentation::handlers::*;
}

pub mod store {
    pub use crate::infra::postgres::PgAccountsRepository as AccountsStore;
}

pub mod router {
    pub use crate::presentation::router::*;
}

pub mod middleware {
    pub use crate::presentation::middleware::*;
}

#[cfg(test)]
mod tests;
