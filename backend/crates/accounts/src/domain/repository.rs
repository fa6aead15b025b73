//! Repository Traits
//!
//! Interfaces for data persistence. Implementation is in infrastructure layer.

use crate::domain::entity::{
    credential::Credential, profile::Profile, session::Session, user::User,
};
use crate::domain::value_object::user_name::UserName;
use crate::error::AccountsResult;
use kernel::id::UserId;
use uuid::Uuid;

/// User repository trait
#[trait_variant::make(UserRepository: Send)]
pub trait LocalUserRepository {
    /// Find user by ID
    async fn find_by_id(&self, user_id: &UserId) -> AccountsResult<Option<User>>;

    /// Find user by user name
    async fn find_by_user_name(&self, user_name: &UserName) -> AccountsResult<Option<User>>;

    /// Check if user name exists
    async fn exists_by_user_name(&self, user_name: &UserName) -> AccountsResult<bool>;

    /// Update user
    async fn update(&self, user: &User) -> AccountsResult<()>;
}

/// Account creation, spanning user + credential + profile
#[trait_variant::make(AccountRepository: Send)]
pub trait LocalAccountRepository {
    /// Persist a new account in a single transaction.
    ///
    /// Either all three rows exist afterwards or none do; the "every user
    /// has a profile" invariant is established here.
    async fn create_account(
        &self,
        user: &User,
        credential: &Credential,
        profile: &Profile,
    ) -> AccountsResult<()>;
}

/// Credential repository trait
#[trait_variant::make(CredentialRepository: Send)]
pub trait LocalCredentialRepository {
    /// Find credentials by user ID
    async fn find_by_user_id(&self, user_id: &UserId) -> AccountsResult<Option<Credential>>;

    /// Update credentials
    async fn update(&self, credential: &Credential) -> AccountsResult<()>;
}

/// Page-surface session repository trait
#[trait_variant::make(SessionRepository: Send)]
pub trait LocalSessionRepository {
    /// Create a new session
    async fn create(&self, session: &Session) -> AccountsResult<()>;

    /// Find session by ID
    async fn find_by_id(&self, session_id: Uuid) -> AccountsResult<Option<Session>>;

    /// Update session (e.g., last activity)
    async fn update(&self, session: &Session) -> AccountsResult<()>;

    /// Delete a session
    async fn delete(&self, session_id: Uuid) -> AccountsResult<()>;

    /// Clean up expired sessions
    async fn cleanup_expired(&self) -> AccountsResult<u64>;
}

/// Profile repository trait
#[trait_variant::make(ProfileRepository: Send)]
pub trait LocalProfileRepository {
    /// Find profile by row ID
    async fn find_by_id(&self, profile_id: i64) -> AccountsResult<Option<Profile>>;

    /// Find profile by user ID
    async fn find_by_user_id(&self, user_id: &UserId) -> AccountsResult<Option<Profile>>;

    /// Update profile
    async fn update(&self, profile: &Profile) -> AccountsResult<()>;
}
