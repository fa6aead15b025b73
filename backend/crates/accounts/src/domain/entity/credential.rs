//! Credential Entity
//!
//! Password material for a user, kept apart from the User entity so that
//! identity reads never touch the hash.

use chrono::{DateTime, Utc};
use kernel::id::UserId;

use crate::domain::value_object::user_password::UserPassword;

/// Credential entity (one per user)
#[derive(Debug, Clone)]
pub struct Credential {
    pub user_id: UserId,
    pub password_hash: UserPassword,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl Credential {
    /// Create credentials for a new user
    pub fn new(user_id: UserId, password_hash: UserPassword) -> Self {
        let now = Utc::now();
        Self {
            user_id,
            password_hash,
            created_at: now,
            updated_at: now,
        }
    }

    /// Replace the stored password hash
    pub fn set_password(&mut self, password_hash: UserPassword) {
        self.password_hash = password_hash;
        self.updated_at = Utc::now();
    }
}
