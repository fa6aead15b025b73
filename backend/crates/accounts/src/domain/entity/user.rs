//! User Entity
//!
//! Core user identity. Credentials live in the Credential entity and the
//! user-editable profile fields in the Profile entity.

use chrono::{DateTime, Utc};
use kernel::id::UserId;

use crate::domain::value_object::{email::Email, user_name::UserName};

/// User entity
#[derive(Debug, Clone)]
pub struct User {
    /// Internal UUID identifier
    pub user_id: UserId,
    /// User name (unique, for login and display)
    pub user_name: UserName,
    /// Contact email (optional)
    pub email: Option<Email>,
    pub first_name: Option<String>,
    pub last_name: Option<String>,
    /// Created timestamp
    pub created_at: DateTime<Utc>,
    /// Updated timestamp
    pub updated_at: DateTime<Utc>,
}

impl User {
    /// Create a new user
    pub fn new(user_name: UserName, email: Option<Email>) -> Self {
        let now = Utc::now();

        Self {
            user_id: UserId::new(),
            user_name,
            email,
            first_name: None,
            last_name: None,
            created_at: now,
            updated_at: now,
        }
    }

    /// Update user name
    pub fn set_user_name(&mut self, user_name: UserName) {
        self.user_name = user_name;
        self.updated_at = Utc::now();
    }

    /// Update email
    pub fn set_email(&mut self, email: Option<Email>) {
        self.email = email;
        self.updated_at = Utc::now();
    }

    /// Update display names
    pub fn set_names(&mut self, first_name: Option<String>, last_name: Option<String>) {
        self.first_name = first_name;
        self.last_name = last_name;
        self.updated_at = Utc::now();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_user_has_no_names() {
        let user = User::new(UserName::new("alice", None).unwrap(), None);
        assert!(user.first_name.is_none());
        assert!(user.last_name.is_none());
        assert!(user.email.is_none());
    }

    #[test]
    fn test_set_names_touches_updated_at() {
        let mut user = User::new(UserName::new("alice", None).unwrap(), None);
        let before = user.updated_at;
        user.set_names(Some("Alice".into()), None);
        assert!(user.updated_at >= before);
        assert_eq!(user.first_name.as_deref(), Some("Alice"));
    }
}
