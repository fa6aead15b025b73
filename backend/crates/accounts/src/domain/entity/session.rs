//! Session Entity
//!
//! Server-side session for the page surface. The browser holds a signed
//! cookie referencing the session row; the API surface is stateless and
//! never creates one of these.

use chrono::{DateTime, Duration, Utc};
use kernel::id::UserId;
use uuid::Uuid;

/// Page-surface session entity
#[derive(Debug, Clone)]
pub struct Session {
    /// Session ID (UUID v4)
    pub session_id: Uuid,
    /// Reference to User
    pub user_id: UserId,
    /// Session expiration (Unix timestamp ms)
    pub expires_at_ms: i64,
    /// Created timestamp
    pub created_at: DateTime<Utc>,
    /// Last activity timestamp
    pub last_activity_at: DateTime<Utc>,
}

impl Session {
    /// Create a new session
    ///
    /// TTL is provided by the application layer (config), not hard-coded here.
    pub fn new(user_id: UserId, ttl: Duration) -> Self {
        let now = Utc::now();

        Self {
            session_id: Uuid::new_v4(),
            user_id,
            expires_at_ms: (now + ttl).timestamp_millis(),
            created_at: now,
            last_activity_at: now,
        }
    }

    /// Check if session has expired
    pub fn is_expired(&self) -> bool {
        Utc::now().timestamp_millis() > self.expires_at_ms
    }

    /// Update last activity timestamp
    pub fn touch(&mut self) {
        self.last_activity_at = Utc::now();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_fresh_session_not_expired() {
        let session = Session::new(UserId::new(), Duration::hours(12));
        assert!(!session.is_expired());
    }

    #[test]
    fn test_zero_ttl_session_expires() {
        let session = Session::new(UserId::new(), Duration::milliseconds(-1));
        assert!(session.is_expired());
    }
}
