//! Application Configuration
//!
//! Configuration for the Accounts application layer.

use std::time::Duration;

/// Re-export SameSite from platform
pub use platform::cookie::SameSite;

/// Accounts application configuration
#[derive(Debug, Clone)]
pub struct AccountsConfig {
    /// Session cookie name
    pub session_cookie_name: String,
    /// Session secret key for HMAC signing (32 bytes)
    pub session_secret: [u8; 32],
    /// Secret key for API token signing (32 bytes)
    pub token_secret: [u8; 32],
    /// Page-surface session TTL (12 hours)
    pub session_ttl: Duration,
    /// Access token TTL (15 minutes)
    pub access_ttl: Duration,
    /// Refresh token TTL (1 week)
    pub refresh_ttl: Duration,
    /// Whether to require Secure cookie
    pub cookie_secure: bool,
    /// SameSite policy
    pub cookie_same_site: SameSite,
    /// Password pepper (optional, application-wide secret)
    pub password_pepper: Option<Vec<u8>>,
}

impl Default for AccountsConfig {
    fn default() -> Self {
        Self {
            session_cookie_name: "session".to_string(),
            session_secret: [0u8; 32],
            token_secret: [0u8; 32],
            session_ttl: Duration::from_secs(12 * 3600),
            access_ttl: Duration::from_secs(15 * 60),
            refresh_ttl: Duration::from_secs(7 * 24 * 3600),
            cookie_secure: true,
            cookie_same_site: SameSite::Lax,
            password_pepper: None,
        }
    }
}

impl AccountsConfig {
    /// Create config with random secrets (for development)
    pub fn with_random_secrets() -> Self {
        use rand::RngCore;
        let mut session_secret = [0u8; 32];
        rand::rng().fill_bytes(&mut session_secret);
        let mut token_secret = [0u8; 32];
        rand::rng().fill_bytes(&mut token_secret);
        Self {
            session_secret,
            token_secret,
            ..Default::default()
        }
    }

    /// Create config for development (insecure cookie)
    pub fn development() -> Self {
        Self {
            cookie_secure: false,
            ..Self::with_random_secrets()
        }
    }

    /// Get session TTL in milliseconds
    pub fn session_ttl_ms(&self) -> i64 {
        self.session_ttl.as_millis() as i64
    }

    /// Get password pepper as slice
    pub fn pepper(&self) -> Option<&[u8]> {
        self.password_pepper.as_deref()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        let config = AccountsConfig::default();

        assert_eq!(config.session_cookie_name, "session");
        assert_eq!(config.session_ttl, Duration::from_secs(12 * 3600));
        assert_eq!(config.access_ttl, Duration::from_secs(15 * 60));
        assert_eq!(config.refresh_ttl, Duration::from_secs(7 * 24 * 3600));
        assert!(config.cookie_secure);
        assert_eq!(config.cookie_same_site, SameSite::Lax);
    }

    #[test]
    fn test_with_random_secrets() {
        let config1 = AccountsConfig::with_random_secrets();
        let config2 = AccountsConfig::with_random_secrets();

        assert_ne!(config1.session_secret, config2.session_secret);
        assert_ne!(config1.token_secret, config2.token_secret);
        assert_ne!(config1.session_secret, config1.token_secret);
    }

    #[test]
    fn test_development_config() {
        let config = AccountsConfig::development();

        assert!(!config.cookie_secure);
        assert!(config.session_secret.iter().any(|&b| b != 0));
    }
}
