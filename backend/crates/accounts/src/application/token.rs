//! API Tokens
//!
//! The JSON API authenticates with a stateless access/refresh token pair.
//! A token is `b64url(payload).b64url(hmac_sha256(secret, payload))` where
//! the payload is `kind:user_id:expires_at_ms` and kind is `a` (access) or
//! `r` (refresh). Verification checks the signature, the kind, and the
//! expiry; a refresh token is never accepted where an access token is
//! required and vice versa.

use base64::Engine;
use chrono::Utc;
use hmac::{Hmac, Mac};
use kernel::id::UserId;
use sha2::Sha256;
use std::time::Duration;

use crate::application::config::AccountsConfig;
use crate::error::{AccountsError, AccountsResult};

/// Token kind discriminator baked into the signed payload
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TokenKind {
    Access,
    Refresh,
}

impl TokenKind {
    fn code(&self) -> &'static str {
        match self {
            TokenKind::Access => "a",
            TokenKind::Refresh => "r",
        }
    }

    fn from_code(code: &str) -> Option<Self> {
        match code {
            "a" => Some(TokenKind::Access),
            "r" => Some(TokenKind::Refresh),
            _ => None,
        }
    }
}

/// An issued access/refresh pair
#[derive(Debug, Clone)]
pub struct TokenPair {
    pub access: String,
    pub refresh: String,
}

/// Signs and verifies API tokens with the configured secret
#[derive(Clone)]
pub struct TokenSigner {
    secret: [u8; 32],
}

impl TokenSigner {
    pub fn new(secret: [u8; 32]) -> Self {
        Self { secret }
    }

    /// Build a signer from the application config
    pub fn from_config(config: &AccountsConfig) -> Self {
        Self::new(config.token_secret)
    }

    /// Sign a token of the given kind expiring after `ttl`
    pub fn sign(&self, kind: TokenKind, user_id: &UserId, ttl: Duration) -> String {
        let expires_at_ms = Utc::now().timestamp_millis() + ttl.as_millis() as i64;
        self.sign_with_expiry(kind, user_id, expires_at_ms)
    }

    fn sign_with_expiry(&self, kind: TokenKind, user_id: &UserId, expires_at_ms: i64) -> String {
        let payload = format!("{}:{}:{}", kind.code(), user_id.as_uuid(), expires_at_ms);

        let mut mac = Hmac::<Sha256>::new_from_slice(&self.secret)
            .expect("HMAC can take key of any size");
        mac.update(payload.as_bytes());
        let signature = mac.finalize().into_bytes();

        let b64 = &base64::engine::general_purpose::URL_SAFE_NO_PAD;
        format!("{}.{}", b64.encode(payload.as_bytes()), b64.encode(signature))
    }

    /// Verify a token of the expected kind, returning its user ID
    pub fn verify(&self, expected_kind: TokenKind, token: &str) -> AccountsResult<UserId> {
        let b64 = &base64::engine::general_purpose::URL_SAFE_NO_PAD;

        let (payload_b64, signature_b64) = token
            .split_once('.')
            .ok_or(AccountsError::TokenInvalid)?;

        let payload = b64
            .decode(payload_b64)
            .map_err(|_| AccountsError::TokenInvalid)?;
        let signature = b64
            .decode(signature_b64)
            .map_err(|_| AccountsError::TokenInvalid)?;

        let mut mac = Hmac::<Sha256>::new_from_slice(&self.secret)
            .expect("HMAC can take key of any size");
        mac.update(&payload);
        mac.verify_slice(&signature)
            .map_err(|_| AccountsError::TokenInvalid)?;

        // Signature checked; now the payload fields
        let payload = String::from_utf8(payload).map_err(|_| AccountsError::TokenInvalid)?;
        let mut fields = payload.split(':');

        let kind = fields
            .next()
            .and_then(TokenKind::from_code)
            .ok_or(AccountsError::TokenInvalid)?;
        let user_id: uuid::Uuid = fields
            .next()
            .and_then(|s| s.parse().ok())
            .ok_or(AccountsError::TokenInvalid)?;
        let expires_at_ms: i64 = fields
            .next()
            .and_then(|s| s.parse().ok())
            .ok_or(AccountsError::TokenInvalid)?;

        if fields.next().is_some() {
            return Err(AccountsError::TokenInvalid);
        }

        if kind != expected_kind {
            return Err(AccountsError::TokenInvalid);
        }

        if Utc::now().timestamp_millis() > expires_at_ms {
            return Err(AccountsError::TokenInvalid);
        }

        Ok(UserId::from_uuid(user_id))
    }

    /// Issue an access/refresh pair for a user
    pub fn issue_pair(&self, config: &AccountsConfig, user_id: &UserId) -> TokenPair {
        TokenPair {
            access: self.sign(TokenKind::Access, user_id, config.access_ttl),
            refresh: self.sign(TokenKind::Refresh, user_id, config.refresh_ttl),
        }
    }
}

// ============================================================================
// Refresh use case
// ============================================================================

/// Exchange a valid refresh token for a new access token
pub struct RefreshTokenUseCase {
    config: std::sync::Arc<AccountsConfig>,
}

impl RefreshTokenUseCase {
    pub fn new(config: std::sync::Arc<AccountsConfig>) -> Self {
        Self { config }
    }

    pub fn execute(&self, refresh_token: &str) -> AccountsResult<String> {
        let signer = TokenSigner::from_config(&self.config);
        let user_id = signer.verify(TokenKind::Refresh, refresh_token)?;

        tracing::debug!(user_id = %user_id, "Access token refreshed");

        Ok(signer.sign(TokenKind::Access, &user_id, self.config.access_ttl))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn signer() -> TokenSigner {
        TokenSigner::new([42u8; 32])
    }

    #[test]
    fn test_refresh_yields_usable_access_token() {
        let config = std::sync::Arc::new(AccountsConfig::with_random_secrets());
        let signer = TokenSigner::from_config(&config);
        let user_id = UserId::new();
        let pair = signer.issue_pair(&config, &user_id);

        let use_case = RefreshTokenUseCase::new(config);
        let access = use_case.execute(&pair.refresh).unwrap();
        assert_eq!(signer.verify(TokenKind::Access, &access).unwrap(), user_id);

        // An access token is not a refresh token
        assert!(use_case.execute(&pair.access).is_err());
    }

    #[test]
    fn test_sign_verify_roundtrip() {
        let signer = signer();
        let user_id = UserId::new();

        let token = signer.sign(TokenKind::Access, &user_id, Duration::from_secs(60));
        let verified = signer.verify(TokenKind::Access, &token).unwrap();
        assert_eq!(verified, user_id);
    }

    #[test]
    fn test_kind_confusion_rejected() {
        let signer = signer();
        let user_id = UserId::new();

        let access = signer.sign(TokenKind::Access, &user_id, Duration::from_secs(60));
        let refresh = signer.sign(TokenKind::Refresh, &user_id, Duration::from_secs(60));

        assert!(signer.verify(TokenKind::Refresh, &access).is_err());
        assert!(signer.verify(TokenKind::Access, &refresh).is_err());
    }

    #[test]
    fn test_expired_token_rejected() {
        let signer = signer();
        let user_id = UserId::new();

        let token = signer.sign_with_expiry(
            TokenKind::Access,
            &user_id,
            Utc::now().timestamp_millis() - 1,
        );
        assert!(signer.verify(TokenKind::Access, &token).is_err());
    }

    #[test]
    fn test_wrong_secret_rejected() {
        let user_id = UserId::new();
        let token = signer().sign(TokenKind::Access, &user_id, Duration::from_secs(60));

        let other = TokenSigner::new([43u8; 32]);
        assert!(other.verify(TokenKind::Access, &token).is_err());
    }

    #[test]
    fn test_garbage_rejected() {
        let signer = signer();
        assert!(signer.verify(TokenKind::Access, "").is_err());
        assert!(signer.verify(TokenKind::Access, "abc").is_err());
        assert!(signer.verify(TokenKind::Access, "abc.def").is_err());
        assert!(
            signer
                .verify(
                    TokenKind::Access,
                    "ajdnjndnaldnlkdnlknljnljbnl.NBKlnDlnlnljzdngaljnzmk"
                )
                .is_err()
        );
    }

    #[test]
    fn test_issue_pair() {
        let config = AccountsConfig::with_random_secrets();
        let signer = TokenSigner::from_config(&config);
        let user_id = UserId::new();

        let pair = signer.issue_pair(&config, &user_id);

        assert_eq!(
            signer.verify(TokenKind::Access, &pair.access).unwrap(),
            user_id
        );
        assert_eq!(
            signer.verify(TokenKind::Refresh, &pair.refresh).unwrap(),
            user_id
        );
    }
}
