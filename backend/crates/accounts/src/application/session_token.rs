//! Session Cookie Token
//!
//! The page-surface cookie carries `session_id.b64url(signature)` where the
//! signature is HMAC-SHA256 over the session ID string. Only the server can
//! mint valid values; the session row itself is the source of truth.

use base64::Engine;
use hmac::{Hmac, Mac};
use sha2::Sha256;
use uuid::Uuid;

use crate::error::{AccountsError, AccountsResult};

/// Generate a signed session token for the cookie
pub fn sign(secret: &[u8; 32], session_id: Uuid) -> String {
    let session_id = session_id.to_string();

    let mut mac =
        Hmac::<Sha256>::new_from_slice(secret).expect("HMAC can take key of any size");
    mac.update(session_id.as_bytes());
    let signature = mac.finalize().into_bytes();

    format!(
        "{}.{}",
        session_id,
        base64::engine::general_purpose::URL_SAFE_NO_PAD.encode(signature)
    )
}

/// Parse and verify a session token, returning the session ID
pub fn parse(secret: &[u8; 32], token: &str) -> AccountsResult<Uuid> {
    let parts: Vec<&str> = token.split('.').collect();
    if parts.len() != 2 {
        return Err(AccountsError::SessionInvalid);
    }

    let session_id_str = parts[0];
    let signature_b64 = parts[1];

    let mut mac =
        Hmac::<Sha256>::new_from_slice(secret).expect("HMAC can take key of any size");
    mac.update(session_id_str.as_bytes());

    let signature = base64::engine::general_purpose::URL_SAFE_NO_PAD
        .decode(signature_b64)
        .map_err(|_| AccountsError::SessionInvalid)?;

    mac.verify_slice(&signature)
        .map_err(|_| AccountsError::SessionInvalid)?;

    session_id_str
        .parse()
        .map_err(|_| AccountsError::SessionInvalid)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_sign_parse_roundtrip() {
        let secret = [7u8; 32];
        let session_id = Uuid::new_v4();

        let token = sign(&secret, session_id);
        assert_eq!(parse(&secret, &token).unwrap(), session_id);
    }

    #[test]
    fn test_wrong_secret_rejected() {
        let token = sign(&[7u8; 32], Uuid::new_v4());
        assert!(parse(&[8u8; 32], &token).is_err());
    }

    #[test]
    fn test_tampered_token_rejected() {
        let secret = [7u8; 32];
        let token = sign(&secret, Uuid::new_v4());

        let mut tampered = token.clone();
        tampered.replace_range(..1, "f");
        // Either the UUID or the signature no longer matches
        assert!(parse(&secret, &tampered).is_err() || tampered == token);
    }

    #[test]
    fn test_malformed_token_rejected() {
        let secret = [7u8; 32];
        assert!(parse(&secret, "").is_err());
        assert!(parse(&secret, "no-dot-here").is_err());
        assert!(parse(&secret, "a.b.c").is_err());
        assert!(parse(&secret, "not-a-uuid.c2ln").is_err());
    }
}
