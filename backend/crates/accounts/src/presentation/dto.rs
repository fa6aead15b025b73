//! API DTOs (Data Transfer Objects)
//!
//! Wire field names are plain snake_case, matching the original clients
//! (`access`, `refresh`, `password1`, ...).

use serde::{Deserialize, Serialize};

// ============================================================================
// Tokens
// ============================================================================

/// `POST /token/get/` request
#[derive(Debug, Clone, Deserialize)]
pub struct TokenObtainRequest {
    pub username: String,
    pub password: String,
}

/// Token pair response (also returned by register)
#[derive(Debug, Clone, Serialize)]
pub struct TokenPairResponse {
    pub access: String,
    pub refresh: String,
}

/// `POST /token/refresh/` request
#[derive(Debug, Clone, Deserialize)]
pub struct TokenRefreshRequest {
    pub refresh: String,
}

/// `POST /token/refresh/` response
#[derive(Debug, Clone, Serialize)]
pub struct AccessTokenResponse {
    pub access: String,
}

// ============================================================================
// Register
// ============================================================================

/// `POST /register/` request
#[derive(Debug, Clone, Deserialize)]
pub struct RegisterRequest {
    pub username: String,
    pub password1: String,
    pub password2: String,
    pub email: String,
}

// ============================================================================
// Page forms
// ============================================================================

/// Login form body
#[derive(Debug, Clone, Deserialize)]
pub struct LoginForm {
    pub username: String,
    pub password: String,
}

/// Register form body
#[derive(Debug, Clone, Deserialize)]
pub struct RegisterForm {
    pub username: String,
    pub email: String,
    pub password1: String,
    pub password2: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_token_pair_serialization() {
        let response = TokenPairResponse {
            access: "aaa".to_string(),
            refresh: "rrr".to_string(),
        };

        let json = serde_json::to_string(&response).unwrap();
        assert!(json.contains(r#""access":"aaa""#));
        assert!(json.contains(r#""refresh":"rrr""#));
    }

    #[test]
    fn test_register_request_deserialization() {
        let json = r#"{"username":"alice","password1":"pw12345","password2":"pw12345","email":"alice@example.com"}"#;
        let request: RegisterRequest = serde_json::from_str(json).unwrap();

        assert_eq!(request.username, "alice");
        assert_eq!(request.password1, "pw12345");
        assert_eq!(request.password2, "pw12345");
        assert_eq!(request.email, "alice@example.com");
    }

    #[test]
    fn test_token_obtain_request_deserialization() {
        let json = r#"{"username":"alice","password":"pw12345"}"#;
        let request: TokenObtainRequest = serde_json::from_str(json).unwrap();

        assert_eq!(request.username, "alice");
        assert_eq!(request.password, "pw12345");
    }
}
