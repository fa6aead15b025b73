//! User Name Value Object
//!
//! ユーザー名はログイン・画面表示・検索に使う公開ハンドル。
//!
//! ## 不変条件
//! - 長さ: 3〜30文字（NFKC正規化後）
//! - ASCII文字のみ許可（a-z, 0-9, _ . - +）
//! - 先頭・末尾: 英数字または `_`
//! - 連続ドット禁止（`..`）
//! - ページルートと衝突する予約語は使用不可

use serde::{Deserialize, Serialize};
use std::fmt;
use unicode_normalization::UnicodeNormalization;

// ============================================================================
// Constants
// ============================================================================

/// Minimum length for user name (in characters)
pub const USER_NAME_MIN_LENGTH: usize = 3;

/// Maximum length for user name (in characters)
pub const USER_NAME_MAX_LENGTH: usize = 30;

/// Allowed special characters in user name
const ALLOWED_SPECIAL_CHARS: &[char] = &['_', '.', '-', '+'];

/// Reserved words that cannot be used as user names
///
/// These collide with routes or administrative vocabulary.
const RESERVED_WORDS: &[&str] = &[
    "admin",
    "administrator",
    "root",
    "system",
    "moderator",
    "support",
    "api",
    "login",
    "logout",
    "register",
    "account",
    "search",
    "anonymous",
    "me",
];

// ============================================================================
// Error Types
// ============================================================================

/// Error returned when user name validation fails
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum UserNameError {
    /// User name is empty after normalization
    Empty,

    /// User name is too short
    TooShort { length: usize, min: usize },

    /// User name is too long
    TooLong { length: usize, max: usize },

    /// User name contains invalid character
    InvalidCharacter { char: char, position: usize },

    /// User name starts with invalid character (must be alphanumeric or _)
    InvalidStart { char: char },

    /// User name ends with invalid character (must be alphanumeric or _)
    InvalidEnd { char: char },

    /// User name contains consecutive dots (..)
    ConsecutiveDots,

    /// User name contains no alphanumeric characters
    NoAlphanumeric,

    /// User name contains whitespace
    ContainsWhitespace,

    /// User name is a reserved word
    Reserved { word: String },
}

impl fmt::Display for UserNameError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Empty => write!(f, "Username cannot be empty"),
            Self::TooShort { length, min } => {
                write!(f, "Username is too short ({length} chars, minimum {min})")
            }
            Self::TooLong { length, max } => {
                write!(f, "Username is too long ({length} chars, maximum {max})")
            }
            Self::InvalidCharacter { char, position } => {
                write!(
                    f,
                    "Invalid character '{char}' at position {position}. Only a-z, 0-9, _, ., -, + are allowed"
                )
            }
            Self::InvalidStart { char } => {
                write!(
                    f,
                    "Username cannot start with '{char}'. Must start with a-z, 0-9, or _"
                )
            }
            Self::InvalidEnd { char } => {
                write!(
                    f,
                    "Username cannot end with '{char}'. Must end with a-z, 0-9, or _"
                )
            }
            Self::ConsecutiveDots => {
                write!(f, "Username cannot contain consecutive dots (..)")
            }
            Self::NoAlphanumeric => {
                write!(f, "Username must contain at least one letter or digit")
            }
            Self::ContainsWhitespace => {
                write!(f, "Username cannot contain whitespace")
            }
            Self::Reserved { word } => {
                write!(f, "'{word}' is a reserved username")
            }
        }
    }
}

impl std::error::Error for UserNameError {}

// ============================================================================
// UserName Value Object
// ============================================================================

/// Validated, normalized user name
///
/// # Storage
/// - `original`: The user's input (trimmed, NFKC normalized, preserves case)
/// - `canonical`: Lowercase form for uniqueness checks
#[derive(Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct UserName {
    /// Original user input (preserves case)
    original: String,
    /// Canonical form (lowercase) for uniqueness
    canonical: String,
}

impl UserName {
    /// Create a new UserName from raw input
    ///
    /// Applies normalization (NFKC, trim) and validates.
    pub fn new(
        input: impl AsRef<str>,
        reserved_words: Option<&[&str]>,
    ) -> Result<Self, UserNameError> {
        let reserved = reserved_words.unwrap_or(RESERVED_WORDS);

        let original: String = input.as_ref().nfkc().collect::<String>().trim().to_string();
        let canonical = original.to_lowercase();
        Self::validate(&canonical, reserved)?;
        Ok(Self {
            original,
            canonical,
        })
    }

    /// Get the original user name (preserves case)
    #[inline]
    pub fn original(&self) -> &str {
        &self.original
    }

    /// Get the canonical (normalized, lowercase) user name
    #[inline]
    pub fn canonical(&self) -> &str {
        &self.canonical
    }

    /// Alias for canonical() for compatibility
    #[inline]
    pub fn as_str(&self) -> &str {
        &self.canonical
    }

    /// Create from database values (assumes already validated)
    pub fn from_db(original: &str) -> Result<Self, UserNameError> {
        let canonical = original.to_lowercase();
        Ok(Self {
            original: original.to_string(),
            canonical,
        })
    }

    /// Validate the normalized user name
    fn validate(canonical: &str, reserved_words: &[&str]) -> Result<(), UserNameError> {
        if canonical.is_empty() {
            return Err(UserNameError::Empty);
        }

        let length = canonical.chars().count();
        if length < USER_NAME_MIN_LENGTH {
            return Err(UserNameError::TooShort {
                length,
                min: USER_NAME_MIN_LENGTH,
            });
        }
        if length > USER_NAME_MAX_LENGTH {
            return Err(UserNameError::TooLong {
                length,
                max: USER_NAME_MAX_LENGTH,
            });
        }

        if canonical.chars().any(|c| c.is_whitespace()) {
            return Err(UserNameError::ContainsWhitespace);
        }

        for (pos, ch) in canonical.chars().enumerate() {
            if !Self::is_valid_char(ch) {
                return Err(UserNameError::InvalidCharacter {
                    char: ch,
                    position: pos,
                });
            }
        }

        let first_char = canonical.chars().next().unwrap();
        if !Self::is_valid_start_end_char(first_char) {
            return Err(UserNameError::InvalidStart { char: first_char });
        }

        let last_char = canonical.chars().next_back().unwrap();
        if !Self::is_valid_start_end_char(last_char) {
            return Err(UserNameError::InvalidEnd { char: last_char });
        }

        if canonical.contains("..") {
            return Err(UserNameError::ConsecutiveDots);
        }

        if !canonical.chars().any(|c| c.is_ascii_alphanumeric()) {
            return Err(UserNameError::NoAlphanumeric);
        }

        if reserved_words.iter().any(|&w| w == canonical) {
            return Err(UserNameError::Reserved {
                word: canonical.to_string(),
            });
        }

        Ok(())
    }

    /// Check if character is valid in a user name
    #[inline]
    fn is_valid_char(c: char) -> bool {
        c.is_ascii_lowercase() || c.is_ascii_digit() || ALLOWED_SPECIAL_CHARS.contains(&c)
    }

    /// Check if character is valid at start or end of user name
    #[inline]
    fn is_valid_start_end_char(c: char) -> bool {
        c.is_ascii_lowercase() || c.is_ascii_digit() || c == '_'
    }
}

impl fmt::Debug for UserName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("UserName")
            .field("original", &self.original)
            .field("canonical", &self.canonical)
            .finish()
    }
}

impl fmt::Display for UserName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.original)
    }
}

impl AsRef<str> for UserName {
    fn as_ref(&self) -> &str {
        &self.canonical
    }
}

impl TryFrom<String> for UserName {
    type Error = UserNameError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::new(value, None)
    }
}

impl From<UserName> for String {
    fn from(name: UserName) -> Self {
        name.original
    }
}

// ============================================================================
// Tests
// ============================================================================
