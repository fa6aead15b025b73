//! Profile Entity
//!
//! One-to-one with User, created in the same transaction as the user so the
//! "every user has a profile" invariant holds from the first insert.

use kernel::id::UserId;
use platform::media::PLACEHOLDER_PHOTO;

use crate::error::{AccountsError, AccountsResult};

/// Maximum length for the city field
pub const CITY_MAX_LENGTH: usize = 100;

/// Maximum length for the gender field
pub const GENDER_MAX_LENGTH: usize = 10;

/// Maximum length for the free-text emotions field
pub const EMOTIONS_MAX_LENGTH: usize = 1000;

/// Profile entity
#[derive(Debug, Clone)]
pub struct Profile {
    /// Row ID (0 until persisted)
    pub id: i64,
    pub user_id: UserId,
    pub city: Option<String>,
    pub gender: Option<String>,
    pub emotions: Option<String>,
    /// Relative media path; the placeholder when no photo was uploaded
    pub photo: String,
}

impl Profile {
    /// Create an empty profile for a new user
    pub fn new(user_id: UserId) -> Self {
        Self {
            id: 0,
            user_id,
            city: None,
            gender: None,
            emotions: None,
            photo: PLACEHOLDER_PHOTO.to_string(),
        }
    }

    /// Apply user-edited detail fields, enforcing length bounds
    pub fn set_details(
        &mut self,
        city: Option<String>,
        gender: Option<String>,
        emotions: Option<String>,
    ) -> AccountsResult<()> {
        check_len("city", &city, CITY_MAX_LENGTH)?;
        check_len("gender", &gender, GENDER_MAX_LENGTH)?;
        check_len("emotions", &emotions, EMOTIONS_MAX_LENGTH)?;

        self.city = city;
        self.gender = gender;
        self.emotions = emotions;
        Ok(())
    }

    /// Whether the profile still shows the placeholder photo
    pub fn has_placeholder_photo(&self) -> bool {
        platform::media::MediaStore::is_placeholder(&self.photo)
    }

    /// Point the profile back at the placeholder photo
    pub fn reset_photo(&mut self) {
        self.photo = PLACEHOLDER_PHOTO.to_string();
    }
}

fn check_len(field: &str, value: &Option<String>, max: usize) -> AccountsResult<()> {
    if let Some(v) = value {
        let len = v.chars().count();
        if len > max {
            return Err(AccountsError::Validation(format!(
                "{} is too long ({} chars, maximum {})",
                field, len, max
            )));
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_profile_has_placeholder() {
        let profile = Profile::new(UserId::new());
        assert_eq!(profile.photo, PLACEHOLDER_PHOTO);
        assert!(profile.has_placeholder_photo());
    }

    #[test]
    fn test_set_details_bounds() {
        let mut profile = Profile::new(UserId::new());

        assert!(
            profile
                .set_details(Some("Kyiv".into()), Some("f".into()), Some("fine".into()))
                .is_ok()
        );
        assert_eq!(profile.city.as_deref(), Some("Kyiv"));

        let too_long = "x".repeat(GENDER_MAX_LENGTH + 1);
        assert!(profile.set_details(None, Some(too_long), None).is_err());
    }

    #[test]
    fn test_reset_photo() {
        let mut profile = Profile::new(UserId::new());
        profile.photo = "profile_photos/abc_cat.jpg".to_string();
        assert!(!profile.has_placeholder_photo());

        profile.reset_photo();
        assert!(profile.has_placeholder_photo());
    }
}
