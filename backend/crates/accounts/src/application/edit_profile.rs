//! Edit Profile Use Case
//!
//! Updates the user-editable identity fields and the profile details, and
//! optionally replaces the profile photo.

use std::sync::Arc;

use kernel::id::UserId;
use platform::media::{MediaKind, MediaStore, Upload};

use crate::domain::repository::{ProfileRepository, UserRepository};
use crate::domain::value_object::{email::Email, user_name::UserName};
use crate::error::{AccountsError, AccountsResult};

/// Edit profile input
///
/// Empty strings from the form mean "cleared"; the photo is `None` when no
/// file was attached. An attached file whose name matches the placeholder
/// sentinel leaves the current photo untouched.
pub struct EditProfileInput {
    pub user_name: Option<String>,
    pub email: Option<String>,
    pub first_name: Option<String>,
    pub last_name: Option<String>,
    pub city: Option<String>,
    pub gender: Option<String>,
    pub emotions: Option<String>,
    pub photo: Option<Upload>,
}

/// Edit profile use case
pub struct EditProfileUseCase<U, P>
where
    U: UserRepository,
    P: ProfileRepository,
{
    user_repo: Arc<U>,
    profile_repo: Arc<P>,
    media: Arc<MediaStore>,
}

impl<U, P> EditProfileUseCase<U, P>
where
    U: UserRepository,
    P: ProfileRepository,
{
    pub fn new(user_repo: Arc<U>, profile_repo: Arc<P>, media: Arc<MediaStore>) -> Self {
        Self {
            user_repo,
            profile_repo,
            media,
        }
    }

    pub async fn execute(&self, user_id: &UserId, input: EditProfileInput) -> AccountsResult<()> {
        let mut user = self
            .user_repo
            .find_by_id(user_id)
            .await?
            .ok_or(AccountsError::UserNotFound)?;

        let mut profile = self
            .profile_repo
            .find_by_user_id(user_id)
            .await?
            .ok_or(AccountsError::ProfileNotFound)?;

        // Identity fields
        if let Some(name) = non_empty(input.user_name) {
            let user_name =
                UserName::new(&name, None).map_err(|e| AccountsError::Validation(e.to_string()))?;

            if user_name.canonical() != user.user_name.canonical()
                && self.user_repo.exists_by_user_name(&user_name).await?
            {
                return Err(AccountsError::UserNameTaken);
            }
            user.set_user_name(user_name);
        }

        match non_empty(input.email) {
            Some(email) => user.set_email(Some(Email::new(email)?)),
            None => user.set_email(None),
        }

        user.set_names(non_empty(input.first_name), non_empty(input.last_name));

        // Profile details
        profile.set_details(
            non_empty(input.city),
            non_empty(input.gender),
            non_empty(input.emotions),
        )?;

        // Photo replacement; the placeholder sentinel means "keep as is"
        if let Some(upload) = input.photo {
            if !MediaStore::is_placeholder(&upload.file_name) && !upload.bytes.is_empty() {
                let old_photo = profile.photo.clone();

                let path = self
                    .media
                    .store(MediaKind::ProfilePhoto, &upload.file_name, &upload.bytes)
                    .await?;
                profile.photo = path;

                if old_photo != profile.photo {
                    self.media.remove(&old_photo).await?;
                }
            }
        }

        self.user_repo.update(&user).await?;
        self.profile_repo.update(&profile).await?;

        tracing::info!(user_id = %user.user_id, "Profile updated");

        Ok(())
    }
}

/// Load the user + profile pair behind the account pages
pub struct LoadAccountUseCase<U, P>
where
    U: UserRepository,
    P: ProfileRepository,
{
    user_repo: Arc<U>,
    profile_repo: Arc<P>,
}

impl<U, P> LoadAccountUseCase<U, P>
where
    U: UserRepository,
    P: ProfileRepository,
{
    pub fn new(user_repo: Arc<U>, profile_repo: Arc<P>) -> Self {
        Self {
            user_repo,
            profile_repo,
        }
    }

    pub async fn execute(
        &self,
        user_id: &UserId,
    ) -> AccountsResult<(crate::domain::entity::user::User, crate::domain::entity::profile::Profile)>
    {
        let user = self
            .user_repo
            .find_by_id(user_id)
            .await?
            .ok_or(AccountsError::UserNotFound)?;

        let profile = self
            .profile_repo
            .find_by_user_id(user_id)
            .await?
            .ok_or(AccountsError::ProfileNotFound)?;

        Ok((user, profile))
    }
}

fn non_empty(value: Option<String>) -> Option<String> {
    value.and_then(|v| {
        let trimmed = v.trim().to_string();
        if trimmed.is_empty() { None } else { Some(trimmed) }
    })
}
