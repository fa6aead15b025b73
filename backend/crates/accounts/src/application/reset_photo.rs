//! Reset Photo Use Case
//!
//! Deletes the current profile photo file and restores the placeholder.

use std::sync::Arc;

use platform::media::MediaStore;

use crate::domain::repository::ProfileRepository;
use crate::error::{AccountsError, AccountsResult};

/// Reset photo use case
pub struct ResetPhotoUseCase<P>
where
    P: ProfileRepository,
{
    profile_repo: Arc<P>,
    media: Arc<MediaStore>,
}

impl<P> ResetPhotoUseCase<P>
where
    P: ProfileRepository,
{
    pub fn new(profile_repo: Arc<P>, media: Arc<MediaStore>) -> Self {
        Self {
            profile_repo,
            media,
        }
    }

    pub async fn execute(&self, profile_id: i64) -> AccountsResult<()> {
        let mut profile = self
            .profile_repo
            .find_by_id(profile_id)
            .await?
            .ok_or(AccountsError::ProfileNotFound)?;

        // The store refuses to delete the placeholder itself
        self.media.remove(&profile.photo).await?;

        profile.reset_photo();
        self.profile_repo.update(&profile).await?;

        tracing::info!(profile_id, "Profile photo reset to placeholder");

        Ok(())
    }
}
