//! Delete Image Use Case
//!
//! Deletes one image record and its stored file. Matching the original
//! page surface, there is no ownership check here.

use std::sync::Arc;

use platform::media::MediaStore;

use crate::domain::repository::ImageRepository;
use crate::error::{PostsError, PostsResult};

/// Delete image use case
pub struct DeleteImageUseCase<I>
where
    I: ImageRepository,
{
    image_repo: Arc<I>,
    media: Arc<MediaStore>,
}

impl<I> DeleteImageUseCase<I>
where
    I: ImageRepository,
{
    pub fn new(image_repo: Arc<I>, media: Arc<MediaStore>) -> Self {
        Self { image_repo, media }
    }

    pub async fn execute(&self, image_id: i64) -> PostsResult<()> {
        let image = self
            .image_repo
            .find_by_id(image_id)
            .await?
            .ok_or(PostsError::ImageNotFound)?;

        self.media.remove(&image.file_path).await?;
        self.image_repo.delete(image_id).await?;

        tracing::info!(image_id, post_id = image.post_id, "Image deleted");

        Ok(())
    }
}
