//! Delete Post Use Case
//!
//! The API surface requires ownership. The page surface historically lets
//! any signed-in user delete any post; that behavior is preserved behind a
//! separate, explicitly named entry point.

use std::sync::Arc;

use kernel::id::UserId;
use platform::media::MediaStore;

use crate::domain::repository::{ImageRepository, PostRepository};
use crate::error::{PostsError, PostsResult};

/// Delete post use case
pub struct DeletePostUseCase<P, I>
where
    P: PostRepository,
    I: ImageRepository,
{
    post_repo: Arc<P>,
    image_repo: Arc<I>,
    media: Arc<MediaStore>,
}

impl<P, I> DeletePostUseCase<P, I>
where
    P: PostRepository,
    I: ImageRepository,
{
    pub fn new(post_repo: Arc<P>, image_repo: Arc<I>, media: Arc<MediaStore>) -> Self {
        Self {
            post_repo,
            image_repo,
            media,
        }
    }

    /// Delete a post the caller owns (API surface)
    pub async fn execute_owned(&self, user_id: &UserId, post_id: i64) -> PostsResult<()> {
        let post = self
            .post_repo
            .find_by_id(post_id)
            .await?
            .ok_or(PostsError::PostNotFound)?;

        if !post.is_owned_by(user_id) {
            return Err(PostsError::NotOwner);
        }

        self.delete(post_id).await?;

        tracing::info!(post_id, user_id = %user_id, "Post deleted");
        Ok(())
    }

    /// Delete a post without an ownership check (page surface)
    ///
    /// Any signed-in user may delete any post here; ownership is only
    /// enforced on the API surface.
    pub async fn execute_unchecked(&self, post_id: i64) -> PostsResult<()> {
        self.post_repo
            .find_by_id(post_id)
            .await?
            .ok_or(PostsError::PostNotFound)?;

        self.delete(post_id).await?;

        tracing::info!(post_id, "Post deleted (page surface)");
        Ok(())
    }

    /// Remove image files, then the row; the row delete cascades to image
    /// and comment records.
    async fn delete(&self, post_id: i64) -> PostsResult<()> {
        let images = self.image_repo.list_by_post(post_id).await?;
        for image in &images {
            self.media.remove(&image.file_path).await?;
        }

        self.post_repo.delete(post_id).await
    }
}
