//! Edit Post Use Case
//!
//! Page-surface only. Editing another user's post reads as "not found",
//! the same as the original's owner-scoped lookup.

use std::sync::Arc;

use kernel::id::UserId;
use platform::media::{MediaKind, MediaStore, Upload};

use crate::domain::entities::PostImage;
use crate::domain::repository::{ImageRepository, PostRepository};
use crate::error::{PostsError, PostsResult};

/// Edit post input
pub struct EditPostInput {
    pub title: Option<String>,
    pub text: String,
    /// Newly uploaded images are appended, never replaced
    pub images: Vec<Upload>,
}

/// Edit post use case
pub struct EditPostUseCase<P, I>
where
    P: PostRepository,
    I: ImageRepository,
{
    post_repo: Arc<P>,
    image_repo: Arc<I>,
    media: Arc<MediaStore>,
}

impl<P, I> EditPostUseCase<P, I>
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

    pub async fn execute(
        &self,
        user_id: &UserId,
        post_id: i64,
        input: EditPostInput,
    ) -> PostsResult<()> {
        let mut post = self
            .post_repo
            .find_by_id(post_id)
            .await?
            .filter(|p| p.is_owned_by(user_id))
            .ok_or(PostsError::PostNotFound)?;

        post.edit(input.title, input.text)?;
        self.post_repo.update(&post).await?;

        for upload in &input.images {
            if upload.bytes.is_empty() {
                continue;
            }
            let path = self
                .media
                .store(MediaKind::PostImage, &upload.file_name, &upload.bytes)
                .await?;
            self.image_repo
                .create(&PostImage::new(post_id, path))
                .await?;
        }

        tracing::info!(post_id, user_id = %user_id, "Post edited");

        Ok(())
    }
}
