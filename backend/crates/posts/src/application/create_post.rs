//! Create Post Use Case
//!
//! Persists a post and stores any attached images. The post insert and the
//! image writes are separate commits; a crash in between leaves a post with
//! fewer images than submitted.

use std::sync::Arc;

use kernel::id::UserId;
use platform::media::{MediaKind, MediaStore, Upload};

use crate::domain::entities::{Post, PostImage};
use crate::domain::repository::{ImageRepository, PostRepository};
use crate::error::PostsResult;

/// Create post input
pub struct CreatePostInput {
    pub title: Option<String>,
    pub text: String,
    /// Page-surface uploads; the JSON API sends none
    pub images: Vec<Upload>,
}

/// Create post use case
pub struct CreatePostUseCase<P, I>
where
    P: PostRepository,
    I: ImageRepository,
{
    post_repo: Arc<P>,
    image_repo: Arc<I>,
    media: Arc<MediaStore>,
}

impl<P, I> CreatePostUseCase<P, I>
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

    pub async fn execute(&self, user_id: &UserId, input: CreatePostInput) -> PostsResult<i64> {
        let post = Post::new(*user_id, input.title, input.text)?;
        let post_id = self.post_repo.create(&post).await?;

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

        tracing::info!(
            post_id,
            user_id = %user_id,
            images = input.images.len(),
            "Post created"
        );

        Ok(post_id)
    }
}
