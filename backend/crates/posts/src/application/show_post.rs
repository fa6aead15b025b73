//! Show Post Use Case
//!
//! Loads the post together with its images and comments for the post page.

use std::sync::Arc;

use crate::domain::entities::{Comment, Post, PostImage};
use crate::domain::repository::{CommentRepository, ImageRepository, PostRepository};
use crate::error::{PostsError, PostsResult};

/// Everything the post page renders
pub struct PostDetails {
    pub post: Post,
    pub images: Vec<PostImage>,
    pub comments: Vec<Comment>,
}

/// Show post use case
pub struct ShowPostUseCase<P, I, C>
where
    P: PostRepository,
    I: ImageRepository,
    C: CommentRepository,
{
    post_repo: Arc<P>,
    image_repo: Arc<I>,
    comment_repo: Arc<C>,
}

impl<P, I, C> ShowPostUseCase<P, I, C>
where
    P: PostRepository,
    I: ImageRepository,
    C: CommentRepository,
{
    pub fn new(post_repo: Arc<P>, image_repo: Arc<I>, comment_repo: Arc<C>) -> Self {
        Self {
            post_repo,
            image_repo,
            comment_repo,
        }
    }

    pub async fn execute(&self, post_id: i64) -> PostsResult<PostDetails> {
        let post = self
            .post_repo
            .find_by_id(post_id)
            .await?
            .ok_or(PostsError::PostNotFound)?;

        let images = self.image_repo.list_by_post(post_id).await?;
        let comments = self.comment_repo.list_by_post(post_id).await?;

        Ok(PostDetails {
            post,
            images,
            comments,
        })
    }
}
