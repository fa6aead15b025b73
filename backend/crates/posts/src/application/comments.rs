//! Comment Use Cases

use std::sync::Arc;

use kernel::id::UserId;

use crate::domain::entities::Comment;
use crate::domain::repository::{CommentRepository, PostRepository};
use crate::error::{PostsError, PostsResult};

/// List comments use case
pub struct ListCommentsUseCase<P, C>
where
    P: PostRepository,
    C: CommentRepository,
{
    post_repo: Arc<P>,
    comment_repo: Arc<C>,
}

impl<P, C> ListCommentsUseCase<P, C>
where
    P: PostRepository,
    C: CommentRepository,
{
    pub fn new(post_repo: Arc<P>, comment_repo: Arc<C>) -> Self {
        Self {
            post_repo,
            comment_repo,
        }
    }

    pub async fn execute(&self, post_id: i64) -> PostsResult<Vec<Comment>> {
        self.post_repo
            .find_by_id(post_id)
            .await?
            .ok_or(PostsError::PostNotFound)?;

        self.comment_repo.list_by_post(post_id).await
    }
}

/// Add comment use case
pub struct AddCommentUseCase<P, C>
where
    P: PostRepository,
    C: CommentRepository,
{
    post_repo: Arc<P>,
    comment_repo: Arc<C>,
}

impl<P, C> AddCommentUseCase<P, C>
where
    P: PostRepository,
    C: CommentRepository,
{
    pub fn new(post_repo: Arc<P>, comment_repo: Arc<C>) -> Self {
        Self {
            post_repo,
            comment_repo,
        }
    }

    pub async fn execute(&self, user_id: &UserId, post_id: i64, text: String) -> PostsResult<i64> {
        self.post_repo
            .find_by_id(post_id)
            .await?
            .ok_or(PostsError::PostNotFound)?;

        let comment = Comment::new(*user_id, post_id, text)?;
        let comment_id = self.comment_repo.create(&comment).await?;

        tracing::info!(comment_id, post_id, user_id = %user_id, "Comment added");

        Ok(comment_id)
    }
}
