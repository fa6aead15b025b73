//! List Posts Use Case

use std::sync::Arc;

use kernel::id::UserId;

use crate::domain::entities::Post;
use crate::domain::repository::PostRepository;
use crate::error::PostsResult;

/// List posts use case
pub struct ListPostsUseCase<P>
where
    P: PostRepository,
{
    post_repo: Arc<P>,
}

impl<P> ListPostsUseCase<P>
where
    P: PostRepository,
{
    pub fn new(post_repo: Arc<P>) -> Self {
        Self { post_repo }
    }

    /// All posts, storage order (API surface)
    pub async fn all(&self) -> PostsResult<Vec<Post>> {
        self.post_repo.list_all().await
    }

    /// All posts, oldest first (page surface home)
    pub async fn all_by_created(&self) -> PostsResult<Vec<Post>> {
        self.post_repo.list_all_by_created().await
    }

    /// Posts owned by the authenticated user
    pub async fn own(&self, user_id: &UserId) -> PostsResult<Vec<Post>> {
        self.post_repo.list_by_user(user_id).await
    }
}
