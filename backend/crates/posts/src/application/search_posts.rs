//! Search Posts Use Case
//!
//! Case-insensitive substring match over title and text across all posts.
//! No ranking, no pagination.

use std::sync::Arc;

use crate::domain::entities::Post;
use crate::domain::repository::PostRepository;
use crate::error::PostsResult;

/// Search posts use case
pub struct SearchPostsUseCase<P>
where
    P: PostRepository,
{
    post_repo: Arc<P>,
}

impl<P> SearchPostsUseCase<P>
where
    P: PostRepository,
{
    pub fn new(post_repo: Arc<P>) -> Self {
        Self { post_repo }
    }

    pub async fn execute(&self, query: &str) -> PostsResult<Vec<Post>> {
        self.post_repo.search(query).await
    }
}
