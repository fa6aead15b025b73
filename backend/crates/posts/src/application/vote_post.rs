//! Vote Post Use Case
//!
//! Likes and dislikes move by exactly one per accepted request. There is no
//! per-user tracking; repeat votes accumulate. The increment is a single
//! UPDATE statement, so concurrent votes never lose counts.

use std::sync::Arc;

use crate::domain::repository::PostRepository;
use crate::error::{PostsError, PostsResult};

/// Vote direction
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Vote {
    Like,
    Dislike,
}

/// Vote post use case
pub struct VotePostUseCase<P>
where
    P: PostRepository,
{
    post_repo: Arc<P>,
}

impl<P> VotePostUseCase<P>
where
    P: PostRepository,
{
    pub fn new(post_repo: Arc<P>) -> Self {
        Self { post_repo }
    }

    pub async fn execute(&self, post_id: i64, vote: Vote) -> PostsResult<()> {
        let updated = match vote {
            Vote::Like => self.post_repo.add_like(post_id).await?,
            Vote::Dislike => self.post_repo.add_dislike(post_id).await?,
        };

        if !updated {
            return Err(PostsError::PostNotFound);
        }

        tracing::debug!(post_id, ?vote, "Vote recorded");
        Ok(())
    }
}
