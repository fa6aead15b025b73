//! Repository Traits
//!
//! Interfaces for data persistence. Implementation is in infrastructure layer.

use crate::domain::entities::{Comment, Post, PostImage};
use crate::error::PostsResult;
use kernel::id::UserId;

/// Post repository trait
#[trait_variant::make(PostRepository: Send)]
pub trait LocalPostRepository {
    /// Persist a new post, returning its assigned ID
    async fn create(&self, post: &Post) -> PostsResult<i64>;

    /// Find post by ID
    async fn find_by_id(&self, post_id: i64) -> PostsResult<Option<Post>>;

    /// All posts, storage order (API surface)
    async fn list_all(&self) -> PostsResult<Vec<Post>>;

    /// All posts ordered by creation time ascending (page surface)
    async fn list_all_by_created(&self) -> PostsResult<Vec<Post>>;

    /// Posts owned by a user
    async fn list_by_user(&self, user_id: &UserId) -> PostsResult<Vec<Post>>;

    /// Update title/text
    async fn update(&self, post: &Post) -> PostsResult<()>;

    /// Delete a post (cascades to images and comments)
    async fn delete(&self, post_id: i64) -> PostsResult<()>;

    /// Increment the like counter by one; false when the post is missing
    async fn add_like(&self, post_id: i64) -> PostsResult<bool>;

    /// Increment the dislike counter by one; false when the post is missing
    async fn add_dislike(&self, post_id: i64) -> PostsResult<bool>;

    /// Case-insensitive substring match over title and text
    async fn search(&self, query: &str) -> PostsResult<Vec<Post>>;
}

/// Post image repository trait
#[trait_variant::make(ImageRepository: Send)]
pub trait LocalImageRepository {
    /// Persist a new image record, returning its assigned ID
    async fn create(&self, image: &PostImage) -> PostsResult<i64>;

    /// Find image by ID
    async fn find_by_id(&self, image_id: i64) -> PostsResult<Option<PostImage>>;

    /// Images attached to a post
    async fn list_by_post(&self, post_id: i64) -> PostsResult<Vec<PostImage>>;

    /// Delete an image record
    async fn delete(&self, image_id: i64) -> PostsResult<()>;
}

/// Comment repository trait
#[trait_variant::make(CommentRepository: Send)]
pub trait LocalCommentRepository {
    /// Persist a new comment, returning its assigned ID
    async fn create(&self, comment: &Comment) -> PostsResult<i64>;

    /// Comments on a post, insertion order
    async fn list_by_post(&self, post_id: i64) -> PostsResult<Vec<Comment>>;
}
