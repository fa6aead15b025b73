//! Posts Application Layer - Use Cases

pub mod comments;
pub mod create_post;
pub mod delete_image;
pub mod delete_post;
pub mod edit_post;
pub mod list_posts;
pub mod search_posts;
pub mod show_post;
pub mod vote_post;

pub use comments::{AddCommentUseCase, ListCommentsUseCase};
pub use create_post::{CreatePostInput, CreatePostUseCase};
pub use delete_image::DeleteImageUseCase;
pub use delete_post::DeletePostUseCase;
pub use edit_post::{EditPostInput, EditPostUseCase};
pub use list_posts::ListPostsUseCase;
pub use search_posts::SearchPostsUseCase;
pub use show_post::{PostDetails, ShowPostUseCase};
pub use vote_post::{Vote, VotePostUseCase};
