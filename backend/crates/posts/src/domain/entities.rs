//! Domain Entities
//!
//! Posts, their images, and comments. Rows are keyed by the store's numeric
//! IDs (0 until persisted); authors are referenced by `UserId`.

use chrono::{DateTime, Utc};
use kernel::id::UserId;

use crate::error::{PostsError, PostsResult};

/// Maximum length for a post title
pub const TITLE_MAX_LENGTH: usize = 200;

/// Maximum length for a post body
pub const TEXT_MAX_LENGTH: usize = 30_000;

/// Maximum length for a comment body
pub const COMMENT_MAX_LENGTH: usize = 3_000;

/// Post entity
#[derive(Debug, Clone)]
pub struct Post {
    pub id: i64,
    pub user_id: UserId,
    /// Optional; stored as an empty string when absent
    pub title: String,
    pub text: String,
    pub created_date: DateTime<Utc>,
    /// Monotonically incremented, never decremented
    pub likes: i32,
    pub dislikes: i32,
}

impl Post {
    /// Create a new post with validated bounds
    pub fn new(user_id: UserId, title: Option<String>, text: String) -> PostsResult<Self> {
        let title = title.unwrap_or_default();
        validate_title(&title)?;
        validate_text(&text)?;

        Ok(Self {
            id: 0,
            user_id,
            title,
            text,
            created_date: Utc::now(),
            likes: 0,
            dislikes: 0,
        })
    }

    /// Replace title and text, keeping bounds
    pub fn edit(&mut self, title: Option<String>, text: String) -> PostsResult<()> {
        let title = title.unwrap_or_default();
        validate_title(&title)?;
        validate_text(&text)?;

        self.title = title;
        self.text = text;
        Ok(())
    }

    /// Whether `user_id` owns this post
    pub fn is_owned_by(&self, user_id: &UserId) -> bool {
        self.user_id == *user_id
    }
}

fn validate_title(title: &str) -> PostsResult<()> {
    let len = title.chars().count();
    if len > TITLE_MAX_LENGTH {
        return Err(PostsError::Validation(format!(
            "Title is too long ({} chars, maximum {})",
            len, TITLE_MAX_LENGTH
        )));
    }
    Ok(())
}

fn validate_text(text: &str) -> PostsResult<()> {
    if text.trim().is_empty() {
        return Err(PostsError::Validation("Post text cannot be empty".into()));
    }
    let len = text.chars().count();
    if len > TEXT_MAX_LENGTH {
        return Err(PostsError::Validation(format!(
            "Post text is too long ({} chars, maximum {})",
            len, TEXT_MAX_LENGTH
        )));
    }
    Ok(())
}

/// Image entity - a stored file attached to a post
#[derive(Debug, Clone)]
pub struct PostImage {
    pub id: i64,
    pub post_id: i64,
    /// Relative media path of the stored file
    pub file_path: String,
}

impl PostImage {
    pub fn new(post_id: i64, file_path: String) -> Self {
        Self {
            id: 0,
            post_id,
            file_path,
        }
    }
}

/// Comment entity
#[derive(Debug, Clone)]
pub struct Comment {
    pub id: i64,
    pub user_id: UserId,
    pub post_id: i64,
    pub text: String,
    pub created_date: DateTime<Utc>,
}

impl Comment {
    /// Create a new comment with validated bounds
    pub fn new(user_id: UserId, post_id: i64, text: String) -> PostsResult<Self> {
        if text.trim().is_empty() {
            return Err(PostsError::Validation("Comment cannot be empty".into()));
        }
        let len = text.chars().count();
        if len > COMMENT_MAX_LENGTH {
            return Err(PostsError::Validation(format!(
                "Comment is too long ({} chars, maximum {})",
                len, COMMENT_MAX_LENGTH
            )));
        }

        Ok(Self {
            id: 0,
            user_id,
            post_id,
            text,
            created_date: Utc::now(),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_post_creation() {
        let post = Post::new(UserId::new(), Some("T".into()), "hi".into()).unwrap();

        assert_eq!(post.title, "T");
        assert_eq!(post.text, "hi");
        assert_eq!(post.likes, 0);
        assert_eq!(post.dislikes, 0);
    }

    #[test]
    fn test_post_title_optional() {
        let post = Post::new(UserId::new(), None, "hi".into()).unwrap();
        assert_eq!(post.title, "");
    }

    #[test]
    fn test_post_text_required() {
        assert!(Post::new(UserId::new(), None, "".into()).is_err());
        assert!(Post::new(UserId::new(), None, "   ".into()).is_err());
    }

    #[test]
    fn test_post_bounds() {
        let long_title = "t".repeat(TITLE_MAX_LENGTH + 1);
        assert!(Post::new(UserId::new(), Some(long_title), "hi".into()).is_err());

        let long_text = "t".repeat(TEXT_MAX_LENGTH + 1);
        assert!(Post::new(UserId::new(), None, long_text).is_err());

        let max_text = "t".repeat(TEXT_MAX_LENGTH);
        assert!(Post::new(UserId::new(), None, max_text).is_ok());
    }

    #[test]
    fn test_post_edit_validates() {
        let mut post = Post::new(UserId::new(), None, "hi".into()).unwrap();

        post.edit(Some("New title".into()), "new text".into()).unwrap();
        assert_eq!(post.title, "New title");

        assert!(post.edit(None, "".into()).is_err());
        // Failed edit leaves the post unchanged
        assert_eq!(post.text, "new text");
    }

    #[test]
    fn test_ownership() {
        let owner = UserId::new();
        let post = Post::new(owner, None, "hi".into()).unwrap();

        assert!(post.is_owned_by(&owner));
        assert!(!post.is_owned_by(&UserId::new()));
    }

    #[test]
    fn test_comment_bounds() {
        let user = UserId::new();

        assert!(Comment::new(user, 1, "fine".into()).is_ok());
        assert!(Comment::new(user, 1, "".into()).is_err());
        assert!(Comment::new(user, 1, "c".repeat(COMMENT_MAX_LENGTH + 1)).is_err());
    }
}
