//! API DTOs (Data Transfer Objects)
//!
//! Wire field names are plain snake_case (`created_date`, `user_id`),
//! matching the original serializers.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::domain::entities::{Comment, Post};

/// Post as returned by the API
#[derive(Debug, Clone, Serialize)]
pub struct PostResponse {
    pub id: i64,
    pub user_id: Uuid,
    pub title: String,
    pub text: String,
    pub created_date: DateTime<Utc>,
    pub likes: i32,
    pub dislikes: i32,
}

impl From<Post> for PostResponse {
    fn from(post: Post) -> Self {
        Self {
            id: post.id,
            user_id: post.user_id.into_uuid(),
            title: post.title,
            text: post.text,
            created_date: post.created_date,
            likes: post.likes,
            dislikes: post.dislikes,
        }
    }
}

/// Comment as returned by the API
#[derive(Debug, Clone, Serialize)]
pub struct CommentResponse {
    pub id: i64,
    pub user_id: Uuid,
    pub post_id: i64,
    pub text: String,
    pub created_date: DateTime<Utc>,
}

impl From<Comment> for CommentResponse {
    fn from(comment: Comment) -> Self {
        Self {
            id: comment.id,
            user_id: comment.user_id.into_uuid(),
            post_id: comment.post_id,
            text: comment.text,
            created_date: comment.created_date,
        }
    }
}

/// `POST /posts/add/` request
#[derive(Debug, Clone, Deserialize)]
pub struct AddPostRequest {
    #[serde(default)]
    pub title: Option<String>,
    pub text: String,
}

/// `POST /posts/comments/add/{id}/` request
#[derive(Debug, Clone, Deserialize)]
pub struct AddCommentRequest {
    pub text: String,
}

/// Page comment form body
#[derive(Debug, Clone, Deserialize)]
pub struct CommentForm {
    pub text: String,
}

/// Page search query (`/search?search=...`)
#[derive(Debug, Clone, Deserialize)]
pub struct SearchQuery {
    #[serde(default)]
    pub search: String,
}

#[cfg(test)]
mod tests {
    use super::*;
    use kernel::id::UserId;

    #[test]
    fn test_post_response_serialization() {
        let post = Post::new(UserId::new(), Some("T".into()), "hi".into()).unwrap();
        let response = PostResponse::from(post);

        let json = serde_json::to_string(&response).unwrap();
        assert!(json.contains(r#""title":"T""#));
        assert!(json.contains(r#""text":"hi""#));
        assert!(json.contains(r#""likes":0"#));
        assert!(json.contains(r#""created_date""#));
    }

    #[test]
    fn test_add_post_request_title_optional() {
        let request: AddPostRequest = serde_json::from_str(r#"{"text":"hi"}"#).unwrap();
        assert!(request.title.is_none());
        assert_eq!(request.text, "hi");

        let request: AddPostRequest =
            serde_json::from_str(r#"{"title":"T","text":"hi"}"#).unwrap();
        assert_eq!(request.title.as_deref(), Some("T"));
    }

    #[test]
    fn test_search_query_defaults_empty() {
        let query: SearchQuery = serde_json::from_str("{}").unwrap();
        assert_eq!(query.search, "");
    }
}
