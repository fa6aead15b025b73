//! PostgreSQL Repository Implementations

use chrono::{DateTime, Utc};
use kernel::id::UserId;
use sqlx::PgPool;
use uuid::Uuid;

use crate::domain::entities::{Comment, Post, PostImage};
use crate::domain::repository::{CommentRepository, ImageRepository, PostRepository};
use crate::error::PostsResult;

/// PostgreSQL-backed posts repository
#[derive(Clone)]
pub struct PgPostsRepository {
    pool: PgPool,
}

impl PgPostsRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

const POST_COLUMNS: &str = "id, user_id, title, text, created_date, likes, dislikes";

// ============================================================================
// Post Repository Implementation
// ============================================================================

impl PostRepository for PgPostsRepository {
    async fn create(&self, post: &Post) -> PostsResult<i64> {
        let id = sqlx::query_scalar::<_, i64>(
            r#"
            INSERT INTO posts (user_id, title, text, created_date, likes, dislikes)
            VALUES ($1, $2, $3, $4, $5, $6)
            RETURNING id
            "#,
        )
        .bind(post.user_id.as_uuid())
        .bind(&post.title)
        .bind(&post.text)
        .bind(post.created_date)
        .bind(post.likes)
        .bind(post.dislikes)
        .fetch_one(&self.pool)
        .await?;

        Ok(id)
    }

    async fn find_by_id(&self, post_id: i64) -> PostsResult<Option<Post>> {
        let row = sqlx::query_as::<_, PostRow>(&format!(
            "SELECT {POST_COLUMNS} FROM posts WHERE id = $1"
        ))
        .bind(post_id)
        .fetch_optional(&self.pool)
        .await?;

        Ok(row.map(|r| r.into_post()))
    }

    async fn list_all(&self) -> PostsResult<Vec<Post>> {
        let rows = sqlx::query_as::<_, PostRow>(&format!("SELECT {POST_COLUMNS} FROM posts"))
            .fetch_all(&self.pool)
            .await?;

        Ok(rows.into_iter().map(|r| r.into_post()).collect())
    }

    async fn list_all_by_created(&self) -> PostsResult<Vec<Post>> {
        let rows = sqlx::query_as::<_, PostRow>(&format!(
            "SELECT {POST_COLUMNS} FROM posts ORDER BY created_date ASC"
        ))
        .fetch_all(&self.pool)
        .await?;

        Ok(rows.into_iter().map(|r| r.into_post()).collect())
    }

    async fn list_by_user(&self, user_id: &UserId) -> PostsResult<Vec<Post>> {
        let rows = sqlx::query_as::<_, PostRow>(&format!(
            "SELECT {POST_COLUMNS} FROM posts WHERE user_id = $1"
        ))
        .bind(user_id.as_uuid())
        .fetch_all(&self.pool)
        .await?;

        Ok(rows.into_iter().map(|r| r.into_post()).collect())
    }

    async fn update(&self, post: &Post) -> PostsResult<()> {
        sqlx::query("UPDATE posts SET title = $2, text = $3 WHERE id = $1")
            .bind(post.id)
            .bind(&post.title)
            .bind(&post.text)
            .execute(&self.pool)
            .await?;

        Ok(())
    }

    async fn delete(&self, post_id: i64) -> PostsResult<()> {
        // Image and comment rows go with the post via ON DELETE CASCADE
        sqlx::query("DELETE FROM posts WHERE id = $1")
            .bind(post_id)
            .execute(&self.pool)
            .await?;

        Ok(())
    }

    async fn add_like(&self, post_id: i64) -> PostsResult<bool> {
        // Single statement, so concurrent votes never lose an increment
        let updated = sqlx::query("UPDATE posts SET likes = likes + 1 WHERE id = $1")
            .bind(post_id)
            .execute(&self.pool)
            .await?
            .rows_affected();

        Ok(updated > 0)
    }

    async fn add_dislike(&self, post_id: i64) -> PostsResult<bool> {
        let updated = sqlx::query("UPDATE posts SET dislikes = dislikes + 1 WHERE id = $1")
            .bind(post_id)
            .execute(&self.pool)
            .await?
            .rows_affected();

        Ok(updated > 0)
    }

    async fn search(&self, query: &str) -> PostsResult<Vec<Post>> {
        let pattern = format!("%{}%", escape_like(query));

        let rows = sqlx::query_as::<_, PostRow>(&format!(
            "SELECT {POST_COLUMNS} FROM posts WHERE title ILIKE $1 OR text ILIKE $1"
        ))
        .bind(pattern)
        .fetch_all(&self.pool)
        .await?;

        Ok(rows.into_iter().map(|r| r.into_post()).collect())
    }
}

/// Escape LIKE metacharacters so the query is a literal substring match
fn escape_like(query: &str) -> String {
    query
        .replace('\\', "\\\\")
        .replace('%', "\\%")
        .replace('_', "\\_")
}

// ============================================================================
// Image Repository Implementation
// ============================================================================

impl ImageRepository for PgPostsRepository {
    async fn create(&self, image: &PostImage) -> PostsResult<i64> {
        let id = sqlx::query_scalar::<_, i64>(
            "INSERT INTO post_images (post_id, file_path) VALUES ($1, $2) RETURNING id",
        )
        .bind(image.post_id)
        .bind(&image.file_path)
        .fetch_one(&self.pool)
        .await?;

        Ok(id)
    }

    async fn find_by_id(&self, image_id: i64) -> PostsResult<Option<PostImage>> {
        let row = sqlx::query_as::<_, ImageRow>(
            "SELECT id, post_id, file_path FROM post_images WHERE id = $1",
        )
        .bind(image_id)
        .fetch_optional(&self.pool)
        .await?;

        Ok(row.map(|r| r.into_image()))
    }

    async fn list_by_post(&self, post_id: i64) -> PostsResult<Vec<PostImage>> {
        let rows = sqlx::query_as::<_, ImageRow>(
            "SELECT id, post_id, file_path FROM post_images WHERE post_id = $1 ORDER BY id",
        )
        .bind(post_id)
        .fetch_all(&self.pool)
        .await?;

        Ok(rows.into_iter().map(|r| r.into_image()).collect())
    }

    async fn delete(&self, image_id: i64) -> PostsResult<()> {
        sqlx::query("DELETE FROM post_images WHERE id = $1")
            .bind(image_id)
            .execute(&self.pool)
            .await?;

        Ok(())
    }
}

// ============================================================================
// Comment Repository Implementation
// ============================================================================

impl CommentRepository for PgPostsRepository {
    async fn create(&self, comment: &Comment) -> PostsResult<i64> {
        let id = sqlx::query_scalar::<_, i64>(
            r#"
            INSERT INTO comments (user_id, post_id, text, created_date)
            VALUES ($1, $2, $3, $4)
            RETURNING id
            "#,
        )
        .bind(comment.user_id.as_uuid())
        .bind(comment.post_id)
        .bind(&comment.text)
        .bind(comment.created_date)
        .fetch_one(&self.pool)
        .await?;

        Ok(id)
    }

    async fn list_by_post(&self, post_id: i64) -> PostsResult<Vec<Comment>> {
        let rows = sqlx::query_as::<_, CommentRow>(
            r#"
            SELECT id, user_id, post_id, text, created_date
            FROM comments
            WHERE post_id = $1
            ORDER BY id
            "#,
        )
        .bind(post_id)
        .fetch_all(&self.pool)
        .await?;

        Ok(rows.into_iter().map(|r| r.into_comment()).collect())
    }
}

// ============================================================================
// Row Types for sqlx mapping
// ============================================================================

#[derive(sqlx::FromRow)]
struct PostRow {
    id: i64,
    user_id: Uuid,
    title: String,
    text: String,
    created_date: DateTime<Utc>,
    likes: i32,
    dislikes: i32,
}

impl PostRow {
    fn into_post(self) -> Post {
        Post {
            id: self.id,
            user_id: UserId::from_uuid(self.user_id),
            title: self.title,
            text: self.text,
            created_date: self.created_date,
            likes: self.likes,
            dislikes: self.dislikes,
        }
    }
}

#[derive(sqlx::FromRow)]
struct ImageRow {
    id: i64,
    post_id: i64,
    file_path: String,
}

impl ImageRow {
    fn into_image(self) -> PostImage {
        PostImage {
            id: self.id,
            post_id: self.post_id,
            file_path: self.file_path,
        }
    }
}

#[derive(sqlx::FromRow)]
struct CommentRow {
    id: i64,
    user_id: Uuid,
    post_id: i64,
    text: String,
    created_date: DateTime<Utc>,
}

impl CommentRow {
    fn into_comment(self) -> Comment {
        Comment {
            id: self.id,
            user_id: UserId::from_uuid(self.user_id),
            post_id: self.post_id,
            text: self.text,
            created_date: self.created_date,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_escape_like() {
        assert_eq!(escape_like("plain"), "plain");
        assert_eq!(escape_like("50%"), "50\\%");
        assert_eq!(escape_like("a_b"), "a\\_b");
        assert_eq!(escape_like("back\\slash"), "back\\\\slash");
    }
}
