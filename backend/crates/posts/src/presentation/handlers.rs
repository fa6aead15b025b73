//! HTTP Handlers (JSON API)
//!
//! Bearer auth is applied as a middleware layer at the wiring site; every
//! handler here can assume [`CurrentUser`] is present.

use axum::Json;
use axum::extract::{Path, State};
use axum::http::StatusCode;
use kernel::principal::CurrentUser;
use platform::media::MediaStore;
use std::sync::Arc;

use crate::application::{
    AddCommentUseCase, CreatePostInput, CreatePostUseCase, DeletePostUseCase, ListCommentsUseCase,
    ListPostsUseCase, Vote, VotePostUseCase,
};
use crate::domain::repository::{CommentRepository, ImageRepository, PostRepository};
use crate::error::PostsResult;
use crate::presentation::dto::{AddCommentRequest, AddPostRequest, CommentResponse, PostResponse};

/// Full repository bound shared by posts handlers
pub trait PostsRepo:
    PostRepository + ImageRepository + CommentRepository + Clone + Send + Sync + 'static
{
}

impl<T> PostsRepo for T where
    T: PostRepository + ImageRepository + CommentRepository + Clone + Send + Sync + 'static
{
}

/// Shared state for posts handlers
#[derive(Clone)]
pub struct PostsAppState<R>
where
    R: PostsRepo,
{
    pub repo: Arc<R>,
    pub media: Arc<MediaStore>,
}

// ============================================================================
// Posts
// ============================================================================

/// GET /api/posts/
pub async fn posts<R: PostsRepo>(
    State(state): State<PostsAppState<R>>,
) -> PostsResult<Json<Vec<PostResponse>>> {
    let use_case = ListPostsUseCase::new(state.repo.clone());
    let posts = use_case.all().await?;

    Ok(Json(posts.into_iter().map(PostResponse::from).collect()))
}

/// GET /api/posts/own/
pub async fn own_posts<R: PostsRepo>(
    State(state): State<PostsAppState<R>>,
    current_user: CurrentUser,
) -> PostsResult<Json<Vec<PostResponse>>> {
    let use_case = ListPostsUseCase::new(state.repo.clone());
    let posts = use_case.own(&current_user.user_id).await?;

    Ok(Json(posts.into_iter().map(PostResponse::from).collect()))
}

/// POST /api/posts/add/
pub async fn add_post<R: PostsRepo>(
    State(state): State<PostsAppState<R>>,
    current_user: CurrentUser,
    Json(req): Json<AddPostRequest>,
) -> PostsResult<StatusCode> {
    let use_case =
        CreatePostUseCase::new(state.repo.clone(), state.repo.clone(), state.media.clone());

    use_case
        .execute(
            &current_user.user_id,
            CreatePostInput {
                title: req.title,
                text: req.text,
                images: Vec::new(),
            },
        )
        .await?;

    Ok(StatusCode::CREATED)
}

/// POST /api/posts/delete/{id}/
pub async fn delete_post<R: PostsRepo>(
    State(state): State<PostsAppState<R>>,
    current_user: CurrentUser,
    Path(id): Path<i64>,
) -> PostsResult<StatusCode> {
    let use_case =
        DeletePostUseCase::new(state.repo.clone(), state.repo.clone(), state.media.clone());

    use_case.execute_owned(&current_user.user_id, id).await?;

    Ok(StatusCode::OK)
}

/// POST /api/posts/like/{id}/
pub async fn like_post<R: PostsRepo>(
    State(state): State<PostsAppState<R>>,
    Path(id): Path<i64>,
) -> PostsResult<StatusCode> {
    let use_case = VotePostUseCase::new(state.repo.clone());
    use_case.execute(id, Vote::Like).await?;

    Ok(StatusCode::CREATED)
}

/// POST /api/posts/dislike/{id}/
pub async fn dislike_post<R: PostsRepo>(
    State(state): State<PostsAppState<R>>,
    Path(id): Path<i64>,
) -> PostsResult<StatusCode> {
    let use_case = VotePostUseCase::new(state.repo.clone());
    use_case.execute(id, Vote::Dislike).await?;

    Ok(StatusCode::CREATED)
}

// ============================================================================
// Comments
// ============================================================================

/// GET /api/posts/comments/get/{id}/
pub async fn get_comments<R: PostsRepo>(
    State(state): State<PostsAppState<R>>,
    Path(id): Path<i64>,
) -> PostsResult<Json<Vec<CommentResponse>>> {
    let use_case = ListCommentsUseCase::new(state.repo.clone(), state.repo.clone());
    let comments = use_case.execute(id).await?;

    Ok(Json(
        comments.into_iter().map(CommentResponse::from).collect(),
    ))
}

/// POST /api/posts/comments/add/{id}/
pub async fn add_comment<R: PostsRepo>(
    State(state): State<PostsAppState<R>>,
    current_user: CurrentUser,
    Path(id): Path<i64>,
    Json(req): Json<AddCommentRequest>,
) -> PostsResult<StatusCode> {
    let use_case = AddCommentUseCase::new(state.repo.clone(), state.repo.clone());
    use_case
        .execute(&current_user.user_id, id, req.text)
        .await?;

    Ok(StatusCode::CREATED)
}
