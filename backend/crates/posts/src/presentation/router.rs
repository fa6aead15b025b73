//! Posts Routers
//!
//! Routes are grouped by required capability; the auth layers themselves
//! live in the accounts crate and are applied by the binary at the wiring
//! site (bearer for the API group, session for the account group).

use axum::{
    Router,
    routing::{get, post},
};
use platform::media::MediaStore;
use std::sync::Arc;

use crate::infra::postgres::PgPostsRepository;
use crate::presentation::handlers::{self, PostsAppState};
use crate::presentation::pages;

type Repo = PgPostsRepository;

fn state(repo: PgPostsRepository, media: Arc<MediaStore>) -> PostsAppState<Repo> {
    PostsAppState {
        repo: Arc::new(repo),
        media,
    }
}

/// JSON API router (bearer auth layered by the caller)
pub fn posts_api_router(repo: PgPostsRepository, media: Arc<MediaStore>) -> Router {
    Router::new()
        .route("/posts/", get(handlers::posts::<Repo>))
        .route("/posts/own/", get(handlers::own_posts::<Repo>))
        .route("/posts/add/", post(handlers::add_post::<Repo>))
        .route("/posts/delete/{id}/", post(handlers::delete_post::<Repo>))
        .route("/posts/like/{id}/", post(handlers::like_post::<Repo>))
        .route(
            "/posts/dislike/{id}/",
            post(handlers::dislike_post::<Repo>),
        )
        .route(
            "/posts/comments/get/{id}/",
            get(handlers::get_comments::<Repo>),
        )
        .route(
            "/posts/comments/add/{id}/",
            post(handlers::add_comment::<Repo>),
        )
        .with_state(state(repo, media))
}

/// Public pages (optional-session layer applied by the caller)
pub fn posts_public_pages_router(repo: PgPostsRepository, media: Arc<MediaStore>) -> Router {
    Router::new()
        .route("/", get(pages::home::<Repo>))
        .route(
            "/show_post/{id}",
            get(pages::show_post::<Repo>).post(pages::show_post_comment::<Repo>),
        )
        .route("/search", get(pages::search::<Repo>))
        .with_state(state(repo, media))
}

/// Account pages and vote routes (session layer applied by the caller)
pub fn posts_account_pages_router(repo: PgPostsRepository, media: Arc<MediaStore>) -> Router {
    Router::new()
        .route("/account/", get(pages::account::<Repo>))
        .route(
            "/account/add_post",
            get(pages::add_post_form).post(pages::add_post_submit::<Repo>),
        )
        .route(
            "/account/edit_post/{id}",
            get(pages::edit_post_form::<Repo>).post(pages::edit_post_submit::<Repo>),
        )
        .route(
            "/account/delete_post/{id}",
            get(pages::delete_post::<Repo>),
        )
        .route(
            "/account/delete_image/{post_id}/{img_id}",
            get(pages::delete_image::<Repo>),
        )
        .route("/like/{post_id}", get(pages::like::<Repo>))
        .route("/dislike/{post_id}", get(pages::dislike::<Repo>))
        .with_state(state(repo, media))
}
