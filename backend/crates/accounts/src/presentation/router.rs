//! Accounts Routers
//!
//! Two surfaces: the token/register JSON API and the login/account pages.
//! Required capability is declared per route group at the wiring site.

use axum::{
    Router,
    middleware::from_fn_with_state,
    routing::{get, post},
};
use platform::media::MediaStore;
use std::sync::Arc;

use crate::application::config::AccountsConfig;
use crate::infra::postgres::PgAccountsRepository;
use crate::presentation::handlers::{self, AccountsAppState};
use crate::presentation::middleware::{AccountsMiddlewareState, require_session};
use crate::presentation::pages;

type Repo = PgAccountsRepository;

/// JSON API router: token issuance, refresh, registration (all public)
pub fn accounts_api_router(
    repo: PgAccountsRepository,
    config: Arc<AccountsConfig>,
    media: Arc<MediaStore>,
) -> Router {
    let state = AccountsAppState {
        repo: Arc::new(repo),
        config,
        media,
    };

    Router::new()
        .route("/token/get/", post(handlers::token_get::<Repo>))
        .route("/token/refresh/", post(handlers::token_refresh::<Repo>))
        .route("/register/", post(handlers::register::<Repo>))
        .with_state(state)
}

/// Page router: login/logout/register plus the session-gated account pages
pub fn accounts_pages_router(
    repo: PgAccountsRepository,
    config: Arc<AccountsConfig>,
    media: Arc<MediaStore>,
) -> Router {
    let repo = Arc::new(repo);

    let state = AccountsAppState {
        repo: repo.clone(),
        config: config.clone(),
        media,
    };

    let mw_state = AccountsMiddlewareState {
        repo,
        config,
    };

    let protected = Router::new()
        .route(
            "/account/edit",
            get(pages::edit_account_form::<Repo>).post(pages::edit_account_submit::<Repo>),
        )
        .route(
            "/account/delete_photo/{id}",
            get(pages::delete_photo::<Repo>),
        )
        .layer(from_fn_with_state(mw_state, require_session::<Repo>));

    Router::new()
        .route(
            "/login/",
            get(pages::login_form).post(pages::login_submit::<Repo>),
        )
        .route("/logout/", get(pages::logout::<Repo>))
        .route(
            "/register/",
            get(pages::register_form).post(pages::register_submit::<Repo>),
        )
        .merge(protected)
        .with_state(state)
}
