//! Auth Middleware
//!
//! Each route group declares its required capability at the wiring site:
//! - `require_session` - page surface, redirects to the login page
//! - `check_session` - page surface, authentication optional
//! - `require_bearer` - JSON API, 401 on failure
//!
//! All three inject [`CurrentUser`] into request extensions on success.

use axum::extract::{Request, State};
use axum::middleware::Next;
use axum::response::{IntoResponse, Redirect, Response};
use kernel::principal::CurrentUser;
use std::sync::Arc;

use crate::application::config::AccountsConfig;
use crate::application::{CheckSessionUseCase, TokenKind, TokenSigner};
use crate::domain::repository::SessionRepository;
use crate::error::AccountsError;

/// Middleware state
#[derive(Clone)]
pub struct AccountsMiddlewareState<R>
where
    R: SessionRepository + Clone + Send + Sync + 'static,
{
    pub repo: Arc<R>,
    pub config: Arc<AccountsConfig>,
}

/// Middleware that requires a valid page-surface session
pub async fn require_session<R>(
    State(state): State<AccountsMiddlewareState<R>>,
    mut req: Request,
    next: Next,
) -> Result<Response, Response>
where
    R: SessionRepository + Clone + Send + Sync + 'static,
{
    let token =
        platform::cookie::extract_cookie(req.headers(), &state.config.session_cookie_name);

    let use_case = CheckSessionUseCase::new(state.repo.clone(), state.config.clone());

    let session = match token {
        Some(token) => use_case.get_session(&token).await.ok(),
        None => None,
    };

    match session {
        Some(session) => {
            req.extensions_mut()
                .insert(CurrentUser::new(session.user_id));
            Ok(next.run(req).await)
        }
        None => Err(Redirect::to("/login/").into_response()),
    }
}

/// Middleware that checks the session but doesn't require it
///
/// Handlers see `Option<CurrentUser>` in extensions.
pub async fn check_session<R>(
    State(state): State<AccountsMiddlewareState<R>>,
    mut req: Request,
    next: Next,
) -> Response
where
    R: SessionRepository + Clone + Send + Sync + 'static,
{
    let token =
        platform::cookie::extract_cookie(req.headers(), &state.config.session_cookie_name);

    if let Some(token) = token {
        let use_case = CheckSessionUseCase::new(state.repo.clone(), state.config.clone());
        if let Ok(session) = use_case.get_session(&token).await {
            req.extensions_mut()
                .insert(CurrentUser::new(session.user_id));
        }
    }

    next.run(req).await
}

/// Middleware that requires a valid bearer access token
pub async fn require_bearer<R>(
    State(state): State<AccountsMiddlewareState<R>>,
    mut req: Request,
    next: Next,
) -> Result<Response, Response>
where
    R: SessionRepository + Clone + Send + Sync + 'static,
{
    let token = req
        .headers()
        .get(axum::http::header::AUTHORIZATION)
        .and_then(|v| v.to_str().ok())
        .and_then(|v| v.strip_prefix("Bearer "))
        .map(str::trim);

    let Some(token) = token else {
        return Err(AccountsError::TokenInvalid.into_response());
    };

    let signer = TokenSigner::from_config(&state.config);
    match signer.verify(TokenKind::Access, token) {
        Ok(user_id) => {
            req.extensions_mut().insert(CurrentUser::new(user_id));
            Ok(next.run(req).await)
        }
        Err(e) => Err(e.into_response()),
    }
}
