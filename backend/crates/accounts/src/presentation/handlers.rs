//! HTTP Handlers (JSON API)

use axum::Json;
use axum::extract::State;
use axum::http::StatusCode;
use axum::response::IntoResponse;
use platform::media::MediaStore;
use std::sync::Arc;

use crate::application::config::AccountsConfig;
use crate::application::{
    IssueTokensUseCase, RefreshTokenUseCase, RegisterInput, RegisterUseCase, SignInInput,
    TokenSigner,
};
use crate::domain::repository::{
    AccountRepository, CredentialRepository, ProfileRepository, SessionRepository, UserRepository,
};
use crate::error::AccountsResult;
use crate::presentation::dto::{
    AccessTokenResponse, RegisterRequest, TokenObtainRequest, TokenPairResponse,
    TokenRefreshRequest,
};

/// Shared state for accounts handlers
#[derive(Clone)]
pub struct AccountsAppState<R>
where
    R: UserRepository
        + AccountRepository
        + CredentialRepository
        + SessionRepository
        + ProfileRepository
        + Clone
        + Send
        + Sync
        + 'static,
{
    pub repo: Arc<R>,
    pub config: Arc<AccountsConfig>,
    pub media: Arc<MediaStore>,
}

// ============================================================================
// Token issuance
// ============================================================================

/// POST /api/token/get/
pub async fn token_get<R>(
    State(state): State<AccountsAppState<R>>,
    Json(req): Json<TokenObtainRequest>,
) -> AccountsResult<Json<TokenPairResponse>>
where
    R: UserRepository
        + AccountRepository
        + CredentialRepository
        + SessionRepository
        + ProfileRepository
        + Clone
        + Send
        + Sync
        + 'static,
{
    let use_case =
        IssueTokensUseCase::new(state.repo.clone(), state.repo.clone(), state.config.clone());

    let pair = use_case
        .execute(SignInInput {
            user_name: req.username,
            password: req.password,
        })
        .await?;

    Ok(Json(TokenPairResponse {
        access: pair.access,
        refresh: pair.refresh,
    }))
}

/// POST /api/token/refresh/
pub async fn token_refresh<R>(
    State(state): State<AccountsAppState<R>>,
    Json(req): Json<TokenRefreshRequest>,
) -> AccountsResult<Json<AccessTokenResponse>>
where
    R: UserRepository
        + AccountRepository
        + CredentialRepository
        + SessionRepository
        + ProfileRepository
        + Clone
        + Send
        + Sync
        + 'static,
{
    let use_case = RefreshTokenUseCase::new(state.config.clone());
    let access = use_case.execute(&req.refresh)?;

    Ok(Json(AccessTokenResponse { access }))
}

// ============================================================================
// Register
// ============================================================================

/// POST /api/register/
pub async fn register<R>(
    State(state): State<AccountsAppState<R>>,
    Json(req): Json<RegisterRequest>,
) -> AccountsResult<impl IntoResponse>
where
    R: UserRepository
        + AccountRepository
        + CredentialRepository
        + SessionRepository
        + ProfileRepository
        + Clone
        + Send
        + Sync
        + 'static,
{
    let use_case = RegisterUseCase::new(state.repo.clone(), state.config.clone());

    let output = use_case
        .execute(RegisterInput {
            user_name: req.username,
            password1: req.password1,
            password2: req.password2,
            email: req.email,
        })
        .await?;

    // A fresh account gets a token pair straight away
    let signer = TokenSigner::from_config(&state.config);
    let pair = signer.issue_pair(&state.config, &output.user.user_id);

    Ok((
        StatusCode::CREATED,
        Json(TokenPairResponse {
            access: pair.access,
            refresh: pair.refresh,
        }),
    ))
}
