//! Sign In Use Cases
//!
//! Credential verification backing both surfaces: the page surface gets a
//! session row + signed cookie token, the API surface gets a stateless
//! access/refresh token pair.

use std::sync::Arc;

use crate::application::config::AccountsConfig;
use crate::application::session_token;
use crate::application::token::{TokenPair, TokenSigner};
use crate::domain::entity::{session::Session, user::User};
use crate::domain::repository::{CredentialRepository, SessionRepository, UserRepository};
use crate::domain::value_object::{user_name::UserName, user_password::RawPassword};
use crate::error::{AccountsError, AccountsResult};

/// Sign in input (both surfaces)
pub struct SignInInput {
    pub user_name: String,
    pub password: String,
}

/// Page sign-in output
pub struct SignInOutput {
    /// Signed session token for the cookie
    pub session_token: String,
}

/// Verify a username/password pair against the stores
///
/// Every failure collapses to `InvalidCredentials`; nothing leaks whether
/// the user exists.
async fn verify_credentials<U, C>(
    user_repo: &U,
    credential_repo: &C,
    config: &AccountsConfig,
    input: &SignInInput,
) -> AccountsResult<User>
where
    U: UserRepository,
    C: CredentialRepository,
{
    let user_name = UserName::new(&input.user_name, None)
        .map_err(|_| AccountsError::InvalidCredentials)?;

    let user = user_repo
        .find_by_user_name(&user_name)
        .await?
        .ok_or(AccountsError::InvalidCredentials)?;

    let credential = credential_repo
        .find_by_user_id(&user.user_id)
        .await?
        .ok_or(AccountsError::Internal("Credential not found".to_string()))?;

    let raw_password = RawPassword::new(input.password.clone())
        .map_err(|_| AccountsError::InvalidCredentials)?;

    if !credential.password_hash.verify(&raw_password, config.pepper()) {
        return Err(AccountsError::InvalidCredentials);
    }

    Ok(user)
}

// ============================================================================
// Page surface: session sign-in
// ============================================================================

/// Sign in use case (page surface)
pub struct SignInUseCase<U, C, S>
where
    U: UserRepository,
    C: CredentialRepository,
    S: SessionRepository,
{
    user_repo: Arc<U>,
    credential_repo: Arc<C>,
    session_repo: Arc<S>,
    config: Arc<AccountsConfig>,
}

impl<U, C, S> SignInUseCase<U, C, S>
where
    U: UserRepository,
    C: CredentialRepository,
    S: SessionRepository,
{
    pub fn new(
        user_repo: Arc<U>,
        credential_repo: Arc<C>,
        session_repo: Arc<S>,
        config: Arc<AccountsConfig>,
    ) -> Self {
        Self {
            user_repo,
            credential_repo,
            session_repo,
            config,
        }
    }

    pub async fn execute(&self, input: SignInInput) -> AccountsResult<SignInOutput> {
        let user = verify_credentials(
            self.user_repo.as_ref(),
            self.credential_repo.as_ref(),
            &self.config,
            &input,
        )
        .await?;

        let ttl = chrono::Duration::from_std(self.config.session_ttl)
            .map_err(|e| AccountsError::Internal(format!("Invalid session TTL: {e}")))?;

        let session = Session::new(user.user_id, ttl);
        self.session_repo.create(&session).await?;

        let session_token = session_token::sign(&self.config.session_secret, session.session_id);

        tracing::info!(
            user_id = %user.user_id,
            session_id = %session.session_id,
            "User signed in"
        );

        Ok(SignInOutput { session_token })
    }
}

// ============================================================================
// API surface: token pair issuance
// ============================================================================

/// Token issuance use case (`POST /token/get/`)
pub struct IssueTokensUseCase<U, C>
where
    U: UserRepository,
    C: CredentialRepository,
{
    user_repo: Arc<U>,
    credential_repo: Arc<C>,
    config: Arc<AccountsConfig>,
}

impl<U, C> IssueTokensUseCase<U, C>
where
    U: UserRepository,
    C: CredentialRepository,
{
    pub fn new(user_repo: Arc<U>, credential_repo: Arc<C>, config: Arc<AccountsConfig>) -> Self {
        Self {
            user_repo,
            credential_repo,
            config,
        }
    }

    pub async fn execute(&self, input: SignInInput) -> AccountsResult<TokenPair> {
        let user = verify_credentials(
            self.user_repo.as_ref(),
            self.credential_repo.as_ref(),
            &self.config,
            &input,
        )
        .await?;

        let signer = TokenSigner::from_config(&self.config);
        let pair = signer.issue_pair(&self.config, &user.user_id);

        tracing::info!(user_id = %user.user_id, "Token pair issued");

        Ok(pair)
    }
}
