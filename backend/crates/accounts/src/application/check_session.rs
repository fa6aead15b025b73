//! Check Session Use Case
//!
//! Verifies the page-surface session cookie and loads the session row.

use std::sync::Arc;

use crate::application::config::AccountsConfig;
use crate::application::session_token;
use crate::domain::entity::session::Session;
use crate::domain::repository::SessionRepository;
use crate::error::{AccountsError, AccountsResult};

/// Check session use case
pub struct CheckSessionUseCase<S>
where
    S: SessionRepository + Clone + Send + Sync + 'static,
{
    session_repo: Arc<S>,
    config: Arc<AccountsConfig>,
}

impl<S> CheckSessionUseCase<S>
where
    S: SessionRepository + Clone + Send + Sync + 'static,
{
    pub fn new(session_repo: Arc<S>, config: Arc<AccountsConfig>) -> Self {
        Self {
            session_repo,
            config,
        }
    }

    /// Just check if a session token is valid
    pub async fn is_valid(&self, session_token: &str) -> bool {
        self.get_session(session_token).await.is_ok()
    }

    /// Get the session behind a token, updating last activity
    pub async fn get_session(&self, session_token: &str) -> AccountsResult<Session> {
        let session_id = session_token::parse(&self.config.session_secret, session_token)?;

        let session = self
            .session_repo
            .find_by_id(session_id)
            .await?
            .ok_or(AccountsError::SessionInvalid)?;

        if session.is_expired() {
            self.session_repo.delete(session_id).await?;
            return Err(AccountsError::SessionInvalid);
        }

        let mut session = session;
        session.touch();

        // Update last activity in the background
        let session_clone = session.clone();
        let repo = self.session_repo.clone();
        tokio::spawn(async move {
            if let Err(e) = repo.update(&session_clone).await {
                tracing::warn!(error = %e, "Failed to update session activity");
            }
        });

        Ok(session)
    }
}
