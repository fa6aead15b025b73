//! Sign Out Use Case
//!
//! Invalidates a page-surface session.

use std::sync::Arc;

use crate::application::config::AccountsConfig;
use crate::application::session_token;
use crate::domain::repository::SessionRepository;
use crate::error::AccountsResult;

/// Sign out use case
pub struct SignOutUseCase<S>
where
    S: SessionRepository,
{
    session_repo: Arc<S>,
    config: Arc<AccountsConfig>,
}

impl<S> SignOutUseCase<S>
where
    S: SessionRepository,
{
    pub fn new(session_repo: Arc<S>, config: Arc<AccountsConfig>) -> Self {
        Self {
            session_repo,
            config,
        }
    }

    /// Sign out from the current session
    pub async fn execute(&self, session_token: &str) -> AccountsResult<()> {
        let session_id = session_token::parse(&self.config.session_secret, session_token)?;
        self.session_repo.delete(session_id).await?;

        tracing::info!(session_id = %session_id, "User signed out");
        Ok(())
    }
}
