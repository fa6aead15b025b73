//! Register Use Case
//!
//! Creates a new account: user, credential, and profile in one transaction.

use std::sync::Arc;

use crate::application::config::AccountsConfig;
use crate::domain::entity::{credential::Credential, profile::Profile, user::User};
use crate::domain::repository::{AccountRepository, UserRepository};
use crate::domain::value_object::{
    email::Email,
    user_name::UserName,
    user_password::{RawPassword, UserPassword},
};
use crate::error::{AccountsError, AccountsResult};

/// Register input
pub struct RegisterInput {
    pub user_name: String,
    pub password1: String,
    pub password2: String,
    pub email: String,
}

/// Register output
#[derive(Debug)]
pub struct RegisterOutput {
    pub user: User,
}

/// Register use case
pub struct RegisterUseCase<R>
where
    R: UserRepository + AccountRepository,
{
    repo: Arc<R>,
    config: Arc<AccountsConfig>,
}

impl<R> RegisterUseCase<R>
where
    R: UserRepository + AccountRepository,
{
    pub fn new(repo: Arc<R>, config: Arc<AccountsConfig>) -> Self {
        Self { repo, config }
    }

    pub async fn execute(&self, input: RegisterInput) -> AccountsResult<RegisterOutput> {
        // Validate user name
        let user_name = UserName::new(&input.user_name, None)
            .map_err(|e| AccountsError::Validation(e.to_string()))?;

        // Duplicate check comes first: it fails regardless of the other fields
        if self.repo.exists_by_user_name(&user_name).await? {
            return Err(AccountsError::UserNameTaken);
        }

        if input.password1 != input.password2 {
            return Err(AccountsError::PasswordMismatch);
        }

        let email = Email::new(&input.email)?;

        // Validate and hash password
        let raw_password = RawPassword::new(input.password1)?;
        let password_hash = UserPassword::from_raw(&raw_password, self.config.pepper())?;

        let user = User::new(user_name, Some(email));
        let credential = Credential::new(user.user_id, password_hash);
        let profile = Profile::new(user.user_id);

        // One transaction: user, credential, and profile all exist or none do
        self.repo
            .create_account(&user, &credential, &profile)
            .await?;

        tracing::info!(
            user_id = %user.user_id,
            user_name = %user.user_name,
            "User registered"
        );

        Ok(RegisterOutput { user })
    }
}
