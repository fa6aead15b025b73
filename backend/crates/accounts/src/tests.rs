//! Use-case tests for the accounts crate
//!
//! Runs the use cases against an in-memory repository; no database needed.

use std::collections::HashMap;
use std::sync::{Arc, Mutex};

use kernel::id::UserId;
use uuid::Uuid;

use crate::application::config::AccountsConfig;
use crate::application::{
    CheckSessionUseCase, EditProfileInput, EditProfileUseCase, IssueTokensUseCase, RegisterInput,
    RegisterUseCase, ResetPhotoUseCase, SignInInput, SignInUseCase, SignOutUseCase, TokenKind,
    TokenSigner,
};
use crate::domain::entity::{
    credential::Credential, profile::Profile, session::Session, user::User,
};
use crate::domain::repository::{
    AccountRepository, CredentialRepository, ProfileRepository, SessionRepository, UserRepository,
};
use crate::domain::value_object::user_name::UserName;
use crate::error::{AccountsError, AccountsResult};

// ============================================================================
// In-memory repository
// ============================================================================

#[derive(Default)]
struct MemState {
    users: HashMap<Uuid, User>,
    credentials: HashMap<Uuid, Credential>,
    sessions: HashMap<Uuid, Session>,
    profiles: HashMap<i64, Profile>,
    next_profile_id: i64,
}

#[derive(Clone, Default)]
struct MemAccountsRepository {
    state: Arc<Mutex<MemState>>,
}

impl UserRepository for MemAccountsRepository {
    async fn find_by_id(&self, user_id: &UserId) -> AccountsResult<Option<User>> {
        Ok(self.state.lock().unwrap().users.get(user_id.as_uuid()).cloned())
    }

    async fn find_by_user_name(&self, user_name: &UserName) -> AccountsResult<Option<User>> {
        Ok(self
            .state
            .lock()
            .unwrap()
            .users
            .values()
            .find(|u| u.user_name.canonical() == user_name.canonical())
            .cloned())
    }

    async fn exists_by_user_name(&self, user_name: &UserName) -> AccountsResult<bool> {
        Ok(self
            .state
            .lock()
            .unwrap()
            .users
            .values()
            .any(|u| u.user_name.canonical() == user_name.canonical()))
    }

    async fn update(&self, user: &User) -> AccountsResult<()> {
        self.state
            .lock()
            .unwrap()
            .users
            .insert(*user.user_id.as_uuid(), user.clone());
        Ok(())
    }
}

impl AccountRepository for MemAccountsRepository {
    async fn create_account(
        &self,
        user: &User,
        credential: &Credential,
        profile: &Profile,
    ) -> AccountsResult<()> {
        let mut state = self.state.lock().unwrap();

        if state
            .users
            .values()
            .any(|u| u.user_name.canonical() == user.user_name.canonical())
        {
            return Err(AccountsError::UserNameTaken);
        }

        state.users.insert(*user.user_id.as_uuid(), user.clone());
        state
            .credentials
            .insert(*credential.user_id.as_uuid(), credential.clone());

        state.next_profile_id += 1;
        let mut profile = profile.clone();
        profile.id = state.next_profile_id;
        state.profiles.insert(profile.id, profile);

        Ok(())
    }
}

impl CredentialRepository for MemAccountsRepository {
    async fn find_by_user_id(&self, user_id: &UserId) -> AccountsResult<Option<Credential>> {
        Ok(self
            .state
            .lock()
            .unwrap()
            .credentials
            .get(user_id.as_uuid())
            .cloned())
    }

    async fn update(&self, credential: &Credential) -> AccountsResult<()> {
        self.state
            .lock()
            .unwrap()
            .credentials
            .insert(*credential.user_id.as_uuid(), credential.clone());
        Ok(())
    }
}

impl SessionRepository for MemAccountsRepository {
    async fn create(&self, session: &Session) -> AccountsResult<()> {
        self.state
            .lock()
            .unwrap()
            .sessions
            .insert(session.session_id, session.clone());
        Ok(())
    }

    async fn find_by_id(&self, session_id: Uuid) -> AccountsResult<Option<Session>> {
        Ok(self.state.lock().unwrap().sessions.get(&session_id).cloned())
    }

    async fn update(&self, session: &Session) -> AccountsResult<()> {
        self.state
            .lock()
            .unwrap()
            .sessions
            .insert(session.session_id, session.clone());
        Ok(())
    }

    async fn delete(&self, session_id: Uuid) -> AccountsResult<()> {
        self.state.lock().unwrap().sessions.remove(&session_id);
        Ok(())
    }

    async fn cleanup_expired(&self) -> AccountsResult<u64> {
        let mut state = self.state.lock().unwrap();
        let before = state.sessions.len();
        state.sessions.retain(|_, s| !s.is_expired());
        Ok((before - state.sessions.len()) as u64)
    }
}

impl ProfileRepository for MemAccountsRepository {
    async fn find_by_id(&self, profile_id: i64) -> AccountsResult<Option<Profile>> {
        Ok(self.state.lock().unwrap().profiles.get(&profile_id).cloned())
    }

    async fn find_by_user_id(&self, user_id: &UserId) -> AccountsResult<Option<Profile>> {
        Ok(self
            .state
            .lock()
            .unwrap()
            .profiles
            .values()
            .find(|p| p.user_id == *user_id)
            .cloned())
    }

    async fn update(&self, profile: &Profile) -> AccountsResult<()> {
        self.state
            .lock()
            .unwrap()
            .profiles
            .insert(profile.id, profile.clone());
        Ok(())
    }
}

// ============================================================================
// Helpers
// ============================================================================

fn config() -> Arc<AccountsConfig> {
    Arc::new(AccountsConfig::development())
}

fn register_input(user_name: &str, password: &str, email: &str) -> RegisterInput {
    RegisterInput {
        user_name: user_name.to_string(),
        password1: password.to_string(),
        password2: password.to_string(),
        email: email.to_string(),
    }
}

async fn register(
    repo: &Arc<MemAccountsRepository>,
    config: &Arc<AccountsConfig>,
    user_name: &str,
    password: &str,
) -> User {
    RegisterUseCase::new(repo.clone(), config.clone())
        .execute(register_input(
            user_name,
            password,
            &format!("{user_name}@example.com"),
        ))
        .await
        .unwrap()
        .user
}

fn temp_media() -> Arc<platform::media::MediaStore> {
    let unique = platform::crypto::to_hex(&platform::crypto::random_bytes(8));
    Arc::new(platform::media::MediaStore::new(
        std::env::temp_dir().join(format!("accounts_test_{unique}")),
    ))
}

/// `find_by_user_id` exists on several repository traits; disambiguate.
async fn profile_of(repo: &MemAccountsRepository, user_id: &UserId) -> Profile {
    ProfileRepository::find_by_user_id(repo, user_id)
        .await
        .unwrap()
        .unwrap()
}

// ============================================================================
// Registration
// ============================================================================

mod register_tests {
    use super::*;

    #[tokio::test]
    async fn test_register_creates_user_and_profile() {
        let repo = Arc::new(MemAccountsRepository::default());
        let config = config();

        let user = register(&repo, &config, "alice", "pw12345").await;

        assert_eq!(user.user_name.as_str(), "alice");

        // The profile invariant holds from creation
        let profile = profile_of(&repo, &user.user_id).await;
        assert!(profile.has_placeholder_photo());

        // And the credential is usable
        let credential =
            CredentialRepository::find_by_user_id(repo.as_ref(), &user.user_id)
                .await
                .unwrap()
                .unwrap();
        let raw = crate::domain::value_object::user_password::RawPassword::new(
            "pw12345".to_string(),
        )
        .unwrap();
        assert!(credential.password_hash.verify(&raw, config.pepper()));
    }

    #[tokio::test]
    async fn test_duplicate_username_fails_regardless_of_other_fields() {
        let repo = Arc::new(MemAccountsRepository::default());
        let config = config();

        register(&repo, &config, "alice", "pw12345").await;

        // Same name, different case, different everything else
        let use_case = RegisterUseCase::new(repo.clone(), config.clone());
        let result = use_case
            .execute(register_input("Alice", "other-password", "other@example.com"))
            .await;

        assert!(matches!(&result, Err(AccountsError::UserNameTaken)));
        assert_eq!(result.unwrap_err().status_code().as_u16(), 400);
    }

    #[tokio::test]
    async fn test_password_mismatch_fails() {
        let repo = Arc::new(MemAccountsRepository::default());
        let use_case = RegisterUseCase::new(repo.clone(), config());

        let result = use_case
            .execute(RegisterInput {
                user_name: "alice".to_string(),
                password1: "pw12345".to_string(),
                password2: "pw54321".to_string(),
                email: "alice@example.com".to_string(),
            })
            .await;

        assert!(matches!(result, Err(AccountsError::PasswordMismatch)));
    }

    #[tokio::test]
    async fn test_invalid_email_fails() {
        let repo = Arc::new(MemAccountsRepository::default());
        let use_case = RegisterUseCase::new(repo.clone(), config());

        let result = use_case
            .execute(RegisterInput {
                user_name: "alice".to_string(),
                password1: "pw12345".to_string(),
                password2: "pw12345".to_string(),
                email: "not-an-email".to_string(),
            })
            .await;

        assert!(matches!(result, Err(AccountsError::Validation(_))));
    }

    #[tokio::test]
    async fn test_invalid_username_fails() {
        let repo = Arc::new(MemAccountsRepository::default());
        let use_case = RegisterUseCase::new(repo.clone(), config());

        let result = use_case
            .execute(register_input("a b", "pw12345", "ab@example.com"))
            .await;

        assert!(matches!(result, Err(AccountsError::Validation(_))));
    }
}

// ============================================================================
// Token issuance (API surface)
// ============================================================================

mod token_tests {
    use super::*;

    #[tokio::test]
    async fn test_register_then_tokens_usable_immediately() {
        let repo = Arc::new(MemAccountsRepository::default());
        let config = config();

        let user = register(&repo, &config, "alice", "pw12345").await;

        let use_case = IssueTokensUseCase::new(repo.clone(), repo.clone(), config.clone());
        let pair = use_case
            .execute(SignInInput {
                user_name: "alice".to_string(),
                password: "pw12345".to_string(),
            })
            .await
            .unwrap();

        // The pair authenticates the same user straight away
        let signer = TokenSigner::from_config(&config);
        assert_eq!(
            signer.verify(TokenKind::Access, &pair.access).unwrap(),
            user.user_id
        );
        assert_eq!(
            signer.verify(TokenKind::Refresh, &pair.refresh).unwrap(),
            user.user_id
        );
    }

    #[tokio::test]
    async fn test_wrong_password_rejected() {
        let repo = Arc::new(MemAccountsRepository::default());
        let config = config();

        register(&repo, &config, "alice", "pw12345").await;

        let use_case = IssueTokensUseCase::new(repo.clone(), repo.clone(), config.clone());
        let result = use_case
            .execute(SignInInput {
                user_name: "alice".to_string(),
                password: "wrong-password".to_string(),
            })
            .await;

        assert!(matches!(&result, Err(AccountsError::InvalidCredentials)));
        assert_eq!(result.unwrap_err().status_code().as_u16(), 401);
    }

    #[tokio::test]
    async fn test_unknown_user_rejected_identically() {
        let repo = Arc::new(MemAccountsRepository::default());
        let use_case = IssueTokensUseCase::new(repo.clone(), repo.clone(), config());

        let result = use_case
            .execute(SignInInput {
                user_name: "not_a_user".to_string(),
                password: "whatever1".to_string(),
            })
            .await;

        assert!(matches!(result, Err(AccountsError::InvalidCredentials)));
    }
}

// ============================================================================
// Sessions (page surface)
// ============================================================================

mod session_tests {
    use super::*;

    #[tokio::test]
    async fn test_sign_in_check_sign_out() {
        let repo = Arc::new(MemAccountsRepository::default());
        let config = config();

        let user = register(&repo, &config, "alice", "pw12345").await;

        let sign_in = SignInUseCase::new(
            repo.clone(),
            repo.clone(),
            repo.clone(),
            config.clone(),
        );
        let output = sign_in
            .execute(SignInInput {
                user_name: "alice".to_string(),
                password: "pw12345".to_string(),
            })
            .await
            .unwrap();

        let check = CheckSessionUseCase::new(repo.clone(), config.clone());
        let session = check.get_session(&output.session_token).await.unwrap();
        assert_eq!(session.user_id, user.user_id);

        let sign_out = SignOutUseCase::new(repo.clone(), config.clone());
        sign_out.execute(&output.session_token).await.unwrap();

        assert!(!check.is_valid(&output.session_token).await);
    }

    #[tokio::test]
    async fn test_garbage_session_token_rejected() {
        let repo = Arc::new(MemAccountsRepository::default());
        let check = CheckSessionUseCase::new(repo.clone(), config());

        assert!(!check.is_valid("garbage").await);
        assert!(!check.is_valid("").await);
    }
}

// ============================================================================
// Profile editing
// ============================================================================

mod profile_tests {
    use super::*;
    use platform::media::Upload;

    fn empty_edit() -> EditProfileInput {
        EditProfileInput {
            user_name: None,
            email: None,
            first_name: None,
            last_name: None,
            city: None,
            gender: None,
            emotions: None,
            photo: None,
        }
    }

    #[tokio::test]
    async fn test_edit_details_and_photo() {
        let repo = Arc::new(MemAccountsRepository::default());
        let config = config();
        let media = temp_media();

        let user = register(&repo, &config, "alice", "pw12345").await;

        let use_case = EditProfileUseCase::new(repo.clone(), repo.clone(), media.clone());
        use_case
            .execute(
                &user.user_id,
                EditProfileInput {
                    first_name: Some("Alice".to_string()),
                    city: Some("Kyiv".to_string()),
                    emotions: Some("fine".to_string()),
                    photo: Some(Upload {
                        file_name: "cat.jpg".to_string(),
                        bytes: b"jpeg bytes".to_vec(),
                    }),
                    ..empty_edit()
                },
            )
            .await
            .unwrap();

        let profile = profile_of(&repo, &user.user_id).await;
        assert_eq!(profile.city.as_deref(), Some("Kyiv"));
        assert!(!profile.has_placeholder_photo());
        assert!(media.absolute(&profile.photo).exists());

        let updated = UserRepository::find_by_id(repo.as_ref(), &user.user_id)
            .await
            .unwrap()
            .unwrap();
        assert_eq!(updated.first_name.as_deref(), Some("Alice"));
    }

    #[tokio::test]
    async fn test_placeholder_sentinel_leaves_photo_untouched() {
        let repo = Arc::new(MemAccountsRepository::default());
        let config = config();
        let media = temp_media();

        let user = register(&repo, &config, "alice", "pw12345").await;
        let use_case = EditProfileUseCase::new(repo.clone(), repo.clone(), media.clone());

        use_case
            .execute(
                &user.user_id,
                EditProfileInput {
                    photo: Some(Upload {
                        file_name: "cat.jpg".to_string(),
                        bytes: b"jpeg bytes".to_vec(),
                    }),
                    ..empty_edit()
                },
            )
            .await
            .unwrap();
        let photo_before = profile_of(&repo, &user.user_id).await.photo;

        // Submitting the sentinel must not replace the stored photo
        use_case
            .execute(
                &user.user_id,
                EditProfileInput {
                    photo: Some(Upload {
                        file_name: "user_empty_photo.jpg".to_string(),
                        bytes: b"anything".to_vec(),
                    }),
                    ..empty_edit()
                },
            )
            .await
            .unwrap();

        let photo_after = profile_of(&repo, &user.user_id).await.photo;
        assert_eq!(photo_before, photo_after);
    }

    #[tokio::test]
    async fn test_reset_photo_restores_placeholder_and_deletes_file() {
        let repo = Arc::new(MemAccountsRepository::default());
        let config = config();
        let media = temp_media();

        let user = register(&repo, &config, "alice", "pw12345").await;
        let edit = EditProfileUseCase::new(repo.clone(), repo.clone(), media.clone());
        edit.execute(
            &user.user_id,
            EditProfileInput {
                photo: Some(Upload {
                    file_name: "cat.jpg".to_string(),
                    bytes: b"jpeg bytes".to_vec(),
                }),
                ..empty_edit()
            },
        )
        .await
        .unwrap();

        let profile = profile_of(&repo, &user.user_id).await;
        let stored = profile.photo.clone();
        assert!(media.absolute(&stored).exists());

        let reset = ResetPhotoUseCase::new(repo.clone(), media.clone());
        reset.execute(profile.id).await.unwrap();

        let profile = profile_of(&repo, &user.user_id).await;
        assert!(profile.has_placeholder_photo());
        assert!(!media.absolute(&stored).exists());
    }

    #[tokio::test]
    async fn test_reset_photo_missing_profile_not_found() {
        let repo = Arc::new(MemAccountsRepository::default());
        let media = temp_media();

        let reset = ResetPhotoUseCase::new(repo.clone(), media);
        let result = reset.execute(999).await;
        assert!(matches!(result, Err(AccountsError::ProfileNotFound)));
    }
}
