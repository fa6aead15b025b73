//! PostgreSQL Repository Implementations

use chrono::{DateTime, Utc};
use kernel::id::UserId;
use sqlx::PgPool;
use uuid::Uuid;

use crate::domain::entity::{
    credential::Credential, profile::Profile, session::Session, user::User,
};
use crate::domain::repository::{
    AccountRepository, CredentialRepository, ProfileRepository, SessionRepository, UserRepository,
};
use crate::domain::value_object::{
    email::Email, user_name::UserName, user_password::UserPassword,
};
use crate::error::{AccountsError, AccountsResult};

/// PostgreSQL-backed accounts repository
#[derive(Clone)]
pub struct PgAccountsRepository {
    pool: PgPool,
}

impl PgAccountsRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    /// Clean up expired sessions
    pub async fn cleanup_expired(&self) -> AccountsResult<u64> {
        let now_ms = Utc::now().timestamp_millis();

        let deleted = sqlx::query("DELETE FROM sessions WHERE expires_at_ms < $1")
            .bind(now_ms)
            .execute(&self.pool)
            .await?
            .rows_affected();

        tracing::info!(sessions_deleted = deleted, "Cleaned up expired sessions");

        Ok(deleted)
    }
}

// ============================================================================
// User Repository Implementation
// ============================================================================

impl UserRepository for PgAccountsRepository {
    async fn find_by_id(&self, user_id: &UserId) -> AccountsResult<Option<User>> {
        let row = sqlx::query_as::<_, UserRow>(
            r#"
            SELECT
                user_id,
                user_name,
                user_name_canonical,
                email,
                first_name,
                last_name,
                created_at,
                updated_at
            FROM users
            WHERE user_id = $1
            "#,
        )
        .bind(user_id.as_uuid())
        .fetch_optional(&self.pool)
        .await?;

        row.map(|r| r.into_user()).transpose()
    }

    async fn find_by_user_name(&self, user_name: &UserName) -> AccountsResult<Option<User>> {
        let row = sqlx::query_as::<_, UserRow>(
            r#"
            SELECT
                user_id,
                user_name,
                user_name_canonical,
                email,
                first_name,
                last_name,
                created_at,
                updated_at
            FROM users
            WHERE user_name_canonical = $1
            "#,
        )
        .bind(user_name.canonical())
        .fetch_optional(&self.pool)
        .await?;

        row.map(|r| r.into_user()).transpose()
    }

    async fn exists_by_user_name(&self, user_name: &UserName) -> AccountsResult<bool> {
        let exists = sqlx::query_scalar::<_, bool>(
            "SELECT EXISTS(SELECT 1 FROM users WHERE user_name_canonical = $1)",
        )
        .bind(user_name.canonical())
        .fetch_one(&self.pool)
        .await?;

        Ok(exists)
    }

    async fn update(&self, user: &User) -> AccountsResult<()> {
        sqlx::query(
            r#"
            UPDATE users SET
                user_name = $2,
                user_name_canonical = $3,
                email = $4,
                first_name = $5,
                last_name = $6,
                updated_at = $7
            WHERE user_id = $1
            "#,
        )
        .bind(user.user_id.as_uuid())
        .bind(user.user_name.original())
        .bind(user.user_name.canonical())
        .bind(user.email.as_ref().map(|e| e.as_str()))
        .bind(&user.first_name)
        .bind(&user.last_name)
        .bind(user.updated_at)
        .execute(&self.pool)
        .await?;

        Ok(())
    }
}

// ============================================================================
// Account Repository Implementation
// ============================================================================

impl AccountRepository for PgAccountsRepository {
    async fn create_account(
        &self,
        user: &User,
        credential: &Credential,
        profile: &Profile,
    ) -> AccountsResult<()> {
        let mut tx = self.pool.begin().await?;

        sqlx::query(
            r#"
            INSERT INTO users (
                user_id,
                user_name,
                user_name_canonical,
                email,
                first_name,
                last_name,
                created_at,
                updated_at
            ) VALUES ($1, $2, $3, $4, $5, $6, $7, $8)
            "#,
        )
        .bind(user.user_id.as_uuid())
        .bind(user.user_name.original())
        .bind(user.user_name.canonical())
        .bind(user.email.as_ref().map(|e| e.as_str()))
        .bind(&user.first_name)
        .bind(&user.last_name)
        .bind(user.created_at)
        .bind(user.updated_at)
        .execute(&mut *tx)
        .await?;

        sqlx::query(
            r#"
            INSERT INTO credentials (
                user_id,
                password_hash,
                created_at,
                updated_at
            ) VALUES ($1, $2, $3, $4)
            "#,
        )
        .bind(credential.user_id.as_uuid())
        .bind(credential.password_hash.as_phc_string())
        .bind(credential.created_at)
        .bind(credential.updated_at)
        .execute(&mut *tx)
        .await?;

        sqlx::query(
            r#"
            INSERT INTO profiles (
                user_id,
                city,
                gender,
                emotions,
                photo
            ) VALUES ($1, $2, $3, $4, $5)
            "#,
        )
        .bind(profile.user_id.as_uuid())
        .bind(&profile.city)
        .bind(&profile.gender)
        .bind(&profile.emotions)
        .bind(&profile.photo)
        .execute(&mut *tx)
        .await?;

        tx.commit().await?;

        Ok(())
    }
}

// ============================================================================
// Credential Repository Implementation
// ============================================================================

impl CredentialRepository for PgAccountsRepository {
    async fn find_by_user_id(&self, user_id: &UserId) -> AccountsResult<Option<Credential>> {
        let row = sqlx::query_as::<_, CredentialRow>(
            r#"
            SELECT
                user_id,
                password_hash,
                created_at,
                updated_at
            FROM credentials
            WHERE user_id = $1
            "#,
        )
        .bind(user_id.as_uuid())
        .fetch_optional(&self.pool)
        .await?;

        row.map(|r| r.into_credential()).transpose()
    }

    async fn update(&self, credential: &Credential) -> AccountsResult<()> {
        sqlx::query(
            r#"
            UPDATE credentials SET
                password_hash = $2,
                updated_at = $3
            WHERE user_id = $1
            "#,
        )
        .bind(credential.user_id.as_uuid())
        .bind(credential.password_hash.as_phc_string())
        .bind(credential.updated_at)
        .execute(&self.pool)
        .await?;

        Ok(())
    }
}

// ============================================================================
// Session Repository Implementation
// ============================================================================

impl SessionRepository for PgAccountsRepository {
    async fn create(&self, session: &Session) -> AccountsResult<()> {
        sqlx::query(
            r#"
            INSERT INTO sessions (
                session_id,
                user_id,
                expires_at_ms,
                created_at,
                last_activity_at
            ) VALUES ($1, $2, $3, $4, $5)
            "#,
        )
        .bind(session.session_id)
        .bind(session.user_id.as_uuid())
        .bind(session.expires_at_ms)
        .bind(session.created_at)
        .bind(session.last_activity_at)
        .execute(&self.pool)
        .await?;

        Ok(())
    }

    async fn find_by_id(&self, session_id: Uuid) -> AccountsResult<Option<Session>> {
        let now_ms = Utc::now().timestamp_millis();

        let row = sqlx::query_as::<_, SessionRow>(
            r#"
            SELECT
                session_id,
                user_id,
                expires_at_ms,
                created_at,
                last_activity_at
            FROM sessions
            WHERE session_id = $1 AND expires_at_ms > $2
            "#,
        )
        .bind(session_id)
        .bind(now_ms)
        .fetch_optional(&self.pool)
        .await?;

        Ok(row.map(|r| r.into_session()))
    }

    async fn update(&self, session: &Session) -> AccountsResult<()> {
        sqlx::query(
            r#"
            UPDATE sessions SET
                expires_at_ms = $2,
                last_activity_at = $3
            WHERE session_id = $1
            "#,
        )
        .bind(session.session_id)
        .bind(session.expires_at_ms)
        .bind(session.last_activity_at)
        .execute(&self.pool)
        .await?;

        Ok(())
    }

    async fn delete(&self, session_id: Uuid) -> AccountsResult<()> {
        sqlx::query("DELETE FROM sessions WHERE session_id = $1")
            .bind(session_id)
            .execute(&self.pool)
            .await?;

        Ok(())
    }

    async fn cleanup_expired(&self) -> AccountsResult<u64> {
        self.cleanup_expired().await
    }
}

// ============================================================================
// Profile Repository Implementation
// ============================================================================

impl ProfileRepository for PgAccountsRepository {
    async fn find_by_id(&self, profile_id: i64) -> AccountsResult<Option<Profile>> {
        let row = sqlx::query_as::<_, ProfileRow>(
            r#"
            SELECT
                id,
                user_id,
                city,
                gender,
                emotions,
                photo
            FROM profiles
            WHERE id = $1
            "#,
        )
        .bind(profile_id)
        .fetch_optional(&self.pool)
        .await?;

        Ok(row.map(|r| r.into_profile()))
    }

    async fn find_by_user_id(&self, user_id: &UserId) -> AccountsResult<Option<Profile>> {
        let row = sqlx::query_as::<_, ProfileRow>(
            r#"
            SELECT
                id,
                user_id,
                city,
                gender,
                emotions,
                photo
            FROM profiles
            WHERE user_id = $1
            "#,
        )
        .bind(user_id.as_uuid())
        .fetch_optional(&self.pool)
        .await?;

        Ok(row.map(|r| r.into_profile()))
    }

    async fn update(&self, profile: &Profile) -> AccountsResult<()> {
        sqlx::query(
            r#"
            UPDATE profiles SET
                city = $2,
                gender = $3,
                emotions = $4,
                photo = $5
            WHERE id = $1
            "#,
        )
        .bind(profile.id)
        .bind(&profile.city)
        .bind(&profile.gender)
        .bind(&profile.emotions)
        .bind(&profile.photo)
        .execute(&self.pool)
        .await?;

        Ok(())
    }
}

// ============================================================================
// Row Types for sqlx mapping
// ============================================================================

#[derive(sqlx::FromRow)]
struct UserRow {
    user_id: Uuid,
    user_name: String,
    #[allow(dead_code)]
    user_name_canonical: String,
    email: Option<String>,
    first_name: Option<String>,
    last_name: Option<String>,
    created_at: DateTime<Utc>,
    updated_at: DateTime<Utc>,
}

impl UserRow {
    fn into_user(self) -> AccountsResult<User> {
        let user_name = UserName::from_db(&self.user_name)
            .map_err(|e| AccountsError::Internal(format!("Invalid user_name: {}", e)))?;

        Ok(User {
            user_id: UserId::from_uuid(self.user_id),
            user_name,
            email: self.email.map(Email::from_db),
            first_name: self.first_name,
            last_name: self.last_name,
            created_at: self.created_at,
            updated_at: self.updated_at,
        })
    }
}

#[derive(sqlx::FromRow)]
struct CredentialRow {
    user_id: Uuid,
    password_hash: String,
    created_at: DateTime<Utc>,
    updated_at: DateTime<Utc>,
}

impl CredentialRow {
    fn into_credential(self) -> AccountsResult<Credential> {
        Ok(Credential {
            user_id: UserId::from_uuid(self.user_id),
            password_hash: UserPassword::from_phc_string(self.password_hash)?,
            created_at: self.created_at,
            updated_at: self.updated_at,
        })
    }
}

#[derive(sqlx::FromRow)]
struct SessionRow {
    session_id: Uuid,
    user_id: Uuid,
    expires_at_ms: i64,
    created_at: DateTime<Utc>,
    last_activity_at: DateTime<Utc>,
}

impl SessionRow {
    fn into_session(self) -> Session {
        Session {
            session_id: self.session_id,
            user_id: UserId::from_uuid(self.user_id),
            expires_at_ms: self.expires_at_ms,
            created_at: self.created_at,
            last_activity_at: self.last_activity_at,
        }
    }
}

#[derive(sqlx::FromRow)]
struct ProfileRow {
    id: i64,
    user_id: Uuid,
    city: Option<String>,
    gender: Option<String>,
    emotions: Option<String>,
    photo: String,
}

impl ProfileRow {
    fn into_profile(self) -> Profile {
        Profile {
            id: self.id,
            user_id: UserId::from_uuid(self.user_id),
            city: self.city,
            gender: self.gender,
            emotions: self.emotions,
            photo: self.photo,
        }
    }
}
