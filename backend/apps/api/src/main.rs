//! API Server Entry Point
//!
//! Application entry point and server initialization.
//! Uses `anyhow` for startup errors, but application-level
//! errors should use `kernel::error::AppError`.

use accounts::middleware::{AccountsMiddlewareState, check_session, require_bearer, require_session};
use accounts::{AccountsConfig, PgAccountsRepository, accounts_api_router, accounts_pages_router};
use axum::{
    Router, http,
    http::{Method, header},
    middleware::from_fn_with_state,
};
use base64::Engine;
use base64::engine::general_purpose;
use platform::media::MediaStore;
use posts::{
    PgPostsRepository, posts_account_pages_router, posts_api_router, posts_public_pages_router,
};
use sqlx::postgres::PgPoolOptions;
use std::env;
use std::net::SocketAddr;
use std::sync::Arc;
use tokio::net::TcpListener;
use tower_http::cors::{AllowHeaders, AllowMethods, CorsLayer};
use tower_http::services::ServeDir;
use tower_http::trace::TraceLayer;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

// Re-export unified error types for use in handlers
pub use kernel::error::{
    app_error::{AppError, AppResult},
    kind::ErrorKind,
};

type Repo = PgAccountsRepository;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Load .env file
    dotenvy::dotenv().ok();

    // Initialize tracing
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env().unwrap_or_else(|_| {
                "api=info,accounts=info,posts=info,tower_http=info".into()
            }),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    // Database connection
    let database_url = env::var("DATABASE_URL").expect("DATABASE_URL must be set in environment");

    let pool = PgPoolOptions::new()
        .max_connections(5)
        .connect(&database_url)
        .await?;

    tracing::info!("Connected to database");

    // Run migrations
    sqlx::migrate!("../../../database/migrations")
        .run(&pool)
        .await?;

    tracing::info!("Migrations completed");

    // Startup cleanup: remove expired sessions
    // Errors here should not prevent server startup
    let accounts_store_for_cleanup = PgAccountsRepository::new(pool.clone());
    match accounts_store_for_cleanup.cleanup_expired().await {
        Ok(sessions) => {
            tracing::info!(sessions_deleted = sessions, "Session cleanup completed");
        }
        Err(e) => {
            tracing::warn!(
                error = %e,
                "Session cleanup failed, continuing anyway"
            );
        }
    }

    // Accounts configuration
    let config = if cfg!(debug_assertions) {
        AccountsConfig::development()
    } else {
        // In production, load secrets from environment
        let session_secret = decode_secret(
            &env::var("SESSION_SECRET").expect("SESSION_SECRET must be set in production"),
        )?;
        let token_secret = decode_secret(
            &env::var("TOKEN_SECRET").expect("TOKEN_SECRET must be set in production"),
        )?;
        let password_pepper = env::var("PASSWORD_PEPPER")
            .ok()
            .map(|p| Engine::decode(&general_purpose::STANDARD, &p))
            .transpose()?;

        AccountsConfig {
            session_secret,
            token_secret,
            password_pepper,
            ..AccountsConfig::default()
        }
    };
    let config = Arc::new(config);

    // Media storage
    let media_root = env::var("MEDIA_ROOT").unwrap_or_else(|_| "media".to_string());
    let media = Arc::new(MediaStore::new(media_root.clone()));

    let accounts_repo = PgAccountsRepository::new(pool.clone());
    let posts_repo = PgPostsRepository::new(pool.clone());

    let mw_state = AccountsMiddlewareState {
        repo: Arc::new(accounts_repo.clone()),
        config: config.clone(),
    };

    // CORS configuration
    let frontend_origins = env::var("FRONTEND_ORIGINS")
        .unwrap_or_else(|_| "http://localhost:8000,http://127.0.0.1:8000".to_string());

    let allowed_origins: Vec<http::HeaderValue> = frontend_origins
        .split(',')
        .filter_map(|origin| origin.trim().parse().ok())
        .collect();

    let cors = CorsLayer::new()
        .allow_origin(allowed_origins)
        .allow_methods(AllowMethods::list([
            Method::GET,
            Method::POST,
            Method::OPTIONS,
        ]))
        .allow_headers(AllowHeaders::list([
            header::CONTENT_TYPE,
            header::AUTHORIZATION,
            header::ACCEPT,
        ]))
        .allow_credentials(true);

    // JSON API: token/register endpoints are public, post endpoints
    // require a bearer token
    let api = accounts_api_router(accounts_repo.clone(), config.clone(), media.clone()).merge(
        posts_api_router(posts_repo.clone(), media.clone())
            .layer(from_fn_with_state(mw_state.clone(), require_bearer::<Repo>)),
    );

    // Page surface: session-gated account pages, optionally-authenticated
    // public pages
    let pages = accounts_pages_router(accounts_repo, config.clone(), media.clone())
        .merge(
            posts_public_pages_router(posts_repo.clone(), media.clone())
                .layer(from_fn_with_state(mw_state.clone(), check_session::<Repo>)),
        )
        .merge(
            posts_account_pages_router(posts_repo, media.clone())
                .layer(from_fn_with_state(mw_state, require_session::<Repo>)),
        );

    // Build router
    let app = Router::new()
        .nest("/api", api)
        .merge(pages)
        .nest_service("/media", ServeDir::new(media_root))
        .layer(TraceLayer::new_for_http())
        .layer(cors);

    // Start server
    let port: u16 = env::var("PORT")
        .ok()
        .and_then(|p| p.parse().ok())
        .unwrap_or(8000);
    let addr = SocketAddr::from(([0, 0, 0, 0], port));
    tracing::info!("Listening on {}", addr);

    let listener = TcpListener::bind(addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}

/// Decode a base64 32-byte secret from the environment
fn decode_secret(b64: &str) -> anyhow::Result<[u8; 32]> {
    let bytes = Engine::decode(&general_purpose::STANDARD, b64)?;
    let mut secret = [0u8; 32];
    if bytes.len() != secret.len() {
        anyhow::bail!("Secret must be {} bytes, got {}", secret.len(), bytes.len());
    }
    secret.copy_from_slice(&bytes);
    Ok(secret)
}
