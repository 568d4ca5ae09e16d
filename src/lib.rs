pub mod auth;
pub mod config;
pub mod db;
pub mod error;
pub mod response;
pub mod users;

use actix_web::HttpResponse;
use sqlx::postgres::PgPoolOptions;
use std::sync::Arc;

pub use config::Settings;
pub use error::AppError;
pub type Result<T> = std::result::Result<T, AppError>;

pub use auth::{
    AuthService, PasswordHasher, RateLimitConfig, RateLimiter, SessionCookieManager, TokenSigner,
};
pub use db::{PgUserStore, User, UserStore};
pub use response::ApiResponse;

/// Health check endpoint handler
/// Returns a JSON response with server status and timestamp
pub async fn health_check() -> HttpResponse {
    HttpResponse::Ok().json(serde_json::json!({
        "status": "healthy",
        "timestamp": chrono::Utc::now().to_rfc3339()
    }))
}

/// Application state shared across all handlers.
#[derive(Clone)]
pub struct AppState {
    pub config: Arc<Settings>,
    pub store: Arc<dyn UserStore>,
    pub auth: Arc<AuthService>,
    pub hasher: PasswordHasher,
    pub cookies: SessionCookieManager,
    pub rate_limiter: Arc<RateLimiter>,
}

impl AppState {
    pub async fn new(config: Settings) -> Result<Self> {
        // Secrets are checked once here, not per request.
        config.validate()?;

        let pool = PgPoolOptions::new()
            .max_connections(config.database.max_connections)
            .connect(&config.database.url)
            .await
            .map_err(|e| AppError::Unavailable(e.to_string()))?;

        let store = PgUserStore::new(Arc::new(pool));
        store.ensure_schema().await?;

        Self::with_store(config, Arc::new(store))
    }

    /// Wires the services around an arbitrary store implementation. Used by
    /// `new` and by tests that substitute an in-memory store.
    pub fn with_store(config: Settings, store: Arc<dyn UserStore>) -> Result<Self> {
        config.validate()?;

        let signer = TokenSigner::new(&config.auth.access_secret, &config.auth.refresh_secret)?;
        let auth = Arc::new(AuthService::new(
            store.clone(),
            signer,
            PasswordHasher::default(),
        ));
        let cookies = SessionCookieManager::new(config.is_production());
        let rate_limiter = Arc::new(RateLimiter::new(RateLimitConfig::default()));

        Ok(Self {
            config: Arc::new(config),
            store,
            auth,
            hasher: PasswordHasher::default(),
            cookies,
            rate_limiter,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_with_store_rejects_missing_secrets() {
        let mut config = Settings::new_for_test().unwrap();
        config.auth.refresh_secret = String::new();

        let store: Arc<dyn UserStore> = Arc::new(db::store::MockUserStore::new());
        let state = AppState::with_store(config, store);
        assert!(matches!(state, Err(AppError::ConfigError(_))));
    }

    #[test]
    fn test_with_store_builds_shared_state() {
        let config = Settings::new_for_test().unwrap();
        let store: Arc<dyn UserStore> = Arc::new(db::store::MockUserStore::new());
        let state = AppState::with_store(config, store).unwrap();

        let cloned = state.clone();
        assert!(Arc::ptr_eq(&state.config, &cloned.config));
        assert!(Arc::ptr_eq(&state.rate_limiter, &cloned.rate_limiter));
    }
}
