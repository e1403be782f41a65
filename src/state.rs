use std::sync::Arc;

use crate::auth::{CredentialStore, SessionTokenService};
use crate::config::AppConfig;
use crate::records::{ScanQueryEngine, ScanRepository};

/// The shared application state.
///
/// Holds the storage pool plus the explicitly constructed components every
/// handler works through. There is no global handle anywhere: everything is
/// composed once here and injected via Axum's state extraction, which also
/// lets tests build the exact same wiring against a throwaway database.
#[derive(Clone)]
pub struct AppState {
    /// The database connection pool.
    pub db: sqlx::SqlitePool,
    /// The application configuration.
    pub config: Arc<AppConfig>,
    /// Account persistence and password verification.
    pub credentials: CredentialStore,
    /// Session-token issuance and verification.
    pub tokens: SessionTokenService,
    /// Scan-record persistence with ownership enforcement.
    pub scans: ScanRepository,
    /// Role-scoped, filtered, paginated listing over scan records.
    pub queries: ScanQueryEngine,
}

impl AppState {
    /// Composes the application state from a connected pool and validated
    /// configuration.
    pub fn new(db: sqlx::SqlitePool, config: AppConfig) -> Self {
        let credentials = CredentialStore::new(db.clone());
        let tokens =
            SessionTokenService::new(&config.auth.jwt_secret, config.auth.token_ttl_hours);
        let scans = ScanRepository::new(db.clone());
        let queries = ScanQueryEngine::new(scans.clone(), config.pagination.clone());

        Self { db, config: Arc::new(config), credentials, tokens, scans, queries }
    }
}
