use std::sync::Arc;

use anyhow::Result;
use tracing::info;

use crate::auth::hosted::HostedAuthProvider;
use crate::auth::mock::MockAuthProvider;
use crate::auth::storage::LocalStorage;
use crate::auth::{AuthProvider, SessionStore};
use crate::catalog::Catalog;
use crate::config::{AuthBackend, Config};
use crate::errors::AppError;
use crate::gap::analyzer::{GapAnalyzer, SubstringGapAnalyzer};
use crate::resume::ResumeDrafts;

/// Shared application state injected into all route handlers via Axum extractors.
#[derive(Clone)]
pub struct AppState {
    pub catalog: Arc<Catalog>,
    pub session: SessionStore,
    /// Login strategy chosen at startup from `AUTH_PROVIDER`.
    pub auth: Arc<dyn AuthProvider>,
    /// Pluggable gap analyzer. Default: SubstringGapAnalyzer.
    pub gap_analyzer: Arc<dyn GapAnalyzer>,
    /// Per-user resume drafts; in memory only.
    pub resumes: ResumeDrafts,
    pub config: Config,
}

impl AppState {
    /// Wires the catalog, auth provider and session from `config`, then restores
    /// any persisted session before the first request is served.
    pub async fn from_config(config: Config) -> Result<Self> {
        let catalog = Arc::new(Catalog::seeded());

        let auth: Arc<dyn AuthProvider> = match &config.auth_backend {
            AuthBackend::Mock => Arc::new(MockAuthProvider::new(
                catalog.users.clone(),
                config.simulated_latency,
            )),
            AuthBackend::Hosted { url, api_key } => {
                Arc::new(HostedAuthProvider::new(url, api_key.clone())?)
            }
        };
        info!("Auth provider: {}", auth.name());

        let session = SessionStore::new(LocalStorage::new(config.storage_path.clone()));
        session.restore().await;

        Ok(AppState {
            catalog,
            session,
            auth,
            gap_analyzer: Arc::new(SubstringGapAnalyzer),
            resumes: ResumeDrafts::new(),
            config,
        })
    }

    /// The signed-in user's id. Guarded routes always have one; anything else is a 401.
    pub async fn require_user_id(&self) -> Result<String, AppError> {
        self.session
            .current_user()
            .await
            .map(|u| u.id)
            .ok_or(AppError::Unauthorized)
    }
}
