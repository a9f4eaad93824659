//! HTTP API for DocuNest.
//!
//! Guest routes (`/api/guest/...`) run every request through the
//! [`AccessEngine`]; owner routes (`/api/documents/...`) go through the
//! [`DocumentService`]. Stored files are served from `/files/{key}` when the
//! server owns a local disk store.

pub mod config;
pub mod error;
pub mod identity;

mod files;
mod guest;
mod owner;

use anyhow::{Context, Result};
use axum::extract::{DefaultBodyLimit, FromRequestParts};
use axum::http::request::Parts;
use axum::http::HeaderMap;
use axum::routing::{get, patch, post, put};
use axum::{Json, Router};
use docunest_access::{AccessEngine, Caller, DocumentService, IdentityProvider};
use docunest_blobstore::LocalDiskStorage;
use docunest_crypto::{PasswordCipher, PasswordVerifier};
use docunest_storage::SqliteDocumentStore;
use serde::{Deserialize, Serialize};
use std::convert::Infallible;
use std::sync::Arc;
use tracing::info;

pub use config::{Args, ServerConfig, SECRET_ENV};
pub use error::{ApiError, ErrorBody};
pub use identity::HeaderIdentity;

/// Room for multipart framing and text fields on top of the file itself.
const MULTIPART_OVERHEAD: u64 = 64 * 1024;

/// Shared handler state.
#[derive(Clone)]
pub struct AppState {
    engine: Arc<AccessEngine>,
    service: Arc<DocumentService>,
    identity: Arc<dyn IdentityProvider<Request = HeaderMap>>,
    files: Option<Arc<LocalDiskStorage>>,
}

impl AppState {
    pub fn new(
        engine: AccessEngine,
        service: DocumentService,
        identity: Arc<dyn IdentityProvider<Request = HeaderMap>>,
    ) -> Self {
        Self {
            engine: Arc::new(engine),
            service: Arc::new(service),
            identity,
            files: None,
        }
    }

    /// Serves objects of `storage` under `/files/{key}`.
    pub fn with_file_server(mut self, storage: Arc<LocalDiskStorage>) -> Self {
        self.files = Some(storage);
        self
    }
}

/// The caller resolved by the configured identity provider.
pub(crate) struct CurrentCaller(pub Caller);

impl FromRequestParts<AppState> for CurrentCaller {
    type Rejection = Infallible;

    async fn from_request_parts(
        parts: &mut Parts,
        state: &AppState,
    ) -> Result<Self, Self::Rejection> {
        Ok(CurrentCaller(state.identity.current_caller(&parts.headers)))
    }
}

#[derive(Serialize, Deserialize, Clone, Debug, PartialEq)]
pub struct HealthResponse {
    pub status: String,
    pub version: String,
}

async fn health_handler() -> Json<HealthResponse> {
    Json(HealthResponse {
        status: "ok".to_string(),
        version: env!("CARGO_PKG_VERSION").to_string(),
    })
}

/// Build the HTTP API router.
pub fn build_router(state: AppState) -> Router {
    let max_body = state
        .service
        .upload_policy()
        .max_bytes
        .saturating_add(MULTIPART_OVERHEAD);
    let max_body = usize::try_from(max_body).unwrap_or(usize::MAX);

    Router::new()
        .route("/api/health", get(health_handler))
        .route("/api/guest/documents", get(guest::list_public))
        .route("/api/guest/documents/{id}", get(guest::metadata))
        .route("/api/guest/documents/{id}/view", get(guest::view))
        .route("/api/guest/documents/{id}/download", post(guest::download))
        .route(
            "/api/documents",
            get(owner::list_mine)
                .post(owner::upload)
                .layer(DefaultBodyLimit::max(max_body)),
        )
        .route(
            "/api/documents/{id}",
            get(owner::get_document).delete(owner::delete_document),
        )
        .route("/api/documents/{id}/public", patch(owner::set_visibility))
        .route("/api/documents/{id}/password", put(owner::set_password))
        .route("/files/{key}", get(files::serve))
        .with_state(state)
}

/// Wires the production collaborators from a validated configuration.
pub async fn build_state(config: &ServerConfig) -> Result<AppState> {
    let documents = Arc::new(
        SqliteDocumentStore::open(&config.database)
            .with_context(|| format!("failed to open database {}", config.database.display()))?,
    );
    let storage = Arc::new(
        LocalDiskStorage::open(&config.storage_dir, config.public_base_url.as_str())
            .await
            .with_context(|| {
                format!("failed to open storage dir {}", config.storage_dir.display())
            })?,
    );

    let secret = config.secret.clone();
    let kdf = config.kdf.clone();
    let cipher = tokio::task::spawn_blocking(move || PasswordCipher::with_params(&secret, &kdf))
        .await
        .context("key derivation task failed")?
        .context("failed to derive password encryption key")?;
    let cipher = Arc::new(cipher);
    info!("password encryption key derived");

    let engine = AccessEngine::new(
        documents.clone(),
        storage.clone(),
        PasswordVerifier::new(cipher.clone()),
    );
    let service = DocumentService::new(documents, storage.clone(), cipher, config.upload_policy);
    let identity = Arc::new(HeaderIdentity::new(config.identity_header.clone()));

    Ok(AppState::new(engine, service, identity).with_file_server(storage))
}
