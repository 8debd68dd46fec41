//! Application state shared across handlers.

use std::sync::Arc;

use crate::config::ServerConfig;
use crate::db::{DocumentStore, StoreError};
use crate::models::{ProjectsDocument, TestimonialsDocument};
use crate::services::auth::{AuthError, TokenService};

/// Error building the application state.
#[derive(Debug, thiserror::Error)]
pub enum StateError {
    #[error("token service: {0}")]
    Auth(#[from] AuthError),
    #[error("document store: {0}")]
    Store(#[from] StoreError),
}

/// Application state shared across all handlers.
///
/// This struct is cheaply cloneable via `Arc` and provides access to shared
/// resources: the configuration, one document store per collection, and the
/// session token service. Stores are constructed once here and injected into
/// handlers through this state; nothing else opens the backing files.
#[derive(Clone)]
pub struct AppState {
    inner: Arc<AppStateInner>,
}

struct AppStateInner {
    config: ServerConfig,
    projects: DocumentStore<ProjectsDocument>,
    testimonials: DocumentStore<TestimonialsDocument>,
    tokens: TokenService,
}

impl AppState {
    /// Create a new application state.
    ///
    /// Opens (or initializes) both collection documents under the configured
    /// data directory and builds the token service from the signing secret.
    ///
    /// # Errors
    ///
    /// Returns an error if the signing secret is unusable or a document
    /// cannot be opened.
    pub async fn new(config: ServerConfig) -> Result<Self, StateError> {
        let tokens = TokenService::new(&config.jwt_secret, config.session_ttl)?;

        let projects =
            DocumentStore::open(&config.data_dir, "projects", ProjectsDocument::default()).await?;
        let testimonials = DocumentStore::open(
            &config.data_dir,
            "testimonials",
            TestimonialsDocument::default(),
        )
        .await?;

        Ok(Self {
            inner: Arc::new(AppStateInner {
                config,
                projects,
                testimonials,
                tokens,
            }),
        })
    }

    /// Get a reference to the server configuration.
    #[must_use]
    pub fn config(&self) -> &ServerConfig {
        &self.inner.config
    }

    /// Get a reference to the projects document store.
    #[must_use]
    pub fn projects(&self) -> &DocumentStore<ProjectsDocument> {
        &self.inner.projects
    }

    /// Get a reference to the testimonials document store.
    #[must_use]
    pub fn testimonials(&self) -> &DocumentStore<TestimonialsDocument> {
        &self.inner.testimonials
    }

    /// Get a reference to the session token service.
    #[must_use]
    pub fn tokens(&self) -> &TokenService {
        &self.inner.tokens
    }
}
