//! Application state shared across handlers.

use std::sync::Arc;

use sqlx::PgPool;
use thiserror::Error;

use ai_stylist_core::AnalysisMode;

use crate::analysis::AnalysisPipeline;
use crate::config::ServerConfig;
use crate::services::{GoogleVerifier, IdentityVerifier, SessionIssuer};
use crate::vision::{OpenAiVisionClient, VisionError};

/// Error assembling the application state.
#[derive(Debug, Error)]
pub enum StateError {
    #[error("live analysis mode requires vision configuration")]
    MissingVisionConfig,
    #[error("vision client error: {0}")]
    Vision(#[from] VisionError),
}

/// Application state shared across all handlers.
///
/// This struct is cheaply cloneable via `Arc` and provides access to
/// shared resources like the database pool and the analysis pipeline.
#[derive(Clone)]
pub struct AppState {
    inner: Arc<AppStateInner>,
}

struct AppStateInner {
    config: ServerConfig,
    pool: PgPool,
    verifier: Arc<dyn IdentityVerifier>,
    sessions: SessionIssuer,
    pipeline: AnalysisPipeline,
}

impl AppState {
    /// Create the application state from configuration.
    ///
    /// The analysis mode is resolved here, once: the pipeline is built
    /// either over the mock catalog or over a live vision client, and the
    /// rest of the system never asks again.
    ///
    /// # Errors
    ///
    /// Returns an error if live mode is configured without vision
    /// credentials or the vision client fails to build.
    pub fn new(config: ServerConfig, pool: PgPool) -> Result<Self, StateError> {
        let pipeline = match config.analysis_mode {
            AnalysisMode::Mock => AnalysisPipeline::mock(None, config.mock_delay),
            AnalysisMode::Live => {
                let vision = config
                    .vision
                    .as_ref()
                    .ok_or(StateError::MissingVisionConfig)?;
                let client = OpenAiVisionClient::new(vision)?;
                AnalysisPipeline::live(Arc::new(client))
            }
        };

        let verifier = Arc::new(GoogleVerifier::new(
            reqwest::Client::new(),
            config.google_client_id.clone(),
        ));
        let sessions = SessionIssuer::new(&config.session_secret);

        Ok(Self::with_parts(config, pool, verifier, sessions, pipeline))
    }

    /// Assemble state from pre-built components.
    ///
    /// Tests use this to inject fake verifiers and pipelines.
    #[must_use]
    pub fn with_parts(
        config: ServerConfig,
        pool: PgPool,
        verifier: Arc<dyn IdentityVerifier>,
        sessions: SessionIssuer,
        pipeline: AnalysisPipeline,
    ) -> Self {
        Self {
            inner: Arc::new(AppStateInner {
                config,
                pool,
                verifier,
                sessions,
                pipeline,
            }),
        }
    }

    /// Get a reference to the server configuration.
    #[must_use]
    pub fn config(&self) -> &ServerConfig {
        &self.inner.config
    }

    /// Get a reference to the database connection pool.
    #[must_use]
    pub fn pool(&self) -> &PgPool {
        &self.inner.pool
    }

    /// Get a reference to the identity verifier.
    #[must_use]
    pub fn verifier(&self) -> &dyn IdentityVerifier {
        self.inner.verifier.as_ref()
    }

    /// Get a reference to the session issuer.
    #[must_use]
    pub fn sessions(&self) -> &SessionIssuer {
        &self.inner.sessions
    }

    /// Get a reference to the analysis pipeline.
    #[must_use]
    pub fn pipeline(&self) -> &AnalysisPipeline {
        &self.inner.pipeline
    }
}
