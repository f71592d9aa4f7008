//! The outfit-analysis pipeline.
//!
//! Transforms one photo submission into a structured style critique, in
//! either a deterministic offline mode (canned catalog plus artificial
//! delay) or a live mode backed by the vision API. Callers never see the
//! two modes differently: both return [`AnalysisResult`] or a typed
//! [`AnalysisError`].
//!
//! The mode is injected at construction, resolved once from configuration
//! at startup. The pipeline holds no per-request state and never persists
//! the image or the result.

pub mod catalog;

use std::sync::Arc;
use std::time::Duration;

use base64::Engine as _;
use base64::engine::general_purpose::STANDARD as BASE64;
use thiserror::Error;
use tracing::instrument;

use ai_stylist_core::{AnalysisMode, AnalysisResult};

use crate::vision::{VisionBackend, VisionError};

/// System prompt pinning the model to the stylist role and the strict JSON
/// response shape.
const SYSTEM_PROMPT: &str = "You are a professional stylist. Respond strictly with a JSON object \
     of the shape {\"verdict\": string, \"mistakes\": [string], \
     \"improvements\": [string], \"shopping_tips\": [string]}.";

/// The user-turn instruction sent alongside the photo.
const USER_INSTRUCTION: &str = "Analyze my outfit in this photo.";

/// Errors the pipeline reports to the HTTP surface.
///
/// The surface maps these to status codes; tests assert on the kind, never
/// on message text.
#[derive(Debug, Error)]
pub enum AnalysisError {
    /// The analysis provider was unreachable, timed out, or answered with a
    /// non-success status.
    #[error("analysis provider unavailable: {0}")]
    Unavailable(#[source] VisionError),

    /// The provider answered, but with non-JSON or schema-violating content.
    /// Never retried, never guessed at.
    #[error("analysis provider returned malformed content: {0}")]
    UpstreamFormat(String),
}

/// One outfit-photo submission.
#[derive(Debug, Clone)]
pub enum ImageSource {
    /// A base64 payload or `data:` URL taken from a JSON body.
    Encoded(String),
    /// Raw bytes from a multipart upload, with their content type.
    Bytes {
        data: Vec<u8>,
        content_type: String,
    },
}

impl ImageSource {
    /// True when the submission carries no image data at all.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        match self {
            Self::Encoded(s) => s.trim().is_empty(),
            Self::Bytes { data, .. } => data.is_empty(),
        }
    }

    /// Render the submission as a `data:` URL the vision API accepts.
    ///
    /// Already-formed data URLs pass through untouched; bare base64 and raw
    /// bytes are wrapped.
    #[must_use]
    pub fn to_data_url(&self) -> String {
        match self {
            Self::Encoded(s) => {
                let s = s.trim();
                if s.starts_with("data:") || s.starts_with("http") {
                    s.to_string()
                } else {
                    format!("data:image/jpeg;base64,{s}")
                }
            }
            Self::Bytes { data, content_type } => {
                format!("data:{content_type};base64,{}", BASE64.encode(data))
            }
        }
    }
}

enum PipelineInner {
    Mock {
        catalog: Vec<AnalysisResult>,
        delay: Duration,
    },
    Live {
        backend: Arc<dyn VisionBackend>,
    },
}

/// The analysis pipeline.
///
/// Construct with [`AnalysisPipeline::mock`] or [`AnalysisPipeline::live`];
/// which one is used is decided by configuration in `main`, nowhere else.
pub struct AnalysisPipeline {
    inner: PipelineInner,
}

impl AnalysisPipeline {
    /// Build a mock pipeline serving `catalog` (the built-in catalog when
    /// `None`) after an artificial `delay`.
    ///
    /// # Panics
    ///
    /// Panics if given an explicitly empty catalog; the built-in default is
    /// never empty.
    #[must_use]
    pub fn mock(catalog: Option<Vec<AnalysisResult>>, delay: Duration) -> Self {
        let catalog = catalog.unwrap_or_else(catalog::default_catalog);
        assert!(!catalog.is_empty(), "mock catalog must not be empty");
        Self {
            inner: PipelineInner::Mock { catalog, delay },
        }
    }

    /// Build a live pipeline over the given vision backend.
    #[must_use]
    pub fn live(backend: Arc<dyn VisionBackend>) -> Self {
        Self {
            inner: PipelineInner::Live { backend },
        }
    }

    /// Which mode this pipeline runs in.
    #[must_use]
    pub fn mode(&self) -> AnalysisMode {
        match &self.inner {
            PipelineInner::Mock { .. } => AnalysisMode::Mock,
            PipelineInner::Live { .. } => AnalysisMode::Live,
        }
    }

    /// Produce a critique for one photo submission.
    ///
    /// Exactly one suspension point: the outbound vision call, or the
    /// artificial delay in mock mode. A single attempt per caller request;
    /// retries are the caller's responsibility.
    ///
    /// # Errors
    ///
    /// Returns [`AnalysisError::Unavailable`] when the provider cannot be
    /// reached and [`AnalysisError::UpstreamFormat`] when it answers with
    /// content that violates the JSON contract.
    #[instrument(skip_all, fields(mode = ?self.mode()))]
    pub async fn analyze(&self, image: &ImageSource) -> Result<AnalysisResult, AnalysisError> {
        match &self.inner {
            PipelineInner::Mock { catalog, delay } => {
                // Emulate live latency so UI development sees realistic timing
                tokio::time::sleep(*delay).await;

                let pick = rand::random_range(0..catalog.len());
                #[allow(clippy::indexing_slicing)] // pick is in 0..len by construction
                let entry = catalog[pick].clone();
                Ok(entry)
            }
            PipelineInner::Live { backend } => {
                let text = backend
                    .complete_vision(SYSTEM_PROMPT, USER_INSTRUCTION, &image.to_data_url())
                    .await
                    .map_err(|e| match e {
                        VisionError::Parse(msg) => AnalysisError::UpstreamFormat(msg),
                        other => AnalysisError::Unavailable(other),
                    })?;

                let result: AnalysisResult = serde_json::from_str(&text)
                    .map_err(|e| AnalysisError::UpstreamFormat(e.to_string()))?;

                result
                    .validate()
                    .map_err(|e| AnalysisError::UpstreamFormat(e.to_string()))?;

                Ok(result)
            }
        }
    }
}
