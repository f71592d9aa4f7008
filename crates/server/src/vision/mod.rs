//! Client for the external vision/completion API.
//!
//! The analysis pipeline talks to an OpenAI-compatible chat-completions
//! endpoint through the [`VisionBackend`] capability trait so tests can
//! substitute a fake.

pub mod client;
pub mod error;
pub mod types;

use async_trait::async_trait;

pub use client::OpenAiVisionClient;
pub use error::VisionError;

/// Capability interface for multimodal completion.
///
/// Takes the instruction prompts plus one image and returns the raw text
/// the model produced. Interpreting that text is the caller's job.
#[async_trait]
pub trait VisionBackend: Send + Sync {
    /// Ask the model to look at `image_url` and answer `instruction` under
    /// the given `system` prompt.
    ///
    /// # Errors
    ///
    /// Returns [`VisionError`] if the upstream call fails.
    async fn complete_vision(
        &self,
        system: &str,
        instruction: &str,
        image_url: &str,
    ) -> Result<String, VisionError>;
}
