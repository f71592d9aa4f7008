//! Vision API client over an OpenAI-compatible chat-completions endpoint.

use std::sync::Arc;
use std::time::Duration;

use async_trait::async_trait;
use reqwest::header::{AUTHORIZATION, CONTENT_TYPE, HeaderMap, HeaderValue};
use secrecy::ExposeSecret;
use tracing::instrument;

use crate::config::VisionConfig;

use super::VisionBackend;
use super::error::VisionError;
use super::types::{ChatMessage, ChatRequest, ChatResponse, ResponseFormat};

const CONNECT_TIMEOUT: Duration = Duration::from_secs(10);

/// Chat-completions client for outfit analysis.
///
/// Cheap to clone; the underlying HTTP client and configuration live behind
/// an `Arc`.
#[derive(Clone)]
pub struct OpenAiVisionClient {
    inner: Arc<VisionClientInner>,
}

struct VisionClientInner {
    client: reqwest::Client,
    model: String,
    completions_url: String,
}

impl OpenAiVisionClient {
    /// Create a new vision client.
    ///
    /// The total per-request timeout comes from `config.timeout`, so a hung
    /// upstream can never suspend a request indefinitely.
    ///
    /// # Errors
    ///
    /// Returns `VisionError::Parse` if the API key is not a valid header
    /// value, or `VisionError::Http` if the HTTP client fails to build.
    pub fn new(config: &VisionConfig) -> Result<Self, VisionError> {
        let mut headers = HeaderMap::new();
        headers.insert(CONTENT_TYPE, HeaderValue::from_static("application/json"));

        let auth_value = format!("Bearer {}", config.api_key.expose_secret());
        let mut auth_header = HeaderValue::from_str(&auth_value)
            .map_err(|e| VisionError::Parse(format!("Invalid API key format: {e}")))?;
        auth_header.set_sensitive(true);
        headers.insert(AUTHORIZATION, auth_header);

        let client = reqwest::Client::builder()
            .default_headers(headers)
            .timeout(config.timeout)
            .connect_timeout(CONNECT_TIMEOUT)
            .build()?;

        Ok(Self {
            inner: Arc::new(VisionClientInner {
                client,
                model: config.model.clone(),
                completions_url: format!(
                    "{}/chat/completions",
                    config.base_url.trim_end_matches('/')
                ),
            }),
        })
    }

    async fn send_once(&self, request: &ChatRequest) -> Result<String, VisionError> {
        let response = self
            .inner
            .client
            .post(&self.inner.completions_url)
            .json(request)
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            let message = response.text().await.unwrap_or_default();
            return Err(VisionError::Api {
                status: status.as_u16(),
                message,
            });
        }

        let body: ChatResponse = response
            .json()
            .await
            .map_err(|e| VisionError::Parse(e.to_string()))?;

        body.choices
            .into_iter()
            .next()
            .and_then(|choice| choice.message.content)
            .ok_or_else(|| VisionError::Parse("response has no message content".to_string()))
    }
}

#[async_trait]
impl VisionBackend for OpenAiVisionClient {
    /// One bounded-timeout attempt, retried once on transport failure only.
    /// Upstream error statuses and malformed bodies are never retried.
    #[instrument(skip_all, fields(model = %self.inner.model))]
    async fn complete_vision(
        &self,
        system: &str,
        instruction: &str,
        image_url: &str,
    ) -> Result<String, VisionError> {
        let request = ChatRequest {
            model: self.inner.model.clone(),
            messages: vec![
                ChatMessage::system(system),
                ChatMessage::user_with_image(instruction, image_url),
            ],
            response_format: Some(ResponseFormat::json_object()),
        };

        match self.send_once(&request).await {
            Err(err) if err.is_transport() => {
                tracing::warn!(error = %err, "vision call failed in transit, retrying once");
                self.send_once(&request).await
            }
            other => other,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use secrecy::SecretString;

    fn test_config() -> VisionConfig {
        VisionConfig {
            api_key: SecretString::from("sk-test-0000"),
            model: "gpt-4o-mini".to_string(),
            base_url: "https://api.openai.com/v1".to_string(),
            timeout: Duration::from_secs(20),
        }
    }

    #[test]
    fn test_completions_url_is_joined_without_double_slash() {
        let mut config = test_config();
        config.base_url = "https://api.openai.com/v1/".to_string();

        let client = OpenAiVisionClient::new(&config).expect("build");
        assert_eq!(
            client.inner.completions_url,
            "https://api.openai.com/v1/chat/completions"
        );
    }

    #[test]
    fn test_client_is_clone_send_sync() {
        fn assert_clone<T: Clone>() {}
        fn assert_send_sync<T: Send + Sync>() {}
        assert_clone::<OpenAiVisionClient>();
        assert_send_sync::<OpenAiVisionClient>();
    }

    #[tokio::test]
    async fn test_unreachable_host_surfaces_http_error() {
        let mut config = test_config();
        // Reserved TEST-NET address, nothing listens there
        config.base_url = "http://192.0.2.1:9".to_string();
        config.timeout = Duration::from_millis(200);

        let client = OpenAiVisionClient::new(&config).expect("build");
        let err = client
            .complete_vision("stylist", "analyze", "data:image/jpeg;base64,AAAA")
            .await
            .expect_err("must fail");
        assert!(matches!(err, VisionError::Http(_)));
    }
}
