//! Outfit-analysis route.

use axum::{
    Json,
    extract::{FromRequest, Multipart, Request, State},
    http::header::CONTENT_TYPE,
};
use serde::Deserialize;

use ai_stylist_core::AnalysisResult;

use crate::analysis::ImageSource;
use crate::error::{AppError, Result};
use crate::state::AppState;

/// JSON request body for `POST /analyze`.
#[derive(Debug, Deserialize)]
pub struct AnalyzeRequest {
    /// Base64 payload or `data:` URL of the outfit photo.
    pub image: String,
}

/// Extractor accepting either encoding of an outfit photo: a JSON body
/// with a base64 `image` field, or a multipart upload with a file field
/// named `image`.
#[derive(Debug)]
pub struct AnalyzeSubmission(pub ImageSource);

impl FromRequest<AppState> for AnalyzeSubmission {
    type Rejection = AppError;

    async fn from_request(req: Request, state: &AppState) -> Result<Self> {
        let is_multipart = req
            .headers()
            .get(CONTENT_TYPE)
            .and_then(|v| v.to_str().ok())
            .is_some_and(|ct| ct.starts_with("multipart/form-data"));

        if is_multipart {
            let mut multipart = Multipart::from_request(req, state)
                .await
                .map_err(|e| AppError::BadRequest(e.to_string()))?;

            while let Some(field) = multipart
                .next_field()
                .await
                .map_err(|e| AppError::BadRequest(e.to_string()))?
            {
                if field.name() == Some("image") {
                    let content_type = field
                        .content_type()
                        .unwrap_or("image/jpeg")
                        .to_string();
                    let data = field
                        .bytes()
                        .await
                        .map_err(|e| AppError::BadRequest(e.to_string()))?;

                    return Ok(Self(ImageSource::Bytes {
                        data: data.to_vec(),
                        content_type,
                    }));
                }
            }

            return Err(AppError::BadRequest(
                "multipart body has no 'image' field".to_string(),
            ));
        }

        let Json(body): Json<AnalyzeRequest> = Json::from_request(req, state)
            .await
            .map_err(|e| AppError::BadRequest(e.to_string()))?;

        Ok(Self(ImageSource::Encoded(body.image)))
    }
}

/// Critique one outfit photo.
///
/// POST /analyze
///
/// Whether the critique comes from the mock catalog or the live vision
/// service is server configuration; the response shape is identical.
///
/// # Errors
///
/// 400 for an empty image, 502 when the analysis provider is unreachable,
/// 500 when it returns malformed content.
pub async fn analyze(
    State(state): State<AppState>,
    AnalyzeSubmission(image): AnalyzeSubmission,
) -> Result<Json<AnalysisResult>> {
    if image.is_empty() {
        return Err(AppError::BadRequest("image must not be empty".to_string()));
    }

    let result = state.pipeline().analyze(&image).await?;
    Ok(Json(result))
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Arc;
    use std::time::Duration;

    use axum::http::StatusCode;
    use secrecy::SecretString;
    use sqlx::postgres::PgPoolOptions;

    use ai_stylist_core::AnalysisMode;

    use crate::analysis::AnalysisPipeline;
    use crate::config::ServerConfig;
    use crate::services::{GoogleVerifier, SessionIssuer};

    fn mock_state() -> AppState {
        let config = ServerConfig {
            database_url: SecretString::from("postgres://localhost/unused"),
            host: "127.0.0.1".parse().expect("addr"),
            port: 5000,
            google_client_id: "client-id.apps.googleusercontent.com".to_string(),
            session_secret: SecretString::from("k9!fQ2@xW7#mB4$vN8%jR3^tY6&uI1*e"),
            analysis_mode: AnalysisMode::Mock,
            mock_delay: Duration::ZERO,
            vision: None,
            cors_allowed_origins: vec![],
        };

        // Lazy pool: never connects unless a handler touches the database
        let pool = PgPoolOptions::new()
            .connect_lazy("postgres://localhost/unused")
            .expect("lazy pool");

        let verifier = Arc::new(GoogleVerifier::new(
            reqwest::Client::new(),
            config.google_client_id.clone(),
        ));
        let sessions = SessionIssuer::new(&config.session_secret);
        let pipeline = AnalysisPipeline::mock(None, Duration::ZERO);

        AppState::with_parts(config, pool, verifier, sessions, pipeline)
    }

    #[tokio::test]
    async fn test_analyze_mock_returns_complete_result() {
        let state = mock_state();
        let submission = AnalyzeSubmission(ImageSource::Encoded(
            "data:image/jpeg;base64,AAAA".to_string(),
        ));

        let Json(result) = analyze(State(state), submission).await.expect("analyze");
        assert!(!result.verdict.trim().is_empty());
    }

    #[tokio::test]
    async fn test_analyze_rejects_empty_image() {
        let state = mock_state();
        let submission = AnalyzeSubmission(ImageSource::Encoded(String::new()));

        let err = analyze(State(state), submission)
            .await
            .expect_err("must reject");
        assert!(matches!(err, AppError::BadRequest(_)));
    }

    #[tokio::test]
    async fn test_json_submission_extraction() {
        use axum::body::Body;
        use axum::http::header::CONTENT_TYPE;

        let state = mock_state();
        let req = axum::http::Request::builder()
            .method("POST")
            .uri("/analyze")
            .header(CONTENT_TYPE, "application/json")
            .body(Body::from(r#"{"image": "QUJD"}"#))
            .expect("request");

        let AnalyzeSubmission(image) = AnalyzeSubmission::from_request(req, &state)
            .await
            .expect("extract");
        assert_eq!(image.to_data_url(), "data:image/jpeg;base64,QUJD");
    }

    #[tokio::test]
    async fn test_body_without_image_field_is_bad_request() {
        use axum::body::Body;
        use axum::http::header::CONTENT_TYPE;
        use axum::response::IntoResponse;

        let state = mock_state();
        let req = axum::http::Request::builder()
            .method("POST")
            .uri("/analyze")
            .header(CONTENT_TYPE, "application/json")
            .body(Body::from(r#"{"photo": "QUJD"}"#))
            .expect("request");

        let err = AnalyzeSubmission::from_request(req, &state)
            .await
            .expect_err("must reject");
        assert_eq!(err.into_response().status(), StatusCode::BAD_REQUEST);
    }
}
