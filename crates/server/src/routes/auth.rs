//! Google sign-in route.

use axum::{Json, extract::State};
use serde::{Deserialize, Serialize};

use crate::db::UserRepository;
use crate::error::{AppError, Result};
use crate::models::User;
use crate::state::AppState;

/// Request body for `POST /auth/google`.
#[derive(Debug, Deserialize)]
pub struct GoogleAuthRequest {
    /// The Google-issued ID token from the frontend sign-in flow.
    pub credential: String,
}

/// Response from a successful sign-in.
#[derive(Debug, Serialize)]
pub struct GoogleAuthResponse {
    /// Session token for subsequent requests, valid seven days.
    pub token: String,
    /// The upserted user row.
    pub user: User,
}

/// Verify a Google ID token, upsert the user, and issue a session token.
///
/// POST /auth/google
///
/// Signing in twice with the same Google account refreshes name/picture on
/// the existing row; it never creates a duplicate.
///
/// # Errors
///
/// 401 `{"error":"Invalid Google token"}` when verification fails; 500 when
/// the upsert or token signing fails.
pub async fn google(
    State(state): State<AppState>,
    Json(request): Json<GoogleAuthRequest>,
) -> Result<Json<GoogleAuthResponse>> {
    let claims = state.verifier().verify(&request.credential).await?;

    let user = UserRepository::new(state.pool())
        .upsert_by_google_id(
            &claims.sub,
            claims.email.as_deref(),
            claims.name.as_deref(),
            claims.picture.as_deref(),
        )
        .await?;

    let token = state.sessions().issue(&user).map_err(|e| {
        tracing::error!(error = %e, "failed to sign session token");
        AppError::Internal("Internal server error".to_string())
    })?;

    tracing::info!(user_id = %user.id, "user signed in");
    Ok(Json(GoogleAuthResponse { token, user }))
}
