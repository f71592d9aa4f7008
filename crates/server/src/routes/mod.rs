//! HTTP route handlers.
//!
//! # Route Structure
//!
//! ```text
//! GET  /health              - Liveness check
//! GET  /health/ready        - Readiness check (probes the database)
//!
//! # Auth
//! POST /auth/google         - Verify a Google ID token, upsert the user,
//!                             issue a session token
//!
//! # Analysis
//! POST /analyze             - Critique one outfit photo (JSON base64 or
//!                             multipart field "image")
//!
//! # Wardrobe
//! POST /wardrobe            - Add an item
//! GET  /wardrobe/{user_id}  - List a user's items, newest first
//! ```
//!
//! Exactly one handler per route; the mock/live analysis split is resolved
//! inside the pipeline, never here.

pub mod analyze;
pub mod auth;
pub mod wardrobe;

use axum::{
    Router,
    routing::{get, post},
};

use crate::state::AppState;

/// Create all routes for the server.
pub fn routes() -> Router<AppState> {
    Router::new()
        .route("/auth/google", post(auth::google))
        .route("/analyze", post(analyze::analyze))
        .route("/wardrobe", post(wardrobe::create))
        .route("/wardrobe/{user_id}", get(wardrobe::list))
}
