//! External-credential services.
//!
//! - [`google`] - verifies Google-issued ID tokens against our audience
//! - [`session`] - issues and checks the signed session tokens handed back
//!   to the frontend after sign-in

pub mod google;
pub mod session;

use thiserror::Error;

pub use google::{GoogleVerifier, IdentityClaims, IdentityVerifier};
pub use session::{SessionClaims, SessionIssuer};

/// Errors that can occur during authentication.
///
/// Every variant maps to 401 at the HTTP boundary; the distinction exists
/// for logging and tests, not for callers.
#[derive(Debug, Error)]
pub enum AuthError {
    /// The presented identity token failed verification.
    #[error("invalid identity token: {0}")]
    InvalidToken(String),

    /// Could not fetch the identity provider's signing keys.
    #[error("failed to fetch signing keys: {0}")]
    KeyFetch(#[from] reqwest::Error),

    /// The token references a signing key we do not know.
    #[error("unknown signing key: {0}")]
    UnknownKey(String),

    /// Failed to mint or check a session token.
    #[error("session token error: {0}")]
    SessionToken(#[from] jsonwebtoken::errors::Error),
}
