//! Google ID-token verification.
//!
//! The frontend signs the user in with Google and posts the resulting ID
//! token to `/auth/google`. We verify it server-side: fetch Google's
//! published JWKS, pick the key named by the token's `kid` header, and
//! check the RS256 signature plus the `aud`/`iss`/`exp` claims.

use async_trait::async_trait;
use jsonwebtoken::{Algorithm, DecodingKey, Validation, decode, decode_header};
use serde::Deserialize;
use tracing::instrument;

use super::AuthError;

const GOOGLE_JWKS_URL: &str = "https://www.googleapis.com/oauth2/v3/certs";
const GOOGLE_ISSUERS: [&str; 2] = ["https://accounts.google.com", "accounts.google.com"];

/// Claims extracted from a verified identity token.
#[derive(Debug, Clone, Deserialize)]
pub struct IdentityClaims {
    /// Stable subject identifier, our external-identity key.
    pub sub: String,
    /// Email address, if the token carries one.
    pub email: Option<String>,
    /// Display name, if the token carries one.
    pub name: Option<String>,
    /// Avatar URL, if the token carries one.
    pub picture: Option<String>,
}

/// Capability interface for identity verification.
///
/// The HTTP surface only ever talks to this trait, so tests can substitute
/// a fake that accepts or rejects fixed tokens.
#[async_trait]
pub trait IdentityVerifier: Send + Sync {
    /// Verify an identity token and return its claims.
    ///
    /// # Errors
    ///
    /// Returns [`AuthError`] if the token is invalid for any reason.
    async fn verify(&self, credential: &str) -> Result<IdentityClaims, AuthError>;
}

/// One key from a JWKS document.
#[derive(Debug, Deserialize)]
struct Jwk {
    kid: String,
    n: String,
    e: String,
}

/// A JWKS document as served by Google.
#[derive(Debug, Deserialize)]
struct JwkSet {
    keys: Vec<Jwk>,
}

/// Verifies Google ID tokens against a configured OAuth client ID.
pub struct GoogleVerifier {
    client: reqwest::Client,
    client_id: String,
    jwks_url: String,
}

impl GoogleVerifier {
    /// Create a verifier for the given OAuth client ID (token audience).
    #[must_use]
    pub fn new(client: reqwest::Client, client_id: impl Into<String>) -> Self {
        Self {
            client,
            client_id: client_id.into(),
            jwks_url: GOOGLE_JWKS_URL.to_string(),
        }
    }

    /// Point the verifier at a different JWKS endpoint.
    ///
    /// Used by tests to serve keys locally.
    #[must_use]
    pub fn with_jwks_url(mut self, url: impl Into<String>) -> Self {
        self.jwks_url = url.into();
        self
    }

    async fn fetch_jwks(&self) -> Result<JwkSet, AuthError> {
        let response = self.client.get(&self.jwks_url).send().await?;
        let jwks = response.error_for_status()?.json::<JwkSet>().await?;
        Ok(jwks)
    }

    fn validation(&self) -> Validation {
        let mut validation = Validation::new(Algorithm::RS256);
        validation.set_audience(&[&self.client_id]);
        validation.set_issuer(&GOOGLE_ISSUERS);
        validation
    }
}

#[async_trait]
impl IdentityVerifier for GoogleVerifier {
    #[instrument(skip_all)]
    async fn verify(&self, credential: &str) -> Result<IdentityClaims, AuthError> {
        let header =
            decode_header(credential).map_err(|e| AuthError::InvalidToken(e.to_string()))?;
        let kid = header
            .kid
            .ok_or_else(|| AuthError::InvalidToken("token has no kid header".to_string()))?;

        let jwks = self.fetch_jwks().await?;
        let jwk = jwks
            .keys
            .iter()
            .find(|k| k.kid == kid)
            .ok_or(AuthError::UnknownKey(kid))?;

        let key = DecodingKey::from_rsa_components(&jwk.n, &jwk.e)
            .map_err(|e| AuthError::InvalidToken(e.to_string()))?;

        let data = decode::<IdentityClaims>(credential, &key, &self.validation())
            .map_err(|e| AuthError::InvalidToken(e.to_string()))?;

        Ok(data.claims)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_jwks_document_parses() {
        let json = r#"{
            "keys": [
                {"kty": "RSA", "alg": "RS256", "use": "sig",
                 "kid": "abc123", "n": "modulus", "e": "AQAB"},
                {"kty": "RSA", "alg": "RS256", "use": "sig",
                 "kid": "def456", "n": "modulus2", "e": "AQAB"}
            ]
        }"#;

        let jwks: JwkSet = serde_json::from_str(json).expect("deserialize");
        assert_eq!(jwks.keys.len(), 2);
        assert_eq!(jwks.keys[0].kid, "abc123");
        assert_eq!(jwks.keys[1].e, "AQAB");
    }

    #[test]
    fn test_identity_claims_tolerate_missing_profile_fields() {
        let json = r#"{"sub": "108234", "aud": "x", "iss": "accounts.google.com"}"#;
        let claims: IdentityClaims = serde_json::from_str(json).expect("deserialize");
        assert_eq!(claims.sub, "108234");
        assert!(claims.email.is_none());
        assert!(claims.name.is_none());
    }

    #[tokio::test]
    async fn test_garbage_credential_is_invalid_token() {
        let verifier = GoogleVerifier::new(reqwest::Client::new(), "client-id");
        let err = verifier.verify("not-a-jwt").await.expect_err("must fail");
        assert!(matches!(err, AuthError::InvalidToken(_)));
    }

    #[test]
    fn test_validation_pins_audience_and_issuer() {
        let verifier = GoogleVerifier::new(reqwest::Client::new(), "my-client-id");
        let validation = verifier.validation();
        let audiences = validation.aud.expect("audience set");
        assert!(audiences.contains("my-client-id"));
        let issuers = validation.iss.expect("issuer set");
        assert!(issuers.contains("accounts.google.com"));
    }
}
