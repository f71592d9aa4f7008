//! Session-token issuing and verification.
//!
//! After a successful Google sign-in the server hands the frontend a signed
//! HS256 token bound to the user row. The frontend presents it on later
//! requests instead of re-verifying the Google credential each time.

use chrono::{Duration, Utc};
use jsonwebtoken::{Algorithm, DecodingKey, EncodingKey, Header, Validation, decode, encode};
use secrecy::{ExposeSecret, SecretString};
use serde::{Deserialize, Serialize};

use ai_stylist_core::UserId;

use super::AuthError;
use crate::models::User;

/// How long an issued session token stays valid.
const SESSION_TTL_DAYS: i64 = 7;

/// Claims carried by a session token.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SessionClaims {
    /// User row ID.
    pub sub: i32,
    /// Email at issue time, for display without a DB round-trip.
    pub email: Option<String>,
    /// Issued-at, seconds since epoch.
    pub iat: i64,
    /// Expiry, seconds since epoch.
    pub exp: i64,
}

impl SessionClaims {
    /// The user this session belongs to.
    #[must_use]
    pub const fn user_id(&self) -> UserId {
        UserId::new(self.sub)
    }
}

/// Issues and checks signed session tokens.
pub struct SessionIssuer {
    encoding: EncodingKey,
    decoding: DecodingKey,
}

impl SessionIssuer {
    /// Create an issuer from the configured signing secret.
    #[must_use]
    pub fn new(secret: &SecretString) -> Self {
        let bytes = secret.expose_secret().as_bytes();
        Self {
            encoding: EncodingKey::from_secret(bytes),
            decoding: DecodingKey::from_secret(bytes),
        }
    }

    /// Mint a session token for a user, valid for seven days.
    ///
    /// # Errors
    ///
    /// Returns `AuthError::SessionToken` if signing fails.
    pub fn issue(&self, user: &User) -> Result<String, AuthError> {
        let now = Utc::now();
        let claims = SessionClaims {
            sub: user.id.as_i32(),
            email: user.email.clone(),
            iat: now.timestamp(),
            exp: (now + Duration::days(SESSION_TTL_DAYS)).timestamp(),
        };

        Ok(encode(&Header::default(), &claims, &self.encoding)?)
    }

    /// Check a session token and return its claims.
    ///
    /// # Errors
    ///
    /// Returns `AuthError::SessionToken` if the signature is wrong or the
    /// token has expired.
    pub fn verify(&self, token: &str) -> Result<SessionClaims, AuthError> {
        let validation = Validation::new(Algorithm::HS256);
        let data = decode::<SessionClaims>(token, &self.decoding, &validation)?;
        Ok(data.claims)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn test_user() -> User {
        User {
            id: UserId::new(42),
            google_id: "108234".to_string(),
            email: Some("ada@example.com".to_string()),
            name: Some("Ada".to_string()),
            picture: None,
            created_at: None,
        }
    }

    fn issuer() -> SessionIssuer {
        SessionIssuer::new(&SecretString::from("k9!fQ2@xW7#mB4$vN8%jR3^tY6&uI1*e"))
    }

    #[test]
    fn test_issue_verify_round_trip() {
        let issuer = issuer();
        let token = issuer.issue(&test_user()).expect("issue");

        let claims = issuer.verify(&token).expect("verify");
        assert_eq!(claims.user_id(), UserId::new(42));
        assert_eq!(claims.email.as_deref(), Some("ada@example.com"));
    }

    #[test]
    fn test_token_expires_in_seven_days() {
        let issuer = issuer();
        let token = issuer.issue(&test_user()).expect("issue");
        let claims = issuer.verify(&token).expect("verify");

        assert_eq!(claims.exp - claims.iat, SESSION_TTL_DAYS * 24 * 60 * 60);
    }

    #[test]
    fn test_wrong_secret_is_rejected() {
        let token = issuer().issue(&test_user()).expect("issue");

        let other = SessionIssuer::new(&SecretString::from("z5!pL8@qD2#nC6$hG9%fT4^wS7&kM3*a"));
        let err = other.verify(&token).expect_err("must reject");
        assert!(matches!(err, AuthError::SessionToken(_)));
    }

    #[test]
    fn test_tampered_token_is_rejected() {
        let issuer = issuer();
        let mut token = issuer.issue(&test_user()).expect("issue");
        token.push('x');

        assert!(issuer.verify(&token).is_err());
    }
}
