//! User domain types.

use chrono::{DateTime, Utc};
use serde::Serialize;

use ai_stylist_core::UserId;

/// A stylist user (domain type).
///
/// Created and updated via upsert keyed on `google_id`; never deleted.
/// Serialized as-is in the `/auth/google` response.
#[derive(Debug, Clone, Serialize)]
pub struct User {
    /// Unique user ID.
    pub id: UserId,
    /// Google subject claim, the external-identity key.
    pub google_id: String,
    /// User's email address.
    pub email: Option<String>,
    /// Display name from the Google profile.
    pub name: Option<String>,
    /// Avatar URL from the Google profile.
    pub picture: Option<String>,
    /// When the user was first seen.
    pub created_at: Option<DateTime<Utc>>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_user_serializes_with_plain_id() {
        let user = User {
            id: UserId::new(1),
            google_id: "108234".to_string(),
            email: Some("ada@example.com".to_string()),
            name: Some("Ada".to_string()),
            picture: None,
            created_at: None,
        };

        let json = serde_json::to_value(&user).expect("serialize");
        assert_eq!(json["id"], 1);
        assert_eq!(json["email"], "ada@example.com");
        assert!(json["picture"].is_null());
    }
}
