//! User repository for database operations.

use chrono::{DateTime, Utc};
use sqlx::PgPool;

use ai_stylist_core::UserId;

use super::RepositoryError;
use crate::models::User;

/// Raw `users` row.
#[derive(Debug, sqlx::FromRow)]
struct UserRow {
    id: i32,
    google_id: Option<String>,
    email: Option<String>,
    name: Option<String>,
    picture: Option<String>,
    created_at: Option<DateTime<Utc>>,
}

impl TryFrom<UserRow> for User {
    type Error = RepositoryError;

    fn try_from(row: UserRow) -> Result<Self, Self::Error> {
        // google_id is nullable in the schema but every row this system
        // writes carries one; a NULL here is corrupt data.
        let google_id = row.google_id.ok_or_else(|| {
            RepositoryError::DataCorruption(format!("user {} has no google_id", row.id))
        })?;

        Ok(Self {
            id: UserId::new(row.id),
            google_id,
            email: row.email,
            name: row.name,
            picture: row.picture,
            created_at: row.created_at,
        })
    }
}

/// Repository for user database operations.
pub struct UserRepository<'a> {
    pool: &'a PgPool,
}

impl<'a> UserRepository<'a> {
    /// Create a new user repository.
    #[must_use]
    pub const fn new(pool: &'a PgPool) -> Self {
        Self { pool }
    }

    /// Insert a user or, if the `google_id` already exists, refresh the
    /// profile fields on the existing row.
    ///
    /// Returns the stored row either way; repeated sign-ins never create
    /// duplicates.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Database` if the query fails.
    pub async fn upsert_by_google_id(
        &self,
        google_id: &str,
        email: Option<&str>,
        name: Option<&str>,
        picture: Option<&str>,
    ) -> Result<User, RepositoryError> {
        let row = sqlx::query_as::<_, UserRow>(
            r"
            INSERT INTO users (google_id, email, name, picture)
            VALUES ($1, $2, $3, $4)
            ON CONFLICT (google_id) DO UPDATE SET name = $3, picture = $4
            RETURNING id, google_id, email, name, picture, created_at
            ",
        )
        .bind(google_id)
        .bind(email)
        .bind(name)
        .bind(picture)
        .fetch_one(self.pool)
        .await?;

        row.try_into()
    }

    /// Get a user by their ID.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Database` if the query fails.
    pub async fn get_by_id(&self, id: UserId) -> Result<Option<User>, RepositoryError> {
        let row = sqlx::query_as::<_, UserRow>(
            r"
            SELECT id, google_id, email, name, picture, created_at
            FROM users
            WHERE id = $1
            ",
        )
        .bind(id.as_i32())
        .fetch_optional(self.pool)
        .await?;

        row.map(User::try_from).transpose()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_row_without_google_id_is_corrupt() {
        let row = UserRow {
            id: 9,
            google_id: None,
            email: None,
            name: None,
            picture: None,
            created_at: None,
        };

        let err = User::try_from(row).expect_err("must reject");
        assert!(matches!(err, RepositoryError::DataCorruption(_)));
    }

    #[test]
    fn test_row_converts_to_domain_user() {
        let row = UserRow {
            id: 1,
            google_id: Some("108234".to_string()),
            email: Some("ada@example.com".to_string()),
            name: Some("Ada".to_string()),
            picture: Some("https://example.com/a.png".to_string()),
            created_at: None,
        };

        let user = User::try_from(row).expect("convert");
        assert_eq!(user.id, UserId::new(1));
        assert_eq!(user.google_id, "108234");
    }
}
