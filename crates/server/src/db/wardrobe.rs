//! Wardrobe repository for database operations.

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use sqlx::PgPool;

use ai_stylist_core::{UserId, WardrobeItemId};

use super::RepositoryError;
use crate::models::{NewWardrobeItem, WardrobeItem};

/// Raw `wardrobe_items` row.
#[derive(Debug, sqlx::FromRow)]
struct WardrobeItemRow {
    id: i32,
    user_id: Option<i32>,
    category: String,
    color: Option<String>,
    season: Option<String>,
    occasion: Option<String>,
    purchase_price: Option<Decimal>,
    image_url: Option<String>,
    created_at: Option<DateTime<Utc>>,
}

impl TryFrom<WardrobeItemRow> for WardrobeItem {
    type Error = RepositoryError;

    fn try_from(row: WardrobeItemRow) -> Result<Self, Self::Error> {
        let user_id = row.user_id.ok_or_else(|| {
            RepositoryError::DataCorruption(format!("wardrobe item {} has no owner", row.id))
        })?;

        Ok(Self {
            id: WardrobeItemId::new(row.id),
            user_id: UserId::new(user_id),
            category: row.category,
            color: row.color,
            season: row.season,
            occasion: row.occasion,
            purchase_price: row.purchase_price.unwrap_or_default(),
            image_url: row.image_url,
            created_at: row.created_at,
        })
    }
}

/// Repository for wardrobe database operations.
pub struct WardrobeRepository<'a> {
    pool: &'a PgPool,
}

impl<'a> WardrobeRepository<'a> {
    /// Create a new wardrobe repository.
    #[must_use]
    pub const fn new(pool: &'a PgPool) -> Self {
        Self { pool }
    }

    /// Insert a wardrobe item and return the stored row.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::UnknownReference` if `user_id` does not
    /// reference an existing user (foreign-key violation).
    /// Returns `RepositoryError::Database` for other database errors.
    pub async fn insert(&self, item: &NewWardrobeItem) -> Result<WardrobeItem, RepositoryError> {
        let row = sqlx::query_as::<_, WardrobeItemRow>(
            r"
            INSERT INTO wardrobe_items
                (user_id, category, color, season, occasion, purchase_price, image_url)
            VALUES ($1, $2, $3, $4, $5, $6, $7)
            RETURNING id, user_id, category, color, season, occasion,
                      purchase_price, image_url, created_at
            ",
        )
        .bind(item.user_id.as_i32())
        .bind(&item.category)
        .bind(&item.color)
        .bind(&item.season)
        .bind(&item.occasion)
        .bind(item.purchase_price)
        .bind(&item.image_url)
        .fetch_one(self.pool)
        .await
        .map_err(|e| {
            if let sqlx::Error::Database(ref db_err) = e
                && db_err.is_foreign_key_violation()
            {
                return RepositoryError::UnknownReference(format!(
                    "user {} does not exist",
                    item.user_id
                ));
            }
            RepositoryError::Database(e)
        })?;

        row.try_into()
    }

    /// List a user's wardrobe, newest first.
    ///
    /// A user with no items yields an empty list, not an error.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Database` if the query fails.
    pub async fn list_for_user(
        &self,
        user_id: UserId,
    ) -> Result<Vec<WardrobeItem>, RepositoryError> {
        let rows = sqlx::query_as::<_, WardrobeItemRow>(
            r"
            SELECT id, user_id, category, color, season, occasion,
                   purchase_price, image_url, created_at
            FROM wardrobe_items
            WHERE user_id = $1
            ORDER BY created_at DESC
            ",
        )
        .bind(user_id.as_i32())
        .fetch_all(self.pool)
        .await?;

        rows.into_iter().map(WardrobeItem::try_from).collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_null_price_defaults_to_zero() {
        let row = WardrobeItemRow {
            id: 1,
            user_id: Some(1),
            category: "jacket".to_string(),
            color: None,
            season: None,
            occasion: None,
            purchase_price: None,
            image_url: None,
            created_at: None,
        };

        let item = WardrobeItem::try_from(row).expect("convert");
        assert_eq!(item.purchase_price, Decimal::ZERO);
    }

    #[test]
    fn test_orphan_row_is_corrupt() {
        let row = WardrobeItemRow {
            id: 2,
            user_id: None,
            category: "scarf".to_string(),
            color: None,
            season: None,
            occasion: None,
            purchase_price: None,
            image_url: None,
            created_at: None,
        };

        let err = WardrobeItem::try_from(row).expect_err("must reject");
        assert!(matches!(err, RepositoryError::DataCorruption(_)));
    }
}
