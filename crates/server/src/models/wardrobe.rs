//! Wardrobe domain types.

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::Serialize;

use ai_stylist_core::{UserId, WardrobeItemId};

/// A single item of clothing in a user's wardrobe.
///
/// Owned by exactly one user; read-only once created (no update or delete
/// operation is exposed).
#[derive(Debug, Clone, Serialize)]
pub struct WardrobeItem {
    /// Unique item ID.
    pub id: WardrobeItemId,
    /// Owning user.
    pub user_id: UserId,
    /// Item category (e.g., "jacket"); always present.
    pub category: String,
    /// Dominant color.
    pub color: Option<String>,
    /// Season the item suits.
    pub season: Option<String>,
    /// Occasion the item suits.
    pub occasion: Option<String>,
    /// What the item cost; never negative, defaults to zero.
    pub purchase_price: Decimal,
    /// Reference to a photo of the item.
    pub image_url: Option<String>,
    /// When the item was added.
    pub created_at: Option<DateTime<Utc>>,
}

/// Fields accepted when creating a wardrobe item.
#[derive(Debug, Clone)]
pub struct NewWardrobeItem {
    pub user_id: UserId,
    pub category: String,
    pub color: Option<String>,
    pub season: Option<String>,
    pub occasion: Option<String>,
    /// Defaults to zero when the caller omits it.
    pub purchase_price: Decimal,
    pub image_url: Option<String>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_item_serializes_price_and_ids() {
        let item = WardrobeItem {
            id: WardrobeItemId::new(3),
            user_id: UserId::new(1),
            category: "jacket".to_string(),
            color: Some("black".to_string()),
            season: None,
            occasion: None,
            purchase_price: Decimal::new(0, 2),
            image_url: None,
            created_at: None,
        };

        let json = serde_json::to_value(&item).expect("serialize");
        assert_eq!(json["id"], 3);
        assert_eq!(json["user_id"], 1);
        assert_eq!(json["category"], "jacket");
        assert_eq!(json["purchase_price"], "0.00");
    }
}
