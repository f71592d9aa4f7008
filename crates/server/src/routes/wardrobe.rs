//! Wardrobe CRUD routes.

use axum::{
    Json,
    extract::{Path, State},
};
use rust_decimal::Decimal;
use serde::Deserialize;

use ai_stylist_core::UserId;

use crate::db::{RepositoryError, WardrobeRepository};
use crate::error::{AppError, Result};
use crate::models::{NewWardrobeItem, WardrobeItem};
use crate::state::AppState;

/// Request body for `POST /wardrobe`.
#[derive(Debug, Deserialize)]
pub struct CreateItemRequest {
    pub user_id: i32,
    /// Required; everything else is optional.
    pub category: Option<String>,
    pub color: Option<String>,
    pub season: Option<String>,
    pub occasion: Option<String>,
    /// Defaults to 0 when absent; negative values are rejected.
    pub purchase_price: Option<Decimal>,
    pub image_url: Option<String>,
}

impl CreateItemRequest {
    /// Validate the request and turn it into an insertable item.
    ///
    /// # Errors
    ///
    /// Returns `AppError::BadRequest` for a missing/blank category or a
    /// negative purchase price.
    fn into_new_item(self) -> Result<NewWardrobeItem> {
        let category = self
            .category
            .as_deref()
            .map(str::trim)
            .filter(|c| !c.is_empty())
            .ok_or_else(|| AppError::BadRequest("category is required".to_string()))?
            .to_string();

        let purchase_price = self.purchase_price.unwrap_or(Decimal::ZERO);
        if purchase_price.is_sign_negative() {
            return Err(AppError::BadRequest(
                "purchase_price must not be negative".to_string(),
            ));
        }

        Ok(NewWardrobeItem {
            user_id: UserId::new(self.user_id),
            category,
            color: self.color,
            season: self.season,
            occasion: self.occasion,
            purchase_price,
            image_url: self.image_url,
        })
    }
}

/// Add an item to a user's wardrobe.
///
/// POST /wardrobe
///
/// # Errors
///
/// 400 for a missing category, negative price, or unknown `user_id`;
/// 500 `{"error":"Failed to add item"}` for other database failures.
pub async fn create(
    State(state): State<AppState>,
    Json(request): Json<CreateItemRequest>,
) -> Result<Json<WardrobeItem>> {
    let item = request.into_new_item()?;

    let stored = WardrobeRepository::new(state.pool())
        .insert(&item)
        .await
        .map_err(|e| match e {
            RepositoryError::UnknownReference(msg) => AppError::BadRequest(msg),
            other => {
                tracing::error!(error = %other, "failed to add wardrobe item");
                AppError::Internal("Failed to add item".to_string())
            }
        })?;

    Ok(Json(stored))
}

/// List a user's wardrobe, newest first.
///
/// GET /wardrobe/{user_id}
///
/// A user with no items gets an empty array, not an error.
///
/// # Errors
///
/// 500 `{"error":"Failed to fetch wardrobe"}` when the query fails.
pub async fn list(
    State(state): State<AppState>,
    Path(user_id): Path<i32>,
) -> Result<Json<Vec<WardrobeItem>>> {
    let items = WardrobeRepository::new(state.pool())
        .list_for_user(UserId::new(user_id))
        .await
        .map_err(|e| {
            tracing::error!(error = %e, "failed to fetch wardrobe");
            AppError::Internal("Failed to fetch wardrobe".to_string())
        })?;

    Ok(Json(items))
}
