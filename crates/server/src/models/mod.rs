//! Domain models.
//!
//! These types represent validated domain objects separate from database row
//! types. Row-to-domain conversion lives with the repositories in [`crate::db`].

pub mod user;
pub mod wardrobe;

pub use user::User;
pub use wardrobe::{NewWardrobeItem, WardrobeItem};
