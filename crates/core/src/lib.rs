//! AI Stylist Core - Shared types library.
//!
//! This crate provides common types used across the AI Stylist components:
//! - `server` - The public REST API binary
//!
//! # Architecture
//!
//! The core crate contains only types - no I/O, no database access, no HTTP
//! clients. This keeps it lightweight and allows it to be used anywhere.
//!
//! # Modules
//!
//! - [`types`] - Newtype wrappers for type-safe IDs and the analysis contract

#![cfg_attr(not(test), forbid(unsafe_code))]

pub mod types;

pub use types::*;
