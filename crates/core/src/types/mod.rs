//! Core types for AI Stylist.
//!
//! This module provides type-safe wrappers for common domain concepts.

pub mod analysis;
pub mod id;

pub use analysis::{AnalysisMode, AnalysisResult, AnalysisResultError};
pub use id::*;
