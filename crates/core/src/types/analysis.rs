//! The outfit-analysis contract.
//!
//! [`AnalysisResult`] is the one shape callers ever see from the analysis
//! pipeline, regardless of whether the critique came from the live vision
//! service or the mock catalog. It is transient: produced per request and
//! never persisted.

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// A structured style critique for one outfit photo.
///
/// The verdict is the only field the prompt contract guarantees; the list
/// fields are optional for producers and default to empty for consumers.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AnalysisResult {
    /// Overall judgement of the outfit, free text.
    pub verdict: String,
    /// What is wrong with the outfit, most important first.
    #[serde(default)]
    pub mistakes: Vec<String>,
    /// Concrete suggestions to improve the outfit.
    #[serde(default)]
    pub improvements: Vec<String>,
    /// Items worth buying to round out the look.
    #[serde(default)]
    pub shopping_tips: Vec<String>,
}

/// Violation of the analysis contract.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum AnalysisResultError {
    /// The verdict field is missing or blank.
    #[error("verdict is empty")]
    EmptyVerdict,
}

impl AnalysisResult {
    /// Check that the result satisfies the prompt contract.
    ///
    /// # Errors
    ///
    /// Returns [`AnalysisResultError::EmptyVerdict`] if the verdict is blank.
    pub fn validate(&self) -> Result<(), AnalysisResultError> {
        if self.verdict.trim().is_empty() {
            return Err(AnalysisResultError::EmptyVerdict);
        }
        Ok(())
    }
}

/// Whether the analysis pipeline answers from the canned catalog or the
/// live vision service.
///
/// Resolved once from configuration at startup and injected into the
/// pipeline; never read from ambient process state per request.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum AnalysisMode {
    /// Return canned critiques with an artificial delay.
    Mock,
    /// Call the external vision/completion service.
    Live,
}

impl AnalysisMode {
    /// True when the pipeline serves canned responses.
    #[must_use]
    pub const fn is_mock(self) -> bool {
        matches!(self, Self::Mock)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_optional_lists_default_to_empty() {
        let json = r#"{"verdict": "Sharp look."}"#;
        let result: AnalysisResult = serde_json::from_str(json).expect("deserialize");

        assert_eq!(result.verdict, "Sharp look.");
        assert!(result.mistakes.is_empty());
        assert!(result.improvements.is_empty());
        assert!(result.shopping_tips.is_empty());
    }

    #[test]
    fn test_missing_verdict_is_a_parse_error() {
        let json = r#"{"mistakes": ["shoes too heavy"]}"#;
        let result = serde_json::from_str::<AnalysisResult>(json);
        assert!(result.is_err());
    }

    #[test]
    fn test_blank_verdict_fails_validation() {
        let result = AnalysisResult {
            verdict: "   ".to_string(),
            mistakes: vec![],
            improvements: vec![],
            shopping_tips: vec![],
        };
        assert_eq!(result.validate(), Err(AnalysisResultError::EmptyVerdict));
    }

    #[test]
    fn test_full_result_round_trips() {
        let json = r#"{
            "verdict": "Great casual look.",
            "mistakes": ["The shoes are too bulky for this light top."],
            "improvements": ["Add a thin leather belt matching the shoes."],
            "shopping_tips": ["A plain white tee in heavyweight cotton."]
        }"#;

        let result: AnalysisResult = serde_json::from_str(json).expect("deserialize");
        assert!(result.validate().is_ok());
        assert_eq!(result.mistakes.len(), 1);

        let back = serde_json::to_string(&result).expect("serialize");
        let again: AnalysisResult = serde_json::from_str(&back).expect("round trip");
        assert_eq!(again, result);
    }

    #[test]
    fn test_mode_parses_from_lowercase() {
        let mode: AnalysisMode = serde_json::from_str(r#""mock""#).expect("deserialize");
        assert!(mode.is_mock());

        let mode: AnalysisMode = serde_json::from_str(r#""live""#).expect("deserialize");
        assert!(!mode.is_mock());
    }
}
