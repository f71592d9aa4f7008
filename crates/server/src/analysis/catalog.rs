//! Canned critiques served in mock mode.

use ai_stylist_core::AnalysisResult;

/// The built-in mock catalog.
///
/// Each entry is a complete [`AnalysisResult`]; mock mode picks one
/// uniformly at random. Deployments can swap the catalog out at pipeline
/// construction without touching the contract.
#[must_use]
pub fn default_catalog() -> Vec<AnalysisResult> {
    vec![
        AnalysisResult {
            verdict: "Great casual look! The colors work well together.".to_string(),
            mistakes: vec!["The shoes are too bulky for such a light top.".to_string()],
            improvements: vec!["Add a thin leather belt matching the shoes.".to_string()],
            shopping_tips: vec!["A plain white tee in heavyweight cotton.".to_string()],
        },
        AnalysisResult {
            verdict: "Interesting combination, but not one for the office.".to_string(),
            mistakes: vec!["The bag's color clashes with the print on the skirt.".to_string()],
            improvements: vec!["Swap the bag for a neutral beige one.".to_string()],
            shopping_tips: vec!["Minimalist loafers.".to_string()],
        },
        AnalysisResult {
            verdict: "Solid base, the silhouette just needs sharpening.".to_string(),
            mistakes: vec![
                "The trousers pool at the ankle and shorten the leg line.".to_string(),
                "Too many competing textures on top.".to_string(),
            ],
            improvements: vec!["Hem or cuff the trousers to sit right at the ankle.".to_string()],
            shopping_tips: vec!["A structured overshirt in a single dark tone.".to_string()],
        },
        AnalysisResult {
            verdict: "Polished and well balanced, close to a signature look.".to_string(),
            mistakes: vec![],
            improvements: vec!["One metallic accent, a watch or simple chain, would finish it."
                .to_string()],
            shopping_tips: vec!["A slim stainless-steel watch with a plain dial.".to_string()],
        },
    ]
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_every_entry_satisfies_the_contract() {
        let catalog = default_catalog();
        assert!(!catalog.is_empty());
        for entry in &catalog {
            assert!(entry.validate().is_ok());
        }
    }
}
