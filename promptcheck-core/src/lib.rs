//! Core functionality for promptcheck
//!
//! This crate contains the constraint extraction logic: it reads a prompt,
//! finds the word-count, budget, percentage and timeframe constraints it
//! states, and turns them into bounded records that model responses can be
//! scored against. It also carries the evaluation settings (models, scoring
//! weights, API keys) used around extraction.

pub mod parser;
pub mod settings;

pub use parser::{extract_constraints, normalize_amount, ConstraintSet, ExtractError};
pub use settings::Settings;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_extract_from_crate_root() {
        let set = extract_constraints(parser::SAMPLE_PROMPT).unwrap();
        assert_eq!(set.len(), 4);
    }

    #[test]
    fn test_settings_default() {
        let settings = Settings::default();
        assert!((settings.weights.total() - 1.0).abs() < 1e-9);
        assert_eq!(settings.models.len(), 3);
    }
}
