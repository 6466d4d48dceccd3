//! Prompt constraint parsing engine
//!
//! This module extracts numeric constraints (word counts, budgets,
//! percentages and timeframes) from prompt text and normalizes them into
//! bounded records a scoring step can check responses against.

pub mod amount;
pub mod extractor;
pub mod model;


pub use amount::{normalize_amount, normalize_json_amount, AmountError, AmountInput};
pub use extractor::{
    extract_budget, extract_constraints, extract_percentage, extract_timeframe, extract_word_count,
    ExtractError,
};
pub use model::*;

/// Sample prompt exercising all four constraint kinds
pub const SAMPLE_PROMPT: &str = "\
Today is Oct 10, 2025. Write exactly 150 words.
Capex must not exceed $30 billion over 5 years.
Target EV share between 45% and 55% by 2030.
Pilot runs for 90 days.
";
