//! Constraint extraction from natural language prompts
//!
//! Four independent searches run over the prompt: word count, budget,
//! percentage and timeframe. Each keeps only its first match; later mentions
//! of the same kind are ignored.

use regex_utils::{budget, percentage, timeframe, word_count, Shape};
use thiserror::Error;
use tracing::debug;

use crate::parser::amount::{normalize_amount, AmountError};
use crate::parser::model::*;

/// Smallest tolerance band for a fixed word count
pub const MIN_WORD_TOLERANCE: i64 = 10;

/// Smallest tolerance band for a fixed percentage
pub const MIN_PERCENT_TOLERANCE: f64 = 1.0;

/// Share of a fixed target used as its tolerance
const TOLERANCE_RATIO: f64 = 0.1;

/// Errors that abort an extraction
#[derive(Debug, Clone, PartialEq, Error)]
pub enum ExtractError {
    /// A matched budget could not be normalized; no partial result is returned
    #[error("failed to normalize budget '{raw}'")]
    Budget {
        raw: String,
        #[source]
        source: AmountError,
    },
}

pub type Result<T> = std::result::Result<T, ExtractError>;

/// Extract every recognizable constraint from a prompt
pub fn extract_constraints(prompt: &str) -> Result<ConstraintSet> {
    let set = ConstraintSet {
        word_count: extract_word_count(prompt),
        budget: extract_budget(prompt)?,
        percentage: extract_percentage(prompt),
        timeframe: extract_timeframe(prompt),
    };

    debug!("Extracted {} constraint(s): {:?}", set.len(), set.kinds());
    Ok(set)
}

/// Extract the first word-count constraint
pub fn extract_word_count(prompt: &str) -> Option<WordCountConstraint> {
    let constraint = match word_count::find(prompt)? {
        Shape::Range { low, high } => {
            let (lower, upper) = (parse_count(low)?, parse_count(high)?);
            WordCountConstraint {
                kind: ConstraintType::Range,
                target: (lower + upper).div_euclid(2),
                lower_bound: lower,
                upper_bound: upper,
                tolerance: (upper - lower).div_euclid(2),
            }
        }
        Shape::Single { value } => {
            let target = parse_count(value)?;
            let scaled = (TOLERANCE_RATIO * target as f64).round_ties_even() as i64;
            let tolerance = MIN_WORD_TOLERANCE.max(scaled);
            WordCountConstraint {
                kind: ConstraintType::Fixed,
                target,
                lower_bound: target - tolerance,
                upper_bound: target + tolerance,
                tolerance,
            }
        }
    };

    debug!("Word count constraint: {:?}", constraint);
    Some(constraint)
}

/// Extract the first budget constraint
///
/// Fails when the matched magnitude does not normalize to a number.
pub fn extract_budget(prompt: &str) -> Result<Option<BudgetConstraint>> {
    let Some(found) = budget::find(prompt) else {
        return Ok(None);
    };

    let target = normalize_amount(found.raw).map_err(|source| ExtractError::Budget {
        raw: found.raw.to_string(),
        source,
    })?;

    let kind = match found.cue {
        budget::Cue::Upper => ConstraintType::Max,
        budget::Cue::Lower => ConstraintType::Min,
        budget::Cue::None => ConstraintType::Fixed,
    };

    let constraint = BudgetConstraint {
        kind,
        target,
        upper_bound: (kind == ConstraintType::Max).then_some(target),
        lower_bound: (kind == ConstraintType::Min).then_some(target),
        raw_value: found.raw.to_string(),
    };

    debug!("Budget constraint: {:?}", constraint);
    Ok(Some(constraint))
}

/// Extract the first percentage constraint
pub fn extract_percentage(prompt: &str) -> Option<PercentageConstraint> {
    let constraint = match percentage::find(prompt)? {
        Shape::Range { low, high } => {
            let (lower, upper) = (low.parse::<f64>().ok()?, high.parse::<f64>().ok()?);
            PercentageConstraint {
                kind: ConstraintType::Range,
                target: (lower + upper) / 2.0,
                lower_bound: lower,
                upper_bound: upper,
                tolerance: (upper - lower) / 2.0,
            }
        }
        Shape::Single { value } => {
            let target = value.parse::<f64>().ok()?;
            let tolerance = MIN_PERCENT_TOLERANCE.max(round_to(TOLERANCE_RATIO * target, 2));
            PercentageConstraint {
                kind: ConstraintType::Fixed,
                target,
                lower_bound: target - tolerance,
                upper_bound: target + tolerance,
                tolerance,
            }
        }
    };

    debug!("Percentage constraint: {:?}", constraint);
    Some(constraint)
}

/// Extract the first timeframe constraint
///
/// For ranges the unit comes from the first end ("from 3 weeks to 2 months"
/// yields weeks); the second unit is not reconciled.
pub fn extract_timeframe(prompt: &str) -> Option<TimeframeConstraint> {
    let found = timeframe::find(prompt)?;
    let unit = found.unit.to_string();

    let constraint = match found.shape {
        Shape::Range { low, high } => {
            let (lower, upper) = (parse_count(low)?, parse_count(high)?);
            TimeframeConstraint {
                kind: ConstraintType::Range,
                unit,
                target: (lower + upper).div_euclid(2),
                lower_bound: Some(lower),
                upper_bound: Some(upper),
            }
        }
        Shape::Single { value } => TimeframeConstraint {
            kind: ConstraintType::Fixed,
            unit,
            target: parse_count(value)?,
            lower_bound: None,
            upper_bound: None,
        },
    };

    debug!("Timeframe constraint: {:?}", constraint);
    Some(constraint)
}

/// Parse an integer that may contain thousands separators
fn parse_count(text: &str) -> Option<i64> {
    text.replace(',', "").parse().ok()
}

/// Round to the given number of decimal places using the exact binary value
///
/// Scaling first would round `1.075` (stored as 1.07499...) up to 1.08.
fn round_to(value: f64, decimals: usize) -> f64 {
    format!("{:.*}", decimals, value).parse().unwrap_or(value)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_word_tolerance_rounds_half_to_even() {
        // 0.1 * 105 = 10.5 rounds down to 10, 0.1 * 115 = 11.5 rounds up to 12
        assert_eq!(extract_word_count("105 words").unwrap().tolerance, 10);
        assert_eq!(extract_word_count("115 words").unwrap().tolerance, 12);
        assert_eq!(extract_word_count("2000 words").unwrap().tolerance, 200);
    }

    #[test]
    fn test_word_count_with_separator() {
        let wc = extract_word_count("Keep it to 1,500 words").unwrap();
        assert_eq!(wc.target, 1500);
        assert_eq!(wc.tolerance, 150);
    }

    #[test]
    fn test_reversed_word_range_floors() {
        let wc = extract_word_count("from 500 to 295 words").unwrap();
        assert_eq!(wc.kind, ConstraintType::Range);
        assert_eq!(wc.target, 397);
        assert_eq!(wc.tolerance, -103);
    }

    #[test]
    fn test_percentage_tolerance() {
        let pct = extract_percentage("grow by 5%").unwrap();
        assert_eq!(pct.tolerance, 1.0);
        assert_eq!((pct.lower_bound, pct.upper_bound), (4.0, 6.0));

        let pct = extract_percentage("a 25 percent share").unwrap();
        assert_eq!(pct.tolerance, 2.5);
        assert_eq!((pct.lower_bound, pct.upper_bound), (22.5, 27.5));
    }

    #[test]
    fn test_budget_min_and_fixed() {
        let b = extract_budget("Raise more than $1.5 million.").unwrap().unwrap();
        assert_eq!(b.kind, ConstraintType::Min);
        assert_eq!(b.target, 1_500_000.0);
        assert_eq!(b.lower_bound, Some(1_500_000.0));
        assert_eq!(b.upper_bound, None);

        let b = extract_budget("A $2 billion capex plan").unwrap().unwrap();
        assert_eq!(b.kind, ConstraintType::Fixed);
        assert_eq!(b.target, 2.0e9);
        assert_eq!((b.lower_bound, b.upper_bound), (None, None));
        assert_eq!(b.raw_value, "2 billion");
    }

    #[test]
    fn test_budget_requires_magnitude_word() {
        assert_eq!(extract_budget("Spend under $2,000."), Ok(None));
    }

    #[test]
    fn test_timeframe_range_keeps_first_unit() {
        let tf = extract_timeframe("Deliver from 3 weeks to 2 months").unwrap();
        assert_eq!(tf.kind, ConstraintType::Range);
        assert_eq!(tf.unit, "weeks");
        assert_eq!(tf.target, 2);
        assert_eq!((tf.lower_bound, tf.upper_bound), (Some(3), Some(2)));
    }

    #[test]
    fn test_round_to() {
        assert_eq!(round_to(1.234, 2), 1.23);
        assert_eq!(round_to(0.1 * 10.75, 2), 1.07);
        assert_eq!(round_to(0.1 * 11.45, 2), 1.15);
    }

    #[test]
    fn test_fractional_percentage_tolerance() {
        let cases = [("10.75%", 1.07), ("11.45%", 1.15), ("12.05%", 1.21)];
        for (prompt, tolerance) in cases {
            let pct = extract_percentage(prompt).unwrap();
            assert_eq!(pct.kind, ConstraintType::Fixed);
            assert_eq!(pct.tolerance, tolerance, "tolerance for {}", prompt);
            assert_eq!(pct.lower_bound, pct.target - tolerance);
            assert_eq!(pct.upper_bound, pct.target + tolerance);
        }
    }
}
