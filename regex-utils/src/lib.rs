//! Regex utilities for promptcheck
//! Compiled constraint patterns, kept in a separate crate for compilation optimization.
//!
//! Every pattern is case-insensitive and matched leftmost-first, so the first
//! occurrence of a constraint in a prompt wins. Digits are matched as ASCII
//! `[0-9]` only so that every capture is guaranteed to parse as a number.

use once_cell::sync::Lazy;
use regex::Regex;

/// Unit words accepted by the timeframe pattern
const TIME_UNIT: &str = r"days?|weeks?|months?|years?";

/// A matched constraint shape: either an explicit range or a single value
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Shape<'t> {
    Range { low: &'t str, high: &'t str },
    Single { value: &'t str },
}

/// Word-count patterns ("150 words", "between 300 and 500 words")
pub mod word_count {
    use super::*;

    // 2-4 digit numbers, optionally written with a thousands separator ("1,500")
    const NUMBER: &str = r"[0-9],[0-9]{3}|[0-9]{2,4}";

    pub static PATTERN: Lazy<Regex> = Lazy::new(|| {
        Regex::new(&format!(
            r"(?i)(?:(?:between|from)\s*(?P<low>{n})\s*(?:-|to|and)\s*(?P<high>{n})|(?P<value>{n}))\s*words?",
            n = NUMBER
        ))
        .expect("Invalid regex pattern")
    });

    /// Find the first word-count mention in text
    pub fn find(text: &str) -> Option<Shape<'_>> {
        let caps = PATTERN.captures(text)?;
        match (caps.name("low"), caps.name("high")) {
            (Some(low), Some(high)) => {
                Some(Shape::Range { low: low.as_str(), high: high.as_str() })
            }
            _ => caps.name("value").map(|m| Shape::Single { value: m.as_str() }),
        }
    }
}

/// Budget patterns ("under $5 million", "at least 2 billion", "$1.5 million budget")
pub mod budget {
    use super::*;

    /// Which cue preceded the matched magnitude
    #[derive(Debug, Clone, Copy, PartialEq, Eq)]
    pub enum Cue {
        /// "under", "up to", "not exceeding", ...
        Upper,
        /// "at least", "more than", "over", ...
        Lower,
        /// No cue, a bare magnitude
        None,
    }

    #[derive(Debug, Clone, Copy, PartialEq, Eq)]
    pub struct BudgetMatch<'t> {
        pub cue: Cue,
        /// Magnitude text without the currency sign, e.g. "30 billion"
        pub raw: &'t str,
    }

    const MAGNITUDE: &str = r"[0-9]{1,3}(?:,[0-9]{3})*(?:\.[0-9]+)?\s*(?:million|billion)";

    pub static PATTERN: Lazy<Regex> = Lazy::new(|| {
        Regex::new(&format!(
            concat!(
                r"(?i)(?:(?:under|below|maximum of|up to|not exceed(?:ing)?|≤|less than)\s*\$?\s*(?P<max>{m})",
                r"|(?:at least|minimum of|no less than|exceeding|more than|over|≥)\s*\$?\s*(?P<min>{m})",
                r"|\$?\s*(?P<fixed>{m})\s*(?:budget|cost|spend|capex|investment)?)"
            ),
            m = MAGNITUDE
        ))
        .expect("Invalid regex pattern")
    });

    /// Find the first budget mention in text
    pub fn find(text: &str) -> Option<BudgetMatch<'_>> {
        let caps = PATTERN.captures(text)?;
        [("max", Cue::Upper), ("min", Cue::Lower), ("fixed", Cue::None)]
            .into_iter()
            .find_map(|(name, cue)| caps.name(name).map(|m| BudgetMatch { cue, raw: m.as_str() }))
    }
}

/// Magnitude words used when normalizing amounts
pub mod magnitude {
    use super::*;

    pub static MILLION: Lazy<Regex> =
        Lazy::new(|| Regex::new(r"(?i)\s*million").expect("Invalid regex pattern"));

    pub static BILLION: Lazy<Regex> =
        Lazy::new(|| Regex::new(r"(?i)\s*billion").expect("Invalid regex pattern"));
}

/// Percentage patterns ("12.5%", "between 45% and 55%")
pub mod percentage {
    use super::*;

    const NUMBER: &str = r"[0-9]{1,3}(?:\.[0-9]+)?";

    pub static PATTERN: Lazy<Regex> = Lazy::new(|| {
        Regex::new(&format!(
            concat!(
                r"(?i)(?:(?:between|from)\s*(?P<low>{n})\s*(?:%|percent)?\s*(?:-|to|and)\s*(?P<high>{n})\s*(?:%|percent)",
                r"|(?P<value>{n})\s*(?:percent|%))"
            ),
            n = NUMBER
        ))
        .expect("Invalid regex pattern")
    });

    /// Find the first percentage mention in text
    pub fn find(text: &str) -> Option<Shape<'_>> {
        let caps = PATTERN.captures(text)?;
        match (caps.name("low"), caps.name("high")) {
            (Some(low), Some(high)) => {
                Some(Shape::Range { low: low.as_str(), high: high.as_str() })
            }
            _ => caps.name("value").map(|m| Shape::Single { value: m.as_str() }),
        }
    }
}

/// Timeframe patterns ("90 days", "from 3 to 6 months")
pub mod timeframe {
    use super::*;

    #[derive(Debug, Clone, Copy, PartialEq, Eq)]
    pub struct TimeframeMatch<'t> {
        pub shape: Shape<'t>,
        /// Unit as written; for ranges this is the first unit, the second is ignored
        pub unit: &'t str,
    }

    pub static PATTERN: Lazy<Regex> = Lazy::new(|| {
        Regex::new(&format!(
            concat!(
                r"(?i)(?:(?:between|from)\s*(?P<low>[0-9]{{1,4}})\s*(?P<unit>{u})\s*(?:-|to|and)\s*(?P<high>[0-9]{{1,4}})\s*(?:{u})",
                r"|(?P<value>[0-9]{{1,4}})\s*(?P<value_unit>{u}))"
            ),
            u = TIME_UNIT
        ))
        .expect("Invalid regex pattern")
    });

    /// Find the first timeframe mention in text
    pub fn find(text: &str) -> Option<TimeframeMatch<'_>> {
        let caps = PATTERN.captures(text)?;
        let range = (caps.name("low"), caps.name("high"), caps.name("unit"));
        if let (Some(low), Some(high), Some(unit)) = range {
            return Some(TimeframeMatch {
                shape: Shape::Range { low: low.as_str(), high: high.as_str() },
                unit: unit.as_str(),
            });
        }

        let unit = caps.name("value_unit")?;
        // "0" stands in for a missing number so the single shape always carries a value
        let value = caps.name("value").map_or("0", |m| m.as_str());
        Some(TimeframeMatch { shape: Shape::Single { value }, unit: unit.as_str() })
    }
}
