//! Semantic model for constraints extracted from prompts

use std::fmt;
use serde::{Deserialize, Serialize};

/// Shape of a constraint's bounds
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ConstraintType {
    /// A single target with a symmetric tolerance band
    Fixed,
    /// An explicit lower/upper pair with a midpoint target
    Range,
    /// Only an upper bound
    Max,
    /// Only a lower bound
    Min,
}

impl fmt::Display for ConstraintType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Fixed => write!(f, "fixed"),
            Self::Range => write!(f, "range"),
            Self::Max => write!(f, "max"),
            Self::Min => write!(f, "min"),
        }
    }
}

/// Kind of constraint, used as the key of a [`ConstraintSet`]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ConstraintKind {
    WordCount,
    Budget,
    Percentage,
    Timeframe,
}

impl ConstraintKind {
    /// All kinds, in output order
    pub const ALL: [ConstraintKind; 4] = [
        ConstraintKind::WordCount,
        ConstraintKind::Budget,
        ConstraintKind::Percentage,
        ConstraintKind::Timeframe,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::WordCount => "word_count",
            Self::Budget => "budget",
            Self::Percentage => "percentage",
            Self::Timeframe => "timeframe",
        }
    }
}

impl fmt::Display for ConstraintKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Target length of the response, in words
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct WordCountConstraint {
    #[serde(rename = "type")]
    pub kind: ConstraintType,
    pub target: i64,
    pub lower_bound: i64,
    pub upper_bound: i64,
    pub tolerance: i64,
}

/// Monetary budget, normalized to plain currency units
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BudgetConstraint {
    #[serde(rename = "type")]
    pub kind: ConstraintType,
    pub target: f64,
    /// Set only for `max` budgets
    pub upper_bound: Option<f64>,
    /// Set only for `min` budgets
    pub lower_bound: Option<f64>,
    /// Matched magnitude text, e.g. "30 billion"
    pub raw_value: String,
}

/// Percentage target
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PercentageConstraint {
    #[serde(rename = "type")]
    pub kind: ConstraintType,
    pub target: f64,
    pub lower_bound: f64,
    pub upper_bound: f64,
    pub tolerance: f64,
}

/// Duration expressed in days, weeks, months or years
///
/// Fixed timeframes carry no bounds. Range timeframes keep both ends as written.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TimeframeConstraint {
    #[serde(rename = "type")]
    pub kind: ConstraintType,
    /// Unit exactly as written in the prompt ("days", "Year", ...)
    pub unit: String,
    pub target: i64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub lower_bound: Option<i64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub upper_bound: Option<i64>,
}

/// Every constraint found in one prompt, at most one per kind
///
/// Serializes to an object holding only the kinds that were found.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ConstraintSet {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub word_count: Option<WordCountConstraint>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub budget: Option<BudgetConstraint>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub percentage: Option<PercentageConstraint>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub timeframe: Option<TimeframeConstraint>,
}

impl ConstraintSet {
    /// Create an empty set
    pub fn new() -> Self {
        Self::default()
    }

    /// Whether a constraint of the given kind was found
    pub fn contains(&self, kind: ConstraintKind) -> bool {
        match kind {
            ConstraintKind::WordCount => self.word_count.is_some(),
            ConstraintKind::Budget => self.budget.is_some(),
            ConstraintKind::Percentage => self.percentage.is_some(),
            ConstraintKind::Timeframe => self.timeframe.is_some(),
        }
    }

    /// Kinds present in this set
    pub fn kinds(&self) -> Vec<ConstraintKind> {
        ConstraintKind::ALL.into_iter().filter(|k| self.contains(*k)).collect()
    }

    pub fn len(&self) -> usize {
        self.kinds().len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}
