//! Monetary amount normalization
//!
//! Turns magnitude expressions such as `"$2,000"`, `"1.5 million"` or
//! `"30 billion"` into plain `f64` values.

use regex_utils::magnitude;
use serde_json::Value;
use thiserror::Error;
use tracing::trace;

/// Errors raised while normalizing an amount
#[derive(Debug, Clone, PartialEq, Error)]
pub enum AmountError {
    /// The value is neither a number nor text
    #[error("unsupported amount value of type {kind}")]
    Unsupported { kind: &'static str },

    /// The text did not reduce to a number
    #[error("malformed amount '{input}'")]
    Malformed { input: String },
}

pub type Result<T> = std::result::Result<T, AmountError>;

/// A value to normalize: already numeric, or an expression to parse
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum AmountInput<'a> {
    Number(f64),
    Text(&'a str),
}

impl From<f64> for AmountInput<'_> {
    fn from(value: f64) -> Self {
        Self::Number(value)
    }
}

impl From<i64> for AmountInput<'_> {
    fn from(value: i64) -> Self {
        Self::Number(value as f64)
    }
}

impl From<u64> for AmountInput<'_> {
    fn from(value: u64) -> Self {
        Self::Number(value as f64)
    }
}

impl From<i32> for AmountInput<'_> {
    fn from(value: i32) -> Self {
        Self::Number(f64::from(value))
    }
}

impl<'a> From<&'a str> for AmountInput<'a> {
    fn from(value: &'a str) -> Self {
        Self::Text(value)
    }
}

impl<'a> From<&'a String> for AmountInput<'a> {
    fn from(value: &'a String) -> Self {
        Self::Text(value.as_str())
    }
}

impl<'a> TryFrom<&'a Value> for AmountInput<'a> {
    type Error = AmountError;

    fn try_from(value: &'a Value) -> Result<Self> {
        match value {
            Value::Number(n) => n
                .as_f64()
                .map(AmountInput::Number)
                .ok_or(AmountError::Unsupported { kind: "number" }),
            Value::String(s) => Ok(AmountInput::Text(s.as_str())),
            Value::Null => Err(AmountError::Unsupported { kind: "null" }),
            Value::Bool(_) => Err(AmountError::Unsupported { kind: "bool" }),
            Value::Array(_) => Err(AmountError::Unsupported { kind: "array" }),
            Value::Object(_) => Err(AmountError::Unsupported { kind: "object" }),
        }
    }
}

/// Normalize an amount to a plain number
///
/// Numbers pass through unchanged. Text is lower-cased, stripped of `$` signs,
/// scaled by a `million`/`billion` suffix (million is checked first) and
/// stripped of thousands separators before parsing.
pub fn normalize_amount<'a>(value: impl Into<AmountInput<'a>>) -> Result<f64> {
    match value.into() {
        AmountInput::Number(n) => Ok(n),
        AmountInput::Text(text) => parse_text(text),
    }
}

/// Normalize a JSON value, rejecting anything that is not a number or string
pub fn normalize_json_amount(value: &Value) -> Result<f64> {
    normalize_amount(AmountInput::try_from(value)?)
}

fn parse_text(text: &str) -> Result<f64> {
    let cleaned = text.trim().to_lowercase().replace('$', "");

    let (digits, multiplier) = if cleaned.contains("million") {
        (magnitude::MILLION.replace_all(&cleaned, "").into_owned(), 1e6)
    } else if cleaned.contains("billion") {
        (magnitude::BILLION.replace_all(&cleaned, "").into_owned(), 1e9)
    } else {
        (cleaned, 1.0)
    };

    let digits = digits.replace(',', "");
    let amount = digits
        .trim()
        .parse::<f64>()
        .map_err(|_| AmountError::Malformed { input: text.to_string() })?;

    trace!("Normalized amount '{}' to {}", text, amount * multiplier);
    Ok(amount * multiplier)
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_numbers_pass_through() {
        assert_eq!(normalize_amount(42_i64), Ok(42.0));
        assert_eq!(normalize_amount(2.5), Ok(2.5));
        assert_eq!(normalize_amount(7_u64), Ok(7.0));
    }

    #[test]
    fn test_magnitude_suffixes() {
        assert_eq!(normalize_amount("1.5 million"), Ok(1_500_000.0));
        assert_eq!(normalize_amount("30 billion"), Ok(3.0e10));
        assert_eq!(normalize_amount("  $4 BILLION "), Ok(4.0e9));
        assert_eq!(normalize_amount("2million"), Ok(2_000_000.0));
    }

    #[test]
    fn test_currency_and_separators() {
        assert_eq!(normalize_amount("$2,000"), Ok(2000.0));
        assert_eq!(normalize_amount("$1,250,000.50"), Ok(1_250_000.5));
        assert_eq!(normalize_amount("1,200 million"), Ok(1.2e9));
    }

    #[test]
    fn test_million_checked_before_billion() {
        // "billion" stays in the text and breaks the parse
        assert_eq!(
            normalize_amount("1 million billion"),
            Err(AmountError::Malformed { input: "1 million billion".to_string() })
        );
    }

    #[test]
    fn test_malformed_text() {
        let err = normalize_amount("lots of money").unwrap_err();
        assert_eq!(err, AmountError::Malformed { input: "lots of money".to_string() });
        assert_eq!(err.to_string(), "malformed amount 'lots of money'");
        assert!(normalize_amount("").is_err());
    }

    #[test]
    fn test_json_values() {
        assert_eq!(normalize_json_amount(&json!(12)), Ok(12.0));
        assert_eq!(normalize_json_amount(&json!("5 million")), Ok(5.0e6));
        assert_eq!(
            normalize_json_amount(&json!(true)),
            Err(AmountError::Unsupported { kind: "bool" })
        );
        assert_eq!(
            normalize_json_amount(&json!(null)),
            Err(AmountError::Unsupported { kind: "null" })
        );
        assert!(normalize_json_amount(&json!(["1"])).is_err());
    }
}
