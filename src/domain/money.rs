use std::fmt;

/// Money is represented as integer cents to avoid floating-point drift in totals.
/// 1 unit = 100 cents, so 45.50 = 4550 cents.
pub type Cents = i64;

/// Largest amount a single transaction may carry: 999,999,999,999.99.
/// Keeps every amount exact as a JSON number and leaves room for totals in `i64`.
pub const MAX_AMOUNT_CENTS: Cents = 99_999_999_999_999;

/// Format cents as a human-readable amount.
/// Example: 5000 -> "50.00", -1234 -> "-12.34"
pub fn format_cents(cents: Cents) -> String {
    let sign = if cents < 0 { "-" } else { "" };
    let abs_cents = cents.abs();
    let units = abs_cents / 100;
    let remainder = abs_cents % 100;
    format!("{}{}.{:02}", sign, units, remainder)
}

/// Convert a decoded decimal value into cents, rounding half away from zero.
/// Example: 45.5 -> 4550, 0.125 -> 13
pub fn cents_from_decimal(value: f64) -> Result<Cents, ParseAmountError> {
    if !value.is_finite() {
        return Err(ParseAmountError::InvalidFormat);
    }
    let scaled = (value * 100.0).round();
    if scaled.abs() > MAX_AMOUNT_CENTS as f64 {
        return Err(ParseAmountError::OutOfRange);
    }
    Ok(scaled as Cents)
}

/// Parse user input like "45.5", "1000" or ".99" into cents.
/// Digits past the second decimal place are rounded, not truncated.
/// Magnitudes above [`MAX_AMOUNT_CENTS`] are rejected.
pub fn parse_amount(input: &str) -> Result<Cents, ParseAmountError> {
    let input = input.trim();
    let negative = input.starts_with('-');
    let unsigned = input.trim_start_matches(['-', '+']);

    let (units_str, decimal_str) = match unsigned.split_once('.') {
        Some((units, decimals)) => (units, decimals),
        None => (unsigned, ""),
    };

    if units_str.is_empty() && decimal_str.is_empty() {
        return Err(ParseAmountError::InvalidFormat);
    }
    if !units_str.chars().all(|c| c.is_ascii_digit())
        || !decimal_str.chars().all(|c| c.is_ascii_digit())
    {
        return Err(ParseAmountError::InvalidFormat);
    }

    let units: i64 = if units_str.is_empty() {
        0
    } else {
        units_str
            .parse()
            .map_err(|_| ParseAmountError::OutOfRange)?
    };

    let mut digits = decimal_str.bytes().map(|b| i64::from(b - b'0'));
    let tenths = digits.next().unwrap_or(0);
    let hundredths = digits.next().unwrap_or(0);
    let round_up = digits.next().is_some_and(|d| d >= 5);

    let cents = units
        .checked_mul(100)
        .and_then(|c| c.checked_add(tenths * 10 + hundredths + i64::from(round_up)))
        .filter(|c| *c <= MAX_AMOUNT_CENTS)
        .ok_or(ParseAmountError::OutOfRange)?;

    Ok(if negative { -cents } else { cents })
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ParseAmountError {
    InvalidFormat,
    OutOfRange,
}

impl fmt::Display for ParseAmountError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ParseAmountError::InvalidFormat => write!(f, "invalid money format"),
            ParseAmountError::OutOfRange => write!(f, "amount out of range"),
        }
    }
}

impl std::error::Error for ParseAmountError {}

/// Serde adapter storing cents as a plain decimal number (`45.5`).
pub mod decimal {
    use serde::de::Error as _;
    use serde::{Deserialize, Deserializer, Serializer};

    use super::{cents_from_decimal, Cents};

    pub fn serialize<S: Serializer>(cents: &Cents, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_f64(*cents as f64 / 100.0)
    }

    pub fn deserialize<'de, D: Deserializer<'de>>(deserializer: D) -> Result<Cents, D::Error> {
        let value = f64::deserialize(deserializer)?;
        cents_from_decimal(value).map_err(D::Error::custom)
    }
}
