//! Stake amount value type.
//!
//! [`Money`] wraps a non-negative decimal amount validated against the
//! minimum stake and stored at 2-decimal precision. Instances are
//! immutable; arithmetic produces new values.

use std::fmt;

use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use crate::error::CoreError;

/// Smallest stake the pool accepts, in currency units.
pub const MIN_STAKE: f64 = 1.0;

/// A validated stake amount.
///
/// Invariant: `value >= 1.00`, rounded to 2 decimals (half away from
/// zero) at construction. Internal prize-pool arithmetic works on the
/// raw `f64` via [`Money::as_float`]; rounding back to cents happens
/// only at the exposure boundary.
#[derive(Debug, Clone, Copy, PartialEq, PartialOrd, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Money(f64);

impl Money {
    /// Creates a `Money` from a numeric amount.
    ///
    /// # Errors
    ///
    /// Returns [`CoreError::Validation`] if the amount is not a finite
    /// number or is below the minimum stake of 1.00.
    pub fn new(amount: f64) -> Result<Self, CoreError> {
        if !amount.is_finite() {
            return Err(CoreError::Validation(
                "stake amount must be a number".to_string(),
            ));
        }
        let rounded = round_cents(amount);
        if rounded < MIN_STAKE {
            return Err(CoreError::Validation(
                "stake amount must be at least 1.00".to_string(),
            ));
        }
        Ok(Self(rounded))
    }

    /// Parses a `Money` from a numeric string.
    ///
    /// Accepts both `"10.5"` and `"10,5"` (comma decimal separator, as
    /// entered in pt-BR locales).
    ///
    /// # Errors
    ///
    /// Returns [`CoreError::Validation`] if the string is not a number
    /// or the amount is below the minimum stake.
    pub fn parse(input: &str) -> Result<Self, CoreError> {
        let normalized = input.trim().replace(',', ".");
        let amount: f64 = normalized
            .parse()
            .map_err(|_| CoreError::Validation(format!("invalid stake amount: {input}")))?;
        Self::new(amount)
    }

    /// Returns the amount as a float, rounded to 2 decimals.
    #[must_use]
    pub const fn as_float(&self) -> f64 {
        self.0
    }

    /// Adds two amounts, producing a new `Money`.
    ///
    /// The sum of two valid stakes is always a valid stake, so this
    /// cannot fail.
    #[must_use]
    pub fn add(&self, other: Self) -> Self {
        Self(round_cents(self.0 + other.0))
    }

    /// Formats the amount in pt-BR currency style: dot thousands
    /// grouping, comma decimal separator, e.g. `R$ 1.234,56`.
    #[must_use]
    pub fn format_currency(&self) -> String {
        format!("R$ {}", format_brl(self.0))
    }
}

/// Raw stake input as received from a caller: a JSON number or a
/// numeric string. Validated into [`Money`] by the orchestrator.
#[derive(Debug, Clone, Deserialize, ToSchema)]
#[serde(untagged)]
pub enum RawAmount {
    /// Plain numeric amount.
    Number(f64),
    /// Numeric string, dot or comma decimal separator.
    Text(String),
}

impl RawAmount {
    /// Validates the raw input into a [`Money`].
    ///
    /// # Errors
    ///
    /// Returns [`CoreError::Validation`] if the input is not a number
    /// or is below the minimum stake.
    pub fn into_money(self) -> Result<Money, CoreError> {
        match self {
            Self::Number(amount) => Money::new(amount),
            Self::Text(text) => Money::parse(&text),
        }
    }
}

impl fmt::Display for Money {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:.2}", self.0)
    }
}

/// Rounds to 2 decimal places, half away from zero.
#[must_use]
pub fn round_cents(value: f64) -> f64 {
    (value * 100.0).round() / 100.0
}

/// Renders a non-negative amount with dot grouping and comma decimals.
fn format_brl(value: f64) -> String {
    let cents = (value.abs() * 100.0).round() as u64;
    let whole = cents / 100;
    let frac = cents % 100;

    let digits = whole.to_string();
    let mut grouped = String::with_capacity(digits.len() + digits.len() / 3);
    for (i, ch) in digits.chars().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            grouped.push('.');
        }
        grouped.push(ch);
    }
    format!("{grouped},{frac:02}")
}

#[cfg(test)]
#[allow(clippy::panic)]
mod tests {
    use super::*;

    #[test]
    fn rejects_below_minimum() {
        assert!(Money::new(0.99).is_err());
        assert!(Money::new(0.0).is_err());
        assert!(Money::new(-5.0).is_err());
    }

    #[test]
    fn rejects_non_finite() {
        assert!(Money::new(f64::NAN).is_err());
        assert!(Money::new(f64::INFINITY).is_err());
    }

    #[test]
    fn accepts_minimum_stake() {
        let Ok(m) = Money::new(1.0) else {
            panic!("minimum stake must be accepted");
        };
        assert!((m.as_float() - 1.0).abs() < f64::EPSILON);
    }

    #[test]
    fn rounds_to_two_decimals() {
        let Ok(m) = Money::new(10.005) else {
            panic!("valid amount");
        };
        assert!((m.as_float() - 10.01).abs() < 1e-9);

        let Ok(m) = Money::new(10.004) else {
            panic!("valid amount");
        };
        assert!((m.as_float() - 10.0).abs() < 1e-9);
    }

    #[test]
    fn parse_accepts_both_decimal_separators() {
        let Ok(dot) = Money::parse("10.50") else {
            panic!("dot separator must parse");
        };
        let Ok(comma) = Money::parse("10,50") else {
            panic!("comma separator must parse");
        };
        assert_eq!(dot, comma);
    }

    #[test]
    fn parse_rejects_garbage() {
        assert!(Money::parse("ten").is_err());
        assert!(Money::parse("").is_err());
        assert!(Money::parse("1.2.3").is_err());
    }

    #[test]
    fn add_produces_new_value() {
        let Ok(a) = Money::new(100.25) else {
            panic!("valid amount");
        };
        let Ok(b) = Money::new(50.25) else {
            panic!("valid amount");
        };
        let sum = a.add(b);
        assert!((sum.as_float() - 150.5).abs() < 1e-9);
        // original untouched
        assert!((a.as_float() - 100.25).abs() < 1e-9);
    }

    #[test]
    fn formats_currency_with_grouping() {
        let Ok(m) = Money::new(100.5) else {
            panic!("valid amount");
        };
        assert_eq!(m.format_currency(), "R$ 100,50");

        let Ok(m) = Money::new(1234.56) else {
            panic!("valid amount");
        };
        assert_eq!(m.format_currency(), "R$ 1.234,56");

        let Ok(m) = Money::new(1_000_000.0) else {
            panic!("valid amount");
        };
        assert_eq!(m.format_currency(), "R$ 1.000.000,00");
    }
}
