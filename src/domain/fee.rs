//! Platform fee policy.
//!
//! [`PlatformFee`] is a fraction fixed at construction and applied to
//! the gross pooled stakes to derive the net prize pool.

use serde::{Deserialize, Serialize};

use crate::error::CoreError;

/// Fraction charged by the platform when no explicit fee is configured.
pub const DEFAULT_FEE_FRACTION: f64 = 0.05;

/// Platform fee as a fraction in `[0, 1)`.
///
/// Invariant: `0 <= fraction < 1`. Immutable after construction.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct PlatformFee(f64);

impl PlatformFee {
    /// Creates a fee policy from a fraction.
    ///
    /// # Errors
    ///
    /// Returns [`CoreError::Validation`] if the fraction is not a
    /// finite number or falls outside `[0, 1)`.
    pub fn new(fraction: f64) -> Result<Self, CoreError> {
        if !fraction.is_finite() {
            return Err(CoreError::Validation(
                "fee fraction must be a number".to_string(),
            ));
        }
        if !(0.0..1.0).contains(&fraction) {
            return Err(CoreError::Validation(
                "fee fraction must be in [0, 1)".to_string(),
            ));
        }
        Ok(Self(fraction))
    }

    /// Returns the raw fraction.
    #[must_use]
    pub const fn fraction(&self) -> f64 {
        self.0
    }

    /// Amount the platform retains from `total`.
    #[must_use]
    pub fn fee_amount(&self, total: f64) -> f64 {
        total * self.0
    }

    /// Amount remaining for the prize pool after the fee.
    #[must_use]
    pub fn net_amount(&self, total: f64) -> f64 {
        total * (1.0 - self.0)
    }

    /// Integer percent rendering, e.g. `"5%"` for a 0.05 fraction.
    #[must_use]
    pub fn formatted_percent(&self) -> String {
        format!("{}%", (self.0 * 100.0).round() as u32)
    }
}

impl Default for PlatformFee {
    fn default() -> Self {
        Self(DEFAULT_FEE_FRACTION)
    }
}

#[cfg(test)]
#[allow(clippy::panic)]
mod tests {
    use super::*;

    #[test]
    fn rejects_out_of_range() {
        assert!(PlatformFee::new(1.0).is_err());
        assert!(PlatformFee::new(1.5).is_err());
        assert!(PlatformFee::new(-0.01).is_err());
        assert!(PlatformFee::new(f64::NAN).is_err());
    }

    #[test]
    fn zero_fee_is_allowed() {
        let Ok(fee) = PlatformFee::new(0.0) else {
            panic!("zero fee must be accepted");
        };
        assert!((fee.net_amount(450.0) - 450.0).abs() < 1e-9);
        assert!((fee.fee_amount(450.0)).abs() < 1e-9);
    }

    #[test]
    fn fee_and_net_partition_the_total() {
        for fraction in [0.0, 0.05, 0.1, 0.33, 0.99] {
            let Ok(fee) = PlatformFee::new(fraction) else {
                panic!("valid fraction");
            };
            for total in [0.0, 1.0, 450.0, 123_456.78] {
                let sum = fee.fee_amount(total) + fee.net_amount(total);
                assert!((sum - total).abs() < 1e-6, "fee + net must equal total");
                assert!(fee.net_amount(total) <= total);
            }
        }
    }

    #[test]
    fn default_fee_is_five_percent() {
        let fee = PlatformFee::default();
        assert!((fee.fraction() - 0.05).abs() < f64::EPSILON);
        assert_eq!(fee.formatted_percent(), "5%");
    }

    #[test]
    fn net_amount_matches_scenario() {
        let fee = PlatformFee::default();
        assert!((fee.net_amount(450.0) - 427.5).abs() < 1e-9);
    }
}
