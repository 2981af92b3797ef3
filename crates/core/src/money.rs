//! Fixed-point money.
//!
//! All monetary values are carried as integer cents so that line-item
//! multiplication and order totals are exact. Binary floating point never
//! enters price computation (3 x $6.00 is $18.00, not $17.999999).

use serde::{Deserialize, Serialize};

use crate::error::DomainError;

/// An amount of money in integer cents (USD implied).
///
/// `Money` is a value object: compared by value, cheap to copy. Negative
/// amounts are representable (deltas), but product prices and fees are
/// validated non-negative where they enter the domain.
#[derive(
    Debug, Copy, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Default, Serialize, Deserialize,
)]
#[serde(transparent)]
pub struct Money(i64);

impl Money {
    pub const ZERO: Money = Money(0);

    pub const fn from_cents(cents: i64) -> Self {
        Self(cents)
    }

    /// Convenience for whole-dollar amounts.
    pub const fn from_dollars(dollars: i64) -> Self {
        Self(dollars * 100)
    }

    pub const fn cents(self) -> i64 {
        self.0
    }

    pub const fn is_negative(self) -> bool {
        self.0 < 0
    }

    /// Multiply a unit price by a quantity, rejecting overflow.
    pub fn checked_mul(self, quantity: i64) -> Result<Money, DomainError> {
        self.0
            .checked_mul(quantity)
            .map(Money)
            .ok_or_else(|| DomainError::invalid_quantity("price multiplication overflowed"))
    }

    pub fn checked_add(self, other: Money) -> Result<Money, DomainError> {
        self.0
            .checked_add(other.0)
            .map(Money)
            .ok_or_else(|| DomainError::validation("money addition overflowed"))
    }
}

impl core::fmt::Display for Money {
    /// Renders with exactly two decimal digits, e.g. `18.50`.
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        let sign = if self.0 < 0 { "-" } else { "" };
        let abs = self.0.unsigned_abs();
        write!(f, "{sign}{}.{:02}", abs / 100, abs % 100)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn multiplication_is_exact() {
        // 3 dozen at $6.00 is exactly $18.00.
        let unit = Money::from_dollars(6);
        assert_eq!(unit.checked_mul(3).unwrap(), Money::from_cents(1800));
    }

    #[test]
    fn display_keeps_two_decimals() {
        assert_eq!(Money::from_cents(1850).to_string(), "18.50");
        assert_eq!(Money::from_cents(50).to_string(), "0.50");
        assert_eq!(Money::from_cents(600).to_string(), "6.00");
        assert_eq!(Money::from_cents(-125).to_string(), "-1.25");
    }

    #[test]
    fn overflow_is_reported_not_wrapped() {
        let err = Money::from_cents(i64::MAX).checked_mul(2).unwrap_err();
        assert!(matches!(err, DomainError::InvalidQuantity(_)));
    }

    mod proptest_tests {
        use super::*;
        use proptest::prelude::*;

        proptest! {
            /// Property: for in-range inputs, multiply-then-read-cents equals
            /// plain integer multiplication (no rounding drift anywhere).
            #[test]
            fn mul_matches_integer_arithmetic(
                cents in 0i64..1_000_000,
                qty in 1i64..10_000,
            ) {
                let product = Money::from_cents(cents).checked_mul(qty).unwrap();
                prop_assert_eq!(product.cents(), cents * qty);
            }

            /// Property: Display always carries exactly two decimal digits.
            #[test]
            fn display_has_two_decimals(cents in -1_000_000i64..1_000_000) {
                let s = Money::from_cents(cents).to_string();
                let (_, frac) = s.split_once('.').unwrap();
                prop_assert_eq!(frac.len(), 2);
            }
        }
    }
}
