//! # Money Module
//!
//! Provides the `Money` type used for product prices.
//!
//! ## Why Integer Money?
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │  THE FLOATING POINT PROBLEM                                             │
//! │                                                                         │
//! │  In floating point:                                                     │
//! │    19.99 is stored as 19.989999999999998436805981327779591083526611   │
//! │                                                                         │
//! │  A price column is decimal(10, 2): a FIXED-POINT number.                │
//! │                                                                         │
//! │  OUR SOLUTION: Integer Cents                                            │
//! │    "19.99"  →  1999 cents  →  "19.99"   (exact, always)                │
//! │                                                                         │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Usage
//! ```rust
//! use shop_core::money::Money;
//!
//! // Create from cents
//! let price = Money::from_cents(1999);
//! assert_eq!(price.to_string(), "19.99");
//!
//! // Or parse decimal text
//! let parsed: Money = "19.99".parse().unwrap();
//! assert_eq!(parsed, price);
//! ```

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use ts_rs::TS;

use crate::error::ValidationError;
use crate::PRICE_DECIMAL_PLACES;

/// Minor units per major unit (cents per dollar).
const CENTS_PER_UNIT: i64 = 100;

// =============================================================================
// Money Type
// =============================================================================

/// A fixed-point amount with two decimal places, held as integer cents.
///
/// ## Design Decisions
/// - **i64 (signed)**: the catalog does not forbid negative prices
/// - **Single field tuple struct**: Zero-cost abstraction over i64
/// - **Scale fixed at 2**: matches the `decimal(10, 2)` price column
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct Money(i64);

impl Money {
    /// Creates a Money value from cents (the smallest currency unit).
    ///
    /// ## Example
    /// ```rust
    /// use shop_core::money::Money;
    ///
    /// let price = Money::from_cents(1999); // 19.99
    /// assert_eq!(price.cents(), 1999);
    /// ```
    #[inline]
    pub const fn from_cents(cents: i64) -> Self {
        Money(cents)
    }

    /// Returns the value in cents.
    #[inline]
    pub const fn cents(&self) -> i64 {
        self.0
    }

    /// Returns the major unit portion (truncated toward zero).
    ///
    /// ## Example
    /// ```rust
    /// use shop_core::money::Money;
    ///
    /// assert_eq!(Money::from_cents(1999).dollars(), 19);
    /// assert_eq!(Money::from_cents(-550).dollars(), -5);
    /// ```
    #[inline]
    pub const fn dollars(&self) -> i64 {
        self.0 / CENTS_PER_UNIT
    }

    /// Returns the minor unit portion (always 0-99).
    #[inline]
    pub const fn cents_part(&self) -> i64 {
        (self.0 % CENTS_PER_UNIT).abs()
    }

    /// Returns zero money value.
    #[inline]
    pub const fn zero() -> Self {
        Money(0)
    }

    /// Number of significant decimal digits in the amount, counting the two
    /// decimal places (`19.99` → 4, `0.05` → 2, `0.00` → 2).
    pub fn digits(&self) -> u32 {
        let mut remaining = self.0.unsigned_abs() / CENTS_PER_UNIT as u64;
        let mut digits = PRICE_DECIMAL_PLACES;
        while remaining > 0 {
            digits += 1;
            remaining /= 10;
        }
        digits
    }

    /// Checks whether the amount fits a `decimal(max_digits, 2)` column.
    ///
    /// ## Example
    /// ```rust
    /// use shop_core::money::Money;
    ///
    /// assert!(Money::from_cents(99_999_999_99).fits_decimal(10));
    /// assert!(!Money::from_cents(100_000_000_000).fits_decimal(10));
    /// ```
    pub fn fits_decimal(&self, max_digits: u32) -> bool {
        self.digits() <= max_digits
    }
}

// =============================================================================
// Trait Implementations
// =============================================================================

/// Renders the amount the way a decimal column would: always two places,
/// no currency symbol.
impl fmt::Display for Money {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let sign = if self.0 < 0 { "-" } else { "" };
        write!(
            f,
            "{}{}.{:02}",
            sign,
            self.dollars().abs(),
            self.cents_part()
        )
    }
}

/// Default money is zero.
impl Default for Money {
    fn default() -> Self {
        Money::zero()
    }
}

/// Parses decimal text such as `"19.99"`, `"5"`, `"-3.5"` or `".75"`.
///
/// ## Rules
/// - Optional leading sign
/// - ASCII digits only, at most one decimal point
/// - At most two digits after the decimal point
///
/// The digit budget of the price column is NOT checked here; see
/// [`crate::validation::validate_price`].
impl FromStr for Money {
    type Err = ValidationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let text = s.trim();
        if text.is_empty() {
            return Err(ValidationError::required("price"));
        }

        let (negative, unsigned) = match text.as_bytes()[0] {
            b'-' => (true, &text[1..]),
            b'+' => (false, &text[1..]),
            _ => (false, text),
        };

        let (whole, fraction) = unsigned.split_once('.').unwrap_or((unsigned, ""));

        if whole.is_empty() && fraction.is_empty() {
            return Err(ValidationError::invalid_format(
                "price",
                "must be a decimal number",
            ));
        }

        if !whole.bytes().chain(fraction.bytes()).all(|b| b.is_ascii_digit()) {
            return Err(ValidationError::invalid_format(
                "price",
                "must be a decimal number",
            ));
        }

        if fraction.len() > PRICE_DECIMAL_PLACES as usize {
            return Err(ValidationError::invalid_format(
                "price",
                format!("must have at most {} decimal places", PRICE_DECIMAL_PLACES),
            ));
        }

        let out_of_range = || ValidationError::invalid_format("price", "out of range");

        let whole_value: i64 = if whole.is_empty() {
            0
        } else {
            whole.parse().map_err(|_| out_of_range())?
        };

        let fraction_value: i64 = match fraction.len() {
            0 => 0,
            1 => fraction.parse::<i64>().map_err(|_| out_of_range())? * 10,
            _ => fraction.parse().map_err(|_| out_of_range())?,
        };

        let cents = whole_value
            .checked_mul(CENTS_PER_UNIT)
            .and_then(|c| c.checked_add(fraction_value))
            .ok_or_else(out_of_range)?;

        Ok(Money(if negative { -cents } else { cents }))
    }
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    #[test]
    fn test_from_cents() {
        let money = Money::from_cents(1999);
        assert_eq!(money.cents(), 1999);
        assert_eq!(money.dollars(), 19);
        assert_eq!(money.cents_part(), 99);
    }

    #[test]
    fn test_display() {
        assert_eq!(Money::from_cents(1999).to_string(), "19.99");
        assert_eq!(Money::from_cents(500).to_string(), "5.00");
        assert_eq!(Money::from_cents(-550).to_string(), "-5.50");
        assert_eq!(Money::from_cents(-50).to_string(), "-0.50");
        assert_eq!(Money::zero().to_string(), "0.00");
    }

    #[test]
    fn test_parse() {
        assert_eq!("19.99".parse::<Money>().unwrap().cents(), 1999);
        assert_eq!("5".parse::<Money>().unwrap().cents(), 500);
        assert_eq!("3.5".parse::<Money>().unwrap().cents(), 350);
        assert_eq!(".75".parse::<Money>().unwrap().cents(), 75);
        assert_eq!("-3.5".parse::<Money>().unwrap().cents(), -350);
        assert_eq!(" 12.00 ".parse::<Money>().unwrap().cents(), 1200);
    }

    #[test]
    fn test_parse_rejects_bad_input() {
        assert!(matches!(
            "".parse::<Money>(),
            Err(ValidationError::Required { .. })
        ));
        assert!("abc".parse::<Money>().is_err());
        assert!("1.2.3".parse::<Money>().is_err());
        assert!(".".parse::<Money>().is_err());
        assert!("1e5".parse::<Money>().is_err());
        assert!("19.999".parse::<Money>().is_err());
        assert!("99999999999999999999".parse::<Money>().is_err());
    }

    #[test]
    fn test_digits() {
        assert_eq!(Money::from_cents(5).digits(), 2);
        assert_eq!(Money::from_cents(1999).digits(), 4);
        assert_eq!(Money::from_cents(-1999).digits(), 4);
        assert_eq!(Money::from_cents(99_999_999_99).digits(), 10);
        assert_eq!(Money::from_cents(1_234_567_890_123).digits(), 13);
    }

    #[test]
    fn test_fits_decimal() {
        assert!(Money::from_cents(1999).fits_decimal(10));
        assert!(Money::from_cents(99_999_999_99).fits_decimal(10));
        assert!(Money::from_cents(-99_999_999_99).fits_decimal(10));
        assert!(!Money::from_cents(100_000_000_000).fits_decimal(10));
    }

    #[test]
    fn test_serializes_as_cents() {
        let json = serde_json::to_string(&Money::from_cents(1999)).unwrap();
        assert_eq!(json, "1999");
    }

    proptest! {
        /// Property: whole and fractional digits land in the right place.
        #[test]
        fn parse_places_digits(whole in 0i64..100_000_000, fraction in 0i64..100) {
            let text = format!("{}.{:02}", whole, fraction);
            let parsed: Money = text.parse().unwrap();
            prop_assert_eq!(parsed.cents(), whole * 100 + fraction);
            prop_assert_eq!(parsed.to_string(), text);
        }
    }
}
