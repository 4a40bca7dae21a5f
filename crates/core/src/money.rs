//! Money value object and amount validation.
//!
//! Amounts are held as an integer count of minor units (cents). Validation and
//! arithmetic are therefore exact; there is no floating-point tolerance except
//! in [`is_float_amount_valid`], which exists for callers still holding `f64`.

use core::str::FromStr;

use rust_decimal::Decimal;
use rust_decimal::prelude::ToPrimitive;
use serde::{Deserialize, Serialize};

use crate::error::{DomainError, DomainResult};
use crate::value_object::ValueObject;

/// Number of fractional digits a valid amount may carry.
pub const MINOR_UNIT_SCALE: u32 = 2;

const MINOR_UNITS_PER_UNIT: u64 = 100;

/// Accepted distance between `x * 100` and its nearest integer for `f64` input.
const FLOAT_TOLERANCE: f64 = 1e-6;

/// Returns `true` when `amount` is non-negative and has at most two
/// significant fractional digits.
///
/// Trailing zeros do not count: `1.100` is valid, `1.001` is not.
pub fn is_amount_valid(amount: Decimal) -> bool {
    amount >= Decimal::ZERO && amount.normalize().scale() <= MINOR_UNIT_SCALE
}

/// Binary floating point variant of [`is_amount_valid`].
///
/// `amount * 100` must lie within `1e-6` of an integer to absorb
/// representation error (`0.1 + 0.2` style drift).
pub fn is_float_amount_valid(amount: f64) -> bool {
    if !amount.is_finite() || amount < 0.0 {
        return false;
    }
    let multiplied = amount * MINOR_UNITS_PER_UNIT as f64;
    (multiplied - multiplied.round()).abs() < FLOAT_TOLERANCE
}

/// A non-negative monetary amount with cent precision.
#[derive(Debug, Copy, Clone, Default, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(try_from = "Decimal", into = "Decimal")]
pub struct Money(u64);

impl ValueObject for Money {}

impl Money {
    pub const ZERO: Money = Money(0);

    pub const fn from_minor_units(cents: u64) -> Self {
        Self(cents)
    }

    pub const fn minor_units(&self) -> u64 {
        self.0
    }

    /// Validate `amount` and convert it to minor units.
    pub fn from_decimal(amount: Decimal) -> DomainResult<Self> {
        if amount < Decimal::ZERO {
            return Err(DomainError::invalid_amount(format!(
                "{amount} is negative"
            )));
        }
        if !is_amount_valid(amount) {
            return Err(DomainError::invalid_amount(format!(
                "{amount} has more than {MINOR_UNIT_SCALE} decimal places"
            )));
        }

        amount
            .checked_mul(Decimal::from(MINOR_UNITS_PER_UNIT))
            .and_then(|cents| cents.to_u64())
            .map(Self)
            .ok_or_else(|| DomainError::invalid_amount(format!("{amount} is out of range")))
    }

    /// Validate a binary float amount and quantize it to the nearest cent.
    ///
    /// Halves round up, so residual drift such as `199.98999999` lands on
    /// `199.99`.
    pub fn from_f64(amount: f64) -> DomainResult<Self> {
        if !is_float_amount_valid(amount) {
            return Err(DomainError::invalid_amount(format!(
                "{amount} is negative, not finite or has more than {MINOR_UNIT_SCALE} decimal places"
            )));
        }

        let cents = (amount * MINOR_UNITS_PER_UNIT as f64).round();
        if cents >= u64::MAX as f64 {
            return Err(DomainError::invalid_amount(format!("{amount} is out of range")));
        }
        Ok(Self(cents as u64))
    }

    /// The amount as a decimal with exactly two fractional digits.
    pub fn to_decimal(&self) -> Decimal {
        Decimal::from_i128_with_scale(i128::from(self.0), MINOR_UNIT_SCALE)
    }

    pub fn checked_add(self, other: Money) -> Option<Money> {
        self.0.checked_add(other.0).map(Self)
    }

    /// `None` when `other` is larger than `self`; money never goes negative.
    pub fn checked_sub(self, other: Money) -> Option<Money> {
        self.0.checked_sub(other.0).map(Self)
    }
}

impl core::fmt::Display for Money {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        write!(
            f,
            "{}.{:02}",
            self.0 / MINOR_UNITS_PER_UNIT,
            self.0 % MINOR_UNITS_PER_UNIT
        )
    }
}

impl FromStr for Money {
    type Err = DomainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let amount = Decimal::from_str(s.trim())
            .map_err(|e| DomainError::invalid_amount(format!("{s:?}: {e}")))?;
        Self::from_decimal(amount)
    }
}

impl TryFrom<Decimal> for Money {
    type Error = DomainError;

    fn try_from(value: Decimal) -> Result<Self, Self::Error> {
        Self::from_decimal(value)
    }
}

impl TryFrom<f64> for Money {
    type Error = DomainError;

    fn try_from(value: f64) -> Result<Self, Self::Error> {
        Self::from_f64(value)
    }
}

impl From<Money> for Decimal {
    fn from(value: Money) -> Self {
        value.to_decimal()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    fn dec(s: &str) -> Decimal {
        Decimal::from_str(s).unwrap()
    }

    #[test]
    fn accepts_zero_cents_and_whole_units() {
        assert!(is_amount_valid(dec("0")));
        assert!(is_amount_valid(dec("0.01")));
        assert!(is_amount_valid(dec("100")));
        assert!(is_amount_valid(dec("99999999.99")));
    }

    #[test]
    fn rejects_negative_and_sub_cent_amounts() {
        assert!(!is_amount_valid(dec("-0.01")));
        assert!(!is_amount_valid(dec("-100")));
        assert!(!is_amount_valid(dec("0.001")));
        assert!(!is_amount_valid(dec("100.999")));
    }

    #[test]
    fn trailing_zeros_do_not_count_as_precision() {
        assert!(is_amount_valid(dec("1.100")));
        assert!(is_amount_valid(dec("5.0000")));
        assert_eq!(Money::from_decimal(dec("1.100")).unwrap().minor_units(), 110);
    }

    #[test]
    fn float_rule_matches_decimal_rule_on_plain_inputs() {
        for (value, expected) in [
            (0.0, true),
            (0.01, true),
            (100.0, true),
            (99_999_999.99, true),
            (-0.01, false),
            (-100.0, false),
            (0.001, false),
            (100.999, false),
        ] {
            assert_eq!(is_float_amount_valid(value), expected, "{value}");
        }
        assert!(!is_float_amount_valid(f64::NAN));
        assert!(!is_float_amount_valid(f64::INFINITY));
    }

    #[test]
    fn from_f64_absorbs_representation_error() {
        // 0.1 + 0.2 == 0.30000000000000004
        assert_eq!(Money::from_f64(0.1 + 0.2).unwrap(), Money::from_minor_units(30));
        assert_eq!(Money::from_f64(199.99).unwrap(), Money::from_minor_units(19_999));
        assert!(matches!(
            Money::from_f64(0.001),
            Err(DomainError::InvalidAmount(_))
        ));
    }

    #[test]
    fn from_decimal_reports_reason() {
        match Money::from_decimal(dec("-1")).unwrap_err() {
            DomainError::InvalidAmount(msg) => assert!(msg.contains("negative")),
            other => panic!("Expected InvalidAmount, got {other:?}"),
        }
        match Money::from_decimal(dec("1.234")).unwrap_err() {
            DomainError::InvalidAmount(msg) => assert!(msg.contains("decimal places")),
            other => panic!("Expected InvalidAmount, got {other:?}"),
        }
    }

    #[test]
    fn amounts_beyond_u64_cents_are_out_of_range() {
        let huge = Decimal::from(u64::MAX);
        match Money::from_decimal(huge).unwrap_err() {
            DomainError::InvalidAmount(msg) => assert!(msg.contains("out of range")),
            other => panic!("Expected InvalidAmount, got {other:?}"),
        }
    }

    #[test]
    fn from_f64_rejects_values_at_the_u64_limit() {
        // 2^64 cents: the cast would otherwise saturate to u64::MAX.
        match Money::from_f64(184_467_440_737_095_516.16).unwrap_err() {
            DomainError::InvalidAmount(msg) => assert!(msg.contains("out of range")),
            other => panic!("Expected InvalidAmount, got {other:?}"),
        }
    }

    #[test]
    fn display_always_has_two_fraction_digits() {
        assert_eq!(Money::ZERO.to_string(), "0.00");
        assert_eq!(Money::from_minor_units(1).to_string(), "0.01");
        assert_eq!(Money::from_minor_units(19_999).to_string(), "199.99");
        assert_eq!(Money::from_minor_units(20_000).to_string(), "200.00");
    }

    #[test]
    fn parses_from_string() {
        assert_eq!("399.99".parse::<Money>().unwrap(), Money::from_minor_units(39_999));
        assert_eq!(" 7 ".parse::<Money>().unwrap(), Money::from_minor_units(700));
        assert!("abc".parse::<Money>().is_err());
        assert!("-3".parse::<Money>().is_err());
    }

    #[test]
    fn checked_arithmetic_never_goes_negative() {
        let a = Money::from_minor_units(100);
        let b = Money::from_minor_units(101);
        assert_eq!(a.checked_sub(b), None);
        assert_eq!(b.checked_sub(a), Some(Money::from_minor_units(1)));
        assert_eq!(Money::from_minor_units(u64::MAX).checked_add(Money::from_minor_units(1)), None);
    }

    #[test]
    fn serializes_as_decimal_string_and_revalidates() {
        let json = serde_json::to_string(&Money::from_minor_units(19_999)).unwrap();
        assert_eq!(json, "\"199.99\"");

        let back: Money = serde_json::from_str(&json).unwrap();
        assert_eq!(back, Money::from_minor_units(19_999));

        assert!(serde_json::from_str::<Money>("\"0.001\"").is_err());
        assert!(serde_json::from_str::<Money>("\"-5\"").is_err());
    }

    proptest! {
        #![proptest_config(ProptestConfig {
            cases: 512,
            ..ProptestConfig::default()
        })]

        /// Property: every non-negative amount with at most two decimals is valid
        /// and survives the trip through minor units unchanged.
        #[test]
        fn two_decimal_amounts_are_valid(cents in 0i64..1_000_000_000_000i64) {
            let amount = Decimal::new(cents, 2);
            prop_assert!(is_amount_valid(amount));
            let money = Money::from_decimal(amount).unwrap();
            prop_assert_eq!(money.minor_units(), cents as u64);
            prop_assert_eq!(money.to_decimal(), amount);
        }

        /// Property: a non-zero third decimal digit always makes an amount invalid.
        #[test]
        fn third_decimal_digit_is_rejected(
            cents in 0i64..1_000_000_000i64,
            milli in 1i64..10i64
        ) {
            let amount = Decimal::new(cents * 10 + milli, 3);
            prop_assert!(!is_amount_valid(amount));
        }

        /// Property: negative amounts are always invalid.
        #[test]
        fn negative_amounts_are_rejected(cents in 1i64..1_000_000_000i64, scale in 0u32..4u32) {
            prop_assert!(!is_amount_valid(Decimal::new(-cents, scale)));
        }
    }
}
