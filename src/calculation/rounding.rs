//! Monetary rounding.
//!
//! Amounts are rounded to cents at the point each named quantity is
//! computed, half away from zero.

use rust_decimal::{Decimal, RoundingStrategy};

/// Rounds an amount to two decimal places.
///
/// ```
/// use ponto_engine::calculation::round_money;
/// use rust_decimal::Decimal;
/// use std::str::FromStr;
///
/// assert_eq!(round_money(Decimal::from_str("1666.665").unwrap()), Decimal::from_str("1666.67").unwrap());
/// ```
pub fn round_money(amount: Decimal) -> Decimal {
    amount.round_dp_with_strategy(2, RoundingStrategy::MidpointAwayFromZero)
}

/// Rounds a day count to one decimal place.
pub fn round_days(days: Decimal) -> Decimal {
    days.round_dp_with_strategy(1, RoundingStrategy::MidpointAwayFromZero)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::str::FromStr;

    fn dec(s: &str) -> Decimal {
        Decimal::from_str(s).unwrap()
    }

    #[test]
    fn test_midpoint_rounds_away_from_zero() {
        assert_eq!(round_money(dec("0.125")), dec("0.13"));
        assert_eq!(round_money(dec("-0.125")), dec("-0.13"));
    }

    #[test]
    fn test_repeating_fraction() {
        assert_eq!(round_money(dec("5000") / dec("3")), dec("1666.67"));
    }

    #[test]
    fn test_round_days() {
        assert_eq!(round_days(dec("7.25")), dec("7.3"));
        assert_eq!(round_days(dec("30")), dec("30.0"));
    }
}
