//! Fixed-point rounding stages used by the scoring formulas.
//!
//! Every helper returns a value carrying exactly `dp` fractional digits so that results
//! render identically (`15` becomes `15.000`) no matter which branch produced them.

use rust_decimal::{Decimal, RoundingStrategy};

/// Scale of every reported score.
pub const REPORTED_SCALE: u32 = 3;

/// Rounds toward zero, discarding the remaining digits.
pub fn truncate(value: Decimal, dp: u32) -> Decimal {
    fixed(value.round_dp_with_strategy(dp, RoundingStrategy::ToZero), dp)
}

/// Rounds to nearest, ties away from zero.
pub fn half_up(value: Decimal, dp: u32) -> Decimal {
    fixed(
        value.round_dp_with_strategy(dp, RoundingStrategy::MidpointAwayFromZero),
        dp,
    )
}

/// Widens an already-rounded value to exactly `dp` digits.
fn fixed(mut value: Decimal, dp: u32) -> Decimal {
    value.rescale(dp);
    value
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn truncate_discards_toward_zero() {
        assert_eq!(truncate(Decimal::new(199999, 5), 3).to_string(), "1.999");
        assert_eq!(truncate(Decimal::new(-199999, 5), 3).to_string(), "-1.999");
        assert_eq!(truncate(Decimal::new(225, 1), 6).to_string(), "22.500000");
    }

    #[test]
    fn half_up_breaks_ties_away_from_zero() {
        assert_eq!(half_up(Decimal::new(12345, 4), 3).to_string(), "1.235");
        assert_eq!(half_up(Decimal::new(-12345, 4), 3).to_string(), "-1.235");
        assert_eq!(half_up(Decimal::new(12344, 4), 3).to_string(), "1.234");
    }

    #[test]
    fn integers_are_widened_to_reported_scale() {
        assert_eq!(half_up(Decimal::from(15), REPORTED_SCALE).to_string(), "15.000");
        assert_eq!(truncate(Decimal::from(3), 4).to_string(), "3.0000");
    }
}
