use rust_decimal::Decimal;

use super::decimal::{half_up, truncate, REPORTED_SCALE};

/// Hours at or above which the maximum score is awarded.
pub const FULL_CREDIT_HOURS: u32 = 45;
/// Hours at or below which only the floor score is awarded.
pub const FLOOR_HOURS: u32 = 9;

const MAX_VOLUNTEER_SCORE: i64 = 15;
const MIN_VOLUNTEER_SCORE: i64 = 3;
const INTERMEDIATE_SCALE: u32 = 4;

/// Tiered score on volunteer hours, reported at three digits.
pub fn general_volunteer_score(hours: u32) -> Decimal {
    if hours >= FULL_CREDIT_HOURS {
        return half_up(Decimal::from(MAX_VOLUNTEER_SCORE), REPORTED_SCALE);
    }
    if hours <= FLOOR_HOURS {
        return half_up(Decimal::from(MIN_VOLUNTEER_SCORE), REPORTED_SCALE);
    }

    let credited = Decimal::from(hours - FLOOR_HOURS) / Decimal::from(3);
    let score = truncate(credited, INTERMEDIATE_SCALE) + Decimal::from(MIN_VOLUNTEER_SCORE);
    half_up(score, REPORTED_SCALE)
}

/// `(average − 40) / 5 + 3` for GED applicants.
pub fn ged_volunteer_score(average_score: Decimal) -> Decimal {
    let scaled = half_up(
        (average_score - Decimal::from(40)) / Decimal::from(5),
        REPORTED_SCALE,
    );
    scaled + Decimal::from(MIN_VOLUNTEER_SCORE)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn tier_boundaries() {
        assert_eq!(general_volunteer_score(0).to_string(), "3.000");
        assert_eq!(general_volunteer_score(9).to_string(), "3.000");
        assert_eq!(general_volunteer_score(45).to_string(), "15.000");
        assert_eq!(general_volunteer_score(120).to_string(), "15.000");
    }

    #[test]
    fn linear_band_truncates_then_rounds() {
        assert_eq!(general_volunteer_score(27).to_string(), "9.000");
        assert_eq!(general_volunteer_score(10).to_string(), "3.333");
        assert_eq!(general_volunteer_score(11).to_string(), "3.667");
        assert_eq!(general_volunteer_score(44).to_string(), "14.667");
    }

    #[test]
    fn score_is_monotone_and_bounded() {
        let mut previous = general_volunteer_score(0);
        for hours in 1..=60 {
            let score = general_volunteer_score(hours);
            assert!(score >= previous, "score dropped at {hours} hours");
            assert!(score >= Decimal::from(3) && score <= Decimal::from(15));
            previous = score;
        }
    }

    #[test]
    fn ged_volunteer_follows_average() {
        assert_eq!(ged_volunteer_score(Decimal::from(80)).to_string(), "11.000");
        assert_eq!(ged_volunteer_score(Decimal::new(8333, 2)).to_string(), "11.666");
        assert_eq!(ged_volunteer_score(Decimal::from(100)).to_string(), "15.000");
    }
}
