use rust_decimal::Decimal;
use serde::Serialize;

use super::aggregator::{SemesterAggregator, SubstitutionKind, YearAverages};
use super::decimal::{half_up, truncate, REPORTED_SCALE};
use super::domain::{ApplyType, GradeType, StudentRecord};
use super::error::ScoreError;
use super::matrix::GradeMatrix;
use super::policy::ScoringPolicy;

/// Digits kept after weighting a year average, before the category pipeline.
const WEIGHTED_SCALE: u32 = 6;
/// Digits kept of the normalised GED ratio.
const GED_RATIO_SCALE: u32 = 3;

/// Weight of a first- or second-year average.
const LOWER_YEAR_WEIGHT: Decimal = Decimal::from_parts(45, 0, 0, false, 1);
const THIRD_YEAR_WEIGHT: Decimal = Decimal::from_parts(6, 0, 0, false, 0);
/// Applied to every grade component of a non-`Common` applicant.
const SPECIAL_TRACK_MULTIPLIER: Decimal = Decimal::from_parts(6, 0, 0, false, 1);

/// Academic contribution to the composite score.
///
/// `conversion_score` is derived from the three year scores on the general path and is
/// the only populated figure on the GED path.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct GradeScoreComponents {
    #[serde(skip_serializing_if = "Option::is_none")]
    first_year_score: Option<Decimal>,
    #[serde(skip_serializing_if = "Option::is_none")]
    second_year_score: Option<Decimal>,
    #[serde(skip_serializing_if = "Option::is_none")]
    third_year_score: Option<Decimal>,
    conversion_score: Decimal,
    #[serde(skip_serializing_if = "Option::is_none")]
    substitution: Option<SubstitutionKind>,
}

impl GradeScoreComponents {
    fn general(first: Decimal, second: Decimal, third: Decimal, kind: SubstitutionKind) -> Self {
        Self {
            first_year_score: Some(first),
            second_year_score: Some(second),
            third_year_score: Some(third),
            conversion_score: first + second + third,
            substitution: Some(kind),
        }
    }

    fn ged(conversion_score: Decimal) -> Self {
        Self {
            first_year_score: None,
            second_year_score: None,
            third_year_score: None,
            conversion_score,
            substitution: None,
        }
    }

    pub fn first_year_score(&self) -> Option<Decimal> {
        self.first_year_score
    }

    pub fn second_year_score(&self) -> Option<Decimal> {
        self.second_year_score
    }

    pub fn third_year_score(&self) -> Option<Decimal> {
        self.third_year_score
    }

    pub fn conversion_score(&self) -> Decimal {
        self.conversion_score
    }

    pub fn substitution(&self) -> Option<SubstitutionKind> {
        self.substitution
    }
}

/// Turns a record's academic data into [`GradeScoreComponents`].
pub struct GradeScoreCalculator<'a> {
    policy: &'a ScoringPolicy,
}

impl<'a> GradeScoreCalculator<'a> {
    pub fn new(policy: &'a ScoringPolicy) -> Self {
        Self { policy }
    }

    pub fn calculate(&self, record: &StudentRecord) -> Result<GradeScoreComponents, ScoreError> {
        match record.grade_type {
            GradeType::Ged => {
                let ged = record.ged_application()?;
                let raw = ged_conversion(ged.average_score);
                Ok(GradeScoreComponents::ged(finish(raw, record.apply_type)))
            }
            GradeType::Graduated | GradeType::Ungraduated => {
                let matrix = GradeMatrix::from_record(record)?;
                let averages = SemesterAggregator::new(self.policy).aggregate(&matrix)?;
                Ok(general_components(&averages, record.apply_type))
            }
        }
    }
}

/// `(average − 50) / 50 × 150`, ratio truncated before scaling.
pub fn ged_conversion(average_score: Decimal) -> Decimal {
    let fifty = Decimal::from(50);
    let ratio = truncate((average_score - fifty) / fifty, GED_RATIO_SCALE);
    half_up(ratio * Decimal::from(150), REPORTED_SCALE)
}

/// Weighted, truncated year scores before the category pipeline.
pub fn weighted_year_scores(averages: &YearAverages) -> [Decimal; 3] {
    [
        truncate(averages.first.scaled(LOWER_YEAR_WEIGHT), WEIGHTED_SCALE),
        truncate(averages.second.scaled(LOWER_YEAR_WEIGHT), WEIGHTED_SCALE),
        truncate(averages.third.scaled(THIRD_YEAR_WEIGHT), WEIGHTED_SCALE),
    ]
}

fn general_components(averages: &YearAverages, apply_type: ApplyType) -> GradeScoreComponents {
    let [first, second, third] = weighted_year_scores(averages);
    GradeScoreComponents::general(
        finish(first, apply_type),
        finish(second, apply_type),
        finish(third, apply_type),
        averages.substitution,
    )
}

/// Category multiplier followed by the reported rounding.
fn finish(component: Decimal, apply_type: ApplyType) -> Decimal {
    let adjusted = if apply_type.is_common() {
        component
    } else {
        component * SPECIAL_TRACK_MULTIPLIER
    };
    half_up(adjusted, REPORTED_SCALE)
}
