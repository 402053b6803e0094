use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use super::error::ScoreError;
use super::matrix::{AcademicYear, GradeMatrix, Term};
use super::policy::{InterpolationWeights, PartialYearPolicy, ScoringPolicy};
use super::rank::SubjectRank;

/// Exact average kept as a fraction so that weighting never sees a rounded quotient.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RankAverage {
    numerator: Decimal,
    denominator: Decimal,
}

impl RankAverage {
    fn of_ranks(ranks: impl Iterator<Item = SubjectRank>) -> Option<Self> {
        let (sum, count) = ranks.fold((Decimal::ZERO, 0u32), |(sum, count), rank| {
            (sum + Decimal::from(rank.value()), count + 1)
        });
        (count > 0).then(|| Self {
            numerator: sum,
            denominator: Decimal::from(count),
        })
    }

    /// Weighted mean of two averages.
    fn blend(adjacent: &Self, third: &Self, weights: &InterpolationWeights) -> Self {
        Self {
            numerator: weights.adjacent_year * adjacent.numerator * third.denominator
                + weights.third_year * third.numerator * adjacent.denominator,
            denominator: adjacent.denominator * third.denominator,
        }
    }

    pub fn value(&self) -> Decimal {
        self.numerator / self.denominator
    }

    /// `average × factor`, multiplied before dividing.
    pub fn scaled(&self, factor: Decimal) -> Decimal {
        self.numerator * factor / self.denominator
    }
}

/// Which fallback produced the first two year figures.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SubstitutionKind {
    /// Every year computed from its own ranks.
    None,
    /// Years 1 and 2 absent; both take the third-year average.
    ThirdYearOnly,
    /// Year 1 interpolated from years 2 and 3.
    EmptyFirstYear,
    /// Year 2 interpolated from years 1 and 3.
    EmptySecondYear,
}

impl SubstitutionKind {
    pub const fn label(self) -> &'static str {
        match self {
            SubstitutionKind::None => "none",
            SubstitutionKind::ThirdYearOnly => "third_year_only",
            SubstitutionKind::EmptyFirstYear => "empty_first_year",
            SubstitutionKind::EmptySecondYear => "empty_second_year",
        }
    }
}

/// Three unweighted year figures ready for the grade calculator.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct YearAverages {
    pub first: RankAverage,
    pub second: RankAverage,
    pub third: RankAverage,
    pub substitution: SubstitutionKind,
}

/// Classifies years as present or absent and applies the substitution precedence.
pub struct SemesterAggregator<'a> {
    policy: &'a ScoringPolicy,
}

impl<'a> SemesterAggregator<'a> {
    pub fn new(policy: &'a ScoringPolicy) -> Self {
        Self { policy }
    }

    pub fn is_year_absent(&self, matrix: &GradeMatrix, year: AcademicYear) -> bool {
        match (self.policy.partial_year, year) {
            (PartialYearPolicy::TreatAsEmpty, AcademicYear::First | AcademicYear::Second) => {
                Term::ordered()
                    .into_iter()
                    .any(|term| matrix.is_term_empty(year, term))
            }
            _ => matrix.is_year_empty(year),
        }
    }

    pub fn aggregate(&self, matrix: &GradeMatrix) -> Result<YearAverages, ScoreError> {
        if self.is_year_absent(matrix, AcademicYear::Third) {
            return Err(ScoreError::IncompleteRecord);
        }
        let third = RankAverage::of_ranks(matrix.year_ranks(AcademicYear::Third))
            .ok_or(ScoreError::IncompleteRecord)?;

        let first = self.own_average(matrix, AcademicYear::First);
        let second = self.own_average(matrix, AcademicYear::Second);
        let substitution = &self.policy.substitution;

        let averages = match (first, second) {
            (None, None) => YearAverages {
                first: third,
                second: third,
                third,
                substitution: SubstitutionKind::ThirdYearOnly,
            },
            (None, Some(second)) => YearAverages {
                first: RankAverage::blend(&second, &third, &substitution.empty_first_year),
                second,
                third,
                substitution: SubstitutionKind::EmptyFirstYear,
            },
            (Some(first), None) => YearAverages {
                first,
                second: RankAverage::blend(&first, &third, &substitution.empty_second_year),
                third,
                substitution: SubstitutionKind::EmptySecondYear,
            },
            (Some(first), Some(second)) => YearAverages {
                first,
                second,
                third,
                substitution: SubstitutionKind::None,
            },
        };

        Ok(averages)
    }

    fn own_average(&self, matrix: &GradeMatrix, year: AcademicYear) -> Option<RankAverage> {
        if self.is_year_absent(matrix, year) {
            return None;
        }
        RankAverage::of_ranks(matrix.year_ranks(year))
    }
}
