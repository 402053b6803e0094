use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use super::error::ScoreError;

/// How a year with exactly one fully absent term is classified.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PartialYearPolicy {
    /// The year is averaged over whatever ranks it has.
    #[default]
    TreatAsPresent,
    /// A first or second year missing a term is substituted like a fully empty year.
    /// The third year is never substituted.
    TreatAsEmpty,
}

impl PartialYearPolicy {
    pub fn parse(raw: &str) -> Option<Self> {
        match raw.trim().to_ascii_lowercase().as_str() {
            "present" | "treat_as_present" => Some(Self::TreatAsPresent),
            "empty" | "treat_as_empty" => Some(Self::TreatAsEmpty),
            _ => None,
        }
    }
}

/// Weights used to estimate one missing year from the other lower year and the third year.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct InterpolationWeights {
    pub adjacent_year: Decimal,
    pub third_year: Decimal,
}

impl InterpolationWeights {
    pub fn even() -> Self {
        let half = Decimal::new(5, 1);
        Self {
            adjacent_year: half,
            third_year: half,
        }
    }

    /// Parses `"<adjacent>,<third>"`, e.g. `"0.4,0.6"`.
    pub fn parse(raw: &str) -> Option<Self> {
        let (adjacent, third) = raw.split_once(',')?;
        Some(Self {
            adjacent_year: adjacent.trim().parse().ok()?,
            third_year: third.trim().parse().ok()?,
        })
    }

    fn validate(&self, name: &str) -> Result<(), ScoreError> {
        if self.adjacent_year.is_sign_negative() || self.third_year.is_sign_negative() {
            return Err(ScoreError::InvalidPolicy(format!(
                "{name} weights must not be negative"
            )));
        }
        if self.adjacent_year + self.third_year != Decimal::ONE {
            return Err(ScoreError::InvalidPolicy(format!(
                "{name} weights must sum to 1 (found {} + {})",
                self.adjacent_year, self.third_year
            )));
        }
        Ok(())
    }
}

impl Default for InterpolationWeights {
    fn default() -> Self {
        Self::even()
    }
}

/// Interpolation used when exactly one of the first two years is absent.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SubstitutionPolicy {
    /// Year 1 estimated from year 2 (`adjacent_year`) and year 3.
    pub empty_first_year: InterpolationWeights,
    /// Year 2 estimated from year 1 (`adjacent_year`) and year 3.
    pub empty_second_year: InterpolationWeights,
}

/// Tunable parts of the grade pipeline. Everything else is fixed by the admission rules.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ScoringPolicy {
    #[serde(default)]
    pub partial_year: PartialYearPolicy,
    #[serde(default)]
    pub substitution: SubstitutionPolicy,
}

impl ScoringPolicy {
    pub fn validate(&self) -> Result<(), ScoreError> {
        self.substitution
            .empty_first_year
            .validate("empty first year")?;
        self.substitution
            .empty_second_year
            .validate("empty second year")
    }
}
