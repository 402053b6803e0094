use rust_decimal::Decimal;
use tracing::debug;

use super::attendance::{attendance_score, MAX_ATTENDANCE_SCORE};
use super::domain::{CalculatedScore, GradeType, StudentRecord};
use super::error::ScoreError;
use super::grade::GradeScoreCalculator;
use super::policy::ScoringPolicy;
use super::volunteer::{ged_volunteer_score, general_volunteer_score};

/// Stateless engine assembling attendance, volunteer and grade figures into one score.
///
/// The engine holds only its validated policy, so a single instance can be shared across
/// threads and invoked for any number of applicants.
#[derive(Debug, Clone, Default)]
pub struct ScoreEngine {
    policy: ScoringPolicy,
}

impl ScoreEngine {
    pub fn new(policy: ScoringPolicy) -> Result<Self, ScoreError> {
        policy.validate()?;
        Ok(Self { policy })
    }

    pub fn policy(&self) -> &ScoringPolicy {
        &self.policy
    }

    pub fn calculate(&self, record: &StudentRecord) -> Result<CalculatedScore, ScoreError> {
        record.validate()?;

        let grade_components = GradeScoreCalculator::new(&self.policy).calculate(record)?;

        let (attendance_score, volunteer_score) = match record.grade_type {
            GradeType::Ged => {
                let ged = record.ged_application()?;
                (
                    MAX_ATTENDANCE_SCORE,
                    ged_volunteer_score(ged.average_score),
                )
            }
            GradeType::Graduated | GradeType::Ungraduated => {
                let application = record.general_application()?;
                (
                    attendance_score(record.grade_type, &application.attendance),
                    general_volunteer_score(application.volunteer_hours),
                )
            }
        };

        let grade_conversion_score = grade_components.conversion_score();
        let final_score =
            Decimal::from(attendance_score) + volunteer_score + grade_conversion_score;

        debug!(
            receipt_code = %record.receipt_code,
            grade_type = record.grade_type.label(),
            apply_type = record.apply_type.label(),
            substitution = grade_components.substitution().map(|kind| kind.label()),
            %final_score,
            "calculated admission score"
        );

        Ok(CalculatedScore {
            receipt_code: record.receipt_code,
            attendance_score,
            volunteer_score,
            grade_conversion_score,
            final_score,
            grade_components,
        })
    }
}
