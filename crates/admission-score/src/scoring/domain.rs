use std::fmt;

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use super::error::{InvalidRecordReason, ScoreError};
use super::grade::GradeScoreComponents;
use super::matrix::GradeMatrix;
use super::rank::SubjectRanks;

/// Receipt number assigned to an applicant when the application is opened.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ReceiptCode(pub u32);

impl fmt::Display for ReceiptCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Academic standing that selects the computation path.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum GradeType {
    /// Graduated from middle school.
    Graduated,
    /// Currently enrolled, final term not yet graded.
    Ungraduated,
    /// Passed the GED-equivalent qualification exam.
    Ged,
}

impl GradeType {
    pub const fn application_kind(self) -> ApplicationKind {
        match self {
            GradeType::Graduated | GradeType::Ungraduated => ApplicationKind::General,
            GradeType::Ged => ApplicationKind::Ged,
        }
    }

    pub const fn label(self) -> &'static str {
        match self {
            GradeType::Graduated => "graduated",
            GradeType::Ungraduated => "ungraduated",
            GradeType::Ged => "ged",
        }
    }
}

/// Admission category. Every category other than `Common` is scaled by the special-track multiplier.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ApplyType {
    Common,
    Meister,
    Social,
}

impl ApplyType {
    pub const fn is_common(self) -> bool {
        matches!(self, ApplyType::Common)
    }

    pub const fn label(self) -> &'static str {
        match self {
            ApplyType::Common => "common",
            ApplyType::Meister => "meister",
            ApplyType::Social => "social",
        }
    }
}

/// Which application payload a record carries.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ApplicationKind {
    General,
    Ged,
}

impl fmt::Display for ApplicationKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ApplicationKind::General => write!(f, "general"),
            ApplicationKind::Ged => write!(f, "GED"),
        }
    }
}

/// Ranks for one graded semester of a general applicant.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SemesterGrades {
    pub year: u8,
    pub term: u8,
    pub ranks: SubjectRanks,
}

/// Attendance counters copied from the school record.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct AttendanceRecord {
    #[serde(default)]
    pub full_day_absences: u16,
    #[serde(default)]
    pub tardies: u16,
    #[serde(default)]
    pub early_leaves: u16,
    #[serde(default)]
    pub period_absences: u16,
}

/// Academic record of a graduated or in-progress middle-school applicant.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GeneralApplication {
    #[serde(default)]
    pub semesters: Vec<SemesterGrades>,
    #[serde(default)]
    pub attendance: AttendanceRecord,
    #[serde(default)]
    pub volunteer_hours: u32,
}

/// Record of an applicant admitted through the GED-equivalent exam.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GedApplication {
    pub average_score: Decimal,
}

/// Validated applicant data handed to the engine by the intake layer.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StudentRecord {
    pub receipt_code: ReceiptCode,
    pub grade_type: GradeType,
    pub apply_type: ApplyType,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub general: Option<GeneralApplication>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub ged: Option<GedApplication>,
}

impl StudentRecord {
    /// Checks that the payload agrees with the grade type and that every semester sits on a
    /// distinct, in-range coordinate, before anything is computed or stored.
    pub fn validate(&self) -> Result<(), ScoreError> {
        let found = match (&self.general, &self.ged) {
            (Some(_), Some(_)) => {
                return Err(ScoreError::InvalidRecord(
                    InvalidRecordReason::ConflictingApplications,
                ))
            }
            (None, None) => {
                return Err(ScoreError::InvalidRecord(
                    InvalidRecordReason::MissingApplication,
                ))
            }
            (Some(_), None) => ApplicationKind::General,
            (None, Some(_)) => ApplicationKind::Ged,
        };

        let expected = self.grade_type.application_kind();
        if expected != found {
            return Err(ScoreError::ApplicationTypeUnmatched {
                grade_type: self.grade_type,
                expected,
                found,
            });
        }

        if let Some(ged) = &self.ged {
            let value = ged.average_score;
            if value < Decimal::ZERO || value > Decimal::ONE_HUNDRED {
                return Err(ScoreError::InvalidRecord(
                    InvalidRecordReason::GedAverageOutOfRange { value },
                ));
            }
        }

        if let Some(general) = &self.general {
            GradeMatrix::from_semesters(&general.semesters)?;
        }

        Ok(())
    }

    pub fn general_application(&self) -> Result<&GeneralApplication, ScoreError> {
        self.general.as_ref().ok_or(ScoreError::ApplicationTypeUnmatched {
            grade_type: self.grade_type,
            expected: ApplicationKind::General,
            found: ApplicationKind::Ged,
        })
    }

    pub fn ged_application(&self) -> Result<&GedApplication, ScoreError> {
        self.ged.as_ref().ok_or(ScoreError::ApplicationTypeUnmatched {
            grade_type: self.grade_type,
            expected: ApplicationKind::Ged,
            found: ApplicationKind::General,
        })
    }
}

/// Final, immutable result of one computation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CalculatedScore {
    pub receipt_code: ReceiptCode,
    pub attendance_score: i32,
    pub volunteer_score: Decimal,
    pub grade_conversion_score: Decimal,
    pub final_score: Decimal,
    pub grade_components: GradeScoreComponents,
}
