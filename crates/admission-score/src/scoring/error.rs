use rust_decimal::Decimal;

use super::domain::{ApplicationKind, GradeType};

/// Terminal failures of a score computation. No partial score accompanies any of them.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ScoreError {
    #[error("invalid student record: {0}")]
    InvalidRecord(InvalidRecordReason),
    #[error("student record has no third-year grades")]
    IncompleteRecord,
    #[error("grade type {grade_type:?} requires a {expected} application, found {found}")]
    ApplicationTypeUnmatched {
        grade_type: GradeType,
        expected: ApplicationKind,
        found: ApplicationKind,
    },
    #[error("invalid scoring policy: {0}")]
    InvalidPolicy(String),
}

/// Shape or domain violations detected while reading a record.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum InvalidRecordReason {
    #[error("rank {value} exceeds maximum 5")]
    RankOutOfRange { value: u8 },
    #[error("unknown grade letter '{letter}'")]
    UnknownGradeLetter { letter: char },
    #[error("expected 7 grade letters, found {found}")]
    GradeLetterCount { found: usize },
    #[error("academic year {year} is outside 1..=3")]
    YearOutOfRange { year: u8 },
    #[error("term {term} is outside 1..=2")]
    TermOutOfRange { term: u8 },
    #[error("semester {year}-{term} recorded more than once")]
    DuplicateSemester { year: u8, term: u8 },
    #[error("GED records do not carry a grade matrix")]
    GedHasNoMatrix,
    #[error("record carries both general and GED applications")]
    ConflictingApplications,
    #[error("record carries no application")]
    MissingApplication,
    #[error("GED average {value} is outside 0..=100")]
    GedAverageOutOfRange { value: Decimal },
}
