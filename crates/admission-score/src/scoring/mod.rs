//! Composite admission scoring.
//!
//! A validated [`StudentRecord`] flows through the [`GradeMatrix`], the
//! [`SemesterAggregator`] and the [`GradeScoreCalculator`], while attendance and volunteer
//! figures are computed independently. [`ScoreEngine::calculate`] sums the three into a
//! [`CalculatedScore`]. Every stage is pure; the service and router wrap it with record
//! lookup and persistence.

mod aggregator;
mod attendance;
pub mod decimal;
pub mod domain;
mod engine;
pub mod error;
mod grade;
mod matrix;
mod policy;
mod rank;
pub mod repository;
pub mod router;
pub mod service;
mod volunteer;

#[cfg(test)]
mod tests;

pub use aggregator::{RankAverage, SemesterAggregator, SubstitutionKind, YearAverages};
pub use attendance::{attendance_score, MAX_ATTENDANCE_SCORE};
pub use domain::{
    ApplicationKind, ApplyType, AttendanceRecord, CalculatedScore, GedApplication,
    GeneralApplication, GradeType, ReceiptCode, SemesterGrades, StudentRecord,
};
pub use engine::ScoreEngine;
pub use error::{InvalidRecordReason, ScoreError};
pub use grade::{ged_conversion, weighted_year_scores, GradeScoreCalculator, GradeScoreComponents};
pub use matrix::{AcademicYear, GradeMatrix, Term};
pub use policy::{InterpolationWeights, PartialYearPolicy, ScoringPolicy, SubstitutionPolicy};
pub use rank::{Subject, SubjectRank, SubjectRanks, MAX_RANK};
pub use repository::{RepositoryError, ScoreRecord, ScoreRepository, StudentRecordRepository};
pub use router::score_router;
pub use service::{ScoreService, ScoreServiceError};
pub use volunteer::{ged_volunteer_score, general_volunteer_score};
