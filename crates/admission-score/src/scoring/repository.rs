use chrono::{DateTime, Utc};
use serde::Serialize;

use super::domain::{CalculatedScore, ReceiptCode, StudentRecord};

/// Stored outcome of one calculation. The score itself stays free of timestamps.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ScoreRecord {
    pub score: CalculatedScore,
    pub calculated_at: DateTime<Utc>,
}

/// Lookup of validated applicant records by receipt code.
pub trait StudentRecordRepository: Send + Sync {
    fn insert(&self, record: StudentRecord) -> Result<StudentRecord, RepositoryError>;
    fn fetch(&self, receipt_code: ReceiptCode) -> Result<Option<StudentRecord>, RepositoryError>;
}

/// Persistence of calculated scores. Whether a later calculation replaces an earlier one
/// is up to the implementation.
pub trait ScoreRepository: Send + Sync {
    fn save(&self, record: ScoreRecord) -> Result<(), RepositoryError>;
    fn latest(&self, receipt_code: ReceiptCode) -> Result<Option<ScoreRecord>, RepositoryError>;
}

#[derive(Debug, thiserror::Error)]
pub enum RepositoryError {
    #[error("record already exists")]
    Conflict,
    #[error("repository unavailable: {0}")]
    Unavailable(String),
}
