use std::sync::Arc;

use chrono::Utc;
use tracing::{info, warn};

use super::domain::{CalculatedScore, ReceiptCode, StudentRecord};
use super::engine::ScoreEngine;
use super::error::ScoreError;
use super::repository::{RepositoryError, ScoreRecord, ScoreRepository, StudentRecordRepository};

/// Service composing record lookup, the scoring engine and score persistence.
pub struct ScoreService<R, S> {
    records: Arc<R>,
    scores: Arc<S>,
    engine: Arc<ScoreEngine>,
}

impl<R, S> ScoreService<R, S>
where
    R: StudentRecordRepository + 'static,
    S: ScoreRepository + 'static,
{
    pub fn new(records: Arc<R>, scores: Arc<S>, engine: ScoreEngine) -> Self {
        Self {
            records,
            scores,
            engine: Arc::new(engine),
        }
    }

    /// Store a record after checking it agrees with its grade type.
    pub fn register(&self, record: StudentRecord) -> Result<StudentRecord, ScoreServiceError> {
        record.validate()?;
        let stored = self.records.insert(record)?;
        info!(receipt_code = %stored.receipt_code, "student record registered");
        Ok(stored)
    }

    /// Calculate and persist the score of a registered applicant.
    pub fn calculate(
        &self,
        receipt_code: ReceiptCode,
    ) -> Result<CalculatedScore, ScoreServiceError> {
        let record = self
            .records
            .fetch(receipt_code)?
            .ok_or(ScoreServiceError::RecordNotFound(receipt_code))?;

        let score = self.engine.calculate(&record).map_err(|error| {
            warn!(%receipt_code, %error, "score calculation rejected");
            error
        })?;

        self.scores.save(ScoreRecord {
            score: score.clone(),
            calculated_at: Utc::now(),
        })?;

        info!(%receipt_code, final_score = %score.final_score, "score stored");
        Ok(score)
    }

    /// Calculate without touching either repository.
    pub fn preview(&self, record: &StudentRecord) -> Result<CalculatedScore, ScoreServiceError> {
        Ok(self.engine.calculate(record)?)
    }

    /// Most recent stored score for an applicant.
    pub fn latest(&self, receipt_code: ReceiptCode) -> Result<ScoreRecord, ScoreServiceError> {
        self.scores
            .latest(receipt_code)?
            .ok_or(ScoreServiceError::ScoreNotFound(receipt_code))
    }
}

/// Error raised by the score service.
#[derive(Debug, thiserror::Error)]
pub enum ScoreServiceError {
    #[error("no student record for receipt code {0}")]
    RecordNotFound(ReceiptCode),
    #[error("no calculated score for receipt code {0}")]
    ScoreNotFound(ReceiptCode),
    #[error(transparent)]
    Scoring(#[from] ScoreError),
    #[error(transparent)]
    Repository(#[from] RepositoryError),
}
