use admission_score::scoring::{
    ReceiptCode, RepositoryError, ScoreRecord, ScoreRepository, StudentRecord,
    StudentRecordRepository,
};
use metrics_exporter_prometheus::PrometheusHandle;
use std::collections::HashMap;
use std::sync::atomic::AtomicBool;
use std::sync::{Arc, Mutex};

#[derive(Clone)]
pub(crate) struct AppState {
    pub(crate) readiness: Arc<AtomicBool>,
    pub(crate) metrics: Arc<PrometheusHandle>,
}

#[derive(Default, Clone)]
pub(crate) struct InMemoryStudentRecords {
    records: Arc<Mutex<HashMap<ReceiptCode, StudentRecord>>>,
}

impl StudentRecordRepository for InMemoryStudentRecords {
    fn insert(&self, record: StudentRecord) -> Result<StudentRecord, RepositoryError> {
        let mut guard = self
            .records
            .lock()
            .map_err(|_| RepositoryError::Unavailable("record store poisoned".to_string()))?;
        if guard.contains_key(&record.receipt_code) {
            return Err(RepositoryError::Conflict);
        }
        guard.insert(record.receipt_code, record.clone());
        Ok(record)
    }

    fn fetch(&self, receipt_code: ReceiptCode) -> Result<Option<StudentRecord>, RepositoryError> {
        let guard = self
            .records
            .lock()
            .map_err(|_| RepositoryError::Unavailable("record store poisoned".to_string()))?;
        Ok(guard.get(&receipt_code).cloned())
    }
}

/// Keeps only the most recent score per applicant.
#[derive(Default, Clone)]
pub(crate) struct InMemoryScores {
    latest: Arc<Mutex<HashMap<ReceiptCode, ScoreRecord>>>,
}

impl InMemoryScores {
    pub(crate) fn all(&self) -> Result<Vec<ScoreRecord>, RepositoryError> {
        let guard = self
            .latest
            .lock()
            .map_err(|_| RepositoryError::Unavailable("score store poisoned".to_string()))?;
        Ok(guard.values().cloned().collect())
    }
}

impl ScoreRepository for InMemoryScores {
    fn save(&self, record: ScoreRecord) -> Result<(), RepositoryError> {
        let mut guard = self
            .latest
            .lock()
            .map_err(|_| RepositoryError::Unavailable("score store poisoned".to_string()))?;
        guard.insert(record.score.receipt_code, record);
        Ok(())
    }

    fn latest(&self, receipt_code: ReceiptCode) -> Result<Option<ScoreRecord>, RepositoryError> {
        let guard = self
            .latest
            .lock()
            .map_err(|_| RepositoryError::Unavailable("score store poisoned".to_string()))?;
        Ok(guard.get(&receipt_code).cloned())
    }
}
