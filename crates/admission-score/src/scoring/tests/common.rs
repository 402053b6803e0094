use std::collections::HashMap;
use std::sync::{Arc, Mutex};

use rust_decimal::Decimal;

use crate::scoring::domain::{
    ApplyType, AttendanceRecord, GedApplication, GeneralApplication, GradeType, ReceiptCode,
    SemesterGrades, StudentRecord,
};
use crate::scoring::rank::SubjectRanks;
use crate::scoring::repository::{
    RepositoryError, ScoreRecord, ScoreRepository, StudentRecordRepository,
};
use crate::scoring::{ScoreEngine, ScoreService};

pub(super) fn semester(year: u8, term: u8, letters: &str) -> SemesterGrades {
    SemesterGrades {
        year,
        term,
        ranks: SubjectRanks::from_letters(letters).expect("valid letters"),
    }
}

/// Six semesters, one letter repeated per year.
pub(super) fn full_record_semesters(first: &str, second: &str, third: &str) -> Vec<SemesterGrades> {
    vec![
        semester(1, 1, first),
        semester(1, 2, first),
        semester(2, 1, second),
        semester(2, 2, second),
        semester(3, 1, third),
        semester(3, 2, third),
    ]
}

pub(super) fn general_record(
    receipt_code: u32,
    apply_type: ApplyType,
    semesters: Vec<SemesterGrades>,
) -> StudentRecord {
    StudentRecord {
        receipt_code: ReceiptCode(receipt_code),
        grade_type: GradeType::Graduated,
        apply_type,
        general: Some(GeneralApplication {
            semesters,
            attendance: AttendanceRecord::default(),
            volunteer_hours: 50,
        }),
        ged: None,
    }
}

/// Graduated applicant with straight A ranks, perfect attendance and 50 volunteer hours.
pub(super) fn top_record(receipt_code: u32, apply_type: ApplyType) -> StudentRecord {
    general_record(
        receipt_code,
        apply_type,
        full_record_semesters("AAAAAAA", "AAAAAAA", "AAAAAAA"),
    )
}

pub(super) fn ged_record(receipt_code: u32, average: Decimal, apply_type: ApplyType) -> StudentRecord {
    StudentRecord {
        receipt_code: ReceiptCode(receipt_code),
        grade_type: GradeType::Ged,
        apply_type,
        general: None,
        ged: Some(GedApplication {
            average_score: average,
        }),
    }
}

pub(super) fn score_service() -> (
    Arc<ScoreService<MemoryRecords, MemoryScores>>,
    MemoryScores,
) {
    let scores = MemoryScores::default();
    let service = ScoreService::new(
        Arc::new(MemoryRecords::default()),
        Arc::new(scores.clone()),
        ScoreEngine::default(),
    );
    (Arc::new(service), scores)
}

#[derive(Default, Clone)]
pub(super) struct MemoryRecords {
    records: Arc<Mutex<HashMap<ReceiptCode, StudentRecord>>>,
}

impl StudentRecordRepository for MemoryRecords {
    fn insert(&self, record: StudentRecord) -> Result<StudentRecord, RepositoryError> {
        let mut guard = self.records.lock().expect("lock");
        if guard.contains_key(&record.receipt_code) {
            return Err(RepositoryError::Conflict);
        }
        guard.insert(record.receipt_code, record.clone());
        Ok(record)
    }

    fn fetch(&self, receipt_code: ReceiptCode) -> Result<Option<StudentRecord>, RepositoryError> {
        let guard = self.records.lock().expect("lock");
        Ok(guard.get(&receipt_code).cloned())
    }
}

#[derive(Default, Clone)]
pub(super) struct MemoryScores {
    saved: Arc<Mutex<Vec<ScoreRecord>>>,
}

impl MemoryScores {
    pub(super) fn saved(&self) -> Vec<ScoreRecord> {
        self.saved.lock().expect("lock").clone()
    }
}

impl ScoreRepository for MemoryScores {
    fn save(&self, record: ScoreRecord) -> Result<(), RepositoryError> {
        self.saved.lock().expect("lock").push(record);
        Ok(())
    }

    fn latest(&self, receipt_code: ReceiptCode) -> Result<Option<ScoreRecord>, RepositoryError> {
        let guard = self.saved.lock().expect("lock");
        Ok(guard
            .iter()
            .rev()
            .find(|record| record.score.receipt_code == receipt_code)
            .cloned())
    }
}

pub(super) struct UnavailableScores;

impl ScoreRepository for UnavailableScores {
    fn save(&self, _record: ScoreRecord) -> Result<(), RepositoryError> {
        Err(RepositoryError::Unavailable("score store offline".to_string()))
    }

    fn latest(&self, _receipt_code: ReceiptCode) -> Result<Option<ScoreRecord>, RepositoryError> {
        Err(RepositoryError::Unavailable("score store offline".to_string()))
    }
}
