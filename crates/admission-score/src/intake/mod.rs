//! CSV intake of applicant records for batch scoring.

mod parser;

use crate::scoring::StudentRecord;
use parser::ParseFailure;
use std::io::Read;
use std::path::Path;

#[derive(Debug)]
pub enum RecordImportError {
    Io(std::io::Error),
    Csv(csv::Error),
    Row { line: u64, reason: String },
}

impl std::fmt::Display for RecordImportError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            RecordImportError::Io(err) => write!(f, "failed to read applicant export: {}", err),
            RecordImportError::Csv(err) => write!(f, "invalid applicant CSV data: {}", err),
            RecordImportError::Row { line, reason } => {
                write!(f, "applicant row on line {}: {}", line, reason)
            }
        }
    }
}

impl std::error::Error for RecordImportError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            RecordImportError::Io(err) => Some(err),
            RecordImportError::Csv(err) => Some(err),
            RecordImportError::Row { .. } => None,
        }
    }
}

impl From<std::io::Error> for RecordImportError {
    fn from(err: std::io::Error) -> Self {
        Self::Io(err)
    }
}

impl From<ParseFailure> for RecordImportError {
    fn from(failure: ParseFailure) -> Self {
        match failure {
            ParseFailure::Csv(err) => Self::Csv(err),
            ParseFailure::Row { line, reason } => Self::Row { line, reason },
        }
    }
}

/// Reads applicant rows into [`StudentRecord`]s. Records are not validated against their
/// grade type here; the engine does that when scoring.
pub struct RecordImporter;

impl RecordImporter {
    pub fn from_path<P: AsRef<Path>>(path: P) -> Result<Vec<StudentRecord>, RecordImportError> {
        let file = std::fs::File::open(path)?;
        Self::from_reader(file)
    }

    pub fn from_reader<R: Read>(reader: R) -> Result<Vec<StudentRecord>, RecordImportError> {
        Ok(parser::parse_records(reader)?)
    }
}
