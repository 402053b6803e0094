use serde::{Deserialize, Serialize};

use super::domain::{GradeType, SemesterGrades, StudentRecord};
use super::error::{InvalidRecordReason, ScoreError};
use super::rank::{Subject, SubjectRank, SubjectRanks};

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AcademicYear {
    First,
    Second,
    Third,
}

impl AcademicYear {
    pub const fn ordered() -> [Self; 3] {
        [Self::First, Self::Second, Self::Third]
    }

    pub fn from_number(year: u8) -> Result<Self, ScoreError> {
        match year {
            1 => Ok(Self::First),
            2 => Ok(Self::Second),
            3 => Ok(Self::Third),
            _ => Err(ScoreError::InvalidRecord(
                InvalidRecordReason::YearOutOfRange { year },
            )),
        }
    }

    pub const fn number(self) -> u8 {
        match self {
            Self::First => 1,
            Self::Second => 2,
            Self::Third => 3,
        }
    }

    const fn index(self) -> usize {
        self.number() as usize - 1
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Term {
    First,
    Second,
}

impl Term {
    pub const fn ordered() -> [Self; 2] {
        [Self::First, Self::Second]
    }

    pub fn from_number(term: u8) -> Result<Self, ScoreError> {
        match term {
            1 => Ok(Self::First),
            2 => Ok(Self::Second),
            _ => Err(ScoreError::InvalidRecord(
                InvalidRecordReason::TermOutOfRange { term },
            )),
        }
    }

    pub const fn number(self) -> u8 {
        match self {
            Self::First => 1,
            Self::Second => 2,
        }
    }

    const fn index(self) -> usize {
        self.number() as usize - 1
    }
}

/// Year × term × subject table of optional ranks. Missing semesters stay empty.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct GradeMatrix {
    cells: [[SubjectRanks; 2]; 3],
}

impl GradeMatrix {
    pub fn from_record(record: &StudentRecord) -> Result<Self, ScoreError> {
        if record.grade_type == GradeType::Ged {
            return Err(ScoreError::InvalidRecord(
                InvalidRecordReason::GedHasNoMatrix,
            ));
        }

        let application = record.general_application()?;
        Self::from_semesters(&application.semesters)
    }

    pub fn from_semesters(semesters: &[SemesterGrades]) -> Result<Self, ScoreError> {
        let mut cells = [[SubjectRanks::default(); 2]; 3];
        let mut seen = [[false; 2]; 3];

        for semester in semesters {
            let year = AcademicYear::from_number(semester.year)?;
            let term = Term::from_number(semester.term)?;
            let slot = &mut seen[year.index()][term.index()];
            if *slot {
                return Err(ScoreError::InvalidRecord(
                    InvalidRecordReason::DuplicateSemester {
                        year: semester.year,
                        term: semester.term,
                    },
                ));
            }
            *slot = true;
            cells[year.index()][term.index()] = semester.ranks;
        }

        Ok(Self { cells })
    }

    pub fn term(&self, year: AcademicYear, term: Term) -> &SubjectRanks {
        &self.cells[year.index()][term.index()]
    }

    pub fn rank(&self, year: AcademicYear, term: Term, subject: Subject) -> Option<SubjectRank> {
        self.term(year, term).get(subject)
    }

    pub fn is_term_empty(&self, year: AcademicYear, term: Term) -> bool {
        self.term(year, term).is_empty()
    }

    /// A year is empty only when both of its terms are.
    pub fn is_year_empty(&self, year: AcademicYear) -> bool {
        Term::ordered()
            .into_iter()
            .all(|term| self.is_term_empty(year, term))
    }

    /// All present ranks of one year, both terms.
    pub fn year_ranks(&self, year: AcademicYear) -> impl Iterator<Item = SubjectRank> + '_ {
        self.cells[year.index()]
            .iter()
            .flat_map(|ranks| ranks.to_array())
            .flatten()
    }
}
