use rust_decimal::Decimal;
use serde::{Deserialize, Deserializer};
use std::io::Read;

use crate::scoring::{
    ApplyType, AttendanceRecord, GedApplication, GeneralApplication, GradeType, ReceiptCode,
    SemesterGrades, StudentRecord, SubjectRanks,
};

/// Semester columns in `(year, term)` order.
const SEMESTER_COLUMNS: [(u8, u8); 6] = [(1, 1), (1, 2), (2, 1), (2, 2), (3, 1), (3, 2)];

#[derive(Debug)]
pub(crate) enum ParseFailure {
    Csv(csv::Error),
    Row { line: u64, reason: String },
}

impl From<csv::Error> for ParseFailure {
    fn from(err: csv::Error) -> Self {
        Self::Csv(err)
    }
}

pub(crate) fn parse_records<R: Read>(reader: R) -> Result<Vec<StudentRecord>, ParseFailure> {
    let mut csv_reader = csv::ReaderBuilder::new()
        .trim(csv::Trim::All)
        .from_reader(reader);
    let mut records = Vec::new();

    for (index, row) in csv_reader.deserialize::<ApplicantRow>().enumerate() {
        // header occupies line 1
        let line = index as u64 + 2;
        let row = row?;
        let record = row
            .into_record()
            .map_err(|reason| ParseFailure::Row { line, reason })?;
        records.push(record);
    }

    Ok(records)
}

#[derive(Debug, Deserialize)]
struct ApplicantRow {
    receipt_code: u32,
    grade_type: String,
    apply_type: String,
    #[serde(default, deserialize_with = "empty_string_as_none")]
    ged_average: Option<String>,
    #[serde(default)]
    full_day_absences: Option<u16>,
    #[serde(default)]
    tardies: Option<u16>,
    #[serde(default)]
    early_leaves: Option<u16>,
    #[serde(default)]
    period_absences: Option<u16>,
    #[serde(default)]
    volunteer_hours: Option<u32>,
    #[serde(default, deserialize_with = "empty_string_as_none")]
    grades_1_1: Option<String>,
    #[serde(default, deserialize_with = "empty_string_as_none")]
    grades_1_2: Option<String>,
    #[serde(default, deserialize_with = "empty_string_as_none")]
    grades_2_1: Option<String>,
    #[serde(default, deserialize_with = "empty_string_as_none")]
    grades_2_2: Option<String>,
    #[serde(default, deserialize_with = "empty_string_as_none")]
    grades_3_1: Option<String>,
    #[serde(default, deserialize_with = "empty_string_as_none")]
    grades_3_2: Option<String>,
}

impl ApplicantRow {
    fn into_record(self) -> Result<StudentRecord, String> {
        let grade_type = parse_grade_type(&self.grade_type)?;
        let apply_type = parse_apply_type(&self.apply_type)?;
        let receipt_code = ReceiptCode(self.receipt_code);

        if grade_type == GradeType::Ged {
            if let Some(column) = self.populated_general_column() {
                return Err(format!("{column} given for a GED applicant"));
            }
            let raw = self
                .ged_average
                .ok_or_else(|| "GED applicant is missing ged_average".to_string())?;
            let average_score = raw
                .parse::<Decimal>()
                .map_err(|_| format!("ged_average '{raw}' is not a decimal"))?;

            return Ok(StudentRecord {
                receipt_code,
                grade_type,
                apply_type,
                general: None,
                ged: Some(GedApplication { average_score }),
            });
        }

        if self.ged_average.is_some() {
            return Err("ged_average given for a general applicant".to_string());
        }

        let columns = [
            self.grades_1_1,
            self.grades_1_2,
            self.grades_2_1,
            self.grades_2_2,
            self.grades_3_1,
            self.grades_3_2,
        ];
        let mut semesters = Vec::new();
        for ((year, term), letters) in SEMESTER_COLUMNS.into_iter().zip(columns) {
            let Some(letters) = letters else {
                continue;
            };
            let ranks = SubjectRanks::from_letters(&letters)
                .map_err(|err| format!("grades_{year}_{term}: {err}"))?;
            semesters.push(SemesterGrades { year, term, ranks });
        }

        Ok(StudentRecord {
            receipt_code,
            grade_type,
            apply_type,
            general: Some(GeneralApplication {
                semesters,
                attendance: AttendanceRecord {
                    full_day_absences: self.full_day_absences.unwrap_or(0),
                    tardies: self.tardies.unwrap_or(0),
                    early_leaves: self.early_leaves.unwrap_or(0),
                    period_absences: self.period_absences.unwrap_or(0),
                },
                volunteer_hours: self.volunteer_hours.unwrap_or(0),
            }),
            ged: None,
        })
    }

    /// First school-record column carrying a value, in header order.
    fn populated_general_column(&self) -> Option<&'static str> {
        let columns = [
            ("full_day_absences", self.full_day_absences.is_some()),
            ("tardies", self.tardies.is_some()),
            ("early_leaves", self.early_leaves.is_some()),
            ("period_absences", self.period_absences.is_some()),
            ("volunteer_hours", self.volunteer_hours.is_some()),
            ("grades_1_1", self.grades_1_1.is_some()),
            ("grades_1_2", self.grades_1_2.is_some()),
            ("grades_2_1", self.grades_2_1.is_some()),
            ("grades_2_2", self.grades_2_2.is_some()),
            ("grades_3_1", self.grades_3_1.is_some()),
            ("grades_3_2", self.grades_3_2.is_some()),
        ];
        columns
            .into_iter()
            .find_map(|(column, present)| present.then_some(column))
    }
}

fn parse_grade_type(raw: &str) -> Result<GradeType, String> {
    match raw.trim().to_ascii_lowercase().as_str() {
        "graduated" => Ok(GradeType::Graduated),
        "ungraduated" | "in_progress" => Ok(GradeType::Ungraduated),
        "ged" => Ok(GradeType::Ged),
        other => Err(format!("unknown grade_type '{other}'")),
    }
}

fn parse_apply_type(raw: &str) -> Result<ApplyType, String> {
    match raw.trim().to_ascii_lowercase().as_str() {
        "common" => Ok(ApplyType::Common),
        "meister" => Ok(ApplyType::Meister),
        "social" => Ok(ApplyType::Social),
        other => Err(format!("unknown apply_type '{other}'")),
    }
}

fn empty_string_as_none<'de, D>(deserializer: D) -> Result<Option<String>, D::Error>
where
    D: Deserializer<'de>,
{
    let opt = Option::<String>::deserialize(deserializer)?;
    Ok(opt.filter(|value| !value.trim().is_empty()))
}
