use crate::infra::{InMemoryScores, InMemoryStudentRecords};
use admission_score::config::AppConfig;
use admission_score::error::AppError;
use admission_score::intake::RecordImporter;
use admission_score::scoring::{
    ApplyType, AttendanceRecord, CalculatedScore, GedApplication, GeneralApplication, GradeType,
    ReceiptCode, ScoreEngine, ScoreError, ScoreService, SemesterGrades, StudentRecord,
    SubjectRanks,
};
use chrono::SecondsFormat;
use clap::Args;
use rust_decimal::Decimal;
use serde_json::json;
use std::path::PathBuf;
use std::sync::Arc;

#[derive(Args, Debug)]
pub(crate) struct ScoreArgs {
    /// Applicant CSV export to score
    #[arg(long)]
    pub(crate) csv: PathBuf,
    /// Emit one JSON document instead of a table
    #[arg(long)]
    pub(crate) json: bool,
}

#[derive(Args, Debug, Default)]
pub(crate) struct DemoArgs {
    /// Print the stored score payload of the top-ranked applicant.
    #[arg(long)]
    pub(crate) show_payload: bool,
}

type ScoreOutcome = (ReceiptCode, Result<CalculatedScore, ScoreError>);

pub(crate) fn run_score_batch(args: ScoreArgs) -> Result<(), AppError> {
    let ScoreArgs { csv, json } = args;

    let config = AppConfig::load()?;
    let engine = ScoreEngine::new(config.scoring)?;
    let records = RecordImporter::from_path(&csv)?;

    let outcomes: Vec<ScoreOutcome> = records
        .iter()
        .map(|record| (record.receipt_code, engine.calculate(record)))
        .collect();

    if json {
        let payload: Vec<_> = outcomes
            .iter()
            .map(|(receipt_code, outcome)| match outcome {
                Ok(score) => json!({ "receipt_code": receipt_code, "score": score }),
                Err(err) => json!({ "receipt_code": receipt_code, "error": err.to_string() }),
            })
            .collect();
        match serde_json::to_string_pretty(&payload) {
            Ok(rendered) => println!("{}", rendered),
            Err(err) => println!("Score payload unavailable: {}", err),
        }
        return Ok(());
    }

    println!("Scored {} applicants from {}", records.len(), csv.display());
    render_score_table(&outcomes);
    Ok(())
}

pub(crate) fn run_demo(args: DemoArgs) -> Result<(), AppError> {
    println!("Admission scoring demo");

    let records = InMemoryStudentRecords::default();
    let scores = InMemoryScores::default();
    let service = ScoreService::new(
        Arc::new(records),
        Arc::new(scores.clone()),
        ScoreEngine::default(),
    );

    let cohort = demo_cohort()?;
    let mut outcomes = Vec::with_capacity(cohort.len());
    for record in cohort {
        let receipt_code = record.receipt_code;
        println!(
            "- Registered {} ({} / {})",
            receipt_code,
            record.grade_type.label(),
            record.apply_type.label()
        );
        if let Err(err) = service.register(record) {
            println!("  Registration rejected: {}", err);
            continue;
        }
        let outcome = match service.calculate(receipt_code) {
            Ok(score) => Ok(score),
            Err(admission_score::scoring::ScoreServiceError::Scoring(err)) => Err(err),
            Err(err) => {
                println!("  Scoring unavailable: {}", err);
                continue;
            }
        };
        outcomes.push((receipt_code, outcome));
    }

    println!();
    render_score_table(&outcomes);

    if !args.show_payload {
        return Ok(());
    }

    let mut stored = match scores.all() {
        Ok(stored) => stored,
        Err(err) => {
            println!("\nStored scores unavailable: {}", err);
            return Ok(());
        }
    };
    stored.sort_by(|a, b| b.score.final_score.cmp(&a.score.final_score));
    match stored.first() {
        Some(top) => {
            println!(
                "\nTop applicant {} scored at {}",
                top.score.receipt_code,
                top.calculated_at.to_rfc3339_opts(SecondsFormat::Secs, true)
            );
            match serde_json::to_string_pretty(&top.score) {
                Ok(rendered) => println!("{}", rendered),
                Err(err) => println!("Score payload unavailable: {}", err),
            }
        }
        None => println!("\nNo scores were stored"),
    }

    Ok(())
}

/// Ranked table; failed records are listed after every scored one.
fn render_score_table(outcomes: &[ScoreOutcome]) {
    let mut scored: Vec<&CalculatedScore> = outcomes
        .iter()
        .filter_map(|(_, outcome)| outcome.as_ref().ok())
        .collect();
    scored.sort_by(|a, b| {
        b.final_score
            .cmp(&a.final_score)
            .then(a.receipt_code.cmp(&b.receipt_code))
    });

    println!(
        "{:<4} {:>8} {:>10} {:>10} {:>10} {:>10}  {}",
        "Rank", "Receipt", "Attend", "Volunteer", "Grades", "Final", "Fallback"
    );
    for (index, score) in scored.iter().enumerate() {
        let fallback = score
            .grade_components
            .substitution()
            .map(|kind| kind.label())
            .unwrap_or("ged");
        println!(
            "{:<4} {:>8} {:>10} {:>10} {:>10} {:>10}  {}",
            index + 1,
            score.receipt_code.to_string(),
            score.attendance_score,
            score.volunteer_score.to_string(),
            score.grade_conversion_score.to_string(),
            score.final_score.to_string(),
            fallback
        );
    }

    let failures: Vec<_> = outcomes
        .iter()
        .filter_map(|(receipt_code, outcome)| outcome.as_ref().err().map(|err| (receipt_code, err)))
        .collect();
    if failures.is_empty() {
        return;
    }
    println!("Not scored:");
    for (receipt_code, err) in failures {
        println!("  - {}: {}", receipt_code, err);
    }
}

fn demo_cohort() -> Result<Vec<StudentRecord>, ScoreError> {
    Ok(vec![
        general_applicant(
            3001,
            GradeType::Graduated,
            ApplyType::Common,
            &["AAAAAAA", "AABAAAA", "ABAAAAA", "AAAAAAB", "AAAAAAA", "AAAAAAA"],
            AttendanceRecord::default(),
            48,
        )?,
        general_applicant(
            3002,
            GradeType::Ungraduated,
            ApplyType::Meister,
            &["BBCBBAB", "BBBBBAB", "ABBBBCB", "BBBBBBB", "AABBBBB", ""],
            AttendanceRecord {
                full_day_absences: 1,
                tardies: 4,
                early_leaves: 1,
                period_absences: 0,
            },
            22,
        )?,
        general_applicant(
            3003,
            GradeType::Graduated,
            ApplyType::Social,
            &["", "", "", "", "CBCBCBX", "BBCBCBX"],
            AttendanceRecord::default(),
            14,
        )?,
        general_applicant(
            3004,
            GradeType::Graduated,
            ApplyType::Common,
            &["BBBBBBB", "BBBBBBB", "", "", "AAAAAAA", "AAAAAAA"],
            AttendanceRecord {
                full_day_absences: 0,
                tardies: 2,
                early_leaves: 0,
                period_absences: 1,
            },
            31,
        )?,
        general_applicant(
            3005,
            GradeType::Ungraduated,
            ApplyType::Common,
            &["AAAAAAA", "AAAAAAA", "AAAAAAA", "AAAAAAA", "", ""],
            AttendanceRecord::default(),
            40,
        )?,
        StudentRecord {
            receipt_code: ReceiptCode(3006),
            grade_type: GradeType::Ged,
            apply_type: ApplyType::Common,
            general: None,
            ged: Some(GedApplication {
                average_score: Decimal::new(8825, 2),
            }),
        },
    ])
}

/// Semester letters in `1-1, 1-2, 2-1, 2-2, 3-1, 3-2` order; blank entries are skipped.
fn general_applicant(
    receipt_code: u32,
    grade_type: GradeType,
    apply_type: ApplyType,
    letters: &[&str; 6],
    attendance: AttendanceRecord,
    volunteer_hours: u32,
) -> Result<StudentRecord, ScoreError> {
    let mut semesters = Vec::new();
    for (index, letters) in letters.iter().enumerate() {
        if letters.is_empty() {
            continue;
        }
        semesters.push(SemesterGrades {
            year: (index / 2 + 1) as u8,
            term: (index % 2 + 1) as u8,
            ranks: SubjectRanks::from_letters(letters)?,
        });
    }

    Ok(StudentRecord {
        receipt_code: ReceiptCode(receipt_code),
        grade_type,
        apply_type,
        general: Some(GeneralApplication {
            semesters,
            attendance,
            volunteer_hours,
        }),
        ged: None,
    })
}
