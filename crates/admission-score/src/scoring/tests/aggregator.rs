use super::common::*;
use rust_decimal::Decimal;

use crate::scoring::decimal::{half_up, REPORTED_SCALE};
use crate::scoring::domain::{ApplyType, GradeType};
use crate::scoring::{
    weighted_year_scores, GradeMatrix, GradeScoreCalculator, InterpolationWeights,
    PartialYearPolicy, ScoreError, ScoringPolicy, SemesterAggregator, SubstitutionKind,
};

fn aggregate(
    policy: &ScoringPolicy,
    semesters: &[crate::scoring::SemesterGrades],
) -> Result<crate::scoring::YearAverages, ScoreError> {
    let matrix = GradeMatrix::from_semesters(semesters).expect("matrix builds");
    SemesterAggregator::new(policy).aggregate(&matrix)
}

fn weighted_strings(averages: &crate::scoring::YearAverages) -> Vec<String> {
    weighted_year_scores(averages)
        .iter()
        .map(Decimal::to_string)
        .collect()
}

#[test]
fn present_years_average_their_own_ranks() {
    let policy = ScoringPolicy::default();
    let averages = aggregate(
        &policy,
        &full_record_semesters("AAAAAAA", "BBBBBBB", "CCCCCCC"),
    )
    .expect("aggregates");

    assert_eq!(averages.substitution, SubstitutionKind::None);
    assert_eq!(averages.first.value(), Decimal::from(5));
    assert_eq!(averages.second.value(), Decimal::from(4));
    assert_eq!(averages.third.value(), Decimal::from(3));
    assert_eq!(
        weighted_strings(&averages),
        ["22.500000", "18.000000", "18.000000"]
    );
}

#[test]
fn averages_span_both_terms() {
    let policy = ScoringPolicy::default();
    let averages = aggregate(
        &policy,
        &[
            semester(1, 1, "AAAAAAA"),
            semester(1, 2, "BBBBBBB"),
            semester(2, 1, "BBBBBBB"),
            semester(2, 2, "BBBBBBB"),
            semester(3, 1, "AAAAAAA"),
            semester(3, 2, "AAAAAAA"),
        ],
    )
    .expect("aggregates");

    assert_eq!(averages.first.value(), Decimal::new(45, 1));
    assert_eq!(weighted_strings(&averages)[0], "20.250000");
}

#[test]
fn weighting_truncates_non_terminating_averages() {
    let policy = ScoringPolicy::default();
    let averages = aggregate(
        &policy,
        &[
            semester(1, 1, "AAAAAAA"),
            semester(2, 1, "AAAAAAA"),
            semester(3, 1, "AABBBBB"),
        ],
    )
    .expect("aggregates");

    // 30 / 7 × 6 = 25.7142857…
    assert_eq!(weighted_strings(&averages)[2], "25.714285");
}

#[test]
fn third_year_only_fallback_copies_third_year_average() {
    let policy = ScoringPolicy::default();
    let averages = aggregate(
        &policy,
        &[semester(3, 1, "AAAAAAA"), semester(3, 2, "AAAAAAA")],
    )
    .expect("aggregates");

    assert_eq!(averages.substitution, SubstitutionKind::ThirdYearOnly);
    assert_eq!(averages.first, averages.third);
    assert_eq!(averages.second, averages.third);
    assert_eq!(
        weighted_strings(&averages),
        ["22.500000", "22.500000", "30.000000"]
    );

    let record = general_record(
        1,
        ApplyType::Common,
        vec![semester(3, 1, "AAAAAAA"), semester(3, 2, "AAAAAAA")],
    );
    let components = GradeScoreCalculator::new(&policy)
        .calculate(&record)
        .expect("grade computes");
    assert_eq!(components.conversion_score().to_string(), "75.000");
}

#[test]
fn empty_first_year_interpolates_from_second_and_third() {
    let semesters = vec![
        semester(2, 1, "BBBBBBB"),
        semester(2, 2, "BBBBBBB"),
        semester(3, 1, "AAAAAAA"),
        semester(3, 2, "AAAAAAA"),
    ];

    let policy = ScoringPolicy::default();
    let averages = aggregate(&policy, &semesters).expect("aggregates");
    assert_eq!(averages.substitution, SubstitutionKind::EmptyFirstYear);
    assert_eq!(averages.first.value(), Decimal::new(45, 1));
    assert_eq!(
        weighted_strings(&averages),
        ["20.250000", "18.000000", "30.000000"]
    );

    let mut skewed = ScoringPolicy::default();
    skewed.substitution.empty_first_year = InterpolationWeights {
        adjacent_year: Decimal::new(25, 2),
        third_year: Decimal::new(75, 2),
    };
    let averages = aggregate(&skewed, &semesters).expect("aggregates");
    assert_eq!(averages.first.value(), Decimal::new(475, 2));
    assert_eq!(weighted_strings(&averages)[0], "21.375000");
}

#[test]
fn empty_second_year_interpolates_from_first_and_third() {
    let policy = ScoringPolicy::default();
    let averages = aggregate(
        &policy,
        &[
            semester(1, 1, "CCCCCCC"),
            semester(1, 2, "CCCCCCC"),
            semester(3, 1, "AAAAAAA"),
            semester(3, 2, "AAAAAAA"),
        ],
    )
    .expect("aggregates");

    assert_eq!(averages.substitution, SubstitutionKind::EmptySecondYear);
    assert_eq!(averages.second.value(), Decimal::from(4));
    assert_eq!(
        weighted_strings(&averages),
        ["13.500000", "18.000000", "30.000000"]
    );
}

#[test]
fn missing_third_year_is_incomplete() {
    let policy = ScoringPolicy::default();
    let result = aggregate(
        &policy,
        &[
            semester(1, 1, "AAAAAAA"),
            semester(1, 2, "AAAAAAA"),
            semester(2, 1, "AAAAAAA"),
            semester(2, 2, "AAAAAAA"),
            semester(3, 1, "XXXXXXX"),
        ],
    );

    assert_eq!(result, Err(ScoreError::IncompleteRecord));
}

fn partial_first_year() -> Vec<crate::scoring::SemesterGrades> {
    vec![
        semester(1, 1, "AAAAAAA"),
        semester(2, 1, "BBBBBBB"),
        semester(2, 2, "BBBBBBB"),
        semester(3, 1, "AAAAAAA"),
        semester(3, 2, "AAAAAAA"),
    ]
}

#[test]
fn partial_year_counts_as_present_by_default() {
    let policy = ScoringPolicy::default();
    let averages = aggregate(&policy, &partial_first_year()).expect("aggregates");

    assert_eq!(averages.substitution, SubstitutionKind::None);
    assert_eq!(averages.first.value(), Decimal::from(5));
    assert_eq!(weighted_strings(&averages)[0], "22.500000");
}

#[test]
fn partial_year_can_be_treated_as_empty() {
    let policy = ScoringPolicy {
        partial_year: PartialYearPolicy::TreatAsEmpty,
        ..ScoringPolicy::default()
    };
    let averages = aggregate(&policy, &partial_first_year()).expect("aggregates");

    assert_eq!(averages.substitution, SubstitutionKind::EmptyFirstYear);
    assert_eq!(averages.first.value(), Decimal::new(45, 1));
    assert_eq!(weighted_strings(&averages)[0], "20.250000");
}

#[test]
fn partial_lower_years_fall_back_to_third_year_when_treated_as_empty() {
    let policy = ScoringPolicy {
        partial_year: PartialYearPolicy::TreatAsEmpty,
        ..ScoringPolicy::default()
    };
    let semesters = [
        semester(1, 1, "EEEEEEE"),
        semester(2, 2, "DDDDDDD"),
        semester(3, 1, "AAAAAAA"),
        semester(3, 2, "AAAAAAA"),
    ];

    let averages = aggregate(&policy, &semesters).expect("aggregates");
    // the lone first- and second-year terms are discarded
    assert_eq!(averages.substitution, SubstitutionKind::ThirdYearOnly);
    assert_eq!(averages.first, averages.third);
    assert_eq!(averages.second, averages.third);
    assert_eq!(
        weighted_strings(&averages),
        ["22.500000", "22.500000", "30.000000"]
    );

    let present = aggregate(&ScoringPolicy::default(), &semesters).expect("aggregates");
    assert_eq!(present.substitution, SubstitutionKind::None);
    assert_eq!(present.first.value(), Decimal::from(1));
    assert_eq!(present.second.value(), Decimal::from(2));
}

#[test]
fn partial_third_year_is_never_substituted() {
    let policy = ScoringPolicy {
        partial_year: PartialYearPolicy::TreatAsEmpty,
        ..ScoringPolicy::default()
    };
    let averages = aggregate(
        &policy,
        &[
            semester(1, 1, "BBBBBBB"),
            semester(1, 2, "BBBBBBB"),
            semester(2, 1, "BBBBBBB"),
            semester(2, 2, "BBBBBBB"),
            semester(3, 1, "AAAAAAA"),
        ],
    )
    .expect("in-progress third year still scores");

    assert_eq!(averages.substitution, SubstitutionKind::None);
    assert_eq!(weighted_strings(&averages)[2], "30.000000");
}

#[test]
fn special_track_scales_each_component_before_rounding() {
    let policy = ScoringPolicy::default();
    let semesters = vec![
        semester(1, 1, "AAAAAAA"),
        semester(2, 1, "AAAAAAA"),
        semester(3, 1, "AABBBBB"),
    ];
    let averages = aggregate(&policy, &semesters).expect("aggregates");
    let weighted = weighted_year_scores(&averages);

    let calculator = GradeScoreCalculator::new(&policy);
    let common = calculator
        .calculate(&general_record(1, ApplyType::Common, semesters.clone()))
        .expect("common computes");
    let meister = calculator
        .calculate(&general_record(2, ApplyType::Meister, semesters))
        .expect("meister computes");

    let multiplier = Decimal::new(6, 1);
    assert_eq!(
        meister.third_year_score(),
        Some(half_up(weighted[2] * multiplier, REPORTED_SCALE))
    );
    assert_eq!(
        meister.first_year_score(),
        Some(half_up(weighted[0] * multiplier, REPORTED_SCALE))
    );
    assert_eq!(common.third_year_score().map(|v| v.to_string()).as_deref(), Some("25.714"));
    assert_eq!(meister.third_year_score().map(|v| v.to_string()).as_deref(), Some("15.429"));
    assert_eq!(
        meister.conversion_score(),
        meister.first_year_score().unwrap_or_default()
            + meister.second_year_score().unwrap_or_default()
            + meister.third_year_score().unwrap_or_default()
    );
}

#[test]
fn ged_path_skips_year_scores() {
    let policy = ScoringPolicy::default();
    let calculator = GradeScoreCalculator::new(&policy);

    let common = calculator
        .calculate(&ged_record(7, Decimal::from(80), ApplyType::Common))
        .expect("ged computes");
    assert_eq!(common.conversion_score().to_string(), "90.000");
    assert!(common.first_year_score().is_none());
    assert!(common.second_year_score().is_none());
    assert!(common.third_year_score().is_none());
    assert!(common.substitution().is_none());

    let social = calculator
        .calculate(&ged_record(8, Decimal::from(80), ApplyType::Social))
        .expect("ged computes");
    assert_eq!(social.conversion_score().to_string(), "54.000");
}

#[test]
fn ged_ratio_is_truncated_before_scaling() {
    let policy = ScoringPolicy::default();
    let calculator = GradeScoreCalculator::new(&policy);

    let truncated = calculator
        .calculate(&ged_record(9, Decimal::new(6667, 2), ApplyType::Common))
        .expect("ged computes");
    // 16.67 / 50 = 0.3334 → 0.333 × 150
    assert_eq!(truncated.conversion_score().to_string(), "49.950");

    let below_pass = calculator
        .calculate(&ged_record(10, Decimal::from(40), ApplyType::Common))
        .expect("ged computes");
    assert_eq!(below_pass.conversion_score().to_string(), "-30.000");
}

#[test]
fn matrix_refuses_ged_records() {
    let record = ged_record(11, Decimal::from(70), ApplyType::Common);
    assert_eq!(record.grade_type, GradeType::Ged);
    assert!(matches!(
        GradeMatrix::from_record(&record),
        Err(ScoreError::InvalidRecord(
            crate::scoring::InvalidRecordReason::GedHasNoMatrix
        ))
    ));
}
