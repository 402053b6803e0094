use super::domain::{AttendanceRecord, GradeType};

/// Score for a perfect attendance record, and the fixed score of GED applicants.
pub const MAX_ATTENDANCE_SCORE: i32 = 15;

/// Three partial-day events count as one full-day absence.
const PARTIAL_EVENTS_PER_ABSENCE: i32 = 3;

/// `15 − (full-day absences + partial events / 3)`, floor division, never clamped.
pub fn attendance_score(grade_type: GradeType, attendance: &AttendanceRecord) -> i32 {
    if grade_type == GradeType::Ged {
        return MAX_ATTENDANCE_SCORE;
    }

    let partial_events = i32::from(attendance.tardies)
        + i32::from(attendance.early_leaves)
        + i32::from(attendance.period_absences);
    let converted_absences =
        i32::from(attendance.full_day_absences) + partial_events / PARTIAL_EVENTS_PER_ABSENCE;

    MAX_ATTENDANCE_SCORE - converted_absences
}
