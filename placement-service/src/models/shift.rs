//! Shift model - a scheduled clinical placement slot.

use chrono::{DateTime, NaiveDate, NaiveTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Shift entity. Held at one hospital, supervised by one preceptor,
/// attended by zero or more students.
///
/// No two shifts for the same preceptor or the same student may overlap in
/// time on the same date; `services::guard::ensure_shift_schedulable`
/// enforces that on create/update.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Shift {
    pub shift_id: Uuid,
    pub shift_date: NaiveDate,
    pub start_time: NaiveTime,
    pub end_time: NaiveTime,
    pub location: String,
    pub hospital_id: Uuid,
    pub preceptor_id: Uuid,
    pub student_ids: Vec<Uuid>,
    pub created_utc: DateTime<Utc>,
}

impl Shift {
    /// Create a new shift with no students yet.
    pub fn new(
        shift_date: NaiveDate,
        start_time: NaiveTime,
        end_time: NaiveTime,
        location: String,
        hospital_id: Uuid,
        preceptor_id: Uuid,
    ) -> Self {
        Self {
            shift_id: Uuid::new_v4(),
            shift_date,
            start_time,
            end_time,
            location,
            hospital_id,
            preceptor_id,
            student_ids: Vec::new(),
            created_utc: Utc::now(),
        }
    }

    /// Whether a student is named on this shift.
    pub fn includes_student(&self, student_id: Uuid) -> bool {
        self.student_ids.contains(&student_id)
    }

    /// Whether this shift's time window overlaps another's on the same date.
    ///
    /// Touching endpoints (one ends exactly when the other starts) do not
    /// count as overlap.
    pub fn overlaps(&self, other: &Shift) -> bool {
        self.shift_date == other.shift_date
            && self.start_time < other.end_time
            && other.start_time < self.end_time
    }
}

/// Time window of an existing shift, as fetched for overlap checks.
#[derive(Debug, Clone, sqlx::FromRow)]
pub struct ShiftWindow {
    pub shift_id: Uuid,
    pub start_time: NaiveTime,
    pub end_time: NaiveTime,
}

impl ShiftWindow {
    /// Whether a candidate window collides with this one.
    pub fn collides(&self, start: NaiveTime, end: NaiveTime) -> bool {
        self.start_time < end && start < self.end_time
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn t(h: u32, m: u32) -> NaiveTime {
        NaiveTime::from_hms_opt(h, m, 0).unwrap()
    }

    fn shift_on(date: NaiveDate, start: NaiveTime, end: NaiveTime) -> Shift {
        Shift::new(
            date,
            start,
            end,
            "Ward 3".to_string(),
            Uuid::new_v4(),
            Uuid::new_v4(),
        )
    }

    #[test]
    fn overlapping_windows_same_date() {
        let date = NaiveDate::from_ymd_opt(2025, 3, 10).unwrap();
        let a = shift_on(date, t(8, 0), t(12, 0));
        let b = shift_on(date, t(11, 0), t(15, 0));
        assert!(a.overlaps(&b));
        assert!(b.overlaps(&a));
    }

    #[test]
    fn touching_windows_do_not_overlap() {
        let date = NaiveDate::from_ymd_opt(2025, 3, 10).unwrap();
        let a = shift_on(date, t(8, 0), t(12, 0));
        let b = shift_on(date, t(12, 0), t(16, 0));
        assert!(!a.overlaps(&b));
    }

    #[test]
    fn different_dates_never_overlap() {
        let a = shift_on(NaiveDate::from_ymd_opt(2025, 3, 10).unwrap(), t(8, 0), t(12, 0));
        let b = shift_on(NaiveDate::from_ymd_opt(2025, 3, 11).unwrap(), t(8, 0), t(12, 0));
        assert!(!a.overlaps(&b));
    }

    #[test]
    fn window_collision_matches_shift_overlap() {
        let w = ShiftWindow {
            shift_id: Uuid::new_v4(),
            start_time: t(9, 0),
            end_time: t(13, 0),
        };
        assert!(w.collides(t(12, 0), t(14, 0)));
        assert!(!w.collides(t(13, 0), t(14, 0)));
    }
}
