use std::sync::{RwLock, RwLockReadGuard, RwLockWriteGuard};

use actix_web::error::ErrorInternalServerError;
use actix_web::web;
use chrono::NaiveDate;
use tracing::error;

use crate::model::attendance::{AttendanceRecord, AttendanceStatus, AttendanceSummary};
use crate::model::course::Course;
use crate::model::scan_event::ScanEvent;
use crate::model::student::Student;

/// The scan log keeps the most recent entries only, newest first.
pub const EVENT_LOG_CAP: usize = 11;

/// The whole application state. One instance is created at startup, shared
/// behind an `RwLock`, and torn down at process exit. Nothing is persisted.
///
/// Every mutating method runs start to finish under the caller's write-lock
/// hold, so each mutation is a single uninterrupted state replacement.
pub struct AppState {
    pub students: Vec<Student>,
    pub attendance_records: Vec<AttendanceRecord>,
    pub courses: Vec<Course>,
    pub scan_events: Vec<ScanEvent>,
    pub summary: AttendanceSummary,
}

pub type SharedState = RwLock<AppState>;

impl AppState {
    pub fn new() -> Self {
        Self {
            students: Vec::new(),
            attendance_records: Vec::new(),
            courses: Vec::new(),
            scan_events: Vec::new(),
            summary: AttendanceSummary {
                total_students: 0,
                present: 0,
                late: 0,
                absent: 0,
                excused: 0,
                attendance_rate: 0,
            },
        }
    }

    // ---------- students ----------

    pub fn student_by_tag(&self, tag: &str) -> Option<&Student> {
        self.students.iter().find(|s| s.tag == tag)
    }

    pub fn student_by_id(&self, id: &str) -> Option<&Student> {
        self.students.iter().find(|s| s.id == id)
    }

    /// Returns the name of the colliding field if `tag` or `student_id` is
    /// already taken by a student other than `exclude_id`.
    pub fn duplicate_identity(
        &self,
        tag: &str,
        student_id: &str,
        exclude_id: Option<&str>,
    ) -> Option<&'static str> {
        for s in &self.students {
            if exclude_id == Some(s.id.as_str()) {
                continue;
            }
            if s.tag == tag {
                return Some("tag");
            }
            if s.student_id == student_id {
                return Some("studentId");
            }
        }
        None
    }

    pub fn insert_student(&mut self, student: Student, today: NaiveDate) {
        self.students.push(student);
        self.recompute_summary(today);
    }

    pub fn update_student(&mut self, updated: Student, today: NaiveDate) -> bool {
        match self.students.iter_mut().find(|s| s.id == updated.id) {
            Some(slot) => {
                *slot = updated;
                self.recompute_summary(today);
                true
            }
            None => false,
        }
    }

    /// Removes the student only. Their historical attendance records are
    /// left in place as orphans; the denormalized name/class snapshots on
    /// those rows stay valid.
    pub fn delete_student(&mut self, id: &str, today: NaiveDate) -> Option<Student> {
        let pos = self.students.iter().position(|s| s.id == id)?;
        let removed = self.students.remove(pos);
        self.recompute_summary(today);
        Some(removed)
    }

    // ---------- attendance records ----------

    pub fn insert_record(&mut self, record: AttendanceRecord, today: NaiveDate) {
        self.attendance_records.push(record);
        self.recompute_summary(today);
    }

    pub fn update_record(&mut self, updated: AttendanceRecord, today: NaiveDate) -> bool {
        match self.attendance_records.iter_mut().find(|r| r.id == updated.id) {
            Some(slot) => {
                *slot = updated;
                self.recompute_summary(today);
                true
            }
            None => false,
        }
    }

    pub fn delete_record(&mut self, id: &str, today: NaiveDate) -> bool {
        let before = self.attendance_records.len();
        self.attendance_records.retain(|r| r.id != id);
        let deleted = self.attendance_records.len() < before;
        if deleted {
            self.recompute_summary(today);
        }
        deleted
    }

    /// The single open session for a student on a date, if any. The scan
    /// logic relies on at most one existing; that is assumed, not enforced.
    pub fn open_record_mut(
        &mut self,
        student_id: &str,
        date: NaiveDate,
    ) -> Option<&mut AttendanceRecord> {
        self.attendance_records
            .iter_mut()
            .find(|r| r.student_id == student_id && r.date == date && r.is_open())
    }

    // ---------- courses ----------

    pub fn insert_course(&mut self, course: Course) {
        self.courses.push(course);
    }

    pub fn update_course(&mut self, updated: Course) -> bool {
        match self.courses.iter_mut().find(|c| c.id == updated.id) {
            Some(slot) => {
                *slot = updated;
                true
            }
            None => false,
        }
    }

    pub fn delete_course(&mut self, id: &str) -> Option<Course> {
        let pos = self.courses.iter().position(|c| c.id == id)?;
        Some(self.courses.remove(pos))
    }

    /// Students whose class matches the course name. Name matching only,
    /// there is no enrollment table.
    pub fn enrolled_count(&self, course_name: &str) -> usize {
        self.students
            .iter()
            .filter(|s| s.class_name == course_name)
            .count()
    }

    // ---------- scan log ----------

    /// Prepends the event and drops everything past the cap.
    pub fn push_event(&mut self, event: ScanEvent) {
        self.scan_events.insert(0, event);
        self.scan_events.truncate(EVENT_LOG_CAP);
    }

    // ---------- summary ----------

    /// Full recomputation over today's records. `absent` is derived from the
    /// roster size and may go negative when duplicate or excused rows push
    /// present+late past it; that is surfaced, not clamped.
    pub fn recompute_summary(&mut self, today: NaiveDate) {
        let todays = || self.attendance_records.iter().filter(|r| r.date == today);

        let present = todays().filter(|r| r.status == AttendanceStatus::Present).count();
        let late = todays().filter(|r| r.status == AttendanceStatus::Late).count();
        let excused = todays().filter(|r| r.status == AttendanceStatus::Excused).count();

        let total_students = self.students.len();
        let absent = total_students as i64 - present as i64 - late as i64;

        let attendance_rate = if total_students > 0 {
            (100.0 * (present + late) as f64 / total_students as f64).round() as u32
        } else {
            0
        };

        self.summary = AttendanceSummary {
            total_students,
            present,
            late,
            absent,
            excused,
            attendance_rate,
        };
    }
}

impl Default for AppState {
    fn default() -> Self {
        Self::new()
    }
}

// Lock poisoning only happens after a panic inside a handler; surface it as
// a 500 rather than propagating the panic.

pub fn read_state(
    data: &web::Data<SharedState>,
) -> actix_web::Result<RwLockReadGuard<'_, AppState>> {
    data.read().map_err(|_| {
        error!("state lock poisoned");
        ErrorInternalServerError("Internal Server Error")
    })
}

pub fn write_state(
    data: &web::Data<SharedState>,
) -> actix_web::Result<RwLockWriteGuard<'_, AppState>> {
    data.write().map_err(|_| {
        error!("state lock poisoned");
        ErrorInternalServerError("Internal Server Error")
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{NaiveDate, NaiveTime};

    fn student(id: &str, tag: &str, student_id: &str, class: &str) -> Student {
        Student {
            id: id.into(),
            name: format!("Student {id}"),
            tag: tag.into(),
            student_id: student_id.into(),
            class_name: class.into(),
            image_url: String::new(),
            email: String::new(),
            phone: String::new(),
            registered_on: NaiveDate::from_ymd_opt(2023, 1, 15).unwrap(),
        }
    }

    fn record(id: &str, student_id: &str, date: NaiveDate, status: AttendanceStatus) -> AttendanceRecord {
        AttendanceRecord {
            id: id.into(),
            student_id: student_id.into(),
            student_name: String::new(),
            class_name: "CS101".into(),
            date,
            time_in: NaiveTime::from_hms_opt(9, 0, 0),
            time_out: None,
            status,
        }
    }

    fn today() -> NaiveDate {
        NaiveDate::from_ymd_opt(2023, 4, 2).unwrap()
    }

    #[test]
    fn summary_counts_only_todays_records() {
        let mut state = AppState::new();
        for i in 0..5 {
            state.insert_student(
                student(&i.to_string(), &format!("TAG{i}"), &format!("S{i}"), "CS101"),
                today(),
            );
        }
        let yesterday = today().pred_opt().unwrap();
        state.insert_record(record("a", "S0", yesterday, AttendanceStatus::Present), today());
        state.insert_record(record("b", "S1", today(), AttendanceStatus::Present), today());
        state.insert_record(record("c", "S2", today(), AttendanceStatus::Late), today());

        assert_eq!(state.summary.total_students, 5);
        assert_eq!(state.summary.present, 1);
        assert_eq!(state.summary.late, 1);
        assert_eq!(state.summary.absent, 3);
        assert_eq!(state.summary.attendance_rate, 40);
    }

    #[test]
    fn summary_rate_is_zero_with_no_students() {
        let mut state = AppState::new();
        state.insert_record(record("a", "S0", today(), AttendanceStatus::Present), today());
        assert_eq!(state.summary.attendance_rate, 0);
        assert_eq!(state.summary.total_students, 0);
    }

    #[test]
    fn summary_absent_goes_negative_when_records_outnumber_roster() {
        // Duplicate rows for one student; derived absent is allowed below
        // zero so the inconsistency stays visible.
        let mut state = AppState::new();
        state.insert_student(student("1", "TAG1", "S1", "CS101"), today());
        state.insert_record(record("a", "S1", today(), AttendanceStatus::Present), today());
        state.insert_record(record("b", "S1", today(), AttendanceStatus::Present), today());
        assert_eq!(state.summary.absent, -1);
        assert_eq!(state.summary.attendance_rate, 200);
    }

    #[test]
    fn event_log_is_capped_and_newest_first() {
        let mut state = AppState::new();
        for i in 0..15u32 {
            state.push_event(crate::model::scan_event::ScanEvent {
                id: i.to_string(),
                tag: "T".into(),
                timestamp: today().and_hms_opt(9, 0, i).unwrap(),
                status: crate::model::scan_event::ScanStatus::Success,
                message: String::new(),
            });
        }
        assert_eq!(state.scan_events.len(), EVENT_LOG_CAP);
        assert_eq!(state.scan_events[0].id, "14");
        assert_eq!(state.scan_events[EVENT_LOG_CAP - 1].id, "4");
    }

    #[test]
    fn deleting_student_leaves_orphan_records() {
        let mut state = AppState::new();
        state.insert_student(student("1", "TAG1", "S1", "CS101"), today());
        state.insert_record(record("a", "S1", today(), AttendanceStatus::Present), today());

        assert!(state.delete_student("1", today()).is_some());
        assert_eq!(state.attendance_records.len(), 1);
        assert_eq!(state.summary.total_students, 0);
    }

    #[test]
    fn duplicate_identity_reports_colliding_field() {
        let mut state = AppState::new();
        state.insert_student(student("1", "TAG1", "S1", "CS101"), today());
        assert_eq!(state.duplicate_identity("TAG1", "S9", None), Some("tag"));
        assert_eq!(state.duplicate_identity("TAG9", "S1", None), Some("studentId"));
        assert_eq!(state.duplicate_identity("TAG9", "S9", None), None);
        // Updating a student against itself is not a collision.
        assert_eq!(state.duplicate_identity("TAG1", "S1", Some("1")), None);
    }

    #[test]
    fn enrolled_count_matches_by_name_only() {
        let mut state = AppState::new();
        state.insert_student(student("1", "TAG1", "S1", "CS101"), today());
        state.insert_student(student("2", "TAG2", "S2", "CS101"), today());
        state.insert_course(Course {
            id: "c1".into(),
            name: "CS101".into(),
            instructor: String::new(),
            schedule: String::new(),
            room: String::new(),
        });
        assert_eq!(state.enrolled_count("CS101"), 2);
        assert_eq!(state.enrolled_count("Introduction to Computer Science"), 0);
    }
}
