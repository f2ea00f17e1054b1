//! Demo seed data. Ids are fixed strings so the seeded demo is reproducible;
//! entities created at runtime get uuids instead.

use anyhow::Result;
use chrono::{NaiveDate, NaiveDateTime, NaiveTime};

use crate::model::attendance::{AttendanceRecord, AttendanceStatus};
use crate::model::course::Course;
use crate::model::scan_event::{ScanEvent, ScanStatus};
use crate::model::student::Student;
use crate::store::AppState;

fn date(s: &str) -> Result<NaiveDate> {
    Ok(NaiveDate::parse_from_str(s, "%Y-%m-%d")?)
}

fn time(s: &str) -> Result<NaiveTime> {
    Ok(NaiveTime::parse_from_str(s, "%H:%M:%S")?)
}

fn datetime(s: &str) -> Result<NaiveDateTime> {
    Ok(NaiveDateTime::parse_from_str(s, "%Y-%m-%d %H:%M:%S")?)
}

#[allow(clippy::too_many_arguments)]
fn student(
    id: &str,
    name: &str,
    tag: &str,
    student_id: &str,
    class: &str,
    portrait: &str,
    email: &str,
    phone: &str,
    registered: &str,
) -> Result<Student> {
    Ok(Student {
        id: id.into(),
        name: name.into(),
        tag: tag.into(),
        student_id: student_id.into(),
        class_name: class.into(),
        image_url: format!("https://randomuser.me/api/portraits/{portrait}.jpg"),
        email: email.into(),
        phone: phone.into(),
        registered_on: date(registered)?,
    })
}

fn record(
    id: &str,
    student_id: &str,
    name: &str,
    class: &str,
    day: &str,
    time_in: Option<&str>,
    time_out: Option<&str>,
    status: AttendanceStatus,
) -> Result<AttendanceRecord> {
    Ok(AttendanceRecord {
        id: id.into(),
        student_id: student_id.into(),
        student_name: name.into(),
        class_name: class.into(),
        date: date(day)?,
        time_in: time_in.map(time).transpose()?,
        time_out: time_out.map(time).transpose()?,
        status,
    })
}

fn event(id: &str, tag: &str, ts: &str, status: ScanStatus, message: &str) -> Result<ScanEvent> {
    Ok(ScanEvent {
        id: id.into(),
        tag: tag.into(),
        timestamp: datetime(ts)?,
        status,
        message: message.into(),
    })
}

/// A store pre-loaded with the demo roster, a bit of ledger history, three
/// courses and a handful of scan events.
pub fn seeded_state(today: NaiveDate) -> Result<AppState> {
    use AttendanceStatus::{Absent, Late, Present};

    let mut state = AppState::new();

    state.students = vec![
        student(
            "1", "John Doe", "A1B2C3D4", "S1001", "CS101", "men/1",
            "john.doe@example.com", "+1-555-123-4567", "2023-01-15",
        )?,
        student(
            "2", "Jane Smith", "E5F6G7H8", "S1002", "CS101", "women/2",
            "jane.smith@example.com", "+1-555-234-5678", "2023-01-16",
        )?,
        student(
            "3", "Michael Johnson", "I9J0K1L2", "S1003", "CS102", "men/3",
            "michael.johnson@example.com", "+1-555-345-6789", "2023-01-20",
        )?,
        student(
            "4", "Emily Davis", "M3N4O5P6", "S1004", "CS102", "women/4",
            "emily.davis@example.com", "+1-555-456-7890", "2023-01-22",
        )?,
        student(
            "5", "David Wilson", "Q7R8S9T0", "S1005", "CS101", "men/5",
            "david.wilson@example.com", "+1-555-567-8901", "2023-01-25",
        )?,
    ];

    state.attendance_records = vec![
        record("1", "S1001", "John Doe", "CS101", "2023-04-01", Some("09:05:32"), Some("11:30:15"), Present)?,
        record("2", "S1002", "Jane Smith", "CS101", "2023-04-01", Some("09:10:45"), Some("11:32:21"), Present)?,
        record("3", "S1003", "Michael Johnson", "CS102", "2023-04-01", Some("14:03:12"), Some("16:01:45"), Present)?,
        record("4", "S1004", "Emily Davis", "CS102", "2023-04-01", Some("14:15:38"), Some("16:02:30"), Late)?,
        record("5", "S1005", "David Wilson", "CS101", "2023-04-01", None, None, Absent)?,
        record("6", "S1001", "John Doe", "CS101", "2023-04-02", Some("09:02:18"), Some("11:31:05"), Present)?,
        record("7", "S1002", "Jane Smith", "CS101", "2023-04-02", Some("09:25:33"), Some("11:30:42"), Late)?,
    ];

    state.courses = vec![
        Course {
            id: "1".into(),
            name: "Introduction to Computer Science".into(),
            instructor: "Dr. Robert Brown".into(),
            schedule: "Mon, Wed 9:00-11:30".into(),
            room: "Building A, Room 101".into(),
        },
        Course {
            id: "2".into(),
            name: "Data Structures and Algorithms".into(),
            instructor: "Dr. Sarah Miller".into(),
            schedule: "Tue, Thu 14:00-16:30".into(),
            room: "Building B, Room 205".into(),
        },
        Course {
            id: "3".into(),
            name: "Web Development".into(),
            instructor: "Prof. James Wilson".into(),
            schedule: "Fri 13:00-17:00".into(),
            room: "Tech Lab, Room 305".into(),
        },
    ];

    state.scan_events = vec![
        event("1", "A1B2C3D4", "2023-04-02 09:02:18", ScanStatus::Success, "John Doe clocked in for CS101")?,
        event("2", "E5F6G7H8", "2023-04-02 09:25:33", ScanStatus::Success, "Jane Smith clocked in for CS101 (marked late)")?,
        event("3", "UNKNOWN", "2023-04-02 10:15:22", ScanStatus::Error, "Unknown tag detected")?,
        event("4", "A1B2C3D4", "2023-04-02 11:31:05", ScanStatus::Success, "John Doe clocked out from CS101")?,
        event("5", "E5F6G7H8", "2023-04-02 11:30:42", ScanStatus::Success, "Jane Smith clocked out from CS101")?,
    ];

    state.recompute_summary(today);
    Ok(state)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn seed_parses_and_counts_line_up() {
        let today = date("2023-04-02").unwrap();
        let state = seeded_state(today).unwrap();

        assert_eq!(state.students.len(), 5);
        assert_eq!(state.attendance_records.len(), 7);
        assert_eq!(state.courses.len(), 3);
        assert_eq!(state.scan_events.len(), 5);

        // 2023-04-02 has one present and one late record.
        assert_eq!(state.summary.present, 1);
        assert_eq!(state.summary.late, 1);
        assert_eq!(state.summary.absent, 3);
        assert_eq!(state.summary.attendance_rate, 40);
    }
}
