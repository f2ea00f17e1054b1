use crate::model::attendance::AttendanceRecord;

pub const EXPORT_HEADER: &str = "Date,Student ID,Student Name,Class,Time In,Time Out,Status";

/// Renders the export view of the ledger. Fields are comma-joined without
/// quoting, matching the export this replaces; an embedded comma in a name
/// or class shifts columns. Missing times render as "N/A".
pub fn render_attendance_csv(records: &[&AttendanceRecord]) -> String {
    let mut lines = Vec::with_capacity(records.len() + 1);
    lines.push(EXPORT_HEADER.to_string());
    for r in records {
        lines.push(
            [
                r.date.format("%Y-%m-%d").to_string(),
                r.student_id.clone(),
                r.student_name.clone(),
                r.class_name.clone(),
                r.time_in
                    .map(|t| t.format("%H:%M:%S").to_string())
                    .unwrap_or_else(|| "N/A".to_string()),
                r.time_out
                    .map(|t| t.format("%H:%M:%S").to_string())
                    .unwrap_or_else(|| "N/A".to_string()),
                r.status.to_string(),
            ]
            .join(","),
        );
    }
    lines.join("\n")
}

/// Download name for the export, stamped with the export date.
pub fn export_filename(date: chrono::NaiveDate) -> String {
    format!("attendance_log_{}.csv", date.format("%Y-%m-%d"))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::attendance::AttendanceStatus;
    use chrono::{NaiveDate, NaiveTime};

    fn record(name: &str, time_in: Option<&str>, status: AttendanceStatus) -> AttendanceRecord {
        AttendanceRecord {
            id: "1".into(),
            student_id: "S1001".into(),
            student_name: name.into(),
            class_name: "CS101".into(),
            date: NaiveDate::from_ymd_opt(2023, 4, 1).unwrap(),
            time_in: time_in.map(|t| NaiveTime::parse_from_str(t, "%H:%M:%S").unwrap()),
            time_out: None,
            status,
        }
    }

    #[test]
    fn renders_header_and_rows() {
        let a = record("John Doe", Some("09:05:32"), AttendanceStatus::Present);
        let b = record("David Wilson", None, AttendanceStatus::Absent);
        let csv = render_attendance_csv(&[&a, &b]);

        let mut lines = csv.lines();
        assert_eq!(lines.next(), Some(EXPORT_HEADER));
        assert_eq!(
            lines.next(),
            Some("2023-04-01,S1001,John Doe,CS101,09:05:32,N/A,present")
        );
        assert_eq!(
            lines.next(),
            Some("2023-04-01,S1001,David Wilson,CS101,N/A,N/A,absent")
        );
        assert_eq!(lines.next(), None);
    }

    #[test]
    fn embedded_commas_are_not_quoted() {
        // Known gap carried over from the export this replaces.
        let a = record("Doe, John", Some("09:05:32"), AttendanceStatus::Present);
        let csv = render_attendance_csv(&[&a]);
        assert!(csv.contains("Doe, John"));
        assert!(!csv.contains('"'));
    }

    #[test]
    fn filename_is_stamped_with_date() {
        let d = NaiveDate::from_ymd_opt(2023, 4, 2).unwrap();
        assert_eq!(export_filename(d), "attendance_log_2023-04-02.csv");
    }
}
