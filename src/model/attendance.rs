use chrono::{NaiveDate, NaiveTime};
use serde::{Deserialize, Serialize};
use strum_macros::{Display, EnumString};
use utoipa::ToSchema;

#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Display, EnumString, ToSchema,
)]
#[serde(rename_all = "lowercase")]
#[strum(serialize_all = "lowercase")]
pub enum AttendanceStatus {
    Present,
    Late,
    Absent,
    Excused,
}

/// One attendance ledger row. `student_name` and `class` are copied from the
/// student at creation time and never re-synced with later edits.
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
#[schema(
    example = json!({
        "id": "1",
        "studentId": "S1001",
        "studentName": "John Doe",
        "class": "CS101",
        "date": "2023-04-01",
        "timeIn": "09:05:32",
        "timeOut": "11:30:15",
        "status": "present"
    })
)]
#[serde(rename_all = "camelCase")]
pub struct AttendanceRecord {
    #[schema(example = "1")]
    pub id: String,

    #[schema(example = "S1001")]
    pub student_id: String,

    #[schema(example = "John Doe")]
    pub student_name: String,

    #[schema(example = "CS101")]
    #[serde(rename = "class")]
    pub class_name: String,

    #[schema(example = "2023-04-01", value_type = String, format = "date")]
    pub date: NaiveDate,

    #[schema(example = "09:05:32", value_type = Option<String>)]
    pub time_in: Option<NaiveTime>,

    /// None means the session is still open (clocked in, not yet out).
    #[schema(example = "11:30:15", value_type = Option<String>)]
    pub time_out: Option<NaiveTime>,

    #[schema(example = "present")]
    pub status: AttendanceStatus,
}

impl AttendanceRecord {
    /// An open session: clocked in, not yet clocked out.
    pub fn is_open(&self) -> bool {
        self.time_out.is_none()
    }
}

/// Derived aggregate over today's ledger. Always recomputed from scratch,
/// never patched incrementally.
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
#[schema(
    example = json!({
        "totalStudents": 5,
        "present": 3,
        "late": 1,
        "absent": 1,
        "excused": 0,
        "attendanceRate": 80
    })
)]
#[serde(rename_all = "camelCase")]
pub struct AttendanceSummary {
    #[schema(example = 5)]
    pub total_students: usize,
    #[schema(example = 3)]
    pub present: usize,
    #[schema(example = 1)]
    pub late: usize,
    /// total_students − present − late. Signed on purpose: duplicate or
    /// excused records can push present+late past the roster size.
    #[schema(example = 1)]
    pub absent: i64,
    #[schema(example = 0)]
    pub excused: usize,
    /// Rounded percentage of present+late over the roster; 0 with no students.
    #[schema(example = 80)]
    pub attendance_rate: u32,
}
