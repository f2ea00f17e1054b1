use crate::api::attendance::{CreateAttendanceRecord, UpdateAttendanceRecord};
use crate::api::course::{CourseResponse, CreateCourse};
use crate::api::dashboard::{ClassBreakdown, DailyBreakdown};
use crate::api::scanner::ScanRequest;
use crate::api::student::{CreateStudent, UpdateStudent};
use crate::model::attendance::{AttendanceRecord, AttendanceStatus, AttendanceSummary};
use crate::model::course::Course;
use crate::model::scan_event::{ScanEvent, ScanStatus};
use crate::model::student::Student;
use utoipa::OpenApi;

#[derive(OpenApi)]
#[openapi(
    info(
        title = "RFID Attendance Demo API",
        version = "1.0.0",
        description = r#"
## RFID Attendance System (demo)

Backend for an RFID-based student attendance dashboard. All state lives in
process memory and is lost on restart; set `SEED_DEMO_DATA=false` to start
empty.

### 🔹 Key Features
- **Student Management**
  - Register, update, list, and remove students and their RFID tags
- **Scan Processing**
  - Clock-in / clock-out toggling per student-day, with late detection
    after the 09:15 cutoff
- **Attendance Ledger**
  - Filterable log with CSV export
- **Dashboard**
  - Live summary, weekly series, and per-class breakdown

### 📦 Response Format
- JSON-based RESTful responses
- CSV for the attendance export

---
Built with **Rust**, **Actix Web**, and **Utoipa**.
"#,
    ),
    paths(
        crate::api::student::create_student,
        crate::api::student::list_students,
        crate::api::student::get_student,
        crate::api::student::update_student,
        crate::api::student::delete_student,

        crate::api::attendance::list_records,
        crate::api::attendance::create_record,
        crate::api::attendance::update_record,
        crate::api::attendance::delete_record,
        crate::api::attendance::export_records,

        crate::api::course::create_course,
        crate::api::course::list_courses,
        crate::api::course::get_course,
        crate::api::course::update_course,
        crate::api::course::delete_course,

        crate::api::scanner::scan,
        crate::api::scanner::list_events,

        crate::api::dashboard::summary,
        crate::api::dashboard::weekly,
        crate::api::dashboard::by_class
    ),
    components(
        schemas(
            Student,
            CreateStudent,
            UpdateStudent,
            AttendanceRecord,
            AttendanceStatus,
            AttendanceSummary,
            CreateAttendanceRecord,
            UpdateAttendanceRecord,
            Course,
            CreateCourse,
            CourseResponse,
            ScanRequest,
            ScanEvent,
            ScanStatus,
            DailyBreakdown,
            ClassBreakdown
        )
    ),
    tags(
        (name = "Students", description = "Student roster management APIs"),
        (name = "Attendance", description = "Attendance ledger APIs"),
        (name = "Courses", description = "Course management APIs"),
        (name = "Scanner", description = "RFID scan processing APIs"),
        (name = "Dashboard", description = "Aggregated attendance views"),
    )
)]
pub struct ApiDoc;
