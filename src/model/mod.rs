pub mod attendance;
pub mod course;
pub mod scan_event;
pub mod student;
