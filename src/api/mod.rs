pub mod attendance;
pub mod course;
pub mod dashboard;
pub mod scanner;
pub mod student;
