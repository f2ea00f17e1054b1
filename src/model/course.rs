use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

/// A course is independent of the attendance ledger. Enrollment counts come
/// from matching `Course.name` against `Student.class` by name; there is no
/// foreign key between the two.
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
#[schema(
    example = json!({
        "id": "1",
        "name": "Introduction to Computer Science",
        "instructor": "Dr. Robert Brown",
        "schedule": "Mon, Wed 9:00-11:30",
        "room": "Building A, Room 101"
    })
)]
pub struct Course {
    #[schema(example = "1")]
    pub id: String,

    #[schema(example = "Introduction to Computer Science")]
    pub name: String,

    #[schema(example = "Dr. Robert Brown")]
    pub instructor: String,

    #[schema(example = "Mon, Wed 9:00-11:30")]
    pub schedule: String,

    #[schema(example = "Building A, Room 101")]
    pub room: String,
}
