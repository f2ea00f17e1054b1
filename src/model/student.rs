use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
#[schema(
    example = json!({
        "id": "1",
        "name": "John Doe",
        "tag": "A1B2C3D4",
        "studentId": "S1001",
        "class": "CS101",
        "imageUrl": "https://randomuser.me/api/portraits/men/1.jpg",
        "email": "john.doe@example.com",
        "phone": "+1-555-123-4567",
        "registeredOn": "2023-01-15"
    })
)]
#[serde(rename_all = "camelCase")]
pub struct Student {
    #[schema(example = "1")]
    pub id: String,

    #[schema(example = "John Doe")]
    pub name: String,

    /// RFID tag identifier presented at scan time. Unique per student.
    #[schema(example = "A1B2C3D4")]
    pub tag: String,

    /// Human-facing student number. Unique per student.
    #[schema(example = "S1001")]
    pub student_id: String,

    #[schema(example = "CS101")]
    #[serde(rename = "class")]
    pub class_name: String,

    #[schema(example = "https://randomuser.me/api/portraits/men/1.jpg")]
    pub image_url: String,

    #[schema(example = "john.doe@example.com")]
    pub email: String,

    #[schema(example = "+1-555-123-4567")]
    pub phone: String,

    #[schema(example = "2023-01-15", value_type = String, format = "date")]
    pub registered_on: NaiveDate,
}
