use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};
use strum_macros::{Display, EnumString};
use utoipa::ToSchema;

#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Display, EnumString, ToSchema,
)]
#[serde(rename_all = "lowercase")]
#[strum(serialize_all = "lowercase")]
pub enum ScanStatus {
    Success,
    Unknown,
    Error,
}

/// One entry in the append-only scan log. The log keeps only the most recent
/// entries, newest first.
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
#[schema(
    example = json!({
        "id": "1",
        "tag": "A1B2C3D4",
        "timestamp": "2023-04-02 09:02:18",
        "status": "success",
        "message": "John Doe clocked in for CS101"
    })
)]
pub struct ScanEvent {
    #[schema(example = "1")]
    pub id: String,

    #[schema(example = "A1B2C3D4")]
    pub tag: String,

    #[schema(example = "2023-04-02 09:02:18", value_type = String)]
    #[serde(with = "timestamp_format")]
    pub timestamp: NaiveDateTime,

    #[schema(example = "success")]
    pub status: ScanStatus,

    #[schema(example = "John Doe clocked in for CS101")]
    pub message: String,
}

/// Timestamps serialize as "YYYY-MM-DD HH:MM:SS", the format the original
/// event feed displayed.
mod timestamp_format {
    use chrono::NaiveDateTime;
    use serde::{self, Deserialize, Deserializer, Serializer};

    const FORMAT: &str = "%Y-%m-%d %H:%M:%S";

    pub fn serialize<S: Serializer>(ts: &NaiveDateTime, s: S) -> Result<S::Ok, S::Error> {
        s.serialize_str(&ts.format(FORMAT).to_string())
    }

    pub fn deserialize<'de, D: Deserializer<'de>>(d: D) -> Result<NaiveDateTime, D::Error> {
        let raw = String::deserialize(d)?;
        NaiveDateTime::parse_from_str(&raw, FORMAT).map_err(serde::de::Error::custom)
    }
}
