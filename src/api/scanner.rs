use actix_web::{HttpResponse, Responder, web};
use chrono::Local;
use serde::Deserialize;
use serde_json::json;
use tracing::{info, instrument, warn};
use utoipa::ToSchema;

use crate::model::scan_event::ScanEvent;
use crate::scan::{ScanAction, process_scan};
use crate::store::{SharedState, read_state, write_state};

#[derive(Deserialize, ToSchema)]
pub struct ScanRequest {
    #[schema(example = "A1B2C3D4")]
    pub tag: String,
}

/// Scan Tag
///
/// Runs one scan through the attendance processor. An unknown tag is a
/// normal outcome, not an HTTP error: the response still carries the logged
/// event and the (unchanged) summary.
#[utoipa::path(
    post,
    path = "/api/v1/scanner/scan",
    request_body = ScanRequest,
    responses(
        (status = 200, description = "Scan processed", body = Object, example = json!({
            "action": "clock-in",
            "late": false,
            "recordId": "b9c7…",
            "event": {
                "id": "a3f1…",
                "tag": "A1B2C3D4",
                "timestamp": "2023-04-02 09:02:18",
                "status": "success",
                "message": "John Doe clocked in for CS101"
            },
            "summary": {
                "totalStudents": 5, "present": 1, "late": 0,
                "absent": 4, "excused": 0, "attendanceRate": 20
            }
        }))
    ),
    tag = "Scanner"
)]
#[instrument(name = "scan", skip(state, payload), fields(tag = %payload.tag))]
pub async fn scan(
    state: web::Data<SharedState>,
    payload: web::Json<ScanRequest>,
) -> actix_web::Result<impl Responder> {
    let now = Local::now().naive_local();

    let mut state = write_state(&state)?;
    let outcome = process_scan(&mut state, &payload.tag, now);

    let (action, late, record_id) = match &outcome.action {
        ScanAction::ClockedIn { record_id, late } => {
            info!(record_id = %record_id, late, "Clock-in");
            ("clock-in", Some(*late), Some(record_id.clone()))
        }
        ScanAction::ClockedOut { record_id } => {
            info!(record_id = %record_id, "Clock-out");
            ("clock-out", None, Some(record_id.clone()))
        }
        ScanAction::UnknownTag => {
            warn!("Unknown tag scanned");
            ("unknown-tag", None, None)
        }
    };

    Ok(HttpResponse::Ok().json(json!({
        "action": action,
        "late": late,
        "recordId": record_id,
        "event": outcome.event,
        "summary": state.summary,
    })))
}

/// Recent Scan Events
#[utoipa::path(
    get,
    path = "/api/v1/scanner/events",
    responses(
        (status = 200, description = "The capped scan log, newest first", body = [ScanEvent])
    ),
    tag = "Scanner"
)]
pub async fn list_events(state: web::Data<SharedState>) -> actix_web::Result<impl Responder> {
    let state = read_state(&state)?;
    Ok(HttpResponse::Ok().json(&state.scan_events))
}
