use std::str::FromStr;

use actix_web::{HttpResponse, Responder, web};
use chrono::{Local, NaiveDate, NaiveTime};
use serde::Deserialize;
use serde_json::json;
use tracing::info;
use utoipa::{IntoParams, ToSchema};
use uuid::Uuid;

use crate::model::attendance::{AttendanceRecord, AttendanceStatus};
use crate::store::{AppState, SharedState, read_state, write_state};
use crate::utils::csv::{export_filename, render_attendance_csv};

#[derive(Debug, Deserialize, IntoParams)]
pub struct AttendanceQuery {
    /// Case-insensitive match against student name, student ID or class
    pub search: Option<String>,
    /// Filter by exact calendar date (YYYY-MM-DD)
    #[param(example = "2023-04-01", value_type = Option<String>)]
    pub date: Option<NaiveDate>,
    /// Filter by exact class name
    pub class: Option<String>,
    /// Filter by status (present, late, absent, excused)
    pub status: Option<String>,
}

/// Manual ledger entry. The student's name and class are snapshotted from
/// the roster at creation time.
#[derive(Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct CreateAttendanceRecord {
    #[schema(example = "S1001")]
    pub student_id: String,
    #[schema(example = "2023-04-01", value_type = String, format = "date")]
    pub date: NaiveDate,
    #[schema(example = "09:05:32", value_type = Option<String>)]
    pub time_in: Option<NaiveTime>,
    #[schema(example = "11:30:15", value_type = Option<String>)]
    pub time_out: Option<NaiveTime>,
    #[schema(example = "present")]
    pub status: AttendanceStatus,
}

/// Replaces the editable fields of a record. The id and the denormalized
/// student snapshot are not client-writable.
#[derive(Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct UpdateAttendanceRecord {
    #[schema(example = "2023-04-01", value_type = String, format = "date")]
    pub date: NaiveDate,
    #[schema(example = "09:05:32", value_type = Option<String>)]
    pub time_in: Option<NaiveTime>,
    #[schema(example = "11:30:15", value_type = Option<String>)]
    pub time_out: Option<NaiveTime>,
    #[schema(example = "present")]
    pub status: AttendanceStatus,
}

/// The filtered ledger view shared by the list and export endpoints.
fn filter_records<'a>(state: &'a AppState, query: &AttendanceQuery) -> Vec<&'a AttendanceRecord> {
    let needle = query.search.as_deref().map(str::to_lowercase);
    // An unparseable status filter matches nothing rather than erroring,
    // like the select it replaces.
    let status = query
        .status
        .as_deref()
        .map(|s| AttendanceStatus::from_str(s).ok());

    state
        .attendance_records
        .iter()
        .filter(|r| match &needle {
            Some(q) => {
                r.student_name.to_lowercase().contains(q)
                    || r.student_id.to_lowercase().contains(q)
                    || r.class_name.to_lowercase().contains(q)
            }
            None => true,
        })
        .filter(|r| query.date.map_or(true, |d| r.date == d))
        .filter(|r| query.class.as_deref().map_or(true, |c| r.class_name == c))
        .filter(|r| match &status {
            Some(Some(s)) => r.status == *s,
            Some(None) => false,
            None => true,
        })
        .collect()
}

/// List Attendance Records
#[utoipa::path(
    get,
    path = "/api/v1/attendance",
    params(AttendanceQuery),
    responses(
        (status = 200, description = "Matching attendance records", body = [AttendanceRecord])
    ),
    tag = "Attendance"
)]
pub async fn list_records(
    state: web::Data<SharedState>,
    query: web::Query<AttendanceQuery>,
) -> actix_web::Result<impl Responder> {
    let state = read_state(&state)?;
    let records: Vec<AttendanceRecord> = filter_records(&state, &query)
        .into_iter()
        .cloned()
        .collect();
    Ok(HttpResponse::Ok().json(records))
}

/// Create Attendance Record
#[utoipa::path(
    post,
    path = "/api/v1/attendance",
    request_body = CreateAttendanceRecord,
    responses(
        (status = 200, description = "Record created", body = AttendanceRecord),
        (status = 404, description = "Student not found", body = Object, example = json!({
            "message": "Student not found"
        }))
    ),
    tag = "Attendance"
)]
pub async fn create_record(
    state: web::Data<SharedState>,
    payload: web::Json<CreateAttendanceRecord>,
) -> actix_web::Result<impl Responder> {
    let payload = payload.into_inner();
    let today = Local::now().date_naive();

    let mut state = write_state(&state)?;

    let Some(student) = state
        .students
        .iter()
        .find(|s| s.student_id == payload.student_id)
    else {
        return Ok(HttpResponse::NotFound().json(json!({
            "message": "Student not found"
        })));
    };

    let record = AttendanceRecord {
        id: Uuid::new_v4().to_string(),
        student_id: student.student_id.clone(),
        student_name: student.name.clone(),
        class_name: student.class_name.clone(),
        date: payload.date,
        time_in: payload.time_in,
        time_out: payload.time_out,
        status: payload.status,
    };
    let response = record.clone();
    state.insert_record(record, today);

    Ok(HttpResponse::Ok().json(response))
}

/// Update Attendance Record
#[utoipa::path(
    put,
    path = "/api/v1/attendance/{id}",
    params(("id", Path, description = "Record ID")),
    request_body = UpdateAttendanceRecord,
    responses(
        (status = 200, description = "Record updated", body = AttendanceRecord),
        (status = 404, description = "Record not found")
    ),
    tag = "Attendance"
)]
pub async fn update_record(
    state: web::Data<SharedState>,
    path: web::Path<String>,
    payload: web::Json<UpdateAttendanceRecord>,
) -> actix_web::Result<impl Responder> {
    let id = path.into_inner();
    let payload = payload.into_inner();
    let today = Local::now().date_naive();

    let mut state = write_state(&state)?;

    let Some(existing) = state.attendance_records.iter().find(|r| r.id == id) else {
        return Ok(HttpResponse::NotFound().json(json!({
            "message": "Record not found"
        })));
    };

    let updated = AttendanceRecord {
        id: id.clone(),
        student_id: existing.student_id.clone(),
        student_name: existing.student_name.clone(),
        class_name: existing.class_name.clone(),
        date: payload.date,
        time_in: payload.time_in,
        time_out: payload.time_out,
        status: payload.status,
    };
    let response = updated.clone();
    state.update_record(updated, today);

    Ok(HttpResponse::Ok().json(response))
}

/// Delete Attendance Record
#[utoipa::path(
    delete,
    path = "/api/v1/attendance/{id}",
    params(("id", Path, description = "Record ID")),
    responses(
        (status = 200, description = "Successfully deleted", body = Object, example = json!({
            "message": "Successfully deleted"
        })),
        (status = 404, description = "Record not found")
    ),
    tag = "Attendance"
)]
pub async fn delete_record(
    state: web::Data<SharedState>,
    path: web::Path<String>,
) -> actix_web::Result<impl Responder> {
    let id = path.into_inner();
    let today = Local::now().date_naive();

    let mut state = write_state(&state)?;

    if state.delete_record(&id, today) {
        Ok(HttpResponse::Ok().json(json!({
            "message": "Successfully deleted"
        })))
    } else {
        Ok(HttpResponse::NotFound().json(json!({
            "message": "Record not found"
        })))
    }
}

/// Export Attendance CSV
#[utoipa::path(
    get,
    path = "/api/v1/attendance/export",
    params(AttendanceQuery),
    responses(
        (status = 200, description = "CSV of the filtered ledger", body = String, content_type = "text/csv")
    ),
    tag = "Attendance"
)]
pub async fn export_records(
    state: web::Data<SharedState>,
    query: web::Query<AttendanceQuery>,
) -> actix_web::Result<impl Responder> {
    let today = Local::now().date_naive();
    let state = read_state(&state)?;

    let records = filter_records(&state, &query);
    info!(rows = records.len(), "Attendance export requested");
    let body = render_attendance_csv(&records);

    Ok(HttpResponse::Ok()
        .content_type("text/csv; charset=utf-8")
        .insert_header((
            "Content-Disposition",
            format!("attachment; filename={}", export_filename(today)),
        ))
        .body(body))
}
