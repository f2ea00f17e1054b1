use std::collections::BTreeMap;

use actix_web::{HttpResponse, Responder, web};
use chrono::{Duration, Local};
use serde::Serialize;
use utoipa::ToSchema;

use crate::model::attendance::{AttendanceStatus, AttendanceSummary};
use crate::store::{SharedState, read_state};

/// One day in the weekly attendance series.
#[derive(Serialize, ToSchema)]
pub struct DailyBreakdown {
    /// Short weekday name ("Mon")
    #[schema(example = "Mon")]
    pub day: String,
    #[schema(example = 3)]
    pub present: usize,
    #[schema(example = 1)]
    pub late: usize,
    /// Roster size minus present and late; signed like the summary's field.
    #[schema(example = 1)]
    pub absent: i64,
}

/// Today's attendance broken down per class.
#[derive(Serialize, ToSchema)]
pub struct ClassBreakdown {
    #[schema(example = "CS101")]
    pub class: String,
    #[schema(example = 3)]
    pub total: usize,
    #[schema(example = 2)]
    pub present: usize,
    #[schema(example = 1)]
    pub late: usize,
    #[schema(example = 0)]
    pub absent: usize,
}

/// Attendance Summary
#[utoipa::path(
    get,
    path = "/api/v1/dashboard/summary",
    responses(
        (status = 200, description = "Current attendance summary", body = AttendanceSummary)
    ),
    tag = "Dashboard"
)]
pub async fn summary(state: web::Data<SharedState>) -> actix_web::Result<impl Responder> {
    let state = read_state(&state)?;
    Ok(HttpResponse::Ok().json(&state.summary))
}

/// Weekly Series
///
/// The last seven days, oldest first, counted the way the dashboard chart
/// always has: absent is derived from the current roster size for every
/// day, including historical ones.
#[utoipa::path(
    get,
    path = "/api/v1/dashboard/weekly",
    responses(
        (status = 200, description = "Last seven days of attendance", body = [DailyBreakdown])
    ),
    tag = "Dashboard"
)]
pub async fn weekly(state: web::Data<SharedState>) -> actix_web::Result<impl Responder> {
    let state = read_state(&state)?;
    let today = Local::now().date_naive();
    let roster = state.students.len();

    let series: Vec<DailyBreakdown> = (0..7)
        .rev()
        .map(|back| {
            let date = today - Duration::days(back);
            let day_records = || state.attendance_records.iter().filter(|r| r.date == date);
            let present = day_records()
                .filter(|r| r.status == AttendanceStatus::Present)
                .count();
            let late = day_records()
                .filter(|r| r.status == AttendanceStatus::Late)
                .count();
            DailyBreakdown {
                day: date.format("%a").to_string(),
                present,
                late,
                absent: roster as i64 - present as i64 - late as i64,
            }
        })
        .collect();

    Ok(HttpResponse::Ok().json(series))
}

/// Per-Class Breakdown
///
/// Today's attendance grouped by class. Each student contributes to their
/// class total; their first record today decides which status bucket they
/// land in. Students with no record today count as absent; an excused
/// record parks the student outside every bucket.
#[utoipa::path(
    get,
    path = "/api/v1/dashboard/by-class",
    responses(
        (status = 200, description = "Today's per-class attendance", body = [ClassBreakdown])
    ),
    tag = "Dashboard"
)]
pub async fn by_class(state: web::Data<SharedState>) -> actix_web::Result<impl Responder> {
    let state = read_state(&state)?;
    let today = Local::now().date_naive();

    let mut classes: BTreeMap<String, ClassBreakdown> = BTreeMap::new();
    for student in &state.students {
        let entry = classes
            .entry(student.class_name.clone())
            .or_insert_with(|| ClassBreakdown {
                class: student.class_name.clone(),
                total: 0,
                present: 0,
                late: 0,
                absent: 0,
            });
        entry.total += 1;

        let todays = state
            .attendance_records
            .iter()
            .find(|r| r.student_id == student.student_id && r.date == today);
        match todays.map(|r| r.status) {
            Some(AttendanceStatus::Present) => entry.present += 1,
            Some(AttendanceStatus::Late) => entry.late += 1,
            Some(AttendanceStatus::Absent) => entry.absent += 1,
            Some(AttendanceStatus::Excused) => {}
            None => entry.absent += 1,
        }
    }

    let breakdown: Vec<ClassBreakdown> = classes.into_values().collect();
    Ok(HttpResponse::Ok().json(breakdown))
}
