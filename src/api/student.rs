use actix_web::{HttpResponse, Responder, web};
use chrono::Local;
use serde::Deserialize;
use serde_json::json;
use tracing::info;
use utoipa::{IntoParams, ToSchema};
use uuid::Uuid;

use crate::model::student::Student;
use crate::store::{SharedState, read_state, write_state};

#[derive(Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct CreateStudent {
    #[schema(example = "John Doe")]
    pub name: String,
    #[schema(example = "A1B2C3D4")]
    pub tag: String,
    #[schema(example = "S1001")]
    pub student_id: String,
    #[schema(example = "CS101")]
    #[serde(rename = "class")]
    pub class_name: String,
    #[schema(example = "https://randomuser.me/api/portraits/men/1.jpg")]
    #[serde(default)]
    pub image_url: String,
    #[schema(example = "john.doe@example.com")]
    pub email: String,
    #[schema(example = "+1-555-123-4567")]
    pub phone: String,
}

/// Full-field update; the roster edit dialog always submits the whole
/// student. `id` and `registeredOn` are never client-writable.
#[derive(Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct UpdateStudent {
    #[schema(example = "John Doe")]
    pub name: String,
    #[schema(example = "A1B2C3D4")]
    pub tag: String,
    #[schema(example = "S1001")]
    pub student_id: String,
    #[schema(example = "CS101")]
    #[serde(rename = "class")]
    pub class_name: String,
    #[serde(default)]
    pub image_url: String,
    pub email: String,
    pub phone: String,
}

#[derive(Debug, Deserialize, IntoParams)]
pub struct StudentQuery {
    /// Case-insensitive match against name, student ID or class
    pub search: Option<String>,
    /// Filter by exact class name
    pub class: Option<String>,
}

/// Register Student
#[utoipa::path(
    post,
    path = "/api/v1/students",
    request_body = CreateStudent,
    responses(
        (status = 200, description = "Student registered", body = Student),
        (status = 400, description = "Duplicate tag or student ID", body = Object, example = json!({
            "message": "A student with this tag already exists"
        }))
    ),
    tag = "Students"
)]
pub async fn create_student(
    state: web::Data<SharedState>,
    payload: web::Json<CreateStudent>,
) -> actix_web::Result<impl Responder> {
    let payload = payload.into_inner();
    let today = Local::now().date_naive();

    let mut state = write_state(&state)?;

    if let Some(field) = state.duplicate_identity(&payload.tag, &payload.student_id, None) {
        return Ok(HttpResponse::BadRequest().json(json!({
            "message": format!("A student with this {field} already exists")
        })));
    }

    let student = Student {
        id: Uuid::new_v4().to_string(),
        name: payload.name,
        tag: payload.tag,
        student_id: payload.student_id,
        class_name: payload.class_name,
        image_url: payload.image_url,
        email: payload.email,
        phone: payload.phone,
        registered_on: today,
    };
    info!(student_id = %student.student_id, name = %student.name, "Student registered");

    let response = student.clone();
    state.insert_student(student, today);

    Ok(HttpResponse::Ok().json(response))
}

/// List Students
#[utoipa::path(
    get,
    path = "/api/v1/students",
    params(StudentQuery),
    responses(
        (status = 200, description = "Matching students", body = [Student])
    ),
    tag = "Students"
)]
pub async fn list_students(
    state: web::Data<SharedState>,
    query: web::Query<StudentQuery>,
) -> actix_web::Result<impl Responder> {
    let state = read_state(&state)?;

    let needle = query.search.as_deref().map(str::to_lowercase);
    let students: Vec<Student> = state
        .students
        .iter()
        .filter(|s| match &needle {
            Some(q) => {
                s.name.to_lowercase().contains(q)
                    || s.student_id.to_lowercase().contains(q)
                    || s.class_name.to_lowercase().contains(q)
            }
            None => true,
        })
        .filter(|s| match &query.class {
            Some(class) => s.class_name == *class,
            None => true,
        })
        .cloned()
        .collect();

    Ok(HttpResponse::Ok().json(students))
}

/// Get Student by ID
#[utoipa::path(
    get,
    path = "/api/v1/students/{id}",
    params(("id", Path, description = "Student ID")),
    responses(
        (status = 200, description = "Student found", body = Student),
        (status = 404, description = "Student not found", body = Object, example = json!({
            "message": "Student not found"
        }))
    ),
    tag = "Students"
)]
pub async fn get_student(
    state: web::Data<SharedState>,
    path: web::Path<String>,
) -> actix_web::Result<impl Responder> {
    let id = path.into_inner();
    let state = read_state(&state)?;

    match state.student_by_id(&id) {
        Some(student) => Ok(HttpResponse::Ok().json(student)),
        None => Ok(HttpResponse::NotFound().json(json!({
            "message": "Student not found"
        }))),
    }
}

/// Update Student
#[utoipa::path(
    put,
    path = "/api/v1/students/{id}",
    params(("id", Path, description = "Student ID")),
    request_body = UpdateStudent,
    responses(
        (status = 200, description = "Student updated", body = Student),
        (status = 400, description = "Duplicate tag or student ID"),
        (status = 404, description = "Student not found")
    ),
    tag = "Students"
)]
pub async fn update_student(
    state: web::Data<SharedState>,
    path: web::Path<String>,
    payload: web::Json<UpdateStudent>,
) -> actix_web::Result<impl Responder> {
    let id = path.into_inner();
    let payload = payload.into_inner();
    let today = Local::now().date_naive();

    let mut state = write_state(&state)?;

    let Some(existing) = state.student_by_id(&id) else {
        return Ok(HttpResponse::NotFound().json(json!({
            "message": "Student not found"
        })));
    };
    let registered_on = existing.registered_on;

    if let Some(field) = state.duplicate_identity(&payload.tag, &payload.student_id, Some(&id)) {
        return Ok(HttpResponse::BadRequest().json(json!({
            "message": format!("A student with this {field} already exists")
        })));
    }

    let updated = Student {
        id: id.clone(),
        name: payload.name,
        tag: payload.tag,
        student_id: payload.student_id,
        class_name: payload.class_name,
        image_url: payload.image_url,
        email: payload.email,
        phone: payload.phone,
        registered_on,
    };
    let response = updated.clone();
    state.update_student(updated, today);

    Ok(HttpResponse::Ok().json(response))
}

/// Delete Student
#[utoipa::path(
    delete,
    path = "/api/v1/students/{id}",
    params(("id", Path, description = "Student ID")),
    responses(
        (status = 200, description = "Successfully deleted", body = Object, example = json!({
            "message": "Successfully deleted"
        })),
        (status = 404, description = "Student not found")
    ),
    tag = "Students"
)]
pub async fn delete_student(
    state: web::Data<SharedState>,
    path: web::Path<String>,
) -> actix_web::Result<impl Responder> {
    let id = path.into_inner();
    let today = Local::now().date_naive();

    let mut state = write_state(&state)?;

    // Historical attendance rows are kept: they are snapshots, not joins.
    match state.delete_student(&id, today) {
        Some(removed) => {
            info!(student_id = %removed.student_id, "Student deleted");
            Ok(HttpResponse::Ok().json(json!({
                "message": "Successfully deleted"
            })))
        }
        None => Ok(HttpResponse::NotFound().json(json!({
            "message": "Student not found"
        }))),
    }
}
