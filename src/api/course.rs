use actix_web::{HttpResponse, Responder, web};
use serde::{Deserialize, Serialize};
use serde_json::json;
use utoipa::ToSchema;
use uuid::Uuid;

use crate::model::course::Course;
use crate::store::{SharedState, read_state, write_state};

#[derive(Deserialize, ToSchema)]
pub struct CreateCourse {
    #[schema(example = "Introduction to Computer Science")]
    pub name: String,
    #[schema(example = "Dr. Robert Brown")]
    pub instructor: String,
    #[schema(example = "Mon, Wed 9:00-11:30")]
    pub schedule: String,
    #[schema(example = "Building A, Room 101")]
    pub room: String,
}

/// A course plus its derived enrollment count: the number of students whose
/// class equals the course name. There is no enrollment table to join.
#[derive(Serialize, ToSchema)]
pub struct CourseResponse {
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
    #[schema(example = 0)]
    pub enrolled: usize,
}

impl CourseResponse {
    fn new(course: &Course, enrolled: usize) -> Self {
        Self {
            id: course.id.clone(),
            name: course.name.clone(),
            instructor: course.instructor.clone(),
            schedule: course.schedule.clone(),
            room: course.room.clone(),
            enrolled,
        }
    }
}

/// Create Course
#[utoipa::path(
    post,
    path = "/api/v1/courses",
    request_body = CreateCourse,
    responses(
        (status = 200, description = "Course created", body = CourseResponse)
    ),
    tag = "Courses"
)]
pub async fn create_course(
    state: web::Data<SharedState>,
    payload: web::Json<CreateCourse>,
) -> actix_web::Result<impl Responder> {
    let payload = payload.into_inner();
    let mut state = write_state(&state)?;

    let course = Course {
        id: Uuid::new_v4().to_string(),
        name: payload.name,
        instructor: payload.instructor,
        schedule: payload.schedule,
        room: payload.room,
    };
    let response = CourseResponse::new(&course, state.enrolled_count(&course.name));
    state.insert_course(course);

    Ok(HttpResponse::Ok().json(response))
}

/// List Courses
#[utoipa::path(
    get,
    path = "/api/v1/courses",
    responses(
        (status = 200, description = "All courses with enrollment counts", body = [CourseResponse])
    ),
    tag = "Courses"
)]
pub async fn list_courses(state: web::Data<SharedState>) -> actix_web::Result<impl Responder> {
    let state = read_state(&state)?;

    let courses: Vec<CourseResponse> = state
        .courses
        .iter()
        .map(|c| CourseResponse::new(c, state.enrolled_count(&c.name)))
        .collect();

    Ok(HttpResponse::Ok().json(courses))
}

/// Get Course by ID
#[utoipa::path(
    get,
    path = "/api/v1/courses/{id}",
    params(("id", Path, description = "Course ID")),
    responses(
        (status = 200, description = "Course found", body = CourseResponse),
        (status = 404, description = "Course not found", body = Object, example = json!({
            "message": "Course not found"
        }))
    ),
    tag = "Courses"
)]
pub async fn get_course(
    state: web::Data<SharedState>,
    path: web::Path<String>,
) -> actix_web::Result<impl Responder> {
    let id = path.into_inner();
    let state = read_state(&state)?;

    match state.courses.iter().find(|c| c.id == id) {
        Some(course) => {
            Ok(HttpResponse::Ok().json(CourseResponse::new(course, state.enrolled_count(&course.name))))
        }
        None => Ok(HttpResponse::NotFound().json(json!({
            "message": "Course not found"
        }))),
    }
}

/// Update Course
#[utoipa::path(
    put,
    path = "/api/v1/courses/{id}",
    params(("id", Path, description = "Course ID")),
    request_body = CreateCourse,
    responses(
        (status = 200, description = "Course updated", body = CourseResponse),
        (status = 404, description = "Course not found")
    ),
    tag = "Courses"
)]
pub async fn update_course(
    state: web::Data<SharedState>,
    path: web::Path<String>,
    payload: web::Json<CreateCourse>,
) -> actix_web::Result<impl Responder> {
    let id = path.into_inner();
    let payload = payload.into_inner();
    let mut state = write_state(&state)?;

    let updated = Course {
        id: id.clone(),
        name: payload.name,
        instructor: payload.instructor,
        schedule: payload.schedule,
        room: payload.room,
    };
    if !state.update_course(updated.clone()) {
        return Ok(HttpResponse::NotFound().json(json!({
            "message": "Course not found"
        })));
    }

    let enrolled = state.enrolled_count(&updated.name);
    Ok(HttpResponse::Ok().json(CourseResponse::new(&updated, enrolled)))
}

/// Delete Course
#[utoipa::path(
    delete,
    path = "/api/v1/courses/{id}",
    params(("id", Path, description = "Course ID")),
    responses(
        (status = 200, description = "Successfully deleted", body = Object, example = json!({
            "message": "Successfully deleted"
        })),
        (status = 404, description = "Course not found")
    ),
    tag = "Courses"
)]
pub async fn delete_course(
    state: web::Data<SharedState>,
    path: web::Path<String>,
) -> actix_web::Result<impl Responder> {
    let id = path.into_inner();
    let mut state = write_state(&state)?;

    match state.delete_course(&id) {
        Some(_) => Ok(HttpResponse::Ok().json(json!({
            "message": "Successfully deleted"
        }))),
        None => Ok(HttpResponse::NotFound().json(json!({
            "message": "Course not found"
        }))),
    }
}
