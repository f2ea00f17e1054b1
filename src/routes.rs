use crate::{
    api::{attendance, course, dashboard, scanner, student},
    config::Config,
};
use actix_web::web;

pub fn configure(cfg: &mut web::ServiceConfig, config: Config) {
    cfg.service(
        web::scope(&config.api_prefix)
            .service(
                web::scope("/students")
                    // /students
                    .service(
                        web::resource("")
                            .route(web::post().to(student::create_student))
                            .route(web::get().to(student::list_students)),
                    )
                    // /students/{id}
                    .service(
                        web::resource("/{id}")
                            .route(web::get().to(student::get_student))
                            .route(web::put().to(student::update_student))
                            .route(web::delete().to(student::delete_student)),
                    ),
            )
            .service(
                web::scope("/attendance")
                    // /attendance
                    .service(
                        web::resource("")
                            .route(web::get().to(attendance::list_records))
                            .route(web::post().to(attendance::create_record)),
                    )
                    // /attendance/export, registered before /{id}
                    .service(
                        web::resource("/export").route(web::get().to(attendance::export_records)),
                    )
                    // /attendance/{id}
                    .service(
                        web::resource("/{id}")
                            .route(web::put().to(attendance::update_record))
                            .route(web::delete().to(attendance::delete_record)),
                    ),
            )
            .service(
                web::scope("/courses")
                    // /courses
                    .service(
                        web::resource("")
                            .route(web::post().to(course::create_course))
                            .route(web::get().to(course::list_courses)),
                    )
                    // /courses/{id}
                    .service(
                        web::resource("/{id}")
                            .route(web::get().to(course::get_course))
                            .route(web::put().to(course::update_course))
                            .route(web::delete().to(course::delete_course)),
                    ),
            )
            .service(
                web::scope("/scanner")
                    // /scanner/scan
                    .service(web::resource("/scan").route(web::post().to(scanner::scan)))
                    // /scanner/events
                    .service(web::resource("/events").route(web::get().to(scanner::list_events))),
            )
            .service(
                web::scope("/dashboard")
                    .service(web::resource("/summary").route(web::get().to(dashboard::summary)))
                    .service(web::resource("/weekly").route(web::get().to(dashboard::weekly)))
                    .service(web::resource("/by-class").route(web::get().to(dashboard::by_class))),
            ),
    );
}
