use std::sync::RwLock;

use actix_web::middleware::NormalizePath;
use actix_web::web::Data;
use actix_web::{App, HttpServer, Responder, get};
use chrono::Local;
use dotenvy::dotenv;

use rfid_attendance::config::Config;
use rfid_attendance::docs::ApiDoc;
use rfid_attendance::store::AppState;
use rfid_attendance::{fixtures, routes};

use tracing::info;
use tracing_appender::rolling;
use utoipa::OpenApi;
use utoipa_swagger_ui::SwaggerUi;

#[get("/")]
async fn index() -> impl Responder {
    "RFID Attendance Demo"
}

#[actix_web::main]
async fn main() -> std::io::Result<()> {
    dotenv().ok();

    let config = Config::from_env();

    // Rolling daily log
    let file_appender = rolling::daily("logs", "app.log");
    let (non_blocking, _guard) = tracing_appender::non_blocking(file_appender);

    tracing_subscriber::fmt()
        .with_writer(non_blocking)
        .with_max_level(tracing::Level::DEBUG)
        .with_ansi(false)
        .with_target(false)
        .with_level(true)
        .with_thread_ids(false)
        .with_thread_names(false)
        .pretty()
        .init();

    info!("Server starting...");

    let today = Local::now().date_naive();
    let state = if config.seed_demo_data {
        fixtures::seeded_state(today)
            .map_err(|e| std::io::Error::new(std::io::ErrorKind::Other, e.to_string()))?
    } else {
        AppState::new()
    };
    // All state lives here for the lifetime of the process; views get it
    // through Data and mutate it under the write lock. Nothing survives a
    // restart.
    let state = Data::new(RwLock::new(state));

    let server_addr = config.server_addr.clone();
    let config_data = config.clone();

    HttpServer::new(move || {
        App::new()
            .wrap(actix_web::middleware::Logger::default())
            .wrap(NormalizePath::trim())
            .service(
                SwaggerUi::new("/swagger-ui/{_:.*}")
                    .url("/api-doc/openapi.json", ApiDoc::openapi()),
            )
            .app_data(state.clone())
            .app_data(Data::new(config.clone()))
            .service(index)
            .configure(|cfg| routes::configure(cfg, config_data.clone()))
    })
    .bind(server_addr)?
    .run()
    .await
}
