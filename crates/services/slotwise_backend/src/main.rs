// File: services/slotwise_backend/src/main.rs
use axum::{routing::get, Router};
use chrono::NaiveTime;
use slotwise_common::models::{Business, Staff, WorkingHoursEntry};
use slotwise_common::services::BookingRepository;
use slotwise_config::load_config;
use slotwise_scheduling::routes as scheduling_routes;
use slotwise_scheduling::service::InMemoryBookingRepository;
use std::sync::Arc;
use tokio::net::TcpListener;
use tracing::info;

/// Seeds the in-memory store with a demo business so the API is usable
/// out of the box. Replaced by a real persistence backend in deployment.
fn seed_repository() -> Arc<InMemoryBookingRepository> {
    let repository = Arc::new(InMemoryBookingRepository::new());

    let hours = |day: u8, open: (u32, u32), close: (u32, u32)| WorkingHoursEntry {
        day_of_week: day,
        is_open: true,
        open_time: NaiveTime::from_hms_opt(open.0, open.1, 0).unwrap(),
        close_time: NaiveTime::from_hms_opt(close.0, close.1, 0).unwrap(),
    };
    let closed = |day: u8| WorkingHoursEntry {
        day_of_week: day,
        is_open: false,
        open_time: NaiveTime::from_hms_opt(0, 0, 0).unwrap(),
        close_time: NaiveTime::from_hms_opt(0, 0, 0).unwrap(),
    };

    repository.insert_business(Business {
        id: "demo".to_string(),
        name: "Demo Salon".to_string(),
        appointment_settings: None,
        working_hours: vec![
            closed(0), // Sunday
            hours(1, (9, 0), (18, 0)),
            hours(2, (9, 0), (18, 0)),
            hours(3, (9, 0), (18, 0)),
            hours(4, (9, 0), (18, 0)),
            hours(5, (9, 0), (18, 0)),
            hours(6, (10, 0), (16, 0)), // Saturday
        ],
    });
    repository.insert_staff(
        "demo",
        Staff {
            id: "demo-staff".to_string(),
            name: "Alex".to_string(),
            leaves: Vec::new(),
        },
    );

    repository
}

#[tokio::main]
async fn main() {
    slotwise_common::logging::init();

    let config = Arc::new(load_config().expect("Failed to load config"));
    let repository = seed_repository();

    let api_router = Router::new()
        .route("/", get(|| async { "Welcome to the Slotwise API!" }))
        .merge(scheduling_routes::routes(
            config.clone(),
            repository.clone() as Arc<dyn BookingRepository>,
        ));

    #[allow(unused_mut)] // mutated only when the openapi feature is on
    let mut app = Router::new().nest("/api", api_router);

    // Conditionally add Swagger UI and JSON endpoint if openapi feature enabled
    #[cfg(feature = "openapi")]
    {
        use slotwise_scheduling::doc::SchedulingApiDoc;
        use utoipa::OpenApi;
        use utoipa_swagger_ui::SwaggerUi;

        #[derive(OpenApi)]
        #[openapi(
            info(
                title = "Slotwise API",
                version = "0.1.0",
                description = "Slotwise appointment availability API Docs",
                license(name = "MIT", url = "https://opensource.org/licenses/MIT")
            ),
            components(),
            tags( (name = "Slotwise", description = "Core service endpoints")),
            servers( (url = "/api", description = "Main API Prefix")),
        )]
        struct ApiDoc;

        let mut openapi_doc = ApiDoc::openapi();
        openapi_doc.merge(SchedulingApiDoc::openapi());
        info!("Adding Swagger UI at /api/docs");

        let swagger_ui =
            SwaggerUi::new("/api/docs").url("/api/docs/openapi.json", openapi_doc.clone());
        app = app.merge(swagger_ui);
    }

    let addr = format!("{}:{}", config.server.host, config.server.port);
    let listener = TcpListener::bind(&addr)
        .await
        .expect("Failed to bind server address");
    info!("Starting server at http://{}", addr);
    info!("API endpoints available at http://{}/api", addr);

    axum::serve(listener, app.into_make_service())
        .await
        .expect("Server error");
}
