// --- File: crates/slotwise_scheduling/src/routes.rs ---

use crate::handlers::{
    book_appointment_handler, get_available_slots_handler, get_selectable_dates_handler,
    options_handler, SchedulingState,
};
use axum::{
    routing::{get, post},
    Router,
};
use slotwise_common::services::BookingRepository;
use slotwise_config::AppConfig;
use std::sync::Arc;

/// Creates a router containing all routes for the scheduling feature.
///
/// The legacy `/appointments/*` paths mirror the endpoint names the
/// pre-consolidation clients called; both resolve to the same handlers.
pub fn routes(config: Arc<AppConfig>, repository: Arc<dyn BookingRepository>) -> Router {
    let scheduling_state = Arc::new(SchedulingState { config, repository });

    Router::new()
        .route("/availability/slots", get(get_available_slots_handler))
        .route("/availability/dates", get(get_selectable_dates_handler))
        .route(
            "/appointments/available-slots",
            get(get_available_slots_handler),
        )
        .route(
            "/appointments/availability",
            get(get_selectable_dates_handler),
        )
        .route("/book", post(book_appointment_handler).options(options_handler))
        .with_state(scheduling_state)
}
