// File: crates/slotwise_scheduling/src/doc.rs

#![allow(dead_code)]
#![cfg(feature = "openapi")]
use utoipa::OpenApi;

use crate::handlers::{
    AvailabilityQuery, AvailableSlotsResponse, BookAppointmentRequest, BookingResponse,
    DateAvailability, SelectableDatesQuery, SelectableDatesResponse,
};
use slotwise_common::models::TimeSlot;

#[utoipa::path(
    get,
    path = "/availability/slots",
    params(
        ("business_id" = String, Query, description = "Business (tenant) identifier"),
        ("date" = String, Query, description = "Target date in YYYY-MM-DD format", example = "2025-05-05", format = "date"),
        ("duration_minutes" = i64, Query, description = "Service duration in minutes", example = 45),
        ("staff_id" = Option<String>, Query, description = "Optional staff member identifier")
    ),
    responses(
        (status = 200, description = "Candidate slots with availability flags", body = AvailableSlotsResponse,
         example = json!({
             "date": "2025-05-05",
             "slots": [
                 {"time": "09:00", "available": false},
                 {"time": "10:00", "available": true}
             ]
         })
        ),
        (status = 404, description = "Unknown business or staff member"),
        (status = 500, description = "Internal error", body = String)
    )
)]
fn doc_get_available_slots_handler() {}

#[utoipa::path(
    get,
    path = "/availability/dates",
    params(
        ("business_id" = String, Query, description = "Business (tenant) identifier"),
        ("start_date" = String, Query, description = "Start date in YYYY-MM-DD format", example = "2025-05-05", format = "date"),
        ("end_date" = String, Query, description = "End date in YYYY-MM-DD format, inclusive", example = "2025-05-24", format = "date"),
        ("staff_id" = Option<String>, Query, description = "Optional staff member identifier")
    ),
    responses(
        (status = 200, description = "Per-day selectable flags", body = SelectableDatesResponse),
        (status = 400, description = "Inverted or oversized date range"),
        (status = 500, description = "Internal error", body = String)
    )
)]
fn doc_get_selectable_dates_handler() {}

#[utoipa::path(
    post,
    path = "/book",
    request_body(content = BookAppointmentRequest, example = json!({
        "business_id": "biz-1",
        "staff_id": "staff-1",
        "date": "2025-05-15",
        "time": "10:00",
        "duration_minutes": 45,
        "customer_name": "Jane Doe"
    })),
    responses(
        (status = 200, description = "Booking result", body = BookingResponse,
         example = json!({
             "success": true,
             "appointment_id": "7f8de5a2-7e2a-4bbb-9c15-6d0a6f9f2a61",
             "status": "CONFIRMED",
             "message": "Appointment booked successfully."
         })
        ),
        (status = 409, description = "Slot already booked or daily limit reached"),
        (status = 500, description = "Booking failed")
    )
)]
fn doc_book_appointment_handler() {}

#[derive(OpenApi)]
#[openapi(
    paths(
        doc_get_available_slots_handler,
        doc_get_selectable_dates_handler,
        doc_book_appointment_handler
    ),
    components(
        schemas(
            AvailabilityQuery,
            AvailableSlotsResponse,
            SelectableDatesQuery,
            SelectableDatesResponse,
            DateAvailability,
            BookAppointmentRequest,
            BookingResponse,
            TimeSlot
        )
    ),
    tags(
        (name = "scheduling", description = "Appointment availability and booking API")
    ),
    servers(
        (url = "/api", description = "Scheduling API server")
    )
)]
pub struct SchedulingApiDoc;
