// File: crates/slotwise_scheduling/src/handlers.rs
use crate::logic::{
    booking_conflict, daily_cap_reached, generate_slots, is_date_selectable, is_staff_available,
    resolve_settings, resolve_working_hours,
};
use axum::{
    extract::{Query, State},
    http::StatusCode,
    response::Json,
};
use chrono::{Datelike, NaiveDate, NaiveDateTime, NaiveTime, Utc};
use chrono_tz::Tz;
use serde::{Deserialize, Serialize};
use slotwise_common::error::HttpStatusCode;
use slotwise_common::models::{Appointment, AppointmentStatus, Business, Staff, TimeSlot};
use slotwise_common::services::{BookingRepository, NewAppointment};
use slotwise_common::SlotwiseError;
use slotwise_config::AppConfig;
use std::str::FromStr;
use std::sync::Arc;
use tracing::{debug, info};

#[cfg(feature = "openapi")]
use utoipa::ToSchema;

// Define shared state needed by scheduling handlers
#[derive(Clone)]
pub struct SchedulingState {
    pub config: Arc<AppConfig>,
    pub repository: Arc<dyn BookingRepository>,
}

// --- Data Structures ---
#[derive(Deserialize, Debug)]
#[cfg_attr(feature = "openapi", derive(utoipa::IntoParams, utoipa::ToSchema))]
#[cfg_attr(feature = "openapi", into_params(parameter_in = Query))]
pub struct AvailabilityQuery {
    /// Business (tenant) identifier
    pub business_id: String,

    /// Target date in YYYY-MM-DD format
    #[cfg_attr(feature = "openapi", schema(format = "date", example = "2025-05-05"))]
    pub date: String,

    /// Service duration in minutes
    #[cfg_attr(feature = "openapi", schema(example = 45))]
    pub duration_minutes: i64,

    /// Optional staff member identifier
    pub staff_id: Option<String>,
}

#[derive(Serialize, Debug)]
#[cfg_attr(feature = "openapi", derive(ToSchema))]
pub struct AvailableSlotsResponse {
    pub date: String,
    pub slots: Vec<TimeSlot>,
}

#[derive(Deserialize, Debug)]
#[cfg_attr(feature = "openapi", derive(utoipa::IntoParams, utoipa::ToSchema))]
#[cfg_attr(feature = "openapi", into_params(parameter_in = Query))]
pub struct SelectableDatesQuery {
    /// Business (tenant) identifier
    pub business_id: String,

    /// Start date in YYYY-MM-DD format
    #[cfg_attr(feature = "openapi", schema(format = "date", example = "2025-05-05"))]
    pub start_date: String,

    /// End date in YYYY-MM-DD format, inclusive
    #[cfg_attr(feature = "openapi", schema(format = "date", example = "2025-05-24"))]
    pub end_date: String,

    /// Optional staff member identifier
    pub staff_id: Option<String>,
}

#[derive(Serialize, Debug)]
#[cfg_attr(feature = "openapi", derive(ToSchema))]
pub struct DateAvailability {
    #[cfg_attr(feature = "openapi", schema(format = "date", example = "2025-05-05"))]
    pub date: String,
    pub selectable: bool,
}

#[derive(Serialize, Debug)]
#[cfg_attr(feature = "openapi", derive(ToSchema))]
pub struct SelectableDatesResponse {
    pub dates: Vec<DateAvailability>,
}

#[derive(Deserialize, Debug)]
#[cfg_attr(feature = "openapi", derive(ToSchema))]
pub struct BookAppointmentRequest {
    pub business_id: String,
    pub staff_id: Option<String>,
    /// Target date in YYYY-MM-DD format
    #[cfg_attr(feature = "openapi", schema(format = "date", example = "2025-05-05"))]
    pub date: String,
    /// Start time in HH:MM format
    #[cfg_attr(feature = "openapi", schema(example = "10:30"))]
    pub time: String,
    /// Service duration in minutes
    #[cfg_attr(feature = "openapi", schema(example = 45))]
    pub duration_minutes: i64,
    pub customer_name: Option<String>,
}

#[derive(Serialize, Debug)]
#[cfg_attr(feature = "openapi", derive(ToSchema))]
pub struct BookingResponse {
    pub success: bool,
    pub appointment_id: Option<String>,
    pub status: Option<AppointmentStatus>,
    pub message: String,
}

// --- Helpers ---

fn business_time_zone(config: &AppConfig) -> Tz {
    config
        .scheduling
        .as_ref()
        .and_then(|s| s.time_zone.as_deref())
        .and_then(|name| Tz::from_str(name).ok())
        .unwrap_or(Tz::Europe__Zurich)
}

/// The current wall-clock time in the configured business time zone.
/// Computed once per request at the call boundary; the engine itself
/// never reads the clock.
fn business_now(config: &AppConfig) -> NaiveDateTime {
    Utc::now().with_timezone(&business_time_zone(config)).naive_local()
}

fn preparation_minutes(config: &AppConfig) -> i64 {
    config
        .scheduling
        .as_ref()
        .and_then(|s| s.preparation_time_minutes)
        .unwrap_or(30)
}

fn max_date_range_days(config: &AppConfig) -> i64 {
    config
        .scheduling
        .as_ref()
        .and_then(|s| s.max_date_range_days)
        .unwrap_or(92)
}

fn parse_date(value: &str, field: &str) -> Result<NaiveDate, (StatusCode, String)> {
    NaiveDate::parse_from_str(value, "%Y-%m-%d").map_err(|_| {
        (
            StatusCode::BAD_REQUEST,
            format!("Invalid {} format (YYYY-MM-DD)", field),
        )
    })
}

fn parse_time(value: &str, field: &str) -> Result<NaiveTime, (StatusCode, String)> {
    NaiveTime::parse_from_str(value, "%H:%M").map_err(|_| {
        (
            StatusCode::BAD_REQUEST,
            format!("Invalid {} format (HH:MM)", field),
        )
    })
}

fn repository_error(err: SlotwiseError) -> (StatusCode, String) {
    let status =
        StatusCode::from_u16(err.status_code()).unwrap_or(StatusCode::INTERNAL_SERVER_ERROR);
    (status, err.to_string())
}

async fn load_business(
    state: &SchedulingState,
    business_id: &str,
) -> Result<Business, (StatusCode, String)> {
    state
        .repository
        .find_business(business_id)
        .await
        .map_err(repository_error)?
        .ok_or_else(|| (StatusCode::NOT_FOUND, "Business not found".to_string()))
}

async fn load_staff(
    state: &SchedulingState,
    business_id: &str,
    staff_id: Option<&str>,
) -> Result<Option<Staff>, (StatusCode, String)> {
    match staff_id {
        None => Ok(None),
        Some(id) => state
            .repository
            .find_staff(business_id, id)
            .await
            .map_err(repository_error)?
            .map(Some)
            .ok_or_else(|| (StatusCode::NOT_FOUND, "Staff member not found".to_string())),
    }
}

// --- Handlers ---

/// Handler to get bookable time slots for one date.
#[axum::debug_handler]
#[cfg_attr(feature = "openapi", utoipa::path(
    get,
    path = "/availability/slots",
    params(AvailabilityQuery),
    responses(
        (status = 200, description = "Candidate slots with availability flags", body = AvailableSlotsResponse),
        (status = 400, description = "Bad request (e.g., invalid date format)"),
        (status = 404, description = "Unknown business or staff member"),
        (status = 500, description = "Internal error")
    ),
    tag = "Scheduling"
))]
pub async fn get_available_slots_handler(
    State(state): State<Arc<SchedulingState>>,
    Query(query): Query<AvailabilityQuery>,
) -> Result<Json<AvailableSlotsResponse>, (StatusCode, String)> {
    if query.duration_minutes <= 0 {
        return Err((
            StatusCode::BAD_REQUEST,
            "duration_minutes must be positive".to_string(),
        ));
    }
    let date = parse_date(&query.date, "date")?;
    let business = load_business(&state, &query.business_id).await?;
    let staff = load_staff(&state, &query.business_id, query.staff_id.as_deref()).await?;

    let appointments = state
        .repository
        .appointments_for_date(&query.business_id, query.staff_id.as_deref(), date)
        .await
        .map_err(repository_error)?;

    let settings = resolve_settings(&business);
    let hours = resolve_working_hours(&business, date.weekday());
    let now = business_now(&state.config);

    let slots = generate_slots(
        date,
        now,
        &settings,
        &hours,
        query.duration_minutes,
        preparation_minutes(&state.config),
        staff.as_ref(),
        &appointments,
    );
    debug!(
        business_id = %query.business_id,
        %date,
        slot_count = slots.len(),
        "computed availability"
    );

    Ok(Json(AvailableSlotsResponse {
        date: query.date,
        slots,
    }))
}

/// Handler to validate which dates of a range are selectable at all.
#[axum::debug_handler]
#[cfg_attr(feature = "openapi", utoipa::path(
    get,
    path = "/availability/dates",
    params(SelectableDatesQuery),
    responses(
        (status = 200, description = "Per-day selectable flags", body = SelectableDatesResponse),
        (status = 400, description = "Bad request (e.g., inverted or oversized range)"),
        (status = 404, description = "Unknown business or staff member"),
        (status = 500, description = "Internal error")
    ),
    tag = "Scheduling"
))]
pub async fn get_selectable_dates_handler(
    State(state): State<Arc<SchedulingState>>,
    Query(query): Query<SelectableDatesQuery>,
) -> Result<Json<SelectableDatesResponse>, (StatusCode, String)> {
    let start_date = parse_date(&query.start_date, "start_date")?;
    let end_date = parse_date(&query.end_date, "end_date")?;
    if end_date < start_date {
        return Err((
            StatusCode::BAD_REQUEST,
            "end_date must be after start_date".to_string(),
        ));
    }
    let span_days = (end_date - start_date).num_days();
    if span_days > max_date_range_days(&state.config) {
        return Err((
            StatusCode::BAD_REQUEST,
            "requested date range is too large".to_string(),
        ));
    }

    let business = load_business(&state, &query.business_id).await?;
    let staff = load_staff(&state, &query.business_id, query.staff_id.as_deref()).await?;

    let settings = resolve_settings(&business);
    let now = business_now(&state.config);

    let dates = start_date
        .iter_days()
        .take(span_days as usize + 1)
        .map(|date| DateAvailability {
            date: date.format("%Y-%m-%d").to_string(),
            selectable: is_date_selectable(date, None, now, &settings, &business, staff.as_ref()),
        })
        .collect();

    Ok(Json(SelectableDatesResponse { dates }))
}

/// Handler to book a time slot.
#[axum::debug_handler]
#[cfg_attr(feature = "openapi", utoipa::path(
    post,
    path = "/book",
    request_body = BookAppointmentRequest,
    responses(
        (status = 200, description = "Booking result", body = BookingResponse),
        (status = 400, description = "Validation failed"),
        (status = 404, description = "Unknown business or staff member"),
        (status = 409, description = "Slot already booked or daily limit reached"),
        (status = 500, description = "Internal error")
    ),
    tag = "Scheduling"
))]
pub async fn book_appointment_handler(
    State(state): State<Arc<SchedulingState>>,
    Json(payload): Json<BookAppointmentRequest>,
) -> Result<Json<BookingResponse>, (StatusCode, String)> {
    if payload.duration_minutes <= 0 {
        return Err((
            StatusCode::BAD_REQUEST,
            "duration_minutes must be positive".to_string(),
        ));
    }
    let date = parse_date(&payload.date, "date")?;
    let time = parse_time(&payload.time, "time")?;

    let business = load_business(&state, &payload.business_id).await?;
    let staff = load_staff(&state, &payload.business_id, payload.staff_id.as_deref()).await?;

    let settings = resolve_settings(&business);
    let hours = resolve_working_hours(&business, date.weekday());
    let now = business_now(&state.config);

    if !is_date_selectable(date, Some(time), now, &settings, &business, staff.as_ref()) {
        return Err((
            StatusCode::BAD_REQUEST,
            "Requested date is not selectable for booking".to_string(),
        ));
    }

    // The full service plus buffer must fit inside the opening hours.
    let start_minutes = crate::time::minutes_since_midnight(time);
    let open_minutes = crate::time::minutes_since_midnight(hours.open_time);
    let close_minutes = crate::time::minutes_since_midnight(hours.close_time);
    if start_minutes < open_minutes
        || start_minutes + payload.duration_minutes + settings.buffer_time > close_minutes
    {
        return Err((
            StatusCode::BAD_REQUEST,
            "Requested time is outside working hours".to_string(),
        ));
    }

    if let Some(staff) = staff.as_ref() {
        if !is_staff_available(staff, date, Some(time)) {
            return Err((
                StatusCode::CONFLICT,
                "Staff member is unavailable at the requested time".to_string(),
            ));
        }
    }

    let all_appointments = state
        .repository
        .appointments_for_date(&payload.business_id, None, date)
        .await
        .map_err(repository_error)?;

    if daily_cap_reached(&settings, &all_appointments) {
        return Err((
            StatusCode::CONFLICT,
            "Daily booking limit reached for this date".to_string(),
        ));
    }

    let same_staff: Vec<Appointment> = all_appointments
        .into_iter()
        .filter(|a| a.staff_id.as_deref() == payload.staff_id.as_deref())
        .collect();
    if booking_conflict(&same_staff, date, time, payload.duration_minutes) {
        return Err((
            StatusCode::CONFLICT,
            "Requested time slot is no longer available".to_string(),
        ));
    }

    let status = if settings.auto_confirmation {
        AppointmentStatus::Confirmed
    } else {
        AppointmentStatus::Pending
    };

    match state
        .repository
        .create_appointment(
            &payload.business_id,
            NewAppointment {
                staff_id: payload.staff_id.clone(),
                start: date.and_time(time),
                duration_minutes: payload.duration_minutes,
                status,
                customer_name: payload.customer_name.clone(),
            },
        )
        .await
    {
        Ok(created) => {
            info!(appointment_id = %created.id, "Successfully booked appointment");
            Ok(Json(BookingResponse {
                success: true,
                appointment_id: Some(created.id),
                status: Some(created.status),
                message: "Appointment booked successfully.".to_string(),
            }))
        }
        Err(SlotwiseError::ConflictError(_)) => Err((
            StatusCode::CONFLICT,
            "Requested time slot is no longer available.".to_string(),
        )),
        Err(e) => {
            info!("Error booking slot: {}", e);
            Err((
                StatusCode::INTERNAL_SERVER_ERROR,
                "Failed to book appointment.".to_string(),
            ))
        }
    }
}

/// Handler for OPTIONS requests to support CORS preflight
pub async fn options_handler() -> impl axum::response::IntoResponse {
    // Return appropriate CORS headers for preflight requests
    (
        StatusCode::OK,
        [
            ("Access-Control-Allow-Origin", "*"),
            ("Access-Control-Allow-Methods", "GET, POST, OPTIONS"),
            ("Access-Control-Allow-Headers", "Content-Type"),
            ("Access-Control-Max-Age", "86400"),
        ],
    )
}
