// --- File: crates/slotwise_common/src/models.rs ---
//! Shared domain model for the availability engine.
//!
//! These types are owned by the calling layer (API routes / persistence);
//! the engine only reads them and returns derived, ephemeral results.
//! Times cross the wire as `"HH:MM"` strings (see [`hhmm`]), dates as
//! ISO `YYYY-MM-DD`.

use chrono::{NaiveDate, NaiveDateTime, NaiveTime};
use serde::{Deserialize, Serialize};

/// Serde adapter for `NaiveTime` fields carried as `"HH:MM"` strings.
pub mod hhmm {
    use chrono::NaiveTime;
    use serde::{Deserialize, Deserializer, Serializer};

    pub const FORMAT: &str = "%H:%M";

    pub fn serialize<S>(time: &NaiveTime, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        serializer.serialize_str(&time.format(FORMAT).to_string())
    }

    pub fn deserialize<'de, D>(deserializer: D) -> Result<NaiveTime, D::Error>
    where
        D: Deserializer<'de>,
    {
        let value = String::deserialize(deserializer)?;
        NaiveTime::parse_from_str(&value, FORMAT).map_err(serde::de::Error::custom)
    }
}

/// Serde adapter for optional `"HH:MM"` fields.
pub mod hhmm_option {
    use chrono::NaiveTime;
    use serde::{Deserialize, Deserializer, Serializer};

    pub fn serialize<S>(time: &Option<NaiveTime>, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        match time {
            Some(t) => serializer.serialize_some(&t.format(super::hhmm::FORMAT).to_string()),
            None => serializer.serialize_none(),
        }
    }

    pub fn deserialize<'de, D>(deserializer: D) -> Result<Option<NaiveTime>, D::Error>
    where
        D: Deserializer<'de>,
    {
        let value: Option<String> = Option::deserialize(deserializer)?;
        value
            .map(|s| NaiveTime::parse_from_str(&s, super::hhmm::FORMAT))
            .transpose()
            .map_err(serde::de::Error::custom)
    }
}

/// Fully resolved appointment policy for a business.
///
/// Every field is populated; use [`AppointmentSettingsOverrides`] for the
/// partially configured form stored on a business record.
#[cfg_attr(feature = "openapi", derive(utoipa::ToSchema))]
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AppointmentSettings {
    /// Step size between candidate slots, in minutes.
    pub slot_duration: i64,
    /// Idle minutes appended after a service before the next slot may start.
    pub buffer_time: i64,
    /// How many days into the future appointments may be booked.
    pub max_advance_booking: i64,
    /// Minimum lead time before an appointment, in hours.
    pub min_advance_booking: i64,
    pub allow_same_day_booking: bool,
    /// 0 = unlimited.
    pub max_daily_appointments: u32,
    pub auto_confirmation: bool,
}

impl Default for AppointmentSettings {
    fn default() -> Self {
        Self {
            slot_duration: 30,
            buffer_time: 0,
            max_advance_booking: 30,
            min_advance_booking: 2,
            allow_same_day_booking: true,
            max_daily_appointments: 0,
            auto_confirmation: true,
        }
    }
}

/// Partially configured appointment policy as stored on a business.
///
/// Missing fields fall back to the defaults field-by-field, never
/// all-or-nothing.
#[cfg_attr(feature = "openapi", derive(utoipa::ToSchema))]
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct AppointmentSettingsOverrides {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub slot_duration: Option<i64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub buffer_time: Option<i64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub max_advance_booking: Option<i64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub min_advance_booking: Option<i64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub allow_same_day_booking: Option<bool>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub max_daily_appointments: Option<u32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub auto_confirmation: Option<bool>,
}

/// Opening hours for one weekday.
///
/// `day_of_week` follows the 0=Sunday..6=Saturday convention, matching
/// `chrono::Weekday::num_days_from_sunday`. This is an explicit integration
/// contract, not incidental agreement with the date library.
#[cfg_attr(feature = "openapi", derive(utoipa::ToSchema))]
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct WorkingHoursEntry {
    pub day_of_week: u8,
    pub is_open: bool,
    #[serde(with = "hhmm")]
    #[cfg_attr(feature = "openapi", schema(value_type = String, example = "09:00"))]
    pub open_time: NaiveTime,
    #[serde(with = "hhmm")]
    #[cfg_attr(feature = "openapi", schema(value_type = String, example = "18:00"))]
    pub close_time: NaiveTime,
}

/// Resolved opening hours for a concrete date.
#[cfg_attr(feature = "openapi", derive(utoipa::ToSchema))]
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DayHours {
    pub is_open: bool,
    #[serde(with = "hhmm")]
    #[cfg_attr(feature = "openapi", schema(value_type = String, example = "09:00"))]
    pub open_time: NaiveTime,
    #[serde(with = "hhmm")]
    #[cfg_attr(feature = "openapi", schema(value_type = String, example = "18:00"))]
    pub close_time: NaiveTime,
}

/// A business (tenant) record as read from persistence.
#[cfg_attr(feature = "openapi", derive(utoipa::ToSchema))]
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Business {
    pub id: String,
    pub name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub appointment_settings: Option<AppointmentSettingsOverrides>,
    #[serde(default)]
    pub working_hours: Vec<WorkingHoursEntry>,
}

#[cfg_attr(feature = "openapi", derive(utoipa::ToSchema))]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum LeaveType {
    FullDay,
    Partial,
    MultiDay,
}

#[cfg_attr(feature = "openapi", derive(utoipa::ToSchema))]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum LeaveStatus {
    Approved,
    Pending,
    Rejected,
}

/// A staff member's unavailability window.
///
/// Only `APPROVED` leaves affect availability. `start_time`/`end_time` are
/// only meaningful for `PARTIAL` leaves.
#[cfg_attr(feature = "openapi", derive(utoipa::ToSchema))]
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StaffLeave {
    #[cfg_attr(feature = "openapi", schema(value_type = String, format = "date"))]
    pub start_date: NaiveDate,
    /// Inclusive: a leave ending on day D still blocks day D entirely.
    #[cfg_attr(feature = "openapi", schema(value_type = String, format = "date"))]
    pub end_date: NaiveDate,
    #[serde(default, with = "hhmm_option", skip_serializing_if = "Option::is_none")]
    #[cfg_attr(feature = "openapi", schema(value_type = Option<String>, example = "12:00"))]
    pub start_time: Option<NaiveTime>,
    #[serde(default, with = "hhmm_option", skip_serializing_if = "Option::is_none")]
    #[cfg_attr(feature = "openapi", schema(value_type = Option<String>, example = "13:00"))]
    pub end_time: Option<NaiveTime>,
    #[serde(rename = "type")]
    pub leave_type: LeaveType,
    pub status: LeaveStatus,
}

/// A bookable staff member with their leave calendar.
#[cfg_attr(feature = "openapi", derive(utoipa::ToSchema))]
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Staff {
    pub id: String,
    pub name: String,
    #[serde(default)]
    pub leaves: Vec<StaffLeave>,
}

/// A service offered by a business. `price` is in minor currency units.
#[cfg_attr(feature = "openapi", derive(utoipa::ToSchema))]
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Service {
    pub id: String,
    pub name: String,
    pub duration_minutes: i64,
    pub price: i64,
}

#[cfg_attr(feature = "openapi", derive(utoipa::ToSchema))]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum AppointmentStatus {
    Pending,
    Confirmed,
    Completed,
    Cancelled,
    NoShow,
}

impl AppointmentStatus {
    /// CANCELLED appointments never block a slot; all other statuses do.
    pub fn blocks_slot(&self) -> bool {
        !matches!(self, AppointmentStatus::Cancelled)
    }
}

/// An existing booking, read-only input to the engine.
#[cfg_attr(feature = "openapi", derive(utoipa::ToSchema))]
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Appointment {
    pub id: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub staff_id: Option<String>,
    #[cfg_attr(feature = "openapi", schema(value_type = String, format = "date-time"))]
    pub start: NaiveDateTime,
    pub duration_minutes: i64,
    pub status: AppointmentStatus,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub customer_name: Option<String>,
}

/// Engine output: one candidate start time, flagged rather than hidden
/// when taken, so consumers can render it as disabled.
#[cfg_attr(feature = "openapi", derive(utoipa::ToSchema))]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct TimeSlot {
    #[serde(with = "hhmm")]
    #[cfg_attr(feature = "openapi", schema(value_type = String, example = "10:30"))]
    pub time: NaiveTime,
    pub available: bool,
}
