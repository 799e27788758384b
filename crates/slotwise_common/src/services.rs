// --- File: crates/slotwise_common/src/services.rs ---
//! Service abstractions for the persistence boundary.
//!
//! This module provides the trait definition the availability engine reads
//! through. It allows for dependency injection and easier testing by
//! decoupling the engine and its HTTP handlers from a concrete store.

use chrono::{NaiveDate, NaiveDateTime};
use serde::{Deserialize, Serialize};
use std::future::Future;
use std::pin::Pin;

use crate::error::SlotwiseError;
use crate::models::{Appointment, AppointmentStatus, Business, Staff};

/// Type alias for a boxed future that returns a Result
pub type BoxFuture<'a, T, E> = Pin<Box<dyn Future<Output = Result<T, E>> + Send + 'a>>;

/// Payload for creating an appointment through the repository.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct NewAppointment {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub staff_id: Option<String>,
    pub start: NaiveDateTime,
    pub duration_minutes: i64,
    pub status: AppointmentStatus,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub customer_name: Option<String>,
}

/// A trait for booking persistence operations.
///
/// The engine itself is a pure function of its inputs; implementations of
/// this trait supply those inputs (business policy, staff calendars,
/// existing bookings) and own the write path.
///
/// Write-path invariant: at most one non-cancelled appointment may occupy
/// overlapping time for a given staff member. The engine cannot arbitrate
/// two concurrent requests for the same free slot, so `create_appointment`
/// must enforce this and return [`SlotwiseError::ConflictError`] when it
/// is violated.
pub trait BookingRepository: Send + Sync {
    /// Look up a business (tenant) by id.
    fn find_business(&self, business_id: &str) -> BoxFuture<'_, Option<Business>, SlotwiseError>;

    /// Look up a staff member of a business by id.
    fn find_staff(
        &self,
        business_id: &str,
        staff_id: &str,
    ) -> BoxFuture<'_, Option<Staff>, SlotwiseError>;

    /// All appointments of a business on the given date, optionally
    /// narrowed to one staff member. Cancelled appointments are included;
    /// the engine decides what blocks.
    fn appointments_for_date(
        &self,
        business_id: &str,
        staff_id: Option<&str>,
        date: NaiveDate,
    ) -> BoxFuture<'_, Vec<Appointment>, SlotwiseError>;

    /// Persist a new appointment, enforcing the overlap invariant.
    fn create_appointment(
        &self,
        business_id: &str,
        appointment: NewAppointment,
    ) -> BoxFuture<'_, Appointment, SlotwiseError>;
}
