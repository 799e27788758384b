// --- File: crates/slotwise_scheduling/src/service.rs ---
//! In-memory booking repository.
//!
//! This module provides an implementation of the BookingRepository trait
//! backed by a mutex-guarded store. It is the persistence used by the
//! backend service and by the handler tests; a database-backed
//! implementation would replace it behind the same trait.

use std::collections::HashMap;
use std::sync::Mutex;

use chrono::NaiveDate;
use tracing::info;
use uuid::Uuid;

use crate::logic::booking_conflict;
use slotwise_common::error::SlotwiseError;
use slotwise_common::models::{Appointment, Business, Staff};
use slotwise_common::services::{BookingRepository, BoxFuture, NewAppointment};

#[derive(Default)]
struct Store {
    businesses: HashMap<String, Business>,
    // keyed by business id
    staff: HashMap<String, Vec<Staff>>,
    appointments: HashMap<String, Vec<Appointment>>,
}

/// Mutex-guarded in-memory store implementing [`BookingRepository`].
#[derive(Default)]
pub struct InMemoryBookingRepository {
    inner: Mutex<Store>,
}

impl InMemoryBookingRepository {
    pub fn new() -> Self {
        Self::default()
    }

    /// Insert or replace a business record.
    pub fn insert_business(&self, business: Business) {
        let mut store = self.inner.lock().expect("store lock poisoned");
        store.businesses.insert(business.id.clone(), business);
    }

    /// Insert or replace a staff member of a business.
    pub fn insert_staff(&self, business_id: &str, staff: Staff) {
        let mut store = self.inner.lock().expect("store lock poisoned");
        let roster = store.staff.entry(business_id.to_string()).or_default();
        roster.retain(|existing| existing.id != staff.id);
        roster.push(staff);
    }

    /// Insert an appointment directly, bypassing the overlap check.
    /// Intended for seeding test fixtures.
    pub fn insert_appointment(&self, business_id: &str, appointment: Appointment) {
        let mut store = self.inner.lock().expect("store lock poisoned");
        store
            .appointments
            .entry(business_id.to_string())
            .or_default()
            .push(appointment);
    }
}

impl BookingRepository for InMemoryBookingRepository {
    fn find_business(&self, business_id: &str) -> BoxFuture<'_, Option<Business>, SlotwiseError> {
        let business_id = business_id.to_string();
        Box::pin(async move {
            let store = self.inner.lock().expect("store lock poisoned");
            Ok(store.businesses.get(&business_id).cloned())
        })
    }

    fn find_staff(
        &self,
        business_id: &str,
        staff_id: &str,
    ) -> BoxFuture<'_, Option<Staff>, SlotwiseError> {
        let business_id = business_id.to_string();
        let staff_id = staff_id.to_string();
        Box::pin(async move {
            let store = self.inner.lock().expect("store lock poisoned");
            Ok(store
                .staff
                .get(&business_id)
                .and_then(|roster| roster.iter().find(|s| s.id == staff_id))
                .cloned())
        })
    }

    fn appointments_for_date(
        &self,
        business_id: &str,
        staff_id: Option<&str>,
        date: NaiveDate,
    ) -> BoxFuture<'_, Vec<Appointment>, SlotwiseError> {
        let business_id = business_id.to_string();
        let staff_id = staff_id.map(str::to_string);
        Box::pin(async move {
            let store = self.inner.lock().expect("store lock poisoned");
            let appointments = store
                .appointments
                .get(&business_id)
                .map(|all| {
                    all.iter()
                        .filter(|a| a.start.date() == date)
                        .filter(|a| match &staff_id {
                            Some(wanted) => a.staff_id.as_deref() == Some(wanted.as_str()),
                            None => true,
                        })
                        .cloned()
                        .collect()
                })
                .unwrap_or_default();
            Ok(appointments)
        })
    }

    /// Persist a new appointment.
    ///
    /// The overlap invariant is re-checked under the store lock: at most
    /// one non-cancelled appointment may occupy overlapping time for a
    /// given staff member. Two concurrent requests that both passed the
    /// read-side availability check cannot both succeed here.
    fn create_appointment(
        &self,
        business_id: &str,
        appointment: NewAppointment,
    ) -> BoxFuture<'_, Appointment, SlotwiseError> {
        let business_id = business_id.to_string();
        Box::pin(async move {
            let mut store = self.inner.lock().expect("store lock poisoned");
            let existing = store.appointments.entry(business_id.clone()).or_default();
            let same_staff: Vec<Appointment> = existing
                .iter()
                .filter(|a| a.staff_id == appointment.staff_id)
                .cloned()
                .collect();
            if booking_conflict(
                &same_staff,
                appointment.start.date(),
                appointment.start.time(),
                appointment.duration_minutes,
            ) {
                return Err(SlotwiseError::ConflictError(
                    "requested time slot is no longer available".to_string(),
                ));
            }
            let created = Appointment {
                id: Uuid::new_v4().to_string(),
                staff_id: appointment.staff_id,
                start: appointment.start,
                duration_minutes: appointment.duration_minutes,
                status: appointment.status,
                customer_name: appointment.customer_name,
            };
            existing.push(created.clone());
            info!(
                appointment_id = %created.id,
                business_id = %business_id,
                start = %created.start,
                "appointment created"
            );
            Ok(created)
        })
    }
}
