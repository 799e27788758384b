// --- File: crates/slotwise_scheduling/src/logic.rs ---
//! The availability engine.
//!
//! Four layers, each a pure function over explicit inputs: policy
//! resolution, working-hours resolution, staff-leave checking, and the
//! slot generator / date validator that combines them with existing
//! bookings. No ambient clock: callers thread `now` in explicitly, so
//! every function here is deterministic and total over well-formed
//! inputs.

use chrono::{Datelike, Duration, NaiveDate, NaiveDateTime, NaiveTime, Weekday};
use tracing::debug;

use crate::time::{intervals_overlap, minutes_since_midnight, round_up_to_step, time_from_minutes};
use slotwise_common::models::{
    Appointment, AppointmentSettings, Business, DayHours, LeaveStatus, LeaveType, Staff, TimeSlot,
};

/// Fallback opening hours for weekdays a business has not configured.
/// Deliberately permissive; see the open question recorded in DESIGN.md.
pub fn default_day_hours() -> DayHours {
    DayHours {
        is_open: true,
        open_time: NaiveTime::from_hms_opt(9, 0, 0).unwrap(),
        close_time: NaiveTime::from_hms_opt(18, 0, 0).unwrap(),
    }
}

/// Merges a business's configured appointment settings with the defaults,
/// field by field. A business that configured `slot_duration` but omitted
/// `max_daily_appointments` keeps the configured value and only the
/// missing field defaults. Always succeeds.
pub fn resolve_settings(business: &Business) -> AppointmentSettings {
    let defaults = AppointmentSettings::default();
    let Some(configured) = business.appointment_settings.as_ref() else {
        return defaults;
    };
    AppointmentSettings {
        slot_duration: configured.slot_duration.unwrap_or(defaults.slot_duration),
        buffer_time: configured.buffer_time.unwrap_or(defaults.buffer_time),
        max_advance_booking: configured
            .max_advance_booking
            .unwrap_or(defaults.max_advance_booking),
        min_advance_booking: configured
            .min_advance_booking
            .unwrap_or(defaults.min_advance_booking),
        allow_same_day_booking: configured
            .allow_same_day_booking
            .unwrap_or(defaults.allow_same_day_booking),
        max_daily_appointments: configured
            .max_daily_appointments
            .unwrap_or(defaults.max_daily_appointments),
        auto_confirmation: configured
            .auto_confirmation
            .unwrap_or(defaults.auto_confirmation),
    }
}

/// Resolves the opening hours of a business for one weekday.
///
/// Weekdays are keyed 0=Sunday..6=Saturday, matching
/// `chrono::Weekday::num_days_from_sunday`. Missing entries fall back to
/// open 09:00-18:00.
pub fn resolve_working_hours(business: &Business, weekday: Weekday) -> DayHours {
    let day_index = weekday.num_days_from_sunday() as u8;
    business
        .working_hours
        .iter()
        .find(|entry| entry.day_of_week == day_index)
        .map(|entry| DayHours {
            is_open: entry.is_open,
            open_time: entry.open_time,
            close_time: entry.close_time,
        })
        .unwrap_or_else(default_day_hours)
}

/// Whether a staff member is free on `date`, optionally at a specific
/// time of day.
///
/// Only `APPROVED` leaves block. The leave date range is inclusive on
/// both ends. A `PARTIAL` leave narrows to its `[start_time, end_time)`
/// minute window when `time` is supplied and the leave carries times;
/// in every other in-range case the whole day is blocked.
pub fn is_staff_available(staff: &Staff, date: NaiveDate, time: Option<NaiveTime>) -> bool {
    staff
        .leaves
        .iter()
        .filter(|leave| leave.status == LeaveStatus::Approved)
        .all(|leave| {
            if date < leave.start_date || date > leave.end_date {
                return true;
            }
            match (leave.leave_type, time) {
                (LeaveType::Partial, Some(candidate)) => {
                    match (leave.start_time, leave.end_time) {
                        (Some(leave_start), Some(leave_end)) => {
                            let slot = minutes_since_midnight(candidate);
                            // Half-open: a slot exactly at the leave's end is free.
                            !(slot >= minutes_since_midnight(leave_start)
                                && slot < minutes_since_midnight(leave_end))
                        }
                        // Partial leave without times blocks the day.
                        _ => false,
                    }
                }
                _ => false,
            }
        })
}

/// Day-level gate for the slot generator.
///
/// Unlike the date-level check, a `PARTIAL` leave that carries a time
/// window does not block the whole day here; the generator narrows it
/// per slot instead. Partial leaves without times cannot narrow and
/// block the day.
fn staff_blocked_all_day(staff: &Staff, date: NaiveDate) -> bool {
    staff
        .leaves
        .iter()
        .filter(|leave| leave.status == LeaveStatus::Approved)
        .any(|leave| {
            if date < leave.start_date || date > leave.end_date {
                return false;
            }
            !(leave.leave_type == LeaveType::Partial
                && leave.start_time.is_some()
                && leave.end_time.is_some())
        })
}

/// Whether `date` is selectable for booking at all.
///
/// Sequential gates, short-circuiting in this exact order (the order
/// matches user-facing rejection reasons): past date, same-day policy,
/// minimum lead time, maximum advance window, opening hours, whole-day
/// staff availability.
///
/// The lead-time gate compares against the full `now` timestamp. When
/// the caller knows the candidate time it should pass it; date-only
/// checks (calendar grids) evaluate the most permissive instant of the
/// day, so a date is only rejected when even its end of day is inside
/// the lead window.
pub fn is_date_selectable(
    date: NaiveDate,
    time: Option<NaiveTime>,
    now: NaiveDateTime,
    settings: &AppointmentSettings,
    business: &Business,
    staff: Option<&Staff>,
) -> bool {
    let today = now.date();
    if date < today {
        return false;
    }
    if !settings.allow_same_day_booking && date == today {
        return false;
    }
    let candidate_instant =
        date.and_time(time.unwrap_or_else(|| NaiveTime::from_hms_opt(23, 59, 59).unwrap()));
    if (candidate_instant - now).num_minutes() < settings.min_advance_booking * 60 {
        return false;
    }
    if date > today + Duration::days(settings.max_advance_booking) {
        return false;
    }
    let hours = resolve_working_hours(business, date.weekday());
    if !hours.is_open {
        return false;
    }
    if let Some(staff) = staff {
        if !is_staff_available(staff, date, None) {
            return false;
        }
    }
    true
}

/// Generates the ordered list of candidate slots for a date.
///
/// Candidates start at the opening time and step by `slot_duration`
/// minutes. On the current day the start is pushed past
/// `now + prep_minutes` and rounded up onto the slot grid. A candidate is
/// emitted only when the full service plus buffer fits before closing;
/// emitted candidates that collide with a leave window or a non-cancelled
/// booking are flagged `available: false` rather than removed, so
/// consumers can render them as disabled.
#[allow(clippy::too_many_arguments)]
pub fn generate_slots(
    date: NaiveDate,
    now: NaiveDateTime,
    settings: &AppointmentSettings,
    hours: &DayHours,
    service_duration: i64,
    prep_minutes: i64,
    staff: Option<&Staff>,
    existing_appointments: &[Appointment],
) -> Vec<TimeSlot> {
    if !hours.is_open {
        return Vec::new();
    }
    if let Some(staff) = staff {
        if staff_blocked_all_day(staff, date) {
            return Vec::new();
        }
    }
    let step = settings.slot_duration;
    if step <= 0 {
        debug!(slot_duration = step, "non-positive slot duration, no slots");
        return Vec::new();
    }

    let open_minutes = minutes_since_midnight(hours.open_time);
    let close_minutes = minutes_since_midnight(hours.close_time);

    // Same-day adjustment: never offer a slot inside the preparation window.
    let mut cursor = open_minutes;
    if date == now.date() {
        let min_start = minutes_since_midnight(now.time()) + prep_minutes;
        if min_start > open_minutes {
            cursor = round_up_to_step(min_start, step);
        }
    }

    debug!(
        %date,
        open_minutes,
        close_minutes,
        step,
        service_duration,
        "generating slots"
    );

    let mut slots = Vec::new();
    while cursor < close_minutes {
        let service_end = cursor + service_duration + settings.buffer_time;
        if service_end <= close_minutes {
            // cursor < close_minutes <= minutes-in-day, so this cannot fail
            let Some(candidate) = time_from_minutes(cursor) else {
                break;
            };
            let available = staff.map_or(true, |s| is_staff_available(s, date, Some(candidate)));
            slots.push(TimeSlot {
                time: candidate,
                available,
            });
        }
        cursor += step;
    }

    // Cross-reference existing bookings for the date; overlapping slots are
    // flagged, never dropped.
    for appointment in existing_appointments {
        if !appointment.status.blocks_slot() || appointment.start.date() != date {
            continue;
        }
        let booked_start = minutes_since_midnight(appointment.start.time());
        let booked_end = booked_start + appointment.duration_minutes;
        for slot in &mut slots {
            let slot_start = minutes_since_midnight(slot.time);
            if intervals_overlap(
                slot_start,
                slot_start + service_duration,
                booked_start,
                booked_end,
            ) {
                slot.available = false;
            }
        }
    }

    slots
}

/// Whether a proposed booking `[start, start + duration)` on `date`
/// collides with any non-cancelled appointment. The same overlap rule the
/// slot generator applies, exposed for the write path.
pub fn booking_conflict(
    existing_appointments: &[Appointment],
    date: NaiveDate,
    start: NaiveTime,
    duration_minutes: i64,
) -> bool {
    let candidate_start = minutes_since_midnight(start);
    let candidate_end = candidate_start + duration_minutes;
    existing_appointments.iter().any(|appointment| {
        if !appointment.status.blocks_slot() || appointment.start.date() != date {
            return false;
        }
        let booked_start = minutes_since_midnight(appointment.start.time());
        intervals_overlap(
            candidate_start,
            candidate_end,
            booked_start,
            booked_start + appointment.duration_minutes,
        )
    })
}

/// Whether the business's daily appointment cap is already reached.
/// `max_daily_appointments == 0` means unlimited.
pub fn daily_cap_reached(settings: &AppointmentSettings, existing_appointments: &[Appointment]) -> bool {
    if settings.max_daily_appointments == 0 {
        return false;
    }
    let booked = existing_appointments
        .iter()
        .filter(|a| a.status.blocks_slot())
        .count();
    booked >= settings.max_daily_appointments as usize
}
