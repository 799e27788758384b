#[cfg(test)]
mod tests {
    use crate::logic::generate_slots;
    use crate::time::{intervals_overlap, minutes_since_midnight};
    use chrono::{NaiveDate, NaiveDateTime, NaiveTime};
    use proptest::prelude::*;
    use slotwise_common::models::{
        Appointment, AppointmentSettings, AppointmentStatus, DayHours,
    };

    // Helper function to build a fixed "now" well before the target date
    fn fixed_now() -> NaiveDateTime {
        NaiveDate::from_ymd_opt(2025, 5, 1)
            .unwrap()
            .and_hms_opt(8, 0, 0)
            .unwrap()
    }

    // Helper function to build the target date for slot generation
    fn target_date() -> NaiveDate {
        NaiveDate::from_ymd_opt(2025, 6, 2).unwrap()
    }

    fn day_hours(open_hour: u32, close_hour: u32) -> DayHours {
        DayHours {
            is_open: true,
            open_time: NaiveTime::from_hms_opt(open_hour, 0, 0).unwrap(),
            close_time: NaiveTime::from_hms_opt(close_hour, 0, 0).unwrap(),
        }
    }

    fn settings(slot_duration: i64, buffer_time: i64) -> AppointmentSettings {
        AppointmentSettings {
            slot_duration,
            buffer_time,
            ..AppointmentSettings::default()
        }
    }

    // Helper function to create booked appointments at hourly offsets
    fn bookings(starts: &[(u32, u32)], duration: i64, status: AppointmentStatus) -> Vec<Appointment> {
        starts
            .iter()
            .enumerate()
            .map(|(i, &(hour, minute))| Appointment {
                id: format!("appt-{i}"),
                staff_id: None,
                start: target_date().and_time(NaiveTime::from_hms_opt(hour, minute, 0).unwrap()),
                duration_minutes: duration,
                status,
                customer_name: None,
            })
            .collect()
    }

    proptest! {
        // Every emitted slot fits the full service plus buffer before closing
        #[test]
        fn test_slots_fit_within_working_hours(
            slot_duration in 5..120i64,
            buffer_time in 0..30i64,
            service_duration in 5..180i64,
            open_hour in 0..12u32,
            close_hour in 13..24u32,
        ) {
            let hours = day_hours(open_hour, close_hour);
            let slots = generate_slots(
                target_date(),
                fixed_now(),
                &settings(slot_duration, buffer_time),
                &hours,
                service_duration,
                30,
                None,
                &[],
            );

            let open = minutes_since_midnight(hours.open_time);
            let close = minutes_since_midnight(hours.close_time);
            for slot in &slots {
                let start = minutes_since_midnight(slot.time);
                prop_assert!(start >= open,
                    "Slot should start at or after opening: {:?}", slot.time);
                prop_assert!(start + service_duration + buffer_time <= close,
                    "Slot plus service and buffer should end by closing: {:?}", slot.time);
            }
        }

        // Slots are chronological and spaced exactly one slot_duration apart
        #[test]
        fn test_slots_are_ordered_and_stepped(
            slot_duration in 5..120i64,
            service_duration in 5..120i64,
        ) {
            let slots = generate_slots(
                target_date(),
                fixed_now(),
                &settings(slot_duration, 0),
                &day_hours(9, 18),
                service_duration,
                30,
                None,
                &[],
            );

            for pair in slots.windows(2) {
                let prev = minutes_since_midnight(pair[0].time);
                let curr = minutes_since_midnight(pair[1].time);
                prop_assert_eq!(curr - prev, slot_duration,
                    "Slots should be exactly one step apart");
            }
        }

        // Identical inputs always produce identical output
        #[test]
        fn test_generate_slots_is_pure(
            slot_duration in 5..120i64,
            service_duration in 5..120i64,
            booked_hour in 9..17u32,
        ) {
            let existing = bookings(&[(booked_hour, 0)], 60, AppointmentStatus::Confirmed);
            let first = generate_slots(
                target_date(),
                fixed_now(),
                &settings(slot_duration, 0),
                &day_hours(9, 18),
                service_duration,
                30,
                None,
                &existing,
            );
            let second = generate_slots(
                target_date(),
                fixed_now(),
                &settings(slot_duration, 0),
                &day_hours(9, 18),
                service_duration,
                30,
                None,
                &existing,
            );
            prop_assert_eq!(first, second);
        }

        // Every slot flagged available is genuinely free of blocking bookings
        #[test]
        fn test_available_slots_do_not_overlap_bookings(
            slot_duration in 5..60i64,
            service_duration in 5..90i64,
            booked_hour in 9..17u32,
            booked_minute in prop::sample::select(vec![0u32, 15, 30, 45]),
            booked_duration in 15..120i64,
        ) {
            let existing = bookings(
                &[(booked_hour, booked_minute)],
                booked_duration,
                AppointmentStatus::Confirmed,
            );
            let slots = generate_slots(
                target_date(),
                fixed_now(),
                &settings(slot_duration, 0),
                &day_hours(9, 18),
                service_duration,
                30,
                None,
                &existing,
            );

            let booked_start =
                i64::from(booked_hour) * 60 + i64::from(booked_minute);
            let booked_end = booked_start + booked_duration;
            for slot in slots.iter().filter(|s| s.available) {
                let start = minutes_since_midnight(slot.time);
                prop_assert!(
                    !intervals_overlap(start, start + service_duration, booked_start, booked_end),
                    "Available slot {:?} overlaps a confirmed booking", slot.time
                );
            }
        }

        // Cancelled bookings never change the result
        #[test]
        fn test_cancelled_bookings_are_transparent(
            slot_duration in 5..60i64,
            service_duration in 5..90i64,
            booked_hour in 9..17u32,
        ) {
            let cancelled = bookings(&[(booked_hour, 0)], 60, AppointmentStatus::Cancelled);
            let with_cancelled = generate_slots(
                target_date(),
                fixed_now(),
                &settings(slot_duration, 0),
                &day_hours(9, 18),
                service_duration,
                30,
                None,
                &cancelled,
            );
            let without = generate_slots(
                target_date(),
                fixed_now(),
                &settings(slot_duration, 0),
                &day_hours(9, 18),
                service_duration,
                30,
                None,
                &[],
            );
            prop_assert_eq!(with_cancelled, without);
        }
    }
}
