#[cfg(test)]
mod tests {
    use crate::logic::{
        booking_conflict, daily_cap_reached, generate_slots, is_date_selectable,
        is_staff_available, resolve_settings, resolve_working_hours,
    };
    use crate::time::minutes_since_midnight;
    use chrono::{Duration, NaiveDate, NaiveDateTime, NaiveTime, Weekday};
    use slotwise_common::models::{
        Appointment, AppointmentSettings, AppointmentSettingsOverrides, AppointmentStatus,
        Business, DayHours, LeaveStatus, LeaveType, Staff, StaffLeave, WorkingHoursEntry,
    };

    fn t(hour: u32, minute: u32) -> NaiveTime {
        NaiveTime::from_hms_opt(hour, minute, 0).unwrap()
    }

    fn date(year: i32, month: u32, day: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(year, month, day).unwrap()
    }

    fn at(d: NaiveDate, hour: u32, minute: u32) -> NaiveDateTime {
        d.and_time(t(hour, minute))
    }

    // Monday, May 5 2025: a fixed working day for deterministic tests.
    fn monday() -> NaiveDate {
        date(2025, 5, 5)
    }

    fn business() -> Business {
        Business {
            id: "biz-1".to_string(),
            name: "Test Salon".to_string(),
            appointment_settings: None,
            working_hours: Vec::new(),
        }
    }

    fn hours(open: NaiveTime, close: NaiveTime) -> DayHours {
        DayHours {
            is_open: true,
            open_time: open,
            close_time: close,
        }
    }

    fn appointment(
        d: NaiveDate,
        start: NaiveTime,
        duration_minutes: i64,
        status: AppointmentStatus,
    ) -> Appointment {
        Appointment {
            id: "appt-1".to_string(),
            staff_id: None,
            start: d.and_time(start),
            duration_minutes,
            status,
            customer_name: None,
        }
    }

    fn staff_with_leaves(leaves: Vec<StaffLeave>) -> Staff {
        Staff {
            id: "staff-1".to_string(),
            name: "Alex".to_string(),
            leaves,
        }
    }

    fn leave(
        start_date: NaiveDate,
        end_date: NaiveDate,
        leave_type: LeaveType,
        status: LeaveStatus,
    ) -> StaffLeave {
        StaffLeave {
            start_date,
            end_date,
            start_time: None,
            end_time: None,
            leave_type,
            status,
        }
    }

    #[test]
    fn test_resolve_settings_defaults_when_unconfigured() {
        let settings = resolve_settings(&business());
        assert_eq!(settings, AppointmentSettings::default());
        assert_eq!(settings.slot_duration, 30);
        assert_eq!(settings.buffer_time, 0);
        assert_eq!(settings.max_advance_booking, 30);
        assert_eq!(settings.min_advance_booking, 2);
        assert!(settings.allow_same_day_booking);
        assert_eq!(settings.max_daily_appointments, 0);
        assert!(settings.auto_confirmation);
    }

    #[test]
    fn test_resolve_settings_merges_field_by_field() {
        let mut biz = business();
        biz.appointment_settings = Some(AppointmentSettingsOverrides {
            slot_duration: Some(60),
            allow_same_day_booking: Some(false),
            ..Default::default()
        });
        let settings = resolve_settings(&biz);
        // Configured fields are kept
        assert_eq!(settings.slot_duration, 60);
        assert!(!settings.allow_same_day_booking);
        // Missing fields still default
        assert_eq!(settings.buffer_time, 0);
        assert_eq!(settings.min_advance_booking, 2);
        assert_eq!(settings.max_daily_appointments, 0);
    }

    #[test]
    fn test_resolve_working_hours_uses_configured_entry() {
        let mut biz = business();
        // day_of_week 0 is Sunday
        biz.working_hours.push(WorkingHoursEntry {
            day_of_week: 0,
            is_open: false,
            open_time: t(9, 0),
            close_time: t(18, 0),
        });
        biz.working_hours.push(WorkingHoursEntry {
            day_of_week: 1,
            is_open: true,
            open_time: t(8, 0),
            close_time: t(16, 30),
        });

        let sunday = resolve_working_hours(&biz, Weekday::Sun);
        assert!(!sunday.is_open);

        let monday = resolve_working_hours(&biz, Weekday::Mon);
        assert!(monday.is_open);
        assert_eq!(monday.open_time, t(8, 0));
        assert_eq!(monday.close_time, t(16, 30));

        // Missing weekday entries default to open 09:00-18:00
        let tuesday = resolve_working_hours(&biz, Weekday::Tue);
        assert!(tuesday.is_open);
        assert_eq!(tuesday.open_time, t(9, 0));
        assert_eq!(tuesday.close_time, t(18, 0));
    }

    #[test]
    fn test_closed_day_yields_no_slots() {
        let day_hours = DayHours {
            is_open: false,
            open_time: t(9, 0),
            close_time: t(18, 0),
        };
        let slots = generate_slots(
            monday(),
            at(date(2025, 5, 1), 8, 0),
            &AppointmentSettings::default(),
            &day_hours,
            30,
            30,
            None,
            &[],
        );
        assert!(slots.is_empty(), "Closed day should yield no slots");
    }

    #[test]
    fn test_service_fit_invariant() {
        let settings = AppointmentSettings {
            slot_duration: 30,
            buffer_time: 15,
            ..AppointmentSettings::default()
        };
        let day_hours = hours(t(9, 0), t(18, 0));
        let service_duration = 50;
        let slots = generate_slots(
            monday(),
            at(date(2025, 5, 1), 8, 0),
            &settings,
            &day_hours,
            service_duration,
            30,
            None,
            &[],
        );
        assert!(!slots.is_empty());
        let close = minutes_since_midnight(day_hours.close_time);
        for slot in &slots {
            let start = minutes_since_midnight(slot.time);
            assert!(
                start + service_duration + settings.buffer_time <= close,
                "Slot {:?} must fit service plus buffer before closing",
                slot.time
            );
        }
    }

    #[test]
    fn test_overlap_exclusion_boundaries() {
        let settings = AppointmentSettings {
            slot_duration: 15,
            ..AppointmentSettings::default()
        };
        let day_hours = hours(t(9, 0), t(18, 0));
        let existing = vec![appointment(
            monday(),
            t(10, 0),
            30,
            AppointmentStatus::Confirmed,
        )];
        let slots = generate_slots(
            monday(),
            at(date(2025, 5, 1), 8, 0),
            &settings,
            &day_hours,
            30,
            30,
            None,
            &existing,
        );

        let availability_at =
            |time: NaiveTime| slots.iter().find(|s| s.time == time).unwrap().available;

        // [10:15, 10:45) overlaps the booked [10:00, 10:30)
        assert!(!availability_at(t(10, 15)));
        assert!(!availability_at(t(10, 0)));
        // Back-to-back bookings are allowed on both sides
        assert!(availability_at(t(10, 30)));
        assert!(availability_at(t(9, 30)));
    }

    #[test]
    fn test_cancelled_bookings_never_block() {
        let day_hours = hours(t(9, 0), t(18, 0));
        let existing = vec![appointment(
            monday(),
            t(10, 0),
            60,
            AppointmentStatus::Cancelled,
        )];
        let slots = generate_slots(
            monday(),
            at(date(2025, 5, 1), 8, 0),
            &AppointmentSettings::default(),
            &day_hours,
            30,
            30,
            None,
            &existing,
        );
        assert!(
            slots.iter().all(|s| s.available),
            "A cancelled booking must not mark any slot unavailable"
        );
    }

    #[test]
    fn test_full_day_leave_blocks_whole_day() {
        let staff = staff_with_leaves(vec![leave(
            monday(),
            monday(),
            LeaveType::FullDay,
            LeaveStatus::Approved,
        )]);
        assert!(!is_staff_available(&staff, monday(), None));
        assert!(!is_staff_available(&staff, monday(), Some(t(14, 0))));
        // The day before and after are unaffected
        assert!(is_staff_available(&staff, date(2025, 5, 4), None));
        assert!(is_staff_available(&staff, date(2025, 5, 6), None));

        let slots = generate_slots(
            monday(),
            at(date(2025, 5, 1), 8, 0),
            &AppointmentSettings::default(),
            &hours(t(9, 0), t(18, 0)),
            30,
            30,
            Some(&staff),
            &[],
        );
        assert!(slots.is_empty(), "Full-day leave should yield no slots");
    }

    #[test]
    fn test_multi_day_leave_blocks_inclusive_range() {
        let staff = staff_with_leaves(vec![leave(
            date(2025, 5, 5),
            date(2025, 5, 7),
            LeaveType::MultiDay,
            LeaveStatus::Approved,
        )]);
        assert!(!is_staff_available(&staff, date(2025, 5, 5), None));
        assert!(!is_staff_available(&staff, date(2025, 5, 6), None));
        // A leave ending on day D still blocks day D entirely
        assert!(!is_staff_available(&staff, date(2025, 5, 7), Some(t(23, 30))));
        assert!(is_staff_available(&staff, date(2025, 5, 8), None));
    }

    #[test]
    fn test_partial_leave_narrows_not_blocks() {
        let mut partial = leave(monday(), monday(), LeaveType::Partial, LeaveStatus::Approved);
        partial.start_time = Some(t(12, 0));
        partial.end_time = Some(t(13, 0));
        let staff = staff_with_leaves(vec![partial]);

        // Date-level check without a time treats the day as blocked
        assert!(!is_staff_available(&staff, monday(), None));

        // Time-level checks narrow to the leave window, half-open at the end
        assert!(is_staff_available(&staff, monday(), Some(t(11, 30))));
        assert!(!is_staff_available(&staff, monday(), Some(t(12, 0))));
        assert!(!is_staff_available(&staff, monday(), Some(t(12, 59))));
        assert!(is_staff_available(&staff, monday(), Some(t(13, 0))));

        // The slot generator narrows instead of suppressing the day
        let slots = generate_slots(
            monday(),
            at(date(2025, 5, 1), 8, 0),
            &AppointmentSettings::default(),
            &hours(t(9, 0), t(18, 0)),
            30,
            30,
            Some(&staff),
            &[],
        );
        let availability_at =
            |time: NaiveTime| slots.iter().find(|s| s.time == time).unwrap().available;
        assert!(availability_at(t(11, 30)));
        assert!(!availability_at(t(12, 0)));
        assert!(!availability_at(t(12, 30)));
        assert!(availability_at(t(13, 0)));
    }

    #[test]
    fn test_partial_leave_without_times_blocks_day() {
        let staff = staff_with_leaves(vec![leave(
            monday(),
            monday(),
            LeaveType::Partial,
            LeaveStatus::Approved,
        )]);
        assert!(!is_staff_available(&staff, monday(), Some(t(10, 0))));
    }

    #[test]
    fn test_unapproved_leaves_are_ignored() {
        let staff = staff_with_leaves(vec![
            leave(monday(), monday(), LeaveType::FullDay, LeaveStatus::Pending),
            leave(monday(), monday(), LeaveType::FullDay, LeaveStatus::Rejected),
        ]);
        assert!(is_staff_available(&staff, monday(), None));
        assert!(is_staff_available(&staff, monday(), Some(t(10, 0))));
    }

    #[test]
    fn test_past_date_is_not_selectable() {
        let now = at(monday(), 9, 0);
        let settings = AppointmentSettings::default();
        assert!(!is_date_selectable(
            date(2025, 5, 4),
            None,
            now,
            &settings,
            &business(),
            None
        ));
    }

    #[test]
    fn test_same_day_policy_gate() {
        let now = at(monday(), 9, 0);
        let settings = AppointmentSettings {
            allow_same_day_booking: false,
            ..AppointmentSettings::default()
        };
        assert!(!is_date_selectable(
            monday(),
            Some(t(16, 0)),
            now,
            &settings,
            &business(),
            None
        ));
        // Tomorrow is unaffected by the same-day policy
        assert!(is_date_selectable(
            date(2025, 5, 6),
            None,
            now,
            &settings,
            &business(),
            None
        ));
    }

    #[test]
    fn test_min_advance_gate_uses_full_timestamp() {
        let now = at(monday(), 9, 0);
        let settings = AppointmentSettings::default(); // min_advance_booking = 2 hours

        // 10:30 is only 90 minutes away
        assert!(!is_date_selectable(
            monday(),
            Some(t(10, 30)),
            now,
            &settings,
            &business(),
            None
        ));
        // 11:00 is exactly 2 hours away and passes
        assert!(is_date_selectable(
            monday(),
            Some(t(11, 0)),
            now,
            &settings,
            &business(),
            None
        ));
    }

    #[test]
    fn test_date_only_lead_time_uses_end_of_day() {
        let settings = AppointmentSettings::default();
        // At 21:00 the end of day is still almost 3 hours out
        assert!(is_date_selectable(
            monday(),
            None,
            at(monday(), 21, 0),
            &settings,
            &business(),
            None
        ));
        // At 22:30 even the end of day is inside the 2-hour lead window
        assert!(!is_date_selectable(
            monday(),
            None,
            at(monday(), 22, 30),
            &settings,
            &business(),
            None
        ));
    }

    #[test]
    fn test_max_advance_gate() {
        let now = at(monday(), 9, 0);
        let settings = AppointmentSettings::default(); // max_advance_booking = 30 days
        let last_allowed = monday() + Duration::days(30);
        let too_far = monday() + Duration::days(31);
        assert!(is_date_selectable(
            last_allowed,
            None,
            now,
            &settings,
            &business(),
            None
        ));
        assert!(!is_date_selectable(
            too_far,
            None,
            now,
            &settings,
            &business(),
            None
        ));
    }

    #[test]
    fn test_closed_weekday_is_not_selectable() {
        let mut biz = business();
        biz.working_hours.push(WorkingHoursEntry {
            day_of_week: 1, // Monday
            is_open: false,
            open_time: t(9, 0),
            close_time: t(18, 0),
        });
        let now = at(date(2025, 5, 1), 9, 0);
        assert!(!is_date_selectable(
            monday(),
            None,
            now,
            &AppointmentSettings::default(),
            &biz,
            None
        ));
    }

    #[test]
    fn test_staff_leave_gates_date_selection() {
        let staff = staff_with_leaves(vec![leave(
            monday(),
            monday(),
            LeaveType::FullDay,
            LeaveStatus::Approved,
        )]);
        let now = at(date(2025, 5, 1), 9, 0);
        assert!(!is_date_selectable(
            monday(),
            None,
            now,
            &AppointmentSettings::default(),
            &business(),
            Some(&staff)
        ));
        // Without a staff argument leave checks are skipped entirely
        assert!(is_date_selectable(
            monday(),
            None,
            now,
            &AppointmentSettings::default(),
            &business(),
            None
        ));
    }

    #[test]
    fn test_same_day_start_rounds_onto_slot_grid() {
        let settings = AppointmentSettings::default(); // 30-minute slots
        let day_hours = hours(t(9, 0), t(18, 0));
        // 10:10 + 30 minutes preparation = 10:40, rounded up to 11:00
        let slots = generate_slots(
            monday(),
            at(monday(), 10, 10),
            &settings,
            &day_hours,
            30,
            30,
            None,
            &[],
        );
        assert_eq!(slots.first().map(|s| s.time), Some(t(11, 0)));

        // On a future date the iteration starts at the opening time
        let slots = generate_slots(
            monday(),
            at(date(2025, 5, 1), 10, 10),
            &settings,
            &day_hours,
            30,
            30,
            None,
            &[],
        );
        assert_eq!(slots.first().map(|s| s.time), Some(t(9, 0)));
    }

    #[test]
    fn test_same_day_prep_before_opening_keeps_open_start() {
        let settings = AppointmentSettings::default();
        let day_hours = hours(t(9, 0), t(18, 0));
        // 07:00 + 30 minutes is still before opening; start stays at 09:00
        let slots = generate_slots(
            monday(),
            at(monday(), 7, 0),
            &settings,
            &day_hours,
            30,
            30,
            None,
            &[],
        );
        assert_eq!(slots.first().map(|s| s.time), Some(t(9, 0)));
    }

    #[test]
    fn test_hourly_scenario_with_existing_booking() {
        // Business open 09:00-18:00, 60-minute slots, no buffer, one
        // CONFIRMED appointment 09:00-10:00, requesting a 60-minute service.
        let settings = AppointmentSettings {
            slot_duration: 60,
            ..AppointmentSettings::default()
        };
        let day_hours = hours(t(9, 0), t(18, 0));
        let existing = vec![appointment(
            monday(),
            t(9, 0),
            60,
            AppointmentStatus::Confirmed,
        )];
        let slots = generate_slots(
            monday(),
            at(date(2025, 5, 1), 8, 0),
            &settings,
            &day_hours,
            60,
            30,
            None,
            &existing,
        );

        // 09:00 through 17:00, nine slots; 17:00 ends exactly at close
        assert_eq!(slots.len(), 9);
        assert_eq!(slots[0].time, t(9, 0));
        assert!(!slots[0].available);
        assert_eq!(slots.last().unwrap().time, t(17, 0));
        assert!(slots[1..].iter().all(|s| s.available));
    }

    #[test]
    fn test_generate_slots_is_idempotent() {
        let settings = AppointmentSettings::default();
        let day_hours = hours(t(9, 0), t(18, 0));
        let existing = vec![appointment(
            monday(),
            t(11, 0),
            30,
            AppointmentStatus::Pending,
        )];
        let first = generate_slots(
            monday(),
            at(date(2025, 5, 1), 8, 0),
            &settings,
            &day_hours,
            30,
            30,
            None,
            &existing,
        );
        let second = generate_slots(
            monday(),
            at(date(2025, 5, 1), 8, 0),
            &settings,
            &day_hours,
            30,
            30,
            None,
            &existing,
        );
        assert_eq!(first, second);
    }

    #[test]
    fn test_booking_conflict_boundaries() {
        let existing = vec![appointment(
            monday(),
            t(10, 0),
            30,
            AppointmentStatus::Confirmed,
        )];
        assert!(booking_conflict(&existing, monday(), t(10, 15), 30));
        // Back-to-back on both sides is allowed
        assert!(!booking_conflict(&existing, monday(), t(10, 30), 30));
        assert!(!booking_conflict(&existing, monday(), t(9, 30), 30));
        // Other dates never conflict
        assert!(!booking_conflict(&existing, date(2025, 5, 6), t(10, 0), 30));

        let cancelled = vec![appointment(
            monday(),
            t(10, 0),
            30,
            AppointmentStatus::Cancelled,
        )];
        assert!(!booking_conflict(&cancelled, monday(), t(10, 0), 30));
    }

    #[test]
    fn test_daily_cap() {
        let mut settings = AppointmentSettings {
            max_daily_appointments: 0,
            ..AppointmentSettings::default()
        };
        let booked = vec![
            appointment(monday(), t(9, 0), 30, AppointmentStatus::Confirmed),
            appointment(monday(), t(10, 0), 30, AppointmentStatus::Pending),
            appointment(monday(), t(11, 0), 30, AppointmentStatus::Cancelled),
        ];
        // 0 means unlimited
        assert!(!daily_cap_reached(&settings, &booked));

        settings.max_daily_appointments = 2;
        // Cancelled appointments do not count towards the cap
        assert!(daily_cap_reached(&settings, &booked));

        settings.max_daily_appointments = 3;
        assert!(!daily_cap_reached(&settings, &booked));
    }
}
