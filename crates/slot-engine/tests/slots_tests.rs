//! Tests for fixed-length bookable slot generation.

use chrono::{NaiveDate, NaiveDateTime, NaiveTime};
use slot_engine::{
    bookable_slots, first_bookable_slot, AvailabilitySchedule, Booking, SlotError, SlotOptions,
    TimeSlot,
};

fn date(y: i32, m: u32, d: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(y, m, d).unwrap()
}

fn at(date: NaiveDate, time: &str) -> NaiveDateTime {
    date.and_time(NaiveTime::parse_from_str(time, "%H:%M").unwrap())
}

fn slot(start: &str, end: &str) -> TimeSlot {
    TimeSlot::parse(start, end).unwrap()
}

/// Mondays and Wednesdays 09:00-12:00 and 13:00-17:00.
fn schedule() -> AvailabilitySchedule {
    let mut schedule = AvailabilitySchedule::default();
    for day in [1, 3] {
        schedule.weekly.add_slot(day, slot("09:00", "12:00")).unwrap();
        schedule.weekly.add_slot(day, slot("13:00", "17:00")).unwrap();
    }
    schedule
}

fn starts(slots: &[slot_engine::FreeInterval]) -> Vec<String> {
    slots
        .iter()
        .map(|s| s.start.format("%H:%M").to_string())
        .collect()
}

#[test]
fn default_options_produce_hourly_slots() {
    let monday = date(2026, 3, 16);
    let slots = bookable_slots(&schedule(), monday, &[], &SlotOptions::default()).unwrap();

    assert_eq!(
        starts(&slots),
        vec!["09:00", "10:00", "11:00", "13:00", "14:00", "15:00", "16:00"]
    );
    assert!(slots.iter().all(|s| s.duration_minutes == 60));
}

#[test]
fn step_shorter_than_duration_produces_overlapping_candidates() {
    let mut schedule = AvailabilitySchedule::default();
    schedule.weekly.add_slot(1, slot("09:00", "12:00")).unwrap();
    let options = SlotOptions {
        duration_minutes: 45,
        step_minutes: 30,
        buffer_minutes: 0,
    };

    let slots = bookable_slots(&schedule, date(2026, 3, 16), &[], &options).unwrap();
    assert_eq!(starts(&slots), vec!["09:00", "09:30", "10:00", "10:30", "11:00"]);
    assert_eq!(slots[4].end, at(date(2026, 3, 16), "11:45"));
}

#[test]
fn slot_longer_than_free_interval_is_never_offered() {
    let options = SlotOptions {
        duration_minutes: 240,
        step_minutes: 30,
        buffer_minutes: 0,
    };
    let slots = bookable_slots(&schedule(), date(2026, 3, 16), &[], &options).unwrap();
    assert_eq!(starts(&slots), vec!["13:00"]);
}

#[test]
fn buffer_keeps_gap_around_existing_bookings() {
    let monday = date(2026, 3, 16);
    let bookings = vec![Booking::on(monday, slot("10:00", "11:00"))];
    let options = SlotOptions {
        duration_minutes: 30,
        step_minutes: 15,
        buffer_minutes: 15,
    };

    let slots = bookable_slots(&schedule(), monday, &bookings, &options).unwrap();
    let morning: Vec<String> = starts(&slots)
        .into_iter()
        .filter(|s| s.as_str() < "12:00")
        .collect();

    // Free after buffering: 09:00-09:45 and 11:15-12:00.
    assert_eq!(morning, vec!["09:00", "09:15", "11:15", "11:30"]);
}

#[test]
fn unavailable_date_has_no_slots() {
    let mut schedule = schedule();
    schedule.exceptions.add(date(2026, 3, 16), "Holiday");
    let slots = bookable_slots(&schedule, date(2026, 3, 16), &[], &SlotOptions::default()).unwrap();
    assert!(slots.is_empty());
}

#[test]
fn invalid_options_are_rejected() {
    let monday = date(2026, 3, 16);
    for options in [
        SlotOptions {
            duration_minutes: 0,
            ..SlotOptions::default()
        },
        SlotOptions {
            step_minutes: -15,
            ..SlotOptions::default()
        },
        SlotOptions {
            buffer_minutes: -1,
            ..SlotOptions::default()
        },
        SlotOptions {
            duration_minutes: i64::MAX,
            ..SlotOptions::default()
        },
        SlotOptions {
            step_minutes: 24 * 60 + 1,
            ..SlotOptions::default()
        },
        SlotOptions {
            buffer_minutes: i64::MAX,
            ..SlotOptions::default()
        },
    ] {
        assert!(matches!(
            bookable_slots(&schedule(), monday, &[], &options),
            Err(SlotError::InvalidDuration(_))
        ));
    }
}

#[test]
fn first_bookable_slot_skips_empty_and_unavailable_dates() {
    let mut schedule = schedule();
    // Sunday 15th has no hours, Monday 16th is blocked, Tuesday 17th has no hours.
    schedule.exceptions.add(date(2026, 3, 16), "Training");

    let first = first_bookable_slot(
        &schedule,
        date(2026, 3, 15),
        date(2026, 3, 22),
        &[],
        &SlotOptions::default(),
    )
    .unwrap()
    .unwrap();

    assert_eq!(first.start, at(date(2026, 3, 18), "09:00"));
    assert_eq!(first.end, at(date(2026, 3, 18), "10:00"));
}

#[test]
fn first_bookable_slot_respects_bookings() {
    let monday = date(2026, 3, 16);
    let bookings = vec![Booking::on(monday, slot("09:00", "10:30"))];

    let first = first_bookable_slot(&schedule(), monday, monday, &bookings, &SlotOptions::default())
        .unwrap()
        .unwrap();
    assert_eq!(first.start, at(monday, "10:30"));
}

#[test]
fn first_bookable_slot_none_when_range_is_empty() {
    let result = first_bookable_slot(
        &schedule(),
        date(2026, 3, 14),
        date(2026, 3, 15),
        &[],
        &SlotOptions::default(),
    )
    .unwrap();
    assert_eq!(result, None);

    assert!(first_bookable_slot(
        &schedule(),
        date(2026, 3, 15),
        date(2026, 3, 14),
        &[],
        &SlotOptions::default()
    )
    .is_err());
}
