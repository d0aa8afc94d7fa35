//! Tests for the recurring weekly availability store.

use chrono::{NaiveTime, Weekday};
use slot_engine::weekly::{weekday_from_index, weekday_index};
use slot_engine::{AvailabilityRow, DayAvailability, SlotError, TimeSlot, WeeklyAvailability};

fn slot(start: &str, end: &str) -> TimeSlot {
    TimeSlot::parse(start, end).unwrap()
}

fn row(day: u8, start: &str, end: &str) -> AvailabilityRow {
    let s = slot(start, end);
    AvailabilityRow {
        day_of_week: day,
        start_time: s.start_time,
        end_time: s.end_time,
    }
}

#[test]
fn day_index_zero_is_sunday() {
    assert_eq!(weekday_from_index(0).unwrap(), Weekday::Sun);
    assert_eq!(weekday_from_index(1).unwrap(), Weekday::Mon);
    assert_eq!(weekday_from_index(6).unwrap(), Weekday::Sat);
    assert_eq!(weekday_index(Weekday::Sun), 0);
    assert_eq!(weekday_index(Weekday::Sat), 6);
    assert_eq!(weekday_from_index(7), Err(SlotError::InvalidDay(7)));
}

#[test]
fn add_slot_keeps_day_sorted() {
    let mut weekly = WeeklyAvailability::new();
    weekly.add_slot(1, slot("13:00", "17:00")).unwrap();
    weekly.add_slot(1, slot("09:00", "12:00")).unwrap();

    assert_eq!(
        weekly.day(Weekday::Mon),
        &[slot("09:00", "12:00"), slot("13:00", "17:00")]
    );
    assert!(weekly.day(Weekday::Tue).is_empty());
}

#[test]
fn add_slot_rejects_overlap_but_accepts_adjacent() {
    let mut weekly = WeeklyAvailability::new();
    weekly.add_slot(2, slot("09:00", "12:00")).unwrap();

    let err = weekly.add_slot(2, slot("11:00", "13:00")).unwrap_err();
    assert_eq!(
        err,
        SlotError::OverlappingSlot {
            day: 2,
            start: NaiveTime::from_hms_opt(11, 0, 0).unwrap(),
            end: NaiveTime::from_hms_opt(13, 0, 0).unwrap(),
        }
    );

    // Enclosing an existing slot is also an overlap.
    assert!(weekly.add_slot(2, slot("08:00", "18:00")).is_err());

    weekly.add_slot(2, slot("12:00", "13:00")).unwrap();
    assert_eq!(weekly.day(Weekday::Tue).len(), 2);
}

#[test]
fn add_slot_rejects_invalid_day() {
    let mut weekly = WeeklyAvailability::new();
    assert_eq!(
        weekly.add_slot(9, slot("09:00", "10:00")),
        Err(SlotError::InvalidDay(9))
    );
}

#[test]
fn remove_slot_by_index() {
    let mut weekly = WeeklyAvailability::new();
    weekly.add_slot(3, slot("09:00", "10:00")).unwrap();
    weekly.add_slot(3, slot("11:00", "12:00")).unwrap();

    assert_eq!(weekly.remove_slot(3, 0), Some(slot("09:00", "10:00")));
    assert_eq!(weekly.remove_slot(3, 5), None);
    assert_eq!(weekly.remove_slot(8, 0), None);
    assert_eq!(weekly.day(Weekday::Wed), &[slot("11:00", "12:00")]);
}

#[test]
fn set_day_replaces_slots() {
    let mut weekly = WeeklyAvailability::new();
    weekly.add_slot(5, slot("09:00", "17:00")).unwrap();

    weekly
        .set_day(DayAvailability {
            day_of_week: 5,
            time_slots: vec![slot("14:00", "16:00"), slot("08:00", "10:00")],
        })
        .unwrap();

    assert_eq!(
        weekly.day(Weekday::Fri),
        &[slot("08:00", "10:00"), slot("14:00", "16:00")]
    );
}

#[test]
fn set_day_with_overlap_leaves_previous_slots() {
    let mut weekly = WeeklyAvailability::new();
    weekly.add_slot(5, slot("09:00", "17:00")).unwrap();

    let result = weekly.set_day(DayAvailability {
        day_of_week: 5,
        time_slots: vec![slot("08:00", "10:00"), slot("09:30", "11:00")],
    });

    assert!(matches!(result, Err(SlotError::OverlappingSlot { day: 5, .. })));
    assert_eq!(weekly.day(Weekday::Fri), &[slot("09:00", "17:00")]);
}

#[test]
fn inverted_slot_literal_is_rejected() {
    let inverted = TimeSlot {
        start_time: NaiveTime::from_hms_opt(12, 0, 0).unwrap(),
        end_time: NaiveTime::from_hms_opt(9, 0, 0).unwrap(),
    };
    let mut weekly = WeeklyAvailability::new();

    assert!(matches!(
        weekly.add_slot(1, inverted),
        Err(SlotError::EmptyInterval { .. })
    ));
    assert!(matches!(
        weekly.set_day(DayAvailability {
            day_of_week: 1,
            time_slots: vec![inverted],
        }),
        Err(SlotError::EmptyInterval { .. })
    ));
    assert!(weekly.is_empty());
}

#[test]
fn set_day_with_no_slots_clears_the_day() {
    let mut weekly = WeeklyAvailability::new();
    weekly.add_slot(0, slot("09:00", "17:00")).unwrap();
    weekly
        .set_day(DayAvailability {
            day_of_week: 0,
            time_slots: vec![],
        })
        .unwrap();
    assert!(weekly.is_empty());
}

#[test]
fn from_rows_groups_by_day_and_skips_bad_rows() {
    let bad_range = AvailabilityRow {
        day_of_week: 4,
        start_time: NaiveTime::from_hms_opt(17, 0, 0).unwrap(),
        end_time: NaiveTime::from_hms_opt(9, 0, 0).unwrap(),
    };
    let weekly = WeeklyAvailability::from_rows(vec![
        row(1, "13:00", "17:00"),
        row(1, "09:00", "12:00"),
        row(3, "10:00", "14:00"),
        row(9, "10:00", "14:00"),
        bad_range,
    ]);

    assert_eq!(
        weekly.day(Weekday::Mon),
        &[slot("09:00", "12:00"), slot("13:00", "17:00")]
    );
    assert_eq!(weekly.day(Weekday::Wed), &[slot("10:00", "14:00")]);
    assert!(weekly.day(Weekday::Thu).is_empty());
    assert_eq!(weekly.to_rows().len(), 3);
}

#[test]
fn from_rows_tolerates_overlapping_stored_rows() {
    let weekly = WeeklyAvailability::from_rows(vec![row(1, "09:00", "12:00"), row(1, "11:00", "14:00")]);
    assert_eq!(weekly.day(Weekday::Mon).len(), 2);
}

#[test]
fn days_lists_all_seven_days() {
    let mut weekly = WeeklyAvailability::new();
    weekly.add_slot(6, slot("10:00", "14:00")).unwrap();

    let days = weekly.days();
    assert_eq!(days.len(), 7);
    assert_eq!(days[0].day_of_week, 0);
    assert!(days[0].time_slots.is_empty());
    assert_eq!(days[6].time_slots, vec![slot("10:00", "14:00")]);
}

#[test]
fn deserializes_from_day_list() {
    let json = r#"[
        {"day_of_week": 1, "time_slots": [{"start_time": "09:00", "end_time": "12:00"}]},
        {"day_of_week": 3}
    ]"#;
    let weekly: WeeklyAvailability = serde_json::from_str(json).unwrap();
    assert_eq!(weekly.day(Weekday::Mon), &[slot("09:00", "12:00")]);
    assert!(weekly.day(Weekday::Wed).is_empty());

    let bad = r#"[{"day_of_week": 7, "time_slots": []}]"#;
    assert!(serde_json::from_str::<WeeklyAvailability>(bad).is_err());
}
