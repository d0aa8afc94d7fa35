//! Tests for the unavailable-date store.

use chrono::NaiveDate;
use slot_engine::{DateExceptions, UnavailableDate};

fn date(y: i32, m: u32, d: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(y, m, d).unwrap()
}

#[test]
fn add_inserts_new_entry_with_id() {
    let mut exceptions = DateExceptions::new();
    let entry = exceptions.add(date(2026, 3, 16), "Vacation").clone();

    assert_eq!(entry.date, date(2026, 3, 16));
    assert_eq!(entry.reason, "Vacation");
    assert!(uuid::Uuid::parse_str(&entry.id).is_ok());
    assert!(exceptions.is_unavailable(date(2026, 3, 16)));
    assert!(!exceptions.is_unavailable(date(2026, 3, 17)));
}

#[test]
fn add_same_date_updates_reason_and_keeps_id() {
    let mut exceptions = DateExceptions::new();
    let first_id = exceptions.add(date(2026, 3, 16), "Vacation").id.clone();
    let updated = exceptions.add(date(2026, 3, 16), "Training").clone();

    assert_eq!(exceptions.len(), 1);
    assert_eq!(updated.id, first_id);
    assert_eq!(updated.reason, "Training");
    assert_eq!(exceptions.get(date(2026, 3, 16)), Some(&updated));
}

#[test]
fn remove_by_id() {
    let mut exceptions = DateExceptions::new();
    let id = exceptions.add(date(2026, 4, 1), "Holiday").id.clone();
    exceptions.add(date(2026, 4, 2), "Holiday");

    let removed = exceptions.remove(&id).unwrap();
    assert_eq!(removed.date, date(2026, 4, 1));
    assert!(!exceptions.is_unavailable(date(2026, 4, 1)));
    assert!(exceptions.is_unavailable(date(2026, 4, 2)));
    assert_eq!(exceptions.remove("missing"), None);
}

#[test]
fn upcoming_lists_today_and_later_in_date_order() {
    let exceptions: DateExceptions = vec![
        UnavailableDate {
            id: "c".to_string(),
            date: date(2026, 5, 1),
            reason: "Conference".to_string(),
        },
        UnavailableDate {
            id: "a".to_string(),
            date: date(2026, 2, 1),
            reason: "Past".to_string(),
        },
        UnavailableDate {
            id: "b".to_string(),
            date: date(2026, 3, 16),
            reason: "Today".to_string(),
        },
    ]
    .into_iter()
    .collect();

    let upcoming: Vec<&str> = exceptions
        .upcoming(date(2026, 3, 16))
        .iter()
        .map(|entry| entry.id.as_str())
        .collect();
    assert_eq!(upcoming, vec!["b", "c"]);
}

#[test]
fn serializes_as_date_ordered_list() {
    let json = r#"[
        {"id": "2", "date": "2026-06-02", "reason": "Moving"},
        {"id": "1", "date": "2026-06-01"}
    ]"#;
    let exceptions: DateExceptions = serde_json::from_str(json).unwrap();
    assert_eq!(exceptions.len(), 2);
    assert_eq!(exceptions.get(date(2026, 6, 1)).unwrap().reason, "");

    let ids: Vec<&str> = exceptions.iter().map(|entry| entry.id.as_str()).collect();
    assert_eq!(ids, vec!["1", "2"]);
}
