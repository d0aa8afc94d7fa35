//! WASM bindings for slot-engine.
//!
//! Exposes free-interval computation, availability checks, bookable slots,
//! recurring booking expansion, and conflict detection to the booking wizard
//! via `wasm-bindgen`. All complex types are passed as JSON strings.
//!
//! ## Build process
//!
//! ```sh
//! cargo build -p slot-engine-wasm --target wasm32-unknown-unknown --release
//! wasm-bindgen --target web --out-dir packages/slot-engine-js/wasm/ \
//!   target/wasm32-unknown-unknown/release/slot_engine_wasm.wasm
//! ```

use chrono::{NaiveDate, NaiveDateTime};
use serde::Serialize;
use slot_engine::{AvailabilitySchedule, Booking, RecurrenceType, SlotOptions, TimeSlot};
use wasm_bindgen::prelude::*;

// ---------------------------------------------------------------------------
// Helpers: parse JSON inputs and serialize outputs
// ---------------------------------------------------------------------------

fn js_err(e: impl std::fmt::Display) -> JsValue {
    JsValue::from_str(&e.to_string())
}

fn parse_schedule(json: &str) -> Result<AvailabilitySchedule, JsValue> {
    AvailabilitySchedule::from_json(json).map_err(js_err)
}

/// An empty string means "no bookings".
fn parse_bookings(json: &str) -> Result<Vec<Booking>, JsValue> {
    if json.trim().is_empty() {
        return Ok(Vec::new());
    }
    serde_json::from_str(json).map_err(|e| JsValue::from_str(&format!("Invalid bookings JSON: {}", e)))
}

fn parse_date(s: &str) -> Result<NaiveDate, JsValue> {
    slot_engine::interval::parse_date(s).map_err(js_err)
}

fn to_json<T: Serialize>(value: &T) -> Result<String, JsValue> {
    serde_json::to_string(value).map_err(|e| JsValue::from_str(&format!("Serialization error: {}", e)))
}

// ---------------------------------------------------------------------------
// WASM exports
// ---------------------------------------------------------------------------

/// Free intervals for each date from `start_date` through `end_date`.
///
/// Returns a JSON array of `{date, free: [{start, end, duration_minutes}]}`.
#[wasm_bindgen(js_name = "availableSlots")]
pub fn available_slots(
    schedule_json: &str,
    bookings_json: &str,
    start_date: &str,
    end_date: &str,
) -> Result<String, JsValue> {
    let schedule = parse_schedule(schedule_json)?;
    let bookings = parse_bookings(bookings_json)?;
    let days = slot_engine::available_range(
        &schedule,
        parse_date(start_date)?,
        parse_date(end_date)?,
        &bookings,
    )
    .map_err(js_err)?;
    to_json(&days)
}

/// Whether `start_time`-`end_time` on `date` can be booked.
#[wasm_bindgen(js_name = "checkAvailability")]
pub fn check_availability(
    schedule_json: &str,
    bookings_json: &str,
    date: &str,
    start_time: &str,
    end_time: &str,
) -> Result<bool, JsValue> {
    let schedule = parse_schedule(schedule_json)?;
    let bookings = parse_bookings(bookings_json)?;
    let slot = TimeSlot::parse(start_time, end_time).map_err(js_err)?;
    Ok(slot_engine::check_availability(
        &schedule,
        parse_date(date)?,
        slot,
        &bookings,
    ))
}

/// Fixed-length bookable slots on `date`.
///
/// Returns a JSON array of `{start, end, duration_minutes}` objects.
#[wasm_bindgen(js_name = "bookableSlots")]
pub fn bookable_slots(
    schedule_json: &str,
    bookings_json: &str,
    date: &str,
    duration_minutes: i32,
    step_minutes: i32,
    buffer_minutes: i32,
) -> Result<String, JsValue> {
    let schedule = parse_schedule(schedule_json)?;
    let bookings = parse_bookings(bookings_json)?;
    let options = SlotOptions {
        duration_minutes: duration_minutes as i64,
        step_minutes: step_minutes as i64,
        buffer_minutes: buffer_minutes as i64,
    };
    let slots = slot_engine::bookable_slots(&schedule, parse_date(date)?, &bookings, &options)
        .map_err(js_err)?;
    to_json(&slots)
}

/// Expand a recurring booking.
///
/// `start` is a local datetime (`2026-03-02T10:00:00`), `recurrence` one of
/// `weekly`, `biweekly`, `monthly`. Returns a JSON array of `{start, end}`.
#[wasm_bindgen(js_name = "expandRecurring")]
pub fn expand_recurring(
    start: &str,
    duration_minutes: u32,
    recurrence: &str,
    occurrences: u32,
    timezone: &str,
) -> Result<String, JsValue> {
    let start = NaiveDateTime::parse_from_str(start, "%Y-%m-%dT%H:%M:%S")
        .map_err(|e| JsValue::from_str(&format!("Invalid datetime '{}': {}", start, e)))?;
    let recurrence: RecurrenceType = recurrence.parse().map_err(js_err)?;
    let expanded =
        slot_engine::expand_recurring(start, duration_minutes, recurrence, occurrences, timezone)
            .map_err(js_err)?;
    to_json(&expanded)
}

/// Find overlaps between existing and proposed bookings.
///
/// Both arguments are JSON arrays of bookings. Returns a JSON array of
/// `{existing, proposed, overlap_minutes}` objects.
#[wasm_bindgen(js_name = "findConflicts")]
pub fn find_conflicts(existing_json: &str, proposed_json: &str) -> Result<String, JsValue> {
    let existing = parse_bookings(existing_json)?;
    let proposed = parse_bookings(proposed_json)?;
    to_json(&slot_engine::find_conflicts(&existing, &proposed))
}
