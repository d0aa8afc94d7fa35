//! Per-date free-interval computation.
//!
//! Expands a provider's schedule for a date (weekly slots plus one-off date
//! windows, minus unavailable dates) and removes the time consumed by existing
//! bookings. This module is the single place where "can this slot be booked?"
//! is answered.

use chrono::{Duration, NaiveDate, NaiveDateTime};
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::booking::Booking;
use crate::error::{Result, SlotError};
use crate::interval::{subtract_intervals, FreeInterval, TimeSlot};
use crate::schedule::AvailabilitySchedule;
use crate::zone::{self, DstPolicy, UtcInterval};

/// Free intervals for one date.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DateAvailability {
    pub date: NaiveDate,
    /// Sorted, non-overlapping, non-adjacent free intervals.
    pub free: Vec<FreeInterval>,
}

/// Compute the free intervals on `date`.
///
/// Bookings are clipped to the date, so a booking that runs past midnight
/// only removes its portion on each side. Cancelled bookings are ignored.
pub fn available_intervals(
    schedule: &AvailabilitySchedule,
    date: NaiveDate,
    bookings: &[Booking],
) -> Vec<FreeInterval> {
    available_with_buffer(schedule, date, bookings, Duration::zero())
}

/// Like [`available_intervals`], with every booking widened by `buffer` on
/// both sides before it is removed.
pub(crate) fn available_with_buffer(
    schedule: &AvailabilitySchedule,
    date: NaiveDate,
    bookings: &[Booking],
    buffer: Duration,
) -> Vec<FreeInterval> {
    let offered = schedule.intervals_on(date);
    if offered.is_empty() {
        debug!(%date, "no availability offered");
        return Vec::new();
    }

    let (day_start, day_end) = day_bounds(date);
    let busy: Vec<(NaiveDateTime, NaiveDateTime)> = bookings
        .iter()
        .filter(|booking| booking.blocks_time())
        .map(|booking| booking.padded(buffer))
        .filter(|(start, end)| *start < day_end && *end > day_start)
        .map(|(start, end)| (start.max(day_start), end.min(day_end)))
        .collect();

    let free: Vec<FreeInterval> = subtract_intervals(offered, busy)
        .into_iter()
        .map(FreeInterval::from)
        .collect();

    debug!(%date, free = free.len(), "computed free intervals");
    free
}

/// Compute free intervals for every date from `start_date` through `end_date`.
///
/// Dates without free time are included with an empty list.
pub fn available_range(
    schedule: &AvailabilitySchedule,
    start_date: NaiveDate,
    end_date: NaiveDate,
    bookings: &[Booking],
) -> Result<Vec<DateAvailability>> {
    if start_date > end_date {
        return Err(SlotError::InvalidRange {
            start: start_date,
            end: end_date,
        });
    }

    Ok(start_date
        .iter_days()
        .take_while(|date| *date <= end_date)
        .map(|date| DateAvailability {
            date,
            free: available_intervals(schedule, date, bookings),
        })
        .collect())
}

/// True iff `slot` on `date` lies entirely inside one free interval.
pub fn check_availability(
    schedule: &AvailabilitySchedule,
    date: NaiveDate,
    slot: TimeSlot,
    bookings: &[Booking],
) -> bool {
    is_free(
        schedule,
        date.and_time(slot.start_time),
        date.and_time(slot.end_time),
        bookings,
    )
}

/// True iff `[start, end)` lies entirely inside one free interval of the
/// start date. Intervals running past midnight are never free.
pub fn is_free(
    schedule: &AvailabilitySchedule,
    start: NaiveDateTime,
    end: NaiveDateTime,
    bookings: &[Booking],
) -> bool {
    if start >= end {
        return false;
    }
    available_intervals(schedule, start.date(), bookings)
        .iter()
        .any(|free| free.contains(start, end))
}

/// Express free intervals in UTC using the schedule's timezone.
///
/// Intervals whose endpoints are dropped by the DST policy are omitted.
pub fn to_utc(
    schedule: &AvailabilitySchedule,
    intervals: &[FreeInterval],
    policy: DstPolicy,
) -> Result<Vec<UtcInterval>> {
    let tz = schedule.tz()?;
    Ok(intervals
        .iter()
        .filter_map(|interval| zone::to_utc(interval.start, interval.end, tz, policy))
        .collect())
}

fn day_bounds(date: NaiveDate) -> (NaiveDateTime, NaiveDateTime) {
    let start = date.and_time(chrono::NaiveTime::MIN);
    (start, start + Duration::days(1))
}
