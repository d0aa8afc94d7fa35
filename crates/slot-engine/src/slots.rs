//! Fixed-length bookable slots carved out of free intervals.

use chrono::{Duration, NaiveDate};
use serde::{Deserialize, Serialize};

use crate::availability::available_with_buffer;
use crate::booking::Booking;
use crate::error::{Result, SlotError};
use crate::interval::FreeInterval;
use crate::schedule::AvailabilitySchedule;

/// How free time is cut into bookable slots.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct SlotOptions {
    /// Length of each appointment.
    pub duration_minutes: i64,
    /// Distance between consecutive candidate start times.
    pub step_minutes: i64,
    /// Gap kept free before and after every existing booking.
    #[serde(default)]
    pub buffer_minutes: i64,
}

impl Default for SlotOptions {
    fn default() -> Self {
        Self {
            duration_minutes: 60,
            step_minutes: 60,
            buffer_minutes: 0,
        }
    }
}

/// Upper bound for every option: one day.
const MAX_MINUTES: i64 = 24 * 60;

impl SlotOptions {
    /// Duration and step must be positive, buffer non-negative, and none may
    /// exceed one day.
    pub fn validate(&self) -> Result<()> {
        if self.duration_minutes <= 0 {
            return Err(SlotError::InvalidDuration(format!(
                "slot duration must be positive, got {} minutes",
                self.duration_minutes
            )));
        }
        if self.step_minutes <= 0 {
            return Err(SlotError::InvalidDuration(format!(
                "slot step must be positive, got {} minutes",
                self.step_minutes
            )));
        }
        if self.buffer_minutes < 0 {
            return Err(SlotError::InvalidDuration(format!(
                "buffer must not be negative, got {} minutes",
                self.buffer_minutes
            )));
        }
        for (name, minutes) in [
            ("slot duration", self.duration_minutes),
            ("slot step", self.step_minutes),
            ("buffer", self.buffer_minutes),
        ] {
            if minutes > MAX_MINUTES {
                return Err(SlotError::InvalidDuration(format!(
                    "{} must not exceed {} minutes, got {}",
                    name, MAX_MINUTES, minutes
                )));
            }
        }
        Ok(())
    }
}

/// Bookable slots on `date`, sorted by start.
///
/// Each free interval is walked from its own start in `step` increments;
/// a candidate `[t, t + duration)` is kept while it fits inside the interval.
pub fn bookable_slots(
    schedule: &AvailabilitySchedule,
    date: NaiveDate,
    bookings: &[Booking],
    options: &SlotOptions,
) -> Result<Vec<FreeInterval>> {
    options.validate()?;

    let duration = Duration::minutes(options.duration_minutes);
    let step = Duration::minutes(options.step_minutes);
    let buffer = Duration::minutes(options.buffer_minutes);

    let mut slots = Vec::new();
    for free in available_with_buffer(schedule, date, bookings, buffer) {
        let mut cursor = free.start;
        while cursor + duration <= free.end {
            slots.push(FreeInterval::new(cursor, cursor + duration));
            cursor += step;
        }
    }

    Ok(slots)
}

/// The earliest bookable slot between `start_date` and `end_date` inclusive.
pub fn first_bookable_slot(
    schedule: &AvailabilitySchedule,
    start_date: NaiveDate,
    end_date: NaiveDate,
    bookings: &[Booking],
    options: &SlotOptions,
) -> Result<Option<FreeInterval>> {
    if start_date > end_date {
        return Err(SlotError::InvalidRange {
            start: start_date,
            end: end_date,
        });
    }

    for date in start_date.iter_days().take_while(|date| *date <= end_date) {
        if let Some(slot) = bookable_slots(schedule, date, bookings, options)?.into_iter().next() {
            return Ok(Some(slot));
        }
    }

    Ok(None)
}
