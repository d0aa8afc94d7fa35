//! Recurring booking expansion -- converts a weekly, bi-weekly, or monthly
//! booking request into its concrete occurrences.
//!
//! Wraps the `rrule` crate (v0.13). Occurrences keep their wall-clock time in
//! the provider's timezone across DST changes.

use crate::availability::is_free;
use crate::booking::Booking;
use crate::error::{Result, SlotError};
use crate::schedule::{parse_timezone, AvailabilitySchedule};
use chrono::{Datelike, Duration, NaiveDateTime};
use rrule::RRuleSet;
use serde::{Deserialize, Serialize};
use tracing::debug;

/// How often a recurring booking repeats.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum RecurrenceType {
    Weekly,
    Biweekly,
    Monthly,
}

impl RecurrenceType {
    /// The RRULE body for this recurrence starting on `day_of_month`.
    ///
    /// Monthly bookings on the 29th-31st fall back to the last day of shorter
    /// months instead of skipping them.
    fn rule(self, day_of_month: u32) -> String {
        match self {
            RecurrenceType::Weekly => "FREQ=WEEKLY".to_string(),
            RecurrenceType::Biweekly => "FREQ=WEEKLY;INTERVAL=2".to_string(),
            RecurrenceType::Monthly if day_of_month > 28 => {
                let days: Vec<String> = (28..=day_of_month).map(|d| d.to_string()).collect();
                format!("FREQ=MONTHLY;BYMONTHDAY={};BYSETPOS=-1", days.join(","))
            }
            RecurrenceType::Monthly => "FREQ=MONTHLY".to_string(),
        }
    }
}

impl std::str::FromStr for RecurrenceType {
    type Err = SlotError;

    fn from_str(s: &str) -> Result<Self> {
        match s.to_ascii_lowercase().as_str() {
            "weekly" => Ok(RecurrenceType::Weekly),
            "biweekly" | "bi-weekly" => Ok(RecurrenceType::Biweekly),
            "monthly" => Ok(RecurrenceType::Monthly),
            other => Err(SlotError::InvalidRule(format!(
                "unknown recurrence '{}', expected weekly, biweekly or monthly",
                other
            ))),
        }
    }
}

/// One concrete occurrence of a recurring booking, in wall-clock time.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Occurrence {
    pub start: NaiveDateTime,
    pub end: NaiveDateTime,
}

impl Occurrence {
    pub fn to_booking(&self) -> Booking {
        Booking::new(self.start, self.end)
    }
}

/// Expand a recurring booking into `occurrences` concrete instances.
///
/// # Arguments
/// - `start` -- Wall-clock start of the first occurrence
/// - `duration_minutes` -- Length of each occurrence
/// - `recurrence` -- Weekly, bi-weekly or monthly
/// - `occurrences` -- Total number of instances, the first included
/// - `timezone` -- IANA timezone the wall-clock times belong to
///
/// # Errors
/// Returns `SlotError::InvalidTimezone` if the timezone is not a valid IANA identifier.
/// Returns `SlotError::InvalidDuration` if `duration_minutes` is zero.
/// Returns `SlotError::InvalidRule` if the occurrence count is too large or the
/// generated rule fails to parse.
pub fn expand_recurring(
    start: NaiveDateTime,
    duration_minutes: u32,
    recurrence: RecurrenceType,
    occurrences: u32,
    timezone: &str,
) -> Result<Vec<Occurrence>> {
    if duration_minutes == 0 {
        return Err(SlotError::InvalidDuration(
            "recurring booking duration must be positive".to_string(),
        ));
    }

    parse_timezone(timezone)?;

    if occurrences == 0 {
        return Ok(Vec::new());
    }

    let limit = u16::try_from(occurrences).map_err(|_| {
        SlotError::InvalidRule(format!("too many occurrences: {}", occurrences))
    })?;

    let dtstart_ical = start.format("%Y%m%dT%H%M%S");
    let rrule_text = format!(
        "DTSTART;TZID={}:{}\nRRULE:{};COUNT={}",
        timezone,
        dtstart_ical,
        recurrence.rule(start.day()),
        occurrences
    );

    let rrule_set: RRuleSet = rrule_text
        .parse()
        .map_err(|e| SlotError::InvalidRule(format!("{}", e)))?;

    // Only the date comes from the rule. A start time that falls in a DST gap
    // on some date would otherwise be shifted past the gap.
    let duration = Duration::minutes(duration_minutes as i64);
    let expanded: Vec<Occurrence> = rrule_set
        .all(limit)
        .dates
        .into_iter()
        .map(|dt| {
            let local = dt.naive_local().date().and_time(start.time());
            Occurrence {
                start: local,
                end: local + duration,
            }
        })
        .collect();

    debug!(
        ?recurrence,
        requested = occurrences,
        produced = expanded.len(),
        "expanded recurring booking"
    );

    Ok(expanded)
}

/// Pair each occurrence with whether it can be booked against `schedule`.
pub fn check_occurrences(
    schedule: &AvailabilitySchedule,
    occurrences: &[Occurrence],
    bookings: &[Booking],
) -> Vec<(Occurrence, bool)> {
    occurrences
        .iter()
        .map(|occurrence| {
            let free = is_free(schedule, occurrence.start, occurrence.end, bookings);
            (occurrence.clone(), free)
        })
        .collect()
}
