//! A provider's complete availability definition.

use crate::error::{Result, SlotError};
use crate::exceptions::DateExceptions;
use crate::interval::merge_intervals;
use crate::weekly::WeeklyAvailability;
use crate::windows::DateRangeAvailability;
use chrono::{Datelike, NaiveDate, NaiveDateTime};
use chrono_tz::Tz;
use serde::{Deserialize, Serialize};

fn default_timezone() -> String {
    "UTC".to_string()
}

/// Weekly rules, one-off date windows, and unavailable dates for one provider.
///
/// All times are wall-clock times in `timezone`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AvailabilitySchedule {
    #[serde(default = "default_timezone")]
    pub timezone: String,
    #[serde(default)]
    pub weekly: WeeklyAvailability,
    #[serde(default)]
    pub date_ranges: Vec<DateRangeAvailability>,
    #[serde(default, rename = "unavailable_dates")]
    pub exceptions: DateExceptions,
}

impl Default for AvailabilitySchedule {
    fn default() -> Self {
        Self {
            timezone: default_timezone(),
            weekly: WeeklyAvailability::default(),
            date_ranges: Vec::new(),
            exceptions: DateExceptions::default(),
        }
    }
}

impl AvailabilitySchedule {
    /// An empty schedule in the given IANA timezone.
    pub fn new(timezone: &str) -> Result<Self> {
        parse_timezone(timezone)?;
        Ok(Self {
            timezone: timezone.to_string(),
            ..Self::default()
        })
    }

    /// Parse a schedule document and validate its timezone.
    pub fn from_json(json: &str) -> Result<Self> {
        let schedule: Self =
            serde_json::from_str(json).map_err(|e| SlotError::InvalidDocument(e.to_string()))?;
        schedule.tz()?;
        Ok(schedule)
    }

    pub fn tz(&self) -> Result<Tz> {
        parse_timezone(&self.timezone)
    }

    /// Merged offered intervals for `date`, before bookings are removed.
    ///
    /// Weekly slots for the date's weekday and every covering date window are
    /// unioned. An unavailable date yields nothing.
    pub fn intervals_on(&self, date: NaiveDate) -> Vec<(NaiveDateTime, NaiveDateTime)> {
        if self.exceptions.is_unavailable(date) {
            return Vec::new();
        }

        let weekly = self.weekly.day(date.weekday()).iter();
        let windows = self
            .date_ranges
            .iter()
            .filter(|window| window.covers(date))
            .map(|window| &window.time_slot);

        let offered = weekly
            .chain(windows)
            .map(|slot| (date.and_time(slot.start_time), date.and_time(slot.end_time)))
            .collect();

        merge_intervals(offered)
    }
}

pub(crate) fn parse_timezone(timezone: &str) -> Result<Tz> {
    timezone
        .parse()
        .map_err(|_| SlotError::InvalidTimezone(timezone.to_string()))
}
