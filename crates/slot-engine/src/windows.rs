//! One-off availability that applies to every date in an inclusive range.

use crate::error::{Result, SlotError};
use crate::interval::TimeSlot;
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

/// A time slot offered on each date from `start_date` through `end_date`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "RawDateRange")]
pub struct DateRangeAvailability {
    pub start_date: NaiveDate,
    pub end_date: NaiveDate,
    #[serde(flatten)]
    pub time_slot: TimeSlot,
}

/// Stored form: a missing `end_date` means a single-day window.
#[derive(Deserialize)]
struct RawDateRange {
    start_date: NaiveDate,
    #[serde(default)]
    end_date: Option<NaiveDate>,
    #[serde(flatten)]
    time_slot: TimeSlot,
}

impl TryFrom<RawDateRange> for DateRangeAvailability {
    type Error = SlotError;

    fn try_from(raw: RawDateRange) -> Result<Self> {
        Self::new(raw.start_date, raw.end_date, raw.time_slot)
    }
}

impl DateRangeAvailability {
    /// `end_date` defaults to `start_date` for a single-day window.
    pub fn new(start_date: NaiveDate, end_date: Option<NaiveDate>, time_slot: TimeSlot) -> Result<Self> {
        let end_date = end_date.unwrap_or(start_date);
        if start_date > end_date {
            return Err(SlotError::InvalidRange {
                start: start_date,
                end: end_date,
            });
        }
        Ok(Self {
            start_date,
            end_date,
            time_slot,
        })
    }

    pub fn covers(&self, date: NaiveDate) -> bool {
        self.start_date <= date && date <= self.end_date
    }
}
