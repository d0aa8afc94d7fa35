//! Half-open interval primitives.
//!
//! Every interval in this crate is `[start, end)`: an interval that ends exactly
//! when another begins does not overlap it. Merging treats such adjacent
//! intervals as one continuous block.

use crate::error::{Result, SlotError};
use chrono::{NaiveDate, NaiveDateTime, NaiveTime};
use serde::{Deserialize, Serialize};

/// A start/end pair of wall-clock times within a single day.
///
/// Deserialization goes through [`TimeSlot::new`], so an empty or inverted
/// slot in a document is rejected.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(try_from = "RawTimeSlot")]
pub struct TimeSlot {
    #[serde(with = "time_format")]
    pub start_time: NaiveTime,
    #[serde(with = "time_format")]
    pub end_time: NaiveTime,
}

#[derive(Deserialize)]
struct RawTimeSlot {
    #[serde(with = "time_format")]
    start_time: NaiveTime,
    #[serde(with = "time_format")]
    end_time: NaiveTime,
}

impl TryFrom<RawTimeSlot> for TimeSlot {
    type Error = SlotError;

    fn try_from(raw: RawTimeSlot) -> Result<Self> {
        Self::new(raw.start_time, raw.end_time)
    }
}

impl TimeSlot {
    /// Build a slot, rejecting empty or inverted ranges.
    pub fn new(start_time: NaiveTime, end_time: NaiveTime) -> Result<Self> {
        if start_time >= end_time {
            return Err(SlotError::EmptyInterval {
                start: start_time,
                end: end_time,
            });
        }
        Ok(Self {
            start_time,
            end_time,
        })
    }

    /// Parse a slot from `HH:MM` or `HH:MM:SS` strings.
    pub fn parse(start: &str, end: &str) -> Result<Self> {
        Self::new(parse_time(start)?, parse_time(end)?)
    }

    /// Half-open overlap test. Adjacent slots do not overlap.
    pub fn overlaps(&self, other: &TimeSlot) -> bool {
        self.start_time < other.end_time && other.start_time < self.end_time
    }

    /// True when `other` lies entirely within this slot.
    pub fn contains(&self, other: &TimeSlot) -> bool {
        self.start_time <= other.start_time && other.end_time <= self.end_time
    }

    pub fn duration_minutes(&self) -> i64 {
        (self.end_time - self.start_time).num_minutes()
    }

    /// Place this slot on a concrete date.
    pub fn on(&self, date: NaiveDate) -> FreeInterval {
        FreeInterval::new(date.and_time(self.start_time), date.and_time(self.end_time))
    }
}

/// A concrete free interval on the calendar.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FreeInterval {
    pub start: NaiveDateTime,
    pub end: NaiveDateTime,
    pub duration_minutes: i64,
}

impl FreeInterval {
    pub fn new(start: NaiveDateTime, end: NaiveDateTime) -> Self {
        Self {
            start,
            end,
            duration_minutes: (end - start).num_minutes(),
        }
    }

    /// Half-open containment: `[start, end)` lies entirely inside this interval.
    pub fn contains(&self, start: NaiveDateTime, end: NaiveDateTime) -> bool {
        self.start <= start && end <= self.end
    }
}

impl From<(NaiveDateTime, NaiveDateTime)> for FreeInterval {
    fn from((start, end): (NaiveDateTime, NaiveDateTime)) -> Self {
        Self::new(start, end)
    }
}

/// Parse a wall-clock time in `HH:MM` or `HH:MM:SS` form.
///
/// The stored availability rows use Postgres `time` values (`09:00:00`) while
/// form inputs produce `09:00`; both are accepted.
pub fn parse_time(s: &str) -> Result<NaiveTime> {
    let trimmed = s.trim();
    NaiveTime::parse_from_str(trimmed, "%H:%M:%S")
        .or_else(|_| NaiveTime::parse_from_str(trimmed, "%H:%M"))
        .map_err(|_| SlotError::InvalidTime(s.to_string()))
}

/// Parse a calendar date in `YYYY-MM-DD` form.
pub fn parse_date(s: &str) -> Result<NaiveDate> {
    NaiveDate::parse_from_str(s.trim(), "%Y-%m-%d").map_err(|_| SlotError::InvalidDate(s.to_string()))
}

/// Merge overlapping or adjacent intervals.
///
/// Empty and inverted pairs are discarded. Returns a sorted list in which no two
/// intervals overlap or touch.
pub fn merge_intervals<T: Ord + Copy>(mut intervals: Vec<(T, T)>) -> Vec<(T, T)> {
    intervals.retain(|(start, end)| start < end);
    intervals.sort();

    let mut merged: Vec<(T, T)> = Vec::with_capacity(intervals.len());
    for (start, end) in intervals {
        if let Some(last) = merged.last_mut() {
            if start <= last.1 {
                last.1 = last.1.max(end);
                continue;
            }
        }
        merged.push((start, end));
    }

    merged
}

/// Remove every `busy` interval from the union of `free`.
///
/// Both inputs may be unsorted and self-overlapping. A busy interval that only
/// touches a free boundary removes nothing.
pub fn subtract_intervals<T: Ord + Copy>(free: Vec<(T, T)>, busy: Vec<(T, T)>) -> Vec<(T, T)> {
    let free = merge_intervals(free);
    let busy = merge_intervals(busy);

    let mut remaining = Vec::with_capacity(free.len());
    for (free_start, free_end) in free {
        let mut cursor = free_start;
        for &(busy_start, busy_end) in &busy {
            if busy_end <= cursor {
                continue;
            }
            if busy_start >= free_end {
                break;
            }
            if busy_start > cursor {
                remaining.push((cursor, busy_start));
            }
            cursor = cursor.max(busy_end);
            if cursor >= free_end {
                break;
            }
        }
        if cursor < free_end {
            remaining.push((cursor, free_end));
        }
    }

    remaining
}

/// Serde adapter writing `HH:MM:SS` and reading `HH:MM` or `HH:MM:SS`.
pub(crate) mod time_format {
    use chrono::NaiveTime;
    use serde::{Deserialize, Deserializer, Serializer};

    pub fn serialize<S: Serializer>(time: &NaiveTime, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(&time.format("%H:%M:%S").to_string())
    }

    pub fn deserialize<'de, D: Deserializer<'de>>(deserializer: D) -> Result<NaiveTime, D::Error> {
        let raw = String::deserialize(deserializer)?;
        super::parse_time(&raw).map_err(serde::de::Error::custom)
    }
}
