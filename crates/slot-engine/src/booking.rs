//! Existing appointments that consume availability.

use crate::interval::TimeSlot;
use chrono::{Duration, NaiveDate, NaiveDateTime};
use serde::{Deserialize, Serialize};

/// Lifecycle state of a booking.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum BookingStatus {
    #[default]
    Pending,
    Confirmed,
    Completed,
    Cancelled,
}

/// A booked appointment. May span midnight.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Booking {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,
    pub start: NaiveDateTime,
    pub end: NaiveDateTime,
    #[serde(default)]
    pub status: BookingStatus,
}

impl Booking {
    pub fn new(start: NaiveDateTime, end: NaiveDateTime) -> Self {
        Self {
            id: None,
            start,
            end,
            status: BookingStatus::default(),
        }
    }

    /// A pending booking for `slot` on `date`.
    pub fn on(date: NaiveDate, slot: TimeSlot) -> Self {
        Self::new(date.and_time(slot.start_time), date.and_time(slot.end_time))
    }

    pub fn with_status(mut self, status: BookingStatus) -> Self {
        self.status = status;
        self
    }

    pub fn with_id(mut self, id: impl Into<String>) -> Self {
        self.id = Some(id.into());
        self
    }

    /// Cancelled bookings release their time.
    pub fn blocks_time(&self) -> bool {
        self.status != BookingStatus::Cancelled
    }

    pub fn interval(&self) -> (NaiveDateTime, NaiveDateTime) {
        (self.start, self.end)
    }

    /// The booking widened by `buffer` on both sides.
    pub fn padded(&self, buffer: Duration) -> (NaiveDateTime, NaiveDateTime) {
        (self.start - buffer, self.end + buffer)
    }
}
