//! # slot-engine
//!
//! Weekly availability to bookable slot expansion for service-provider scheduling.
//!
//! A provider publishes recurring weekly hours, optional one-off date windows,
//! and dates they are wholly unavailable. Given the bookings already taken, the
//! engine deterministically produces the sorted free intervals for any date
//! or date range. All intervals are half-open `[start, end)`.
//!
//! ## Modules
//!
//! - [`interval`] — Half-open time slots, merging and subtraction
//! - [`weekly`] — Recurring day-of-week availability
//! - [`exceptions`] — Wholly unavailable dates
//! - [`windows`] — One-off availability over a date range
//! - [`booking`] — Existing appointments
//! - [`schedule`] — A provider's complete availability definition
//! - [`availability`] — Free intervals per date, availability checks
//! - [`slots`] — Fixed-length bookable slots with step and buffer
//! - [`conflict`] — Detect double bookings
//! - [`recurrence`] — Weekly / bi-weekly / monthly booking expansion
//! - [`zone`] — DST policies for mapping wall-clock slots to UTC
//! - [`error`] — Error types

pub mod availability;
pub mod booking;
pub mod conflict;
pub mod error;
pub mod exceptions;
pub mod interval;
pub mod recurrence;
pub mod schedule;
pub mod slots;
pub mod weekly;
pub mod windows;
pub mod zone;

pub use availability::{
    available_intervals, available_range, check_availability, is_free, DateAvailability,
};
pub use booking::{Booking, BookingStatus};
pub use conflict::{find_conflicts, Conflict};
pub use error::SlotError;
pub use exceptions::{DateExceptions, UnavailableDate};
pub use interval::{FreeInterval, TimeSlot};
pub use recurrence::{expand_recurring, Occurrence, RecurrenceType};
pub use schedule::AvailabilitySchedule;
pub use slots::{bookable_slots, first_bookable_slot, SlotOptions};
pub use weekly::{AvailabilityRow, DayAvailability, WeeklyAvailability};
pub use windows::DateRangeAvailability;
pub use zone::DstPolicy;
