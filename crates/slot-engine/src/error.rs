//! Error types for slot-engine operations.

use chrono::{NaiveDate, NaiveTime};
use thiserror::Error;

#[derive(Error, Debug, PartialEq)]
pub enum SlotError {
    #[error("Invalid time: {0}")]
    InvalidTime(String),

    #[error("Invalid date: {0}")]
    InvalidDate(String),

    #[error("Invalid day of week: {0} (expected 0-6, Sunday = 0)")]
    InvalidDay(u8),

    #[error("End time {end} must be after start time {start}")]
    EmptyInterval { start: NaiveTime, end: NaiveTime },

    #[error("Time slot {start}-{end} overlaps an existing slot on day {day}")]
    OverlappingSlot {
        day: u8,
        start: NaiveTime,
        end: NaiveTime,
    },

    #[error("End date {end} must be on or after start date {start}")]
    InvalidRange { start: NaiveDate, end: NaiveDate },

    #[error("Invalid timezone: {0}")]
    InvalidTimezone(String),

    #[error("Invalid recurrence rule: {0}")]
    InvalidRule(String),

    #[error("Invalid duration: {0}")]
    InvalidDuration(String),

    #[error("Invalid schedule document: {0}")]
    InvalidDocument(String),
}

pub type Result<T> = std::result::Result<T, SlotError>;
