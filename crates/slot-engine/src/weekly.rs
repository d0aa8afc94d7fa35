//! Recurring weekly availability: day of week → list of time slots.
//!
//! Days are indexed the way the availability table stores them, `0 = Sunday`
//! through `6 = Saturday`.

use crate::error::{Result, SlotError};
use crate::interval::TimeSlot;
use chrono::Weekday;
use serde::{Deserialize, Serialize};
use tracing::warn;

/// Convert a stored day index (`0 = Sunday`) to a [`Weekday`].
pub fn weekday_from_index(day: u8) -> Result<Weekday> {
    match day {
        0 => Ok(Weekday::Sun),
        1 => Ok(Weekday::Mon),
        2 => Ok(Weekday::Tue),
        3 => Ok(Weekday::Wed),
        4 => Ok(Weekday::Thu),
        5 => Ok(Weekday::Fri),
        6 => Ok(Weekday::Sat),
        other => Err(SlotError::InvalidDay(other)),
    }
}

/// Convert a [`Weekday`] to its stored day index (`0 = Sunday`).
pub fn weekday_index(day: Weekday) -> u8 {
    day.num_days_from_sunday() as u8
}

/// All slots for one day of the week.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DayAvailability {
    pub day_of_week: u8,
    #[serde(default)]
    pub time_slots: Vec<TimeSlot>,
}

/// One stored availability row, as returned by the availability table.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AvailabilityRow {
    pub day_of_week: u8,
    #[serde(with = "crate::interval::time_format")]
    pub start_time: chrono::NaiveTime,
    #[serde(with = "crate::interval::time_format")]
    pub end_time: chrono::NaiveTime,
}

/// A provider's recurring availability for each of the seven days.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct WeeklyAvailability {
    days: [Vec<TimeSlot>; 7],
}

impl WeeklyAvailability {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a slot to a day. Rejects slots that overlap an existing slot on the
    /// same day; slots that merely touch are accepted.
    pub fn add_slot(&mut self, day: u8, slot: TimeSlot) -> Result<()> {
        weekday_from_index(day)?;
        let slot = TimeSlot::new(slot.start_time, slot.end_time)?;
        let slots = &mut self.days[day as usize];
        if slots.iter().any(|existing| existing.overlaps(&slot)) {
            return Err(SlotError::OverlappingSlot {
                day,
                start: slot.start_time,
                end: slot.end_time,
            });
        }
        slots.push(slot);
        slots.sort();
        Ok(())
    }

    /// Remove the slot at `index` (in sorted order) from a day.
    pub fn remove_slot(&mut self, day: u8, index: usize) -> Option<TimeSlot> {
        let slots = self.days.get_mut(day as usize)?;
        if index < slots.len() {
            Some(slots.remove(index))
        } else {
            None
        }
    }

    /// Replace every slot of one day.
    ///
    /// Validates the whole replacement before touching the stored day, so a
    /// rejected update leaves the previous slots in place.
    pub fn set_day(&mut self, availability: DayAvailability) -> Result<()> {
        let day = availability.day_of_week;
        weekday_from_index(day)?;

        let mut slots = availability
            .time_slots
            .into_iter()
            .map(|slot| TimeSlot::new(slot.start_time, slot.end_time))
            .collect::<Result<Vec<_>>>()?;
        slots.sort();
        for pair in slots.windows(2) {
            if pair[0].overlaps(&pair[1]) {
                return Err(SlotError::OverlappingSlot {
                    day,
                    start: pair[1].start_time,
                    end: pair[1].end_time,
                });
            }
        }

        self.days[day as usize] = slots;
        Ok(())
    }

    /// Sorted slots for a weekday.
    pub fn day(&self, day: Weekday) -> &[TimeSlot] {
        &self.days[weekday_index(day) as usize]
    }

    /// All seven days in index order, empty days included.
    pub fn days(&self) -> Vec<DayAvailability> {
        self.days
            .iter()
            .enumerate()
            .map(|(index, slots)| DayAvailability {
                day_of_week: index as u8,
                time_slots: slots.clone(),
            })
            .collect()
    }

    pub fn is_empty(&self) -> bool {
        self.days.iter().all(Vec::is_empty)
    }

    /// Group flat stored rows into the weekly structure.
    ///
    /// Rows with an out-of-range day or an empty time range are skipped.
    /// Overlapping rows are kept as stored; expansion unions them.
    pub fn from_rows<I>(rows: I) -> Self
    where
        I: IntoIterator<Item = AvailabilityRow>,
    {
        let mut weekly = Self::new();
        for row in rows {
            if row.day_of_week > 6 {
                warn!(day_of_week = row.day_of_week, "skipping availability row with invalid day");
                continue;
            }
            match TimeSlot::new(row.start_time, row.end_time) {
                Ok(slot) => weekly.days[row.day_of_week as usize].push(slot),
                Err(e) => warn!(day_of_week = row.day_of_week, error = %e, "skipping availability row"),
            }
        }
        for slots in weekly.days.iter_mut() {
            slots.sort();
        }
        weekly
    }

    /// Flatten back into one row per slot, ordered by day then start time.
    pub fn to_rows(&self) -> Vec<AvailabilityRow> {
        self.days
            .iter()
            .enumerate()
            .flat_map(|(index, slots)| {
                slots.iter().map(move |slot| AvailabilityRow {
                    day_of_week: index as u8,
                    start_time: slot.start_time,
                    end_time: slot.end_time,
                })
            })
            .collect()
    }
}

impl Serialize for WeeklyAvailability {
    fn serialize<S: serde::Serializer>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error> {
        self.days().serialize(serializer)
    }
}

impl<'de> Deserialize<'de> for WeeklyAvailability {
    /// Accepts a list of [`DayAvailability`] entries in any order; missing days
    /// are empty. Stored data may overlap, so no overlap check is applied here.
    fn deserialize<D: serde::Deserializer<'de>>(deserializer: D) -> std::result::Result<Self, D::Error> {
        let entries = Vec::<DayAvailability>::deserialize(deserializer)?;
        let mut weekly = WeeklyAvailability::new();
        for entry in entries {
            weekday_from_index(entry.day_of_week).map_err(serde::de::Error::custom)?;
            let slots = &mut weekly.days[entry.day_of_week as usize];
            slots.extend(entry.time_slots);
            slots.sort();
        }
        Ok(weekly)
    }
}
