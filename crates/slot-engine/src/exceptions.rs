//! Dates a provider has marked wholly unavailable.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use uuid::Uuid;

/// A single unavailable date with the provider's reason.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct UnavailableDate {
    pub id: String,
    pub date: NaiveDate,
    #[serde(default)]
    pub reason: String,
}

/// Date exceptions keyed by date; at most one entry per date.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct DateExceptions {
    by_date: BTreeMap<NaiveDate, UnavailableDate>,
}

impl DateExceptions {
    pub fn new() -> Self {
        Self::default()
    }

    /// Mark a date unavailable.
    ///
    /// If the date is already marked, only the reason changes and the existing
    /// id is kept. Otherwise a new entry with a fresh id is stored.
    pub fn add(&mut self, date: NaiveDate, reason: impl Into<String>) -> &UnavailableDate {
        let reason = reason.into();
        self.by_date
            .entry(date)
            .and_modify(|existing| existing.reason = reason.clone())
            .or_insert_with(|| UnavailableDate {
                id: Uuid::new_v4().to_string(),
                date,
                reason,
            })
    }

    /// Load a stored entry as-is, replacing any entry for the same date.
    pub fn insert(&mut self, entry: UnavailableDate) -> Option<UnavailableDate> {
        self.by_date.insert(entry.date, entry)
    }

    /// Remove the entry with the given id.
    pub fn remove(&mut self, id: &str) -> Option<UnavailableDate> {
        let date = self.by_date.values().find(|entry| entry.id == id)?.date;
        self.by_date.remove(&date)
    }

    pub fn is_unavailable(&self, date: NaiveDate) -> bool {
        self.by_date.contains_key(&date)
    }

    pub fn get(&self, date: NaiveDate) -> Option<&UnavailableDate> {
        self.by_date.get(&date)
    }

    /// Entries on or after `today`, sorted by date.
    pub fn upcoming(&self, today: NaiveDate) -> Vec<&UnavailableDate> {
        self.by_date.range(today..).map(|(_, entry)| entry).collect()
    }

    /// All entries sorted by date.
    pub fn iter(&self) -> impl Iterator<Item = &UnavailableDate> {
        self.by_date.values()
    }

    pub fn len(&self) -> usize {
        self.by_date.len()
    }

    pub fn is_empty(&self) -> bool {
        self.by_date.is_empty()
    }
}

impl FromIterator<UnavailableDate> for DateExceptions {
    fn from_iter<I: IntoIterator<Item = UnavailableDate>>(iter: I) -> Self {
        let mut exceptions = Self::new();
        for entry in iter {
            exceptions.insert(entry);
        }
        exceptions
    }
}

impl Serialize for DateExceptions {
    fn serialize<S: serde::Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_seq(self.by_date.values())
    }
}

impl<'de> Deserialize<'de> for DateExceptions {
    fn deserialize<D: serde::Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        Ok(Vec::<UnavailableDate>::deserialize(deserializer)?
            .into_iter()
            .collect())
    }
}
