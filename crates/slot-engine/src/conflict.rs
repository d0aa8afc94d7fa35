//! Detect double bookings between two booking lists.
//!
//! Performs pairwise comparison to find time overlaps. Adjacent bookings (where
//! one ends exactly when another starts) are NOT conflicts, and cancelled
//! bookings never conflict.

use serde::{Deserialize, Serialize};

use crate::booking::Booking;

/// A detected conflict between two bookings.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Conflict {
    pub existing: Booking,
    pub proposed: Booking,
    pub overlap_minutes: i64,
}

/// Find all pairwise conflicts between `existing` and `proposed` bookings.
///
/// Two bookings overlap when `a.start < b.end && b.start < a.end`.
/// The overlap duration is `min(a.end, b.end) - max(a.start, b.start)`.
pub fn find_conflicts(existing: &[Booking], proposed: &[Booking]) -> Vec<Conflict> {
    let mut conflicts = Vec::new();

    for a in existing.iter().filter(|b| b.blocks_time()) {
        for b in proposed.iter().filter(|b| b.blocks_time()) {
            if a.start < b.end && b.start < a.end {
                let overlap_start = a.start.max(b.start);
                let overlap_end = a.end.min(b.end);

                conflicts.push(Conflict {
                    existing: a.clone(),
                    proposed: b.clone(),
                    overlap_minutes: (overlap_end - overlap_start).num_minutes(),
                });
            }
        }
    }

    conflicts
}
