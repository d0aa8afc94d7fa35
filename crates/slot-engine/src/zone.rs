//! DST transition policies for mapping wall-clock slots to instants.

use chrono::offset::LocalResult;
use chrono::{DateTime, Duration, NaiveDateTime, Offset, TimeZone, Timelike, Utc};
use chrono_tz::Tz;
use serde::{Deserialize, Serialize};

/// Longest spring-forward gap searched by [`DstPolicy::ShiftForward`].
const MAX_GAP_MINUTES: i64 = 180;

/// Policy for wall-clock times that fall during DST transitions.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DstPolicy {
    /// Drop times that fall in the DST gap (e.g., 2:30 AM during spring forward)
    Skip,
    /// Shift to the first valid minute after the gap
    ShiftForward,
    /// Read the time with the UTC offset in force before the gap
    #[default]
    WallClock,
}

/// Resolve a wall-clock time in `tz` to a UTC instant.
///
/// Ambiguous times (fall back) resolve to the earlier instant under every
/// policy. Returns `None` only for [`DstPolicy::Skip`] on a nonexistent time.
pub fn localize(naive: NaiveDateTime, tz: Tz, policy: DstPolicy) -> Option<DateTime<Utc>> {
    match tz.from_local_datetime(&naive) {
        LocalResult::Single(dt) => Some(dt.with_timezone(&Utc)),
        LocalResult::Ambiguous(earliest, _) => Some(earliest.with_timezone(&Utc)),
        LocalResult::None => match policy {
            DstPolicy::Skip => None,
            DstPolicy::ShiftForward => {
                let minute = naive.with_second(0)?.with_nanosecond(0)?;
                (1..=MAX_GAP_MINUTES).find_map(|minutes| {
                    tz.from_local_datetime(&(minute + Duration::minutes(minutes)))
                        .earliest()
                        .map(|dt| dt.with_timezone(&Utc))
                })
            }
            DstPolicy::WallClock => {
                let before_gap = naive - Duration::minutes(MAX_GAP_MINUTES);
                let offset = tz.offset_from_local_datetime(&before_gap).earliest()?.fix();
                Some((naive - Duration::seconds(offset.local_minus_utc() as i64)).and_utc())
            }
        },
    }
}

/// A free interval expressed as UTC instants.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct UtcInterval {
    pub start: DateTime<Utc>,
    pub end: DateTime<Utc>,
    pub duration_minutes: i64,
}

/// Map a wall-clock interval to UTC. `None` when either endpoint is skipped.
pub fn to_utc(
    start: NaiveDateTime,
    end: NaiveDateTime,
    tz: Tz,
    policy: DstPolicy,
) -> Option<UtcInterval> {
    let start = localize(start, tz, policy)?;
    let end = localize(end, tz, policy)?;
    if start >= end {
        return None;
    }
    Some(UtcInterval {
        start,
        end,
        duration_minutes: (end - start).num_minutes(),
    })
}
