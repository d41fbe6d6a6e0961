//! Consecutive-day visit streak.
//!
//! Once per session, before the first render, the tracker compares the
//! stored last-visit date with today in the viewer's local zone:
//!
//! | Last visit          | New streak          |
//! |---------------------|---------------------|
//! | none / unreadable   | 1                   |
//! | today               | unchanged           |
//! | yesterday           | `max(1, k) + 1`     |
//! | anything else       | 1                   |
//!
//! The record is rewritten with the current instant on every branch, which
//! keeps the same calendar date on the "unchanged" branch.
//!
//! Dates are compared as [`LocalDateKey`]s, never as day numbers: the streak
//! follows the visitor's calendar, while the gallery follows the anchor.

use crate::store::{KeyValueStore, STREAK_KEY};
use chrono::{DateTime, FixedOffset, TimeZone};
use serde::{Deserialize, Serialize};
use std::fmt;

/// Persisted streak state.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StreakRecord {
    pub last_visit: DateTime<FixedOffset>,
    pub streak: u32,
}

impl StreakRecord {
    /// Parse a stored record. Anything malformed counts as no record.
    pub fn parse(raw: &str) -> Option<Self> {
        match serde_json::from_str(raw) {
            Ok(record) => Some(record),
            Err(e) => {
                log::warn!("discarding malformed streak record: {e}");
                None
            }
        }
    }

    pub fn to_json(&self) -> String {
        serde_json::to_string(self).expect("streak record always serializes")
    }
}

/// `YYYY-MM-DD` of an instant in a given zone.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct LocalDateKey(String);

impl LocalDateKey {
    pub fn of<Tz: TimeZone, Z: TimeZone>(instant: &DateTime<Tz>, zone: &Z) -> Self {
        let date = instant.with_timezone(zone).date_naive();
        Self(date.format("%Y-%m-%d").to_string())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for LocalDateKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// What [`initialize`] decided, for logging and display.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StreakOutcome {
    FirstVisit,
    SameDay,
    Extended,
    Broken,
}

/// Compute the new record and the count to display.
///
/// `now`'s zone is the viewer's local zone; the prior timestamp is converted
/// into it before comparing dates.
pub fn initialize<Tz: TimeZone>(
    now: &DateTime<Tz>,
    prior: Option<&StreakRecord>,
) -> (StreakRecord, u32, StreakOutcome) {
    let zone = now.timezone();
    let local_today = now.date_naive();
    let today_key = LocalDateKey::of(now, &zone);
    // Calendar predecessor rather than now - 24h, so a 23-hour DST day
    // still counts as yesterday.
    let yesterday_key = local_today
        .pred_opt()
        .map(|d| LocalDateKey(d.format("%Y-%m-%d").to_string()));

    let (streak, outcome) = match prior {
        None => (1, StreakOutcome::FirstVisit),
        Some(record) => {
            let last_key = LocalDateKey::of(&record.last_visit, &zone);
            if last_key == today_key {
                (record.streak.max(1), StreakOutcome::SameDay)
            } else if Some(&last_key) == yesterday_key.as_ref() {
                (
                    record.streak.max(1).saturating_add(1),
                    StreakOutcome::Extended,
                )
            } else {
                (1, StreakOutcome::Broken)
            }
        }
    };

    let record = StreakRecord {
        last_visit: now.fixed_offset(),
        streak,
    };
    (record, streak, outcome)
}

/// Read the stored record, if there is a readable one.
pub fn load_record(store: &impl KeyValueStore) -> Option<StreakRecord> {
    store.get(STREAK_KEY).and_then(|raw| StreakRecord::parse(&raw))
}

/// Run the session-start streak update against a store.
///
/// Never fails: an unreadable record restarts the streak and a failed write
/// is logged and otherwise ignored.
pub fn track_visit<Tz: TimeZone>(store: &mut impl KeyValueStore, now: &DateTime<Tz>) -> u32 {
    let prior = load_record(store);
    let (record, streak, outcome) = initialize(now, prior.as_ref());
    log::info!("streak {outcome:?}: {streak}");
    if let Err(e) = store.set(STREAK_KEY, &record.to_json()) {
        log::warn!("could not persist streak: {e}");
    }
    streak
}
