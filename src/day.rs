//! Day resolution: wall-clock time + navigation offset → gallery position.
//!
//! Day 0 is local midnight of the configured anchor date. Every other day is
//! counted in whole 24-hour periods from that instant, floored, so the first
//! instant of the anchor date is day 0 and one second before it is day -1.
//!
//! ```text
//! epoch_day    = floor((now - anchor_midnight) / 86400s)
//! viewed_day   = epoch_day + offset
//! index        = viewed_day mod N   (always in [0, N))
//! days_from_today = epoch_day - viewed_day = -offset
//! ```
//!
//! `now` must carry the viewer's real zone (`chrono::Local` in the binary).
//! A fixed offset taken from today would move the anchor midnight with the
//! season.
//!
//! Nothing here is cached: `now` advances independently of the offset, so
//! callers resolve again on every refresh.

use chrono::{DateTime, LocalResult, NaiveDate, NaiveTime, TimeDelta, TimeZone};
use std::fmt;

const SECONDS_PER_DAY: i64 = 86_400;

/// Position within the fixed-size gallery, always in `[0, N)`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct GalleryIndex(u32);

impl GalleryIndex {
    /// Normalize any day number into the gallery, wrapping negatives.
    pub fn from_day(day: i64, gallery_size: u32) -> Self {
        let n = i64::from(gallery_size.max(1));
        // rem_euclid keeps the result in [0, n) for negative days
        Self(day.rem_euclid(n) as u32)
    }

    pub fn value(self) -> u32 {
        self.0
    }
}

impl fmt::Display for GalleryIndex {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Output of [`DayResolver::resolve`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ResolvedDay {
    /// Day currently being viewed, counted from the anchor (day 0).
    pub viewed_day: i64,
    pub gallery_index: GalleryIndex,
    /// Positive = past, negative = future, zero = today.
    pub days_from_today: i64,
}

impl ResolvedDay {
    /// Human-facing, 1-based day number.
    pub fn display_number(&self) -> i64 {
        self.viewed_day + 1
    }

    pub fn description(&self) -> DayDescription {
        DayDescription::from_days_from_today(self.days_from_today)
    }
}

/// Maps instants to day numbers and gallery indices.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DayResolver {
    anchor: NaiveDate,
    gallery_size: u32,
}

impl DayResolver {
    pub fn new(anchor: NaiveDate, gallery_size: u32) -> Self {
        Self {
            anchor,
            gallery_size: gallery_size.max(1),
        }
    }

    pub fn gallery_size(&self) -> u32 {
        self.gallery_size
    }

    /// Whole days elapsed since local midnight of the anchor date.
    pub fn epoch_day<Tz: TimeZone>(&self, now: &DateTime<Tz>) -> i64 {
        let anchor = anchor_instant(self.anchor, &now.timezone());
        let elapsed = now.timestamp() - anchor.timestamp();
        elapsed.div_euclid(SECONDS_PER_DAY)
    }

    pub fn resolve<Tz: TimeZone>(&self, now: &DateTime<Tz>, offset: i64) -> ResolvedDay {
        let today = self.epoch_day(now);
        self.resolve_from(today, offset)
    }

    /// Resolve against an already computed epoch day.
    pub fn resolve_from(&self, epoch_day_today: i64, offset: i64) -> ResolvedDay {
        let viewed_day = epoch_day_today.saturating_add(offset);
        ResolvedDay {
            viewed_day,
            gallery_index: GalleryIndex::from_day(viewed_day, self.gallery_size),
            days_from_today: epoch_day_today.saturating_sub(viewed_day),
        }
    }
}

/// Local midnight of `date` in `tz`.
///
/// Ambiguous midnights take the earlier instant. A midnight skipped by a
/// clock change becomes the first wall time that exists after it.
fn anchor_instant<Tz: TimeZone>(date: NaiveDate, tz: &Tz) -> DateTime<Tz> {
    let midnight = date.and_time(NaiveTime::MIN);
    match tz.from_local_datetime(&midnight) {
        LocalResult::Single(t) => t,
        LocalResult::Ambiguous(earliest, _) => earliest,
        LocalResult::None => (1..=24)
            .map(|hours| midnight + TimeDelta::hours(hours))
            .find_map(|wall| tz.from_local_datetime(&wall).earliest())
            .unwrap_or_else(|| tz.from_utc_datetime(&midnight)),
    }
}

/// Descriptive text for the viewed day, relative to today.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DayDescription {
    Today,
    Yesterday,
    DaysAgo(i64),
    /// One day ahead. Unreachable under the navigation bounds.
    Tomorrow,
    /// More than one day ahead. Unreachable under the navigation bounds.
    Vault,
}

impl DayDescription {
    pub fn from_days_from_today(days: i64) -> Self {
        match days {
            0 => Self::Today,
            1 => Self::Yesterday,
            d if d > 1 => Self::DaysAgo(d),
            -1 => Self::Tomorrow,
            _ => Self::Vault,
        }
    }
}

impl fmt::Display for DayDescription {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Today => f.write_str("Today's moss!"),
            Self::Yesterday => f.write_str("Yesterday's moss"),
            Self::DaysAgo(n) => write!(f, "{n} days ago"),
            Self::Tomorrow => f.write_str("Tomorrow's moss (sneak peek!)"),
            Self::Vault => f.write_str("How did you break into the moss vaults!?"),
        }
    }
}
