//! Shared test utilities.
//!
//! Most tests pin the clock to a fixed UTC-05:00 zone so day boundaries and
//! local-date comparisons don't depend on the machine running them.
//! [`DstZone`] models a zone with a daylight-saving period for the tests
//! that cross a clock change.
//!
//! ```rust
//! use crate::test_helpers::*;
//!
//! let now = at(2026, 1, 28, 9, 0);
//! let mut session = session_at(&now, &mut MemoryStore::new());
//! ```

use chrono::{
    DateTime, FixedOffset, LocalResult, NaiveDate, NaiveDateTime, NaiveTime, Offset, TimeZone,
};
use std::fmt;

use crate::config::MossConfig;
use crate::session::Session;
use crate::store::KeyValueStore;

/// Anchor date of the stock configuration.
pub fn anchor() -> NaiveDate {
    NaiveDate::from_ymd_opt(2026, 1, 28).unwrap()
}

pub fn zone() -> FixedOffset {
    FixedOffset::west_opt(5 * 3600).unwrap()
}

/// Local wall-clock instant in the test zone.
pub fn at(year: i32, month: u32, day: u32, hour: u32, minute: u32) -> DateTime<FixedOffset> {
    zone()
        .with_ymd_and_hms(year, month, day, hour, minute, 0)
        .unwrap()
}

/// Start a session with the stock config.
pub fn session_at<Tz: TimeZone>(now: &DateTime<Tz>, store: &mut impl KeyValueStore) -> Session {
    Session::start(&MossConfig::default(), store, now)
}

/// A zone with a single daylight-saving period.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DstZone {
    standard: FixedOffset,
    daylight: FixedOffset,
    /// Standard wall time at which clocks jump forward.
    starts: NaiveDateTime,
    /// Daylight wall time at which clocks fall back.
    ends: NaiveDateTime,
}

impl DstZone {
    /// US Eastern time for 2026: EST, EDT from Mar 8 02:00 to Nov 1 02:00.
    pub fn us_eastern_2026() -> Self {
        Self {
            standard: FixedOffset::west_opt(5 * 3600).unwrap(),
            daylight: FixedOffset::west_opt(4 * 3600).unwrap(),
            starts: wall(2026, 3, 8, 2),
            ends: wall(2026, 11, 1, 2),
        }
    }

    /// UTC-03:00 with clocks jumping to 01:00 at the start of 2026-01-28,
    /// so that date has no midnight.
    pub fn skipped_midnight_2026() -> Self {
        Self {
            standard: FixedOffset::west_opt(3 * 3600).unwrap(),
            daylight: FixedOffset::west_opt(2 * 3600).unwrap(),
            starts: wall(2026, 1, 28, 0),
            ends: wall(2026, 6, 1, 0),
        }
    }

    /// Wall-clock instant in this zone. Panics on skipped or repeated times.
    pub fn at(&self, year: i32, month: u32, day: u32, hour: u32, minute: u32) -> DateTime<Self> {
        self.with_ymd_and_hms(year, month, day, hour, minute, 0)
            .unwrap()
    }

    fn tagged(&self, fixed: FixedOffset) -> DstOffset {
        DstOffset { zone: *self, fixed }
    }
}

fn wall(year: i32, month: u32, day: u32, hour: u32) -> NaiveDateTime {
    NaiveDate::from_ymd_opt(year, month, day)
        .unwrap()
        .and_hms_opt(hour, 0, 0)
        .unwrap()
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DstOffset {
    zone: DstZone,
    fixed: FixedOffset,
}

impl Offset for DstOffset {
    fn fix(&self) -> FixedOffset {
        self.fixed
    }
}

impl fmt::Display for DstOffset {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Display::fmt(&self.fixed, f)
    }
}

impl TimeZone for DstZone {
    type Offset = DstOffset;

    fn from_offset(offset: &DstOffset) -> Self {
        offset.zone
    }

    fn offset_from_local_date(&self, local: &NaiveDate) -> LocalResult<DstOffset> {
        self.offset_from_local_datetime(&local.and_time(NaiveTime::MIN))
    }

    fn offset_from_local_datetime(&self, local: &NaiveDateTime) -> LocalResult<DstOffset> {
        // A wall time is valid under an offset if converting it to UTC and
        // back lands on the same offset.
        let fits = |fixed: FixedOffset| {
            self.offset_from_utc_datetime(&(*local - fixed)).fixed == fixed
        };
        match (fits(self.daylight), fits(self.standard)) {
            (true, true) => LocalResult::Ambiguous(
                self.tagged(self.daylight),
                self.tagged(self.standard),
            ),
            (true, false) => LocalResult::Single(self.tagged(self.daylight)),
            (false, true) => LocalResult::Single(self.tagged(self.standard)),
            (false, false) => LocalResult::None,
        }
    }

    fn offset_from_utc_date(&self, utc: &NaiveDate) -> DstOffset {
        self.offset_from_utc_datetime(&utc.and_time(NaiveTime::MIN))
    }

    fn offset_from_utc_datetime(&self, utc: &NaiveDateTime) -> DstOffset {
        let starts = self.starts - self.standard;
        let ends = self.ends - self.daylight;
        if *utc >= starts && *utc < ends {
            self.tagged(self.daylight)
        } else {
            self.tagged(self.standard)
        }
    }
}
