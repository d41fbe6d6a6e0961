//! # Daily Moss
//!
//! A moss of the day. Every calendar date maps to one image of a fixed
//! gallery; visitors can page back through earlier days (never past day 0,
//! never beyond today) and keep a streak of consecutive days visited.
//!
//! # Architecture
//!
//! ```text
//!   clock ──► DayResolver ──► GalleryIndex ──► Gallery::uri
//!                 ▲
//!   input ──► Navigator (offset ≤ 0, today + offset ≥ 0)
//!                 │
//!                 ▼
//!              Session ──► DisplayState ──► presentation (output / host UI)
//!                 ▲
//!   store ──► streak::track_visit, Theme::load
//! ```
//!
//! All logic is synchronous and driven by discrete events. The session is
//! an explicit context object: handlers pass it the current time and get
//! back what to redraw, so every behavior is testable without a UI.
//!
//! # Module Map
//!
//! | Module | Role |
//! |--------|------|
//! | [`day`] | Instant + offset → day number, gallery index, description |
//! | [`navigation`] | Bounded offset state machine and info banner |
//! | [`streak`] | Consecutive-day visit tracking on local calendar dates |
//! | [`session`] | Context object wiring resolver, navigator, streak, theme, image tickets |
//! | [`view`] | Display state consumed by the presentation layer |
//! | [`gallery`] | Index → image URI, preload planning |
//! | [`loader`] | Image loading seam with a filesystem implementation |
//! | [`input`] | Clicks, keys and swipes → commands |
//! | [`theme`] | Light/dark preference |
//! | [`store`] | Persistent key-value store seam (JSON file, memory) |
//! | [`config`] | `config.toml` loading, merging, validation |
//! | [`check`] | Gallery completeness and decodability check |
//! | [`output`] | CLI output formatting |
//!
//! # Design Decisions
//!
//! ## Day Numbers Come From the Anchor, Streaks From the Calendar
//!
//! The gallery index counts whole 24-hour periods since local midnight of the
//! anchor date, so every visitor in the same zone sees the same moss. The
//! streak compares local `YYYY-MM-DD` dates instead, because "visited
//! yesterday" is a calendar notion.
//!
//! Both need the viewer's real zone, not today's UTC offset. The binary's
//! clock is `chrono::Local`, and a pinned `--now` instant is converted into
//! it.
//!
//! ## Superseded Image Loads Are Dropped
//!
//! Each refresh issues a new image ticket. A completion for anything but the
//! newest ticket is ignored, so fast navigation can never leave an older
//! image on screen.

pub mod check;
pub mod config;
pub mod day;
pub mod gallery;
pub mod input;
pub mod loader;
pub mod navigation;
pub mod output;
pub mod session;
pub mod store;
pub mod streak;
pub mod theme;
pub mod view;

#[cfg(test)]
pub(crate) mod test_helpers;
