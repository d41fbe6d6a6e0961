//! Display state handed to the presentation layer.
//!
//! Everything the page shows is in [`DisplayState`]; the presentation layer
//! only decides how to draw it.

use crate::day::DayDescription;
use crate::navigation::InfoMessage;
use crate::theme::Theme;

/// Where the displayed image is in its load cycle.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ImageStatus {
    /// Spinner on, previous image dimmed.
    Loading,
    Loaded,
    /// Load failed; the URI is used directly anyway.
    Fallback,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ImageView {
    pub uri: String,
    pub status: ImageStatus,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DisplayState {
    /// 1-based day number (`viewed_day + 1`).
    pub day_number: i64,
    pub description: DayDescription,
    pub info: InfoMessage,
    pub image: ImageView,
    pub streak: u32,
    pub theme: Theme,
}

/// A pending image load. Only the newest ticket's completion is applied.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ImageRequest {
    pub ticket: u64,
    pub uri: String,
}

/// Result of a successful transition.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Refresh {
    pub state: DisplayState,
    /// False when the day number is unchanged, so it is not re-animated.
    pub animate_number: bool,
    pub request: ImageRequest,
}
