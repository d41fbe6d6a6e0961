//! Bounded day navigation.
//!
//! The only state is the offset from today. It starts at 0 and stays in
//! `[-epoch_day_today, 0]`:
//!
//! ```text
//!   day 0 (anchor)                        today
//!        |<------------ StepBack ------------|
//!        |------------ StepForward --------->|
//!   offset = -epoch_day_today            offset = 0
//! ```
//!
//! Both bounds are evaluated against the epoch day passed in at the moment
//! of the attempt. "Today" moves forward at midnight, so a day reachable
//! before midnight stays reachable after it. Blocked moves are silent no-ops.

use std::fmt;

/// A navigation request coming from the presentation layer.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NavAction {
    StepBack,
    StepForward,
    Reset,
}

/// Whether an action changed anything worth re-rendering.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Transition {
    Moved { from: i64, to: i64 },
    Blocked,
}

impl Transition {
    pub fn is_moved(self) -> bool {
        matches!(self, Self::Moved { .. })
    }
}

/// Session-local navigation offset.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Navigator {
    offset: i64,
}

impl Navigator {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn offset(&self) -> i64 {
        self.offset
    }

    pub fn apply(&mut self, action: NavAction, epoch_day_today: i64) -> Transition {
        match action {
            NavAction::StepBack => self.step_back(epoch_day_today),
            NavAction::StepForward => self.step_forward(),
            NavAction::Reset => self.reset(),
        }
    }

    /// Move one day into the past unless that would precede day 0.
    pub fn step_back(&mut self, epoch_day_today: i64) -> Transition {
        let target = self.offset - 1;
        if target < -epoch_day_today {
            log::debug!("step back blocked at offset {}", self.offset);
            return Transition::Blocked;
        }
        self.move_to(target)
    }

    /// Move one day toward today unless already there.
    pub fn step_forward(&mut self) -> Transition {
        if self.offset >= 0 {
            log::debug!("step forward blocked at offset {}", self.offset);
            return Transition::Blocked;
        }
        self.move_to(self.offset + 1)
    }

    /// Jump back to today. Always counts as a move, even from 0.
    pub fn reset(&mut self) -> Transition {
        self.move_to(0)
    }

    fn move_to(&mut self, to: i64) -> Transition {
        let from = self.offset;
        self.offset = to;
        log::debug!("offset {from} -> {to}");
        Transition::Moved { from, to }
    }
}

/// Banner describing which direction the visitor is browsing.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InfoMessage {
    Present,
    Past,
    /// Positive offsets cannot be reached; kept for a future "sneak peek".
    Future,
}

impl InfoMessage {
    pub fn for_offset(offset: i64) -> Self {
        match offset {
            0 => Self::Present,
            o if o > 0 => Self::Future,
            _ => Self::Past,
        }
    }
}

impl fmt::Display for InfoMessage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Present => f.write_str("Enjoy your free daily dose!"),
            Self::Past => f.write_str("Reliving the past"),
            Self::Future => f.write_str("You're browsing the future..."),
        }
    }
}
