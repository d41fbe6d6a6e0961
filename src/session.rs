//! One visitor session: navigation, streak, theme and image bookkeeping.
//!
//! The session is an explicit context object. Every event handler passes it
//! the current time (and the store, when something may be persisted) and
//! gets back what changed:
//!
//! ```text
//! start ──► refresh ──► Refresh { state, animate_number, request }
//!             ▲                                          │
//!  handle(cmd)│ Moved                        host loads request.uri
//!             │                                          ▼
//!          Navigator                    complete_image(ticket, outcome)
//! ```
//!
//! Image completions only touch the image part of the display. They never
//! move the offset or the streak, and completions for superseded tickets are
//! dropped, so the newest request always wins.

use crate::config::MossConfig;
use crate::day::DayResolver;
use crate::gallery::Gallery;
use crate::input::{self, Command, InputEvent};
use crate::loader::LoadOutcome;
use crate::navigation::{InfoMessage, NavAction, Navigator, Transition};
use crate::store::KeyValueStore;
use crate::streak;
use crate::theme::Theme;
use crate::view::{DisplayState, ImageRequest, ImageStatus, ImageView, Refresh};
use chrono::{DateTime, TimeZone};

/// What handling one command changed.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Update {
    Refreshed(Refresh),
    ThemeChanged(Theme),
    /// Blocked move or ignored input.
    Unchanged,
}

#[derive(Debug)]
pub struct Session {
    resolver: DayResolver,
    gallery: Gallery,
    navigator: Navigator,
    swipe_threshold: f64,
    preload_offsets: Vec<i64>,
    theme: Theme,
    streak: u32,
    display: Option<DisplayState>,
    next_ticket: u64,
    pending_ticket: Option<u64>,
}

impl Session {
    /// Begin a session: update the visit streak and read the theme.
    ///
    /// Runs before the first render and never fails.
    pub fn start<Tz: TimeZone>(
        config: &MossConfig,
        store: &mut impl KeyValueStore,
        now: &DateTime<Tz>,
    ) -> Self {
        let streak = streak::track_visit(store, now);
        let theme = Theme::load(store);
        Self {
            resolver: DayResolver::new(config.anchor_date, config.gallery.size),
            gallery: Gallery::from_config(&config.gallery),
            navigator: Navigator::new(),
            swipe_threshold: config.input.swipe_threshold,
            preload_offsets: config.preload.offsets.clone(),
            theme,
            streak,
            display: None,
            next_ticket: 0,
            pending_ticket: None,
        }
    }

    pub fn offset(&self) -> i64 {
        self.navigator.offset()
    }

    pub fn streak(&self) -> u32 {
        self.streak
    }

    pub fn theme(&self) -> Theme {
        self.theme
    }

    /// Last rendered state, if anything has been rendered yet.
    pub fn state(&self) -> Option<&DisplayState> {
        self.display.as_ref()
    }

    /// Image URIs to warm around today.
    pub fn preload_uris<Tz: TimeZone>(&self, now: &DateTime<Tz>) -> Vec<String> {
        let today = self.resolver.epoch_day(now);
        self.gallery
            .preload_uris(&self.resolver, today, &self.preload_offsets)
    }

    /// Recompute everything shown for the current offset and issue a new
    /// image request.
    pub fn refresh<Tz: TimeZone>(&mut self, now: &DateTime<Tz>) -> Refresh {
        let offset = self.navigator.offset();
        let day = self.resolver.resolve(now, offset);
        let uri = self.gallery.uri(day.gallery_index);

        let animate_number = self
            .display
            .as_ref()
            .is_none_or(|d| d.day_number != day.display_number());

        self.next_ticket += 1;
        let ticket = self.next_ticket;
        self.pending_ticket = Some(ticket);

        let state = DisplayState {
            day_number: day.display_number(),
            description: day.description(),
            info: InfoMessage::for_offset(offset),
            image: ImageView {
                uri: uri.clone(),
                status: ImageStatus::Loading,
            },
            streak: self.streak,
            theme: self.theme,
        };
        self.display = Some(state.clone());

        Refresh {
            state,
            animate_number,
            request: ImageRequest { ticket, uri },
        }
    }

    /// Apply a navigation action, refreshing only if it moved.
    pub fn navigate<Tz: TimeZone>(&mut self, action: NavAction, now: &DateTime<Tz>) -> Update {
        let today = self.resolver.epoch_day(now);
        match self.navigator.apply(action, today) {
            Transition::Moved { .. } => Update::Refreshed(self.refresh(now)),
            Transition::Blocked => Update::Unchanged,
        }
    }

    /// Flip the theme and persist it. A failed write keeps the new theme
    /// for this session.
    pub fn toggle_theme(&mut self, store: &mut impl KeyValueStore) -> Theme {
        self.theme = self.theme.toggled();
        if let Err(e) = self.theme.save(store) {
            log::warn!("could not persist theme: {e}");
        }
        if let Some(display) = self.display.as_mut() {
            display.theme = self.theme;
        }
        self.theme
    }

    pub fn handle<Tz: TimeZone>(
        &mut self,
        command: Command,
        now: &DateTime<Tz>,
        store: &mut impl KeyValueStore,
    ) -> Update {
        match command {
            Command::Navigate(action) => self.navigate(action, now),
            Command::ToggleTheme => Update::ThemeChanged(self.toggle_theme(store)),
        }
    }

    /// Map a raw input event and handle it.
    pub fn handle_event<Tz: TimeZone>(
        &mut self,
        event: InputEvent,
        now: &DateTime<Tz>,
        store: &mut impl KeyValueStore,
    ) -> Update {
        match input::command_for(event, self.swipe_threshold) {
            Some(command) => self.handle(command, now, store),
            None => Update::Unchanged,
        }
    }

    /// Apply an image load completion. Returns false (and changes nothing)
    /// when the ticket has been superseded.
    pub fn complete_image(&mut self, ticket: u64, outcome: &LoadOutcome) -> bool {
        if self.pending_ticket != Some(ticket) {
            log::debug!("dropping stale image completion #{ticket}");
            return false;
        }
        let Some(display) = self.display.as_mut() else {
            return false;
        };
        self.pending_ticket = None;
        display.image = match outcome {
            LoadOutcome::Loaded(uri) => ImageView {
                uri: uri.clone(),
                status: ImageStatus::Loaded,
            },
            LoadOutcome::Fallback(uri) => ImageView {
                uri: uri.clone(),
                status: ImageStatus::Fallback,
            },
        };
        true
    }
}
