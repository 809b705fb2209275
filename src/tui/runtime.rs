//! TUI application state.

use chrono::{DateTime, FixedOffset, TimeDelta};

use crate::color::Hsl;
use crate::palette::{DayError, Palette};
use crate::timeline::{Timeline, clock_minutes, hhmm};

/// Minutes the query instant moves per arrow key press.
pub const STEP_MINUTES: i64 = 15;

/// What the view shows: a built day, or why there is none.
pub enum View {
    Day { palette: Palette, timeline: Timeline },
    Empty { error: DayError },
}

pub struct App {
    pub view: View,
    /// Instant captured at startup; `0` returns here.
    pub captured: DateTime<FixedOffset>,
    /// Offset of the query instant from `captured`.
    pub shift_minutes: i64,
    /// Place name or coordinates for the header.
    pub location: String,
    pub quit: bool,
}

impl App {
    pub fn new(
        palette: Palette,
        mark_step: u32,
        captured: DateTime<FixedOffset>,
        location: impl Into<String>,
    ) -> Self {
        let timeline = Timeline::build(&palette, mark_step);
        Self {
            view: View::Day { palette, timeline },
            captured,
            shift_minutes: 0,
            location: location.into(),
            quit: false,
        }
    }

    /// App with nothing to draw but the reason.
    pub fn empty(error: DayError, captured: DateTime<FixedOffset>) -> Self {
        Self {
            view: View::Empty { error },
            captured,
            shift_minutes: 0,
            location: String::new(),
            quit: false,
        }
    }

    pub fn query(&self) -> DateTime<FixedOffset> {
        self.captured + TimeDelta::minutes(self.shift_minutes)
    }

    pub fn palette(&self) -> Option<&Palette> {
        match &self.view {
            View::Day { palette, .. } => Some(palette),
            View::Empty { .. } => None,
        }
    }

    pub fn timeline(&self) -> Option<&Timeline> {
        match &self.view {
            View::Day { timeline, .. } => Some(timeline),
            View::Empty { .. } => None,
        }
    }

    /// Color at the query instant.
    pub fn current_color(&self) -> Option<Hsl> {
        self.palette().map(|p| p.color_at(&self.query()))
    }

    /// Minute of the palette day the query instant falls on.
    pub fn query_minute(&self) -> Option<u32> {
        self.palette().map(|p| clock_minutes(p, &self.query()))
    }

    pub fn query_label(&self) -> String {
        hhmm(&self.query())
    }

    pub fn step_forward(&mut self) {
        self.shift(STEP_MINUTES);
    }

    pub fn step_back(&mut self) {
        self.shift(-STEP_MINUTES);
    }

    pub fn reset(&mut self) {
        self.shift_minutes = 0;
    }

    /// Moves the query, refusing to leave the palette's day.
    fn shift(&mut self, delta: i64) {
        let next = self.shift_minutes + delta;
        if let Some(palette) = self.palette() {
            let at = self.captured + TimeDelta::minutes(next);
            if at.date_naive() != palette.date() {
                return;
            }
        }
        self.shift_minutes = next;
    }
}
