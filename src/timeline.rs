//! Proportional 24-hour timeline of a palette's color segments.

use chrono::{DateTime, FixedOffset, TimeDelta, Timelike};
use serde::Serialize;

use crate::color::{Hsl, Rgb};
use crate::palette::Palette;
use crate::phase::SolarPhase;

/// Minutes in one day; the timeline's full vertical extent.
pub const MINUTES_PER_DAY: u32 = 1440;

/// Default spacing between hour marks.
pub const DEFAULT_MARK_STEP: u32 = 60;

/// `HHMM` wall-clock label.
pub fn hhmm(at: &DateTime<FixedOffset>) -> String {
    at.format("%H%M").to_string()
}

/// Minutes since the palette day's local midnight, clamped to the day.
///
/// Instants the oracle places on the neighboring day pin to the top or
/// bottom edge instead of wrapping.
pub fn clock_minutes(palette: &Palette, at: &DateTime<FixedOffset>) -> u32 {
    let minutes = at
        .signed_duration_since(palette.midnight())
        .num_minutes()
        .clamp(0, i64::from(MINUTES_PER_DAY));
    minutes as u32
}

/// One colored band of the timeline.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Segment {
    /// Phase starting this band; `None` for the leading band from midnight.
    pub phase: Option<SolarPhase>,
    /// `HHMM` start label.
    pub label: String,
    pub start_minute: u32,
    pub end_minute: u32,
    pub color: Hsl,
    pub text: Rgb,
}

impl Segment {
    /// Offset from the top as a fraction of the day.
    pub fn top(&self) -> f64 {
        f64::from(self.start_minute) / f64::from(MINUTES_PER_DAY)
    }

    /// Vertical extent as a fraction of the day.
    pub fn height(&self) -> f64 {
        f64::from(self.end_minute.saturating_sub(self.start_minute)) / f64::from(MINUTES_PER_DAY)
    }

    pub fn contains(&self, minute: u32) -> bool {
        (self.start_minute..self.end_minute).contains(&minute)
    }
}

/// Interpolated color at a regular point of the day.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct HourMark {
    pub minute: u32,
    /// `HHMM`, only on top-of-hour marks.
    pub label: Option<String>,
    pub color: Hsl,
    pub text: Rgb,
}

/// Segments and hour marks for one palette day.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Timeline {
    pub segments: Vec<Segment>,
    pub marks: Vec<HourMark>,
}

impl Timeline {
    /// Lays out `palette` over the day with a mark every `mark_step` minutes.
    ///
    /// The leading segment runs from midnight to the first instant in the
    /// night color; each instant's segment runs to the next instant, the last
    /// one to the end of the day.
    pub fn build(palette: &Palette, mark_step: u32) -> Self {
        let instants = palette.instants();
        let starts: Vec<u32> = instants
            .iter()
            .map(|i| clock_minutes(palette, &i.at))
            .collect();

        let night = palette.phase_color(SolarPhase::Night);
        let mut segments = Vec::with_capacity(instants.len() + 1);
        segments.push(Segment {
            phase: None,
            label: "0000".to_string(),
            start_minute: 0,
            end_minute: starts.first().copied().unwrap_or(MINUTES_PER_DAY),
            color: night,
            text: night.readable_text(),
        });

        for (idx, instant) in instants.iter().enumerate() {
            let color = Hsl::from_tone(palette.hue(), instant.tone);
            segments.push(Segment {
                phase: Some(instant.phase),
                label: hhmm(&instant.at),
                start_minute: starts[idx],
                end_minute: starts.get(idx + 1).copied().unwrap_or(MINUTES_PER_DAY),
                color,
                text: color.readable_text(),
            });
        }

        Self {
            segments,
            marks: hour_marks(palette, mark_step),
        }
    }

    /// The segment covering `minute` of the day.
    pub fn segment_at(&self, minute: u32) -> Option<&Segment> {
        self.segments
            .iter()
            .rev()
            .find(|s| s.contains(minute))
    }

    /// Sum of all segment heights; `1.0` for a well-formed day.
    pub fn total_height(&self) -> f64 {
        self.segments.iter().map(Segment::height).sum()
    }
}

/// Interpolated marks every `step` minutes from midnight.
///
/// A step of zero falls back to [`DEFAULT_MARK_STEP`].
pub fn hour_marks(palette: &Palette, step: u32) -> Vec<HourMark> {
    let step = if step == 0 { DEFAULT_MARK_STEP } else { step };
    let midnight = palette.midnight();
    (0..MINUTES_PER_DAY)
        .step_by(step as usize)
        .map(|minute| {
            let at = midnight + TimeDelta::minutes(i64::from(minute));
            let color = palette.color_at(&at);
            let label = hhmm(&at);
            HourMark {
                minute,
                label: (at.minute() == 0 && label.ends_with("00")).then_some(label),
                color,
                text: color.readable_text(),
            }
        })
        .collect()
}
