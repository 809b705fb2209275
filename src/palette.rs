//! Day palette: sorted solar phase instants and time-to-tone interpolation.

use std::fmt;
use std::str::FromStr;

use chrono::{DateTime, FixedOffset, NaiveDate, NaiveTime, TimeDelta, TimeZone};
use serde::{Deserialize, Serialize};

use crate::color::{DEFAULT_HUE, Hsl};
use crate::phase::{SolarPhase, Tone, ToneTable};
use crate::position::{LocateError, PositionSource};
use crate::solar::{Coordinates, PhaseTimes, SolarOracle};

/// A solar phase instant tagged with its color target.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct NamedInstant {
    pub phase: SolarPhase,
    pub at: DateTime<FixedOffset>,
    pub tone: Tone,
}

impl NamedInstant {
    pub fn new(phase: SolarPhase, at: DateTime<FixedOffset>, tone: Tone) -> Self {
        Self { phase, at, tone }
    }
}

/// How the lookup treats a query before the first or after the last instant.
///
/// The day is always treated as cyclic: a query before every instant
/// interpolates from the last instant, a query after every instant
/// interpolates toward the first one. The variants differ only in which
/// timestamp the wrapped neighbor contributes to the percent calculation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Wrap {
    /// Neighbors are picked among the instants and their copies one day
    /// earlier and later, so the interpolation percent stays within `[0, 1]`.
    #[default]
    Cyclic,
    /// The wrapped neighbor keeps its same-day timestamp. The percent is not
    /// clamped and can overshoot past the neighbors' tones.
    SameDay,
}

impl Wrap {
    pub const NAMES: &[&str] = &["cyclic", "same_day"];

    pub fn name(self) -> &'static str {
        match self {
            Self::Cyclic => "cyclic",
            Self::SameDay => "same_day",
        }
    }
}

impl FromStr for Wrap {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "cyclic" => Ok(Self::Cyclic),
            "same_day" => Ok(Self::SameDay),
            other => Err(format!(
                "must be one of {}, got \"{other}\"",
                Self::NAMES.join(", ")
            )),
        }
    }
}

impl fmt::Display for Wrap {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Reasons a day's instants cannot form a palette.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum PaletteError {
    #[error("palette has no instants")]
    Empty,
    #[error("solar phases do not occur on this day: {}", join_phases(.0))]
    MissingPhases(Vec<SolarPhase>),
    #[error("solar phase {0} appears more than once")]
    DuplicatePhase(SolarPhase),
}

fn join_phases(phases: &[SolarPhase]) -> String {
    phases
        .iter()
        .map(|p| p.name())
        .collect::<Vec<_>>()
        .join(", ")
}

/// Whole minutes from `from` to `to`, truncated toward zero.
pub fn minutes_between<Tz: TimeZone>(to: &DateTime<Tz>, from: &DateTime<Tz>) -> i64 {
    to.clone().signed_duration_since(from.clone()).num_minutes()
}

/// Interpolates the tone for `query` between its bracketing instants.
///
/// `instants` must be sorted ascending. The previous neighbor is the latest
/// instant at or before `query` and the next neighbor is the earliest
/// instant after it, both wrapping around the day as described by [`Wrap`].
/// Returns `None` only for an empty slice.
pub fn interpolate(
    query: DateTime<FixedOffset>,
    instants: &[NamedInstant],
    wrap: Wrap,
) -> Option<Tone> {
    let ((prev, prev_at), (next, next_at)) = match wrap {
        Wrap::Cyclic => cyclic_neighbors(query, instants)?,
        Wrap::SameDay => same_day_neighbors(query, instants)?,
    };

    let span = minutes_between(&next_at, &prev_at);
    if span == 0 {
        return Some(prev.tone);
    }
    let percent = minutes_between(&query, &prev_at) as f64 / span as f64;

    Some(Tone::new(
        lerp_channel(prev.tone.saturation, next.tone.saturation, percent),
        lerp_channel(prev.tone.lightness, next.tone.lightness, percent),
    ))
}

type Neighbor<'a> = (&'a NamedInstant, DateTime<FixedOffset>);

/// Neighbors among the instants and their copies one day earlier and later.
///
/// Instants can sit on the previous or next calendar day (nadir before local
/// midnight, night after it), so the bracketing pair is picked from all
/// three copies rather than by slice position.
fn cyclic_neighbors(
    query: DateTime<FixedOffset>,
    instants: &[NamedInstant],
) -> Option<(Neighbor<'_>, Neighbor<'_>)> {
    let copies = || {
        [-1, 0, 1].into_iter().flat_map(move |days| {
            instants
                .iter()
                .map(move |i| (i, i.at + TimeDelta::days(days)))
        })
    };
    let prev = copies().filter(|(_, at)| *at <= query).max_by_key(|(_, at)| *at);
    let next = copies().filter(|(_, at)| *at > query).min_by_key(|(_, at)| *at);
    match (prev, next) {
        (Some(prev), Some(next)) => Some((prev, next)),
        // more than a day away from every instant
        (Some(only), None) | (None, Some(only)) => Some((only, only)),
        (None, None) => None,
    }
}

fn same_day_neighbors(
    query: DateTime<FixedOffset>,
    instants: &[NamedInstant],
) -> Option<(Neighbor<'_>, Neighbor<'_>)> {
    let first = instants.first()?;
    let last = instants.last()?;
    let idx = instants.partition_point(|i| i.at <= query);
    let prev = idx.checked_sub(1).map_or(last, |i| &instants[i]);
    let next = instants.get(idx).unwrap_or(first);
    Some(((prev, prev.at), (next, next.at)))
}

fn lerp_channel(from: u8, to: u8, percent: f64) -> u8 {
    let from = f64::from(from);
    let value = from + (f64::from(to) - from) * percent;
    // half-up rounding; the result is a percentage so it stays in 0..=100
    (value + 0.5).floor().clamp(0.0, 100.0) as u8
}

/// Per-run palette knobs.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PaletteSettings {
    pub hue: u16,
    pub wrap: Wrap,
    pub tones: ToneTable,
}

impl Default for PaletteSettings {
    fn default() -> Self {
        Self {
            hue: DEFAULT_HUE,
            wrap: Wrap::default(),
            tones: ToneTable::default(),
        }
    }
}

/// The sorted solar phase instants of one local calendar day.
///
/// Every [`SolarPhase`] appears exactly once. A palette is immutable once
/// built.
#[derive(Debug, Clone, PartialEq)]
pub struct Palette {
    date: NaiveDate,
    offset: FixedOffset,
    hue: u16,
    wrap: Wrap,
    instants: Vec<NamedInstant>,
}

impl Palette {
    /// Sorts `instants` chronologically and checks that every phase is
    /// present exactly once.
    ///
    /// # Errors
    ///
    /// Returns a `PaletteError` for an empty list, a repeated phase, or
    /// missing phases.
    pub fn new(
        date: NaiveDate,
        offset: FixedOffset,
        mut instants: Vec<NamedInstant>,
        hue: u16,
        wrap: Wrap,
    ) -> Result<Self, PaletteError> {
        if instants.is_empty() {
            return Err(PaletteError::Empty);
        }

        let mut seen = [false; 14];
        for instant in &instants {
            let slot = &mut seen[instant.phase as usize];
            if *slot {
                return Err(PaletteError::DuplicatePhase(instant.phase));
            }
            *slot = true;
        }
        let missing: Vec<SolarPhase> = SolarPhase::ALL
            .into_iter()
            .filter(|p| !seen[*p as usize])
            .collect();
        if !missing.is_empty() {
            return Err(PaletteError::MissingPhases(missing));
        }

        instants.sort_by_key(|i| i.at);
        let instants: Vec<NamedInstant> = instants
            .into_iter()
            .map(|i| NamedInstant {
                at: i.at.with_timezone(&offset),
                ..i
            })
            .collect();

        Ok(Self {
            date,
            offset,
            hue: hue % 360,
            wrap,
            instants,
        })
    }

    /// Attaches tones from `settings` to the oracle's instants.
    ///
    /// # Errors
    ///
    /// Returns `PaletteError::MissingPhases` when the oracle reports phases
    /// that do not occur on this day.
    pub fn from_phase_times(
        date: NaiveDate,
        offset: FixedOffset,
        times: &PhaseTimes,
        settings: &PaletteSettings,
    ) -> Result<Self, PaletteError> {
        let missing = times.missing();
        if !missing.is_empty() {
            return Err(PaletteError::MissingPhases(missing));
        }
        let instants = times
            .iter()
            .filter_map(|(phase, at)| {
                let at = at?.with_timezone(&offset);
                Some(NamedInstant::new(phase, at, settings.tones.get(phase)))
            })
            .collect();
        Self::new(date, offset, instants, settings.hue, settings.wrap)
    }

    /// Local calendar day this palette covers.
    pub fn date(&self) -> NaiveDate {
        self.date
    }

    pub fn offset(&self) -> FixedOffset {
        self.offset
    }

    pub fn hue(&self) -> u16 {
        self.hue
    }

    pub fn wrap(&self) -> Wrap {
        self.wrap
    }

    /// Instants in ascending time order.
    pub fn instants(&self) -> &[NamedInstant] {
        &self.instants
    }

    /// Returns the instant of `phase`.
    pub fn get(&self, phase: SolarPhase) -> Option<&NamedInstant> {
        self.instants.iter().find(|i| i.phase == phase)
    }

    /// Interpolated tone at `query`.
    pub fn tone_at<Tz: TimeZone>(&self, query: &DateTime<Tz>) -> Tone {
        let query = query.with_timezone(&self.offset);
        interpolate(query, &self.instants, self.wrap)
            .unwrap_or_else(|| SolarPhase::Night.default_tone())
    }

    /// Interpolated color at `query`.
    pub fn color_at<Tz: TimeZone>(&self, query: &DateTime<Tz>) -> Hsl {
        Hsl::from_tone(self.hue, self.tone_at(query))
    }

    /// Fixed color of `phase`, without interpolation.
    pub fn phase_color(&self, phase: SolarPhase) -> Hsl {
        let tone = self
            .get(phase)
            .map_or_else(|| phase.default_tone(), |i| i.tone);
        Hsl::from_tone(self.hue, tone)
    }

    /// The given wall-clock time on the palette's day.
    pub fn local_time(&self, time: NaiveTime) -> DateTime<FixedOffset> {
        self.offset
            .from_local_datetime(&self.date.and_time(time))
            .single()
            .unwrap_or_else(|| self.offset.from_utc_datetime(&self.date.and_time(time)))
    }

    /// Local midnight starting the palette's day.
    pub fn midnight(&self) -> DateTime<FixedOffset> {
        self.local_time(NaiveTime::MIN)
    }
}

/// Builds the palette for the local day containing `now`.
///
/// This is the only place the oracle is consulted; position and time are
/// passed in explicitly so the result depends on nothing else.
///
/// # Errors
///
/// Returns `PaletteError::MissingPhases` for days on which some phases do
/// not occur (high latitudes).
pub fn build_palette<O: SolarOracle>(
    oracle: &O,
    position: Coordinates,
    now: DateTime<FixedOffset>,
    settings: &PaletteSettings,
) -> Result<Palette, PaletteError> {
    let offset = *now.offset();
    let date = now.date_naive();
    let times = oracle.phase_times_on(date, &offset, position);
    let palette = Palette::from_phase_times(date, offset, &times, settings)?;
    log::debug!(
        "built palette for {date} at ({:.4}, {:.4}), hue {}, wrap {}",
        position.latitude,
        position.longitude,
        palette.hue(),
        palette.wrap()
    );
    Ok(palette)
}

/// Why no palette exists for the requested day.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum DayError {
    #[error(transparent)]
    Position(#[from] LocateError),
    #[error(transparent)]
    Palette(#[from] PaletteError),
}

/// Locates the observer once, then builds the palette for the day of `now`.
///
/// # Errors
///
/// `DayError::Position` when no position is available, `DayError::Palette`
/// when the day's phases cannot form a palette.
pub fn build_day<P: PositionSource, O: SolarOracle>(
    source: &P,
    oracle: &O,
    now: DateTime<FixedOffset>,
    settings: &PaletteSettings,
) -> Result<(Coordinates, Palette), DayError> {
    let position = source.locate().inspect_err(|e| log::warn!("{e}"))?;
    let palette = build_palette(oracle, position, now, settings)?;
    Ok((position, palette))
}
