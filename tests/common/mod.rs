//! Shared test fixtures for integration tests.

#![allow(dead_code)]

use chrono::{DateTime, FixedOffset, TimeDelta, TimeZone};

use solor::palette::{NamedInstant, Palette, Wrap};
use solor::phase::{SolarPhase, Tone};

/// Offset used by the fixtures (UTC+02:00).
pub fn offset() -> FixedOffset {
    FixedOffset::east_opt(2 * 3600).unwrap()
}

/// Local midnight of the fixture day, 2024-06-01.
pub fn midnight() -> DateTime<FixedOffset> {
    offset().with_ymd_and_hms(2024, 6, 1, 0, 0, 0).unwrap()
}

/// Local time on the fixture day.
pub fn at(hour: i64, minute: i64) -> DateTime<FixedOffset> {
    midnight() + TimeDelta::minutes(hour * 60 + minute)
}

/// Minutes after midnight of each phase, chronological.
pub const DAY_MINUTES: [i64; 14] = [
    60, 180, 240, 280, 320, 330, 360, 720, 1080, 1110, 1120, 1160, 1200, 1260,
];

/// A complete day with default tones; golden hour ends at 06:00, noon at 12:00.
pub fn full_day(wrap: Wrap) -> Palette {
    let instants = SolarPhase::ALL
        .into_iter()
        .zip(DAY_MINUTES)
        .map(|(p, m)| NamedInstant::new(p, midnight() + TimeDelta::minutes(m), p.default_tone()))
        .collect();
    Palette::new(midnight().date_naive(), offset(), instants, 210, wrap).unwrap()
}

/// Just sunrise at 06:00 (55,55) and solar noon at 12:00 (85,85).
pub fn sunrise_noon() -> Vec<NamedInstant> {
    vec![
        NamedInstant::new(SolarPhase::Sunrise, at(6, 0), Tone::new(55, 55)),
        NamedInstant::new(SolarPhase::SolarNoon, at(12, 0), Tone::new(85, 85)),
    ]
}
