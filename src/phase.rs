//! Solar phase labels and their fixed saturation/lightness targets.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

/// A named point in a day's solar cycle.
///
/// Variants are declared in their usual chronological order at mid
/// latitudes, which is also the order the oracle reports them in.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum SolarPhase {
    /// Darkest moment of the night (sun at its lowest).
    Nadir,
    /// Morning astronomical twilight starts (sun at -18°).
    NightEnd,
    /// Morning nautical twilight starts (sun at -12°).
    NauticalDawn,
    /// Morning civil twilight starts (sun at -6°).
    Dawn,
    /// Top edge of the sun appears on the horizon.
    Sunrise,
    /// Bottom edge of the sun touches the horizon.
    SunriseEnd,
    /// Morning golden hour ends (sun at +6°).
    GoldenHourEnd,
    /// Sun at its highest position.
    SolarNoon,
    /// Evening golden hour starts (sun at +6°).
    GoldenHour,
    /// Bottom edge of the sun touches the horizon.
    SunsetStart,
    /// Sun disappears below the horizon.
    Sunset,
    /// Evening nautical twilight starts (sun at -6°).
    Dusk,
    /// Evening astronomical twilight starts (sun at -12°).
    NauticalDusk,
    /// Dark enough for astronomical observations (sun at -18°).
    Night,
}

impl SolarPhase {
    /// Every phase, in chronological order.
    pub const ALL: [SolarPhase; 14] = [
        Self::Nadir,
        Self::NightEnd,
        Self::NauticalDawn,
        Self::Dawn,
        Self::Sunrise,
        Self::SunriseEnd,
        Self::GoldenHourEnd,
        Self::SolarNoon,
        Self::GoldenHour,
        Self::SunsetStart,
        Self::Sunset,
        Self::Dusk,
        Self::NauticalDusk,
        Self::Night,
    ];

    /// Returns the camelCase label used in config files and exports.
    pub fn name(self) -> &'static str {
        match self {
            Self::Nadir => "nadir",
            Self::NightEnd => "nightEnd",
            Self::NauticalDawn => "nauticalDawn",
            Self::Dawn => "dawn",
            Self::Sunrise => "sunrise",
            Self::SunriseEnd => "sunriseEnd",
            Self::GoldenHourEnd => "goldenHourEnd",
            Self::SolarNoon => "solarNoon",
            Self::GoldenHour => "goldenHour",
            Self::SunsetStart => "sunsetStart",
            Self::Sunset => "sunset",
            Self::Dusk => "dusk",
            Self::NauticalDusk => "nauticalDusk",
            Self::Night => "night",
        }
    }

    /// Returns the built-in tone for this phase.
    pub fn default_tone(self) -> Tone {
        let level = match self {
            Self::Nadir => 15,
            Self::NightEnd | Self::Night => 25,
            Self::NauticalDawn | Self::NauticalDusk => 35,
            Self::Dawn | Self::Dusk => 45,
            Self::Sunrise | Self::Sunset => 55,
            Self::SunriseEnd | Self::SunsetStart => 65,
            Self::GoldenHourEnd | Self::GoldenHour => 75,
            Self::SolarNoon => 85,
        };
        Tone::new(level, level)
    }
}

impl fmt::Display for SolarPhase {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Error returned when a string does not name a solar phase.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("unknown solar phase \"{0}\"")]
pub struct UnknownPhase(pub String);

impl FromStr for SolarPhase {
    type Err = UnknownPhase;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|p| p.name() == s)
            .ok_or_else(|| UnknownPhase(s.to_string()))
    }
}

/// A saturation/lightness pair, both expressed as percentages.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Tone {
    /// HSL saturation (0-100).
    pub saturation: u8,
    /// HSL lightness (0-100).
    pub lightness: u8,
}

impl Tone {
    /// Creates a tone, saturating both channels at 100.
    pub fn new(saturation: u8, lightness: u8) -> Self {
        Self {
            saturation: saturation.min(100),
            lightness: lightness.min(100),
        }
    }
}

/// Per-phase tone lookup table.
///
/// Starts from [`SolarPhase::default_tone`] and accepts individual overrides.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ToneTable {
    tones: [Tone; 14],
}

impl Default for ToneTable {
    fn default() -> Self {
        Self {
            tones: SolarPhase::ALL.map(SolarPhase::default_tone),
        }
    }
}

impl ToneTable {
    /// Returns the tone assigned to `phase`.
    pub fn get(&self, phase: SolarPhase) -> Tone {
        self.tones[phase as usize]
    }

    /// Replaces the tone assigned to `phase`.
    pub fn set(&mut self, phase: SolarPhase, tone: Tone) {
        self.tones[phase as usize] = tone;
    }
}
