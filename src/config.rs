//! TOML-based configuration and location presets.

use std::collections::BTreeMap;
use std::fs;
use std::path::Path;

use chrono::FixedOffset;
use serde::Deserialize;

use crate::color::DEFAULT_HUE;
use crate::palette::{PaletteSettings, Wrap};
use crate::phase::{SolarPhase, Tone, ToneTable};
use crate::solar::Coordinates;
use crate::timeline::{DEFAULT_MARK_STEP, MINUTES_PER_DAY};

/// Largest accepted UTC offset (18 hours) in minutes.
const MAX_OFFSET_MINUTES: i32 = 18 * 60;

/// Accepted `logging.level` values.
const LOG_LEVELS: &[&str] = &["off", "error", "warn", "info", "debug", "trace"];

/// Top-level configuration parsed from TOML.
///
/// All sections have defaults. Load from TOML with
/// [`AppConfig::from_toml_file`] or start from a named preset with
/// [`AppConfig::from_preset`].
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct AppConfig {
    /// Observer position.
    #[serde(default)]
    pub location: LocationConfig,
    /// Hue, wrap mode, and tone overrides.
    #[serde(default)]
    pub palette: PaletteConfig,
    /// Clock and timeline layout.
    #[serde(default)]
    pub display: DisplayConfig,
    /// Log filter.
    #[serde(default)]
    pub logging: LoggingConfig,
}

/// Observer position.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct LocationConfig {
    /// Latitude in degrees, positive north.
    pub latitude: Option<f64>,
    /// Longitude in degrees, positive east.
    pub longitude: Option<f64>,
    /// Observer height in meters.
    pub height_m: f64,
}

/// Palette parameters.
#[derive(Debug, Clone, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct PaletteConfig {
    /// Hue in degrees (0-359).
    pub hue: u16,
    /// Wrap mode: `"cyclic"` or `"same_day"`.
    pub wrap: Wrap,
    /// Tone overrides keyed by phase name (e.g. `solarNoon`).
    pub tones: BTreeMap<String, ToneConfig>,
}

impl Default for PaletteConfig {
    fn default() -> Self {
        Self {
            hue: DEFAULT_HUE,
            wrap: Wrap::default(),
            tones: BTreeMap::new(),
        }
    }
}

/// A saturation/lightness override.
#[derive(Debug, Clone, Copy, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct ToneConfig {
    pub saturation: u8,
    pub lightness: u8,
}

/// Clock and timeline layout.
#[derive(Debug, Clone, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct DisplayConfig {
    /// Fixed UTC offset in minutes; the system offset is used when absent.
    pub utc_offset_minutes: Option<i32>,
    /// Minutes between timeline marks (must divide 1440).
    pub mark_step_minutes: u32,
}

impl Default for DisplayConfig {
    fn default() -> Self {
        Self {
            utc_offset_minutes: None,
            mark_step_minutes: DEFAULT_MARK_STEP,
        }
    }
}

/// Log filter.
#[derive(Debug, Clone, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct LoggingConfig {
    /// One of `off`, `error`, `warn`, `info`, `debug`, `trace`.
    pub level: String,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: "warn".to_string(),
        }
    }
}

/// Configuration error with field path and constraint description.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("config error: {field}: {message}")]
pub struct ConfigError {
    /// Dotted field path (e.g., `"location.latitude"`).
    pub field: String,
    /// Human-readable constraint description.
    pub message: String,
}

impl ConfigError {
    fn new(field: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            field: field.into(),
            message: message.into(),
        }
    }
}

impl AppConfig {
    /// Available preset names.
    pub const PRESETS: &[&str] = &["greenwich", "reykjavik", "singapore", "tromso"];

    fn at(latitude: f64, longitude: f64, utc_offset_minutes: i32) -> Self {
        Self {
            location: LocationConfig {
                latitude: Some(latitude),
                longitude: Some(longitude),
                height_m: 0.0,
            },
            display: DisplayConfig {
                utc_offset_minutes: Some(utc_offset_minutes),
                ..DisplayConfig::default()
            },
            ..Self::default()
        }
    }

    /// Royal Observatory, Greenwich.
    pub fn greenwich() -> Self {
        Self::at(51.4769, -0.0005, 0)
    }

    /// Reykjavik: long summer twilight, no astronomical night in June.
    pub fn reykjavik() -> Self {
        Self::at(64.1466, -21.9426, 0)
    }

    /// Singapore: near-equatorial, almost constant day length.
    pub fn singapore() -> Self {
        Self::at(1.2903, 103.8519, 8 * 60)
    }

    /// Tromsø: polar day in summer, polar night in winter.
    pub fn tromso() -> Self {
        Self::at(69.6492, 18.9553, 60)
    }

    /// Loads a configuration from a named preset.
    ///
    /// # Errors
    ///
    /// Returns a `ConfigError` if the preset name is unknown.
    pub fn from_preset(name: &str) -> Result<Self, ConfigError> {
        match name {
            "greenwich" => Ok(Self::greenwich()),
            "reykjavik" => Ok(Self::reykjavik()),
            "singapore" => Ok(Self::singapore()),
            "tromso" => Ok(Self::tromso()),
            _ => Err(ConfigError::new(
                "preset",
                format!(
                    "unknown preset \"{name}\", available: {}",
                    Self::PRESETS.join(", ")
                ),
            )),
        }
    }

    /// Parses a configuration from a TOML file.
    ///
    /// # Errors
    ///
    /// Returns a `ConfigError` if the file cannot be read or the TOML is invalid.
    pub fn from_toml_file(path: &Path) -> Result<Self, ConfigError> {
        let content = fs::read_to_string(path).map_err(|e| {
            ConfigError::new("config", format!("cannot read \"{}\": {e}", path.display()))
        })?;
        Self::from_toml_str(&content)
    }

    /// Parses a configuration from a TOML string.
    ///
    /// # Errors
    ///
    /// Returns a `ConfigError` if the TOML is invalid or contains unknown fields.
    pub fn from_toml_str(s: &str) -> Result<Self, ConfigError> {
        toml::from_str(s).map_err(|e| ConfigError::new("toml", e.to_string()))
    }

    /// Validates all fields and returns a list of errors.
    ///
    /// Returns an empty vector if configuration is valid.
    pub fn validate(&self) -> Vec<ConfigError> {
        let mut errors = Vec::new();

        let loc = &self.location;
        match (loc.latitude, loc.longitude) {
            (Some(_), None) => {
                errors.push(ConfigError::new(
                    "location.longitude",
                    "required when location.latitude is set",
                ));
            }
            (None, Some(_)) => {
                errors.push(ConfigError::new(
                    "location.latitude",
                    "required when location.longitude is set",
                ));
            }
            _ => {}
        }
        if let Some(lat) = loc.latitude {
            if !(-90.0..=90.0).contains(&lat) {
                errors.push(ConfigError::new("location.latitude", "must be in [-90, 90]"));
            }
        }
        if let Some(lon) = loc.longitude {
            if !(-180.0..=180.0).contains(&lon) {
                errors.push(ConfigError::new("location.longitude", "must be in [-180, 180]"));
            }
        }
        if !(loc.height_m >= 0.0) {
            errors.push(ConfigError::new("location.height_m", "must be >= 0"));
        }

        let pal = &self.palette;
        if pal.hue >= 360 {
            errors.push(ConfigError::new("palette.hue", "must be in [0, 360)"));
        }
        for (name, tone) in &pal.tones {
            let field = format!("palette.tones.{name}");
            if let Err(e) = name.parse::<SolarPhase>() {
                errors.push(ConfigError::new(field, e.to_string()));
                continue;
            }
            if tone.saturation > 100 || tone.lightness > 100 {
                errors.push(ConfigError::new(field, "saturation and lightness must be <= 100"));
            }
        }

        let disp = &self.display;
        if let Some(offset) = disp.utc_offset_minutes {
            if offset.abs() > MAX_OFFSET_MINUTES {
                errors.push(ConfigError::new(
                    "display.utc_offset_minutes",
                    format!("must be in [-{MAX_OFFSET_MINUTES}, {MAX_OFFSET_MINUTES}]"),
                ));
            }
        }
        let step = disp.mark_step_minutes;
        if step == 0 || step > MINUTES_PER_DAY || MINUTES_PER_DAY % step != 0 {
            errors.push(ConfigError::new(
                "display.mark_step_minutes",
                format!("must be a divisor of {MINUTES_PER_DAY}"),
            ));
        }

        if !LOG_LEVELS.contains(&self.logging.level.as_str()) {
            errors.push(ConfigError::new(
                "logging.level",
                format!("must be one of {}", LOG_LEVELS.join(", ")),
            ));
        }

        errors
    }

    /// Configured observer position, if both coordinates are set.
    pub fn coordinates(&self) -> Option<Coordinates> {
        let loc = &self.location;
        Some(Coordinates::new(loc.latitude?, loc.longitude?).with_height(loc.height_m))
    }

    /// Configured UTC offset, if any.
    pub fn utc_offset(&self) -> Option<FixedOffset> {
        self.display
            .utc_offset_minutes
            .and_then(|m| FixedOffset::east_opt(m * 60))
    }

    /// Palette settings with tone overrides applied.
    ///
    /// # Errors
    ///
    /// Returns the first `ConfigError` for an invalid tone key;
    /// call [`AppConfig::validate`] first to collect every error.
    pub fn palette_settings(&self) -> Result<PaletteSettings, ConfigError> {
        let mut tones = ToneTable::default();
        for (name, tone) in &self.palette.tones {
            let phase = name
                .parse::<SolarPhase>()
                .map_err(|e| ConfigError::new(format!("palette.tones.{name}"), e.to_string()))?;
            tones.set(phase, Tone::new(tone.saturation, tone.lightness));
        }

        Ok(PaletteSettings {
            hue: self.palette.hue % 360,
            wrap: self.palette.wrap,
            tones,
        })
    }
}
