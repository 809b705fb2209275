//! Command-line parsing.

use std::env;
use std::path::PathBuf;

use chrono::{DateTime, FixedOffset, NaiveDate, NaiveTime, TimeZone};

use crate::solar::Coordinates;

#[derive(Debug, Clone, PartialEq)]
pub struct CliOptions {
    pub config: Option<PathBuf>,
    pub preset: Option<String>,
    pub latitude: Option<f64>,
    pub longitude: Option<f64>,
    pub date: Option<NaiveDate>,
    pub at: Option<NaiveTime>,
    pub export_palette: Option<PathBuf>,
    pub export_timeline: Option<PathBuf>,
    pub tui: bool,
    pub help: bool,
}

impl Default for CliOptions {
    fn default() -> Self {
        Self {
            config: None,
            preset: None,
            latitude: None,
            longitude: None,
            date: None,
            at: None,
            export_palette: None,
            export_timeline: None,
            tui: false,
            help: false,
        }
    }
}

impl CliOptions {
    /// Position given on the command line, if both coordinates are present.
    pub fn coordinates(&self) -> Option<Coordinates> {
        Some(Coordinates::new(self.latitude?, self.longitude?))
    }
}

pub fn parse_args() -> Result<CliOptions, String> {
    let args: Vec<String> = env::args().skip(1).collect();
    parse_args_from(args)
}

pub fn parse_args_from(args: Vec<String>) -> Result<CliOptions, String> {
    let mut opts = CliOptions::default();
    let mut i = 0usize;

    while i < args.len() {
        match args[i].as_str() {
            "--config" => {
                i += 1;
                let path = args.next_or_err(i, "missing value for --config (expected a TOML file path)")?;
                if opts.config.replace(PathBuf::from(path)).is_some() {
                    return Err("--config provided more than once".to_string());
                }
            }
            "--preset" => {
                i += 1;
                let name = args.next_or_err(i, "missing value for --preset (expected a preset name)")?;
                if opts.preset.replace(name.to_string()).is_some() {
                    return Err("--preset provided more than once".to_string());
                }
            }
            "--lat" => {
                i += 1;
                let value = args.next_or_err(i, "missing value for --lat (expected degrees)")?;
                let lat = parse_degrees("--lat", value, 90.0)?;
                if opts.latitude.replace(lat).is_some() {
                    return Err("--lat provided more than once".to_string());
                }
            }
            "--lon" => {
                i += 1;
                let value = args.next_or_err(i, "missing value for --lon (expected degrees)")?;
                let lon = parse_degrees("--lon", value, 180.0)?;
                if opts.longitude.replace(lon).is_some() {
                    return Err("--lon provided more than once".to_string());
                }
            }
            "--date" => {
                i += 1;
                let value = args.next_or_err(i, "missing value for --date (expected YYYY-MM-DD)")?;
                let date = NaiveDate::parse_from_str(value, "%Y-%m-%d")
                    .map_err(|_| format!("--date value \"{value}\" is not a valid YYYY-MM-DD date"))?;
                if opts.date.replace(date).is_some() {
                    return Err("--date provided more than once".to_string());
                }
            }
            "--at" => {
                i += 1;
                let value = args.next_or_err(i, "missing value for --at (expected HH:MM)")?;
                let at = parse_clock(value)
                    .ok_or_else(|| format!("--at value \"{value}\" is not a valid HH:MM time"))?;
                if opts.at.replace(at).is_some() {
                    return Err("--at provided more than once".to_string());
                }
            }
            "--export-palette" => {
                i += 1;
                let path = args.next_or_err(i, "missing value for --export-palette (expected a file path)")?;
                if opts.export_palette.replace(PathBuf::from(path)).is_some() {
                    return Err("--export-palette provided more than once".to_string());
                }
            }
            "--export-timeline" => {
                i += 1;
                let path = args.next_or_err(i, "missing value for --export-timeline (expected a file path)")?;
                if opts.export_timeline.replace(PathBuf::from(path)).is_some() {
                    return Err("--export-timeline provided more than once".to_string());
                }
            }
            "--tui" => opts.tui = true,
            "--help" | "-h" => opts.help = true,
            other => return Err(format!("unknown argument: {other}")),
        }
        i += 1;
    }

    if opts.config.is_some() && opts.preset.is_some() {
        return Err(
            "arguments `--config` and `--preset` are mutually exclusive; choose one source"
                .to_string(),
        );
    }

    if opts.latitude.is_some() != opts.longitude.is_some() {
        return Err("arguments `--lat` and `--lon` must be given together".to_string());
    }

    Ok(opts)
}

/// The query instant: `now`, moved to `date` and/or `at` when given.
///
/// A date without a time keeps the wall-clock time of `now`.
pub fn resolve_instant(
    now: DateTime<FixedOffset>,
    date: Option<NaiveDate>,
    at: Option<NaiveTime>,
) -> DateTime<FixedOffset> {
    if date.is_none() && at.is_none() {
        return now;
    }
    let local = date
        .unwrap_or_else(|| now.date_naive())
        .and_time(at.unwrap_or_else(|| now.time()));
    now.offset()
        .from_local_datetime(&local)
        .single()
        .unwrap_or(now)
}

/// Parses `HH:MM` (or `HHMM`) into a wall-clock time.
pub fn parse_clock(value: &str) -> Option<NaiveTime> {
    NaiveTime::parse_from_str(value, "%H:%M")
        .or_else(|_| NaiveTime::parse_from_str(value, "%H%M"))
        .ok()
}

fn parse_degrees(flag: &str, value: &str, limit: f64) -> Result<f64, String> {
    let deg = value
        .parse::<f64>()
        .map_err(|_| format!("{flag} value \"{value}\" is not a number"))?;
    if !deg.is_finite() || deg.abs() > limit {
        return Err(format!("{flag} value {deg} must be within ±{limit}"));
    }
    Ok(deg)
}

trait SliceArgExt {
    fn next_or_err(&self, index: usize, err: &str) -> Result<&str, String>;
}

impl SliceArgExt for [String] {
    fn next_or_err(&self, index: usize, err: &str) -> Result<&str, String> {
        self.get(index)
            .map(String::as_str)
            .ok_or_else(|| err.to_string())
    }
}

pub fn print_usage() {
    eprintln!("solor: the color of the sky, by time of day");
    eprintln!();
    eprintln!("Usage: solor [OPTIONS]");
    eprintln!();
    eprintln!("Options:");
    eprintln!("  --config <path>            Load settings from a TOML file");
    eprintln!("  --preset <name>            Use a built-in location (greenwich, reykjavik, singapore, tromso)");
    eprintln!("  --lat <deg> --lon <deg>    Observer position, overrides the config");
    eprintln!("  --date <YYYY-MM-DD>        Day to build the palette for (default: today)");
    eprintln!("  --at <HH:MM>               Query time on that day (default: now)");
    eprintln!("  --export-palette <path>    Write the palette to CSV");
    eprintln!("  --export-timeline <path>   Write the timeline segments to CSV");
    eprintln!("  --tui                      Open the terminal view (feature `tui`)");
    eprintln!("  --help                     Show this help message");
}
