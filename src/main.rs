//! solor entry point: CLI wiring and config-driven palette construction.

use std::process;

use chrono::{DateTime, FixedOffset, Local, Utc};

use solor::cli::{self, CliOptions};
use solor::config::AppConfig;
use solor::io::export::{export_palette_csv, export_timeline_csv};
use solor::logging;
use solor::palette::{Palette, build_day};
use solor::position::FixedPosition;
use solor::report::DayReport;
use solor::solar::{Coordinates, Spa};
use solor::timeline::Timeline;

fn fail(message: impl std::fmt::Display) -> ! {
    eprintln!("error: {message}");
    process::exit(1);
}

/// Loads config: `--config` takes priority, then `--preset`, then defaults.
fn load_config(cli: &CliOptions) -> AppConfig {
    let loaded = if let Some(ref path) = cli.config {
        AppConfig::from_toml_file(path)
    } else if let Some(ref name) = cli.preset {
        AppConfig::from_preset(name)
    } else {
        Ok(AppConfig::default())
    };
    let mut cfg = loaded.unwrap_or_else(|e| fail(e));

    if let Some(c) = cli.coordinates() {
        cfg.location.latitude = Some(c.latitude);
        cfg.location.longitude = Some(c.longitude);
    }

    let errors = cfg.validate();
    if !errors.is_empty() {
        for e in &errors {
            eprintln!("{e}");
        }
        process::exit(1);
    }
    cfg
}

/// Current instant at the configured offset, or the system's local offset.
fn current_instant(cfg: &AppConfig) -> DateTime<FixedOffset> {
    let now = Utc::now();
    match cfg.utc_offset() {
        Some(offset) => now.with_timezone(&offset),
        None => {
            let local = now.with_timezone(&Local);
            local.with_timezone(local.offset())
        }
    }
}

fn location_label(cli: &CliOptions, c: Coordinates) -> String {
    match (&cli.preset, &cli.config) {
        (Some(name), _) => name.clone(),
        (None, Some(path)) => path.display().to_string(),
        (None, None) => format!("{:.4}, {:.4}", c.latitude, c.longitude),
    }
}

fn export(palette: &Palette, mark_step: u32, cli: &CliOptions) {
    if let Some(ref path) = cli.export_palette {
        if let Err(e) = export_palette_csv(palette, path) {
            fail(format_args!("failed to write CSV: {e}"));
        }
        eprintln!("Palette written to {}", path.display());
    }
    if let Some(ref path) = cli.export_timeline {
        let timeline = Timeline::build(palette, mark_step);
        if let Err(e) = export_timeline_csv(&timeline, path) {
            fail(format_args!("failed to write CSV: {e}"));
        }
        eprintln!("Timeline written to {}", path.display());
    }
}

fn main() {
    let cli = cli::parse_args().unwrap_or_else(|e| {
        eprintln!("error: {e}");
        cli::print_usage();
        process::exit(1);
    });
    if cli.help {
        cli::print_usage();
        return;
    }

    let cfg = load_config(&cli);

    // Log lines would tear the alternate screen.
    let level = if cli.tui { "off" } else { cfg.logging.level.as_str() };
    logging::init(level);

    #[cfg(not(feature = "tui"))]
    if cli.tui {
        fail("solor was built without the `tui` feature");
    }

    let settings = cfg.palette_settings().unwrap_or_else(|e| fail(e));
    let mark_step = cfg.display.mark_step_minutes;
    let now = cli::resolve_instant(current_instant(&cfg), cli.date, cli.at);

    let built = build_day(&FixedPosition::from(cfg.coordinates()), &Spa, now, &settings);

    #[cfg(feature = "tui")]
    if cli.tui {
        let app = match built {
            Ok((position, palette)) => {
                solor::tui::App::new(palette, mark_step, now, location_label(&cli, position))
            }
            Err(error) => solor::tui::App::empty(error, now),
        };
        if let Err(e) = solor::tui::run(app) {
            fail(format_args!("TUI crashed: {e}"));
        }
        return;
    }

    let (position, palette) = built.unwrap_or_else(|e| fail(e));
    log::info!("palette for {}", location_label(&cli, position));

    export(&palette, mark_step, &cli);

    println!("{}", DayReport::new(&palette, now));
}
