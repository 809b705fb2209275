//! Runs the binary end to end.

use std::process::Command;

fn run(args: &[&str]) -> std::process::Output {
    Command::new(env!("CARGO_BIN_EXE_solor"))
        .args(args)
        .env_remove("RUST_LOG")
        .output()
        .expect("solor process should run")
}

#[test]
fn preset_prints_the_day_report() {
    let output = run(&["--preset", "greenwich", "--date", "2024-03-20", "--at", "12:00"]);
    assert!(
        output.status.success(),
        "stderr={}",
        String::from_utf8_lossy(&output.stderr)
    );
    let stdout = String::from_utf8(output.stdout).expect("stdout should be valid UTF-8");
    assert!(stdout.starts_with("solor for 2024-03-20 (UTC+00:00, wrap cyclic)"));
    assert_eq!(stdout.lines().filter(|l| l.contains("hsl(210,")).count(), 15);
    assert!(stdout.contains("now 1200"));
}

#[test]
fn config_file_applies_hue_and_offset() {
    let config = concat!(env!("CARGO_MANIFEST_DIR"), "/configs/paris.toml");
    let output = run(&["--config", config, "--date", "2024-09-21", "--at", "14:00"]);
    assert!(
        output.status.success(),
        "stderr={}",
        String::from_utf8_lossy(&output.stderr)
    );
    let stdout = String::from_utf8_lossy(&output.stdout);
    assert!(stdout.contains("UTC+02:00"));
    assert!(stdout.contains("solarNoon      hsl(30, 90%, 90%)"));
}

#[test]
fn missing_position_exits_non_zero() {
    let output = run(&["--date", "2024-03-20"]);
    assert!(!output.status.success());
    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(stderr.contains("position unavailable"), "stderr={stderr}");
}

#[test]
fn polar_summer_reports_missing_phases() {
    let output = run(&["--preset", "tromso", "--date", "2024-06-21"]);
    assert!(!output.status.success());
    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(stderr.contains("do not occur"), "stderr={stderr}");
}

#[test]
fn exports_palette_csv() {
    let path = std::env::temp_dir().join(format!("solor-palette-{}.csv", std::process::id()));
    let path_str = path.to_string_lossy().to_string();
    let output = run(&[
        "--lat", "40.4168", "--lon", "-3.7038", "--date", "2024-06-01", "--export-palette", &path_str,
    ]);
    assert!(
        output.status.success(),
        "stderr={}",
        String::from_utf8_lossy(&output.stderr)
    );
    let csv = std::fs::read_to_string(&path).expect("export should exist");
    let _ = std::fs::remove_file(&path);
    let mut lines = csv.lines();
    assert_eq!(lines.next(), Some("phase,time,hhmm,saturation,lightness,css,text"));
    assert_eq!(lines.count(), 14);
}

#[test]
fn conflicting_sources_are_rejected() {
    let output = run(&["--preset", "greenwich", "--config", "x.toml"]);
    assert!(!output.status.success());
    assert!(String::from_utf8_lossy(&output.stderr).contains("mutually exclusive"));
}
