//! End-to-end palette behavior: oracle, interpolation, timeline, colors.

mod common;

use chrono::{FixedOffset, NaiveDate, TimeDelta, TimeZone};
use proptest::prelude::*;

use solor::color::{Hsl, Rgb};
use solor::palette::{NamedInstant, Palette, PaletteError, PaletteSettings, Wrap, build_palette, interpolate};
use solor::phase::{SolarPhase, Tone};
use solor::solar::{Coordinates, SolarOracle, Spa};
use solor::timeline::{DEFAULT_MARK_STEP, Timeline};

#[test]
fn sunrise_to_noon_midpoint() {
    let instants = common::sunrise_noon();
    let tone = interpolate(common::at(9, 0), &instants, Wrap::Cyclic);
    assert_eq!(tone, Some(Tone::new(70, 70)));
}

#[test]
fn exact_instant_returns_its_tone() {
    let palette = common::full_day(Wrap::Cyclic);
    for instant in palette.instants() {
        assert_eq!(palette.tone_at(&instant.at), instant.tone, "{}", instant.phase);
    }
}

#[test]
fn timeline_fills_the_day() {
    let palette = common::full_day(Wrap::Cyclic);
    let timeline = Timeline::build(&palette, DEFAULT_MARK_STEP);
    assert_eq!(timeline.segments.len(), 15);
    assert!((timeline.total_height() - 1.0).abs() < 1e-9);

    let labels: Vec<_> = timeline.marks.iter().filter_map(|m| m.label.as_deref()).collect();
    assert!(labels.contains(&"0600"));
    assert!(!labels.contains(&"0630"));
}

#[test]
fn half_hour_marks_carry_no_label() {
    let palette = common::full_day(Wrap::Cyclic);
    let timeline = Timeline::build(&palette, 30);
    assert_eq!(timeline.marks.len(), 48);
    let mark = timeline.marks.iter().find(|m| m.minute == 390).unwrap();
    assert_eq!(mark.label, None);
    let mark = timeline.marks.iter().find(|m| m.minute == 360).unwrap();
    assert_eq!(mark.label.as_deref(), Some("0600"));
}

#[test]
fn wrap_modes_differ_only_across_midnight() {
    let cyclic = common::full_day(Wrap::Cyclic);
    let same_day = common::full_day(Wrap::SameDay);

    let noonish = common::at(9, 0);
    assert_eq!(cyclic.tone_at(&noonish), same_day.tone_at(&noonish));

    // Before nadir, cyclic interpolates from last night toward nadir.
    let early = common::at(0, 30);
    let tone = cyclic.tone_at(&early);
    assert!(tone.lightness >= 15 && tone.lightness <= 25, "{tone:?}");
    assert_ne!(tone, same_day.tone_at(&early));
}

#[test]
fn readable_text_contrasts_with_background() {
    let palette = common::full_day(Wrap::Cyclic);
    assert_eq!(palette.phase_color(SolarPhase::SolarNoon).readable_text(), Rgb::BLACK);
    assert_eq!(palette.phase_color(SolarPhase::Nadir).readable_text(), Rgb::WHITE);
}

#[test]
fn oracle_orders_phases_at_mid_latitude() {
    let paris = Coordinates::new(48.8566, 2.3522);
    let date = NaiveDate::from_ymd_opt(2024, 10, 1).unwrap();
    let times = Spa.phase_times_on(date, &common::offset(), paris);
    assert!(times.missing().is_empty());

    let ordered: Vec<_> = SolarPhase::ALL.iter().map(|&p| times.get(p).unwrap()).collect();
    assert!(ordered.windows(2).all(|w| w[0] <= w[1]));
}

#[test]
fn polar_summer_fails_loudly() {
    let tromso = Coordinates::new(69.6492, 18.9553);
    let now = common::at(12, 0);
    let err = build_palette(&Spa, tromso, now, &PaletteSettings::default()).unwrap_err();
    match err {
        PaletteError::MissingPhases(phases) => {
            assert!(phases.contains(&SolarPhase::Sunrise));
            assert!(phases.contains(&SolarPhase::Night));
        }
        other => panic!("expected MissingPhases, got {other:?}"),
    }
}

#[test]
fn built_palette_colors_noon_brightest() {
    let madrid = Coordinates::new(40.4168, -3.7038);
    let palette = build_palette(&Spa, madrid, common::at(12, 0), &PaletteSettings::default())
        .unwrap();
    assert_eq!(palette.instants().len(), 14);
    let noon = palette.get(SolarPhase::SolarNoon).unwrap();
    assert_eq!(palette.color_at(&noon.at), Hsl::new(210, 85, 85));
    // 2024-06-01 in Madrid at UTC+2: solar noon shortly after 14:00 local
    assert_eq!(noon.at.format("%H").to_string(), "14");
}

fn shifted(instant: &NamedInstant, days: i64) -> NamedInstant {
    NamedInstant::new(instant.phase, instant.at + TimeDelta::days(days), instant.tone)
}

fn instant_of(palette: &Palette, phase: SolarPhase) -> NamedInstant {
    *palette.get(phase).unwrap()
}

#[test]
fn night_after_midnight_blends_from_yesterdays_dusk() {
    // Kashgar keeps Beijing time, so astronomical night starts after midnight in June.
    let offset = FixedOffset::east_opt(8 * 3600).unwrap();
    let now = offset.with_ymd_and_hms(2024, 6, 21, 12, 0, 0).unwrap();
    let kashgar = Coordinates::new(39.47, 75.99);
    let palette = build_palette(&Spa, kashgar, now, &PaletteSettings::default()).unwrap();

    let night = instant_of(&palette, SolarPhase::Night);
    assert!(night.at.date_naive() > palette.date(), "night at {}", night.at);

    let midnight = palette.midnight();
    let dusk = instant_of(&palette, SolarPhase::NauticalDusk);
    let expected = interpolate(midnight, &[shifted(&dusk, -1), shifted(&night, -1)], Wrap::SameDay);
    let tone = palette.tone_at(&midnight);
    assert_eq!(Some(tone), expected);
    assert!((25..=35).contains(&tone.lightness), "{tone:?}");
}

#[test]
fn nadir_before_midnight_blends_toward_tomorrows_night_end() {
    // Harbin sits far east of its zone meridian, so nadir falls the evening before.
    let offset = FixedOffset::east_opt(8 * 3600).unwrap();
    let now = offset.with_ymd_and_hms(2024, 12, 21, 12, 0, 0).unwrap();
    let harbin = Coordinates::new(45.75, 126.6);
    let palette = build_palette(&Spa, harbin, now, &PaletteSettings::default()).unwrap();

    let nadir = instant_of(&palette, SolarPhase::Nadir);
    assert!(nadir.at.date_naive() < palette.date(), "nadir at {}", nadir.at);

    let late = palette.midnight() + TimeDelta::minutes(1439);
    let night_end = instant_of(&palette, SolarPhase::NightEnd);
    let expected = interpolate(late, &[shifted(&nadir, 1), shifted(&night_end, 1)], Wrap::SameDay);
    let tone = palette.tone_at(&late);
    assert_eq!(Some(tone), expected);
    assert!((15..=25).contains(&tone.lightness), "{tone:?}");
}

#[test]
fn cyclic_tones_stay_in_range_when_phases_cross_midnight() {
    let offset = FixedOffset::east_opt(8 * 3600).unwrap();
    for (place, date) in [
        (Coordinates::new(39.47, 75.99), (2024, 6, 21)),
        (Coordinates::new(45.75, 126.6), (2024, 12, 21)),
    ] {
        let now = offset.with_ymd_and_hms(date.0, date.1, date.2, 12, 0, 0).unwrap();
        let palette = build_palette(&Spa, place, now, &PaletteSettings::default()).unwrap();
        for minute in (0..1440).step_by(5) {
            let tone = palette.tone_at(&(palette.midnight() + TimeDelta::minutes(minute)));
            assert!((15..=85).contains(&tone.lightness), "{place:?} minute {minute}: {tone:?}");
        }
    }
}

proptest! {
    #[test]
    fn interpolation_stays_between_neighbors(offset in 0i64..=360) {
        let instants = common::sunrise_noon();
        let query = common::at(6, 0) + TimeDelta::minutes(offset);
        let tone = interpolate(query, &instants, Wrap::Cyclic).unwrap();
        prop_assert!((55..=85).contains(&tone.saturation));
        prop_assert!((55..=85).contains(&tone.lightness));
    }

    #[test]
    fn interpolation_is_monotonic(a in 0i64..=360, b in 0i64..=360) {
        let instants = common::sunrise_noon();
        let (lo, hi) = if a <= b { (a, b) } else { (b, a) };
        let start = common::at(6, 0);
        let t_lo = interpolate(start + TimeDelta::minutes(lo), &instants, Wrap::Cyclic).unwrap();
        let t_hi = interpolate(start + TimeDelta::minutes(hi), &instants, Wrap::Cyclic).unwrap();
        prop_assert!(t_lo.lightness <= t_hi.lightness);
    }

    #[test]
    fn interpolation_is_idempotent(minute in 0i64..1440) {
        let palette = common::full_day(Wrap::Cyclic);
        let query = common::midnight() + TimeDelta::minutes(minute);
        prop_assert_eq!(palette.tone_at(&query), palette.tone_at(&query));
    }

    #[test]
    fn cyclic_tones_stay_within_extremes(minute in 0i64..1440) {
        let palette = common::full_day(Wrap::Cyclic);
        let query = common::midnight() + TimeDelta::minutes(minute);
        let tone = palette.tone_at(&query);
        prop_assert!((15..=85).contains(&tone.lightness));
    }
}
