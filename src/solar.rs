//! Solar-position oracle: named phase instants for a date and location.
//!
//! The palette never computes sun positions itself. It asks a
//! [`SolarOracle`] for the day's phase instants and treats the answer as
//! ground truth. [`Spa`] is the shipped oracle; it reads rise, transit and
//! set times from the NREL solar position algorithm in `solar_positioning`.

use chrono::{DateTime, Datelike, NaiveDate, NaiveTime, TimeDelta, TimeZone, Utc};
use serde::{Deserialize, Serialize};
use solar_positioning::time::DeltaT;
use solar_positioning::{Horizon, SunriseResult, spa};

use crate::phase::SolarPhase;

/// ΔT used when no estimate exists for the requested year.
const FALLBACK_DELTA_T: f64 = 69.0;

/// Sun altitude angles (degrees) paired with the morning and evening phase
/// crossing them.
const ANGLES: [(f64, SolarPhase, SolarPhase); 6] = [
    (-0.833, SolarPhase::Sunrise, SolarPhase::Sunset),
    (-0.3, SolarPhase::SunriseEnd, SolarPhase::SunsetStart),
    (-6.0, SolarPhase::Dawn, SolarPhase::Dusk),
    (-12.0, SolarPhase::NauticalDawn, SolarPhase::NauticalDusk),
    (-18.0, SolarPhase::NightEnd, SolarPhase::Night),
    (6.0, SolarPhase::GoldenHourEnd, SolarPhase::GoldenHour),
];

/// Observer position on the Earth's surface.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Coordinates {
    /// Latitude in degrees, positive north.
    pub latitude: f64,
    /// Longitude in degrees, positive east.
    pub longitude: f64,
    /// Observer height above the horizon plane in meters.
    #[serde(default)]
    pub height_m: f64,
}

impl Coordinates {
    /// Creates a sea-level position.
    pub fn new(latitude: f64, longitude: f64) -> Self {
        Self {
            latitude,
            longitude,
            height_m: 0.0,
        }
    }

    /// Returns the same position at the given observer height.
    pub fn with_height(self, height_m: f64) -> Self {
        Self { height_m, ..self }
    }
}

/// The instants an oracle reports for one day, in [`SolarPhase::ALL`] order.
///
/// `None` marks a phase that does not occur on that day (polar day or night).
#[derive(Debug, Clone, PartialEq)]
pub struct PhaseTimes {
    times: [Option<DateTime<Utc>>; 14],
}

impl PhaseTimes {
    /// Creates an empty set with every phase missing.
    pub fn empty() -> Self {
        Self { times: [None; 14] }
    }

    /// Returns the instant of `phase`, if it occurs.
    pub fn get(&self, phase: SolarPhase) -> Option<DateTime<Utc>> {
        self.times[phase as usize]
    }

    /// Records the instant of `phase`.
    pub fn set(&mut self, phase: SolarPhase, at: Option<DateTime<Utc>>) {
        self.times[phase as usize] = at;
    }

    /// Iterates over every phase and its instant.
    pub fn iter(&self) -> impl Iterator<Item = (SolarPhase, Option<DateTime<Utc>>)> + '_ {
        SolarPhase::ALL.into_iter().map(|p| (p, self.get(p)))
    }

    /// Returns the phases that do not occur.
    pub fn missing(&self) -> Vec<SolarPhase> {
        self.iter()
            .filter_map(|(p, at)| at.is_none().then_some(p))
            .collect()
    }
}

/// Source of truth for a day's solar phase instants.
pub trait SolarOracle {
    /// Returns the phase instants for the UTC calendar day containing
    /// `reference`.
    fn phase_times(&self, reference: DateTime<Utc>, at: Coordinates) -> PhaseTimes;

    /// Returns the phase instants for `date`, evaluated at the local noon of
    /// that date for the given UTC offset.
    fn phase_times_on<Tz: TimeZone>(&self, date: NaiveDate, tz: &Tz, at: Coordinates) -> PhaseTimes
    where
        Self: Sized,
    {
        let noon = date.and_time(NaiveTime::from_hms_opt(12, 0, 0).unwrap_or_default());
        let reference = tz
            .from_local_datetime(&noon)
            .earliest()
            .map_or_else(|| Utc.from_utc_datetime(&noon), |dt| dt.with_timezone(&Utc));
        self.phase_times(reference, at)
    }
}

/// Solar oracle backed by the SPA sunrise/sunset search.
#[derive(Debug, Clone, Copy, Default)]
pub struct Spa;

impl SolarOracle for Spa {
    fn phase_times(&self, reference: DateTime<Utc>, at: Coordinates) -> PhaseTimes {
        let date = reference.date_naive();
        let delta_t = DeltaT::estimate_from_date(date.year(), date.month())
            .unwrap_or(FALLBACK_DELTA_T);
        let dip = horizon_dip(at.height_m);

        let mut times = PhaseTimes::empty();
        for (angle, rise, set) in ANGLES {
            let horizon = Horizon::Custom(angle + dip);
            let result = match spa::sunrise_sunset_utc_for_horizon(
                date.year(),
                date.month(),
                date.day(),
                at.latitude,
                at.longitude,
                delta_t,
                horizon,
            ) {
                Ok(result) => result,
                Err(e) => {
                    log::warn!("no {rise}/{set} for {date} at ({}, {}): {e}", at.latitude, at.longitude);
                    continue;
                }
            };
            match result {
                SunriseResult::RegularDay {
                    sunrise,
                    transit,
                    sunset,
                } => {
                    times.set(rise, at_hours(date, sunrise.hours()));
                    times.set(set, at_hours(date, sunset.hours()));
                    record_transit(&mut times, date, transit.hours());
                }
                SunriseResult::AllDay { transit } | SunriseResult::AllNight { transit } => {
                    log::debug!(
                        "sun never crosses {angle}° at latitude {}, {rise}/{set} omitted",
                        at.latitude
                    );
                    record_transit(&mut times, date, transit.hours());
                }
            }
        }

        times
    }
}

fn record_transit(times: &mut PhaseTimes, date: NaiveDate, hours: f64) {
    if times.get(SolarPhase::SolarNoon).is_some() {
        return;
    }
    let noon = at_hours(date, hours);
    times.set(SolarPhase::SolarNoon, noon);
    times.set(SolarPhase::Nadir, noon.map(|n| n - TimeDelta::hours(12)));
}

/// The instant `hours` after UTC midnight of `date`; hours may fall outside
/// `0..24` when the event lands on a neighboring day.
fn at_hours(date: NaiveDate, hours: f64) -> Option<DateTime<Utc>> {
    if !hours.is_finite() {
        return None;
    }
    let midnight = Utc.from_utc_datetime(&date.and_time(NaiveTime::MIN));
    let millis = (hours * 3_600_000.0).round() as i64;
    midnight.checked_add_signed(TimeDelta::milliseconds(millis))
}

/// Horizon dip (degrees) for an observer above the horizon plane.
fn horizon_dip(height_m: f64) -> f64 {
    -2.076 * height_m.max(0.0).sqrt() / 60.0
}
