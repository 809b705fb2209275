//! Plain-text day report.

use std::fmt;

use chrono::{DateTime, FixedOffset};

use crate::color::Hsl;
use crate::palette::{NamedInstant, Palette};
use crate::timeline::hhmm;

/// One palette line: `HHMM  phase  hsl(...)`.
pub struct InstantLine<'a> {
    instant: &'a NamedInstant,
    hue: u16,
}

impl fmt::Display for InstantLine<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let color = Hsl::from_tone(self.hue, self.instant.tone);
        write!(
            f,
            "{}  {:<14} {:<20} text={}",
            hhmm(&self.instant.at),
            self.instant.phase.name(),
            color.css(),
            color.readable_text(),
        )
    }
}

/// The palette for a day followed by the color at the query instant.
pub struct DayReport<'a> {
    pub palette: &'a Palette,
    pub now: DateTime<FixedOffset>,
}

impl<'a> DayReport<'a> {
    pub fn new(palette: &'a Palette, now: DateTime<FixedOffset>) -> Self {
        Self { palette, now }
    }

    /// Lines for each instant in time order.
    pub fn lines(&self) -> impl Iterator<Item = InstantLine<'a>> + 'a {
        let palette: &'a Palette = self.palette;
        let hue = palette.hue();
        palette
            .instants()
            .iter()
            .map(move |instant| InstantLine { instant, hue })
    }
}

impl fmt::Display for DayReport<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(
            f,
            "solor for {} (UTC{}, wrap {})",
            self.palette.date(),
            self.palette.offset(),
            self.palette.wrap()
        )?;
        for line in self.lines() {
            writeln!(f, "{line}")?;
        }
        let color = self.palette.color_at(&self.now);
        write!(
            f,
            "\nnow {}  {}  {}  text={}",
            hhmm(&self.now),
            color.css(),
            color.to_rgb(),
            color.readable_text()
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{TimeDelta, TimeZone};

    use crate::palette::Wrap;
    use crate::phase::SolarPhase;

    fn palette() -> Palette {
        let offset = FixedOffset::east_opt(3600).unwrap();
        let day = offset.with_ymd_and_hms(2024, 3, 20, 0, 0, 0).unwrap();
        let instants = SolarPhase::ALL
            .into_iter()
            .enumerate()
            .map(|(i, p)| NamedInstant::new(p, day + TimeDelta::hours(i as i64 + 1), p.default_tone()))
            .collect();
        Palette::new(day.date_naive(), offset, instants, 210, Wrap::Cyclic).unwrap()
    }

    #[test]
    fn report_lists_every_instant() {
        let p = palette();
        let now = p.midnight() + TimeDelta::hours(8);
        let text = DayReport::new(&p, now).to_string();
        assert!(text.starts_with("solor for 2024-03-20 (UTC+01:00, wrap cyclic)"));
        assert_eq!(text.lines().filter(|l| l.contains("hsl(")).count(), 15);
        assert!(text.contains("0800  solarNoon"));
        assert!(text.contains("now 0800  hsl(210, 85%, 85%)"));
    }

    #[test]
    fn instant_line_shows_readable_text() {
        let p = palette();
        let line = DayReport::new(&p, p.midnight()).lines().next().unwrap().to_string();
        assert!(line.starts_with("0100  nadir"));
        assert!(line.ends_with("text=#ffffff"));
    }
}
