//! CSV export for palettes and timelines.

use std::fs::File;
use std::io::{self, Write};
use std::path::Path;

use crate::color::Hsl;
use crate::palette::Palette;
use crate::timeline::{Timeline, hhmm};

/// Column header for palette export.
const PALETTE_HEADER: &str = "phase,time,hhmm,saturation,lightness,css,text";

/// Column header for timeline export.
const TIMELINE_HEADER: &str = "label,phase,top_pct,height_pct,css,text";

/// Exports the palette to a CSV file at the given path.
///
/// # Errors
///
/// Returns an `io::Error` if file creation or writing fails.
pub fn export_palette_csv(palette: &Palette, path: &Path) -> io::Result<()> {
    let file = File::create(path)?;
    write_palette_csv(palette, io::BufWriter::new(file))
}

/// Writes one row per palette instant, in time order.
///
/// # Errors
///
/// Returns an `io::Error` if writing fails.
pub fn write_palette_csv(palette: &Palette, writer: impl Write) -> io::Result<()> {
    let mut wtr = csv::WriterBuilder::new().from_writer(writer);
    wtr.write_record(PALETTE_HEADER.split(','))?;

    for instant in palette.instants() {
        let color = Hsl::from_tone(palette.hue(), instant.tone);
        wtr.write_record(&[
            instant.phase.name().to_string(),
            instant.at.to_rfc3339(),
            hhmm(&instant.at),
            instant.tone.saturation.to_string(),
            instant.tone.lightness.to_string(),
            color.css(),
            color.readable_text().hex(),
        ])?;
    }

    wtr.flush()?;
    Ok(())
}

/// Exports the timeline segments to a CSV file at the given path.
///
/// # Errors
///
/// Returns an `io::Error` if file creation or writing fails.
pub fn export_timeline_csv(timeline: &Timeline, path: &Path) -> io::Result<()> {
    let file = File::create(path)?;
    write_timeline_csv(timeline, io::BufWriter::new(file))
}

/// Writes one row per timeline segment, leading segment first.
///
/// # Errors
///
/// Returns an `io::Error` if writing fails.
pub fn write_timeline_csv(timeline: &Timeline, writer: impl Write) -> io::Result<()> {
    let mut wtr = csv::WriterBuilder::new().from_writer(writer);
    wtr.write_record(TIMELINE_HEADER.split(','))?;

    for seg in &timeline.segments {
        wtr.write_record(&[
            seg.label.clone(),
            seg.phase.map(|p| p.name()).unwrap_or("").to_string(),
            format!("{:.4}", seg.top() * 100.0),
            format!("{:.4}", seg.height() * 100.0),
            seg.color.css(),
            seg.text.hex(),
        ])?;
    }

    wtr.flush()?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{FixedOffset, TimeDelta, TimeZone};

    use crate::palette::{NamedInstant, Wrap};
    use crate::phase::SolarPhase;
    use crate::timeline::DEFAULT_MARK_STEP;

    fn palette() -> Palette {
        let offset = FixedOffset::east_opt(0).unwrap();
        let day = offset.with_ymd_and_hms(2024, 9, 1, 0, 0, 0).unwrap();
        let instants = SolarPhase::ALL
            .into_iter()
            .enumerate()
            .map(|(i, p)| {
                NamedInstant::new(p, day + TimeDelta::minutes(30 + 95 * i as i64), p.default_tone())
            })
            .collect();
        Palette::new(day.date_naive(), offset, instants, 210, Wrap::Cyclic).unwrap()
    }

    fn to_string(buf: Vec<u8>) -> String {
        String::from_utf8(buf).unwrap_or_default()
    }

    #[test]
    fn palette_header_and_row_count() {
        let mut buf = Vec::new();
        write_palette_csv(&palette(), &mut buf).ok();
        let output = to_string(buf);
        let lines: Vec<&str> = output.lines().collect();
        assert_eq!(lines.first().copied(), Some(PALETTE_HEADER));
        // 1 header + 14 instants
        assert_eq!(lines.len(), 15);
        assert!(lines[1].starts_with("nadir,2024-09-01T00:30:00+00:00,0030,15,15,"));
    }

    #[test]
    fn timeline_rows_parse_and_sum_to_full_height() {
        let timeline = Timeline::build(&palette(), DEFAULT_MARK_STEP);
        let mut buf = Vec::new();
        write_timeline_csv(&timeline, &mut buf).ok();

        let mut rdr = csv::ReaderBuilder::new().from_reader(buf.as_slice());
        let headers = rdr.headers().cloned().ok();
        assert_eq!(headers.as_ref().map(csv::StringRecord::len), Some(6));

        let mut rows = 0;
        let mut height = 0.0;
        for record in rdr.records() {
            let rec = record.ok();
            assert!(rec.is_some(), "every row should parse");
            let rec = rec.unwrap();
            let h: Result<f64, _> = rec[3].parse();
            assert!(h.is_ok(), "height_pct should parse as f64");
            height += h.unwrap_or_default();
            rows += 1;
        }
        assert_eq!(rows, 15);
        assert!((height - 100.0).abs() < 0.01);
    }

    #[test]
    fn deterministic_output() {
        let p = palette();
        let mut buf1 = Vec::new();
        let mut buf2 = Vec::new();
        write_palette_csv(&p, &mut buf1).ok();
        write_palette_csv(&p, &mut buf2).ok();
        assert_eq!(buf1, buf2);
    }
}
