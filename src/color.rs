//! HSL colors, RGB conversion, and readable text selection.

use std::fmt;

use serde::{Serialize, Serializer};

use crate::phase::Tone;

/// Default hue (degrees) for every palette color.
pub const DEFAULT_HUE: u16 = 210;

/// Relative luminance above which black text is preferred over white.
pub const LUMINANCE_THRESHOLD: f64 = 0.179;

/// An sRGB color with 8-bit channels.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Rgb {
    pub r: u8,
    pub g: u8,
    pub b: u8,
}

impl Rgb {
    pub const BLACK: Rgb = Rgb::new(0, 0, 0);
    pub const WHITE: Rgb = Rgb::new(255, 255, 255);

    pub const fn new(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b }
    }

    /// WCAG 2.0 relative luminance, rounded to three decimals.
    pub fn relative_luminance(self) -> f64 {
        fn channel(value: u8) -> f64 {
            let c = f64::from(value) / 255.0;
            if c <= 0.039_28 {
                c / 12.92
            } else {
                ((c + 0.055) / 1.055).powf(2.4)
            }
        }

        let lum = 0.2126 * channel(self.r) + 0.7152 * channel(self.g) + 0.0722 * channel(self.b);
        (lum * 1000.0).round() / 1000.0
    }

    /// Black on light backgrounds, white on dark ones.
    pub fn readable_text(self) -> Rgb {
        if self.relative_luminance() > LUMINANCE_THRESHOLD {
            Rgb::BLACK
        } else {
            Rgb::WHITE
        }
    }

    /// Lowercase `#rrggbb` notation.
    pub fn hex(self) -> String {
        format!("#{:02x}{:02x}{:02x}", self.r, self.g, self.b)
    }
}

impl fmt::Display for Rgb {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.hex())
    }
}

impl Serialize for Rgb {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(&self.hex())
    }
}

/// A color in HSL space with integer percentages.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub struct Hsl {
    /// Hue in degrees (0-359).
    pub hue: u16,
    /// Saturation percentage (0-100).
    pub saturation: u8,
    /// Lightness percentage (0-100).
    pub lightness: u8,
}

impl Hsl {
    pub fn new(hue: u16, saturation: u8, lightness: u8) -> Self {
        Self {
            hue: hue % 360,
            saturation: saturation.min(100),
            lightness: lightness.min(100),
        }
    }

    /// Combines a fixed hue with a palette tone.
    pub fn from_tone(hue: u16, tone: Tone) -> Self {
        Self::new(hue, tone.saturation, tone.lightness)
    }

    pub fn tone(self) -> Tone {
        Tone::new(self.saturation, self.lightness)
    }

    /// Converts to sRGB, rounding each channel to the nearest integer.
    pub fn to_rgb(self) -> Rgb {
        let s = f64::from(self.saturation) / 100.0;
        let l = f64::from(self.lightness) / 100.0;
        if self.saturation == 0 {
            let v = to_byte(l);
            return Rgb::new(v, v, v);
        }

        let hue_prime = f64::from(self.hue % 360) / 60.0;
        let chroma = (1.0 - (2.0 * l - 1.0).abs()) * s;
        let second = chroma * (1.0 - (hue_prime % 2.0 - 1.0).abs());

        let (r, g, b) = match hue_prime {
            h if h < 1.0 => (chroma, second, 0.0),
            h if h < 2.0 => (second, chroma, 0.0),
            h if h < 3.0 => (0.0, chroma, second),
            h if h < 4.0 => (0.0, second, chroma),
            h if h < 5.0 => (second, 0.0, chroma),
            _ => (chroma, 0.0, second),
        };

        let m = l - chroma / 2.0;
        Rgb::new(to_byte(r + m), to_byte(g + m), to_byte(b + m))
    }

    /// Readable foreground for text drawn on this color.
    pub fn readable_text(self) -> Rgb {
        self.to_rgb().readable_text()
    }

    /// CSS `hsl()` notation.
    pub fn css(self) -> String {
        format!("hsl({}, {}%, {}%)", self.hue, self.saturation, self.lightness)
    }
}

impl fmt::Display for Hsl {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.css())
    }
}

fn to_byte(channel: f64) -> u8 {
    (channel * 255.0).round().clamp(0.0, 255.0) as u8
}
