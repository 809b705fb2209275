//! Solar-phase day palette.
//!
//! The sun's named phases for a day and place (nadir, dawn, sunrise, noon,
//! dusk, ...) each carry a saturation/lightness tone over a fixed hue. Any
//! moment of the day gets its color by interpolating between the two
//! surrounding phases, and every color gets a readable black or white text
//! color.

pub mod cli;
pub mod color;
pub mod config;
pub mod io;
pub mod logging;
/// Day palette construction and interpolation.
pub mod palette;
pub mod phase;
pub mod position;
pub mod report;
/// Phase times from observer position.
pub mod solar;
pub mod timeline;

#[cfg(feature = "tui")]
pub mod tui;
