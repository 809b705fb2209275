//! File output.

/// CSV export of palettes and timelines.
pub mod export;
