//! Observer position acquisition.

use crate::solar::Coordinates;

/// Position could not be acquired.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum LocateError {
    /// No position source is configured or the source refused.
    #[error("position unavailable: {0}")]
    Unavailable(String),
}

/// One-shot source of the observer's position.
///
/// The position is read once at startup; surfaces never poll again.
pub trait PositionSource {
    /// Returns the observer's coordinates.
    ///
    /// # Errors
    ///
    /// Returns `LocateError::Unavailable` when no position can be produced.
    fn locate(&self) -> Result<Coordinates, LocateError>;
}

/// A position known up front, from configuration or the command line.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FixedPosition(Option<Coordinates>);

impl FixedPosition {
    pub fn new(coordinates: Coordinates) -> Self {
        Self(Some(coordinates))
    }

    /// A source that never resolves.
    pub fn unknown() -> Self {
        Self(None)
    }
}

impl From<Option<Coordinates>> for FixedPosition {
    fn from(value: Option<Coordinates>) -> Self {
        Self(value)
    }
}

impl PositionSource for FixedPosition {
    fn locate(&self) -> Result<Coordinates, LocateError> {
        self.0.ok_or_else(|| {
            LocateError::Unavailable(
                "set [location] in the config, pick a --preset, or pass --lat/--lon".to_string(),
            )
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn fixed_position_resolves() {
        let at = Coordinates::new(1.29, 103.85);
        assert_eq!(FixedPosition::new(at).locate(), Ok(at));
    }

    #[test]
    fn unknown_position_is_unavailable() {
        let err = FixedPosition::unknown().locate().unwrap_err();
        assert!(matches!(err, LocateError::Unavailable(_)));
    }
}
