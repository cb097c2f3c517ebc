//! Session configuration

use crate::core::{ColorCode, Geometry};
use crate::error::{ClientError, Result};
use std::time::Duration;

/// Settings for one game session
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SessionConfig {
    pub geometry: Geometry,
    /// Fixed first guess; when absent the strategy picks round 1 too
    pub opening: Option<ColorCode>,
    /// Seed for randomised strategies
    pub seed: Option<u64>,
    /// Timeout applied to each blocking read and write on a socket
    pub io_timeout: Option<Duration>,
    /// Local cap on rounds; exceeding it ends the session as lost
    pub max_rounds: Option<u32>,
}

impl SessionConfig {
    #[must_use]
    pub const fn new(geometry: Geometry) -> Self {
        Self {
            geometry,
            opening: None,
            seed: None,
            io_timeout: None,
            max_rounds: None,
        }
    }

    #[must_use]
    pub const fn with_opening(mut self, opening: ColorCode) -> Self {
        self.opening = Some(opening);
        self
    }

    #[must_use]
    pub const fn with_seed(mut self, seed: u64) -> Self {
        self.seed = Some(seed);
        self
    }

    #[must_use]
    pub const fn with_io_timeout(mut self, timeout: Duration) -> Self {
        self.io_timeout = Some(timeout);
        self
    }

    #[must_use]
    pub const fn with_max_rounds(mut self, max_rounds: u32) -> Self {
        self.max_rounds = Some(max_rounds);
        self
    }

    /// Check that the configuration can drive a session over the wire
    ///
    /// # Errors
    /// Returns `ClientError::InvalidGeometry` if codes do not fit the 2-byte message,
    /// or `ClientError::InvalidCode` if the opening does not match the geometry.
    pub fn validate(&self) -> Result<()> {
        if !self.geometry.is_wire_compatible() {
            return Err(ClientError::InvalidGeometry {
                slots: self.geometry.slots(),
                colors: self.geometry.colors(),
            });
        }

        if let Some(opening) = &self.opening {
            ColorCode::new(opening.pegs(), self.geometry)?;
        }

        Ok(())
    }
}

impl Default for SessionConfig {
    fn default() -> Self {
        Self::new(Geometry::STANDARD)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_is_standard_and_valid() {
        let config = SessionConfig::default();
        assert_eq!(config.geometry, Geometry::STANDARD);
        assert!(config.opening.is_none());
        assert!(config.validate().is_ok());
    }

    #[test]
    fn builder_sets_fields() {
        let opening = ColorCode::parse("00142", Geometry::STANDARD).unwrap();
        let config = SessionConfig::default()
            .with_opening(opening)
            .with_seed(9)
            .with_max_rounds(35)
            .with_io_timeout(Duration::from_secs(2));

        assert_eq!(config.opening, Some(opening));
        assert_eq!(config.seed, Some(9));
        assert_eq!(config.max_rounds, Some(35));
        assert_eq!(config.io_timeout, Some(Duration::from_secs(2)));
        assert!(config.validate().is_ok());
    }

    #[test]
    fn rejects_wide_geometry() {
        let config = SessionConfig::new(Geometry::new(6, 8).unwrap());
        assert!(matches!(
            config.validate(),
            Err(ClientError::InvalidGeometry {
                slots: 6,
                colors: 8
            })
        ));
    }

    #[test]
    fn rejects_mismatched_opening() {
        let opening = ColorCode::parse("0142", Geometry::new(4, 8).unwrap()).unwrap();
        let config = SessionConfig::default().with_opening(opening);
        assert!(matches!(
            config.validate(),
            Err(ClientError::InvalidCode(_))
        ));
    }
}
