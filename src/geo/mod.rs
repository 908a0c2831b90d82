use async_trait::async_trait;
use rand::Rng;
use thiserror::Error;

use crate::models::Coordinate;

/// Simulated map clicks and GPS fixes scatter within this many degrees
pub const JITTER_DEGREES: f64 = 0.005;

#[derive(Debug, Error, PartialEq, Eq)]
pub enum LocationError {
    #[error("geolocation is not supported on this device")]
    Unsupported,
    #[error("could not get current location")]
    PositionUnavailable,
}

/// Source of device coordinates.
///
/// The shipped implementation simulates a fix; a real one would talk to a
/// positioning service behind the same call.
#[async_trait]
pub trait LocationProvider: Send + Sync {
    async fn current_location(&self) -> Result<Coordinate, LocationError>;
}

/// Fake GPS that resolves near a configured center.
///
/// Disabling it stands in for a device without the capability.
pub struct SimulatedGps {
    center: Coordinate,
    enabled: bool,
}

impl SimulatedGps {
    pub fn new(center: Coordinate) -> Self {
        Self {
            center,
            enabled: true,
        }
    }

    pub fn unsupported(center: Coordinate) -> Self {
        Self {
            center,
            enabled: false,
        }
    }
}

#[async_trait]
impl LocationProvider for SimulatedGps {
    async fn current_location(&self) -> Result<Coordinate, LocationError> {
        if !self.enabled {
            return Err(LocationError::Unsupported);
        }
        Ok(jitter(self.center))
    }
}

/// A coordinate near `base`, the stand-in for a map click or GPS scatter
pub fn jitter(base: Coordinate) -> Coordinate {
    let mut rng = rand::thread_rng();
    Coordinate::new(
        base.lat + rng.gen_range(-JITTER_DEGREES..JITTER_DEGREES),
        base.lng + rng.gen_range(-JITTER_DEGREES..JITTER_DEGREES),
    )
}
