use serde::{Deserialize, Serialize};

use crate::config::ZoneConfig;
use crate::flight::ZoneLocation;
use crate::geometry;

/// Strike-zone box in feet, plate-relative.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct StrikeZone {
    pub half_width_ft: f32,
    pub bottom_ft: f32,
    pub top_ft: f32,
}

impl Default for StrikeZone {
    fn default() -> Self {
        Self::from_config(&ZoneConfig::default())
    }
}

impl StrikeZone {
    pub fn from_config(config: &ZoneConfig) -> Self {
        Self {
            half_width_ft: config.half_width_ft,
            bottom_ft: config.bottom_ft,
            top_ft: config.top_ft,
        }
    }

    pub fn mid_height_ft(&self) -> f32 {
        (self.bottom_ft + self.top_ft) * 0.5
    }

    pub fn half_height_ft(&self) -> f32 {
        (self.top_ft - self.bottom_ft) * 0.5
    }

    /// Feet → normalized `[-1, 1]` zone coordinates (edges at ±1).
    ///
    /// Out-of-zone pitches are clamped to the border; NaN lands on -1.
    pub fn normalize(&self, location: &ZoneLocation) -> (f32, f32) {
        let x = location.x / self.half_width_ft;
        let z = (location.z - self.mid_height_ft()) / self.half_height_ft();
        (geometry::clamp(x, -1.0, 1.0), geometry::clamp(z, -1.0, 1.0))
    }

    /// Normalized zone coordinates → feet. Inverse of [`StrikeZone::normalize`]
    /// inside the box.
    pub fn denormalize(&self, x: f32, z: f32) -> ZoneLocation {
        ZoneLocation::new(
            x * self.half_width_ft,
            self.mid_height_ft() + z * self.half_height_ft(),
        )
    }

    /// Inside the box, edges included.
    pub fn contains(&self, location: &ZoneLocation) -> bool {
        location.x.abs() <= self.half_width_ft
            && location.z >= self.bottom_ft
            && location.z <= self.top_ft
    }
}
