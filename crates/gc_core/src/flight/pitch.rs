//! Pitch description and the strike-zone → world conversion.

use serde::{Deserialize, Serialize};

use crate::geometry::Vec3;
use crate::physics_constants::{ball, units};

/// Pitch location relative to the plate center, in feet.
///
/// `x` is the horizontal offset (catcher's view, positive to the right),
/// `z` the height above ground.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct ZoneLocation {
    #[serde(alias = "px")]
    pub x: f32,
    #[serde(alias = "pz")]
    pub z: f32,
}

impl ZoneLocation {
    pub fn new(x: f32, z: f32) -> Self {
        Self { x, z }
    }

    pub fn is_finite(&self) -> bool {
        self.x.is_finite() && self.z.is_finite()
    }

    /// World position of this location on the plate plane.
    ///
    /// `plate` is the calibrated plate anchor in scene units.
    pub fn to_world(&self, plate: &Vec3, units_per_meter: f32) -> Vec3 {
        let x_m = self.x * units::FEET_TO_METERS;
        let height_m = self.z * units::FEET_TO_METERS;
        Vec3::new(
            plate.x + x_m * units_per_meter,
            plate.y + height_m * units_per_meter,
            plate.z,
        )
    }
}

/// One pitch as delivered by the event layer. Immutable once built.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Pitch {
    pub release_point: Vec3,
    pub target_location: ZoneLocation,
    pub speed_kph: f32,
    #[serde(default)]
    pub spin_rpm: f32,
}

impl Pitch {
    pub fn new(release_point: Vec3, target_location: ZoneLocation, speed_kph: f32) -> Self {
        Self { release_point, target_location, speed_kph, spin_rpm: 0.0 }
    }

    pub fn with_spin(mut self, spin_rpm: f32) -> Self {
        self.spin_rpm = spin_rpm;
        self
    }

    pub fn speed_mps(&self) -> f32 {
        self.speed_kph * units::KPH_TO_MPS
    }

    pub fn speed_mph(&self) -> f32 {
        self.speed_mps() * units::MPS_TO_MPH
    }

    /// World-space target given the plate anchor.
    pub fn target_world(&self, plate: &Vec3, units_per_meter: f32) -> Vec3 {
        self.target_location.to_world(plate, units_per_meter)
    }
}

/// Release point when no pitcher hand position is known: above the rubber.
pub fn fallback_release_point(rubber: &Vec3, units_per_meter: f32) -> Vec3 {
    rubber + Vec3::new(0.0, ball::RELEASE_HEIGHT_M * units_per_meter, 0.0)
}
