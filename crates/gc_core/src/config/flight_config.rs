//! Flight integration parameters.
//!
//! `default()` is the single documented constant set. The other presets
//! reproduce tunings seen in older front-ends and exist only so a caller can
//! opt into them explicitly.

use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

use crate::error::{CoreError, CoreResult};
use crate::physics_constants::{ball, bounce};

/// Ball flight tuning. Distances and speeds are in meters; the scene scale is
/// applied through `units_per_meter`.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize, JsonSchema)]
#[serde(default)]
pub struct FlightParams {
    /// Gravity (m/s², negative = down)
    pub gravity_mps2: f32,
    /// Scene units per meter (1.0 once the scene is calibrated)
    pub units_per_meter: f32,
    /// Fraction of release speed kept horizontally (0..1]
    pub air_drag_speed_factor: f32,
    /// Magnus lateral acceleration coefficient
    pub magnus_coefficient: f32,
    /// Ground plane height (m)
    pub ground_y_m: f32,
    /// Vertical speed kept on a ground bounce (0..1)
    pub restitution: f32,
    /// Horizontal speed kept on ground contact (0..1)
    pub friction: f32,
    /// At-rest threshold after ground contact (m/s)
    pub rest_speed_mps: f32,
    /// Distance from the plate plane at which a crossing is reported (m)
    pub plate_crossing_window_m: f32,
}

impl Default for FlightParams {
    fn default() -> Self {
        Self {
            gravity_mps2: ball::GRAVITY_MPS2,
            units_per_meter: 1.0,
            air_drag_speed_factor: ball::AIR_DRAG_SPEED_FACTOR,
            magnus_coefficient: ball::MAGNUS_COEFFICIENT,
            ground_y_m: bounce::GROUND_Y_M,
            restitution: bounce::GROUND_RESTITUTION,
            friction: bounce::GROUND_FRICTION,
            rest_speed_mps: bounce::REST_SPEED_MPS,
            plate_crossing_window_m: 0.5,
        }
    }
}

impl FlightParams {
    /// Higher bounce, grippier ground, early settle.
    pub fn enhanced() -> Self {
        Self {
            restitution: 0.4,
            friction: 0.8,
            rest_speed_mps: 2.0,
            ground_y_m: 0.05,
            ..Self::default()
        }
    }

    /// No drag inflation, softer bounce, long roll.
    pub fn catcher_view() -> Self {
        Self {
            air_drag_speed_factor: 1.0,
            restitution: 0.35,
            friction: 0.85,
            rest_speed_mps: 0.8,
            ground_y_m: 0.02,
            ..Self::default()
        }
    }

    pub fn with_units_per_meter(mut self, units_per_meter: f32) -> Self {
        self.units_per_meter = units_per_meter;
        self
    }

    /// Gravity in scene units/s².
    #[inline]
    pub fn gravity(&self) -> f32 {
        self.gravity_mps2 * self.units_per_meter
    }

    /// Ground height in scene units.
    #[inline]
    pub fn ground_level(&self) -> f32 {
        self.ground_y_m * self.units_per_meter
    }

    /// At-rest speed threshold in scene units/s.
    #[inline]
    pub fn rest_speed(&self) -> f32 {
        self.rest_speed_mps * self.units_per_meter
    }

    /// Plate-crossing window in scene units.
    #[inline]
    pub fn plate_crossing_window(&self) -> f32 {
        self.plate_crossing_window_m * self.units_per_meter
    }

    pub fn validate(&self) -> CoreResult<()> {
        let finite = [
            self.gravity_mps2,
            self.units_per_meter,
            self.air_drag_speed_factor,
            self.magnus_coefficient,
            self.ground_y_m,
            self.restitution,
            self.friction,
            self.rest_speed_mps,
            self.plate_crossing_window_m,
        ]
        .iter()
        .all(|v| v.is_finite());
        if !finite {
            return Err(CoreError::Config("flight params must be finite".into()));
        }
        if self.gravity_mps2 >= 0.0 {
            return Err(CoreError::Config(format!(
                "gravity must point down, got {}",
                self.gravity_mps2
            )));
        }
        if self.units_per_meter <= 0.0 {
            return Err(CoreError::Config("units_per_meter must be positive".into()));
        }
        if !(self.air_drag_speed_factor > 0.0 && self.air_drag_speed_factor <= 1.0) {
            return Err(CoreError::Config(
                "air_drag_speed_factor must be in (0, 1]".into(),
            ));
        }
        if !(0.0..=1.0).contains(&self.restitution) || !(0.0..=1.0).contains(&self.friction) {
            return Err(CoreError::Config(
                "restitution and friction must be in [0, 1]".into(),
            ));
        }
        if self.rest_speed_mps < 0.0 || self.plate_crossing_window_m < 0.0 {
            return Err(CoreError::Config(
                "rest speed and crossing window must be non-negative".into(),
            ));
        }
        Ok(())
    }
}
