use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

use crate::error::{CoreError, CoreResult};
use crate::physics_constants::{calibration, field};

/// Camera placement relative to the two calibration anchors.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize, JsonSchema)]
#[serde(default)]
pub struct CameraFraming {
    /// Distance behind the first anchor, along the anchor-to-anchor axis (m)
    pub back_offset_m: f32,
    /// Height above the first anchor (m)
    pub eye_height_m: f32,
    /// Look-at point = first anchor + axis × (distance × multiplier)
    pub look_beyond_multiplier: f32,
}

impl Default for CameraFraming {
    fn default() -> Self {
        Self {
            back_offset_m: calibration::CAMERA_BACK_OFFSET_M,
            eye_height_m: calibration::CAMERA_EYE_HEIGHT_M,
            look_beyond_multiplier: calibration::LOOK_BEYOND_MULTIPLIER,
        }
    }
}

impl CameraFraming {
    /// High-home broadcast angle.
    pub fn broadcast() -> Self {
        Self { back_offset_m: 12.0, eye_height_m: 6.0, look_beyond_multiplier: 1.2 }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize, JsonSchema)]
#[serde(default)]
pub struct CalibrationConfig {
    /// Known distance between the plate and rubber anchors (m)
    pub reference_distance_m: f32,
    pub min_scale: f32,
    pub max_scale: f32,
    pub framing: CameraFraming,
}

impl Default for CalibrationConfig {
    fn default() -> Self {
        Self {
            reference_distance_m: field::PLATE_TO_RUBBER_M,
            min_scale: calibration::MIN_SCALE,
            max_scale: calibration::MAX_SCALE,
            framing: CameraFraming::default(),
        }
    }
}

impl CalibrationConfig {
    pub fn validate(&self) -> CoreResult<()> {
        if !(self.min_scale > 0.0 && self.min_scale <= self.max_scale && self.max_scale.is_finite()) {
            return Err(CoreError::Config(format!(
                "scale range [{}, {}] is invalid",
                self.min_scale, self.max_scale
            )));
        }
        if !self.reference_distance_m.is_finite() || self.reference_distance_m <= 0.0 {
            return Err(CoreError::Config(
                "reference_distance_m must be positive".into(),
            ));
        }
        let f = &self.framing;
        if !(f.back_offset_m.is_finite() && f.eye_height_m.is_finite())
            || !(f.look_beyond_multiplier.is_finite() && f.look_beyond_multiplier > 0.0)
        {
            return Err(CoreError::Config("camera framing is invalid".into()));
        }
        Ok(())
    }
}
