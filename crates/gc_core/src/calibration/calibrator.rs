//! Calibrator - model units → meters and camera framing
//!
//! Two anchors with a known real-world separation give a uniform scale.
//! Without usable anchors the scene bounds stand in, and without bounds the
//! identity transform is returned. Only a non-positive reference distance is
//! an error.

use serde::{Deserialize, Serialize};
use tracing::{debug, info, warn};

use super::anchor::{AnchorMap, AnchorRole};
use crate::config::{CalibrationConfig, CameraFraming};
use crate::error::{CoreError, CoreResult};
use crate::geometry::{self, Aabb, Vec3, EPSILON};

/// Which path produced a [`CalibrationResult`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CalibrationSource {
    /// Scale from the anchor pair, camera framed on the anchor axis
    Anchors,
    /// Scale from the anchor pair, camera from the point-of-view anchor
    PointOfView,
    /// Scale from the scene's horizontal extent
    SceneBounds,
    /// Nothing usable; unit scale
    Identity,
}

/// Scene transform and camera pose. Always replaced as a whole, never patched.
///
/// A model-space point `p` lands at `p * scale + world_offset`.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CalibrationResult {
    pub scale: f32,
    pub world_offset: Vec3,
    pub camera_position: Vec3,
    pub camera_look_at: Vec3,
    pub source: CalibrationSource,
}

impl CalibrationResult {
    /// Model space → calibrated world space.
    #[inline]
    pub fn apply(&self, model_point: &Vec3) -> Vec3 {
        model_point * self.scale + self.world_offset
    }

    /// Calibrated world space → model space.
    #[inline]
    pub fn invert(&self, world_point: &Vec3) -> Vec3 {
        (world_point - self.world_offset) / self.scale
    }

    /// Model units per meter before calibration.
    #[inline]
    pub fn model_units_per_meter(&self) -> f32 {
        1.0 / self.scale
    }
}

#[derive(Debug, Clone, Default)]
pub struct Calibrator {
    config: CalibrationConfig,
}

impl Calibrator {
    pub fn new(config: CalibrationConfig) -> Self {
        Self { config }
    }

    pub fn config(&self) -> &CalibrationConfig {
        &self.config
    }

    /// Calibrate from two anchors `a` (camera side, e.g. the plate) and `b`
    /// (far side, e.g. the rubber) that are `real_distance_m` apart.
    ///
    /// Missing, non-finite or coincident anchors fall back to `scene_bounds`,
    /// then to the identity transform.
    pub fn calibrate(
        &self,
        anchor_a: Option<Vec3>,
        anchor_b: Option<Vec3>,
        real_distance_m: f32,
        scene_bounds: Option<&Aabb>,
    ) -> CoreResult<CalibrationResult> {
        if !real_distance_m.is_finite() || real_distance_m <= 0.0 {
            return Err(CoreError::invalid_calibration(format!(
                "reference distance must be positive, got {real_distance_m}"
            )));
        }

        let anchors = match (anchor_a, anchor_b) {
            (Some(a), Some(b)) if geometry::is_finite(&a) && geometry::is_finite(&b) => Some((a, b)),
            _ => None,
        };

        if let Some((a, b)) = anchors {
            let raw = geometry::distance(&a, &b);
            if raw > EPSILON {
                return Ok(self.calibrate_pair(a, b, raw, real_distance_m));
            }
            debug!(raw, "anchors coincide, using bounds fallback");
        } else {
            debug!("anchors missing, using bounds fallback");
        }

        Ok(self.calibrate_bounds(scene_bounds, real_distance_m))
    }

    /// Calibrate from a captured anchor map using the configured reference
    /// distance between [`AnchorRole::Plate`] and [`AnchorRole::Rubber`].
    /// A [`AnchorRole::PointOfView`] anchor, when present, overrides the camera.
    pub fn calibrate_anchors(
        &self,
        anchors: &AnchorMap,
        scene_bounds: Option<&Aabb>,
    ) -> CoreResult<CalibrationResult> {
        let plate = anchors.get(AnchorRole::Plate);
        let mut result = self.calibrate(
            plate,
            anchors.get(AnchorRole::Rubber),
            self.config.reference_distance_m,
            scene_bounds,
        )?;

        if let Some(pov) = anchors.get(AnchorRole::PointOfView).filter(geometry::is_finite) {
            result.camera_position = result.apply(&pov);
            result.camera_look_at = match plate {
                Some(p) if result.source == CalibrationSource::Anchors => result.apply(&p),
                _ => Vec3::zeros(),
            };
            result.source = CalibrationSource::PointOfView;
            info!(camera = ?result.camera_position, "camera placed at point-of-view anchor");
        }
        Ok(result)
    }

    /// Like [`Calibrator::calibrate_anchors`] but never fails: rejected input
    /// is logged and the identity transform returned.
    pub fn calibrate_or_identity(
        &self,
        anchors: &AnchorMap,
        scene_bounds: Option<&Aabb>,
    ) -> CalibrationResult {
        match self.calibrate_anchors(anchors, scene_bounds) {
            Ok(result) => result,
            Err(err) => {
                warn!(%err, "calibration rejected, using identity transform");
                self.identity(self.config.reference_distance_m.max(EPSILON))
            }
        }
    }

    fn calibrate_pair(&self, a: Vec3, b: Vec3, raw: f32, real_distance_m: f32) -> CalibrationResult {
        let scale = self.clamp_scale(real_distance_m / raw);
        // Plate lands at the origin.
        let world_offset = -(a * scale);
        let a_world = a * scale + world_offset;
        let b_world = b * scale + world_offset;
        let (camera_position, camera_look_at) = frame(&self.config.framing, &a_world, &b_world);

        info!(raw, scale, "calibrated from anchors");
        CalibrationResult {
            scale,
            world_offset,
            camera_position,
            camera_look_at,
            source: CalibrationSource::Anchors,
        }
    }

    fn calibrate_bounds(&self, bounds: Option<&Aabb>, real_distance_m: f32) -> CalibrationResult {
        let Some(bounds) = bounds.filter(|b| b.is_valid()) else {
            warn!("no anchors and no scene bounds, using identity transform");
            return self.identity(real_distance_m);
        };

        let radius = bounds.horizontal_radius();
        if radius <= EPSILON {
            warn!(radius, "scene bounds have no horizontal extent, using identity transform");
            return self.identity(real_distance_m);
        }

        let scale = self.clamp_scale(real_distance_m / radius);
        let center = bounds.center();
        // Center horizontally, rest the lowest point on the ground plane.
        let world_offset = Vec3::new(-center.x * scale, -bounds.min.y * scale, -center.z * scale);
        let (camera_position, camera_look_at) = self.default_frame(real_distance_m);

        info!(radius, scale, "calibrated from scene bounds");
        CalibrationResult {
            scale,
            world_offset,
            camera_position,
            camera_look_at,
            source: CalibrationSource::SceneBounds,
        }
    }

    fn identity(&self, real_distance_m: f32) -> CalibrationResult {
        let (camera_position, camera_look_at) = self.default_frame(real_distance_m);
        CalibrationResult {
            scale: self.clamp_scale(1.0),
            world_offset: Vec3::zeros(),
            camera_position,
            camera_look_at,
            source: CalibrationSource::Identity,
        }
    }

    /// Framing for the conventional layout: plate at the origin, rubber
    /// `real_distance_m` down -Z.
    fn default_frame(&self, real_distance_m: f32) -> (Vec3, Vec3) {
        let plate = Vec3::zeros();
        let rubber = Vec3::new(0.0, 0.0, -real_distance_m);
        frame(&self.config.framing, &plate, &rubber)
    }

    /// Clamp into the configured range. An unusable range or result falls
    /// back to unit scale.
    fn clamp_scale(&self, raw: f32) -> f32 {
        let clamped = geometry::clamp(raw, self.config.min_scale, self.config.max_scale);
        if !(clamped.is_finite() && clamped > 0.0) {
            warn!(
                raw,
                min = self.config.min_scale,
                max = self.config.max_scale,
                "calibration scale unusable, using unit scale"
            );
            return 1.0;
        }
        if clamped != raw {
            warn!(raw, clamped, "calibration scale clamped");
        }
        clamped
    }
}

/// Camera behind `a` on the `a → b` axis, raised by the eye height, looking
/// past `b` along the same axis.
fn frame(framing: &CameraFraming, a: &Vec3, b: &Vec3) -> (Vec3, Vec3) {
    let span = b - a;
    let dist = span.norm();
    let dir = geometry::normalize_or(&span, Vec3::new(0.0, 0.0, -1.0));
    let position = a - dir * framing.back_offset_m + geometry::up() * framing.eye_height_m;
    let look_at = a + dir * (dist * framing.look_beyond_multiplier);
    (position, look_at)
}
