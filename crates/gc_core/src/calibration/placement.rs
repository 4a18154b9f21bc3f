//! Actor placement around home plate.
//!
//! Derives where the pitcher and batter stand and which way they face from
//! the calibrated plate and rubber anchors. The renderer snaps its character
//! rigs to these points.

use serde::{Deserialize, Serialize};
use tracing::debug;

use super::anchor::{AnchorMap, AnchorRole, Handedness};
use super::calibrator::CalibrationResult;
use crate::geometry::{self, Vec3};
use crate::physics_constants::placement;

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PlacementSettings {
    /// Batter feet bias toward the catcher (m)
    pub batter_depth_m: f32,
    /// Vertical trim applied to the batter feet (m)
    pub batter_y_offset_m: f32,
}

impl Default for PlacementSettings {
    fn default() -> Self {
        Self { batter_depth_m: placement::BATTER_DEPTH_M, batter_y_offset_m: 0.0 }
    }
}

/// World-space stance points and facings for both actors.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ActorPlacement {
    /// Unit vector from the rubber toward the plate (the catcher's direction)
    pub forward: Vec3,
    pub pitcher_feet: Vec3,
    pub pitcher_yaw: f32,
    pub batter_feet: Vec3,
    pub batter_yaw: f32,
    pub batter_side: Handedness,
    /// False when the batter position was synthesized from the plate
    pub batter_from_anchor: bool,
}

impl ActorPlacement {
    /// Horizontal unit vector to the pitcher's right when facing the plate.
    pub fn pitcher_right(&self) -> Vec3 {
        geometry::normalize_or(&self.forward.cross(&geometry::up()), Vec3::x())
    }

    /// Ball release point for a pitcher whose hand position is unknown.
    pub fn release_point(&self) -> Vec3 {
        let (right, up, ahead) = placement::RELEASE_OFFSET_M;
        self.pitcher_feet
            + self.pitcher_right() * right
            + geometry::up() * up
            + self.forward * ahead
    }
}

/// Place both actors from model-space anchors transformed by `calibration`.
///
/// Returns `None` when the plate or rubber anchor is missing or the two coincide.
pub fn place_actors(
    anchors: &AnchorMap,
    calibration: &CalibrationResult,
    batter_side: Handedness,
    settings: &PlacementSettings,
) -> Option<ActorPlacement> {
    let world = |role: AnchorRole| anchors.get(role).map(|p| calibration.apply(&p));

    let plate = world(AnchorRole::Plate)?;
    let rubber = world(AnchorRole::Rubber)?;
    let forward = geometry::try_normalize(&geometry::horizontal(&(plate - rubber)))?;
    let yaw = geometry::yaw_toward(&forward);

    let pitcher_feet = world(AnchorRole::PitcherFeet).unwrap_or(rubber);

    let (batter_anchor, batter_from_anchor) = match world(AnchorRole::batter_feet(batter_side)) {
        Some(feet) => (feet, true),
        None => {
            let right = geometry::normalize_or(&forward.cross(&geometry::up()), Vec3::x());
            let lateral = match batter_side {
                Handedness::Right => -placement::BATTER_LATERAL_M,
                Handedness::Left => placement::BATTER_LATERAL_M,
            };
            debug!(?batter_side, "batter feet anchor missing, synthesizing from plate");
            (plate - forward * placement::BATTER_BACK_M + right * lateral, false)
        }
    };
    let batter_feet = batter_anchor
        + forward * settings.batter_depth_m
        + geometry::up() * settings.batter_y_offset_m;

    Some(ActorPlacement {
        forward,
        pitcher_feet,
        pitcher_yaw: yaw,
        batter_feet,
        batter_yaw: yaw + std::f32::consts::PI,
        batter_side,
        batter_from_anchor,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::calibration::Calibrator;

    fn field() -> (AnchorMap, CalibrationResult) {
        let anchors = AnchorMap::new()
            .with(AnchorRole::Plate, Vec3::zeros())
            .with(AnchorRole::Rubber, Vec3::new(0.0, 0.0, -18.44));
        let calibration = Calibrator::default()
            .calibrate_anchors(&anchors, None)
            .unwrap();
        (anchors, calibration)
    }

    #[test]
    fn test_pitcher_faces_plate() {
        let (anchors, cal) = field();
        let p = place_actors(&anchors, &cal, Handedness::Right, &PlacementSettings::default()).unwrap();

        assert!((p.forward - Vec3::new(0.0, 0.0, 1.0)).norm() < 1e-5);
        assert!(p.pitcher_yaw.abs() < 1e-5);
        assert!((p.batter_yaw - std::f32::consts::PI).abs() < 1e-5);
        assert!((p.pitcher_feet - Vec3::new(0.0, 0.0, -18.44)).norm() < 1e-3);
    }

    #[test]
    fn test_batter_fallback_sides_mirror() {
        let (anchors, cal) = field();
        let settings = PlacementSettings::default();
        let r = place_actors(&anchors, &cal, Handedness::Right, &settings).unwrap();
        let l = place_actors(&anchors, &cal, Handedness::Left, &settings).unwrap();

        assert!(!r.batter_from_anchor);
        assert!((r.batter_feet.x + l.batter_feet.x).abs() < 1e-5);
        assert!((r.batter_feet.x.abs() - 1.5).abs() < 1e-5);
        // 2.0 toward the mound, 0.1 back toward the catcher
        assert!((r.batter_feet.z + 1.9).abs() < 1e-5);
    }

    #[test]
    fn test_batter_anchor_used_when_present() {
        let (anchors, cal) = field();
        let anchors = anchors.with(AnchorRole::BatterFeetL, Vec3::new(0.9, 0.0, 0.3));
        let settings = PlacementSettings { batter_depth_m: 0.0, batter_y_offset_m: 0.05 };
        let p = place_actors(&anchors, &cal, Handedness::Left, &settings).unwrap();

        assert!(p.batter_from_anchor);
        assert!((p.batter_feet - Vec3::new(0.9, 0.05, 0.3)).norm() < 1e-5);
    }

    #[test]
    fn test_release_point_above_and_ahead_of_feet() {
        let (anchors, cal) = field();
        let p = place_actors(&anchors, &cal, Handedness::Right, &PlacementSettings::default()).unwrap();
        let release = p.release_point();

        assert!((release.y - 1.8).abs() < 1e-5);
        assert!((release.z - (-18.44 + 0.5)).abs() < 1e-3);
        assert!((release.x.abs() - 0.3).abs() < 1e-5);
    }

    #[test]
    fn test_missing_rubber_gives_none() {
        let anchors = AnchorMap::new().with(AnchorRole::Plate, Vec3::zeros());
        let cal = Calibrator::default().calibrate_or_identity(&anchors, None);
        assert!(place_actors(&anchors, &cal, Handedness::Right, &PlacementSettings::default()).is_none());
    }
}
