//! GameCast - the single owning context
//!
//! Holds the configuration, the captured anchors and their calibration, the
//! zone aggregator and at most one active pitch flight. Every component
//! result passes through here as a plain value; nothing is global.
//!
//! Malformed upstream data never stops the cast: calibration falls back,
//! rejected launches are logged and skipped, unknown events idle.

use serde::{Deserialize, Serialize};
use tracing::{debug, info, warn};

use crate::action::{classify, ActionEvent, ActionState, PlayDescription};
use crate::calibration::{
    place_actors, ActorPlacement, AnchorMap, AnchorRole, CalibrationResult, Calibrator, Handedness,
    PlacementSettings,
};
use crate::config::CoreConfig;
use crate::error::{CoreError, CoreResult};
use crate::flight::{fallback_release_point, FlightTick, Pitch, PitchFlight, ZoneLocation};
use crate::geometry::{Aabb, Vec3};
use crate::physics_constants::units;
use crate::zone::{PitchMark, ZoneAggregator};

/// What [`GameCast::handle_event`] did with one event.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct EventOutcome {
    pub action: ActionState,
    /// A new pitch flight replaced the previous one
    pub launched: bool,
    /// Location registered immediately (events that carry a location but
    /// launch nothing)
    pub mark: Option<PitchMark>,
}

#[derive(Debug, Clone)]
struct ActiveFlight {
    flight: PitchFlight,
    pitch_type: Option<String>,
}

#[derive(Debug, Clone)]
pub struct GameCast {
    config: CoreConfig,
    calibrator: Calibrator,
    anchors: AnchorMap,
    scene_bounds: Option<Aabb>,
    calibration: CalibrationResult,
    batter_side: Handedness,
    placement_settings: PlacementSettings,
    placement: Option<ActorPlacement>,
    zone: ZoneAggregator,
    active: Option<ActiveFlight>,
}

impl Default for GameCast {
    fn default() -> Self {
        Self::build(CoreConfig::default())
    }
}

impl GameCast {
    /// Calibration always yields a world in meters, so the flight parameters
    /// must use one scene unit per meter.
    pub fn new(config: CoreConfig) -> CoreResult<Self> {
        config.validate()?;
        if config.flight.units_per_meter != 1.0 {
            return Err(CoreError::Config(format!(
                "calibrated scenes are in meters, units_per_meter must be 1.0, got {}",
                config.flight.units_per_meter
            )));
        }
        Ok(Self::build(config))
    }

    fn build(config: CoreConfig) -> Self {
        let calibrator = Calibrator::new(config.calibration);
        let anchors = AnchorMap::new();
        let calibration = calibrator.calibrate_or_identity(&anchors, None);
        let zone = ZoneAggregator::new(&config.zone);
        Self {
            config,
            calibrator,
            anchors,
            scene_bounds: None,
            calibration,
            batter_side: Handedness::default(),
            placement_settings: PlacementSettings::default(),
            placement: None,
            zone,
            active: None,
        }
    }

    pub fn config(&self) -> &CoreConfig {
        &self.config
    }

    pub fn anchors(&self) -> &AnchorMap {
        &self.anchors
    }

    pub fn calibration(&self) -> &CalibrationResult {
        &self.calibration
    }

    pub fn placement(&self) -> Option<&ActorPlacement> {
        self.placement.as_ref()
    }

    pub fn zone(&self) -> &ZoneAggregator {
        &self.zone
    }

    pub fn flight(&self) -> Option<&PitchFlight> {
        self.active.as_ref().map(|a| &a.flight)
    }

    pub fn batter_side(&self) -> Handedness {
        self.batter_side
    }

    /// Replace the captured anchors and recalibrate. An in-flight ball is
    /// abandoned since its coordinates belong to the old calibration.
    pub fn set_anchors(&mut self, anchors: AnchorMap, scene_bounds: Option<Aabb>) -> &CalibrationResult {
        self.anchors = anchors;
        self.scene_bounds = scene_bounds;
        self.calibration = self
            .calibrator
            .calibrate_or_identity(&self.anchors, self.scene_bounds.as_ref());
        self.placement = self.place();
        if self.active.take().is_some() {
            debug!("active flight dropped after recalibration");
        }
        info!(
            anchors = self.anchors.len(),
            scale = self.calibration.scale,
            source = ?self.calibration.source,
            "scene calibrated"
        );
        &self.calibration
    }

    pub fn set_batter_side(&mut self, side: Handedness) {
        self.batter_side = side;
        self.placement = self.place();
    }

    pub fn set_placement_settings(&mut self, settings: PlacementSettings) {
        self.placement_settings = settings;
        self.placement = self.place();
    }

    fn place(&self) -> Option<ActorPlacement> {
        place_actors(&self.anchors, &self.calibration, self.batter_side, &self.placement_settings)
    }

    /// Calibrated plate position; the origin when no plate anchor exists.
    pub fn plate(&self) -> Vec3 {
        self.world_anchor(AnchorRole::Plate).unwrap_or_else(Vec3::zeros)
    }

    fn world_anchor(&self, role: AnchorRole) -> Option<Vec3> {
        self.anchors.get(role).map(|p| self.calibration.apply(&p))
    }

    /// Where a pitch leaves the hand when the event carries no release point.
    pub fn release_point(&self) -> Vec3 {
        let upm = self.config.flight.units_per_meter;
        if let Some(placement) = &self.placement {
            return placement.release_point();
        }
        let rubber = self.world_anchor(AnchorRole::Rubber).unwrap_or_else(|| {
            self.plate() - Vec3::new(0.0, 0.0, self.config.calibration.reference_distance_m * upm)
        });
        fallback_release_point(&rubber, upm)
    }

    /// Start a new flight, replacing (and clearing the trail of) any active one.
    pub fn launch_pitch(&mut self, pitch: Pitch) -> CoreResult<&PitchFlight> {
        self.launch_labeled(pitch, None)
    }

    fn launch_labeled(&mut self, pitch: Pitch, pitch_type: Option<String>) -> CoreResult<&PitchFlight> {
        let flight = PitchFlight::launch(pitch, self.plate(), self.config.flight, &self.config.trail)?;
        let active = self.active.insert(ActiveFlight { flight, pitch_type });
        Ok(&active.flight)
    }

    /// Advance the active flight by one frame. The plate crossing is
    /// registered in the zone aggregator on the tick it happens.
    pub fn tick(&mut self, dt_s: f32) -> Option<FlightTick> {
        let active = self.active.as_mut()?;
        let tick = active.flight.advance(dt_s);
        if let Some(crossing) = &tick.crossing {
            let speed_mph = active.flight.pitch().speed_mph();
            self.zone
                .record_pitch(crossing.location, active.pitch_type.as_deref(), Some(speed_mph));
        }
        Some(tick)
    }

    /// Classify a feed event and act on its pitch data.
    ///
    /// Structured pitch data wins over the description. A pitch event with a
    /// parsed speed launches toward the parsed (or center) location; any
    /// other event carrying a location is registered on the grid directly.
    pub fn handle_event(&mut self, event: &ActionEvent) -> EventOutcome {
        let action = classify(event);
        let desc = event
            .free_text
            .as_deref()
            .map(PlayDescription::parse)
            .unwrap_or_default();

        let mut outcome = EventOutcome { action, launched: false, mark: None };

        if let Some(data) = &event.pitch {
            if let (Some(location), Some(mph)) = (data.location, data.speed_mph) {
                let pitch_type = data.pitch_type.clone().or(desc.pitch_type.clone());
                outcome.launched = self.try_launch(location, mph, pitch_type);
                return outcome;
            }
        }

        if action == ActionState::Pitch {
            if let Some(mph) = desc.speed_mph {
                let (x, z) = desc.location.unwrap_or((0.0, 0.0));
                let location = self.zone.zone().denormalize(x, z);
                outcome.launched = self.try_launch(location, mph, desc.pitch_type.clone());
                return outcome;
            }
        }

        if let Some((x, z)) = desc.location {
            let location = self.zone.zone().denormalize(x, z);
            outcome.mark = Some(self.zone.record_pitch(location, desc.pitch_type.as_deref(), desc.speed_mph));
        }
        outcome
    }

    fn try_launch(&mut self, location: ZoneLocation, speed_mph: f32, pitch_type: Option<String>) -> bool {
        let speed_kph = speed_mph * units::MPH_TO_MPS / units::KPH_TO_MPS;
        let pitch = Pitch::new(self.release_point(), location, speed_kph);
        match self.launch_labeled(pitch, pitch_type) {
            Ok(_) => true,
            Err(err) => {
                warn!(%err, "pitch event not launched");
                false
            }
        }
    }

    /// Clear the heat grid, recent marks and any active flight. Anchors and
    /// calibration are kept.
    pub fn reset(&mut self) {
        self.zone.reset();
        self.active = None;
    }
}
