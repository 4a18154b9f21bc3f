//! One pitched ball from release to rest.
//!
//! Owns its kinematic state and trail exclusively. The render loop calls
//! [`PitchFlight::advance`] once per frame until it reports rest; abandoning
//! a flight is just dropping it.

use serde::{Deserialize, Serialize};
use tracing::{debug, warn};

use super::pitch::{Pitch, ZoneLocation};
use super::solver::{FlightState, LaunchSolution, TrajectorySolver};
use super::trail::TrajectoryTrail;
use crate::config::{FlightParams, TrailConfig};
use crate::error::CoreResult;
use crate::geometry::{self, Vec3};
use crate::physics_constants::units;

/// Ball reached the plate plane.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PlateCrossing {
    pub position: Vec3,
    /// Observed location relative to the plate (ft)
    pub location: ZoneLocation,
    pub t_seconds: f32,
}

/// What happened during one [`PitchFlight::advance`].
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct FlightTick {
    pub at_rest: bool,
    pub ground_contact: bool,
    /// Set on the single tick the ball crosses the plate
    pub crossing: Option<PlateCrossing>,
}

/// End state of a flight run to rest (or to its step budget).
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FlightSummary {
    pub final_position: Vec3,
    pub elapsed_s: f32,
    pub steps: usize,
    pub at_rest: bool,
    pub crossing: Option<PlateCrossing>,
    pub trail_len: usize,
}

#[derive(Debug, Clone)]
pub struct PitchFlight {
    pitch: Pitch,
    plate: Vec3,
    /// Horizontal unit vector from release toward the plate
    heading: Vec3,
    solver: TrajectorySolver,
    launch: LaunchSolution,
    state: FlightState,
    trail: TrajectoryTrail,
    crossing: Option<PlateCrossing>,
    at_rest: bool,
    steps: usize,
}

impl PitchFlight {
    /// Solve the launch and place the ball at the release point.
    pub fn launch(
        pitch: Pitch,
        plate: Vec3,
        params: FlightParams,
        trail: &TrailConfig,
    ) -> CoreResult<Self> {
        let solver = TrajectorySolver::new(params);
        let launch = solver.solve_pitch(&pitch, &plate)?;
        let heading = geometry::normalize_or(
            &geometry::horizontal(&(plate - pitch.release_point)),
            Vec3::new(0.0, 0.0, 1.0),
        );
        let state = FlightState::new(pitch.release_point, launch.velocity).with_spin(pitch.spin_rpm);

        debug!(
            speed_kph = pitch.speed_kph,
            flight_time_s = launch.flight_time_s,
            "pitch launched"
        );
        Ok(Self {
            pitch,
            plate,
            heading,
            solver,
            launch,
            state,
            trail: TrajectoryTrail::new(trail),
            crossing: None,
            at_rest: false,
            steps: 0,
        })
    }

    pub fn pitch(&self) -> &Pitch {
        &self.pitch
    }

    pub fn launch_solution(&self) -> &LaunchSolution {
        &self.launch
    }

    pub fn state(&self) -> &FlightState {
        &self.state
    }

    pub fn position(&self) -> Vec3 {
        self.state.position
    }

    pub fn trail(&self) -> &TrajectoryTrail {
        &self.trail
    }

    pub fn crossing(&self) -> Option<&PlateCrossing> {
        self.crossing.as_ref()
    }

    pub fn is_at_rest(&self) -> bool {
        self.at_rest
    }

    pub fn steps(&self) -> usize {
        self.steps
    }

    /// Integrate one frame. A settled flight ignores further calls.
    pub fn advance(&mut self, dt_s: f32) -> FlightTick {
        if self.at_rest {
            return FlightTick { at_rest: true, ..FlightTick::default() };
        }

        let out = self.solver.step(&self.state, dt_s);
        let Some(sample) = out.sample else {
            return FlightTick::default();
        };
        self.state = out.state;
        self.trail.push(sample);
        self.steps += 1;
        self.at_rest = out.at_rest;

        let crossing = self.check_crossing();
        FlightTick { at_rest: out.at_rest, ground_contact: out.ground_contact, crossing }
    }

    /// Step with a fixed `dt_s` until rest or `max_steps`.
    pub fn simulate_to_rest(&mut self, dt_s: f32, max_steps: usize) -> FlightSummary {
        let start = self.steps;
        while !self.at_rest && self.steps - start < max_steps {
            let before = self.steps;
            self.advance(dt_s);
            if self.steps == before {
                break;
            }
        }
        if !self.at_rest {
            warn!(steps = self.steps, "flight did not settle, abandoning");
        }
        self.summary()
    }

    pub fn summary(&self) -> FlightSummary {
        FlightSummary {
            final_position: self.state.position,
            elapsed_s: self.state.elapsed_s,
            steps: self.steps,
            at_rest: self.at_rest,
            crossing: self.crossing,
            trail_len: self.trail.len(),
        }
    }

    /// Report the first step that reaches the plate window, or passes it.
    fn check_crossing(&mut self) -> Option<PlateCrossing> {
        if self.crossing.is_some() {
            return None;
        }
        let params = self.solver.params();
        let along = (self.state.position - self.plate).dot(&self.heading);
        if along < -params.plate_crossing_window() {
            return None;
        }

        let offset = (self.state.position - self.plate) / params.units_per_meter;
        let crossing = PlateCrossing {
            position: self.state.position,
            location: ZoneLocation::new(
                offset.x / units::FEET_TO_METERS,
                offset.y / units::FEET_TO_METERS,
            ),
            t_seconds: self.state.elapsed_s,
        };
        debug!(x_ft = crossing.location.x, z_ft = crossing.location.z, "pitch crossed plate");
        self.crossing = Some(crossing);
        Some(crossing)
    }
}
