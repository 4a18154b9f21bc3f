//! TrajectorySolver - closed-form launch velocity and per-frame integration
//!
//! ## Launch
//! Horizontal speed comes straight from the pitch speed (times the drag
//! factor), flight time is horizontal distance over that speed, and the
//! vertical component solves `Δy = v_y·t + ½·g·t²` exactly:
//!
//! ```text
//! v_y = (Δy − ½·g·t²) / t
//! ```
//!
//! ## Step
//! Semi-implicit Euler: gravity, optional Magnus deflection, advance, then
//! ground contact (clamp, restitution, friction, settle).

use serde::{Deserialize, Serialize};
use tracing::{debug, warn};

use super::pitch::Pitch;
use super::trail::TrajectorySample;
use crate::config::FlightParams;
use crate::error::{CoreError, CoreResult};
use crate::geometry::{self, Vec3};
use crate::physics_constants::{ball, units};

/// Result of a launch solve.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct LaunchSolution {
    /// Initial velocity (scene units/s)
    pub velocity: Vec3,
    /// Time to reach the target's horizontal position (s)
    pub flight_time_s: f32,
}

/// Kinematic state of one projectile. Owned exclusively by its flight.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct FlightState {
    pub position: Vec3,
    pub velocity: Vec3,
    /// Spin about the vertical axis (rpm, sign picks the break side)
    #[serde(default)]
    pub spin_rpm: f32,
    /// Seconds since launch
    #[serde(default)]
    pub elapsed_s: f32,
}

impl FlightState {
    pub fn new(position: Vec3, velocity: Vec3) -> Self {
        Self { position, velocity, spin_rpm: 0.0, elapsed_s: 0.0 }
    }

    pub fn with_spin(mut self, spin_rpm: f32) -> Self {
        self.spin_rpm = spin_rpm;
        self
    }

    pub fn speed(&self) -> f32 {
        self.velocity.norm()
    }

    fn is_finite(&self) -> bool {
        geometry::is_finite(&self.position)
            && geometry::is_finite(&self.velocity)
            && self.spin_rpm.is_finite()
            && self.elapsed_s.is_finite()
    }
}

/// Outcome of one [`TrajectorySolver::step`].
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct StepOutcome {
    pub state: FlightState,
    /// Ball touched the ground during this step
    pub ground_contact: bool,
    /// Ball settled; callers stop stepping
    pub at_rest: bool,
    /// Trail point for this step; `None` when the step was rejected
    pub sample: Option<TrajectorySample>,
}

#[derive(Debug, Clone, Copy, Default)]
pub struct TrajectorySolver {
    params: FlightParams,
}

impl TrajectorySolver {
    pub fn new(params: FlightParams) -> Self {
        Self { params }
    }

    pub fn params(&self) -> &FlightParams {
        &self.params
    }

    /// Launch velocity carrying a ball from `release` to `target` (both in
    /// scene units) at `speed_kph`.
    ///
    /// A target directly above or below the release point uses a guarded
    /// horizontal distance, which yields a (near) vertical velocity.
    pub fn solve(&self, release: &Vec3, target: &Vec3, speed_kph: f32) -> CoreResult<LaunchSolution> {
        if !geometry::is_finite(release) || !geometry::is_finite(target) {
            return Err(CoreError::degenerate_trajectory("release or target is not finite"));
        }
        if !speed_kph.is_finite() || speed_kph <= 0.0 {
            return Err(CoreError::degenerate_trajectory(format!(
                "speed must be positive, got {speed_kph} km/h"
            )));
        }

        let upm = self.params.units_per_meter;
        let horizontal_speed = speed_kph * units::KPH_TO_MPS * upm * self.params.air_drag_speed_factor;

        let span = geometry::horizontal(&(target - release));
        let min_distance = ball::MIN_HORIZONTAL_DISTANCE_M * upm;
        let (direction, distance) = match geometry::try_normalize(&span) {
            Some(dir) if span.norm() >= min_distance => (dir, span.norm()),
            _ => {
                debug!(distance = span.norm(), "target above release point, guarding distance");
                (Vec3::zeros(), min_distance)
            }
        };

        let t = distance / horizontal_speed;
        if !t.is_finite() || t <= 0.0 {
            return Err(CoreError::degenerate_trajectory(format!("flight time {t} is not positive")));
        }

        let g = self.params.gravity();
        let dy = target.y - release.y;
        let vy = (dy - 0.5 * g * t * t) / t;

        let velocity = Vec3::new(direction.x * horizontal_speed, vy, direction.z * horizontal_speed);
        if !geometry::is_finite(&velocity) {
            return Err(CoreError::degenerate_trajectory("solved velocity is not finite"));
        }
        Ok(LaunchSolution { velocity, flight_time_s: t })
    }

    /// Solve a [`Pitch`] whose target is measured from `plate`.
    pub fn solve_pitch(&self, pitch: &Pitch, plate: &Vec3) -> CoreResult<LaunchSolution> {
        if !pitch.target_location.is_finite() {
            return Err(CoreError::degenerate_trajectory("pitch location is not finite"));
        }
        let target = pitch.target_world(plate, self.params.units_per_meter);
        self.solve(&pitch.release_point, &target, pitch.speed_kph)
    }

    /// [`TrajectorySolver::solve`] that logs rejected input and returns a
    /// zero velocity instead of failing.
    pub fn solve_velocity_or_zero(&self, release: &Vec3, target: &Vec3, speed_kph: f32) -> Vec3 {
        match self.solve(release, target, speed_kph) {
            Ok(solution) => solution.velocity,
            Err(err) => {
                warn!(%err, "launch rejected, using zero velocity");
                Vec3::zeros()
            }
        }
    }

    /// Advance `state` by `dt_s` seconds.
    ///
    /// A non-positive or non-finite `dt_s`, or a non-finite state, is a
    /// logged no-op that produces no sample.
    pub fn step(&self, state: &FlightState, dt_s: f32) -> StepOutcome {
        let rejected = |reason: &str| {
            warn!(dt_s, reason, "flight step rejected");
            StepOutcome { state: *state, ground_contact: false, at_rest: false, sample: None }
        };
        if !dt_s.is_finite() || dt_s <= 0.0 {
            return rejected("dt must be positive");
        }
        if !state.is_finite() {
            return rejected("state is not finite");
        }

        let p = &self.params;
        let mut velocity = state.velocity;
        velocity.y += p.gravity() * dt_s;

        if state.spin_rpm != 0.0 && p.magnus_coefficient != 0.0 {
            let rps = state.spin_rpm * units::RPM_TO_RPS;
            // Perpendicular to the horizontal velocity, side chosen by spin sign.
            let lateral = Vec3::new(-velocity.z, 0.0, velocity.x) * (p.magnus_coefficient * rps);
            velocity += lateral * dt_s;
        }

        let mut position = state.position + velocity * dt_s;
        let ground = p.ground_level();
        let mut ground_contact = false;
        let mut at_rest = false;

        if position.y < ground {
            ground_contact = true;
            position.y = ground;
            velocity.y = velocity.y.abs() * p.restitution;
            velocity.x *= p.friction;
            velocity.z *= p.friction;
            if velocity.norm() < p.rest_speed() {
                velocity = Vec3::zeros();
                at_rest = true;
            }
        }

        if !geometry::is_finite(&position) || !geometry::is_finite(&velocity) {
            return rejected("integration overflowed");
        }

        let next = FlightState {
            position,
            velocity,
            spin_rpm: state.spin_rpm,
            elapsed_s: state.elapsed_s + dt_s,
        };
        StepOutcome {
            state: next,
            ground_contact,
            at_rest,
            sample: Some(TrajectorySample::new(position, next.elapsed_s)),
        }
    }
}
