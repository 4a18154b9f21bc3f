//! Ball flight
//!
//! - [`pitch`]: pitch description, strike-zone feet → world
//! - [`solver`]: closed-form launch velocity and the per-frame step
//! - [`trail`]: bounded trajectory samples
//! - [`pitch_flight`]: one owned flight from release to rest
//! - [`batch`]: many independent flights in parallel

pub mod batch;
pub mod pitch;
pub mod pitch_flight;
pub mod solver;
pub mod trail;

pub use batch::simulate_batch;
pub use pitch::{fallback_release_point, Pitch, ZoneLocation};
pub use pitch_flight::{FlightSummary, FlightTick, PitchFlight, PlateCrossing};
pub use solver::{FlightState, LaunchSolution, StepOutcome, TrajectorySolver};
pub use trail::{TrajectorySample, TrajectoryTrail};
