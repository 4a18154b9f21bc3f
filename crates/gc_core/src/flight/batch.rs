//! Independent flights simulated side by side.

use rayon::prelude::*;

use super::pitch::Pitch;
use super::pitch_flight::{FlightSummary, PitchFlight};
use crate::config::{FlightParams, TrailConfig};
use crate::error::CoreResult;
use crate::geometry::Vec3;

/// Below this many pitches the batch runs sequentially.
const PARALLEL_THRESHOLD: usize = 16;

/// Simulate every pitch to rest with a fixed step. Results keep input order.
pub fn simulate_batch(
    pitches: &[Pitch],
    plate: Vec3,
    params: FlightParams,
    trail: &TrailConfig,
    dt_s: f32,
    max_steps: usize,
) -> Vec<CoreResult<FlightSummary>> {
    let run = |pitch: &Pitch| {
        PitchFlight::launch(*pitch, plate, params, trail)
            .map(|mut flight| flight.simulate_to_rest(dt_s, max_steps))
    };

    if pitches.len() > PARALLEL_THRESHOLD {
        pitches.par_iter().map(run).collect()
    } else {
        pitches.iter().map(run).collect()
    }
}
