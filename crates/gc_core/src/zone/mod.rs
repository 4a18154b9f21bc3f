//! Strike-zone aggregation
//!
//! Pitch locations arrive in feet relative to the plate, are normalized once
//! against the [`StrikeZone`] box and then bucketed into the [`HeatGrid`].

pub mod aggregator;
pub mod heat_grid;
pub mod strike_zone;

pub use aggregator::{PitchMark, PitchStats, ZoneAggregator};
pub use heat_grid::HeatGrid;
pub use strike_zone::StrikeZone;
