//! ZoneAggregator - heat grid, recent marks and running pitch stats.

use std::collections::{BTreeMap, VecDeque};

use serde::{Deserialize, Serialize};
use tracing::debug;

use super::heat_grid::HeatGrid;
use super::strike_zone::StrikeZone;
use crate::config::ZoneConfig;
use crate::flight::ZoneLocation;

/// One registered pitch location, as drawn on the zone overlay.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PitchMark {
    /// Plate-relative location (ft)
    pub location: ZoneLocation,
    /// Normalized `[-1, 1]` coordinates used for the grid
    pub normalized: (f32, f32),
    pub cell: (usize, usize),
    pub in_zone: bool,
    #[serde(default)]
    pub pitch_type: Option<String>,
    #[serde(default)]
    pub speed_mph: Option<f32>,
}

/// Running totals since the last reset.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PitchStats {
    pub total: u32,
    pub in_zone: u32,
    pub speed_sum_mph: f32,
    pub speed_samples: u32,
    pub pitch_types: BTreeMap<String, u32>,
}

impl PitchStats {
    pub fn out_of_zone(&self) -> u32 {
        self.total - self.in_zone
    }

    /// Whole-number percentage of pitches inside the zone.
    pub fn in_zone_percentage(&self) -> u32 {
        if self.total == 0 {
            return 0;
        }
        ((self.in_zone as f32 / self.total as f32) * 100.0).round() as u32
    }

    pub fn average_speed_mph(&self) -> Option<f32> {
        (self.speed_samples > 0).then(|| self.speed_sum_mph / self.speed_samples as f32)
    }
}

#[derive(Debug, Clone)]
pub struct ZoneAggregator {
    zone: StrikeZone,
    grid: HeatGrid,
    recent: VecDeque<PitchMark>,
    recent_capacity: usize,
    stats: PitchStats,
}

impl Default for ZoneAggregator {
    fn default() -> Self {
        Self::new(&ZoneConfig::default())
    }
}

impl ZoneAggregator {
    pub fn new(config: &ZoneConfig) -> Self {
        Self {
            zone: StrikeZone::from_config(config),
            grid: HeatGrid::new(config.grid_size),
            recent: VecDeque::with_capacity(config.recent_marks),
            recent_capacity: config.recent_marks,
            stats: PitchStats::default(),
        }
    }

    pub fn zone(&self) -> &StrikeZone {
        &self.zone
    }

    pub fn grid(&self) -> &HeatGrid {
        &self.grid
    }

    pub fn stats(&self) -> &PitchStats {
        &self.stats
    }

    /// Newest last.
    pub fn recent(&self) -> impl Iterator<Item = &PitchMark> {
        self.recent.iter()
    }

    /// Count an already-normalized location; `(x, z)` is clamped to `[-1, 1]`.
    pub fn bump(&mut self, x: f32, z: f32) -> (usize, usize) {
        self.grid.bump(x, z)
    }

    /// Register a pitch location in feet.
    pub fn record(&mut self, location: ZoneLocation) -> PitchMark {
        self.record_pitch(location, None, None)
    }

    /// Register a pitch location with its type and speed.
    pub fn record_pitch(
        &mut self,
        location: ZoneLocation,
        pitch_type: Option<&str>,
        speed_mph: Option<f32>,
    ) -> PitchMark {
        let normalized = self.zone.normalize(&location);
        let cell = self.grid.bump(normalized.0, normalized.1);
        let in_zone = self.zone.contains(&location);

        self.stats.total += 1;
        if in_zone {
            self.stats.in_zone += 1;
        }
        if let Some(speed) = speed_mph.filter(|s| s.is_finite()) {
            self.stats.speed_sum_mph += speed;
            self.stats.speed_samples += 1;
        }
        if let Some(kind) = pitch_type {
            *self.stats.pitch_types.entry(kind.to_string()).or_insert(0) += 1;
        }

        debug!(row = cell.0, col = cell.1, in_zone, "pitch registered");
        let mark = PitchMark {
            location,
            normalized,
            cell,
            in_zone,
            pitch_type: pitch_type.map(str::to_string),
            speed_mph,
        };
        if self.recent_capacity > 0 {
            if self.recent.len() == self.recent_capacity {
                self.recent.pop_front();
            }
            self.recent.push_back(mark.clone());
        }
        mark
    }

    pub fn reset(&mut self) {
        self.grid.reset();
        self.recent.clear();
        self.stats = PitchStats::default();
    }
}
