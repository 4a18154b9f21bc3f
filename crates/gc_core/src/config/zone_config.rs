use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

use crate::error::{CoreError, CoreResult};
use crate::physics_constants::{strike_zone, trail};

/// Strike-zone geometry and heat-grid shape.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize, JsonSchema)]
#[serde(default)]
pub struct ZoneConfig {
    /// Cells per side of the square heat grid
    pub grid_size: usize,
    /// Horizontal half-width of the zone (ft)
    pub half_width_ft: f32,
    /// Zone bottom above ground (ft)
    pub bottom_ft: f32,
    /// Zone top above ground (ft)
    pub top_ft: f32,
    /// Recent pitch marks kept for the overlay
    pub recent_marks: usize,
}

impl Default for ZoneConfig {
    fn default() -> Self {
        Self {
            grid_size: strike_zone::DEFAULT_GRID_SIZE,
            half_width_ft: strike_zone::HALF_WIDTH_FT,
            bottom_ft: strike_zone::BOTTOM_FT,
            top_ft: strike_zone::TOP_FT,
            recent_marks: strike_zone::RECENT_MARKS,
        }
    }
}

impl ZoneConfig {
    pub fn validate(&self) -> CoreResult<()> {
        if self.grid_size == 0 || self.grid_size > strike_zone::MAX_GRID_SIZE {
            return Err(CoreError::Config(format!(
                "grid_size must be in [1, {}], got {}",
                strike_zone::MAX_GRID_SIZE,
                self.grid_size
            )));
        }
        if !(self.half_width_ft.is_finite() && self.half_width_ft > 0.0) {
            return Err(CoreError::Config("half_width_ft must be positive".into()));
        }
        if !(self.bottom_ft.is_finite() && self.top_ft.is_finite()) || self.top_ft <= self.bottom_ft {
            return Err(CoreError::Config(format!(
                "zone top {} must be above bottom {}",
                self.top_ft, self.bottom_ft
            )));
        }
        Ok(())
    }
}

/// Trail ring-buffer sizing.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize, JsonSchema)]
#[serde(default)]
pub struct TrailConfig {
    pub capacity: usize,
}

impl Default for TrailConfig {
    fn default() -> Self {
        Self { capacity: trail::DEFAULT_CAPACITY }
    }
}

impl TrailConfig {
    /// Capacity clamped to the supported range.
    pub fn effective_capacity(&self) -> usize {
        self.capacity.clamp(trail::MIN_CAPACITY, trail::MAX_CAPACITY)
    }
}
