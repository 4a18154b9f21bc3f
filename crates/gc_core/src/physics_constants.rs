//! Physical and field constants.
//!
//! Regulation dimensions plus the one documented constant set used by the
//! defaults in [`crate::config`]. Alternate tunings live in config presets,
//! not here.

/// Unit conversions
pub mod units {
    /// km/h → m/s
    pub const KPH_TO_MPS: f32 = 1.0 / 3.6;
    /// mph → m/s
    pub const MPH_TO_MPS: f32 = 0.44704;
    /// m/s → mph
    pub const MPS_TO_MPH: f32 = 2.237;
    /// feet → meters
    pub const FEET_TO_METERS: f32 = 0.3048;
    /// revolutions per minute → revolutions per second
    pub const RPM_TO_RPS: f32 = 1.0 / 60.0;
}

/// Field geometry (meters)
pub mod field {
    /// Front of the pitching rubber to the point of home plate.
    pub const PLATE_TO_RUBBER_M: f32 = 18.44;
    /// Home plate width (17 in).
    pub const PLATE_WIDTH_M: f32 = 0.4318;
}

/// Ball flight defaults
pub mod ball {
    /// Gravity (m/s², negative = down).
    pub const GRAVITY_MPS2: f32 = -9.81;
    /// Horizontal speed retained against drag; flight time is inflated by its inverse.
    pub const AIR_DRAG_SPEED_FACTOR: f32 = 0.9;
    /// Lateral acceleration per (rev/s × m/s) of horizontal velocity.
    pub const MAGNUS_COEFFICIENT: f32 = 0.0004;
    /// Release height above the rubber when no hand position is known (m).
    pub const RELEASE_HEIGHT_M: f32 = 1.8;
    /// Slowest pitch a play description may report (mph).
    pub const MIN_PITCH_SPEED_MPH: f32 = 40.0;
    /// Fastest pitch a play description may report (mph).
    pub const MAX_PITCH_SPEED_MPH: f32 = 110.0;
    /// Shortest horizontal distance used as a flight-time denominator (m).
    pub const MIN_HORIZONTAL_DISTANCE_M: f32 = 1e-3;
}

/// Ground contact
pub mod bounce {
    /// Vertical speed kept after a ground bounce.
    pub const GROUND_RESTITUTION: f32 = 0.38;
    /// Horizontal speed kept after a ground contact.
    pub const GROUND_FRICTION: f32 = 0.8;
    /// Below this speed after ground contact the ball is at rest (m/s).
    pub const REST_SPEED_MPS: f32 = 0.8;
    /// Ground plane height (m).
    pub const GROUND_Y_M: f32 = 0.0;
}

/// Fixed-step simulation
pub mod sim {
    /// Render-frame step used by offline simulation (s).
    pub const FRAME_DT_S: f32 = 1.0 / 60.0;
    /// Step budget for simulate-to-rest before the flight is abandoned.
    pub const MAX_STEPS: usize = 20_000;
}

/// Trail ring buffer
pub mod trail {
    pub const DEFAULT_CAPACITY: usize = 200;
    pub const MIN_CAPACITY: usize = 80;
    pub const MAX_CAPACITY: usize = 600;
}

/// MLB strike-zone conventions (feet)
pub mod strike_zone {
    /// Half of the 17 in plate width.
    pub const HALF_WIDTH_FT: f32 = 0.708333;
    pub const BOTTOM_FT: f32 = 1.5;
    pub const TOP_FT: f32 = 3.5;
    pub const DEFAULT_GRID_SIZE: usize = 3;
    /// Largest heat grid side accepted from configuration.
    pub const MAX_GRID_SIZE: usize = 64;
    pub const RECENT_MARKS: usize = 30;
}

/// Scene calibration
pub mod calibration {
    pub const MIN_SCALE: f32 = 0.001;
    pub const MAX_SCALE: f32 = 1000.0;
    /// Catcher-view camera distance behind the plate (m).
    pub const CAMERA_BACK_OFFSET_M: f32 = 1.0;
    /// Catcher-view eye height (m).
    pub const CAMERA_EYE_HEIGHT_M: f32 = 1.12;
    /// Look-at point as a multiple of the anchor-to-anchor distance.
    pub const LOOK_BEYOND_MULTIPLIER: f32 = 1.6;
}

/// Actor placement around the plate (meters)
pub mod placement {
    /// Fallback batter feet: distance from the plate toward the mound.
    pub const BATTER_BACK_M: f32 = 2.0;
    /// Fallback batter feet: lateral offset toward the batter's side.
    pub const BATTER_LATERAL_M: f32 = 1.5;
    /// Batter depth bias toward the catcher.
    pub const BATTER_DEPTH_M: f32 = 0.10;
    /// Release offset from the pitcher's feet: (right, up, forward).
    pub const RELEASE_OFFSET_M: (f32, f32, f32) = (0.3, 1.8, 0.5);
}
