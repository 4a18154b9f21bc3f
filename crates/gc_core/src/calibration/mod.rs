//! Scene calibration
//!
//! - [`anchor`]: anchor roles and the role → position map
//! - [`calibrator`]: model units → meters, camera framing
//! - [`placement`]: pitcher/batter stance points derived from the anchors

pub mod anchor;
pub mod calibrator;
pub mod placement;

pub use anchor::{AnchorMap, AnchorRole, Handedness};
pub use calibrator::{CalibrationResult, CalibrationSource, Calibrator};
pub use placement::{place_actors, ActorPlacement, PlacementSettings};
