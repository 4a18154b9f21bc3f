//! # gc_core - Baseball Gamecast Core
//!
//! Numeric and classification core behind a real-time 3D gamecast: scene
//! calibration from field anchors, pitch flight (closed-form launch plus
//! per-frame integration), strike-zone heat-map aggregation and
//! play-by-play → animation action classification.
//!
//! ## Features
//! - Pure value objects between components, one owning [`GameCast`] context
//! - Rendering, asset loading and feed transport stay outside the crate
//! - Malformed upstream data degrades to safe defaults and a `tracing` warning
//!
//! ## Example
//! ```rust
//! use gc_core::{ActionEvent, ActionState, GameCast};
//!
//! let mut cast = GameCast::default();
//! let out = cast.handle_event(&ActionEvent::new(Some("PITCH"), Some("SL 86 [0.4,-0.5]")));
//! assert_eq!(out.action, ActionState::Pitch);
//! assert!(out.launched);
//! while let Some(tick) = cast.tick(1.0 / 60.0) {
//!     if tick.at_rest {
//!         break;
//!     }
//! }
//! assert_eq!(cast.zone().grid().total(), 1);
//! ```

// Doc formatting lints - purely cosmetic
#![allow(clippy::doc_lazy_continuation)]
// Solver and placement entry points take the full physical setup
#![allow(clippy::too_many_arguments)]

pub mod action;
pub mod calibration;
pub mod config;
pub mod context;
pub mod error;
pub mod flight;
pub mod geometry;
pub mod physics_constants;
pub mod zone;

pub use action::{classify, classify_json, ActionEvent, ActionState, PlayDescription};
pub use calibration::{AnchorMap, AnchorRole, CalibrationResult, Calibrator, Handedness};
pub use config::CoreConfig;
pub use context::{EventOutcome, GameCast};
pub use error::{CoreError, CoreResult};
pub use flight::{Pitch, PitchFlight, TrajectorySample, TrajectorySolver, ZoneLocation};
pub use geometry::{Aabb, Vec3};
pub use zone::{HeatGrid, ZoneAggregator};
