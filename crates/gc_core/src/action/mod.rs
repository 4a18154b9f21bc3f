//! Play-by-play events → animation actions
//!
//! Classification is stateless; whatever is "currently playing" belongs to
//! the animation layer.

pub mod classifier;
pub mod event;
pub mod play_description;

pub use classifier::{classify, classify_detailed, classify_json, lookup_code, Classification, MatchSource};
pub use event::{ActionEvent, ActionState, EventPitch};
pub use play_description::PlayDescription;
