use std::fmt;

use serde::{Deserialize, Serialize};

use crate::error::{CoreError, CoreResult};
use crate::flight::ZoneLocation;

/// Animation bucket for one play event.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ActionState {
    Pitch,
    Swing,
    Contact,
    Foul,
    Walk,
    Strikeout,
    #[default]
    Idle,
}

impl ActionState {
    pub const ALL: [ActionState; 7] = [
        ActionState::Pitch,
        ActionState::Swing,
        ActionState::Contact,
        ActionState::Foul,
        ActionState::Walk,
        ActionState::Strikeout,
        ActionState::Idle,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            ActionState::Pitch => "pitch",
            ActionState::Swing => "swing",
            ActionState::Contact => "contact",
            ActionState::Foul => "foul",
            ActionState::Walk => "walk",
            ActionState::Strikeout => "strikeout",
            ActionState::Idle => "idle",
        }
    }

    /// Ends the plate appearance.
    pub fn is_terminal(&self) -> bool {
        matches!(self, ActionState::Contact | ActionState::Walk | ActionState::Strikeout)
    }
}

impl fmt::Display for ActionState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Structured pitch data some feeds attach to an event.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct EventPitch {
    #[serde(alias = "type")]
    pub pitch_type: Option<String>,
    #[serde(alias = "mph", alias = "velocity")]
    pub speed_mph: Option<f32>,
    #[serde(alias = "loc")]
    pub location: Option<ZoneLocation>,
    pub outcome: Option<String>,
}

/// One play-by-play record as delivered by the feed. Every field is optional.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct ActionEvent {
    #[serde(alias = "type", alias = "code")]
    pub type_code: Option<String>,
    #[serde(alias = "desc", alias = "description", alias = "text")]
    pub free_text: Option<String>,
    pub pitch: Option<EventPitch>,
}

impl ActionEvent {
    pub fn new(type_code: Option<&str>, free_text: Option<&str>) -> Self {
        Self {
            type_code: type_code.map(str::to_string),
            free_text: free_text.map(str::to_string),
            pitch: None,
        }
    }

    pub fn with_pitch(mut self, pitch: EventPitch) -> Self {
        self.pitch = Some(pitch);
        self
    }

    /// Decode a feed record. Anything other than an object of optional
    /// string fields is [`CoreError::UnknownEventShape`].
    pub fn from_json_value(value: &serde_json::Value) -> CoreResult<Self> {
        if !value.is_object() {
            return Err(CoreError::UnknownEventShape(truncate(value.to_string())));
        }
        serde_json::from_value(value.clone())
            .map_err(|e| CoreError::UnknownEventShape(format!("{e}: {}", truncate(value.to_string()))))
    }

    pub fn from_json_str(json: &str) -> CoreResult<Self> {
        let value: serde_json::Value = serde_json::from_str(json)
            .map_err(|e| CoreError::UnknownEventShape(format!("{e}: {}", truncate(json.to_string()))))?;
        Self::from_json_value(&value)
    }

    /// Free text followed by the attached pitch outcome, whichever exist.
    pub fn texts(&self) -> impl Iterator<Item = &str> {
        self.free_text
            .as_deref()
            .into_iter()
            .chain(self.pitch.as_ref().and_then(|p| p.outcome.as_deref()))
    }
}

fn truncate(mut s: String) -> String {
    const MAX: usize = 120;
    if s.len() > MAX {
        let mut cut = MAX;
        while !s.is_char_boundary(cut) {
            cut -= 1;
        }
        s.truncate(cut);
        s.push_str("...");
    }
    s
}
