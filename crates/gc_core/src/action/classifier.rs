//! ActionClassifier - play event → [`ActionState`]
//!
//! ## Precedence
//! 1. Strikeout-family text (ends the plate appearance, beats any code)
//! 2. Type code table (uppercased, `-`/space → `_`)
//! 3. Text patterns in order: strikeout → contact → foul → walk → swing → pitch
//! 4. Structured pitch data attached to the event → [`ActionState::Pitch`]
//! 5. [`ActionState::Idle`]
//!
//! Text patterns match whole words; a trailing `*` makes the last word a
//! prefix (`single*` matches "singles").

use std::collections::HashMap;

use once_cell::sync::Lazy;
use serde::{Deserialize, Serialize};
use tracing::debug;

use super::event::{ActionEvent, ActionState};

/// Which rule produced a classification.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum MatchSource {
    StrikeoutText,
    TypeCode,
    FreeText,
    PitchData,
    Default,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Classification {
    pub state: ActionState,
    pub source: MatchSource,
}

static CODE_TABLE: Lazy<HashMap<&'static str, ActionState>> = Lazy::new(|| {
    use ActionState::*;
    [
        ("PITCH", Pitch),
        ("STRIKE", Pitch),
        ("CALLED_STRIKE", Pitch),
        ("BALL", Pitch),
        ("THROW", Pitch),
        ("SWING", Swing),
        ("SWINGING_STRIKE", Swing),
        ("FOUL", Foul),
        ("FOUL_BALL", Foul),
        ("INPLAY", Contact),
        ("IN_PLAY", Contact),
        ("CONTACT", Contact),
        ("HIT", Contact),
        ("SINGLE", Contact),
        ("DOUBLE", Contact),
        ("TRIPLE", Contact),
        ("HOMER", Contact),
        ("HR", Contact),
        ("HOME_RUN", Contact),
        ("WALK", Walk),
        ("BB", Walk),
        ("IBB", Walk),
        ("HBP", Walk),
        ("HIT_BY_PITCH", Walk),
        ("STRIKEOUT", Strikeout),
        ("K", Strikeout),
        ("K_LOOKING", Strikeout),
        ("K_SWINGING", Strikeout),
        ("IDLE", Idle),
    ]
    .into_iter()
    .collect()
});

const STRIKEOUT_PATTERNS: &[&str] = &[
    "strikeout*",
    "struck out",
    "strikes out",
    "k looking",
    "k swinging",
    "called out on strikes",
];

/// Ordered scan after the type code. Contact patterns must not match
/// "hit by pitch", which belongs to the walk family.
const TEXT_PATTERNS: &[(ActionState, &[&str])] = &[
    (ActionState::Strikeout, STRIKEOUT_PATTERNS),
    (
        ActionState::Contact,
        &[
            "hr", "homer*", "home run*", "single*", "double*", "triple*", "in play", "grand slam",
            "grounds out", "flies out", "lines out", "pops out",
        ],
    ),
    (ActionState::Foul, &["foul*"]),
    (
        ActionState::Walk,
        &["walk*", "bb", "ibb", "hbp", "hit by pitch", "base on balls"],
    ),
    (ActionState::Swing, &["swing*"]),
    (ActionState::Pitch, &["pitch*", "throw*", "called strike", "ball"]),
];

/// Map one event to an action. Total: never fails, unknown input is Idle.
pub fn classify(event: &ActionEvent) -> ActionState {
    classify_detailed(event).state
}

pub fn classify_detailed(event: &ActionEvent) -> Classification {
    let tokens: Vec<Vec<String>> = event.texts().map(tokenize).collect();
    let text_hit = |patterns: &[&str]| tokens.iter().any(|t| patterns.iter().any(|p| matches(t, p)));

    if text_hit(STRIKEOUT_PATTERNS) {
        return Classification { state: ActionState::Strikeout, source: MatchSource::StrikeoutText };
    }

    if let Some(state) = event.type_code.as_deref().and_then(lookup_code) {
        return Classification { state, source: MatchSource::TypeCode };
    }

    for (state, patterns) in TEXT_PATTERNS {
        if text_hit(*patterns) {
            return Classification { state: *state, source: MatchSource::FreeText };
        }
    }

    if event.pitch.is_some() {
        return Classification { state: ActionState::Pitch, source: MatchSource::PitchData };
    }

    Classification { state: ActionState::Idle, source: MatchSource::Default }
}

/// Classify a raw feed record. Shapes that are not an event object are
/// logged and classified as Idle.
pub fn classify_json(value: &serde_json::Value) -> ActionState {
    match ActionEvent::from_json_value(value) {
        Ok(event) => classify(&event),
        Err(err) => {
            debug!(%err, "unclassifiable event, idling");
            ActionState::Idle
        }
    }
}

/// Exact type-code lookup after normalization.
pub fn lookup_code(code: &str) -> Option<ActionState> {
    let key: String = code
        .trim()
        .chars()
        .map(|c| match c {
            '-' | ' ' => '_',
            c => c.to_ascii_uppercase(),
        })
        .collect();
    CODE_TABLE.get(key.as_str()).copied()
}

fn tokenize(text: &str) -> Vec<String> {
    text.split(|c: char| !c.is_alphanumeric())
        .filter(|w| !w.is_empty())
        .map(str::to_lowercase)
        .collect()
}

/// Whether `pattern` occurs as consecutive words in `tokens`.
fn matches(tokens: &[String], pattern: &str) -> bool {
    let (body, prefix) = match pattern.strip_suffix('*') {
        Some(body) => (body, true),
        None => (pattern, false),
    };
    let words: Vec<&str> = body.split(' ').collect();
    if words.is_empty() || tokens.len() < words.len() {
        return false;
    }
    let last = words.len() - 1;
    tokens.windows(words.len()).any(|window| {
        window.iter().zip(&words).enumerate().all(|(i, (tok, word))| {
            if prefix && i == last {
                tok.starts_with(word)
            } else {
                tok == word
            }
        })
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::action::event::EventPitch;

    fn ev(code: Option<&str>, text: Option<&str>) -> ActionEvent {
        ActionEvent::new(code, text)
    }

    #[test]
    fn test_strikeout_text_beats_foul_code() {
        let c = classify_detailed(&ev(Some("FOUL"), Some("strikeout swinging")));
        assert_eq!(c.state, ActionState::Strikeout);
        assert_eq!(c.source, MatchSource::StrikeoutText);
        assert_eq!(classify(&ev(Some("FOUL"), Some("foul ball"))), ActionState::Foul);
    }

    #[test]
    fn test_strikeout_pattern_before_foul_pattern() {
        let text = "foul tip, strikes out on a foul strike";
        assert_eq!(classify(&ev(None, Some(text))), ActionState::Strikeout);
        assert_eq!(classify(&ev(None, Some("foul strike"))), ActionState::Foul);
    }

    #[test]
    fn test_code_table_normalization() {
        assert_eq!(classify(&ev(Some(" k-looking "), None)), ActionState::Strikeout);
        assert_eq!(classify(&ev(Some("home run"), None)), ActionState::Contact);
        assert_eq!(classify(&ev(Some("inplay"), None)), ActionState::Contact);
        assert_eq!(classify(&ev(Some("HBP"), None)), ActionState::Walk);
        assert_eq!(classify(&ev(Some("swing"), Some("Hack [-0.2,0.2]"))), ActionState::Swing);
        assert_eq!(lookup_code("nope"), None);
    }

    #[test]
    fn test_code_wins_over_non_strikeout_text() {
        let c = classify_detailed(&ev(Some("PITCH"), Some("DOUBLE [0.2,0.1]")));
        assert_eq!(c.state, ActionState::Pitch);
        assert_eq!(c.source, MatchSource::TypeCode);
    }

    #[test]
    fn test_unknown_code_falls_through_to_text() {
        assert_eq!(classify(&ev(Some("XYZ"), Some("DOUBLE [0.2,0.1]"))), ActionState::Contact);
        assert_eq!(classify(&ev(Some("XYZ"), Some("nothing here"))), ActionState::Idle);
    }

    #[test]
    fn test_text_family_order() {
        let cases = [
            ("Judge homers to left", ActionState::Contact),
            ("singles on a line drive", ActionState::Contact),
            ("fouled back", ActionState::Foul),
            ("hit by pitch", ActionState::Walk),
            ("walks on four pitches", ActionState::Walk),
            ("swinging strike", ActionState::Swing),
            ("called strike", ActionState::Pitch),
            ("FB 96 [0.1,0.5]", ActionState::Idle),
            ("throws over to first", ActionState::Pitch),
            ("K swinging [-0.3,-0.4]", ActionState::Strikeout),
        ];
        for (text, expected) in cases {
            assert_eq!(classify(&ev(None, Some(text))), expected, "{text}");
        }
    }

    #[test]
    fn test_whole_word_matching() {
        // "bb" inside a word, "ball" inside "baseball"
        assert_eq!(classify(&ev(None, Some("abbott baseball"))), ActionState::Idle);
        assert_eq!(classify(&ev(None, Some("outfoul"))), ActionState::Idle);
    }

    #[test]
    fn test_pitch_outcome_is_scanned() {
        let event = ActionEvent::default().with_pitch(EventPitch {
            outcome: Some("Strikeout looking".into()),
            ..EventPitch::default()
        });
        assert_eq!(classify(&event), ActionState::Strikeout);
    }

    #[test]
    fn test_bare_pitch_data_is_a_pitch() {
        let value = serde_json::json!({"pitch": {"type": "FF", "mph": 97.0, "loc": {"px": 0.0, "pz": 2.5}}});
        assert_eq!(classify_json(&value), ActionState::Pitch);

        let event = ActionEvent::from_json_value(&value).unwrap();
        assert_eq!(classify_detailed(&event).source, MatchSource::PitchData);

        // Outcome text and type codes still decide first.
        let foul = event.clone().with_pitch(EventPitch { outcome: Some("Foul".into()), ..EventPitch::default() });
        assert_eq!(classify(&foul), ActionState::Foul);
        let walk = ActionEvent { type_code: Some("HBP".into()), ..event };
        assert_eq!(classify(&walk), ActionState::Walk);
    }

    #[test]
    fn test_empty_and_bad_json_idle() {
        assert_eq!(classify(&ActionEvent::default()), ActionState::Idle);
        assert_eq!(classify_json(&serde_json::json!([1, 2, 3])), ActionState::Idle);
        assert_eq!(classify_json(&serde_json::json!({"type": 7})), ActionState::Idle);
        assert_eq!(
            classify_json(&serde_json::json!({"type": "WALK", "desc": "BB"})),
            ActionState::Walk
        );
    }

    #[test]
    fn test_deterministic() {
        let e = ev(Some("FOUL"), Some("strikeout swinging"));
        let first = classify(&e);
        assert!((0..50).all(|_| classify(&e) == first));
    }
}
