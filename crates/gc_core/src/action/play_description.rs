//! Feed description strings such as `"SL 86 [0.4,-0.5]"`.
//!
//! Pulls out a leading pitch-type code, the first number in the pitch-speed
//! range and a zone location in either `[x, y]` or `x=.. y=..` form. Counts
//! and other small numbers are not speeds. Missing parts stay `None`;
//! nothing is invented.

use serde::{Deserialize, Serialize};

use crate::physics_constants::ball;

/// Pitch-type abbreviations used by the feeds.
const PITCH_TYPE_CODES: &[&str] = &[
    "FF", "FA", "FB", "FT", "FC", "FS", "FO", "SI", "SF", "SL", "ST", "SV", "CU", "KC", "CS", "CH",
    "SC", "KN", "EP",
];

#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PlayDescription {
    pub pitch_type: Option<String>,
    pub speed_mph: Option<f32>,
    /// Normalized zone coordinates `(x, y)`, y up
    pub location: Option<(f32, f32)>,
}

impl PlayDescription {
    pub fn parse(text: &str) -> Self {
        let location = parse_assignment(text).or_else(|| parse_bracket(text));

        // Everything before the first bracket holds the type and the speed.
        let head = text.split('[').next().unwrap_or_default();
        let mut words = head.split_whitespace();

        let pitch_type = head
            .split_whitespace()
            .next()
            .map(str::to_ascii_uppercase)
            .filter(|w| PITCH_TYPE_CODES.contains(&w.as_str()));

        let speed_mph = words.find_map(|w| {
            let w = w.trim_end_matches(|c: char| c == ',' || c == ';');
            let w = w.strip_suffix("mph").unwrap_or(w);
            w.parse::<f32>()
                .ok()
                .filter(|v| (ball::MIN_PITCH_SPEED_MPH..=ball::MAX_PITCH_SPEED_MPH).contains(v))
        });

        Self { pitch_type, speed_mph, location }
    }

    pub fn is_empty(&self) -> bool {
        self.pitch_type.is_none() && self.speed_mph.is_none() && self.location.is_none()
    }
}

/// `[a, b]`
fn parse_bracket(text: &str) -> Option<(f32, f32)> {
    let start = text.find('[')?;
    let rest = &text[start + 1..];
    let end = rest.find(']')?;
    let mut parts = rest[..end].split(',');
    let x = parse_number(parts.next()?)?;
    let y = parse_number(parts.next()?)?;
    if parts.next().is_some() {
        return None;
    }
    Some((x, y))
}

/// `x = a y = b`, case-insensitive, any separator between the pairs.
fn parse_assignment(text: &str) -> Option<(f32, f32)> {
    let lower = text.to_ascii_lowercase();
    let x = value_after(&lower, 'x')?;
    let y = value_after(&lower, 'y')?;
    Some((x, y))
}

fn value_after(text: &str, key: char) -> Option<f32> {
    text.char_indices()
        .filter(|&(i, c)| {
            c == key && !text[..i].chars().next_back().is_some_and(|p| p.is_alphanumeric())
        })
        .find_map(|(i, _)| {
            let rest = text[i + 1..].trim_start().strip_prefix('=')?;
            let rest = rest.trim_start();
            let end = rest
                .find(|c: char| !(c.is_ascii_digit() || c == '.' || c == '-' || c == '+'))
                .unwrap_or(rest.len());
            parse_number(&rest[..end])
        })
}

fn parse_number(s: &str) -> Option<f32> {
    s.trim().parse::<f32>().ok().filter(|v| v.is_finite())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_full_description() {
        let d = PlayDescription::parse("SL 86 [0.4,-0.5]");
        assert_eq!(d.pitch_type.as_deref(), Some("SL"));
        assert_eq!(d.speed_mph, Some(86.0));
        assert_eq!(d.location, Some((0.4, -0.5)));
    }

    #[test]
    fn test_assignment_form() {
        let d = PlayDescription::parse("ff 97 mph x=0.25 y = -0.1");
        assert_eq!(d.pitch_type.as_deref(), Some("FF"));
        assert_eq!(d.speed_mph, Some(97.0));
        assert_eq!(d.location, Some((0.25, -0.1)));
    }

    #[test]
    fn test_speed_with_unit_suffix() {
        assert_eq!(PlayDescription::parse("CH 84mph").speed_mph, Some(84.0));
        assert_eq!(PlayDescription::parse("Pitch 92.5 mph [0.10,0.20]").speed_mph, Some(92.5));
    }

    #[test]
    fn test_missing_parts_stay_none() {
        let d = PlayDescription::parse("K swinging [-0.3,-0.4]");
        assert_eq!(d.pitch_type, None);
        assert_eq!(d.speed_mph, None);
        assert_eq!(d.location, Some((-0.3, -0.4)));

        assert!(PlayDescription::parse("BB").is_empty());
        assert!(PlayDescription::parse("").is_empty());
        assert_eq!(PlayDescription::parse("Backstop [oops]").location, None);
        assert_eq!(PlayDescription::parse("[1,2,3]").location, None);
    }

    #[test]
    fn test_counts_are_not_speeds() {
        assert_eq!(PlayDescription::parse("Strike 2").speed_mph, None);
        assert_eq!(PlayDescription::parse("Ball 1").speed_mph, None);
        assert_eq!(PlayDescription::parse("Ball 3 [0.9,0.2]").speed_mph, None);
        assert_eq!(PlayDescription::parse("FF 2 98").speed_mph, Some(98.0));
        assert_eq!(PlayDescription::parse("EP 250").speed_mph, None);
    }

    #[test]
    fn test_words_containing_x_are_not_keys() {
        let d = PlayDescription::parse("max=3 y=1");
        assert_eq!(d.location, None);
    }
}
