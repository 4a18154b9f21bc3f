//! Anchor roles and the role → position map.
//!
//! The asset scanner builds an [`AnchorMap`] once per loaded field model.
//! The core only ever looks positions up by role; it never traverses the
//! asset itself.

use std::collections::HashMap;

use serde::{Deserialize, Serialize};

use crate::geometry::{is_finite, Vec3};

/// Named reference point roles found in a field asset.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum AnchorRole {
    Plate,
    Rubber,
    PitcherFeet,
    BatterFeetL,
    BatterFeetR,
    PointOfView,
}

/// Batter stance side.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum Handedness {
    #[serde(alias = "L", alias = "left")]
    Left,
    #[default]
    #[serde(alias = "R", alias = "right")]
    Right,
}

impl Handedness {
    pub fn flip(&self) -> Self {
        match self {
            Handedness::Left => Handedness::Right,
            Handedness::Right => Handedness::Left,
        }
    }
}

impl AnchorRole {
    pub const ALL: [AnchorRole; 6] = [
        AnchorRole::Plate,
        AnchorRole::Rubber,
        AnchorRole::PitcherFeet,
        AnchorRole::BatterFeetL,
        AnchorRole::BatterFeetR,
        AnchorRole::PointOfView,
    ];

    /// Match order for node names. Feet and POV roles come before plate and
    /// rubber because their aliases contain the shorter words
    /// (`rubber_feet`, `mound_feet`).
    const MATCH_ORDER: [AnchorRole; 6] = [
        AnchorRole::PointOfView,
        AnchorRole::PitcherFeet,
        AnchorRole::BatterFeetL,
        AnchorRole::BatterFeetR,
        AnchorRole::Plate,
        AnchorRole::Rubber,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            AnchorRole::Plate => "plate",
            AnchorRole::Rubber => "rubber",
            AnchorRole::PitcherFeet => "pitcherFeet",
            AnchorRole::BatterFeetL => "batterFeetL",
            AnchorRole::BatterFeetR => "batterFeetR",
            AnchorRole::PointOfView => "pointOfView",
        }
    }

    /// Lowercase substrings a node name may contain to carry this role.
    pub fn aliases(&self) -> &'static [&'static str] {
        match self {
            AnchorRole::Plate => &[
                "platecenter",
                "homeplate",
                "plate_center",
                "home_plate",
                "home-plate",
                "plate",
            ],
            AnchorRole::Rubber => &[
                "rubbercenter",
                "pitchersrubber",
                "moundcenter",
                "rubber_center",
                "mound",
                "rubber",
            ],
            AnchorRole::PitcherFeet => &["pitcher_feet", "pitcherfeet", "mound_feet", "rubber_feet"],
            AnchorRole::BatterFeetL => &[
                "batterl_feet",
                "batter_l_feet",
                "batter_left_feet",
                "lhb_feet",
                "batterl-legs",
                "batterl",
            ],
            AnchorRole::BatterFeetR => &[
                "batterr_feet",
                "batter_r_feet",
                "batter_right_feet",
                "rhb_feet",
                "batterr-legs",
                "batterr",
            ],
            AnchorRole::PointOfView => &["camera_pov", "cam_pov", "view_pov", "pov"],
        }
    }

    /// Role carried by an asset node name (case-insensitive substring match).
    pub fn from_node_name(name: &str) -> Option<Self> {
        let lower = name.to_lowercase();
        Self::MATCH_ORDER
            .into_iter()
            .find(|role| role.aliases().iter().any(|alias| lower.contains(alias)))
    }

    pub fn batter_feet(side: Handedness) -> Self {
        match side {
            Handedness::Left => AnchorRole::BatterFeetL,
            Handedness::Right => AnchorRole::BatterFeetR,
        }
    }
}

/// Immutable-after-capture role → world position lookup.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct AnchorMap {
    anchors: HashMap<AnchorRole, Vec3>,
}

impl AnchorMap {
    pub fn new() -> Self {
        Self::default()
    }

    /// Build from `(node name, world position)` pairs. The first node that
    /// matches a role wins; later matches and non-finite positions are ignored.
    pub fn from_named_nodes<'a, I>(nodes: I) -> Self
    where
        I: IntoIterator<Item = (&'a str, Vec3)>,
    {
        let mut map = Self::new();
        for (name, position) in nodes {
            if let Some(role) = AnchorRole::from_node_name(name) {
                if !map.contains(role) && is_finite(&position) {
                    map.anchors.insert(role, position);
                }
            }
        }
        map
    }

    /// Builder-style insert used by scanners and tests.
    pub fn with(mut self, role: AnchorRole, position: Vec3) -> Self {
        self.anchors.insert(role, position);
        self
    }

    pub fn get(&self, role: AnchorRole) -> Option<Vec3> {
        self.anchors.get(&role).copied()
    }

    pub fn contains(&self, role: AnchorRole) -> bool {
        self.anchors.contains_key(&role)
    }

    pub fn len(&self) -> usize {
        self.anchors.len()
    }

    pub fn is_empty(&self) -> bool {
        self.anchors.is_empty()
    }

    /// Roles present, in declaration order.
    pub fn roles(&self) -> Vec<AnchorRole> {
        AnchorRole::ALL
            .into_iter()
            .filter(|role| self.contains(*role))
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_node_names_map_to_roles() {
        assert_eq!(AnchorRole::from_node_name("HomePlate_Center"), Some(AnchorRole::Plate));
        assert_eq!(AnchorRole::from_node_name("PitchersRubber"), Some(AnchorRole::Rubber));
        assert_eq!(AnchorRole::from_node_name("Mound"), Some(AnchorRole::Rubber));
        assert_eq!(AnchorRole::from_node_name("BatterR_Feet"), Some(AnchorRole::BatterFeetR));
        assert_eq!(AnchorRole::from_node_name("lhb_feet.001"), Some(AnchorRole::BatterFeetL));
        assert_eq!(AnchorRole::from_node_name("CAMERA_POV"), Some(AnchorRole::PointOfView));
        assert_eq!(AnchorRole::from_node_name("Scoreboard"), None);
    }

    #[test]
    fn test_feet_aliases_beat_shorter_rubber_alias() {
        assert_eq!(AnchorRole::from_node_name("rubber_feet"), Some(AnchorRole::PitcherFeet));
        assert_eq!(AnchorRole::from_node_name("mound_feet"), Some(AnchorRole::PitcherFeet));
    }

    #[test]
    fn test_first_match_wins() {
        let map = AnchorMap::from_named_nodes([
            ("plate", Vec3::new(1.0, 0.0, 0.0)),
            ("home_plate_2", Vec3::new(9.0, 0.0, 0.0)),
            ("rubber", Vec3::new(0.0, 0.0, -18.44)),
        ]);
        assert_eq!(map.get(AnchorRole::Plate), Some(Vec3::new(1.0, 0.0, 0.0)));
        assert_eq!(map.roles(), vec![AnchorRole::Plate, AnchorRole::Rubber]);
    }

    #[test]
    fn test_non_finite_positions_ignored() {
        let map = AnchorMap::from_named_nodes([("plate", Vec3::new(f32::NAN, 0.0, 0.0))]);
        assert!(map.is_empty());
    }

    #[test]
    fn test_role_serializes_camel_case() {
        let json = serde_json::to_string(&AnchorRole::PitcherFeet).unwrap();
        assert_eq!(json, "\"pitcherFeet\"");
        assert_eq!(AnchorRole::PointOfView.as_str(), "pointOfView");
    }

    #[test]
    fn test_batter_feet_by_side() {
        assert_eq!(AnchorRole::batter_feet(Handedness::Left), AnchorRole::BatterFeetL);
        assert_eq!(AnchorRole::batter_feet(Handedness::Right), AnchorRole::BatterFeetR);
        assert_eq!(Handedness::Left.flip(), Handedness::Right);
    }
}
