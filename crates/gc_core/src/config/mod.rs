//! # Core Configuration
//!
//! Every tuning constant the core uses is reachable from [`CoreConfig`].
//!
//! ## Usage
//! ```rust
//! use gc_core::config::CoreConfig;
//!
//! let config = CoreConfig::default();
//! let legacy = CoreConfig::from_profile("catcher_view").unwrap();
//! assert!(config.validate().is_ok());
//! assert!(legacy.validate().is_ok());
//! ```
//!
//! ## Environment Variables
//!
//! - `GC_FLIGHT_PROFILE`: select a preset (`default`, `enhanced`, `catcher_view`)

mod calibration_config;
mod flight_config;
mod zone_config;

pub use calibration_config::{CalibrationConfig, CameraFraming};
pub use flight_config::FlightParams;
pub use zone_config::{TrailConfig, ZoneConfig};

use std::env;
use std::fs;
use std::path::Path;

use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

use crate::error::{CoreError, CoreResult};

pub const PROFILE_ENV_VAR: &str = "GC_FLIGHT_PROFILE";

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Default, JsonSchema)]
#[serde(default)]
pub struct CoreConfig {
    pub flight: FlightParams,
    pub calibration: CalibrationConfig,
    pub zone: ZoneConfig,
    pub trail: TrailConfig,
}

impl CoreConfig {
    pub fn enhanced() -> Self {
        Self { flight: FlightParams::enhanced(), ..Self::default() }
    }

    pub fn catcher_view() -> Self {
        Self { flight: FlightParams::catcher_view(), ..Self::default() }
    }

    /// Named preset lookup (case-insensitive).
    pub fn from_profile(name: &str) -> Option<Self> {
        match name.trim().to_lowercase().as_str() {
            "" | "default" => Some(Self::default()),
            "enhanced" => Some(Self::enhanced()),
            "catcher_view" | "catcher" => Some(Self::catcher_view()),
            _ => None,
        }
    }

    /// Load the preset named by `GC_FLIGHT_PROFILE`, or the default.
    pub fn from_env_or_default() -> Self {
        let name = env::var(PROFILE_ENV_VAR).unwrap_or_default();
        Self::from_profile(&name).unwrap_or_else(|| {
            tracing::warn!(profile = %name, "unknown flight profile, using default");
            Self::default()
        })
    }

    pub fn from_json_str(json: &str) -> CoreResult<Self> {
        let cfg: Self = serde_json::from_str(json)?;
        cfg.validate()?;
        Ok(cfg)
    }

    pub fn from_yaml_str(yaml: &str) -> CoreResult<Self> {
        let cfg: Self = serde_yaml::from_str(yaml)?;
        cfg.validate()?;
        Ok(cfg)
    }

    /// Load from a `.json`, `.yaml` or `.yml` file.
    pub fn from_file(path: impl AsRef<Path>) -> CoreResult<Self> {
        let path = path.as_ref();
        let text = fs::read_to_string(path)
            .map_err(|e| CoreError::Config(format!("{}: {}", path.display(), e)))?;
        match path.extension().and_then(|e| e.to_str()) {
            Some("yaml") | Some("yml") => Self::from_yaml_str(&text),
            _ => Self::from_json_str(&text),
        }
    }

    pub fn validate(&self) -> CoreResult<()> {
        self.flight.validate()?;
        self.calibration.validate()?;
        self.zone.validate()?;
        Ok(())
    }

    /// JSON Schema describing the configuration file format.
    pub fn json_schema() -> serde_json::Value {
        let schema = schemars::schema_for!(CoreConfig);
        serde_json::to_value(schema).unwrap_or(serde_json::Value::Null)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn test_default_config() {
        let cfg = CoreConfig::default();
        assert!((cfg.flight.gravity_mps2 + 9.81).abs() < 1e-6);
        assert_eq!(cfg.zone.grid_size, 3);
        assert_eq!(cfg.trail.capacity, 200);
        assert!(cfg.validate().is_ok());
    }

    #[test]
    fn test_profiles_differ_only_in_flight() {
        let enhanced = CoreConfig::from_profile("Enhanced").unwrap();
        let catcher = CoreConfig::from_profile("catcher_view").unwrap();
        assert_ne!(enhanced.flight, catcher.flight);
        assert_eq!(enhanced.zone, catcher.zone);
        assert!(CoreConfig::from_profile("arcade").is_none());
    }

    #[test]
    fn test_config_serialization_roundtrip() {
        let cfg = CoreConfig::catcher_view();
        let json = serde_json::to_string(&cfg).unwrap();
        let parsed = CoreConfig::from_json_str(&json).unwrap();
        assert_eq!(parsed, cfg);
    }

    #[test]
    fn test_yaml_partial_override() {
        let yaml = "flight:\n  restitution: 0.36\nzone:\n  grid_size: 5\n";
        let cfg = CoreConfig::from_yaml_str(yaml).unwrap();
        assert!((cfg.flight.restitution - 0.36).abs() < 1e-6);
        assert_eq!(cfg.zone.grid_size, 5);
        assert_eq!(cfg.trail, TrailConfig::default());
    }

    #[test]
    fn test_invalid_values_rejected() {
        let err = CoreConfig::from_json_str(r#"{"zone": {"grid_size": 0}}"#).unwrap_err();
        assert!(matches!(err, CoreError::Config(_)));
        assert!(!err.is_recoverable());
    }

    #[test]
    fn test_from_file_dispatches_on_extension() {
        let dir = tempfile::tempdir().unwrap();

        let yaml_path = dir.path().join("gamecast.yaml");
        let mut f = fs::File::create(&yaml_path).unwrap();
        writeln!(f, "trail:\n  capacity: 120").unwrap();
        assert_eq!(CoreConfig::from_file(&yaml_path).unwrap().trail.capacity, 120);

        let json_path = dir.path().join("gamecast.json");
        fs::write(&json_path, r#"{"calibration": {"reference_distance_m": 20.0}}"#).unwrap();
        let cfg = CoreConfig::from_file(&json_path).unwrap();
        assert!((cfg.calibration.reference_distance_m - 20.0).abs() < 1e-6);

        assert!(CoreConfig::from_file(dir.path().join("missing.json")).is_err());
    }

    #[test]
    fn test_json_schema_lists_sections() {
        let schema = CoreConfig::json_schema();
        let props = &schema["properties"];
        for key in ["flight", "calibration", "zone", "trail"] {
            assert!(props.get(key).is_some(), "schema missing {key}");
        }
    }
}
