//! Aim assist configuration (TOML, загружается один раз при старте)
//!
//! Defaults: friction radius 100px, magnetism radius 60px, overlap range ≥ 25.

use std::path::Path;

use bevy::prelude::*;
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::curve::{CurveKey, ResponseCurve};
use crate::physics::layers::{OBJECT_TYPES_AIMABLE, TRACE_CHANNEL_VISIBILITY};

/// Minimal overlap range (world units)
pub const MIN_OVERLAP_RANGE: f32 = 25.0;

/// Team identifier
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Reflect, Serialize, Deserialize)]
#[serde(transparent)]
pub struct TeamId(pub u8);

/// Errors that can occur while loading configuration.
#[derive(Error, Debug)]
pub enum ConfigError {
    /// Config file could not be read.
    #[error("failed to read config: {0}")]
    Io(#[from] std::io::Error),

    /// Config file is not valid TOML or does not match the schema.
    #[error("failed to parse config: {0}")]
    Parse(#[from] toml::de::Error),

    /// Config could not be written back to TOML.
    #[error("failed to serialize config: {0}")]
    Serialize(#[from] toml::ser::Error),

    /// A response curve is malformed.
    #[error("invalid {section} curve: {reason}")]
    InvalidCurve {
        /// Section the curve belongs to (`friction` / `magnetism`).
        section: &'static str,
        /// What is wrong with it.
        reason: String,
    },
}

/// Candidate discovery settings
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct FilterConfig {
    /// Half extents of the overlap box in camera space (x right, y up, z depth)
    pub overlap_half_extents: [f32; 3],
    /// Distance along camera forward to the overlap box center
    pub overlap_range: f32,
    /// Object type mask for the overlap query
    pub object_types: u32,
    /// Channel mask for the visibility trace
    pub visibility_channel: u32,
    pub query_teams: bool,
    /// Read `Team` straight from the collider entity when present
    pub team_from_native_interface: bool,
    pub teams_to_query: Vec<TeamId>,
}

impl Default for FilterConfig {
    fn default() -> Self {
        Self {
            overlap_half_extents: [10.0, 10.0, 25.0],
            overlap_range: MIN_OVERLAP_RANGE,
            object_types: OBJECT_TYPES_AIMABLE,
            visibility_channel: TRACE_CHANNEL_VISIBILITY,
            query_teams: false,
            team_from_native_interface: true,
            teams_to_query: Vec::new(),
        }
    }
}

impl FilterConfig {
    pub fn half_extents(&self) -> Vec3 {
        Vec3::from_array(self.overlap_half_extents)
    }

    pub fn accepts_team(&self, team: TeamId) -> bool {
        self.teams_to_query.contains(&team)
    }
}

/// Friction: замедление чувствительности рядом с целью
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct FrictionConfig {
    pub enabled: bool,
    /// Screen-space radius (pixels)
    pub radius: f32,
    pub curve: ResponseCurve,
}

impl Default for FrictionConfig {
    fn default() -> Self {
        Self {
            enabled: true,
            radius: 100.0,
            curve: ResponseCurve::Keys {
                keys: vec![
                    CurveKey::new(0.0, 0.6),
                    CurveKey::new(0.7, 0.4),
                    CurveKey::new(1.0, 0.0),
                ],
            },
        }
    }
}

/// Magnetism: притяжение прицела к цели
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct MagnetismConfig {
    pub enabled: bool,
    /// Screen-space radius (pixels)
    pub radius: f32,
    /// Aim rotation speed at full strength (radians per second)
    pub pull_speed: f32,
    pub curve: ResponseCurve,
}

impl Default for MagnetismConfig {
    fn default() -> Self {
        Self {
            enabled: true,
            radius: 60.0,
            pull_speed: 1.2,
            curve: ResponseCurve::SmoothFalloff,
        }
    }
}

/// Full aim assist configuration (one per player)
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct AimAssistConfig {
    /// Assist only while the last used device is a gamepad
    pub use_only_on_gamepad: bool,
    /// Log selection results every frame
    pub show_debug: bool,
    pub filter: FilterConfig,
    pub friction: FrictionConfig,
    pub magnetism: MagnetismConfig,
}

impl AimAssistConfig {
    pub fn from_toml_str(source: &str) -> Result<Self, ConfigError> {
        let config: AimAssistConfig = toml::from_str(source)?;
        config.validated()
    }

    pub fn load(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let source = std::fs::read_to_string(path)?;
        Self::from_toml_str(&source)
    }

    pub fn to_toml_string(&self) -> Result<String, ConfigError> {
        Ok(toml::to_string(self)?)
    }

    /// Curve validation + clamp overlap range.
    ///
    /// Radii are NOT clamped: a non-positive radius disables the effect.
    pub fn validated(mut self) -> Result<Self, ConfigError> {
        self.friction
            .curve
            .validate()
            .map_err(|reason| ConfigError::InvalidCurve { section: "friction", reason })?;
        self.magnetism
            .curve
            .validate()
            .map_err(|reason| ConfigError::InvalidCurve { section: "magnetism", reason })?;

        if self.filter.overlap_range.is_nan() || self.filter.overlap_range < MIN_OVERLAP_RANGE {
            self.filter.overlap_range = MIN_OVERLAP_RANGE;
        }

        Ok(self)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let config = AimAssistConfig::default();
        assert!(!config.use_only_on_gamepad);
        assert!(config.friction.enabled);
        assert_eq!(config.friction.radius, 100.0);
        assert_eq!(config.magnetism.radius, 60.0);
        assert_eq!(config.filter.overlap_range, MIN_OVERLAP_RANGE);
        assert!(!config.filter.query_teams);
    }

    #[test]
    fn test_parse_partial_toml() {
        let config = AimAssistConfig::from_toml_str(
            r#"
            use_only_on_gamepad = true

            [filter]
            overlap_range = 1500.0
            query_teams = true
            teams_to_query = [2, 3]

            [friction]
            radius = 120.0
            curve = { kind = "linear_falloff" }

            [magnetism]
            enabled = false
            "#,
        )
        .expect("valid config");

        assert!(config.use_only_on_gamepad);
        assert_eq!(config.filter.overlap_range, 1500.0);
        assert!(config.filter.accepts_team(TeamId(3)));
        assert!(!config.filter.accepts_team(TeamId(1)));
        assert_eq!(config.friction.radius, 120.0);
        assert_eq!(config.friction.curve, ResponseCurve::LinearFalloff);
        assert!(!config.magnetism.enabled);
        // Не указанные поля — defaults
        assert_eq!(config.magnetism.radius, 60.0);
    }

    #[test]
    fn test_overlap_range_clamped_to_minimum() {
        let config = AimAssistConfig::from_toml_str("[filter]\noverlap_range = 5.0\n")
            .expect("valid config");
        assert_eq!(config.filter.overlap_range, MIN_OVERLAP_RANGE);
    }

    #[test]
    fn test_zero_radius_is_kept() {
        let config = AimAssistConfig::from_toml_str("[friction]\nradius = 0.0\n")
            .expect("valid config");
        assert_eq!(config.friction.radius, 0.0);
    }

    #[test]
    fn test_invalid_curve_rejected() {
        let result = AimAssistConfig::from_toml_str(
            r#"
            [magnetism]
            curve = { kind = "keys", keys = [{ x = 1.0, y = 0.0 }, { x = 0.0, y = 1.0 }] }
            "#,
        );
        assert!(matches!(
            result,
            Err(ConfigError::InvalidCurve { section: "magnetism", .. })
        ));
    }

    #[test]
    fn test_parse_error() {
        let result = AimAssistConfig::from_toml_str("use_only_on_gamepad = \"yes\"");
        assert!(matches!(result, Err(ConfigError::Parse(_))));
    }

    #[test]
    fn test_toml_roundtrip_preserves_config() {
        let config = AimAssistConfig::default();
        let text = config.to_toml_string().expect("serializable");
        let parsed = AimAssistConfig::from_toml_str(&text).expect("parsable");
        assert_eq!(parsed, config);
    }
}
