//! Demo configuration
//!
//! The host may pass a JSON object at start; missing fields keep their defaults.

use glam::Vec2;
use serde::{Deserialize, Serialize};

use crate::consts::*;
use crate::error::ConfigError;
use crate::sim::LerpPolicy;

/// Optional overlays drawn on top of the core concepts
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Overlays {
    /// Background grid and axes
    pub grid: bool,
    /// Unit circle around the world origin
    pub unit_circle: bool,
    /// Player X/Y component projections onto the axes
    pub components: bool,
    /// Unit vector from the origin toward the player (also drawn from the target)
    pub look_at_player: bool,
}

impl Default for Overlays {
    fn default() -> Self {
        Self {
            grid: true,
            unit_circle: true,
            components: true,
            look_at_player: true,
        }
    }
}

/// Demo tuning
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct DemoConfig {
    // === Camera ===
    /// Pixels per world unit
    pub pixels_per_unit: f32,

    // === Player ===
    pub start_position: Vec2,
    /// Initial facing (radians)
    pub start_facing: f32,
    /// Movement speed (world units per second)
    pub speed: f32,
    /// Player outline in local space, pointing along +X
    pub shape: Vec<Vec2>,

    // === Concepts ===
    /// How the lerp marker travels from player to target
    pub lerp: LerpPolicy,
    /// Distance of the polar spread markers from the player
    pub polar_distance: f32,
    /// Offsets from the angle-to-target, in degrees
    pub polar_offsets_deg: Vec<f32>,
    /// Dot products within this band count as perpendicular
    pub dot_epsilon: f32,

    // === Scene ===
    pub grid_half_size: u32,
    pub overlays: Overlays,
}

impl Default for DemoConfig {
    fn default() -> Self {
        Self {
            pixels_per_unit: SCALE,

            start_position: PLAYER_START,
            start_facing: 0.0,
            speed: PLAYER_SPEED,
            shape: default_shape(),

            lerp: LerpPolicy::default(),
            polar_distance: POLAR_DISTANCE,
            polar_offsets_deg: vec![-POLAR_OFFSET_DEG, POLAR_OFFSET_DEG],
            dot_epsilon: DOT_EPSILON,

            grid_half_size: GRID_HALF_SIZE as u32,
            overlays: Overlays::default(),
        }
    }
}

/// Arrowhead pointing along +X
fn default_shape() -> Vec<Vec2> {
    vec![
        Vec2::new(0.45, 0.0),
        Vec2::new(-0.25, 0.22),
        Vec2::new(-0.1, 0.0),
        Vec2::new(-0.25, -0.22),
    ]
}

impl DemoConfig {
    /// Parse and validate a JSON config; missing fields fall back to defaults
    pub fn from_json(json: &str) -> Result<Self, ConfigError> {
        let config: Self = serde_json::from_str(json)?;
        config.validate()?;
        Ok(config)
    }

    /// Load from an optional host-supplied JSON string
    pub fn from_host(json: Option<&str>) -> Result<Self, ConfigError> {
        match json.map(str::trim) {
            Some(json) if !json.is_empty() => {
                let config = Self::from_json(json)?;
                log::info!("Loaded demo config from host");
                Ok(config)
            }
            _ => {
                log::info!("Using default demo config");
                Ok(Self::default())
            }
        }
    }

    /// Polar spread offsets in radians
    pub fn polar_offsets(&self) -> impl Iterator<Item = f32> + '_ {
        self.polar_offsets_deg.iter().map(|deg| deg.to_radians())
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        fn check(ok: bool, field: &'static str, reason: &'static str) -> Result<(), ConfigError> {
            if ok {
                Ok(())
            } else {
                Err(ConfigError::Invalid { field, reason })
            }
        }

        check(
            self.pixels_per_unit.is_finite() && self.pixels_per_unit > 0.0,
            "pixels_per_unit",
            "must be a positive number",
        )?;
        check(
            self.start_position.is_finite() && self.start_facing.is_finite(),
            "start_position",
            "must be finite",
        )?;
        check(
            self.speed.is_finite() && self.speed >= 0.0,
            "speed",
            "must be a non-negative number",
        )?;
        check(
            self.shape.len() >= 2 && self.shape.iter().all(|p| p.is_finite()),
            "shape",
            "needs at least two finite points",
        )?;
        check(
            self.polar_distance.is_finite() && self.polar_distance >= 0.0,
            "polar_distance",
            "must be a non-negative number",
        )?;
        check(
            self.polar_offsets_deg.iter().all(|d| d.is_finite()),
            "polar_offsets_deg",
            "must be finite",
        )?;
        check(
            self.dot_epsilon.is_finite() && self.dot_epsilon >= 0.0,
            "dot_epsilon",
            "must be a non-negative number",
        )?;
        check(
            self.grid_half_size <= 200,
            "grid_half_size",
            "must be at most 200",
        )?;
        self.lerp.validate()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_is_valid() {
        assert!(DemoConfig::default().validate().is_ok());
    }

    #[test]
    fn test_partial_json_keeps_defaults() {
        let config = DemoConfig::from_json(r#"{ "speed": 8.0, "polar_offsets_deg": [-30, 0, 30] }"#)
            .unwrap();
        assert_eq!(config.speed, 8.0);
        assert_eq!(config.polar_offsets_deg, vec![-30.0, 0.0, 30.0]);
        assert_eq!(config.pixels_per_unit, SCALE);
        assert_eq!(config.start_position, PLAYER_START);
        assert!(config.overlays.grid);
    }

    #[test]
    fn test_vec2_fields_parse_as_arrays() {
        let config = DemoConfig::from_json(r#"{ "start_position": [0.0, -14.0] }"#).unwrap();
        assert_eq!(config.start_position, Vec2::new(0.0, -14.0));
    }

    #[test]
    fn test_lerp_policy_parses() {
        let config =
            DemoConfig::from_json(r#"{ "lerp": { "kind": "ease_out", "fraction": 0.2, "period": 2.0 } }"#)
                .unwrap();
        assert_eq!(
            config.lerp,
            LerpPolicy::EaseOut {
                fraction: 0.2,
                period: 2.0
            }
        );
    }

    #[test]
    fn test_rejects_bad_values() {
        let err = DemoConfig::from_json(r#"{ "pixels_per_unit": 0 }"#).unwrap_err();
        assert!(matches!(
            err,
            ConfigError::Invalid {
                field: "pixels_per_unit",
                ..
            }
        ));

        let err = DemoConfig::from_json(r#"{ "speed": -1 }"#).unwrap_err();
        assert!(matches!(err, ConfigError::Invalid { field: "speed", .. }));

        let err = DemoConfig::from_json(r#"{ "shape": [[1.0, 0.0]] }"#).unwrap_err();
        assert!(matches!(err, ConfigError::Invalid { field: "shape", .. }));
    }

    #[test]
    fn test_rejects_malformed_json() {
        let err = DemoConfig::from_json("{ speed: ").unwrap_err();
        assert!(matches!(err, ConfigError::Parse(_)));
    }

    #[test]
    fn test_from_host_blank_uses_defaults() {
        assert_eq!(DemoConfig::from_host(None).unwrap(), DemoConfig::default());
        assert_eq!(
            DemoConfig::from_host(Some("   ")).unwrap(),
            DemoConfig::default()
        );
    }

    #[test]
    fn test_polar_offsets_in_radians() {
        let config = DemoConfig::default();
        let offsets: Vec<f32> = config.polar_offsets().collect();
        assert_eq!(offsets.len(), 2);
        assert!((offsets[0] + std::f32::consts::FRAC_PI_4).abs() < 1e-6);
        assert!((offsets[1] - std::f32::consts::FRAC_PI_4).abs() < 1e-6);
    }
}
