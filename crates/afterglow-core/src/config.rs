use std::path::Path;

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::particle::ColorToken;

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to read config: {0}")]
    Io(#[from] std::io::Error),
    #[error("failed to parse TOML config: {0}")]
    Toml(#[from] toml::de::Error),
    #[error("failed to parse JSON config: {0}")]
    Json(#[from] serde_json::Error),
    #[error("invalid trail config: {0}")]
    Invalid(String),
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct RadiusRange {
    pub min: f32,
    pub max: f32,
}

/// Trail tuning, fixed once an engine has been built from it.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct TrailConfig {
    /// One particle is spawned every `spawn_interval` pointer moves.
    pub spawn_interval: u32,
    pub palette: Vec<ColorToken>,
    pub radius: RadiusRange,
    /// Opacity lost per frame.
    pub life_speed: f32,
    /// Radius lost per frame.
    pub shrink_speed: f32,
    /// Glow radius in pixels.
    pub blur: f32,
    /// Width of the per-axis velocity range, centred on zero.
    pub drift: f32,
    pub glow_alpha: f32,
}

impl Default for TrailConfig {
    fn default() -> Self {
        Self {
            spawn_interval: 3,
            palette: vec![
                ColorToken::new(99, 102, 241),
                ColorToken::new(168, 85, 247),
                ColorToken::new(6, 182, 212),
            ],
            radius: RadiusRange { min: 4.0, max: 8.0 },
            life_speed: 0.02,
            shrink_speed: 0.1,
            blur: 4.0,
            drift: 1.5,
            glow_alpha: 0.5,
        }
    }
}

impl TrailConfig {
    pub fn from_toml_str(source: &str) -> Result<Self, ConfigError> {
        let config: Self = toml::from_str(source)?;
        config.validate()?;
        Ok(config)
    }

    pub fn from_json_str(source: &str) -> Result<Self, ConfigError> {
        let config: Self = serde_json::from_str(source)?;
        config.validate()?;
        Ok(config)
    }

    pub fn load(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let source = std::fs::read_to_string(path)?;
        Self::from_toml_str(&source)
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.spawn_interval == 0 {
            return Err(invalid("spawn_interval must be at least 1"));
        }
        if self.palette.is_empty() {
            return Err(invalid("palette must contain at least one color"));
        }
        if !(self.radius.min > 0.0 && self.radius.min <= self.radius.max) {
            return Err(invalid(format!(
                "radius range must satisfy 0 < min <= max, got [{}, {}]",
                self.radius.min, self.radius.max
            )));
        }
        if !(self.life_speed > 0.0) {
            return Err(invalid("life_speed must be positive"));
        }
        if !(self.shrink_speed > 0.0) {
            return Err(invalid("shrink_speed must be positive"));
        }
        if !(self.blur >= 0.0) || !(self.drift >= 0.0) {
            return Err(invalid("blur and drift must not be negative"));
        }
        if !(0.0..=1.0).contains(&self.glow_alpha) {
            return Err(invalid("glow_alpha must lie in [0, 1]"));
        }
        Ok(())
    }

    pub fn decay(&self) -> Decay {
        Decay {
            life_speed: self.life_speed,
            shrink_speed: self.shrink_speed,
        }
    }
}

/// Per-frame decay rates applied to every live particle.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Decay {
    pub life_speed: f32,
    pub shrink_speed: f32,
}

fn invalid(message: impl Into<String>) -> ConfigError {
    ConfigError::Invalid(message.into())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_are_valid() {
        let config = TrailConfig::default();
        assert!(config.validate().is_ok());
        assert_eq!(config.spawn_interval, 3);
        assert_eq!(config.palette.len(), 3);
    }

    #[test]
    fn partial_toml_falls_back_to_defaults() {
        let config = TrailConfig::from_toml_str(
            r#"
            spawn_interval = 5
            radius = { min = 2.0, max = 3.0 }
            "#,
        )
        .unwrap();
        assert_eq!(config.spawn_interval, 5);
        assert_eq!(config.radius, RadiusRange { min: 2.0, max: 3.0 });
        assert_eq!(config.life_speed, 0.02);
        assert_eq!(config.palette, TrailConfig::default().palette);
    }

    #[test]
    fn palette_reads_as_rgb_triples() {
        let config = TrailConfig::from_toml_str("palette = [[1, 2, 3]]").unwrap();
        assert_eq!(config.palette, vec![ColorToken::new(1, 2, 3)]);
    }

    #[test]
    fn json_island_parses() {
        let config = TrailConfig::from_json_str(r#"{"blur": 8.0, "glow_alpha": 0.25}"#).unwrap();
        assert_eq!(config.blur, 8.0);
        assert_eq!(config.glow_alpha, 0.25);
    }

    #[test]
    fn rejects_zero_interval() {
        let err = TrailConfig::from_toml_str("spawn_interval = 0").unwrap_err();
        assert!(matches!(err, ConfigError::Invalid(_)));
    }

    #[test]
    fn rejects_inverted_radius_range() {
        let config = TrailConfig {
            radius: RadiusRange { min: 8.0, max: 4.0 },
            ..TrailConfig::default()
        };
        assert!(matches!(config.validate(), Err(ConfigError::Invalid(_))));
    }

    #[test]
    fn rejects_empty_palette_and_bad_rates() {
        for config in [
            TrailConfig {
                palette: Vec::new(),
                ..TrailConfig::default()
            },
            TrailConfig {
                life_speed: 0.0,
                ..TrailConfig::default()
            },
            TrailConfig {
                shrink_speed: -1.0,
                ..TrailConfig::default()
            },
            TrailConfig {
                glow_alpha: 1.5,
                ..TrailConfig::default()
            },
            TrailConfig {
                blur: f32::NAN,
                ..TrailConfig::default()
            },
        ] {
            assert!(config.validate().is_err(), "{config:?}");
        }
    }

    #[test]
    fn malformed_toml_is_a_parse_error() {
        let err = TrailConfig::from_toml_str("spawn_interval = \"three\"").unwrap_err();
        assert!(matches!(err, ConfigError::Toml(_)));
    }
}
