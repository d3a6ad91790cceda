/// Tunables for the hero scene and its animation
use serde::Deserialize;

use crate::error::{HeroError, HeroResult};

#[derive(Debug, Clone, Copy, PartialEq, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct HeroConfig {
    /// Points in the star field
    pub star_count: usize,
    /// Fraction of the remaining distance covered per frame when easing toward the pointer
    pub easing: f32,
    /// Pitch target at the top edge of the hero box (radians, mirrored at the bottom)
    pub pitch_range: f32,
    /// Yaw target at the right edge of the hero box (radians, mirrored at the left)
    pub yaw_range: f32,
    pub wobble_amplitude: f32,
    /// Pitch wobble is `sin(t / wobble_period)`
    pub wobble_period: f32,
    /// Constant yaw drift in radians per second
    pub drift_speed: f32,
    /// Orbit-control auto-rotate speed, 1.0 is one turn per minute at 60 fps
    pub auto_rotate_speed: f32,
    pub max_pixel_ratio: f64,
}

impl Default for HeroConfig {
    fn default() -> Self {
        Self {
            star_count: 1200,
            easing: 0.05,
            pitch_range: 0.4,
            yaw_range: 0.6,
            wobble_amplitude: 0.08,
            wobble_period: 3.0,
            drift_speed: 0.1,
            auto_rotate_speed: 1.4,
            max_pixel_ratio: 2.0,
        }
    }
}

impl HeroConfig {
    pub fn validate(&self) -> HeroResult<()> {
        let invalid = |msg: &str| Err(HeroError::InvalidConfig(msg.to_string()));

        if self.star_count == 0 {
            return invalid("star_count must be > 0");
        }
        if !self.easing.is_finite() || self.easing <= 0.0 || self.easing > 1.0 {
            return invalid("easing must be in (0, 1]");
        }
        for (name, value) in [
            ("pitch_range", self.pitch_range),
            ("yaw_range", self.yaw_range),
            ("wobble_amplitude", self.wobble_amplitude),
            ("drift_speed", self.drift_speed),
            ("auto_rotate_speed", self.auto_rotate_speed),
        ] {
            if !value.is_finite() || value < 0.0 {
                return Err(HeroError::InvalidConfig(format!(
                    "{name} must be finite and >= 0"
                )));
            }
        }
        if !self.wobble_period.is_finite() || self.wobble_period <= 0.0 {
            return invalid("wobble_period must be finite and > 0");
        }
        if !self.max_pixel_ratio.is_finite() || self.max_pixel_ratio < 1.0 {
            return invalid("max_pixel_ratio must be finite and >= 1");
        }
        Ok(())
    }

    /// Parse a JSON override, missing fields keep their defaults
    pub fn from_json(json: &str) -> HeroResult<Self> {
        let config: Self = serde_json::from_str(json)?;
        config.validate()?;
        Ok(config)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_config_is_valid() {
        assert!(HeroConfig::default().validate().is_ok());
    }

    #[test]
    fn partial_json_keeps_defaults() {
        let config = HeroConfig::from_json(r#"{"starCount": 300, "easing": 0.1}"#).unwrap();
        assert_eq!(config.star_count, 300);
        assert!((config.easing - 0.1).abs() < 1e-6);
        assert_eq!(config.yaw_range, HeroConfig::default().yaw_range);
    }

    #[test]
    fn easing_above_one_invalid() {
        let config = HeroConfig {
            easing: 1.5,
            ..HeroConfig::default()
        };
        assert!(config.validate().is_err());
    }

    #[test]
    fn negative_range_invalid() {
        let config = HeroConfig {
            yaw_range: -0.6,
            ..HeroConfig::default()
        };
        assert!(matches!(config.validate(), Err(HeroError::InvalidConfig(msg)) if msg.contains("yaw_range")));
    }

    #[test]
    fn malformed_json_is_reported() {
        assert!(matches!(
            HeroConfig::from_json("{starCount: 3"),
            Err(HeroError::Json(_))
        ));
    }

    #[test]
    fn zero_stars_rejected_from_json() {
        assert!(HeroConfig::from_json(r#"{"starCount": 0}"#).is_err());
    }
}
