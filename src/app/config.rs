//! Tunables for the cursor layer.
//!
//! All fields have defaults matching the portfolio site's look; stored
//! settings may override any subset of them.

use serde::{Deserialize, Serialize};

use crate::domain::capability::DetectionPolicy;
use crate::domain::hover_classifier::DEFAULT_MAX_ANCESTOR_DEPTH;
use crate::domain::magnetic::DEFAULT_STRENGTH;
use crate::domain::parallax::DEFAULT_AMPLIFIER;
use crate::domain::trail::{DEFAULT_TRAIL_LENGTH, DEFAULT_TRAIL_LIFESPAN};
use crate::error::CursorError;

/// Parameters handed to the presenter's spring interpolator.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct SpringSettings {
    pub stiffness: f32,
    pub damping: f32,
    pub mass: f32,
}

impl SpringSettings {
    pub const fn new(stiffness: f32, damping: f32, mass: f32) -> Self {
        Self { stiffness, damping, mass }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct TrailSettings {
    pub enabled: bool,
    pub length: usize,
    pub lifespan_ms: u64,
}

impl Default for TrailSettings {
    fn default() -> Self {
        Self {
            enabled: false,
            length: DEFAULT_TRAIL_LENGTH,
            lifespan_ms: DEFAULT_TRAIL_LIFESPAN.as_millis() as u64,
        }
    }
}

/// Complete cursor-layer configuration.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct CursorConfig {
    /// Pull factor for magnetic widgets registered without their own
    pub magnetic_strength: f32,
    /// Diameter of the resting cursor ring
    pub base_cursor_size: f32,
    /// Extra size added around a hovered element's box
    pub hover_padding: f32,
    /// Ring scale while the pointer is pressed
    pub click_scale: f32,
    /// Precision-dot scale while hovering
    pub hover_dot_scale: f32,
    /// Minimum pointer travel before the frame sampler re-derives the visual
    pub render_threshold_px: f32,
    pub parallax_amplifier: f32,
    pub max_ancestor_depth: usize,
    pub detection: DetectionPolicy,
    /// Spring for the cursor position
    pub position_spring: SpringSettings,
    /// Spring for size, shape and scale morphs
    pub shape_spring: SpringSettings,
    /// Spring for magnetic widget displacement
    pub widget_spring: SpringSettings,
    pub trail: TrailSettings,
}

impl Default for CursorConfig {
    fn default() -> Self {
        Self {
            magnetic_strength: DEFAULT_STRENGTH,
            base_cursor_size: 30.0,
            hover_padding: 4.0,
            click_scale: 0.9,
            hover_dot_scale: 0.5,
            render_threshold_px: 1.0,
            parallax_amplifier: DEFAULT_AMPLIFIER,
            max_ancestor_depth: DEFAULT_MAX_ANCESTOR_DEPTH,
            detection: DetectionPolicy::default(),
            position_spring: SpringSettings::new(400.0, 15.0, 0.3),
            shape_spring: SpringSettings::new(300.0, 10.0, 1.0),
            widget_spring: SpringSettings::new(150.0, 15.0, 0.1),
            trail: TrailSettings::default(),
        }
    }
}

impl CursorConfig {
    /// Rejects values the layer cannot work with.
    pub fn validate(&self) -> Result<(), CursorError> {
        let finite_non_negative = [
            ("magnetic_strength", self.magnetic_strength),
            ("hover_padding", self.hover_padding),
            ("render_threshold_px", self.render_threshold_px),
            ("parallax_amplifier", self.parallax_amplifier),
        ];
        for (name, value) in finite_non_negative {
            if !value.is_finite() || value < 0.0 {
                return Err(CursorError::InvalidConfig(format!("{name} must be a non-negative number, got {value}")));
            }
        }

        let positive = [
            ("base_cursor_size", self.base_cursor_size),
            ("click_scale", self.click_scale),
            ("hover_dot_scale", self.hover_dot_scale),
        ];
        for (name, value) in positive {
            if !value.is_finite() || value <= 0.0 {
                return Err(CursorError::InvalidConfig(format!("{name} must be positive, got {value}")));
            }
        }

        for (name, spring) in [
            ("position_spring", self.position_spring),
            ("shape_spring", self.shape_spring),
            ("widget_spring", self.widget_spring),
        ] {
            if spring.stiffness <= 0.0 || spring.mass <= 0.0 || spring.damping < 0.0 {
                return Err(CursorError::InvalidConfig(format!("{name} has non-physical parameters")));
            }
        }

        if self.max_ancestor_depth == 0 {
            return Err(CursorError::InvalidConfig("max_ancestor_depth must be at least 1".to_string()));
        }
        if self.trail.enabled && self.trail.length == 0 {
            return Err(CursorError::InvalidConfig("trail.length must be at least 1 when the trail is enabled".to_string()));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config_is_valid() {
        assert_eq!(CursorConfig::default().validate(), Ok(()));
    }

    #[test]
    fn test_partial_json_keeps_defaults() {
        let config: CursorConfig = serde_json::from_str(r#"{"magnetic_strength": 35.0, "trail": {"enabled": true}}"#).unwrap();
        assert_eq!(config.magnetic_strength, 35.0);
        assert_eq!(config.base_cursor_size, 30.0);
        assert!(config.trail.enabled);
        assert_eq!(config.trail.length, DEFAULT_TRAIL_LENGTH);
    }

    #[test]
    fn test_detection_policy_names() {
        let config: CursorConfig = serde_json::from_str(r#"{"detection": "any_touch"}"#).unwrap();
        assert_eq!(config.detection, DetectionPolicy::AnyTouch);
    }

    #[test]
    fn test_invalid_values_are_rejected() {
        let config = CursorConfig { magnetic_strength: f32::NAN, ..Default::default() };
        assert!(matches!(config.validate(), Err(CursorError::InvalidConfig(_))));

        let config = CursorConfig { base_cursor_size: 0.0, ..Default::default() };
        assert!(config.validate().is_err());

        let config = CursorConfig {
            position_spring: SpringSettings::new(0.0, 1.0, 1.0),
            ..Default::default()
        };
        assert!(config.validate().is_err());
    }
}
