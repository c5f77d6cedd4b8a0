//! Target visuals for the custom cursor.
//!
//! This module turns an interaction snapshot into the values a presenter
//! springs toward: position, ring size and shape, scales and visibility.
//! Nothing here animates or paints.

use egui::{Color32, Pos2, Vec2};
use serde::{Deserialize, Serialize};

use crate::app::CursorConfig;
use crate::state::{CursorKind, InteractionState};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum ThemeMode {
    Light,
    #[default]
    Dark,
}

/// Precision dot color, contrasting with the page background.
pub fn dot_color(mode: ThemeMode) -> Color32 {
    match mode {
        ThemeMode::Dark => Color32::WHITE,
        ThemeMode::Light => Color32::BLACK,
    }
}

/// Precision dot diameter for a viewport width, between 2 and 4 pixels.
pub fn dot_diameter(viewport_width: f32) -> f32 {
    (viewport_width / 640.0).clamp(2.0, 4.0)
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub enum CursorShape {
    Circle,
    RoundedRect { corner_radius: f32 },
}

/// Inputs deciding whether the custom cursor is shown at all.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CursorVisibility {
    pub pointer_capable: bool,
    pub in_window: bool,
    /// Pointer is over a region that keeps the native cursor
    pub native_region: bool,
}

impl CursorVisibility {
    pub fn hidden() -> Self {
        Self {
            pointer_capable: false,
            in_window: false,
            native_region: false,
        }
    }

    pub fn allows_custom_cursor(&self) -> bool {
        self.pointer_capable && self.in_window && !self.native_region
    }
}

/// What the cursor should look like once its springs settle.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CursorVisual {
    pub visible: bool,
    /// Magnetic target if a widget owns the pointer, else the pointer itself
    pub position: Option<Pos2>,
    pub size: Vec2,
    pub shape: CursorShape,
    pub scale: f32,
    pub dot_scale: f32,
    pub inverted: bool,
    /// Expanding ring shown while the pointer is pressed
    pub click_ripple: bool,
}

impl CursorVisual {
    pub fn derive(
        state: &InteractionState,
        pointer: Option<Pos2>,
        visibility: CursorVisibility,
        config: &CursorConfig,
    ) -> Self {
        let visible = visibility.allows_custom_cursor()
            && state.cursor_kind != CursorKind::Hidden
            && pointer.is_some();

        let (size, shape, dot_scale) = match state.hovered_geometry {
            Some(geometry) if state.is_hovering => (
                Vec2::new(geometry.width, geometry.height) + Vec2::splat(config.hover_padding),
                CursorShape::RoundedRect {
                    corner_radius: geometry.corner_radius,
                },
                config.hover_dot_scale,
            ),
            _ => (Vec2::splat(config.base_cursor_size), CursorShape::Circle, 1.0),
        };

        Self {
            visible,
            position: state.magnetic_target.or(pointer),
            size,
            shape,
            scale: if state.is_clicking { config.click_scale } else { 1.0 },
            dot_scale,
            inverted: state.is_inverted,
            click_ripple: state.is_clicking && visible,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::state::HoveredGeometry;
    use egui::pos2;

    fn shown() -> CursorVisibility {
        CursorVisibility {
            pointer_capable: true,
            in_window: true,
            native_region: false,
        }
    }

    #[test]
    fn test_resting_cursor_is_circle() {
        let visual = CursorVisual::derive(
            &InteractionState::default(),
            Some(pos2(10.0, 10.0)),
            shown(),
            &CursorConfig::default(),
        );
        assert!(visual.visible);
        assert_eq!(visual.size, Vec2::splat(30.0));
        assert_eq!(visual.shape, CursorShape::Circle);
        assert_eq!(visual.dot_scale, 1.0);
        assert_eq!(visual.position, Some(pos2(10.0, 10.0)));
    }

    #[test]
    fn test_hover_morphs_to_element_box() {
        let state = InteractionState {
            cursor_kind: CursorKind::Button,
            is_hovering: true,
            is_inverted: true,
            hovered_geometry: Some(HoveredGeometry::new(120.0, 40.0, 8.0)),
            ..Default::default()
        };
        let visual = CursorVisual::derive(&state, Some(pos2(0.0, 0.0)), shown(), &CursorConfig::default());
        assert_eq!(visual.size, Vec2::new(124.0, 44.0));
        assert_eq!(visual.shape, CursorShape::RoundedRect { corner_radius: 8.0 });
        assert_eq!(visual.dot_scale, 0.5);
        assert!(visual.inverted);
    }

    #[test]
    fn test_magnetic_target_wins_over_pointer() {
        let state = InteractionState {
            magnetic_target: Some(pos2(50.0, 60.0)),
            is_clicking: true,
            ..Default::default()
        };
        let visual = CursorVisual::derive(&state, Some(pos2(0.0, 0.0)), shown(), &CursorConfig::default());
        assert_eq!(visual.position, Some(pos2(50.0, 60.0)));
        assert_eq!(visual.scale, 0.9);
        assert!(visual.click_ripple);
    }

    #[test]
    fn test_hidden_kind_and_native_region_hide_cursor() {
        let state = InteractionState {
            cursor_kind: CursorKind::Hidden,
            ..Default::default()
        };
        let config = CursorConfig::default();
        assert!(!CursorVisual::derive(&state, Some(pos2(1.0, 1.0)), shown(), &config).visible);

        let native = CursorVisibility { native_region: true, ..shown() };
        let visual = CursorVisual::derive(&InteractionState::default(), Some(pos2(1.0, 1.0)), native, &config);
        assert!(!visual.visible);
        assert!(!visual.click_ripple);
    }

    #[test]
    fn test_dot_diameter_is_clamped() {
        assert_eq!(dot_diameter(320.0), 2.0);
        assert_eq!(dot_diameter(1920.0), 3.0);
        assert_eq!(dot_diameter(5120.0), 4.0);
        assert_eq!(dot_color(ThemeMode::Light), Color32::BLACK);
    }
}
