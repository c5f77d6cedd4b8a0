//! Pointer-driven focus point for hover-responsive backgrounds.

use egui::{Pos2, Vec2};

pub const DEFAULT_AMPLIFIER: f32 = 1.2;

/// Returns the background gradient focus as percentages (0..=100 per axis).
///
/// The pointer's offset from the viewport center is scaled by `amplifier`
/// so the gradient travels further than the pointer. An empty viewport
/// yields the center.
pub fn background_focus(pointer: Pos2, viewport: Vec2, amplifier: f32) -> Vec2 {
    if viewport.x <= 0.0 || viewport.y <= 0.0 {
        return Vec2::splat(50.0);
    }
    let center = viewport / 2.0;
    let axis = |p: f32, c: f32, size: f32| {
        let amplified = c + (p - c) * amplifier;
        (amplified / size * 100.0).clamp(0.0, 100.0)
    };
    Vec2::new(
        axis(pointer.x, center.x, viewport.x),
        axis(pointer.y, center.y, viewport.y),
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use egui::{pos2, vec2};

    #[test]
    fn test_center_maps_to_fifty_percent() {
        let focus = background_focus(pos2(500.0, 300.0), vec2(1000.0, 600.0), DEFAULT_AMPLIFIER);
        assert_eq!(focus, vec2(50.0, 50.0));
    }

    #[test]
    fn test_amplified_offset() {
        // 250px right of center, amplified to 300px: (500 + 300) / 1000
        let focus = background_focus(pos2(750.0, 300.0), vec2(1000.0, 600.0), DEFAULT_AMPLIFIER);
        assert!((focus.x - 80.0).abs() < 1e-3);
        assert!((focus.y - 50.0).abs() < 1e-3);
    }

    #[test]
    fn test_focus_is_clamped() {
        let focus = background_focus(pos2(0.0, 600.0), vec2(1000.0, 600.0), DEFAULT_AMPLIFIER);
        assert_eq!(focus, vec2(0.0, 100.0));
    }

    #[test]
    fn test_empty_viewport_is_centered() {
        assert_eq!(background_focus(pos2(10.0, 10.0), Vec2::ZERO, 2.0), vec2(50.0, 50.0));
    }
}
