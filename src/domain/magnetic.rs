//! Magnetic attraction for widgets that lean toward the pointer.
//!
//! The displacement is normalized by the widget's own size so large widgets
//! do not over-react. Smoothing toward the returned value is left to the
//! presenter's spring.

use egui::{Pos2, Rect};

use crate::state::HoveredGeometry;
use crate::traits::ElementId;

/// Pull factor used when a widget does not specify one.
pub const DEFAULT_STRENGTH: f32 = 20.0;

/// Rendered offset of one magnetic widget.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct WidgetDisplacement {
    pub dx: f32,
    pub dy: f32,
}

impl WidgetDisplacement {
    pub const ZERO: Self = Self { dx: 0.0, dy: 0.0 };

    pub fn new(dx: f32, dy: f32) -> Self {
        Self { dx, dy }
    }

    pub fn is_zero(&self) -> bool {
        self.dx == 0.0 && self.dy == 0.0
    }
}

/// Computes how far a widget should lean toward the pointer.
///
/// `(pointer - center) / size * strength` per axis; a zero-sized axis does
/// not move.
pub fn compute_displacement(pointer: Pos2, widget_box: Rect, strength: f32) -> WidgetDisplacement {
    let delta = pointer - widget_box.center();
    let axis = |d: f32, size: f32| if size > 0.0 { d * strength / size } else { 0.0 };
    WidgetDisplacement {
        dx: axis(delta.x, widget_box.width()),
        dy: axis(delta.y, widget_box.height()),
    }
}

/// Per-widget attraction state.
///
/// Each widget owns its displacement; nothing else writes it.
#[derive(Debug, Clone, PartialEq)]
pub struct MagneticWidget {
    id: ElementId,
    strength: f32,
    displacement: WidgetDisplacement,
    /// Pointer is inside the widget
    active: bool,
}

impl MagneticWidget {
    pub fn new(id: ElementId, strength: f32) -> Self {
        Self {
            id,
            strength,
            displacement: WidgetDisplacement::ZERO,
            active: false,
        }
    }

    pub fn id(&self) -> ElementId {
        self.id
    }

    pub fn strength(&self) -> f32 {
        self.strength
    }

    /// Changes the pull factor; takes effect on the next move.
    pub fn set_strength(&mut self, strength: f32) {
        self.strength = strength;
    }

    pub fn displacement(&self) -> WidgetDisplacement {
        self.displacement
    }

    pub fn is_active(&self) -> bool {
        self.active
    }

    /// Pointer entered the widget. Returns the box to offer as hover geometry.
    pub fn on_enter(&mut self, widget_box: Rect, corner_radius: f32) -> HoveredGeometry {
        self.active = true;
        HoveredGeometry::from_rect(widget_box, corner_radius)
    }

    /// Pointer moved inside the widget.
    ///
    /// Returns the point to publish as the store's magnetic target, or `None`
    /// if the widget was not entered.
    pub fn on_move(&mut self, pointer: Pos2, widget_box: Rect) -> Option<Pos2> {
        if !self.active {
            return None;
        }
        self.displacement = compute_displacement(pointer, widget_box, self.strength);
        Some(pointer)
    }

    /// Pointer left the widget: snap back to rest.
    pub fn on_leave(&mut self) {
        self.active = false;
        self.displacement = WidgetDisplacement::ZERO;
    }
}
