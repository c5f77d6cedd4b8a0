//! Input events consumed by the cursor coordinator.

use egui::{Pos2, Vec2};

use crate::domain::capability::PointerCapability;
use crate::traits::ElementId;

/// Pointer and viewport events, in the order the host delivers them.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum PointerEvent {
    /// Pointer moved; `target` is the element under it, if the host knows one
    Move { pos: Pos2, target: Option<ElementId> },
    /// Element-level enter on a magnetic widget
    WidgetEnter { widget: ElementId, pos: Pos2 },
    /// Element-level leave on a magnetic widget
    WidgetLeave { widget: ElementId },
    /// Pointer came back into the window
    WindowEnter,
    /// Pointer left the window
    WindowLeave,
    Down,
    Up,
    /// Viewport resized, capability is re-detected
    Resize { viewport: Vec2 },
}

/// Result of handling one event
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PointerInputResult {
    /// Gated, not mounted, or nothing to do
    Ignored,
    /// Event was applied
    Handled,
    /// Resize caused a capability transition
    CapabilityChanged(PointerCapability),
}
