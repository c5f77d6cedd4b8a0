//! Snapshot of the pointer-interaction state.
//!
//! This module defines the value types read by presenters every frame:
//! the cursor kind, hover/inversion/click flags, the magnetic target and
//! the geometry of the hovered element.

use egui::{Pos2, Rect};
use serde::{Deserialize, Serialize};

/// What the custom cursor should currently represent.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum CursorKind {
    #[default]
    Default,
    Link,
    Button,
    Interactive,
    Hidden,
}

impl CursorKind {
    /// Returns true for the kinds that go along with hover geometry.
    pub fn is_interactive(self) -> bool {
        matches!(self, CursorKind::Link | CursorKind::Button | CursorKind::Interactive)
    }
}

/// Box of the hovered element, used to morph the cursor into its shape.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct HoveredGeometry {
    pub width: f32,
    pub height: f32,
    pub corner_radius: f32,
}

impl HoveredGeometry {
    pub fn new(width: f32, height: f32, corner_radius: f32) -> Self {
        Self { width, height, corner_radius }
    }

    /// Builds geometry from a rendered rect and its corner radius.
    pub fn from_rect(rect: Rect, corner_radius: f32) -> Self {
        Self::new(rect.width(), rect.height(), corner_radius)
    }
}

/// State shared between the hover classifier, magnetic widgets and presenters.
///
/// Responsibilities:
/// - Tracking which kind of element the pointer is over
/// - Carrying the hovered element's geometry for cursor morphing
/// - Carrying the magnetic target and click flag
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct InteractionState {
    /// Current cursor kind
    pub cursor_kind: CursorKind,
    /// Pointer rests over a qualifying interactive element
    pub is_hovering: bool,
    /// Visual inversion hint, follows `is_hovering`
    pub is_inverted: bool,
    /// Raw pointer position reported by the magnetic widget that owns the pointer
    pub magnetic_target: Option<Pos2>,
    /// Between pointer-down and pointer-up
    pub is_clicking: bool,
    /// Geometry of the hovered element
    pub hovered_geometry: Option<HoveredGeometry>,
}

impl InteractionState {
    /// Checks the cross-field invariants.
    ///
    /// Geometry is present exactly when hovering an interactive kind, and
    /// `Hidden` never coexists with hover, inversion or geometry.
    pub fn is_consistent(&self) -> bool {
        let geometry_ok = self.hovered_geometry.is_some()
            == (self.is_hovering && self.cursor_kind.is_interactive());
        let hidden_ok = self.cursor_kind != CursorKind::Hidden
            || (!self.is_hovering && !self.is_inverted && self.hovered_geometry.is_none());
        geometry_ok && hidden_ok && self.is_inverted == self.is_hovering
    }
}
