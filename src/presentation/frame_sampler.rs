//! Per-frame sampling of the cursor layer.
//!
//! The presenter owns the animation-frame loop and calls
//! [`FrameSampler::tick`] once per frame. The sampler flushes store
//! notifications and only re-derives the cursor visual when something the
//! visual depends on actually changed.

use egui::Pos2;

use super::cursor_visual::{CursorVisibility, CursorVisual};
use crate::app::CursorCoordinator;
use crate::error::CursorError;

#[derive(Debug, Clone, Default)]
pub struct FrameSampler {
    last_revision: Option<u64>,
    last_pointer: Option<Pos2>,
    last_visibility: Option<CursorVisibility>,
    last_visual: Option<CursorVisual>,
}

impl FrameSampler {
    pub fn new() -> Self {
        Self::default()
    }

    /// Last visual handed out.
    pub fn last_visual(&self) -> Option<CursorVisual> {
        self.last_visual
    }

    /// Samples the coordinator for one frame.
    ///
    /// # Returns
    /// `Some(visual)` when the visual must be updated, `None` when the
    /// previous one still holds
    pub fn tick(&mut self, coordinator: &mut CursorCoordinator) -> Result<Option<CursorVisual>, CursorError> {
        coordinator.flush()?;

        let revision = coordinator.store()?.revision();
        let pointer = coordinator.pointer();
        let visibility = coordinator.visibility();
        let threshold = coordinator.config().render_threshold_px;

        let pointer_moved = match (self.last_pointer, pointer) {
            (Some(a), Some(b)) => (a.x - b.x).abs() > threshold || (a.y - b.y).abs() > threshold,
            (None, None) => false,
            _ => true,
        };
        let changed = self.last_revision != Some(revision)
            || self.last_visibility != Some(visibility)
            || pointer_moved;
        if !changed {
            return Ok(None);
        }

        let visual = coordinator.cursor_visual()?;
        self.last_revision = Some(revision);
        self.last_visibility = Some(visibility);
        if pointer_moved {
            self.last_pointer = pointer;
        }
        self.last_visual = Some(visual);
        Ok(Some(visual))
    }
}
