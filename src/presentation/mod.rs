//! Presentation-side helpers.
//!
//! This module contains no painting and no easing:
//! - Cursor visual targets derived from the interaction snapshot
//! - The per-frame sampler a presenter drives from its render loop

pub mod cursor_visual;
pub mod frame_sampler;
