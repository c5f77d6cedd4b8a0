//! Domain logic modules for the cursor layer.
//!
//! This module contains the pointer-handling rules:
//! - Hover classification (nearest interactive ancestor, hidden regions)
//! - Magnetic attraction (per-widget displacement toward the pointer)
//! - Capability detection (pointer-capable vs touch-only)
//! - Background focus and cursor trail helpers

pub mod capability;
pub mod hover_classifier;
pub mod magnetic;
pub mod parallax;
pub mod trail;
