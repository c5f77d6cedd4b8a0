//! Application-level modules for the cursor layer.
//!
//! This module contains the coordinator that owns the layer's lifecycle,
//! the events it consumes, its configuration and settings persistence.

mod config;
mod coordinator;
mod events;
mod settings_coordinator;

pub use config::{CursorConfig, SpringSettings, TrailSettings};
pub use coordinator::CursorCoordinator;
pub use events::{PointerEvent, PointerInputResult};
pub use settings_coordinator::{SettingsCoordinator, CURSOR_CONFIG_KEY};
