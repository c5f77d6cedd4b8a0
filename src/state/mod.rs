//! State management modules for the cursor layer.
//!
//! This module contains state-only logic (no event routing):
//! - Interaction snapshot types (cursor kind, hover geometry)
//! - The passive interaction store and its subscriptions

mod interaction;
mod store;

pub use interaction::{CursorKind, HoveredGeometry, InteractionState};
pub use store::{InteractionStore, SubscriptionId};
