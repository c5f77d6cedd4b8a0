//! Passive interaction store with notify-on-flush subscriptions.
//!
//! The store is plain data plus a subscriber list. Writers call one setter
//! per field they own; presenters either read [`InteractionStore::get`]
//! every frame or subscribe and get called from [`InteractionStore::flush`].

use super::interaction::{CursorKind, HoveredGeometry, InteractionState};
use egui::Pos2;

/// Handle returned by [`InteractionStore::subscribe`].
pub type SubscriptionId = u64;

type Listener = Box<dyn FnMut(&InteractionState)>;

/// Single source of truth for the pointer-interaction layer.
///
/// Field ownership:
/// - hover classifier: `cursor_kind`, `is_hovering`, `is_inverted`, `hovered_geometry`
/// - magnetic widgets: `magnetic_target`
/// - pointer down/up: `is_clicking`
///
/// The only derived rule applied at write time is that `Hidden` wins over
/// hover, inversion and geometry.
pub struct InteractionStore {
    state: InteractionState,
    listeners: Vec<(SubscriptionId, Listener)>,
    next_subscription: SubscriptionId,
    /// Bumped whenever a write changes the snapshot
    revision: u64,
    /// Revision last handed to listeners
    delivered_revision: u64,
    /// Number of setter calls, changed or not
    write_count: u64,
}

impl Default for InteractionStore {
    fn default() -> Self {
        Self::new()
    }
}

impl std::fmt::Debug for InteractionStore {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("InteractionStore")
            .field("state", &self.state)
            .field("listeners", &self.listeners.len())
            .field("revision", &self.revision)
            .field("write_count", &self.write_count)
            .finish()
    }
}

impl InteractionStore {
    /// Creates a store holding the default snapshot and no subscribers.
    pub fn new() -> Self {
        Self {
            state: InteractionState::default(),
            listeners: Vec::new(),
            next_subscription: 1,
            revision: 0,
            delivered_revision: 0,
            write_count: 0,
        }
    }

    // ===== Queries =====

    /// Returns the current snapshot.
    pub fn get(&self) -> InteractionState {
        self.state
    }

    /// Returns the revision of the current snapshot.
    pub fn revision(&self) -> u64 {
        self.revision
    }

    /// Returns how many setter calls the store has accepted.
    pub fn write_count(&self) -> u64 {
        self.write_count
    }

    /// Returns the number of live subscriptions.
    pub fn listener_count(&self) -> usize {
        self.listeners.len()
    }

    // ===== Setters =====

    /// Sets the cursor kind. `Hidden` also clears hover, inversion and geometry.
    pub fn set_cursor_kind(&mut self, kind: CursorKind) {
        let mut next = self.state;
        next.cursor_kind = kind;
        if kind == CursorKind::Hidden {
            next.is_hovering = false;
            next.is_inverted = false;
            next.hovered_geometry = None;
        }
        self.commit(next);
    }

    /// Sets the hover flag. Ignored (kept false) while the cursor is hidden.
    pub fn set_hovering(&mut self, hovering: bool) {
        let mut next = self.state;
        next.is_hovering = hovering && !self.is_hidden();
        self.commit(next);
    }

    /// Sets the inversion hint. Ignored (kept false) while the cursor is hidden.
    pub fn set_inverted(&mut self, inverted: bool) {
        let mut next = self.state;
        next.is_inverted = inverted && !self.is_hidden();
        self.commit(next);
    }

    /// Sets or clears the magnetic target.
    pub fn set_magnetic_target(&mut self, target: Option<Pos2>) {
        let mut next = self.state;
        next.magnetic_target = target;
        self.commit(next);
    }

    /// Sets the click flag.
    pub fn set_clicking(&mut self, clicking: bool) {
        let mut next = self.state;
        next.is_clicking = clicking;
        self.commit(next);
    }

    /// Sets the hovered geometry. Ignored (kept empty) while the cursor is hidden.
    pub fn set_hovered_geometry(&mut self, geometry: Option<HoveredGeometry>) {
        let mut next = self.state;
        next.hovered_geometry = if self.is_hidden() { None } else { geometry };
        self.commit(next);
    }

    /// Restores the default snapshot through the regular setters.
    pub fn reset(&mut self) {
        self.set_cursor_kind(CursorKind::Default);
        self.set_hovering(false);
        self.set_inverted(false);
        self.set_hovered_geometry(None);
        self.set_magnetic_target(None);
        self.set_clicking(false);
    }

    // ===== Subscriptions =====

    /// Registers a listener, called from [`flush`](Self::flush) after changes.
    pub fn subscribe<F>(&mut self, listener: F) -> SubscriptionId
    where
        F: FnMut(&InteractionState) + 'static,
    {
        let id = self.next_subscription;
        self.next_subscription += 1;
        self.listeners.push((id, Box::new(listener)));
        id
    }

    /// Removes a listener. Returns false if the ID was not subscribed.
    pub fn unsubscribe(&mut self, id: SubscriptionId) -> bool {
        let before = self.listeners.len();
        self.listeners.retain(|(sub, _)| *sub != id);
        self.listeners.len() != before
    }

    /// Drops every listener.
    pub fn release_subscriptions(&mut self) {
        self.listeners.clear();
    }

    /// Delivers the current snapshot to listeners if it changed since the
    /// last delivery. Returns true if listeners were called.
    pub fn flush(&mut self) -> bool {
        if self.revision == self.delivered_revision {
            return false;
        }
        self.delivered_revision = self.revision;
        let snapshot = self.state;
        for (_, listener) in self.listeners.iter_mut() {
            listener(&snapshot);
        }
        true
    }

    fn is_hidden(&self) -> bool {
        self.state.cursor_kind == CursorKind::Hidden
    }

    fn commit(&mut self, next: InteractionState) {
        self.write_count += 1;
        if next != self.state {
            self.state = next;
            self.revision += 1;
        }
    }
}
