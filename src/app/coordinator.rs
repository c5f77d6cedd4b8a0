//! Lifecycle-scoped coordination of the cursor layer.
//!
//! The coordinator owns the store, the hover classifier, the capability
//! gate and the registered magnetic widgets, and routes host events to them
//! strictly in arrival order. Field ownership is fixed:
//! - the classifier writes cursor kind, hover, inversion and geometry
//! - magnetic widgets write the magnetic target
//! - pointer down/up writes the click flag

use std::time::{Duration, Instant};

use egui::{Pos2, Vec2};

use super::config::CursorConfig;
use super::events::{PointerEvent, PointerInputResult};
use crate::domain::capability::{CapabilityGate, PointerCapability};
use crate::domain::hover_classifier::{ancestor_chain, HoverClassification, HoverClassifier};
use crate::domain::magnetic::{MagneticWidget, WidgetDisplacement};
use crate::domain::parallax;
use crate::domain::trail::{CursorTrail, TrailDot};
use crate::error::CursorError;
use crate::presentation::cursor_visual::{CursorVisibility, CursorVisual};
use crate::state::{CursorKind, InteractionState, InteractionStore, SubscriptionId};
use crate::traits::{CapabilityProbe, ElementId, ElementTree};

/// Everything that only exists between mount and unmount.
struct MountedLayer {
    store: InteractionStore,
    classifier: HoverClassifier,
    gate: CapabilityGate,
    probe: Box<dyn CapabilityProbe>,
    pointer: Option<Pos2>,
    pointer_in_window: bool,
    viewport: Vec2,
    trail: Option<CursorTrail>,
}

/// Entry point of the cursor layer.
///
/// Create it once, [`mount`](Self::mount) it when the interactive layer
/// appears, feed it events with [`handle_event`](Self::handle_event) and
/// [`unmount`](Self::unmount) it on teardown. Store access outside the
/// mounted window fails with [`CursorError::NotMounted`].
pub struct CursorCoordinator {
    config: CursorConfig,
    widgets: Vec<MagneticWidget>,
    layer: Option<MountedLayer>,
}

impl CursorCoordinator {
    /// Creates an unmounted coordinator after validating the configuration.
    pub fn new(config: CursorConfig) -> Result<Self, CursorError> {
        config.validate()?;
        Ok(Self {
            config,
            widgets: Vec::new(),
            layer: None,
        })
    }

    pub fn config(&self) -> &CursorConfig {
        &self.config
    }

    // ===== Lifecycle =====

    /// Creates the store and runs the initial capability detection.
    ///
    /// Mounting an already mounted coordinator tears the old layer down first.
    pub fn mount(&mut self, probe: Box<dyn CapabilityProbe>) {
        if self.layer.is_some() {
            self.unmount();
        }

        let gate = CapabilityGate::new(self.config.detection, probe.as_ref());
        let trail = self.config.trail.enabled.then(|| {
            CursorTrail::new(
                self.config.trail.length,
                Duration::from_millis(self.config.trail.lifespan_ms),
            )
        });

        tracing::debug!(capability = ?gate.state(), widgets = self.widgets.len(), "cursor layer mounted");
        self.layer = Some(MountedLayer {
            store: InteractionStore::new(),
            classifier: HoverClassifier::new(self.config.max_ancestor_depth),
            gate,
            probe,
            pointer: None,
            pointer_in_window: true,
            viewport: Vec2::ZERO,
            trail,
        });
    }

    /// Releases every subscription, snaps all widgets back to rest and drops
    /// the store. Does nothing when not mounted.
    pub fn unmount(&mut self) {
        for widget in self.widgets.iter_mut() {
            widget.on_leave();
        }
        if let Some(mut layer) = self.layer.take() {
            layer.store.release_subscriptions();
            tracing::debug!("cursor layer unmounted");
        }
    }

    pub fn is_mounted(&self) -> bool {
        self.layer.is_some()
    }

    // ===== Store access =====

    /// Returns the current interaction snapshot.
    pub fn state(&self) -> Result<InteractionState, CursorError> {
        Ok(self.layer()?.store.get())
    }

    pub fn store(&self) -> Result<&InteractionStore, CursorError> {
        Ok(&self.layer()?.store)
    }

    pub fn store_mut(&mut self) -> Result<&mut InteractionStore, CursorError> {
        Ok(&mut self.layer_mut()?.store)
    }

    pub fn subscribe<F>(&mut self, listener: F) -> Result<SubscriptionId, CursorError>
    where
        F: FnMut(&InteractionState) + 'static,
    {
        Ok(self.layer_mut()?.store.subscribe(listener))
    }

    pub fn unsubscribe(&mut self, id: SubscriptionId) -> Result<bool, CursorError> {
        Ok(self.layer_mut()?.store.unsubscribe(id))
    }

    /// Delivers pending changes to subscribers.
    pub fn flush(&mut self) -> Result<bool, CursorError> {
        Ok(self.layer_mut()?.store.flush())
    }

    // ===== Capability =====

    /// Returns the detected capability, `None` when not mounted.
    pub fn capability(&self) -> Option<PointerCapability> {
        self.layer.as_ref().map(|l| l.gate.state())
    }

    /// True when the host should show its own pointer.
    pub fn native_cursor_visible(&self) -> bool {
        self.capability() != Some(PointerCapability::PointerCapable)
    }

    /// True when magnetic widgets must render as plain static elements.
    pub fn widgets_render_static(&self) -> bool {
        self.native_cursor_visible()
    }

    // ===== Magnetic widgets =====

    /// Registers a magnetic widget. Re-registering updates its strength and
    /// keeps the widget's enter/leave state.
    pub fn register_magnetic(&mut self, widget: ElementId, strength: Option<f32>) {
        let strength = strength.unwrap_or(self.config.magnetic_strength);
        match self.widgets.iter_mut().find(|w| w.id() == widget) {
            Some(existing) => existing.set_strength(strength),
            None => self.widgets.push(MagneticWidget::new(widget, strength)),
        }
    }

    /// Removes a widget, resetting its displacement and any state it owned.
    pub fn unregister_magnetic(&mut self, widget: ElementId) -> Result<(), CursorError> {
        let index = self
            .widgets
            .iter()
            .position(|w| w.id() == widget)
            .ok_or(CursorError::UnknownWidget(widget))?;
        let mut removed = self.widgets.remove(index);
        if removed.is_active() {
            removed.on_leave();
            if self.release_widget_state(widget) {
                if let Some(layer) = self.layer.as_mut() {
                    HoverClassification::none().apply_to(&mut layer.store);
                }
            }
        }
        Ok(())
    }

    /// Returns a widget's current displacement.
    pub fn displacement(&self, widget: ElementId) -> Result<WidgetDisplacement, CursorError> {
        self.widgets
            .iter()
            .find(|w| w.id() == widget)
            .map(MagneticWidget::displacement)
            .ok_or(CursorError::UnknownWidget(widget))
    }

    pub fn magnetic_widgets(&self) -> &[MagneticWidget] {
        &self.widgets
    }

    // ===== Presentation queries =====

    /// Last pointer position seen while mounted.
    pub fn pointer(&self) -> Option<Pos2> {
        self.layer.as_ref().and_then(|l| l.pointer)
    }

    pub fn viewport(&self) -> Option<Vec2> {
        self.layer.as_ref().map(|l| l.viewport)
    }

    /// Visibility inputs for the custom cursor.
    pub fn visibility(&self) -> CursorVisibility {
        match &self.layer {
            Some(layer) => CursorVisibility {
                pointer_capable: layer.gate.allows_pointer_work(),
                in_window: layer.pointer_in_window,
                native_region: layer.classifier.current().native_cursor,
            },
            None => CursorVisibility::hidden(),
        }
    }

    /// Derives what the presenter should spring toward.
    pub fn cursor_visual(&self) -> Result<CursorVisual, CursorError> {
        let layer = self.layer()?;
        Ok(CursorVisual::derive(
            &layer.store.get(),
            layer.pointer,
            self.visibility(),
            &self.config,
        ))
    }

    /// Focus point of the hover-responsive background, in percent.
    pub fn background_focus(&self) -> Option<Vec2> {
        let layer = self.layer.as_ref()?;
        let pointer = layer.pointer?;
        Some(parallax::background_focus(pointer, layer.viewport, self.config.parallax_amplifier))
    }

    /// Trail dots to draw at `now`; empty when the trail is disabled.
    pub fn trail_dots(&self, now: Instant) -> Vec<TrailDot> {
        self.layer
            .as_ref()
            .and_then(|l| l.trail.as_ref())
            .map(|t| t.dots(now))
            .unwrap_or_default()
    }

    // ===== Event handling =====

    /// Applies one host event.
    ///
    /// Events are ignored while not mounted, and everything except `Resize`
    /// is ignored while the device is touch-only.
    pub fn handle_event<T: ElementTree + ?Sized>(&mut self, tree: &T, event: PointerEvent) -> PointerInputResult {
        let Some(layer) = self.layer.as_mut() else {
            tracing::debug!(?event, "event ignored, cursor layer not mounted");
            return PointerInputResult::Ignored;
        };

        if let PointerEvent::Resize { viewport } = event {
            layer.viewport = viewport;
            return match layer.gate.reevaluate(layer.probe.as_ref()) {
                Some(PointerCapability::TouchOnly) => {
                    self.enter_touch_only();
                    PointerInputResult::CapabilityChanged(PointerCapability::TouchOnly)
                }
                Some(capability) => PointerInputResult::CapabilityChanged(capability),
                None => PointerInputResult::Handled,
            };
        }

        if !layer.gate.allows_pointer_work() {
            return PointerInputResult::Ignored;
        }

        match event {
            PointerEvent::Move { pos, target } => self.handle_move(tree, pos, target),
            PointerEvent::WidgetEnter { widget, pos } => self.handle_widget_enter(tree, widget, pos),
            PointerEvent::WidgetLeave { widget } => self.handle_widget_leave(tree, widget),
            PointerEvent::WindowEnter => {
                layer.pointer_in_window = true;
                PointerInputResult::Handled
            }
            PointerEvent::WindowLeave => {
                self.handle_window_leave();
                PointerInputResult::Handled
            }
            PointerEvent::Down => {
                layer.store.set_clicking(true);
                PointerInputResult::Handled
            }
            PointerEvent::Up => {
                layer.store.set_clicking(false);
                PointerInputResult::Handled
            }
            PointerEvent::Resize { .. } => PointerInputResult::Handled,
        }
    }

    fn handle_move<T: ElementTree + ?Sized>(
        &mut self,
        tree: &T,
        pos: Pos2,
        target: Option<ElementId>,
    ) -> PointerInputResult {
        let max_depth = self.config.max_ancestor_depth;
        let Some(layer) = self.layer.as_mut() else {
            return PointerInputResult::Ignored;
        };
        if !layer.pointer_in_window {
            return PointerInputResult::Ignored;
        }

        layer.pointer = Some(pos);
        if let Some(trail) = layer.trail.as_mut() {
            trail.push(pos, Instant::now());
        }

        let classification = layer.classifier.classify_move(tree, target, pos);
        classification.apply_to(&mut layer.store);

        let chain = target
            .and_then(|t| ancestor_chain(tree, t, max_depth))
            .unwrap_or_default();

        let mut inside_any = false;
        for widget in self.widgets.iter_mut() {
            let id = widget.id();
            let under = chain.contains(&id) || classification.owner == Some(id);
            let widget_box = tree.rect(id);

            match (under, widget_box) {
                (true, Some(widget_box)) => {
                    if !widget.is_active() {
                        widget.on_enter(widget_box, tree.corner_radius(id));
                        layer.classifier.hold_for_widget(id);
                    }
                    if widget.on_move(pos, widget_box).is_some() {
                        inside_any = true;
                    }
                }
                _ if widget.is_active() => {
                    widget.on_leave();
                    layer.classifier.release_widget(id);
                }
                _ => {}
            }
        }

        if inside_any {
            layer.store.set_magnetic_target(Some(pos));
        } else if layer.store.get().magnetic_target.is_some() {
            layer.store.set_magnetic_target(None);
        }

        PointerInputResult::Handled
    }

    fn handle_widget_enter<T: ElementTree + ?Sized>(
        &mut self,
        tree: &T,
        widget: ElementId,
        pos: Pos2,
    ) -> PointerInputResult {
        let Some(layer) = self.layer.as_mut() else {
            return PointerInputResult::Ignored;
        };
        if !layer.pointer_in_window {
            return PointerInputResult::Ignored;
        }
        let Some(entry) = self.widgets.iter_mut().find(|w| w.id() == widget) else {
            tracing::debug!(widget, "enter on unregistered magnetic widget");
            return PointerInputResult::Ignored;
        };
        let Some(widget_box) = tree.rect(widget) else {
            return PointerInputResult::Ignored;
        };

        layer.pointer = Some(pos);
        entry.on_enter(widget_box, tree.corner_radius(widget));
        layer.classifier.hold_for_widget(widget);

        // Offer the widget's box as hover geometry only over plain
        // background; an existing owner or a hidden region keeps precedence.
        if layer.classifier.current().kind == CursorKind::Default {
            layer
                .classifier
                .classify_move(tree, Some(widget), pos)
                .apply_to(&mut layer.store);
        }
        PointerInputResult::Handled
    }

    fn handle_widget_leave<T: ElementTree + ?Sized>(&mut self, tree: &T, widget: ElementId) -> PointerInputResult {
        let Some(entry) = self.widgets.iter_mut().find(|w| w.id() == widget) else {
            return PointerInputResult::Ignored;
        };
        entry.on_leave();
        if !self.release_widget_state(widget) {
            return PointerInputResult::Handled;
        }

        // The widget owned the hover: the pointer is back over whatever
        // encloses it, so classify from the widget's parent.
        let Some(layer) = self.layer.as_mut() else {
            return PointerInputResult::Ignored;
        };
        let classification = match layer.pointer {
            Some(pos) => layer.classifier.classify_move(tree, tree.parent(widget), pos),
            None => HoverClassification::none(),
        };
        classification.apply_to(&mut layer.store);
        PointerInputResult::Handled
    }

    /// Clears the magnetic target once no widget is active and releases the
    /// widget from the classifier.
    ///
    /// Returns true when the widget owned the hover and the caller must
    /// decide what is hovered now.
    fn release_widget_state(&mut self, widget: ElementId) -> bool {
        let still_inside = self.widgets.iter().any(MagneticWidget::is_active);
        let Some(layer) = self.layer.as_mut() else {
            return false;
        };
        if !still_inside {
            layer.store.set_magnetic_target(None);
        }
        layer.classifier.release_widget(widget)
    }

    fn handle_window_leave(&mut self) {
        for widget in self.widgets.iter_mut() {
            widget.on_leave();
        }
        let Some(layer) = self.layer.as_mut() else {
            return;
        };
        layer.pointer_in_window = false;
        layer.classifier.clear();
        HoverClassification::none().apply_to(&mut layer.store);
        layer.store.set_magnetic_target(None);
        if let Some(trail) = layer.trail.as_mut() {
            trail.clear();
        }
    }

    fn enter_touch_only(&mut self) {
        for widget in self.widgets.iter_mut() {
            widget.on_leave();
        }
        let Some(layer) = self.layer.as_mut() else {
            return;
        };
        layer.classifier.clear();
        layer.store.reset();
        layer.pointer = None;
        if let Some(trail) = layer.trail.as_mut() {
            trail.clear();
        }
    }

    fn layer(&self) -> Result<&MountedLayer, CursorError> {
        self.layer.as_ref().ok_or(CursorError::NotMounted)
    }

    fn layer_mut(&mut self) -> Result<&mut MountedLayer, CursorError> {
        self.layer.as_mut().ok_or(CursorError::NotMounted)
    }
}

impl Drop for CursorCoordinator {
    fn drop(&mut self) {
        self.unmount();
    }
}
