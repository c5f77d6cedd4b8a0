//! Hover classification for the custom cursor.
//!
//! Decides, for a pointer target, whether the pointer is over something
//! interactive, which element owns the hover and what its box looks like.
//!
//! Rules, in order:
//! 1. A `HideCursor` marker on the target or any ancestor hides the cursor.
//! 2. The nearest element (walking from the target toward the root) that
//!    satisfies [`ElementTree::is_interactive`] owns the hover.
//! 3. The owner's lineage decides the kind: inside an anchor is `Link`,
//!    inside a button is `Button`, anything else is `Interactive`.
//! 4. A magnetic widget keeps the hover while the pointer stays inside its
//!    box, even when the target between its sub-elements is not interactive.

use egui::Pos2;

use crate::state::{CursorKind, HoveredGeometry, InteractionStore};
use crate::traits::{ElementId, ElementTag, ElementTree, Marker};

/// Upper bound on ancestor walks; longer chains are treated as cycles.
pub const DEFAULT_MAX_ANCESTOR_DEPTH: usize = 256;

/// Result of classifying one pointer target.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct HoverClassification {
    pub kind: CursorKind,
    /// Element owning the hover, if any
    pub owner: Option<ElementId>,
    pub geometry: Option<HoveredGeometry>,
    /// Target lies in a region that keeps the native cursor
    pub native_cursor: bool,
}

impl Default for HoverClassification {
    fn default() -> Self {
        Self::none()
    }
}

impl HoverClassification {
    /// Nothing interactive under the pointer.
    pub fn none() -> Self {
        Self {
            kind: CursorKind::Default,
            owner: None,
            geometry: None,
            native_cursor: false,
        }
    }

    pub fn hidden() -> Self {
        Self {
            kind: CursorKind::Hidden,
            ..Self::none()
        }
    }

    pub fn is_hovering(&self) -> bool {
        self.kind.is_interactive() && self.geometry.is_some()
    }

    /// Writes the classifier-owned fields into the store.
    pub fn apply_to(&self, store: &mut InteractionStore) {
        store.set_cursor_kind(self.kind);
        if self.kind == CursorKind::Hidden {
            return;
        }
        let hovering = self.is_hovering();
        store.set_hovering(hovering);
        store.set_inverted(hovering);
        store.set_hovered_geometry(if hovering { self.geometry } else { None });
    }
}

/// Collects the target and its ancestors, nearest first.
///
/// Returns `None` when the chain exceeds `max_depth`, which is how cycles in
/// a malformed tree show up.
pub(crate) fn ancestor_chain<T: ElementTree + ?Sized>(
    tree: &T,
    target: ElementId,
    max_depth: usize,
) -> Option<Vec<ElementId>> {
    let mut chain = vec![target];
    let mut current = target;
    while let Some(parent) = tree.parent(current) {
        if chain.len() >= max_depth {
            return None;
        }
        chain.push(parent);
        current = parent;
    }
    Some(chain)
}

fn kind_for_lineage<T: ElementTree + ?Sized>(tree: &T, lineage: &[ElementId]) -> CursorKind {
    let is_anchor = |id: &ElementId| tree.tag(*id) == Some(ElementTag::Anchor);
    let is_button = |id: &ElementId| {
        tree.tag(*id) == Some(ElementTag::Button) || tree.has_marker(*id, Marker::RoleButton)
    };

    if lineage.iter().any(is_anchor) {
        CursorKind::Link
    } else if lineage.iter().any(is_button) {
        CursorKind::Button
    } else {
        CursorKind::Interactive
    }
}

/// Classifies a single pointer target without any history.
pub fn classify<T: ElementTree + ?Sized>(
    tree: &T,
    target: Option<ElementId>,
    max_depth: usize,
) -> HoverClassification {
    let Some(target) = target else {
        return HoverClassification::none();
    };
    let Some(chain) = ancestor_chain(tree, target, max_depth) else {
        tracing::warn!(target_id = target, max_depth, "ancestor chain too deep, treating target as non-interactive");
        return HoverClassification::none();
    };

    let native_cursor = chain.iter().any(|id| tree.has_marker(*id, Marker::NativeCursor));

    if chain.iter().any(|id| tree.has_marker(*id, Marker::HideCursor)) {
        return HoverClassification {
            native_cursor,
            ..HoverClassification::hidden()
        };
    }

    let Some(owner_index) = chain.iter().position(|id| tree.is_interactive(*id)) else {
        return HoverClassification {
            native_cursor,
            ..HoverClassification::none()
        };
    };
    let owner = chain[owner_index];

    let Some(rect) = tree.rect(owner) else {
        tracing::warn!(owner_id = owner, "interactive element has no rendered box");
        return HoverClassification {
            native_cursor,
            ..HoverClassification::none()
        };
    };

    HoverClassification {
        kind: kind_for_lineage(tree, &chain[owner_index..]),
        owner: Some(owner),
        geometry: Some(HoveredGeometry::from_rect(rect, tree.corner_radius(owner))),
        native_cursor,
    }
}

/// Stateful classifier: remembers the last result and the magnetic widget
/// whose box keeps the hover alive.
#[derive(Debug, Clone)]
pub struct HoverClassifier {
    max_depth: usize,
    current: HoverClassification,
    sticky_widget: Option<ElementId>,
}

impl Default for HoverClassifier {
    fn default() -> Self {
        Self::new(DEFAULT_MAX_ANCESTOR_DEPTH)
    }
}

impl HoverClassifier {
    pub fn new(max_depth: usize) -> Self {
        Self {
            max_depth: max_depth.max(1),
            current: HoverClassification::none(),
            sticky_widget: None,
        }
    }

    /// Returns the result of the last processed event.
    pub fn current(&self) -> &HoverClassification {
        &self.current
    }

    /// Returns the magnetic widget currently holding the hover, if any.
    pub fn sticky_widget(&self) -> Option<ElementId> {
        self.sticky_widget
    }

    /// Classifies a pointer move. The result replaces the previous one.
    pub fn classify_move<T: ElementTree + ?Sized>(
        &mut self,
        tree: &T,
        target: Option<ElementId>,
        pointer: Pos2,
    ) -> HoverClassification {
        if let Some(widget) = self.sticky_widget {
            if !tree.rect(widget).is_some_and(|r| r.contains(pointer)) {
                self.sticky_widget = None;
            }
        }

        let mut result = classify(tree, target, self.max_depth);

        if result.owner.is_none() && result.kind != CursorKind::Hidden {
            if let Some(widget) = self.sticky_widget {
                let native_cursor = result.native_cursor;
                result = HoverClassification {
                    native_cursor,
                    ..classify(tree, Some(widget), self.max_depth)
                };
            }
        }

        if let Some(owner) = result.owner {
            if tree.has_marker(owner, Marker::Magnetic) {
                self.sticky_widget = Some(owner);
            }
        }

        tracing::trace!(kind = ?result.kind, owner = ?result.owner, "classified pointer target");
        self.current = result;
        result
    }

    /// Records a magnetic widget that the pointer just entered.
    pub fn hold_for_widget(&mut self, widget: ElementId) {
        self.sticky_widget = Some(widget);
    }

    /// Releases a magnetic widget the pointer left.
    ///
    /// Returns true when the widget owned the hover, in which case the
    /// classification was reset and the caller must write it to the store.
    pub fn release_widget(&mut self, widget: ElementId) -> bool {
        if self.sticky_widget == Some(widget) {
            self.sticky_widget = None;
        }
        if self.current.owner == Some(widget) {
            self.current = HoverClassification::none();
            return true;
        }
        false
    }

    /// Forgets everything (pointer left the window, capability lost).
    pub fn clear(&mut self) {
        self.current = HoverClassification::none();
        self.sticky_widget = None;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::scene::{ElementSpec, SceneTree};
    use egui::{pos2, vec2, Rect};

    fn rect(x: f32, y: f32, w: f32, h: f32) -> Rect {
        Rect::from_min_size(pos2(x, y), vec2(w, h))
    }

    fn page() -> (SceneTree, ElementId) {
        let mut tree = SceneTree::new();
        let root = tree.add_root(ElementSpec::generic(rect(0.0, 0.0, 1000.0, 1000.0)));
        (tree, root)
    }

    #[test]
    fn test_plain_anchor_is_link() {
        let (mut tree, root) = page();
        let link = tree.add_child(root, ElementSpec::anchor(rect(10.0, 10.0, 80.0, 20.0)).corner_radius(4.0));

        let result = classify(&tree, Some(link), DEFAULT_MAX_ANCESTOR_DEPTH);
        assert_eq!(result.kind, CursorKind::Link);
        assert_eq!(result.owner, Some(link));
        assert_eq!(result.geometry, Some(HoveredGeometry::new(80.0, 20.0, 4.0)));
    }

    #[test]
    fn test_text_inside_anchor_reports_anchor_box() {
        let (mut tree, root) = page();
        let link = tree.add_child(root, ElementSpec::anchor(rect(10.0, 10.0, 80.0, 20.0)));
        let span = tree.add_child(link, ElementSpec::generic(rect(12.0, 12.0, 30.0, 16.0)));

        let result = classify(&tree, Some(span), DEFAULT_MAX_ANCESTOR_DEPTH);
        assert_eq!(result.kind, CursorKind::Link);
        assert_eq!(result.owner, Some(link));
    }

    #[test]
    fn test_nearest_ancestor_wins() {
        let (mut tree, root) = page();
        let panel = tree.add_child(
            root,
            ElementSpec::generic(rect(0.0, 0.0, 200.0, 200.0)).marker(Marker::Interactive),
        );
        let button = tree.add_child(panel, ElementSpec::button(rect(10.0, 10.0, 40.0, 40.0)));

        let result = classify(&tree, Some(button), DEFAULT_MAX_ANCESTOR_DEPTH);
        assert_eq!(result.kind, CursorKind::Button);
        assert_eq!(result.geometry.map(|g| (g.width, g.height)), Some((40.0, 40.0)));

        let result = classify(&tree, Some(panel), DEFAULT_MAX_ANCESTOR_DEPTH);
        assert_eq!(result.kind, CursorKind::Interactive);
        assert_eq!(result.geometry.map(|g| (g.width, g.height)), Some((200.0, 200.0)));
    }

    #[test]
    fn test_role_button_counts_as_button() {
        let (mut tree, root) = page();
        let fake = tree.add_child(
            root,
            ElementSpec::generic(rect(0.0, 0.0, 60.0, 30.0)).marker(Marker::RoleButton),
        );
        let result = classify(&tree, Some(fake), DEFAULT_MAX_ANCESTOR_DEPTH);
        assert_eq!(result.kind, CursorKind::Button);
    }

    #[test]
    fn test_hide_marker_beats_interactive_ancestor() {
        let (mut tree, root) = page();
        let card = tree.add_child(
            root,
            ElementSpec::anchor(rect(0.0, 0.0, 300.0, 300.0)).marker(Marker::Card),
        );
        let video = tree.add_child(
            card,
            ElementSpec::generic(rect(10.0, 10.0, 100.0, 100.0)).marker(Marker::HideCursor),
        );
        let inner = tree.add_child(video, ElementSpec::button(rect(20.0, 20.0, 20.0, 20.0)));

        for target in [video, inner] {
            let result = classify(&tree, Some(target), DEFAULT_MAX_ANCESTOR_DEPTH);
            assert_eq!(result, HoverClassification::hidden());
        }
    }

    #[test]
    fn test_non_interactive_target_is_default() {
        let (mut tree, root) = page();
        let text = tree.add_child(root, ElementSpec::generic(rect(0.0, 0.0, 100.0, 20.0)));
        assert_eq!(classify(&tree, Some(text), 16), HoverClassification::none());
        assert_eq!(classify(&tree, None, 16), HoverClassification::none());
    }

    #[test]
    fn test_unknown_target_is_default() {
        let (tree, _) = page();
        assert_eq!(classify(&tree, Some(4242), 16), HoverClassification::none());
    }

    #[test]
    fn test_cyclic_ancestry_falls_back_to_default() {
        let (mut tree, root) = page();
        let a = tree.add_child(root, ElementSpec::generic(rect(0.0, 0.0, 10.0, 10.0)));
        let b = tree.add_child(a, ElementSpec::button(rect(0.0, 0.0, 10.0, 10.0)));
        tree.set_parent(a, Some(b));

        assert_eq!(classify(&tree, Some(b), 32), HoverClassification::none());
    }

    #[test]
    fn test_owner_without_box_falls_back_to_default() {
        let (mut tree, root) = page();
        let link = tree.add_child(root, ElementSpec::anchor(rect(0.0, 0.0, 1.0, 1.0)).without_rect());
        assert_eq!(classify(&tree, Some(link), 16).kind, CursorKind::Default);
    }

    #[test]
    fn test_native_cursor_region_is_reported() {
        let (mut tree, root) = page();
        let editor = tree.add_child(
            root,
            ElementSpec::generic(rect(0.0, 0.0, 400.0, 400.0)).marker(Marker::NativeCursor),
        );
        let field = tree.add_child(editor, ElementSpec::new(ElementTag::TextArea, rect(0.0, 0.0, 100.0, 100.0)));

        let result = classify(&tree, Some(field), 16);
        assert!(result.native_cursor);
        assert_eq!(result.kind, CursorKind::Interactive);
    }

    #[test]
    fn test_magnetic_widget_holds_hover_inside_its_box() {
        let (mut tree, root) = page();
        let widget = tree.add_child(
            root,
            ElementSpec::generic(rect(100.0, 100.0, 120.0, 60.0))
                .marker(Marker::Magnetic)
                .corner_radius(30.0),
        );
        let mut classifier = HoverClassifier::default();

        let first = classifier.classify_move(&tree, Some(widget), pos2(150.0, 120.0));
        assert_eq!(first.owner, Some(widget));

        // Host reports no qualifying target between sub-elements
        let between = classifier.classify_move(&tree, Some(root), pos2(160.0, 130.0));
        assert_eq!(between.owner, Some(widget));
        assert_eq!(between.kind, CursorKind::Interactive);

        // Truly outside the widget box
        let outside = classifier.classify_move(&tree, Some(root), pos2(500.0, 500.0));
        assert_eq!(outside, HoverClassification::none());
        assert_eq!(classifier.sticky_widget(), None);
    }

    #[test]
    fn test_release_widget_clears_owned_hover() {
        let (mut tree, root) = page();
        let widget = tree.add_child(
            root,
            ElementSpec::generic(rect(0.0, 0.0, 50.0, 50.0)).marker(Marker::Magnetic),
        );
        let other = tree.add_child(root, ElementSpec::button(rect(100.0, 0.0, 50.0, 50.0)));
        let mut classifier = HoverClassifier::default();

        classifier.classify_move(&tree, Some(other), pos2(110.0, 10.0));
        assert!(!classifier.release_widget(widget));
        assert_eq!(classifier.current().owner, Some(other));

        classifier.classify_move(&tree, Some(widget), pos2(10.0, 10.0));
        assert!(classifier.release_widget(widget));
        assert_eq!(*classifier.current(), HoverClassification::none());
    }

    #[test]
    fn test_apply_writes_consistent_state() {
        let (mut tree, root) = page();
        let link = tree.add_child(root, ElementSpec::anchor(rect(0.0, 0.0, 50.0, 10.0)));
        let mut store = InteractionStore::new();

        classify(&tree, Some(link), 16).apply_to(&mut store);
        let state = store.get();
        assert!(state.is_consistent());
        assert!(state.is_hovering && state.is_inverted);

        HoverClassification::hidden().apply_to(&mut store);
        assert!(store.get().is_consistent());
        assert_eq!(store.get().cursor_kind, CursorKind::Hidden);

        HoverClassification::none().apply_to(&mut store);
        assert!(store.get().is_consistent());
        assert_eq!(store.get().cursor_kind, CursorKind::Default);
    }
}
