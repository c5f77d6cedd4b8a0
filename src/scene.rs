//! In-memory element tree.
//!
//! `SceneTree` is the crate's own [`ElementTree`] implementation: hosts
//! without a retained UI tree can mirror their layout into it, and tests use
//! it as the mock tree. [`VirtualScene`] generates seeded random scenes.

use std::collections::HashMap;

use egui::{pos2, vec2, Pos2, Rect, Vec2};
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

use crate::traits::{ElementId, ElementTag, ElementTree, Marker};

const DEFAULT_MAX_DEPTH: usize = 4;
const DEFAULT_MAX_CHILDREN: usize = 4;

/// Description of one element to insert into a [`SceneTree`].
#[derive(Debug, Clone, PartialEq)]
pub struct ElementSpec {
    pub tag: ElementTag,
    pub markers: Vec<Marker>,
    pub rect: Option<Rect>,
    pub corner_radius: f32,
}

impl ElementSpec {
    pub fn new(tag: ElementTag, rect: Rect) -> Self {
        Self {
            tag,
            markers: Vec::new(),
            rect: Some(rect),
            corner_radius: 0.0,
        }
    }

    pub fn generic(rect: Rect) -> Self {
        Self::new(ElementTag::Generic, rect)
    }

    pub fn anchor(rect: Rect) -> Self {
        Self::new(ElementTag::Anchor, rect)
    }

    pub fn button(rect: Rect) -> Self {
        Self::new(ElementTag::Button, rect)
    }

    /// Adds a marker.
    pub fn marker(mut self, marker: Marker) -> Self {
        if !self.markers.contains(&marker) {
            self.markers.push(marker);
        }
        self
    }

    pub fn corner_radius(mut self, radius: f32) -> Self {
        self.corner_radius = radius;
        self
    }

    /// Drops the rendered box (element not laid out).
    pub fn without_rect(mut self) -> Self {
        self.rect = None;
        self
    }
}

#[derive(Debug, Clone)]
struct SceneNode {
    parent: Option<ElementId>,
    children: Vec<ElementId>,
    spec: ElementSpec,
}

/// Arena-backed element tree keyed by [`ElementId`].
#[derive(Debug, Clone, Default)]
pub struct SceneTree {
    nodes: HashMap<ElementId, SceneNode>,
    roots: Vec<ElementId>,
    next_id: ElementId,
}

impl SceneTree {
    pub fn new() -> Self {
        Self {
            nodes: HashMap::new(),
            roots: Vec::new(),
            next_id: 1,
        }
    }

    /// Inserts a top-level element.
    pub fn add_root(&mut self, spec: ElementSpec) -> ElementId {
        let id = self.insert(None, spec);
        self.roots.push(id);
        id
    }

    /// Inserts a child element.
    ///
    /// The parent does not have to exist: a dangling parent models a target
    /// whose ancestor was removed from the host tree.
    pub fn add_child(&mut self, parent: ElementId, spec: ElementSpec) -> ElementId {
        let id = self.insert(Some(parent), spec);
        if let Some(node) = self.nodes.get_mut(&parent) {
            node.children.push(id);
        }
        id
    }

    /// Re-links an element under a new parent without any validation.
    pub fn set_parent(&mut self, id: ElementId, parent: Option<ElementId>) {
        if let Some(node) = self.nodes.get_mut(&id) {
            node.parent = parent;
        }
    }

    /// Removes an element and its subtree.
    pub fn remove(&mut self, id: ElementId) {
        let Some(node) = self.nodes.remove(&id) else {
            return;
        };
        if let Some(parent) = node.parent.and_then(|p| self.nodes.get_mut(&p)) {
            parent.children.retain(|c| *c != id);
        }
        self.roots.retain(|r| *r != id);
        for child in node.children {
            self.remove(child);
        }
    }

    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    pub fn ids(&self) -> impl Iterator<Item = ElementId> + '_ {
        self.nodes.keys().copied()
    }

    pub fn children(&self, id: ElementId) -> &[ElementId] {
        self.nodes.get(&id).map(|n| n.children.as_slice()).unwrap_or(&[])
    }

    /// Returns the topmost, deepest element whose box contains the point.
    ///
    /// Later siblings paint over earlier ones, so they are tested first.
    pub fn hit_test(&self, pos: Pos2) -> Option<ElementId> {
        self.roots.iter().rev().find_map(|root| self.hit_test_node(*root, pos))
    }

    fn hit_test_node(&self, id: ElementId, pos: Pos2) -> Option<ElementId> {
        let node = self.nodes.get(&id)?;
        if !node.spec.rect.is_some_and(|r| r.contains(pos)) {
            return None;
        }
        node.children
            .iter()
            .rev()
            .find_map(|child| self.hit_test_node(*child, pos))
            .or(Some(id))
    }

    fn insert(&mut self, parent: Option<ElementId>, spec: ElementSpec) -> ElementId {
        let id = self.next_id;
        self.next_id += 1;
        self.nodes.insert(
            id,
            SceneNode {
                parent,
                children: Vec::new(),
                spec,
            },
        );
        id
    }
}

impl ElementTree for SceneTree {
    fn parent(&self, id: ElementId) -> Option<ElementId> {
        self.nodes.get(&id)?.parent
    }

    fn tag(&self, id: ElementId) -> Option<ElementTag> {
        self.nodes.get(&id).map(|n| n.spec.tag)
    }

    fn has_marker(&self, id: ElementId, marker: Marker) -> bool {
        self.nodes
            .get(&id)
            .is_some_and(|n| n.spec.markers.contains(&marker))
    }

    fn rect(&self, id: ElementId) -> Option<Rect> {
        self.nodes.get(&id)?.spec.rect
    }

    fn corner_radius(&self, id: ElementId) -> f32 {
        self.nodes.get(&id).map(|n| n.spec.corner_radius).unwrap_or(0.0)
    }
}

/// Seeded generator of random nested scenes.
pub struct VirtualScene {
    max_depth: usize,
    max_children: usize,
    viewport: Vec2,
    seed: u64,
}

impl Default for VirtualScene {
    fn default() -> Self {
        Self::new()
    }
}

impl VirtualScene {
    pub fn new() -> Self {
        Self {
            max_depth: DEFAULT_MAX_DEPTH,
            max_children: DEFAULT_MAX_CHILDREN,
            viewport: vec2(1280.0, 800.0),
            seed: 42,
        }
    }

    pub fn with_config(max_depth: usize, max_children: usize, seed: u64) -> Self {
        Self {
            max_depth,
            max_children,
            seed,
            ..Self::new()
        }
    }

    pub fn viewport(&self) -> Vec2 {
        self.viewport
    }

    /// Builds a scene: one page root covering the viewport, with randomly
    /// tagged and marked descendants nested inside their parents' boxes.
    pub fn generate(&self) -> SceneTree {
        let mut rng = StdRng::seed_from_u64(self.seed);
        let mut tree = SceneTree::new();
        let page = Rect::from_min_size(Pos2::ZERO, self.viewport);
        let root = tree.add_root(ElementSpec::generic(page));
        self.populate(&mut rng, &mut tree, root, page, 1);
        tree
    }

    /// Returns `count` random points inside the viewport.
    pub fn pointer_path(&self, count: usize) -> Vec<Pos2> {
        let mut rng = StdRng::seed_from_u64(self.seed.wrapping_add(1));
        (0..count)
            .map(|_| {
                pos2(
                    rng.gen_range(0.0..self.viewport.x),
                    rng.gen_range(0.0..self.viewport.y),
                )
            })
            .collect()
    }

    fn populate(
        &self,
        rng: &mut StdRng,
        tree: &mut SceneTree,
        parent: ElementId,
        parent_rect: Rect,
        depth: usize,
    ) {
        if depth > self.max_depth || parent_rect.width() < 8.0 || parent_rect.height() < 8.0 {
            return;
        }

        let num_children = rng.gen_range(0..=self.max_children);
        for _ in 0..num_children {
            let width = rng.gen_range(4.0..=parent_rect.width());
            let height = rng.gen_range(4.0..=parent_rect.height());
            let min = pos2(
                parent_rect.min.x + rng.gen_range(0.0..=parent_rect.width() - width),
                parent_rect.min.y + rng.gen_range(0.0..=parent_rect.height() - height),
            );
            let rect = Rect::from_min_size(min, vec2(width, height));
            let spec = random_spec(rng, rect);
            let child = tree.add_child(parent, spec);
            self.populate(rng, tree, child, rect, depth + 1);
        }
    }
}

fn random_spec(rng: &mut StdRng, rect: Rect) -> ElementSpec {
    let tag = match rng.gen_range(0..10) {
        0 => ElementTag::Anchor,
        1 => ElementTag::Button,
        2 => ElementTag::Input,
        _ => ElementTag::Generic,
    };
    let mut spec = ElementSpec::new(tag, rect).corner_radius(rng.gen_range(0.0..16.0));
    let markers = [
        (Marker::Interactive, 0.1),
        (Marker::Magnetic, 0.08),
        (Marker::Card, 0.08),
        (Marker::Badge, 0.05),
        (Marker::HideCursor, 0.04),
        (Marker::NativeCursor, 0.03),
    ];
    for (marker, chance) in markers {
        if rng.gen_bool(chance) {
            spec = spec.marker(marker);
        }
    }
    spec
}

#[cfg(test)]
mod tests {
    use super::*;

    fn rect(x: f32, y: f32, w: f32, h: f32) -> Rect {
        Rect::from_min_size(pos2(x, y), vec2(w, h))
    }

    #[test]
    fn test_hit_test_prefers_deepest_and_topmost() {
        let mut tree = SceneTree::new();
        let page = tree.add_root(ElementSpec::generic(rect(0.0, 0.0, 500.0, 500.0)));
        let card = tree.add_child(page, ElementSpec::generic(rect(10.0, 10.0, 200.0, 200.0)));
        let under = tree.add_child(card, ElementSpec::generic(rect(20.0, 20.0, 50.0, 50.0)));
        let over = tree.add_child(card, ElementSpec::button(rect(30.0, 30.0, 50.0, 50.0)));

        assert_eq!(tree.hit_test(pos2(40.0, 40.0)), Some(over));
        assert_eq!(tree.hit_test(pos2(22.0, 22.0)), Some(under));
        assert_eq!(tree.hit_test(pos2(150.0, 150.0)), Some(card));
        assert_eq!(tree.hit_test(pos2(400.0, 400.0)), Some(page));
        assert_eq!(tree.hit_test(pos2(600.0, 600.0)), None);
    }

    #[test]
    fn test_remove_drops_subtree() {
        let mut tree = SceneTree::new();
        let page = tree.add_root(ElementSpec::generic(rect(0.0, 0.0, 100.0, 100.0)));
        let nav = tree.add_child(page, ElementSpec::generic(rect(0.0, 0.0, 100.0, 20.0)));
        let link = tree.add_child(nav, ElementSpec::anchor(rect(0.0, 0.0, 30.0, 20.0)));

        tree.remove(nav);
        assert_eq!(tree.len(), 1);
        assert_eq!(tree.tag(link), None);
        assert!(tree.children(page).is_empty());
    }

    #[test]
    fn test_dangling_parent_is_allowed() {
        let mut tree = SceneTree::new();
        let orphan = tree.add_child(999, ElementSpec::generic(rect(0.0, 0.0, 10.0, 10.0)));
        assert_eq!(tree.parent(orphan), Some(999));
        assert_eq!(tree.tag(999), None);
    }

    #[test]
    fn test_default_interactivity_predicate() {
        let mut tree = SceneTree::new();
        let plain = tree.add_root(ElementSpec::generic(rect(0.0, 0.0, 10.0, 10.0)));
        let card = tree.add_root(ElementSpec::generic(rect(0.0, 0.0, 10.0, 10.0)).marker(Marker::Card));
        let input = tree.add_root(ElementSpec::new(ElementTag::Input, rect(0.0, 0.0, 10.0, 10.0)));
        let hidden = tree.add_root(ElementSpec::generic(rect(0.0, 0.0, 10.0, 10.0)).marker(Marker::HideCursor));

        assert!(!tree.is_interactive(plain));
        assert!(tree.is_interactive(card));
        assert!(tree.is_interactive(input));
        assert!(!tree.is_interactive(hidden));
        assert!(!tree.is_interactive(12345));
    }

    #[test]
    fn test_virtual_scene_is_deterministic() {
        let a = VirtualScene::with_config(3, 3, 7).generate();
        let b = VirtualScene::with_config(3, 3, 7).generate();
        assert_eq!(a.len(), b.len());

        let mut ids: Vec<_> = a.ids().collect();
        ids.sort_unstable();
        for id in ids {
            assert_eq!(a.tag(id), b.tag(id));
            assert_eq!(a.rect(id), b.rect(id));
        }
    }

    #[test]
    fn test_virtual_scene_children_nest_inside_parents() {
        let scene = VirtualScene::with_config(4, 4, 99);
        let tree = scene.generate();
        for id in tree.ids() {
            if let (Some(parent), Some(child_rect)) = (tree.parent(id), tree.rect(id)) {
                let parent_rect = tree.rect(parent).unwrap();
                assert!(parent_rect.expand(0.01).contains_rect(child_rect));
            }
        }
    }
}
