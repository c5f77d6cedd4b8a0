use egui::Rect;

/// Type alias for element IDs (host-side identities of UI elements)
pub type ElementId = u64;

/// Element tag, reduced to the kinds the classifier cares about.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ElementTag {
    Anchor,
    Button,
    Input,
    Select,
    TextArea,
    Generic,
}

impl ElementTag {
    /// Returns true for tags that are interactive on their own.
    pub fn is_native_control(self) -> bool {
        !matches!(self, ElementTag::Generic)
    }
}

/// Opt-in markers an element can carry (classes / data attributes on the web side).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Marker {
    /// Custom cursor hidden while over this subtree
    HideCursor,
    /// Explicitly interactive
    Interactive,
    /// Magnetic attraction widget
    Magnetic,
    Card,
    Badge,
    /// Button-styled element that is not a native button
    Btn,
    /// Accessibility role of button
    RoleButton,
    /// Region that keeps the native cursor (custom cursor fades out)
    NativeCursor,
}

/// Markers that make an element count as interactive.
pub const INTERACTIVE_MARKERS: [Marker; 6] = [
    Marker::Interactive,
    Marker::Magnetic,
    Marker::Card,
    Marker::Badge,
    Marker::Btn,
    Marker::RoleButton,
];

/// Read access to the host's element tree.
///
/// Implementations only need to answer questions about single elements; the
/// classifier does all walking itself. Unknown IDs must answer `None`/`false`
/// rather than panic, since pointer targets can refer to elements that were
/// removed between the event and its processing.
pub trait ElementTree {
    /// Returns the parent of an element, `None` at the root or for unknown IDs
    fn parent(&self, id: ElementId) -> Option<ElementId>;

    /// Returns the element's tag, `None` for unknown IDs
    fn tag(&self, id: ElementId) -> Option<ElementTag>;

    /// Returns true if the element carries the marker
    fn has_marker(&self, id: ElementId, marker: Marker) -> bool;

    /// Returns the element's current rendered box in viewport coordinates
    fn rect(&self, id: ElementId) -> Option<Rect>;

    /// Returns the element's resolved corner radius in pixels
    fn corner_radius(&self, id: ElementId) -> f32;

    /// Interactivity predicate used by the hover classifier.
    ///
    /// The default matches anchors, native form controls, buttons and any
    /// element with one of [`INTERACTIVE_MARKERS`]. Hosts with other
    /// conventions can override it.
    fn is_interactive(&self, id: ElementId) -> bool {
        match self.tag(id) {
            Some(tag) if tag.is_native_control() => true,
            Some(_) => INTERACTIVE_MARKERS.iter().any(|m| self.has_marker(id, *m)),
            None => false,
        }
    }
}

/// Answers the "(hover: none)" media query and related device questions.
pub trait CapabilityProbe {
    /// True when the primary input cannot hover
    fn hover_none(&self) -> bool;

    /// Number of simultaneous touch points the device supports
    fn max_touch_points(&self) -> u32 {
        0
    }
}
