pub mod traits;
pub mod error;
pub mod scene;
pub mod state;
pub mod domain;
pub mod app;
pub mod presentation;

// Export element tree abstractions
pub use traits::{CapabilityProbe, ElementId, ElementTag, ElementTree, Marker, INTERACTIVE_MARKERS};

pub use error::CursorError;

// Export the in-memory tree and scene generator
pub use scene::{ElementSpec, SceneTree, VirtualScene};

// Export interaction state
pub use state::{CursorKind, HoveredGeometry, InteractionState, InteractionStore, SubscriptionId};

// Export domain rules
pub use domain::capability::{CapabilityGate, DetectionPolicy, PointerCapability};
pub use domain::hover_classifier::{classify, HoverClassification, HoverClassifier};
pub use domain::magnetic::{compute_displacement, MagneticWidget, WidgetDisplacement};
pub use domain::parallax::background_focus;
pub use domain::trail::{CursorTrail, TrailDot};

// Export coordination and settings
pub use app::{
    CursorConfig, CursorCoordinator, PointerEvent, PointerInputResult,
    SettingsCoordinator, SpringSettings, TrailSettings,
};

// Export presentation helpers
pub use presentation::cursor_visual::{CursorShape, CursorVisibility, CursorVisual, ThemeMode};
pub use presentation::frame_sampler::FrameSampler;
