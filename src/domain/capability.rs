//! Pointer capability detection.
//!
//! Two states, evaluated at mount and on every viewport resize. While the
//! device is `TouchOnly` no other component of the cursor layer does work.

use serde::{Deserialize, Serialize};

use crate::traits::CapabilityProbe;

/// Which device answers count as touch-only.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DetectionPolicy {
    /// Only the "(hover: none)" media query decides
    #[default]
    HoverMedia,
    /// Any touch capability also counts, hybrids lose the custom cursor
    AnyTouch,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PointerCapability {
    PointerCapable,
    TouchOnly,
}

/// Evaluates the probe under a policy.
pub fn detect(probe: &dyn CapabilityProbe, policy: DetectionPolicy) -> PointerCapability {
    let touch_only = match policy {
        DetectionPolicy::HoverMedia => probe.hover_none(),
        DetectionPolicy::AnyTouch => probe.hover_none() || probe.max_touch_points() > 0,
    };
    if touch_only {
        PointerCapability::TouchOnly
    } else {
        PointerCapability::PointerCapable
    }
}

/// Gate in front of every pointer-driven component.
#[derive(Debug, Clone)]
pub struct CapabilityGate {
    policy: DetectionPolicy,
    state: PointerCapability,
}

impl CapabilityGate {
    /// Creates the gate with an initial detection.
    pub fn new(policy: DetectionPolicy, probe: &dyn CapabilityProbe) -> Self {
        let state = detect(probe, policy);
        tracing::debug!(?state, ?policy, "initial pointer capability");
        Self { policy, state }
    }

    pub fn state(&self) -> PointerCapability {
        self.state
    }

    /// True while pointer-only behavior may run.
    pub fn allows_pointer_work(&self) -> bool {
        self.state == PointerCapability::PointerCapable
    }

    /// Re-runs detection. Returns the new state on a transition.
    pub fn reevaluate(&mut self, probe: &dyn CapabilityProbe) -> Option<PointerCapability> {
        let next = detect(probe, self.policy);
        if next == self.state {
            return None;
        }
        tracing::debug!(from = ?self.state, to = ?next, "pointer capability changed");
        self.state = next;
        Some(next)
    }
}
