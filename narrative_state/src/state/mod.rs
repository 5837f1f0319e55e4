//! Narrative state - the record of what the visitor is looking at.

mod preview;

pub use preview::*;

use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::domain::{clamp_unit, ArchitectureLevel, Domain, Layer, Section, Stage};

/// How much faster complexity grows than raw scroll progress.
pub const COMPLEXITY_SCROLL_GAIN: f64 = 1.5;

/// Unique identifier for a page session.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct SessionId(pub Uuid);

impl SessionId {
    pub fn new() -> Self {
        Self(Uuid::new_v4())
    }

    pub fn nil() -> Self {
        Self(Uuid::nil())
    }
}

impl Default for SessionId {
    fn default() -> Self {
        Self::new()
    }
}

impl std::fmt::Display for SessionId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// The complete narrative state of one page session.
///
/// Fields are only written through [`crate::reduce`]; everything here is
/// plain data so the state can be cloned, compared and serialized freely.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Default)]
pub struct NarrativeState {
    /// Selected service track.
    pub domain: Option<Domain>,

    /// Lifecycle position.
    pub stage: Option<Stage>,

    /// Derived from domain and stage unless explicitly overridden.
    pub architecture_level: ArchitectureLevel,

    /// Layer isolated by the visibility policy.
    pub focus_layer: Option<Layer>,

    /// Section that currently owns the shared visualization.
    pub active_section: Option<Section>,

    /// Set while a focus layer or preview is active.
    pub is_inspecting: bool,

    /// Hover overlay; shadows real fields for effective reads.
    pub preview: Option<Preview>,

    /// Always within `[0, 1]`.
    pub scroll_progress: f64,

    /// Scroll-derived stage observed when the visitor explicitly picked a stage.
    /// While set, scroll updates inside that same bucket leave `stage` alone.
    pub stage_pin: Option<Stage>,
}

impl NarrativeState {
    /// Create the initial state.
    pub fn new() -> Self {
        Self::default()
    }

    /// Real state overlaid by the preview, if one is present.
    pub fn effective(&self) -> EffectiveState {
        let base = EffectiveState {
            domain: self.domain,
            stage: self.stage,
            architecture_level: self.architecture_level,
            focus_layer: self.focus_layer,
            active_section: self.active_section,
            scroll_progress: self.scroll_progress,
            is_inspecting: self.is_inspecting,
        };

        match &self.preview {
            Some(preview) => preview.overlay(base),
            None => base,
        }
    }

    /// Whether an explicit stage selection currently shadows scroll-derived stage.
    pub fn is_stage_pinned(&self) -> bool {
        self.stage_pin.is_some()
    }
}

/// Read-only view used by every derived computation.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize, Default)]
pub struct EffectiveState {
    pub domain: Option<Domain>,
    pub stage: Option<Stage>,
    pub architecture_level: ArchitectureLevel,
    pub focus_layer: Option<Layer>,
    pub active_section: Option<Section>,
    pub scroll_progress: f64,
    pub is_inspecting: bool,
}

impl EffectiveState {
    /// Scalar in `[0, 1]` driving how much of the topology is revealed.
    pub fn complexity(&self) -> f64 {
        complexity_from_scroll(self.scroll_progress)
    }
}

/// `min(1, progress × 1.5)`; monotonic in scroll progress.
pub fn complexity_from_scroll(progress: f64) -> f64 {
    (clamp_unit(progress) * COMPLEXITY_SCROLL_GAIN).min(1.0)
}
