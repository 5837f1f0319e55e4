//! Preview overlay - hover previews that never commit the real selection.

use serde::{Deserialize, Deserializer, Serialize};

use super::EffectiveState;
use crate::domain::{clamp_unit, ArchitectureLevel, Domain, Layer, Section, Stage};

/// A partial overlay of narrative state.
///
/// Nullable fields use a double option: the outer `None` means "not part of
/// this preview", while `Some(None)` previews the field as cleared.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Default)]
pub struct Preview {
    #[serde(
        default,
        deserialize_with = "present",
        skip_serializing_if = "Option::is_none"
    )]
    pub domain: Option<Option<Domain>>,

    #[serde(
        default,
        deserialize_with = "present",
        skip_serializing_if = "Option::is_none"
    )]
    pub stage: Option<Option<Stage>>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub architecture_level: Option<ArchitectureLevel>,

    #[serde(
        default,
        deserialize_with = "present",
        skip_serializing_if = "Option::is_none"
    )]
    pub focus_layer: Option<Option<Layer>>,

    #[serde(
        default,
        deserialize_with = "present",
        skip_serializing_if = "Option::is_none"
    )]
    pub active_section: Option<Option<Section>>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub scroll_progress: Option<f64>,
}

/// A field that appears in the payload is part of the preview, even when null.
fn present<'de, T, D>(deserializer: D) -> Result<Option<Option<T>>, D::Error>
where
    T: Deserialize<'de>,
    D: Deserializer<'de>,
{
    Option::<T>::deserialize(deserializer).map(Some)
}

impl Preview {
    /// Create an empty preview.
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_domain(mut self, domain: Option<Domain>) -> Self {
        self.domain = Some(domain);
        self
    }

    pub fn with_stage(mut self, stage: Option<Stage>) -> Self {
        self.stage = Some(stage);
        self
    }

    pub fn with_architecture_level(mut self, level: ArchitectureLevel) -> Self {
        self.architecture_level = Some(level);
        self
    }

    pub fn with_focus_layer(mut self, layer: Option<Layer>) -> Self {
        self.focus_layer = Some(layer);
        self
    }

    pub fn with_active_section(mut self, section: Option<Section>) -> Self {
        self.active_section = Some(section);
        self
    }

    pub fn with_scroll_progress(mut self, progress: f64) -> Self {
        self.scroll_progress = Some(clamp_unit(progress));
        self
    }

    /// True when the preview shadows nothing.
    pub fn is_empty(&self) -> bool {
        self == &Self::default()
    }

    /// Shadow every field present in the preview.
    pub fn overlay(&self, mut base: EffectiveState) -> EffectiveState {
        if let Some(domain) = self.domain {
            base.domain = domain;
        }
        if let Some(stage) = self.stage {
            base.stage = stage;
        }
        if let Some(level) = self.architecture_level {
            base.architecture_level = level;
        }
        if let Some(layer) = self.focus_layer {
            base.focus_layer = layer;
        }
        if let Some(section) = self.active_section {
            base.active_section = section;
        }
        if let Some(progress) = self.scroll_progress {
            base.scroll_progress = clamp_unit(progress);
        }
        base
    }
}
