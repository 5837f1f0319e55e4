//! The reducer - every derivation rule of the narrative state lives here.
//!
//! Rules:
//! 1. Selecting a domain or reaching a stage may imply an architecture level;
//!    when neither implies one the level is left unchanged.
//! 2. Scroll progress is clamped to `[0, 1]` and bucketed into a stage.
//! 3. An explicit stage selection pins the stage until scrolling leaves the
//!    bucket it was made in.
//! 4. Focus and preview toggle `is_inspecting`.

use serde::{Deserialize, Serialize};

use crate::domain::{clamp_unit, ArchitectureLevel, Domain, Layer, Section, Stage};
use crate::state::{NarrativeState, Preview};

/// Events that can change narrative state.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", content = "value", rename_all = "snake_case")]
pub enum NarrativeAction {
    SetDomain(Option<Domain>),
    SetStage(Option<Stage>),
    SetArchitectureLevel(ArchitectureLevel),
    SetFocusLayer(Option<Layer>),
    SetActiveSection(Option<Section>),
    SetPreview(Option<Preview>),
    SetScrollProgress(f64),
    Reset,
}

impl NarrativeAction {
    /// Short name for logging.
    pub fn name(&self) -> &'static str {
        match self {
            NarrativeAction::SetDomain(_) => "set_domain",
            NarrativeAction::SetStage(_) => "set_stage",
            NarrativeAction::SetArchitectureLevel(_) => "set_architecture_level",
            NarrativeAction::SetFocusLayer(_) => "set_focus_layer",
            NarrativeAction::SetActiveSection(_) => "set_active_section",
            NarrativeAction::SetPreview(_) => "set_preview",
            NarrativeAction::SetScrollProgress(_) => "set_scroll_progress",
            NarrativeAction::Reset => "reset",
        }
    }
}

/// Compute the state that follows `state` after `action`.
pub fn reduce(state: &NarrativeState, action: NarrativeAction) -> NarrativeState {
    let mut next = state.clone();

    match action {
        NarrativeAction::SetDomain(domain) => {
            next.domain = domain;
            if let Some(level) = domain.and_then(|d| d.architecture_level()) {
                next.architecture_level = level;
            }
        }

        NarrativeAction::SetStage(stage) => {
            next.stage = stage;
            next.stage_pin = stage.map(|_| Stage::from_scroll(state.scroll_progress));
            apply_stage_level(&mut next, stage);
        }

        NarrativeAction::SetArchitectureLevel(level) => {
            next.architecture_level = level;
        }

        NarrativeAction::SetFocusLayer(layer) => {
            next.focus_layer = layer;
            next.is_inspecting = layer.is_some();
        }

        NarrativeAction::SetActiveSection(section) => {
            next.active_section = section;
        }

        NarrativeAction::SetPreview(preview) => {
            next.is_inspecting = preview.is_some();
            next.preview = preview;
        }

        NarrativeAction::SetScrollProgress(progress) => {
            let progress = clamp_unit(progress);
            next.scroll_progress = progress;

            let derived = Stage::from_scroll(progress);
            match state.stage_pin {
                // Still inside the bucket the visitor picked a stage in
                Some(pinned) if pinned == derived => {}
                _ => {
                    next.stage_pin = None;
                    if next.stage != Some(derived) {
                        next.stage = Some(derived);
                        apply_stage_level(&mut next, Some(derived));
                    }
                }
            }
        }

        NarrativeAction::Reset => {
            next = NarrativeState::default();
        }
    }

    next
}

fn apply_stage_level(state: &mut NarrativeState, stage: Option<Stage>) {
    if let Some(level) = stage.and_then(|s| s.architecture_level()) {
        state.architecture_level = level;
    }
}

impl NarrativeState {
    /// Apply an action in place.
    pub fn apply(&mut self, action: NarrativeAction) {
        *self = reduce(self, action);
    }
}
