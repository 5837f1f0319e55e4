//! Narrative store - the container injected into the render tree.
//!
//! The store owns the one `NarrativeState` of a page session. Mutators are the
//! only write path; every one of them goes through [`reduce`].

use tracing::debug;

use crate::domain::{ArchitectureLevel, Domain, Layer, Section, Stage};
use crate::reducer::{reduce, NarrativeAction};
use crate::state::{EffectiveState, NarrativeState, Preview, SessionId};

type Subscriber = Box<dyn FnMut(&NarrativeState) + Send>;

/// Single-writer, many-reader holder of narrative state.
pub struct NarrativeStore {
    session_id: SessionId,
    state: NarrativeState,
    revision: u64,
    subscribers: Vec<Subscriber>,
}

impl NarrativeStore {
    /// Create a store for a fresh page session.
    pub fn new() -> Self {
        Self::with_session(SessionId::new())
    }

    /// Create a store bound to a known session.
    pub fn with_session(session_id: SessionId) -> Self {
        Self {
            session_id,
            state: NarrativeState::default(),
            revision: 0,
            subscribers: Vec::new(),
        }
    }

    pub fn session_id(&self) -> SessionId {
        self.session_id
    }

    /// Real state, without the preview overlay.
    pub fn state(&self) -> &NarrativeState {
        &self.state
    }

    /// Real state overlaid by the active preview.
    pub fn effective(&self) -> EffectiveState {
        self.state.effective()
    }

    /// Number of dispatches that actually changed state.
    pub fn revision(&self) -> u64 {
        self.revision
    }

    /// Register a callback run after every state change.
    pub fn subscribe<F>(&mut self, subscriber: F)
    where
        F: FnMut(&NarrativeState) + Send + 'static,
    {
        self.subscribers.push(Box::new(subscriber));
    }

    /// Run an action through the reducer.
    ///
    /// Returns whether the state changed. Subscribers are only notified on change.
    pub fn dispatch(&mut self, action: NarrativeAction) -> bool {
        let name = action.name();
        let next = reduce(&self.state, action);
        if next == self.state {
            return false;
        }

        self.state = next;
        self.revision += 1;
        debug!(
            session = %self.session_id,
            action = name,
            revision = self.revision,
            stage = ?self.state.stage,
            scroll = self.state.scroll_progress,
            "narrative state updated"
        );

        for subscriber in &mut self.subscribers {
            subscriber(&self.state);
        }
        true
    }

    pub fn set_domain(&mut self, domain: Option<Domain>) -> bool {
        self.dispatch(NarrativeAction::SetDomain(domain))
    }

    pub fn set_stage(&mut self, stage: Option<Stage>) -> bool {
        self.dispatch(NarrativeAction::SetStage(stage))
    }

    pub fn set_architecture_level(&mut self, level: ArchitectureLevel) -> bool {
        self.dispatch(NarrativeAction::SetArchitectureLevel(level))
    }

    pub fn set_focus_layer(&mut self, layer: Option<Layer>) -> bool {
        self.dispatch(NarrativeAction::SetFocusLayer(layer))
    }

    pub fn set_active_section(&mut self, section: Option<Section>) -> bool {
        self.dispatch(NarrativeAction::SetActiveSection(section))
    }

    pub fn set_preview(&mut self, preview: Option<Preview>) -> bool {
        self.dispatch(NarrativeAction::SetPreview(preview))
    }

    pub fn set_scroll_progress(&mut self, progress: f64) -> bool {
        self.dispatch(NarrativeAction::SetScrollProgress(progress))
    }

    pub fn reset(&mut self) -> bool {
        self.dispatch(NarrativeAction::Reset)
    }
}

impl Default for NarrativeStore {
    fn default() -> Self {
        Self::new()
    }
}

impl std::fmt::Debug for NarrativeStore {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("NarrativeStore")
            .field("session_id", &self.session_id)
            .field("state", &self.state)
            .field("revision", &self.revision)
            .field("subscribers", &self.subscribers.len())
            .finish()
    }
}
