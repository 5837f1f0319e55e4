//! Canvas snapshot - the whole derivation pipeline for one state.
//!
//! state → complexity → graph → layer opacities → frame → overlays.
//! Re-derived from scratch on every state change; graphs are small.

use narrative_state::{EffectiveState, EnvironmentProfile, Layer, MotionPreference, NarrativeStore};
use serde::{Deserialize, Serialize};
use tracing::trace;

use crate::diagram::{focus_badge, grid_opacity, CanvasMetrics, DiagramFrame};
use crate::topology::{TopologyConfig, TopologyGraph};
use crate::visibility::LayerOpacities;

/// Everything the page needs to draw the system canvas for one state.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CanvasSnapshot {
    pub state: EffectiveState,
    pub complexity: f64,
    pub graph: TopologyGraph,
    pub opacities: LayerOpacities,
    pub frame: DiagramFrame,
    pub metrics: Option<CanvasMetrics>,
    pub grid_opacity: f64,
    pub focus_badge: Option<String>,
    pub environment: EnvironmentProfile,

    /// Visitor's motion and theme signals; rendering only.
    pub motion: MotionPreference,

    /// How long the environment profile takes to cross-fade, zero under reduced motion.
    pub environment_transition_ms: u64,
}

impl CanvasSnapshot {
    /// Run the pipeline for an effective state.
    pub fn from_state(
        state: &EffectiveState,
        config: &TopologyConfig,
        active_node: Option<&str>,
    ) -> Self {
        let complexity = state.complexity();
        let graph = config.generate(state.domain, complexity, state.stage);
        let opacities = LayerOpacities::compute(complexity, state.focus_layer);
        let frame = DiagramFrame::project(&graph, &opacities, active_node);
        let metrics = CanvasMetrics::for_graph(&graph, complexity);

        trace!(
            complexity,
            nodes = graph.nodes.len(),
            drawn = frame.nodes.len(),
            "canvas snapshot derived"
        );

        Self {
            state: *state,
            complexity,
            grid_opacity: grid_opacity(complexity),
            focus_badge: focus_badge(state.focus_layer),
            environment: EnvironmentProfile::for_domain(state.domain),
            motion: MotionPreference::default(),
            environment_transition_ms: transition_ms(MotionPreference::default()),
            graph,
            opacities,
            frame,
            metrics,
        }
    }

    /// Apply the visitor's motion preference.
    pub fn with_motion(mut self, motion: MotionPreference) -> Self {
        self.motion = motion;
        self.environment_transition_ms = transition_ms(motion);
        self
    }

    /// Snapshot of a store's current effective state.
    pub fn from_store(store: &NarrativeStore, config: &TopologyConfig) -> Self {
        Self::from_state(&store.effective(), config, None)
    }

    pub fn focused_layer(&self) -> Option<Layer> {
        self.state.focus_layer
    }
}

fn transition_ms(motion: MotionPreference) -> u64 {
    motion.environment_transition().as_millis() as u64
}

#[cfg(test)]
mod tests {
    use super::*;
    use narrative_state::{Domain, Preview, Stage, Theme, Tone};

    #[test]
    fn test_snapshot_follows_scroll() {
        let config = TopologyConfig::default();
        let mut store = NarrativeStore::new();

        let top = CanvasSnapshot::from_store(&store, &config);
        assert_eq!(top.complexity, 0.0);
        assert!(top.frame.is_empty());
        assert!(top.metrics.is_none());

        store.set_scroll_progress(0.6);
        let deep = CanvasSnapshot::from_store(&store, &config);
        assert!((deep.complexity - 0.9).abs() < 1e-9);
        assert_eq!(deep.state.stage, Some(Stage::Build));
        assert_eq!(deep.graph.nodes.len(), 10);
        assert!(deep.metrics.is_some());
        assert!(!deep.frame.is_empty());
    }

    #[test]
    fn test_snapshot_uses_preview() {
        let config = TopologyConfig::default();
        let mut store = NarrativeStore::new();
        store.set_domain(Some(Domain::Web));
        store.set_scroll_progress(0.5);
        store.set_preview(Some(Preview::new().with_domain(Some(Domain::Ai))));

        let snapshot = CanvasSnapshot::from_store(&store, &config);
        assert!(snapshot.graph.contains("ai-service"));
        assert_eq!(snapshot.environment.tone, Tone::Dark);
    }

    #[test]
    fn test_focus_badge_and_layer() {
        let state = EffectiveState {
            focus_layer: Some(Layer::Data),
            scroll_progress: 0.2,
            ..EffectiveState::default()
        };
        let snapshot = CanvasSnapshot::from_state(&state, &TopologyConfig::default(), None);

        assert_eq!(snapshot.focused_layer(), Some(Layer::Data));
        assert_eq!(snapshot.focus_badge.as_deref(), Some("Layer: DATA"));
        assert_eq!(snapshot.opacities.data, 1.0);
    }

    #[test]
    fn test_snapshot_json_shape() {
        let state = EffectiveState {
            domain: Some(Domain::Migration),
            scroll_progress: 1.0,
            ..EffectiveState::default()
        };
        let snapshot = CanvasSnapshot::from_state(&state, &TopologyConfig::default(), Some("db"));
        let json = serde_json::to_value(&snapshot).unwrap();

        assert_eq!(json["state"]["domain"], "migration");
        assert_eq!(json["frame"]["active_node"], "db");
        assert_eq!(json["metrics"]["complexity_percent"], 100);
        assert_eq!(json["graph"]["nodes"].as_array().unwrap().len(), 12);

        let back: CanvasSnapshot = serde_json::from_value(json).unwrap();
        assert_eq!(back, snapshot);
    }

    #[test]
    fn test_reduced_motion_collapses_transition() {
        let state = EffectiveState::default();
        let snapshot = CanvasSnapshot::from_state(&state, &TopologyConfig::default(), None);
        assert_eq!(snapshot.environment_transition_ms, 2000);

        let reduced = snapshot.with_motion(MotionPreference {
            reduced_motion: true,
            theme: Theme::Light,
        });
        assert_eq!(reduced.environment_transition_ms, 0);
        assert_eq!(reduced.motion.theme, Theme::Light);
    }
}
