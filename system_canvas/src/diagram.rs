//! Diagram projection - the renderer's input, resolved to draw calls.
//!
//! A frame is a stateless projection of a graph, per-layer opacity and an
//! optional active node. Renderers draw exactly what the frame lists.

use narrative_state::Layer;
use serde::{Deserialize, Serialize};

use crate::topology::{NodeKind, Position, TopologyGraph};
use crate::visibility::LayerOpacities;

/// Edge strength relative to its layer when nothing is active.
pub const EDGE_OPACITY: f64 = 0.4;

/// Edge strength relative to its layer when another node is active.
pub const EDGE_DIMMED_OPACITY: f64 = 0.2;

/// Node strength relative to its layer when another node is active.
pub const NODE_DIMMED_OPACITY: f64 = 0.4;

/// Complexity above which the metrics overlay is shown.
pub const METRICS_THRESHOLD: f64 = 0.7;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RenderedNode {
    pub id: String,
    pub label: String,
    pub kind: NodeKind,
    pub layer: Layer,
    pub position: Position,
    pub opacity: f64,
    pub active: bool,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RenderedEdge {
    pub from: String,
    pub to: String,
    pub layer: Layer,
    pub start: Position,
    pub end: Position,
    pub opacity: f64,
    /// Touches the active node.
    pub highlighted: bool,
}

/// Everything needed to draw one frame of the system canvas.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Default)]
pub struct DiagramFrame {
    pub nodes: Vec<RenderedNode>,
    pub edges: Vec<RenderedEdge>,
    pub active_node: Option<String>,
}

impl DiagramFrame {
    /// Project a graph into draw calls.
    ///
    /// Nodes and edges on a layer with zero opacity are dropped. Edges whose
    /// endpoints are not in the graph are skipped silently.
    pub fn project(
        graph: &TopologyGraph,
        opacities: &LayerOpacities,
        active_node: Option<&str>,
    ) -> Self {
        let active_node = active_node.filter(|id| graph.contains(id));

        let nodes = graph
            .nodes
            .iter()
            .filter(|node| opacities.is_visible(node.layer))
            .map(|node| {
                let active = active_node == Some(node.id.as_str());
                let emphasis = match active_node {
                    Some(_) if !active => NODE_DIMMED_OPACITY,
                    _ => 1.0,
                };
                RenderedNode {
                    id: node.id.clone(),
                    label: node.label.clone(),
                    kind: node.kind,
                    layer: node.layer,
                    position: node.position,
                    opacity: opacities.get(node.layer) * emphasis,
                    active,
                }
            })
            .collect();

        let edges = graph
            .edges
            .iter()
            .filter(|edge| opacities.is_visible(edge.layer))
            .filter_map(|edge| {
                let from = graph.node(&edge.from)?;
                let to = graph.node(&edge.to)?;
                let highlighted = active_node.is_some_and(|id| edge.touches(id));
                let emphasis = match active_node {
                    Some(_) if highlighted => 1.0,
                    Some(_) => EDGE_DIMMED_OPACITY,
                    None => EDGE_OPACITY,
                };
                Some(RenderedEdge {
                    from: edge.from.clone(),
                    to: edge.to.clone(),
                    layer: edge.layer,
                    start: from.position,
                    end: to.position,
                    opacity: opacities.get(edge.layer) * emphasis,
                    highlighted,
                })
            })
            .collect();

        Self {
            nodes,
            edges,
            active_node: active_node.map(str::to_string),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty() && self.edges.is_empty()
    }
}

/// Overlay shown once the system is complex enough to be worth counting.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct CanvasMetrics {
    pub nodes: usize,
    pub connections: usize,
    pub complexity_percent: u32,
}

impl CanvasMetrics {
    pub fn for_graph(graph: &TopologyGraph, complexity: f64) -> Option<Self> {
        if complexity <= METRICS_THRESHOLD {
            return None;
        }
        Some(Self {
            nodes: graph.nodes.len(),
            connections: graph.edges.len(),
            complexity_percent: (complexity * 100.0).round() as u32,
        })
    }
}

/// Background grid fades in with complexity.
pub fn grid_opacity(complexity: f64) -> f64 {
    0.1 + narrative_state::clamp_unit(complexity) * 0.2
}

/// Badge shown while a layer is focused, e.g. `Layer: API`.
pub fn focus_badge(focus: Option<Layer>) -> Option<String> {
    focus.map(|layer| format!("Layer: {}", layer.as_str().to_uppercase()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::topology::{generate, TopologyEdge};
    use narrative_state::Domain;

    #[test]
    fn test_zero_complexity_draws_nothing() {
        let graph = generate(None, 0.0, None);
        let frame = DiagramFrame::project(&graph, &LayerOpacities::compute(0.0, None), None);
        assert!(frame.is_empty());
    }

    #[test]
    fn test_hidden_layers_are_dropped() {
        let graph = generate(None, 0.6, None);
        let frame = DiagramFrame::project(&graph, &LayerOpacities::compute(0.6, None), None);

        assert!(frame.nodes.iter().all(|n| matches!(n.layer, Layer::Ui | Layer::Api)));
        assert!(frame.nodes.iter().any(|n| n.id == "client"));
        assert!(!frame.nodes.iter().any(|n| n.id == "db"));
    }

    #[test]
    fn test_edge_opacity_scales_layer() {
        let graph = generate(None, 1.0, None);
        let opacities = LayerOpacities::compute(1.0, None);
        let frame = DiagramFrame::project(&graph, &opacities, None);

        let edge = frame.edges.iter().find(|e| e.to == "gateway").unwrap();
        assert!((edge.opacity - opacities.api * EDGE_OPACITY).abs() < 1e-9);
        assert_eq!(edge.start, Position::new(100.0, 300.0));
        assert_eq!(edge.end, Position::new(300.0, 300.0));
    }

    #[test]
    fn test_dangling_edges_are_skipped() {
        let mut graph = generate(Some(Domain::Web), 1.0, None);
        graph.edges.push(TopologyEdge {
            from: "service".to_string(),
            to: "nowhere".to_string(),
            layer: Layer::Api,
        });

        let frame = DiagramFrame::project(&graph, &LayerOpacities::compute(1.0, None), None);
        assert!(!frame.edges.iter().any(|e| e.to == "nowhere"));
        assert_eq!(frame.edges.len(), graph.edges.len() - 1);
    }

    #[test]
    fn test_active_node_emphasis() {
        let graph = generate(None, 1.0, None);
        let opacities = LayerOpacities::compute(0.0, Some(Layer::Api));
        let frame = DiagramFrame::project(&graph, &opacities, Some("service"));

        assert_eq!(frame.active_node.as_deref(), Some("service"));

        let service = frame.nodes.iter().find(|n| n.id == "service").unwrap();
        assert!(service.active);
        assert_eq!(service.opacity, 1.0);

        let api = frame.nodes.iter().find(|n| n.id == "api").unwrap();
        assert!(!api.active);
        assert!((api.opacity - NODE_DIMMED_OPACITY).abs() < 1e-9);

        let touching = frame.edges.iter().find(|e| e.from == "api" && e.to == "service").unwrap();
        assert!(touching.highlighted);
        assert_eq!(touching.opacity, 1.0);

        let elsewhere = frame.edges.iter().find(|e| e.to == "gateway").unwrap();
        assert!(!elsewhere.highlighted);
        assert!((elsewhere.opacity - EDGE_DIMMED_OPACITY).abs() < 1e-9);
    }

    #[test]
    fn test_unknown_active_node_is_ignored() {
        let graph = generate(None, 0.5, None);
        let frame = DiagramFrame::project(&graph, &LayerOpacities::compute(0.5, None), Some("ghost"));
        assert_eq!(frame.active_node, None);
        assert!(frame.nodes.iter().all(|n| !n.active));
    }

    #[test]
    fn test_metrics_overlay() {
        let graph = generate(Some(Domain::Ai), 0.8, None);
        assert!(CanvasMetrics::for_graph(&graph, 0.7).is_none());

        let metrics = CanvasMetrics::for_graph(&graph, 0.8).unwrap();
        assert_eq!(metrics.nodes, graph.nodes.len());
        assert_eq!(metrics.connections, graph.edges.len());
        assert_eq!(metrics.complexity_percent, 80);
    }

    #[test]
    fn test_grid_and_badge() {
        assert!((grid_opacity(0.0) - 0.1).abs() < 1e-9);
        assert!((grid_opacity(1.0) - 0.3).abs() < 1e-9);
        assert_eq!(focus_badge(Some(Layer::Infra)).as_deref(), Some("Layer: INFRA"));
        assert_eq!(focus_badge(None), None);
    }
}
