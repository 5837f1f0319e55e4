//! Topology generator - maps (domain, complexity, stage) to a node/edge graph.
//!
//! The generator works as follows:
//! 1. **Anchor**: Always emit the client node
//! 2. **Count**: Derive the node count from complexity
//! 3. **Reveal**: Walk the candidate list in order, emitting every candidate
//!    whose threshold the node count reaches, together with its edge
//! 4. **Augment**: Apply the selected domain's extras on top of the base graph
//!
//! Output is a pure function of the inputs; node and edge order is insertion
//! order and is what renderers key on.

mod config;

pub use config::*;

use narrative_state::{clamp_unit, Domain, Layer, Stage};
use serde::{Deserialize, Serialize};

/// Kinds of system components drawn on the canvas.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum NodeKind {
    Frontend,
    Gateway,
    Api,
    Service,
    Database,
    Cache,
    Queue,
    Backend,
}

/// A node of the generated graph.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TopologyNode {
    pub id: String,
    pub label: String,
    pub kind: NodeKind,
    pub layer: Layer,
    pub position: Position,
}

impl From<&NodeSpec> for TopologyNode {
    fn from(spec: &NodeSpec) -> Self {
        Self {
            id: spec.id.clone(),
            label: spec.label.clone(),
            kind: spec.kind,
            layer: spec.layer,
            position: spec.position,
        }
    }
}

/// A directed edge of the generated graph.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TopologyEdge {
    pub from: String,
    pub to: String,
    pub layer: Layer,
}

impl TopologyEdge {
    /// Whether the edge touches the given node.
    pub fn touches(&self, node_id: &str) -> bool {
        self.from == node_id || self.to == node_id
    }
}

impl From<&EdgeSpec> for TopologyEdge {
    fn from(spec: &EdgeSpec) -> Self {
        Self {
            from: spec.from.clone(),
            to: spec.to.clone(),
            layer: spec.layer,
        }
    }
}

/// An ephemeral graph, rebuilt from scratch on every state change.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TopologyGraph {
    pub nodes: Vec<TopologyNode>,
    pub edges: Vec<TopologyEdge>,

    /// Nodes emitted before domain augmentation.
    pub base_node_count: usize,

    /// Stage the graph was generated for.
    pub stage: Option<Stage>,
}

impl TopologyGraph {
    /// Get node by ID.
    pub fn node(&self, id: &str) -> Option<&TopologyNode> {
        self.nodes.iter().find(|n| n.id == id)
    }

    pub fn contains(&self, id: &str) -> bool {
        self.node(id).is_some()
    }

    /// Nodes belonging to a layer, in insertion order.
    pub fn nodes_in_layer(&self, layer: Layer) -> impl Iterator<Item = &TopologyNode> {
        self.nodes.iter().filter(move |n| n.layer == layer)
    }

    pub fn node_ids(&self) -> Vec<&str> {
        self.nodes.iter().map(|n| n.id.as_str()).collect()
    }
}

impl TopologyConfig {
    /// Build the graph for the given inputs using these tables.
    pub fn generate(
        &self,
        domain: Option<Domain>,
        complexity: f64,
        stage: Option<Stage>,
    ) -> TopologyGraph {
        let node_count = self.node_count(clamp_unit(complexity));

        let mut nodes = vec![TopologyNode::from(&self.client)];
        let mut edges = Vec::new();

        for candidate in &self.candidates {
            if node_count >= candidate.min_node_count {
                nodes.push(TopologyNode::from(&candidate.node));
                edges.push(TopologyEdge::from(&candidate.edge));
            }
        }
        let base_node_count = nodes.len();

        if domain == Some(Domain::Mobile) {
            if let Some(client) = nodes.iter_mut().find(|n| n.id == self.client.id) {
                client.label = self.mobile_client_label.clone();
            }
        }

        for augmentation in &self.augmentations {
            if Some(augmentation.domain) == domain && node_count >= augmentation.min_node_count {
                nodes.push(TopologyNode::from(&augmentation.node));
                edges.push(TopologyEdge::from(&augmentation.edge));
            }
        }

        TopologyGraph {
            nodes,
            edges,
            base_node_count,
            stage,
        }
    }
}

/// Build the graph with the built-in tables.
pub fn generate(domain: Option<Domain>, complexity: f64, stage: Option<Stage>) -> TopologyGraph {
    TopologyConfig::default().generate(domain, complexity, stage)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_zero_complexity_reveals_first_two_candidates() {
        let graph = generate(None, 0.0, None);

        assert_eq!(graph.node_ids(), vec!["client", "gateway", "api"]);
        assert_eq!(graph.edges.len(), 2);
        assert_eq!(graph.edges[0].from, "client");
        assert_eq!(graph.edges[0].to, "gateway");
        assert_eq!(graph.base_node_count, 3);
    }

    #[test]
    fn test_full_complexity_reveals_all_candidates() {
        let graph = generate(Some(Domain::Web), 1.0, Some(Stage::Deploy));

        assert_eq!(graph.nodes.len(), 11);
        assert_eq!(graph.edges.len(), 10);
        assert_eq!(
            graph.node_ids(),
            vec![
                "client", "gateway", "api", "service", "db", "cache", "queue", "worker", "auth",
                "cdn", "monitor"
            ]
        );
        assert_eq!(graph.stage, Some(Stage::Deploy));
    }

    #[test]
    fn test_client_anchor() {
        let graph = generate(None, 0.5, None);
        let client = graph.node("client").unwrap();

        assert_eq!(client.kind, NodeKind::Frontend);
        assert_eq!(client.layer, Layer::Ui);
        assert_eq!(client.position, Position::new(100.0, 300.0));
        assert_eq!(client.label, "Client");
    }

    #[test]
    fn test_mobile_relabels_client_only() {
        let web = generate(Some(Domain::Web), 0.6, None);
        let mobile = generate(Some(Domain::Mobile), 0.6, None);

        assert_eq!(mobile.node("client").unwrap().label, "Mobile App");
        assert_eq!(mobile.nodes.len(), web.nodes.len());
        assert_eq!(mobile.edges, web.edges);
    }

    #[test]
    fn test_ai_service_threshold() {
        // floor(3 + 0.3 × 8) = 5
        let below = generate(Some(Domain::Ai), 0.3, None);
        assert!(!below.contains("ai-service"));

        // floor(3 + 0.375 × 8) = 6
        let at = generate(Some(Domain::Ai), 0.375, None);
        let node = at.node("ai-service").unwrap();
        assert_eq!(node.kind, NodeKind::Service);
        assert_eq!(node.layer, Layer::Api);
        assert_eq!(at.nodes.last().unwrap().id, "ai-service");

        let edge = at.edges.last().unwrap();
        assert_eq!((edge.from.as_str(), edge.to.as_str()), ("service", "ai-service"));
    }

    #[test]
    fn test_legacy_threshold() {
        // floor(3 + 0.2 × 8) = 4
        assert!(!generate(Some(Domain::Migration), 0.2, None).contains("legacy"));
        // floor(3 + 0.25 × 8) = 5
        let graph = generate(Some(Domain::Migration), 0.25, None);
        assert_eq!(graph.node("legacy").unwrap().kind, NodeKind::Database);
        assert_eq!(graph.base_node_count, 5);
        assert_eq!(graph.nodes.len(), 6);
    }

    #[test]
    fn test_augmentation_is_domain_specific() {
        assert!(!generate(Some(Domain::Web), 1.0, None).contains("ai-service"));
        assert!(!generate(Some(Domain::Ai), 1.0, None).contains("legacy"));
        assert!(!generate(None, 1.0, None).contains("legacy"));
    }

    #[test]
    fn test_cdn_edge_points_at_client() {
        let graph = generate(None, 1.0, None);
        let cdn_edge = graph.edges.iter().find(|e| e.from == "cdn").unwrap();
        assert_eq!(cdn_edge.to, "client");
        assert_eq!(cdn_edge.layer, Layer::Ui);
    }

    #[test]
    fn test_generation_is_deterministic() {
        let a = generate(Some(Domain::Ai), 0.8, Some(Stage::Build));
        let b = generate(Some(Domain::Ai), 0.8, Some(Stage::Build));
        assert_eq!(a, b);
    }

    #[test]
    fn test_out_of_range_complexity_is_clamped() {
        assert_eq!(generate(None, 5.0, None), generate(None, 1.0, None));
        assert_eq!(generate(None, -2.0, None), generate(None, 0.0, None));
    }

    #[test]
    fn test_nodes_in_layer() {
        let graph = generate(None, 1.0, None);
        let data: Vec<_> = graph.nodes_in_layer(Layer::Data).map(|n| n.id.as_str()).collect();
        assert_eq!(data, vec!["db", "cache"]);
    }
}
