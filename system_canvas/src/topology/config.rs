//! Topology tables - node catalogue, reveal thresholds and layout coordinates.
//!
//! The numbers here are tuned for visual effect on a 1000×600 canvas. They are
//! data, not semantics, and can be replaced wholesale from a TOML document.

use narrative_state::{Domain, Layer};
use serde::{Deserialize, Serialize};
use std::collections::HashSet;
use std::path::Path;
use thiserror::Error;
use tracing::debug;

use super::NodeKind;

/// Errors raised while loading topology tables.
#[derive(Debug, Error)]
pub enum TopologyConfigError {
    #[error("failed to read topology config {path}: {source}")]
    Io {
        path: String,
        #[source]
        source: std::io::Error,
    },

    #[error("invalid topology config: {0}")]
    Parse(#[from] toml::de::Error),

    #[error("node id `{0}` is declared more than once")]
    DuplicateNode(String),

    #[error("candidate `{id}` has threshold {threshold}, lower than the candidate before it")]
    ThresholdOrder { id: String, threshold: u32 },

    #[error("node count range {min}..={max} is empty")]
    EmptyRange { min: u32, max: u32 },
}

/// Canvas coordinates.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize, Default)]
pub struct Position {
    pub x: f64,
    pub y: f64,
}

impl Position {
    pub const fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }
}

/// A node as declared in the tables.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NodeSpec {
    pub id: String,
    pub label: String,
    pub kind: NodeKind,
    pub layer: Layer,
    pub position: Position,
}

/// An edge as declared in the tables.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EdgeSpec {
    pub from: String,
    pub to: String,
    pub layer: Layer,
}

/// Infrastructure node revealed once the node count reaches its threshold.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CandidateSpec {
    pub min_node_count: u32,
    pub node: NodeSpec,
    pub edge: EdgeSpec,
}

/// Domain-specific node appended after the base graph is built.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AugmentationSpec {
    pub domain: Domain,
    pub min_node_count: u32,
    pub node: NodeSpec,
    pub edge: EdgeSpec,
}

/// Complete set of topology tables.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TopologyConfig {
    /// Node count at complexity 0.
    pub base_node_count: u32,

    /// Extra nodes unlocked across the full complexity range.
    pub nodes_per_complexity: f64,

    /// Upper clamp for the node count.
    pub max_node_count: u32,

    /// Client label when the mobile track is selected.
    pub mobile_client_label: String,

    /// Always-present anchor node.
    pub client: NodeSpec,

    /// Reveal order is list order.
    pub candidates: Vec<CandidateSpec>,

    #[serde(default)]
    pub augmentations: Vec<AugmentationSpec>,
}

impl TopologyConfig {
    /// Parse and validate tables from TOML.
    pub fn from_toml_str(source: &str) -> Result<Self, TopologyConfigError> {
        let config: TopologyConfig = toml::from_str(source)?;
        config.validate()?;
        Ok(config)
    }

    /// Load tables from a TOML file.
    pub fn from_path(path: impl AsRef<Path>) -> Result<Self, TopologyConfigError> {
        let path = path.as_ref();
        let source = std::fs::read_to_string(path).map_err(|source| TopologyConfigError::Io {
            path: path.display().to_string(),
            source,
        })?;
        let config = Self::from_toml_str(&source)?;
        debug!(
            path = %path.display(),
            candidates = config.candidates.len(),
            augmentations = config.augmentations.len(),
            "loaded topology config"
        );
        Ok(config)
    }

    /// Serialize the tables back to TOML.
    pub fn to_toml_string(&self) -> Result<String, toml::ser::Error> {
        toml::to_string_pretty(self)
    }

    /// Check the invariants the generator relies on.
    ///
    /// Candidate thresholds must be non-decreasing so that nodes only ever
    /// appear as complexity rises.
    pub fn validate(&self) -> Result<(), TopologyConfigError> {
        if self.base_node_count > self.max_node_count {
            return Err(TopologyConfigError::EmptyRange {
                min: self.base_node_count,
                max: self.max_node_count,
            });
        }

        let mut seen = HashSet::new();
        seen.insert(self.client.id.as_str());

        let mut previous = 0;
        for candidate in &self.candidates {
            if !seen.insert(candidate.node.id.as_str()) {
                return Err(TopologyConfigError::DuplicateNode(candidate.node.id.clone()));
            }
            if candidate.min_node_count < previous {
                return Err(TopologyConfigError::ThresholdOrder {
                    id: candidate.node.id.clone(),
                    threshold: candidate.min_node_count,
                });
            }
            previous = candidate.min_node_count;
        }

        for augmentation in &self.augmentations {
            if !seen.insert(augmentation.node.id.as_str()) {
                return Err(TopologyConfigError::DuplicateNode(augmentation.node.id.clone()));
            }
        }

        Ok(())
    }

    /// `floor(base + complexity × per_complexity)`, clamped to the configured range.
    pub fn node_count(&self, complexity: f64) -> u32 {
        let complexity = narrative_state::clamp_unit(complexity);
        let raw = (self.base_node_count as f64 + complexity * self.nodes_per_complexity).floor();
        (raw as u32).clamp(self.base_node_count, self.max_node_count)
    }
}

fn node(id: &str, label: &str, kind: NodeKind, layer: Layer, x: f64, y: f64) -> NodeSpec {
    NodeSpec {
        id: id.to_string(),
        label: label.to_string(),
        kind,
        layer,
        position: Position::new(x, y),
    }
}

fn edge(from: &str, to: &str, layer: Layer) -> EdgeSpec {
    EdgeSpec {
        from: from.to_string(),
        to: to.to_string(),
        layer,
    }
}

fn candidate(min_node_count: u32, node: NodeSpec, edge: EdgeSpec) -> CandidateSpec {
    CandidateSpec {
        min_node_count,
        node,
        edge,
    }
}

impl Default for TopologyConfig {
    fn default() -> Self {
        Self {
            base_node_count: 3,
            nodes_per_complexity: 8.0,
            max_node_count: 11,
            mobile_client_label: "Mobile App".to_string(),
            client: node("client", "Client", NodeKind::Frontend, Layer::Ui, 100.0, 300.0),
            candidates: vec![
                candidate(
                    2,
                    node("gateway", "Gateway", NodeKind::Gateway, Layer::Api, 300.0, 300.0),
                    edge("client", "gateway", Layer::Api),
                ),
                candidate(
                    3,
                    node("api", "API", NodeKind::Api, Layer::Api, 500.0, 200.0),
                    edge("gateway", "api", Layer::Api),
                ),
                candidate(
                    4,
                    node("service", "Service", NodeKind::Service, Layer::Api, 700.0, 200.0),
                    edge("api", "service", Layer::Api),
                ),
                candidate(
                    5,
                    node("db", "Database", NodeKind::Database, Layer::Data, 700.0, 400.0),
                    edge("service", "db", Layer::Data),
                ),
                candidate(
                    6,
                    node("cache", "Cache", NodeKind::Cache, Layer::Data, 500.0, 400.0),
                    edge("service", "cache", Layer::Data),
                ),
                candidate(
                    7,
                    node("queue", "Queue", NodeKind::Queue, Layer::Infra, 300.0, 500.0),
                    edge("service", "queue", Layer::Infra),
                ),
                candidate(
                    8,
                    node("worker", "Worker", NodeKind::Backend, Layer::Infra, 100.0, 500.0),
                    edge("queue", "worker", Layer::Infra),
                ),
                candidate(
                    9,
                    node("auth", "Auth", NodeKind::Service, Layer::Api, 500.0, 100.0),
                    edge("gateway", "auth", Layer::Api),
                ),
                candidate(
                    10,
                    node("cdn", "CDN", NodeKind::Gateway, Layer::Infra, 50.0, 100.0),
                    edge("cdn", "client", Layer::Ui),
                ),
                candidate(
                    11,
                    node("monitor", "Monitor", NodeKind::Service, Layer::Infra, 900.0, 300.0),
                    edge("service", "monitor", Layer::Infra),
                ),
            ],
            augmentations: vec![
                AugmentationSpec {
                    domain: Domain::Ai,
                    min_node_count: 6,
                    node: node("ai-service", "AI Service", NodeKind::Service, Layer::Api, 900.0, 200.0),
                    edge: edge("service", "ai-service", Layer::Api),
                },
                AugmentationSpec {
                    domain: Domain::Migration,
                    min_node_count: 5,
                    node: node("legacy", "Legacy", NodeKind::Database, Layer::Data, 900.0, 500.0),
                    edge: edge("service", "legacy", Layer::Data),
                },
            ],
        }
    }
}
