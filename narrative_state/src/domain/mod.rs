//! Narrative vocabulary: service domains, lifecycle stages, system layers and page sections.

use serde::{Deserialize, Serialize};
use std::str::FromStr;
use thiserror::Error;

/// Error returned when a wire name does not match any variant.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("unknown {kind} `{value}`")]
pub struct ParseEnumError {
    pub kind: &'static str,
    pub value: String,
}

impl ParseEnumError {
    fn new(kind: &'static str, value: &str) -> Self {
        Self {
            kind,
            value: value.to_string(),
        }
    }
}

/// Service track a visitor is exploring.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Domain {
    Web,
    Mobile,
    Ai,
    Migration,
}

impl Domain {
    pub const ALL: [Domain; 4] = [Domain::Web, Domain::Mobile, Domain::Ai, Domain::Migration];

    /// Wire name used by the page and the HTTP boundary.
    pub fn as_str(&self) -> &'static str {
        match self {
            Domain::Web => "web",
            Domain::Mobile => "mobile",
            Domain::Ai => "ai",
            Domain::Migration => "migration",
        }
    }

    /// Architecture level implied by selecting this domain, if any.
    pub fn architecture_level(&self) -> Option<ArchitectureLevel> {
        match self {
            Domain::Ai => Some(ArchitectureLevel::Complex),
            Domain::Migration => Some(ArchitectureLevel::Moderate),
            Domain::Web | Domain::Mobile => None,
        }
    }
}

/// Lifecycle phase of the illustrated engineering process.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Stage {
    Discovery,
    Design,
    Build,
    Deploy,
}

impl Stage {
    /// Stages in lifecycle order. Scroll buckets map onto this list.
    pub const ORDERED: [Stage; 4] = [Stage::Discovery, Stage::Design, Stage::Build, Stage::Deploy];

    pub fn as_str(&self) -> &'static str {
        match self {
            Stage::Discovery => "discovery",
            Stage::Design => "design",
            Stage::Build => "build",
            Stage::Deploy => "deploy",
        }
    }

    /// Position in [`Stage::ORDERED`].
    pub fn index(&self) -> usize {
        match self {
            Stage::Discovery => 0,
            Stage::Design => 1,
            Stage::Build => 2,
            Stage::Deploy => 3,
        }
    }

    /// Bucket a scroll position into one of four equal ranges.
    ///
    /// Progress is clamped to `[0, 1]`; a full scroll lands in the last bucket.
    pub fn from_scroll(progress: f64) -> Stage {
        let progress = clamp_unit(progress);
        let len = Self::ORDERED.len();
        let index = ((progress * len as f64).floor() as usize).min(len - 1);
        Self::ORDERED[index]
    }

    /// Architecture level implied by reaching this stage, if any.
    pub fn architecture_level(&self) -> Option<ArchitectureLevel> {
        match self {
            Stage::Discovery => Some(ArchitectureLevel::Simple),
            Stage::Deploy => Some(ArchitectureLevel::Complex),
            Stage::Design | Stage::Build => None,
        }
    }
}

/// Complexity of the illustrated system.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum ArchitectureLevel {
    #[default]
    Simple,
    Moderate,
    Complex,
}

impl ArchitectureLevel {
    pub fn as_str(&self) -> &'static str {
        match self {
            ArchitectureLevel::Simple => "simple",
            ArchitectureLevel::Moderate => "moderate",
            ArchitectureLevel::Complex => "complex",
        }
    }
}

/// Conceptual system stratum used for progressive reveal and focus isolation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Layer {
    Ui,
    Api,
    Data,
    Infra,
}

impl Layer {
    /// Reveal order, shallowest first.
    pub const ORDERED: [Layer; 4] = [Layer::Ui, Layer::Api, Layer::Data, Layer::Infra];

    pub fn as_str(&self) -> &'static str {
        match self {
            Layer::Ui => "ui",
            Layer::Api => "api",
            Layer::Data => "data",
            Layer::Infra => "infra",
        }
    }

    pub fn index(&self) -> usize {
        match self {
            Layer::Ui => 0,
            Layer::Api => 1,
            Layer::Data => 2,
            Layer::Infra => 3,
        }
    }
}

/// Page section that can own the shared visualization.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum Section {
    Hero,
    Services,
    HowWeBuild,
    Process,
    Technology,
}

impl Section {
    pub fn as_str(&self) -> &'static str {
        match self {
            Section::Hero => "hero",
            Section::Services => "services",
            Section::HowWeBuild => "how-we-build",
            Section::Process => "process",
            Section::Technology => "technology",
        }
    }
}

macro_rules! wire_names {
    ($ty:ty, $kind:literal, [$($variant:expr),+ $(,)?]) => {
        impl FromStr for $ty {
            type Err = ParseEnumError;

            fn from_str(s: &str) -> Result<Self, Self::Err> {
                let needle = s.trim();
                [$($variant),+]
                    .into_iter()
                    .find(|v| v.as_str().eq_ignore_ascii_case(needle))
                    .ok_or_else(|| ParseEnumError::new($kind, s))
            }
        }

        impl std::fmt::Display for $ty {
            fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
                f.write_str(self.as_str())
            }
        }
    };
}

wire_names!(Domain, "domain", [Domain::Web, Domain::Mobile, Domain::Ai, Domain::Migration]);
wire_names!(Stage, "stage", [Stage::Discovery, Stage::Design, Stage::Build, Stage::Deploy]);
wire_names!(
    ArchitectureLevel,
    "architecture level",
    [ArchitectureLevel::Simple, ArchitectureLevel::Moderate, ArchitectureLevel::Complex]
);
wire_names!(Layer, "layer", [Layer::Ui, Layer::Api, Layer::Data, Layer::Infra]);
wire_names!(
    Section,
    "section",
    [
        Section::Hero,
        Section::Services,
        Section::HowWeBuild,
        Section::Process,
        Section::Technology,
    ]
);

/// Clamp to `[0, 1]`, mapping NaN to 0.
pub fn clamp_unit(value: f64) -> f64 {
    if value.is_nan() {
        0.0
    } else {
        value.clamp(0.0, 1.0)
    }
}
