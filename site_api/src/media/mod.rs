//! Media catalogue - which stock media each section wants, keyed by intent.
//!
//! Sections never hardcode URLs; they declare an intent plus keyword hints and
//! the discovery layer turns that into an asset.

mod cache;
mod discovery;

pub use cache::*;
pub use discovery::*;

use narrative_state::{Domain, Section, Stage};
use serde::{Deserialize, Serialize};
use std::str::FromStr;

/// What a piece of background media is meant to convey.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum MediaIntent {
    HeroAbstractTech,
    WebDevelopment,
    MobileDevelopment,
    AiAutomation,
    SystemMigration,
    ProcessDiscovery,
    ProcessDesign,
    ProcessDevelopment,
    ProcessDeployment,
    TechStackBackground,
    TechAbstract,
}

impl MediaIntent {
    pub const ALL: [MediaIntent; 11] = [
        MediaIntent::HeroAbstractTech,
        MediaIntent::WebDevelopment,
        MediaIntent::MobileDevelopment,
        MediaIntent::AiAutomation,
        MediaIntent::SystemMigration,
        MediaIntent::ProcessDiscovery,
        MediaIntent::ProcessDesign,
        MediaIntent::ProcessDevelopment,
        MediaIntent::ProcessDeployment,
        MediaIntent::TechStackBackground,
        MediaIntent::TechAbstract,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            MediaIntent::HeroAbstractTech => "hero-abstract-tech",
            MediaIntent::WebDevelopment => "web-development",
            MediaIntent::MobileDevelopment => "mobile-development",
            MediaIntent::AiAutomation => "ai-automation",
            MediaIntent::SystemMigration => "system-migration",
            MediaIntent::ProcessDiscovery => "process-discovery",
            MediaIntent::ProcessDesign => "process-design",
            MediaIntent::ProcessDevelopment => "process-development",
            MediaIntent::ProcessDeployment => "process-deployment",
            MediaIntent::TechStackBackground => "tech-stack-background",
            MediaIntent::TechAbstract => "tech-abstract",
        }
    }

    /// Accessible description of the intent.
    pub fn alt_text(&self) -> &'static str {
        match self {
            MediaIntent::HeroAbstractTech => "Abstract technology visualization",
            MediaIntent::WebDevelopment => "Web development and coding",
            MediaIntent::MobileDevelopment => "Mobile application development",
            MediaIntent::AiAutomation => "Artificial intelligence and automation",
            MediaIntent::SystemMigration => "System migration and cloud infrastructure",
            MediaIntent::ProcessDiscovery => "Discovery and planning phase",
            MediaIntent::ProcessDesign => "Design and prototyping phase",
            MediaIntent::ProcessDevelopment => "Development and coding phase",
            MediaIntent::ProcessDeployment => "Deployment and launch phase",
            MediaIntent::TechStackBackground => "Technology stack visualization",
            MediaIntent::TechAbstract => "Abstract technology background",
        }
    }
}

impl FromStr for MediaIntent {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|intent| intent.as_str() == s)
            .ok_or_else(|| format!("unknown media intent `{}`", s))
    }
}

impl std::fmt::Display for MediaIntent {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum MediaType {
    Image,
    Video,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum MediaPriority {
    High,
    Normal,
    Low,
}

/// Media requirements declared by a section.
#[derive(Debug, Clone, Serialize)]
pub struct MediaConfig {
    pub intent: MediaIntent,
    #[serde(rename = "type")]
    pub media_type: MediaType,
    pub keywords: &'static [&'static str],
    pub fallback: Option<MediaIntent>,
    pub priority: MediaPriority,
    pub autoplay: bool,
    #[serde(rename = "loop")]
    pub looped: bool,
    pub muted: bool,
}

impl MediaConfig {
    const fn image(intent: MediaIntent, keywords: &'static [&'static str], priority: MediaPriority) -> Self {
        Self {
            intent,
            media_type: MediaType::Image,
            keywords,
            fallback: None,
            priority,
            autoplay: false,
            looped: false,
            muted: false,
        }
    }

    const fn ambient_video(intent: MediaIntent, keywords: &'static [&'static str], priority: MediaPriority) -> Self {
        Self {
            intent,
            media_type: MediaType::Video,
            keywords,
            fallback: Some(MediaIntent::TechAbstract),
            priority,
            autoplay: true,
            looped: true,
            muted: true,
        }
    }
}

static HERO_MEDIA: [MediaConfig; 1] = [MediaConfig::ambient_video(
    MediaIntent::HeroAbstractTech,
    &["abstract technology", "code visualization", "data flow", "digital transformation"],
    MediaPriority::High,
)];

static SERVICES_MEDIA: [MediaConfig; 4] = [
    MediaConfig::image(
        MediaIntent::WebDevelopment,
        &["web development", "code editor", "react", "next.js", "typescript"],
        MediaPriority::Normal,
    ),
    MediaConfig::image(
        MediaIntent::MobileDevelopment,
        &["mobile app", "ios android", "react native", "mobile interface"],
        MediaPriority::Normal,
    ),
    MediaConfig::image(
        MediaIntent::AiAutomation,
        &["artificial intelligence", "machine learning", "neural network", "automation"],
        MediaPriority::Normal,
    ),
    MediaConfig::image(
        MediaIntent::SystemMigration,
        &["cloud migration", "system architecture", "devops", "infrastructure"],
        MediaPriority::Normal,
    ),
];

static PROCESS_MEDIA: [MediaConfig; 4] = [
    MediaConfig::image(
        MediaIntent::ProcessDiscovery,
        &["discovery", "planning", "whiteboard", "strategy"],
        MediaPriority::Low,
    ),
    MediaConfig::image(
        MediaIntent::ProcessDesign,
        &["design", "wireframe", "ui ux", "prototype"],
        MediaPriority::Low,
    ),
    MediaConfig::image(
        MediaIntent::ProcessDevelopment,
        &["development", "coding", "programming", "software engineering"],
        MediaPriority::Low,
    ),
    MediaConfig::image(
        MediaIntent::ProcessDeployment,
        &["deployment", "cloud", "server", "launch"],
        MediaPriority::Low,
    ),
];

static TECHNOLOGY_MEDIA: [MediaConfig; 1] = [MediaConfig::ambient_video(
    MediaIntent::TechStackBackground,
    &["technology", "code", "abstract", "digital"],
    MediaPriority::Normal,
)];

/// Media declared by a section, in display order.
pub fn media_for_section(section: Section) -> &'static [MediaConfig] {
    match section {
        Section::Hero => &HERO_MEDIA,
        Section::Services => &SERVICES_MEDIA,
        Section::Process => &PROCESS_MEDIA,
        Section::Technology => &TECHNOLOGY_MEDIA,
        Section::HowWeBuild => &[],
    }
}

/// Find the declaration for an intent across all sections.
///
/// Fallback-only intents such as `tech-abstract` have no declaration.
pub fn config_for_intent(intent: MediaIntent) -> Option<&'static MediaConfig> {
    [
        Section::Hero,
        Section::Services,
        Section::HowWeBuild,
        Section::Process,
        Section::Technology,
    ]
    .into_iter()
    .flat_map(media_for_section)
    .find(|config| config.intent == intent)
}

/// Media intent for the visitor's current selection; domain wins over stage.
pub fn intent_for_state(domain: Option<Domain>, stage: Option<Stage>) -> Option<MediaIntent> {
    if let Some(domain) = domain {
        return Some(match domain {
            Domain::Web => MediaIntent::WebDevelopment,
            Domain::Mobile => MediaIntent::MobileDevelopment,
            Domain::Ai => MediaIntent::AiAutomation,
            Domain::Migration => MediaIntent::SystemMigration,
        });
    }

    stage.map(|stage| match stage {
        Stage::Discovery => MediaIntent::ProcessDiscovery,
        Stage::Design => MediaIntent::ProcessDesign,
        Stage::Build => MediaIntent::ProcessDevelopment,
        Stage::Deploy => MediaIntent::ProcessDeployment,
    })
}

/// An asset ready to be placed on the page.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MediaAsset {
    pub url: String,
    #[serde(rename = "type")]
    pub media_type: MediaType,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub thumbnail: Option<String>,
    pub alt: String,
    pub width: Option<u32>,
    pub height: Option<u32>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_intent_wire_names() {
        for intent in MediaIntent::ALL {
            let json = serde_json::to_string(&intent).unwrap();
            assert_eq!(json, format!("\"{}\"", intent.as_str()));
            assert_eq!(intent.as_str().parse::<MediaIntent>().unwrap(), intent);
        }
        assert!("sunset".parse::<MediaIntent>().is_err());
    }

    #[test]
    fn test_section_catalogue() {
        assert_eq!(media_for_section(Section::Services).len(), 4);
        assert!(media_for_section(Section::HowWeBuild).is_empty());

        let hero = &media_for_section(Section::Hero)[0];
        assert_eq!(hero.media_type, MediaType::Video);
        assert!(hero.autoplay && hero.looped && hero.muted);
        assert_eq!(hero.fallback, Some(MediaIntent::TechAbstract));
    }

    #[test]
    fn test_config_for_intent() {
        let config = config_for_intent(MediaIntent::ProcessDesign).unwrap();
        assert_eq!(config.keywords[0], "design");
        assert_eq!(config.priority, MediaPriority::Low);
        assert!(config_for_intent(MediaIntent::TechAbstract).is_none());
    }

    #[test]
    fn test_intent_for_state() {
        assert_eq!(
            intent_for_state(Some(Domain::Ai), Some(Stage::Build)),
            Some(MediaIntent::AiAutomation)
        );
        assert_eq!(
            intent_for_state(None, Some(Stage::Build)),
            Some(MediaIntent::ProcessDevelopment)
        );
        assert_eq!(intent_for_state(None, None), None);
    }
}
