//! Media discovery - turns an intent and keyword hints into a concrete asset.
//!
//! Images come from the Unsplash featured endpoint, which needs no key.
//! Videos come from a Pexels search when an API key is configured. Any
//! upstream failure falls back to a curated table of copyright-free media, so
//! discovery itself never fails.

use serde::Deserialize;
use std::time::Duration;
use thiserror::Error;
use tracing::{debug, warn};

use super::{config_for_intent, MediaAsset, MediaIntent, MediaType};

const DEFAULT_WIDTH: u32 = 1920;
const DEFAULT_HEIGHT: u32 = 1080;
const PEXELS_VIDEO_SEARCH: &str = "https://api.pexels.com/videos/search";
const DEFAULT_VIDEO: &str = "https://videos.pexels.com/video-files/3045163/3045163-hd_1920_1080_30fps.mp4";

#[derive(Debug, Error)]
pub enum DiscoveryError {
    #[error("upstream request failed: {0}")]
    Http(#[from] reqwest::Error),

    #[error("upstream returned no results for `{0}`")]
    NoResults(String),
}

#[derive(Debug, Deserialize)]
struct PexelsSearch {
    #[serde(default)]
    videos: Vec<PexelsVideo>,
}

#[derive(Debug, Deserialize)]
struct PexelsVideo {
    image: Option<String>,
    width: Option<u32>,
    height: Option<u32>,
    #[serde(default)]
    video_files: Vec<PexelsVideoFile>,
}

#[derive(Debug, Deserialize)]
struct PexelsVideoFile {
    quality: Option<String>,
    link: String,
}

/// Stateless lookup of media assets.
#[derive(Debug, Clone)]
pub struct MediaDiscovery {
    client: reqwest::Client,
    pexels_api_key: Option<String>,
    pexels_endpoint: String,
}

impl MediaDiscovery {
    pub fn new(pexels_api_key: Option<String>) -> Self {
        let client = reqwest::Client::builder()
            .timeout(Duration::from_secs(10))
            .build()
            .unwrap_or_default();

        Self {
            client,
            pexels_api_key: pexels_api_key.filter(|key| !key.trim().is_empty()),
            pexels_endpoint: PEXELS_VIDEO_SEARCH.to_string(),
        }
    }

    /// Point video search at a different endpoint.
    pub fn with_pexels_endpoint(mut self, endpoint: impl Into<String>) -> Self {
        self.pexels_endpoint = endpoint.into();
        self
    }

    pub fn has_video_search(&self) -> bool {
        self.pexels_api_key.is_some()
    }

    /// Discover media for an intent using its catalogue declaration.
    ///
    /// Intents without a declaration resolve to their curated image.
    pub async fn discover_intent(&self, intent: MediaIntent) -> MediaAsset {
        match config_for_intent(intent) {
            Some(config) => self.discover(intent, config.keywords, config.media_type).await,
            None => curated_media(intent, MediaType::Image, &[]),
        }
    }

    /// Discover media for an intent with explicit keyword hints.
    pub async fn discover(&self, intent: MediaIntent, keywords: &[&str], media_type: MediaType) -> MediaAsset {
        match media_type {
            MediaType::Image => unsplash_image(intent, keywords),
            MediaType::Video => self.discover_video(intent, keywords).await,
        }
    }

    async fn discover_video(&self, intent: MediaIntent, keywords: &[&str]) -> MediaAsset {
        let Some(api_key) = self.pexels_api_key.as_deref() else {
            return curated_video(intent);
        };

        let query = primary_keyword(intent, keywords);
        match self.search_pexels(api_key, query, intent).await {
            Ok(asset) => {
                debug!(%intent, url = %asset.url, "discovered video");
                asset
            }
            Err(DiscoveryError::NoResults(query)) => {
                debug!(%intent, %query, "no video results, using curated video");
                curated_video(intent)
            }
            Err(e) => {
                warn!(%intent, error = %e, "video discovery failed, using curated media");
                curated_media(intent, MediaType::Video, keywords)
            }
        }
    }

    async fn search_pexels(
        &self,
        api_key: &str,
        query: &str,
        intent: MediaIntent,
    ) -> Result<MediaAsset, DiscoveryError> {
        let search: PexelsSearch = self
            .client
            .get(&self.pexels_endpoint)
            .header("Authorization", api_key)
            .query(&[("query", query), ("per_page", "1")])
            .send()
            .await?
            .error_for_status()?
            .json()
            .await?;

        let video = search
            .videos
            .into_iter()
            .next()
            .ok_or_else(|| DiscoveryError::NoResults(query.to_string()))?;

        let file = video
            .video_files
            .iter()
            .find(|f| f.quality.as_deref() == Some("hd"))
            .or_else(|| video.video_files.first())
            .ok_or_else(|| DiscoveryError::NoResults(query.to_string()))?;

        Ok(MediaAsset {
            url: file.link.clone(),
            media_type: MediaType::Video,
            thumbnail: video.image.clone(),
            alt: intent.alt_text().to_string(),
            width: video.width,
            height: video.height,
        })
    }
}

impl Default for MediaDiscovery {
    fn default() -> Self {
        Self::new(None)
    }
}

fn primary_keyword<'a>(intent: MediaIntent, keywords: &[&'a str]) -> &'a str {
    keywords.first().copied().unwrap_or(intent.as_str())
}

fn unsplash_featured(keyword: &str) -> String {
    format!(
        "https://source.unsplash.com/featured/{}x{}/?{}",
        DEFAULT_WIDTH,
        DEFAULT_HEIGHT,
        urlencoding::encode(keyword)
    )
}

fn sized_asset(url: impl Into<String>, media_type: MediaType, intent: MediaIntent) -> MediaAsset {
    MediaAsset {
        url: url.into(),
        media_type,
        thumbnail: None,
        alt: intent.alt_text().to_string(),
        width: Some(DEFAULT_WIDTH),
        height: Some(DEFAULT_HEIGHT),
    }
}

/// Featured Unsplash image for the first keyword, biased towards technology.
pub fn unsplash_image(intent: MediaIntent, keywords: &[&str]) -> MediaAsset {
    let url = format!("{}&technology", unsplash_featured(primary_keyword(intent, keywords)));
    sized_asset(url, MediaType::Image, intent)
}

fn curated_urls(intent: MediaIntent) -> (Option<&'static str>, Option<&'static str>) {
    const ABSTRACT: &str = "https://images.unsplash.com/photo-1451187580459-43490279c0fa?w=1920&q=80";

    match intent {
        MediaIntent::HeroAbstractTech => (Some(ABSTRACT), Some(DEFAULT_VIDEO)),
        MediaIntent::WebDevelopment => (
            Some("https://images.unsplash.com/photo-1461749280684-dccba630e2f6?w=1920&q=80"),
            None,
        ),
        MediaIntent::MobileDevelopment => (
            Some("https://images.unsplash.com/photo-1512941937669-90a1b58e7e9c?w=1920&q=80"),
            None,
        ),
        MediaIntent::AiAutomation => (
            Some("https://images.unsplash.com/photo-1485827404703-89b55fcc595e?w=1920&q=80"),
            None,
        ),
        MediaIntent::SystemMigration => (Some(ABSTRACT), None),
        MediaIntent::ProcessDiscovery => (
            Some("https://images.unsplash.com/photo-1522071820081-009f0129c71c?w=1920&q=80"),
            None,
        ),
        MediaIntent::ProcessDesign => (
            Some("https://images.unsplash.com/photo-1561070791-2526d30994b5?w=1920&q=80"),
            None,
        ),
        MediaIntent::ProcessDevelopment => (
            Some("https://images.unsplash.com/photo-1498050108023-c5249f4df085?w=1920&q=80"),
            None,
        ),
        MediaIntent::ProcessDeployment => (
            Some("https://images.unsplash.com/photo-1558494949-ef010cbdcc31?w=1920&q=80"),
            None,
        ),
        MediaIntent::TechStackBackground => (
            Some("https://images.unsplash.com/photo-1518770660439-4636190af475?w=1920&q=80"),
            Some(DEFAULT_VIDEO),
        ),
        MediaIntent::TechAbstract => (Some(ABSTRACT), None),
    }
}

/// Curated copyright-free media for an intent.
///
/// When the intent has no curated asset of the requested type the curated
/// image is returned instead.
pub fn curated_media(intent: MediaIntent, media_type: MediaType, keywords: &[&str]) -> MediaAsset {
    let (image, video) = curated_urls(intent);
    let wanted = match media_type {
        MediaType::Image => image,
        MediaType::Video => video,
    };

    match (wanted, image) {
        (Some(url), _) => sized_asset(url, media_type, intent),
        (None, Some(url)) => sized_asset(url, MediaType::Image, intent),
        (None, None) => sized_asset(
            unsplash_featured(primary_keyword(intent, keywords)),
            MediaType::Image,
            intent,
        ),
    }
}

/// Curated video for an intent, or the default technology loop.
pub fn curated_video(intent: MediaIntent) -> MediaAsset {
    let url = curated_urls(intent).1.unwrap_or(DEFAULT_VIDEO);
    sized_asset(url, MediaType::Video, intent)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_unsplash_image_uses_first_keyword() {
        let asset = unsplash_image(MediaIntent::WebDevelopment, &["web development", "react"]);
        assert_eq!(
            asset.url,
            "https://source.unsplash.com/featured/1920x1080/?web%20development&technology"
        );
        assert_eq!(asset.media_type, MediaType::Image);
        assert_eq!(asset.alt, "Web development and coding");
        assert_eq!(asset.width, Some(1920));
    }

    #[test]
    fn test_unsplash_image_without_keywords_uses_intent() {
        let asset = unsplash_image(MediaIntent::TechAbstract, &[]);
        assert!(asset.url.contains("?tech-abstract&technology"));
    }

    #[test]
    fn test_curated_media_prefers_requested_type() {
        let video = curated_media(MediaIntent::HeroAbstractTech, MediaType::Video, &[]);
        assert_eq!(video.media_type, MediaType::Video);
        assert_eq!(video.url, DEFAULT_VIDEO);

        // No curated video - fall back to the curated image
        let image = curated_media(MediaIntent::ProcessDesign, MediaType::Video, &[]);
        assert_eq!(image.media_type, MediaType::Image);
        assert!(image.url.contains("photo-1561070791"));
    }

    #[test]
    fn test_curated_video_default() {
        let asset = curated_video(MediaIntent::AiAutomation);
        assert_eq!(asset.url, DEFAULT_VIDEO);
        assert_eq!(asset.media_type, MediaType::Video);
        assert_eq!(asset.alt, "Artificial intelligence and automation");
    }

    #[tokio::test]
    async fn test_video_without_key_is_curated() {
        let discovery = MediaDiscovery::new(Some("   ".to_string()));
        assert!(!discovery.has_video_search());

        let asset = discovery.discover_intent(MediaIntent::HeroAbstractTech).await;
        assert_eq!(asset, curated_video(MediaIntent::HeroAbstractTech));
    }

    #[tokio::test]
    async fn test_unreachable_upstream_falls_back() {
        let discovery = MediaDiscovery::new(Some("test-key".to_string()))
            .with_pexels_endpoint("http://127.0.0.1:9/videos/search");

        let asset = discovery.discover_intent(MediaIntent::TechStackBackground).await;
        assert_eq!(
            asset,
            curated_media(MediaIntent::TechStackBackground, MediaType::Video, &[])
        );
    }

    #[tokio::test]
    async fn test_fallback_only_intent() {
        let asset = MediaDiscovery::default()
            .discover_intent(MediaIntent::TechAbstract)
            .await;
        assert_eq!(asset.media_type, MediaType::Image);
        assert_eq!(asset.alt, "Abstract technology background");
    }
}
