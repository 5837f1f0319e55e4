//! HTTP boundary for the studio site.
//!
//! Contact intake, media discovery and canvas snapshots behind one axum router.
//! Everything is request-scoped except the topology tables and the media cache.

pub mod config;
pub mod error;
pub mod handlers;
pub mod media;

use axum::routing::{get, post};
use axum::Router;
use std::sync::Arc;
use system_canvas::{TopologyConfig, TopologyConfigError};
use tower_http::trace::TraceLayer;
use tracing::info;

use crate::config::ServerConfig;
use crate::media::{MediaCache, MediaDiscovery};

/// Shared handler state.
#[derive(Debug, Clone)]
pub struct AppState {
    pub topology: Arc<TopologyConfig>,
    pub media: Arc<MediaCache>,
}

impl AppState {
    pub fn new(topology: TopologyConfig, media: MediaCache) -> Self {
        Self {
            topology: Arc::new(topology),
            media: Arc::new(media),
        }
    }

    /// Build state from server configuration, loading topology tables if a path is set.
    pub fn from_config(config: &ServerConfig) -> Result<Self, TopologyConfigError> {
        let topology = match &config.topology_path {
            Some(path) => {
                info!(path = %path.display(), "loading topology tables");
                TopologyConfig::from_path(path)?
            }
            None => TopologyConfig::default(),
        };

        let discovery = MediaDiscovery::new(config.pexels_api_key.clone());
        Ok(Self::new(topology, MediaCache::new(discovery)))
    }
}

impl Default for AppState {
    fn default() -> Self {
        Self::new(TopologyConfig::default(), MediaCache::default())
    }
}

pub fn router(state: AppState) -> Router {
    Router::new()
        .route("/health", get(handlers::health))
        .route("/api/contact", post(handlers::contact::submit_contact))
        .route("/api/media", get(handlers::media::media_for_state))
        .route("/api/media/{intent}", get(handlers::media::media_for_intent))
        .route("/api/canvas", get(handlers::canvas::canvas_snapshot))
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}
