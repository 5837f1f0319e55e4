//! Media lookup for the decorative background components.

use axum::extract::{Path, Query, State};
use axum::Json;
use narrative_state::{Domain, Stage};
use serde::Deserialize;

use crate::error::{ApiError, ApiResult};
use crate::media::{intent_for_state, MediaAsset, MediaIntent};
use crate::AppState;

pub async fn media_for_intent(
    State(state): State<AppState>,
    Path(intent): Path<String>,
) -> ApiResult<Json<MediaAsset>> {
    let intent: MediaIntent = intent.parse().map_err(ApiError::NotFound)?;
    Ok(Json(state.media.get_or_discover(intent).await))
}

#[derive(Debug, Deserialize)]
pub struct MediaStateQuery {
    pub domain: Option<String>,
    pub stage: Option<String>,
}

/// Media matching the visitor's selection; domain takes precedence over stage.
pub async fn media_for_state(
    State(state): State<AppState>,
    Query(query): Query<MediaStateQuery>,
) -> ApiResult<Json<MediaAsset>> {
    let domain = query.domain.as_deref().map(str::parse::<Domain>).transpose()?;
    let stage = query.stage.as_deref().map(str::parse::<Stage>).transpose()?;

    let intent = intent_for_state(domain, stage)
        .ok_or_else(|| ApiError::NotFound("no media for an empty selection".to_string()))?;
    Ok(Json(state.media.get_or_discover(intent).await))
}
