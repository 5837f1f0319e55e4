//! Canvas snapshots - the system visualization for a described narrative state.

use axum::extract::{Query, State};
use axum::Json;
use narrative_state::{Domain, Layer, MotionPreference, NarrativeStore, Section, Stage, Theme};
use serde::Deserialize;
use system_canvas::CanvasSnapshot;

use crate::error::ApiResult;
use crate::AppState;

#[derive(Debug, Default, Deserialize)]
pub struct CanvasQuery {
    pub scroll: Option<f64>,
    pub domain: Option<String>,
    pub stage: Option<String>,
    pub focus: Option<String>,
    pub section: Option<String>,
    /// Node to highlight.
    pub active: Option<String>,
    #[serde(default)]
    pub reduced_motion: bool,
    pub theme: Option<Theme>,
}

fn parse<T>(value: Option<&str>) -> ApiResult<Option<T>>
where
    T: std::str::FromStr<Err = narrative_state::ParseEnumError>,
{
    Ok(value.map(str::parse).transpose()?)
}

/// Replay the query through a fresh store, then run the canvas pipeline.
///
/// Scroll is applied first so an explicit stage pins over the scroll-derived one.
pub async fn canvas_snapshot(
    State(state): State<AppState>,
    Query(query): Query<CanvasQuery>,
) -> ApiResult<Json<CanvasSnapshot>> {
    let mut store = NarrativeStore::new();

    if let Some(scroll) = query.scroll {
        store.set_scroll_progress(scroll);
    }
    if let Some(domain) = parse::<Domain>(query.domain.as_deref())? {
        store.set_domain(Some(domain));
    }
    if let Some(stage) = parse::<Stage>(query.stage.as_deref())? {
        store.set_stage(Some(stage));
    }
    store.set_focus_layer(parse::<Layer>(query.focus.as_deref())?);
    store.set_active_section(parse::<Section>(query.section.as_deref())?);

    let motion = MotionPreference {
        reduced_motion: query.reduced_motion,
        theme: query.theme.unwrap_or_default(),
    };
    let snapshot = CanvasSnapshot::from_state(&store.effective(), &state.topology, query.active.as_deref())
        .with_motion(motion);
    Ok(Json(snapshot))
}
