//! Contact form intake. Submissions are acknowledged and logged, nothing is stored.

use axum::body::Bytes;
use axum::Json;
use serde_json::{json, Value};
use tracing::{info, warn};
use uuid::Uuid;

use crate::error::{ApiError, ApiResult};

pub const ACKNOWLEDGEMENT: &str = "Contact form submission received";
pub const FAILURE: &str = "Failed to process contact form";

/// Accept any JSON document; a body that does not parse is a 500.
pub async fn submit_contact(body: Bytes) -> ApiResult<Json<Value>> {
    let submission: Value = serde_json::from_slice(&body).map_err(|e| {
        warn!(error = %e, bytes = body.len(), "unparsable contact submission");
        ApiError::Internal(FAILURE.to_string())
    })?;

    let fields: Vec<&str> = submission
        .as_object()
        .map(|object| object.keys().map(String::as_str).collect())
        .unwrap_or_default();
    info!(submission_id = %Uuid::new_v4(), ?fields, "contact submission received");

    Ok(Json(json!({ "message": ACKNOWLEDGEMENT })))
}
