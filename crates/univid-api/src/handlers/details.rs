//! Video details handler.

use axum::extract::State;
use axum::Json;
use univid_models::{AnalysisRequest, VideoRecord};

use crate::error::ApiResult;
use crate::extract::ApiJson;
use crate::security::require_url;
use crate::state::AppState;

pub const VIDEO_URL_REQUIRED: &str = "Video URL is required.";

/// `POST /api/video-details`
pub async fn video_details(
    State(state): State<AppState>,
    ApiJson(request): ApiJson<AnalysisRequest>,
) -> ApiResult<Json<VideoRecord>> {
    let url = require_url(&request, VIDEO_URL_REQUIRED)?;

    let record = state
        .metadata
        .fetch_details(url)
        .await
        .map_err(|e| state.internal_error(format!("Failed to fetch video details: {}", e)))?;

    Ok(Json(record))
}
