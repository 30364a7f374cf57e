//! Combined classify-then-describe handler.

use axum::extract::State;
use axum::Json;
use univid_models::{AnalysisRequest, VideoRecord};

use crate::error::ApiResult;
use crate::extract::ApiJson;
use crate::handlers::platform::URL_REQUIRED;
use crate::metrics;
use crate::security::require_url;
use crate::state::AppState;

/// `POST /api/analyze`
///
/// Runs both steps server-side in fallback mode, so collaborator failures
/// come back as placeholder records rather than errors.
pub async fn analyze(
    State(state): State<AppState>,
    ApiJson(request): ApiJson<AnalysisRequest>,
) -> ApiResult<Json<VideoRecord>> {
    let url = require_url(&request, URL_REQUIRED)?;
    let analyzer = state.analyzer()?;

    let record = analyzer
        .analyze(url)
        .await
        .map_err(|e| state.internal_error(e))?;

    metrics::record_analysis(if record.is_displayable() {
        "recognized"
    } else {
        "unrecognized"
    });

    Ok(Json(record))
}
