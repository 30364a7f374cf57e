//! Platform classification handler.

use std::time::Instant;

use axum::extract::State;
use axum::Json;
use tracing::{error, info};
use univid_models::{AnalysisRequest, PlatformJudgment};

use crate::error::{ApiError, ApiResult};
use crate::extract::ApiJson;
use crate::metrics;
use crate::security::require_url;
use crate::state::AppState;

pub const URL_REQUIRED: &str = "URL is required.";

/// `POST /api/analyze-platform`
///
/// Returns the classifier's verdict as-is; an `Unknown` platform is a
/// successful response.
pub async fn analyze_platform(
    State(state): State<AppState>,
    ApiJson(request): ApiJson<AnalysisRequest>,
) -> ApiResult<Json<PlatformJudgment>> {
    let url = require_url(&request, URL_REQUIRED)?;
    let classifier = state.require_classifier()?;

    let start = Instant::now();
    let judgment = classifier.classify_platform(url).await.map_err(|e| {
        error!("Error calling Gemini API: {}", e);
        metrics::record_classification_failure();
        ApiError::AiService(e)
    })?;

    metrics::record_classification(
        judgment.platform.as_str(),
        judgment.is_valid,
        start.elapsed().as_secs_f64(),
    );
    info!(
        platform = %judgment.platform,
        is_valid = judgment.is_valid,
        "Classified URL"
    );

    Ok(Json(judgment))
}
