//! Input checks for URLs received from callers.
//!
//! URLs are untrusted and end up inside an AI prompt, so they are length
//! capped and stripped of control characters first. Whether a URL points
//! at a video platform is decided by the classifier, not here.

use univid_models::AnalysisRequest;

use crate::error::{ApiError, ApiResult};

/// Maximum URL length to prevent DoS attacks.
pub const MAX_URL_LENGTH: usize = 2048;

/// Return the trimmed URL, or a 400 carrying `missing_message` when blank.
pub fn require_url<'a>(request: &'a AnalysisRequest, missing_message: &str) -> ApiResult<&'a str> {
    if request.validate().is_err() {
        return Err(ApiError::bad_request(missing_message));
    }

    let url = request.url.trim();
    if url.len() > MAX_URL_LENGTH {
        return Err(ApiError::bad_request(format!(
            "URL exceeds maximum length of {} characters",
            MAX_URL_LENGTH
        )));
    }

    Ok(url)
}

/// Sanitize user input before embedding it in a prompt.
pub fn sanitize_string(input: &str) -> String {
    input
        .chars()
        .filter(|c| !c.is_control())
        .collect::<String>()
        .trim()
        .to_string()
}
