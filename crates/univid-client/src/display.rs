//! Plain-text rendering of analysis results.

use std::fmt::Write;

use univid_models::VideoRecord;

/// Render a result card for a terminal.
pub fn render_card(record: &VideoRecord) -> String {
    let mut out = String::new();
    let _ = writeln!(out, "Platform:  {}", record.platform);
    let _ = writeln!(out, "Title:     {}", record.title);
    let _ = writeln!(out, "Thumbnail: {}", record.thumbnail_url);
    match record.download_url.as_deref() {
        Some(link) if record.has_download_link() => {
            let _ = writeln!(out, "Download:  {}", link);
        }
        _ => {
            let _ = writeln!(out, "Download:  no direct link available");
        }
    }
    let _ = writeln!(out);
    let _ = write!(out, "{}", record.description);
    out
}
