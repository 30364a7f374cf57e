//! Shared data models for UniVideo.
//!
//! This crate provides Serde-serializable types for:
//! - Platform classification verdicts
//! - Video display records and their placeholder variants
//! - API request and error envelopes

pub mod error;
pub mod platform;
pub mod request;
pub mod video;

// Re-export common types
pub use error::{ModelError, ModelResult};
pub use platform::{Platform, PlatformJudgment};
pub use request::{AnalysisRequest, ErrorBody};
pub use video::{VideoRecord, DOWNLOAD_PLACEHOLDER};
