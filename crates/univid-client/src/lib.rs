//! Clients for the UniVideo analysis API.
//!
//! This crate provides:
//! - An HTTP client for the platform classifier and video details endpoints
//! - The two-step [`Analyzer`] with fallback or strict error handling
//! - [`AnalysisController`], the single in-flight caller used by front ends

pub mod analyzer;
pub mod client;
pub mod config;
pub mod controller;
pub mod display;
pub mod error;
pub mod traits;

pub use analyzer::{Analyzer, FailureMode};
pub use client::ApiClient;
pub use config::ApiClientConfig;
pub use controller::{AnalysisController, SubmitOutcome, ViewState};
pub use error::{ClientError, ClientResult};
pub use traits::{MetadataSource, PlatformClassifier};
