//! Backend services.

pub mod gemini;
pub mod metadata;

pub use gemini::{GeminiClient, GeminiConfig, GeminiError, GeminiResult};
pub use metadata::MockMetadataProvider;
