//! Request handlers.

pub mod analyze;
pub mod details;
pub mod health;
pub mod platform;

pub use analyze::*;
pub use details::*;
pub use health::*;
pub use platform::*;
