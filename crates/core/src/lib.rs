//! promptsync core library
//!
//! This crate provides the foundational utilities shared by every promptsync
//! crate:
//! - Error handling (`AppError`, `AppResult`)
//! - Logging infrastructure
//! - Configuration management (credentials, hub endpoint, workflow settings)

pub mod config;
pub mod error;
pub mod logging;

// Re-export commonly used types
pub use config::{AppConfig, PullSettings, PushSettings};
pub use error::{AppError, AppResult};
