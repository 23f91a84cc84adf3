//! Prompt hub client crate for promptsync.
//!
//! This crate provides a backend-agnostic interface for pulling and pushing
//! prompt templates, plus the LangSmith Prompt Hub implementation.
//!
//! # Example
//! ```no_run
//! use promptsync_hub::{LangSmithClient, PromptHub, PromptIdentifier};
//!
//! # async fn example() -> Result<(), Box<dyn std::error::Error>> {
//! let client = LangSmithClient::new("lsv2_pt_...");
//! let id = PromptIdentifier::parse("leonanluppi/bug_to_user_story_v1")?;
//! let prompt = client.pull(&id).await?;
//! println!("{:?}", prompt);
//! # Ok(())
//! # }
//! ```

pub mod client;
pub mod error;
pub mod factory;
pub mod manifest;
pub mod providers;
pub mod types;

// Re-export main types
pub use client::{PromptHub, PushReceipt, PushRequest};
pub use error::{HubError, HubResult};
pub use factory::create_hub;
pub use providers::{LangSmithClient, MemoryHub};
pub use types::{ChatTemplate, MessageRole, PromptIdentifier, PromptMessage, RemotePrompt};
