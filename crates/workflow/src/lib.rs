//! Pull, push and check workflows for promptsync.
//!
//! Each workflow is a free function over a [`promptsync_hub::PromptHub`] and
//! the loaded settings, so the CLI stays a thin presentation layer and tests
//! can run against [`promptsync_hub::MemoryHub`].

pub mod check;
pub mod pull;
pub mod push;
pub mod types;

// Re-export main types
pub use check::{check_all, check_record};
pub use pull::pull;
pub use push::{execute_push, load_for_push, plan_push, push};
pub use types::{CheckResult, PullOutcome, PushOutcome};
