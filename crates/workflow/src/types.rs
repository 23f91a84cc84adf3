//! Workflow outcome types.

use promptsync_hub::{PromptIdentifier, PushReceipt};
use promptsync_prompt::{ContentReport, PromptFile};
use std::path::PathBuf;

/// Result of a successful pull.
#[derive(Debug, Clone)]
pub struct PullOutcome {
    /// Remote prompt that was fetched
    pub source: PromptIdentifier,

    /// File contents written to every output
    pub file: PromptFile,

    /// Output paths, in write order
    pub written: Vec<PathBuf>,
}

/// Result of a successful push.
#[derive(Debug, Clone)]
pub struct PushOutcome {
    /// Destination on the hub
    pub destination: PromptIdentifier,

    pub is_public: bool,

    pub receipt: PushReceipt,
}

/// Content rubric result for one record.
#[derive(Debug, Clone)]
pub struct CheckResult {
    pub path: PathBuf,
    pub key: String,
    pub report: ContentReport,
}

impl CheckResult {
    pub fn is_valid(&self) -> bool {
        self.report.is_valid()
    }
}
