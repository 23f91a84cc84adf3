//! Prompt hub client abstraction and push request/receipt types.

use crate::error::HubResult;
use crate::types::{ChatTemplate, PromptIdentifier, RemotePrompt};

/// Everything needed to publish a chat template to the hub.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PushRequest {
    /// Destination (`owner/name` for public pushes, bare `name` otherwise)
    pub identifier: PromptIdentifier,

    /// Template to commit
    pub template: ChatTemplate,

    /// Visibility applied when the hub repository is created
    pub is_public: bool,

    /// Description applied when the hub repository is created
    pub description: String,

    /// Tags applied when the hub repository is created
    pub tags: Vec<String>,
}

/// Result of a successful push.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PushReceipt {
    /// Commit created (or already current) on the hub
    pub commit_hash: Option<String>,

    /// Web page of the prompt
    pub url: String,
}

/// Trait for prompt hub backends.
///
/// Implementations perform exactly one attempt per call; callers decide how
/// to report failures.
#[async_trait::async_trait]
pub trait PromptHub: Send + Sync {
    /// Backend name, for logs.
    fn provider_name(&self) -> &str;

    /// Fetch a prompt by identifier (latest commit unless one is given).
    async fn pull(&self, identifier: &PromptIdentifier) -> HubResult<RemotePrompt>;

    /// Publish a chat template as a new commit.
    async fn push(&self, request: &PushRequest) -> HubResult<PushReceipt>;
}
