//! In-memory prompt hub.

use crate::client::{PromptHub, PushReceipt, PushRequest};
use crate::error::{HubError, HubResult};
use crate::types::{PromptIdentifier, RemotePrompt};
use std::collections::HashMap;
use std::sync::Mutex;

/// Hub backend that keeps prompts in memory.
///
/// Used by workflow tests and for dry runs: pushed templates become
/// pullable under their full name, and every push request is recorded.
#[derive(Debug, Default)]
pub struct MemoryHub {
    prompts: Mutex<HashMap<String, RemotePrompt>>,
    pushes: Mutex<Vec<PushRequest>>,
    failure: Option<String>,
}

impl MemoryHub {
    pub fn new() -> Self {
        Self::default()
    }

    /// Seed a prompt under `name` (`owner/name` or bare `name`).
    pub fn with_prompt(self, name: &str, prompt: RemotePrompt) -> Self {
        if let Ok(mut prompts) = self.prompts.lock() {
            prompts.insert(name.to_string(), prompt);
        }
        self
    }

    /// A hub on which every call fails with `message`.
    pub fn failing(message: impl Into<String>) -> Self {
        Self {
            failure: Some(message.into()),
            ..Self::default()
        }
    }

    /// Push requests received so far, oldest first.
    pub fn pushes(&self) -> Vec<PushRequest> {
        self.pushes.lock().map(|p| p.clone()).unwrap_or_default()
    }

    fn check_available(&self) -> HubResult<()> {
        match &self.failure {
            Some(message) => Err(HubError::Status {
                url: "memory://hub".to_string(),
                status: 503,
                body: message.clone(),
            }),
            None => Ok(()),
        }
    }

    fn poisoned() -> HubError {
        HubError::Manifest("memory hub state poisoned".to_string())
    }
}

#[async_trait::async_trait]
impl PromptHub for MemoryHub {
    fn provider_name(&self) -> &str {
        "memory"
    }

    async fn pull(&self, identifier: &PromptIdentifier) -> HubResult<RemotePrompt> {
        self.check_available()?;
        let prompts = self.prompts.lock().map_err(|_| Self::poisoned())?;
        prompts
            .get(&identifier.full_name())
            .cloned()
            .ok_or_else(|| HubError::NotFound(identifier.to_string()))
    }

    async fn push(&self, request: &PushRequest) -> HubResult<PushReceipt> {
        self.check_available()?;
        let full_name = request.identifier.full_name();

        self.prompts
            .lock()
            .map_err(|_| Self::poisoned())?
            .insert(full_name.clone(), request.template.clone().into_remote());

        let mut pushes = self.pushes.lock().map_err(|_| Self::poisoned())?;
        pushes.push(request.clone());

        Ok(PushReceipt {
            commit_hash: Some(format!("memory-{}", pushes.len())),
            url: format!("memory://hub/{}", full_name),
        })
    }
}
