//! Conversions between hub prompts and local records.

use crate::types::{PromptFile, PromptRecord};
use crate::validation::PLACEHOLDER;
use promptsync_core::PullSettings;
use promptsync_hub::{ChatTemplate, MessageRole, RemotePrompt};

/// Build the local record for a pulled prompt.
///
/// Metadata comes from `settings`. For a chat prompt the first system and
/// first human messages become `system_prompt` and `user_prompt`; a missing
/// message leaves the default (`""` and `{bug_report}` respectively). A flat
/// template only fills `system_prompt`.
pub fn record_from_remote(prompt: &RemotePrompt, settings: &PullSettings) -> PromptRecord {
    let mut record = PromptRecord {
        description: Some(settings.description.clone()),
        system_prompt: Some(String::new()),
        user_prompt: Some(PLACEHOLDER.to_string()),
        version: Some(settings.version.clone()),
        created_at: Some(settings.created_at.clone()),
        tags: settings.tags.clone(),
        techniques_applied: Vec::new(),
    };

    match prompt {
        RemotePrompt::Messages(_) => {
            if let Some(system) = prompt.first(MessageRole::System) {
                record.system_prompt = Some(system.to_string());
            }
            if let Some(human) = prompt.first(MessageRole::Human) {
                record.user_prompt = Some(human.to_string());
            }
        }
        RemotePrompt::Template(template) => {
            record.system_prompt = Some(template.clone());
        }
    }

    record
}

/// The prompt file written by a pull.
pub fn pull_file(prompt: &RemotePrompt, settings: &PullSettings) -> PromptFile {
    PromptFile::single(settings.key.clone(), record_from_remote(prompt, settings))
}

/// Build the system + human chat template pushed for a record.
///
/// Both texts are trimmed; a record without `user_prompt` gets the
/// `{bug_report}` placeholder.
pub fn chat_template(record: &PromptRecord) -> ChatTemplate {
    let system = record.system_prompt().trim();
    let human = record.user_prompt().unwrap_or(PLACEHOLDER).trim();
    ChatTemplate::new(system, human)
}
