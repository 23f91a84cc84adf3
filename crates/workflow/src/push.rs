//! Push workflow: local YAML record to the hub.
//!
//! Split in three steps so the CLI can report between them:
//! [`load_for_push`] reads the record, [`plan_push`] validates it and decides
//! name and visibility, [`execute_push`] performs the single remote call.

use crate::types::PushOutcome;
use promptsync_core::{AppError, AppResult, PushSettings};
use promptsync_hub::{PromptHub, PromptIdentifier, PushReceipt, PushRequest};
use promptsync_prompt::{chat_template, load_record, validate_structure, PromptRecord};
use std::path::Path;

/// Load the record named by `settings` (file relative to `root`).
pub fn load_for_push(settings: &PushSettings, root: &Path) -> AppResult<PromptRecord> {
    load_record(&root.join(&settings.file), &settings.key)
}

/// Validate `record` and build the push request.
///
/// With a non-blank `username` the prompt is pushed publicly as
/// `username/<key>`; otherwise privately under the bare key. The structural
/// gate guarantees `description` is present.
///
/// # Errors
/// `AppError::Validation` carrying every structural violation. No remote
/// call may be made in that case.
pub fn plan_push(
    record: &PromptRecord,
    settings: &PushSettings,
    username: Option<&str>,
) -> AppResult<PushRequest> {
    validate_structure(record).into_result()?;

    let owner = username.map(str::trim).filter(|u| !u.is_empty());
    let identifier = PromptIdentifier::named(owner, settings.key.clone());

    Ok(PushRequest {
        identifier,
        template: chat_template(record),
        is_public: owner.is_some(),
        description: record.description.clone().unwrap_or_default(),
        tags: record.tags.clone(),
    })
}

/// Send a planned push to the hub.
///
/// A failure is reported with its full cause chain (`Caused by:` lines).
pub async fn execute_push(hub: &dyn PromptHub, request: &PushRequest) -> AppResult<PushReceipt> {
    tracing::info!(
        "Pushing {} via {} (public: {})",
        request.identifier.full_name(),
        hub.provider_name(),
        request.is_public
    );

    hub.push(request).await.map_err(|e| {
        tracing::error!("Push of {} failed: {}", request.identifier.full_name(), e);
        AppError::Hub(format!(
            "Failed to push {}: {:?}",
            request.identifier.full_name(),
            anyhow::Error::new(e)
        ))
    })
}

/// Load, validate and push in one call.
pub async fn push(
    hub: &dyn PromptHub,
    settings: &PushSettings,
    username: Option<&str>,
    root: &Path,
) -> AppResult<PushOutcome> {
    let record = load_for_push(settings, root)?;
    let request = plan_push(&record, settings, username)?;
    let receipt = execute_push(hub, &request).await?;

    Ok(PushOutcome {
        destination: request.identifier,
        is_public: request.is_public,
        receipt,
    })
}
