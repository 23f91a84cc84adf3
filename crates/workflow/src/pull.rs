//! Pull workflow: hub prompt to local YAML files.

use crate::types::PullOutcome;
use promptsync_core::{AppError, AppResult, PullSettings};
use promptsync_hub::{PromptHub, PromptIdentifier};
use promptsync_prompt::{pull_file, save_prompt_file};
use std::path::Path;

/// Pull the configured prompt and write it to the primary and raw outputs.
///
/// This function:
/// 1. Fetches `settings.source` from the hub (one attempt)
/// 2. Builds the record from the first system and human messages plus the
///    configured metadata
/// 3. Writes the same file to `output_file`, then `raw_output_file`
///
/// Relative output paths are resolved against `root`. The first write error
/// stops the workflow.
pub async fn pull(
    hub: &dyn PromptHub,
    settings: &PullSettings,
    root: &Path,
) -> AppResult<PullOutcome> {
    let source = PromptIdentifier::parse(&settings.source)?;

    tracing::info!("Pulling prompt {} via {}", source, hub.provider_name());
    let remote = hub
        .pull(&source)
        .await
        .map_err(|e| AppError::Hub(format!("Failed to pull {}: {}", source, e)))?;

    let file = pull_file(&remote, settings);

    let mut written = Vec::with_capacity(2);
    for output in [&settings.output_file, &settings.raw_output_file] {
        let path = root.join(output);
        save_prompt_file(&file, &path)?;
        tracing::info!("Saved {:?}", path);
        written.push(path);
    }

    Ok(PullOutcome {
        source,
        file,
        written,
    })
}
