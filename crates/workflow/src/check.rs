//! Content rubric over local prompt files.

use crate::types::CheckResult;
use promptsync_core::{AppError, AppResult};
use promptsync_prompt::{list_prompt_files, load_prompt_file, load_record, validate_content};
use std::path::Path;

/// Check the record stored under `key` in `path`.
pub fn check_record(path: &Path, key: &str) -> AppResult<CheckResult> {
    let record = load_record(path, key)?;
    let report = validate_content(&record);

    tracing::debug!(
        "Checked '{}' in {:?}: {} failure(s)",
        key,
        path,
        report.failures().count()
    );

    Ok(CheckResult {
        path: path.to_path_buf(),
        key: key.to_string(),
        report,
    })
}

/// Check every record of a prompt file, or of every YAML file in a directory.
///
/// Results come back sorted by path then key.
pub fn check_all(target: &Path) -> AppResult<Vec<CheckResult>> {
    let files = if target.is_dir() {
        list_prompt_files(target)?
    } else if target.exists() {
        vec![target.to_path_buf()]
    } else {
        return Err(AppError::Prompt(format!(
            "Prompt file not found: {:?}",
            target
        )));
    };

    let mut results = Vec::new();
    for path in files {
        let file = load_prompt_file(&path)?;
        for (key, record) in file.records {
            results.push(CheckResult {
                path: path.clone(),
                report: validate_content(&record),
                key,
            });
        }
    }

    tracing::info!("Checked {} record(s) under {:?}", results.len(), target);
    Ok(results)
}
