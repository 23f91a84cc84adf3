//! Prompt file loading and saving.

use crate::types::{PromptFile, PromptRecord};
use promptsync_core::{AppError, AppResult};
use std::path::{Path, PathBuf};

/// Load every record of a prompt file.
pub fn load_prompt_file(path: &Path) -> AppResult<PromptFile> {
    let contents = read(path)?;

    let file: PromptFile = serde_yaml::from_str(&contents).map_err(|e| {
        AppError::Prompt(format!("Failed to parse prompt YAML {:?}: {}", path, e))
    })?;

    tracing::debug!("Loaded {} record(s) from {:?}", file.records.len(), path);
    Ok(file)
}

/// Load the record stored under `key` in a prompt file.
///
/// Only the requested entry has to be a valid record; other top-level keys
/// are ignored.
///
/// # Example
/// ```no_run
/// use promptsync_prompt::load_record;
/// use std::path::Path;
///
/// # fn example() -> Result<(), Box<dyn std::error::Error>> {
/// let record = load_record(Path::new("prompts/bug_to_user_story_v2.yml"), "bug_to_user_story_v2")?;
/// println!("{}", record.system_prompt());
/// # Ok(())
/// # }
/// ```
pub fn load_record(path: &Path, key: &str) -> AppResult<PromptRecord> {
    let contents = read(path)?;

    let document: serde_yaml::Value = serde_yaml::from_str(&contents).map_err(|e| {
        AppError::Prompt(format!("Failed to parse prompt YAML {:?}: {}", path, e))
    })?;

    let entry = document
        .get(key)
        .cloned()
        .ok_or_else(|| AppError::Prompt(format!("Key '{}' not found in {:?}", key, path)))?;

    let record: PromptRecord = serde_yaml::from_value(entry).map_err(|e| {
        AppError::Prompt(format!("Invalid record '{}' in {:?}: {}", key, path, e))
    })?;

    tracing::info!("Loaded prompt '{}' from {:?}", key, path);
    Ok(record)
}

/// Write a prompt file, creating parent directories as needed.
pub fn save_prompt_file(file: &PromptFile, path: &Path) -> AppResult<()> {
    let yaml = serde_yaml::to_string(file)?;

    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        std::fs::create_dir_all(parent).map_err(|e| {
            AppError::Prompt(format!("Failed to create directory {:?}: {}", parent, e))
        })?;
    }

    std::fs::write(path, yaml)
        .map_err(|e| AppError::Prompt(format!("Failed to write {:?}: {}", path, e)))?;

    tracing::debug!("Wrote prompt file {:?}", path);
    Ok(())
}

/// List YAML prompt files directly inside `dir`, sorted by path.
pub fn list_prompt_files(dir: &Path) -> AppResult<Vec<PathBuf>> {
    if !dir.exists() {
        return Ok(Vec::new());
    }

    let mut files: Vec<PathBuf> = walkdir::WalkDir::new(dir)
        .max_depth(1)
        .into_iter()
        .filter_map(|e| e.ok())
        .map(|e| e.into_path())
        .filter(|p| {
            p.is_file()
                && matches!(
                    p.extension().and_then(|s| s.to_str()),
                    Some("yml") | Some("yaml")
                )
        })
        .collect();

    files.sort();
    Ok(files)
}

fn read(path: &Path) -> AppResult<String> {
    if !path.exists() {
        return Err(AppError::Prompt(format!(
            "Prompt file not found: {:?}",
            path
        )));
    }

    std::fs::read_to_string(path)
        .map_err(|e| AppError::Prompt(format!("Failed to read prompt file {:?}: {}", path, e)))
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::TempDir;

    const VALID: &str = r#"
bug_to_user_story_v2:
  description: Optimized
  system_prompt: "Você é um Product Manager."
  user_prompt: "{bug_report}"
  version: v2
notes: "free-form text that is not a record"
"#;

    #[test]
    fn test_load_record() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("p.yml");
        fs::write(&path, VALID).unwrap();

        let record = load_record(&path, "bug_to_user_story_v2").unwrap();
        assert_eq!(record.version.as_deref(), Some("v2"));
    }

    #[test]
    fn test_load_record_with_numeric_version() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("p.yml");
        fs::write(
            &path,
            "bug_to_user_story_v2:\n  description: Optimized\n  system_prompt: x\n  version: 2\n",
        )
        .unwrap();

        let record = load_record(&path, "bug_to_user_story_v2").unwrap();
        assert_eq!(record.version.as_deref(), Some("2"));
        assert!(load_prompt_file(&path).is_ok());
    }

    #[test]
    fn test_load_missing_file() {
        let dir = TempDir::new().unwrap();
        let err = load_record(&dir.path().join("nope.yml"), "k").unwrap_err();
        assert!(err.to_string().contains("not found"));
    }

    #[test]
    fn test_load_missing_key() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("p.yml");
        fs::write(&path, VALID).unwrap();

        let err = load_record(&path, "bug_to_user_story_v3").unwrap_err();
        assert!(err.to_string().contains("Key 'bug_to_user_story_v3' not found"));
    }

    #[test]
    fn test_load_invalid_yaml() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("p.yml");
        fs::write(&path, "invalid: yaml: content:").unwrap();
        assert!(load_record(&path, "invalid").is_err());
        assert!(load_prompt_file(&path).is_err());
    }

    #[test]
    fn test_save_creates_directories() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("nested/prompts/out.yml");
        let record = PromptRecord {
            system_prompt: Some("line one\nline two".to_string()),
            user_prompt: Some("{bug_report}".to_string()),
            ..Default::default()
        };
        let file = PromptFile::single("k", record.clone());

        save_prompt_file(&file, &path).unwrap();

        assert_eq!(load_record(&path, "k").unwrap(), record);
        assert_eq!(load_prompt_file(&path).unwrap(), file);
    }

    #[test]
    fn test_list_prompt_files() {
        let dir = TempDir::new().unwrap();
        fs::write(dir.path().join("b.yml"), "").unwrap();
        fs::write(dir.path().join("a.yaml"), "").unwrap();
        fs::write(dir.path().join("readme.md"), "").unwrap();

        let files = list_prompt_files(dir.path()).unwrap();
        let names: Vec<_> = files
            .iter()
            .filter_map(|p| p.file_name().and_then(|n| n.to_str()))
            .collect();
        assert_eq!(names, vec!["a.yaml", "b.yml"]);
    }

    #[test]
    fn test_list_missing_dir() {
        assert!(list_prompt_files(Path::new("/no/such/dir")).unwrap().is_empty());
    }
}
