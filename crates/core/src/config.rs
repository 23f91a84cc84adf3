//! Configuration management for promptsync.
//!
//! Configuration is assembled from several sources, later ones winning:
//! - Built-in defaults (the bug-to-user-story prompt pair)
//! - Config file (`.promptsync/config.yaml` in the workspace, or `--config`)
//! - Environment variables (hub credentials, endpoint, timeout)
//! - Command-line flags
//!
//! Every file path and remote identifier the workflows touch lives here so
//! that the workflow functions receive them explicitly.

use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use std::time::Duration;

use crate::error::{AppError, AppResult};

/// Required hub credential.
pub const API_KEY_ENV: &str = "LANGSMITH_API_KEY";

/// Optional hub handle; when set, pushes are public and owner-prefixed.
pub const USERNAME_ENV: &str = "USERNAME_LANGSMITH_HUB";

/// Optional override of the hub API base URL.
pub const ENDPOINT_ENV: &str = "LANGSMITH_ENDPOINT";

/// Optional request timeout in seconds.
pub const TIMEOUT_ENV: &str = "PROMPTSYNC_TIMEOUT_SECS";

pub const WORKSPACE_ENV: &str = "PROMPTSYNC_WORKSPACE";
pub const CONFIG_ENV: &str = "PROMPTSYNC_CONFIG";

/// Default hub API base URL.
pub const DEFAULT_ENDPOINT: &str = "https://api.smith.langchain.com";

/// Main application configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AppConfig {
    /// Workspace root; relative prompt paths are resolved against it
    pub workspace: PathBuf,

    /// Optional config file path
    pub config_file: Option<PathBuf>,

    /// Hub API key (`LANGSMITH_API_KEY`)
    #[serde(skip_serializing)]
    pub api_key: Option<String>,

    /// Hub handle (`USERNAME_LANGSMITH_HUB`), already trimmed
    pub username: Option<String>,

    /// Hub API base URL
    pub endpoint: String,

    /// Request timeout; `None` waits indefinitely
    pub timeout_secs: Option<u64>,

    /// Log level override
    pub log_level: Option<String>,

    /// Verbose mode (enables debug logging)
    pub verbose: bool,

    /// Disable colored output
    pub no_color: bool,

    /// Pull workflow settings
    pub pull: PullSettings,

    /// Push workflow settings
    pub push: PushSettings,
}

/// Settings for pulling a prompt from the hub into local files.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct PullSettings {
    /// Remote identifier (`owner/name` or bare `name`)
    pub source: String,

    /// Key of the record inside the written YAML files
    pub key: String,

    /// Primary output file
    #[serde(rename = "outputFile")]
    pub output_file: PathBuf,

    /// Raw backup output file
    #[serde(rename = "rawOutputFile")]
    pub raw_output_file: PathBuf,

    /// Static metadata written alongside the pulled texts
    pub description: String,
    pub version: String,
    #[serde(rename = "createdAt")]
    pub created_at: String,
    pub tags: Vec<String>,
}

impl Default for PullSettings {
    fn default() -> Self {
        Self {
            source: "leonanluppi/bug_to_user_story_v1".to_string(),
            key: "bug_to_user_story_v1".to_string(),
            output_file: PathBuf::from("prompts/bug_to_user_story_v1.yml"),
            raw_output_file: PathBuf::from("prompts/raw_prompts.yml"),
            description: "Prompt para converter relatos de bugs em User Stories".to_string(),
            version: "v1".to_string(),
            created_at: "2025-01-15".to_string(),
            tags: vec![
                "bug-analysis".to_string(),
                "user-story".to_string(),
                "product-management".to_string(),
            ],
        }
    }
}

/// Settings for pushing a local prompt record to the hub.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct PushSettings {
    /// YAML file holding the record
    pub file: PathBuf,

    /// Record key, also used as the remote prompt name
    pub key: String,
}

impl Default for PushSettings {
    fn default() -> Self {
        Self {
            file: PathBuf::from("prompts/bug_to_user_story_v2.yml"),
            key: "bug_to_user_story_v2".to_string(),
        }
    }
}

/// Full configuration file structure.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
struct ConfigFile {
    hub: Option<HubSection>,
    logging: Option<LoggingSection>,
    pull: Option<PullSettings>,
    push: Option<PushSettings>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
struct HubSection {
    endpoint: Option<String>,
    #[serde(rename = "timeoutSecs")]
    timeout_secs: Option<u64>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
struct LoggingSection {
    level: Option<String>,
    color: Option<bool>,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            workspace: std::env::current_dir().unwrap_or_else(|_| PathBuf::from(".")),
            config_file: None,
            api_key: None,
            username: None,
            endpoint: DEFAULT_ENDPOINT.to_string(),
            timeout_secs: None,
            log_level: None,
            verbose: false,
            no_color: false,
            pull: PullSettings::default(),
            push: PushSettings::default(),
        }
    }
}

impl AppConfig {
    /// Load configuration from the process environment.
    ///
    /// A `.env` file in the current directory is loaded first, if present.
    ///
    /// # Example
    /// ```no_run
    /// use promptsync_core::config::AppConfig;
    ///
    /// let config = AppConfig::load(None, None).expect("Failed to load config");
    /// println!("Workspace: {:?}", config.workspace);
    /// ```
    pub fn load(workspace: Option<PathBuf>, config_file: Option<PathBuf>) -> AppResult<Self> {
        if let Ok(path) = dotenv::dotenv() {
            tracing::debug!("Loaded environment from {:?}", path);
        }
        Self::load_with(workspace, config_file, |key| std::env::var(key).ok())
    }

    /// Load configuration using `lookup` to read environment variables.
    ///
    /// Explicit `workspace` and `config_file` arguments take precedence over
    /// `PROMPTSYNC_WORKSPACE` and `PROMPTSYNC_CONFIG`.
    pub fn load_with<F>(
        workspace: Option<PathBuf>,
        config_file: Option<PathBuf>,
        lookup: F,
    ) -> AppResult<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let mut config = Self::default();

        if let Some(workspace) = workspace.or_else(|| lookup(WORKSPACE_ENV).map(PathBuf::from)) {
            config.workspace = workspace;
        }
        config.config_file = config_file.or_else(|| lookup(CONFIG_ENV).map(PathBuf::from));

        if !config.workspace.exists() {
            return Err(AppError::Config(format!(
                "Workspace directory does not exist: {:?}",
                config.workspace
            )));
        }

        let config_path = match config.config_file {
            Some(ref cf) => Some(cf.clone()),
            None => {
                let default_path = config.workspace.join(".promptsync/config.yaml");
                default_path.exists().then_some(default_path)
            }
        };

        if let Some(path) = config_path {
            config.merge_yaml(&path)?;
        }

        // Environment variables override YAML config
        config.api_key = non_empty(lookup(API_KEY_ENV));
        config.username = non_empty(lookup(USERNAME_ENV));

        if let Some(endpoint) = non_empty(lookup(ENDPOINT_ENV)) {
            config.endpoint = endpoint;
        }

        if let Some(timeout) = non_empty(lookup(TIMEOUT_ENV)) {
            let secs = timeout.parse::<u64>().map_err(|e| {
                AppError::Config(format!("Invalid {} value '{}': {}", TIMEOUT_ENV, timeout, e))
            })?;
            config.timeout_secs = Some(secs);
        }

        if lookup("NO_COLOR").is_some() {
            config.no_color = true;
        }

        Ok(config)
    }

    /// Merge YAML configuration file into this config.
    fn merge_yaml(&mut self, path: &Path) -> AppResult<()> {
        let contents = std::fs::read_to_string(path).map_err(|e| {
            AppError::Config(format!("Failed to read config file {:?}: {}", path, e))
        })?;

        let file: ConfigFile = serde_yaml::from_str(&contents).map_err(|e| {
            AppError::Config(format!("Failed to parse config file {:?}: {}", path, e))
        })?;

        if let Some(hub) = file.hub {
            if let Some(endpoint) = hub.endpoint {
                self.endpoint = endpoint;
            }
            if hub.timeout_secs.is_some() {
                self.timeout_secs = hub.timeout_secs;
            }
        }

        if let Some(logging) = file.logging {
            if let Some(level) = logging.level {
                self.log_level = Some(level);
            }
            if let Some(color) = logging.color {
                self.no_color = !color;
            }
        }

        if let Some(pull) = file.pull {
            self.pull = pull;
        }

        if let Some(push) = file.push {
            self.push = push;
        }

        tracing::debug!("Merged config file {:?}", path);
        Ok(())
    }

    /// Apply CLI overrides to the configuration.
    pub fn with_overrides(mut self, log_level: Option<String>, verbose: bool, no_color: bool) -> Self {
        if let Some(log_level) = log_level {
            self.log_level = Some(log_level);
        }

        if verbose {
            self.verbose = true;
            if self.log_level.is_none() {
                self.log_level = Some("debug".to_string());
            }
        }

        if no_color {
            self.no_color = true;
        }

        self
    }

    /// Return the hub API key or fail before any remote call is attempted.
    pub fn require_api_key(&self) -> AppResult<&str> {
        self.api_key.as_deref().ok_or_else(|| {
            AppError::Config(format!(
                "Missing required environment variable: {}",
                API_KEY_ENV
            ))
        })
    }

    /// Request timeout, if one is configured.
    pub fn timeout(&self) -> Option<Duration> {
        self.timeout_secs.map(Duration::from_secs)
    }

    /// Resolve a possibly relative path against the workspace root.
    pub fn resolve(&self, path: &Path) -> PathBuf {
        if path.is_absolute() {
            path.to_path_buf()
        } else {
            self.workspace.join(path)
        }
    }
}

fn non_empty(value: Option<String>) -> Option<String> {
    value
        .map(|v| v.trim().to_string())
        .filter(|v| !v.is_empty())
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;
    use tempfile::TempDir;

    fn load(dir: &TempDir, vars: &[(&str, &str)]) -> AppResult<AppConfig> {
        let env: HashMap<String, String> = vars
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        AppConfig::load_with(Some(dir.path().to_path_buf()), None, |key| {
            env.get(key).cloned()
        })
    }

    #[test]
    fn test_default_settings() {
        let config = AppConfig::default();
        assert_eq!(config.endpoint, DEFAULT_ENDPOINT);
        assert_eq!(config.pull.source, "leonanluppi/bug_to_user_story_v1");
        assert_eq!(config.pull.key, "bug_to_user_story_v1");
        assert_eq!(config.push.key, "bug_to_user_story_v2");
        assert_eq!(
            config.push.file,
            PathBuf::from("prompts/bug_to_user_story_v2.yml")
        );
        assert!(config.timeout().is_none());
    }

    #[test]
    fn test_missing_api_key_is_config_error() {
        let dir = TempDir::new().unwrap();
        let config = load(&dir, &[]).unwrap();
        let err = config.require_api_key().unwrap_err();
        assert!(err.to_string().contains(API_KEY_ENV));
    }

    #[test]
    fn test_blank_values_count_as_absent() {
        let dir = TempDir::new().unwrap();
        let config = load(&dir, &[(API_KEY_ENV, "  "), (USERNAME_ENV, " ")]).unwrap();
        assert!(config.require_api_key().is_err());
        assert!(config.username.is_none());
    }

    #[test]
    fn test_env_values_are_read() {
        let dir = TempDir::new().unwrap();
        let config = load(
            &dir,
            &[
                (API_KEY_ENV, "lsv2-key"),
                (USERNAME_ENV, " alice "),
                (ENDPOINT_ENV, "http://localhost:1984"),
                (TIMEOUT_ENV, "15"),
            ],
        )
        .unwrap();
        assert_eq!(config.require_api_key().unwrap(), "lsv2-key");
        assert_eq!(config.username.as_deref(), Some("alice"));
        assert_eq!(config.endpoint, "http://localhost:1984");
        assert_eq!(config.timeout(), Some(Duration::from_secs(15)));
    }

    #[test]
    fn test_invalid_timeout() {
        let dir = TempDir::new().unwrap();
        assert!(load(&dir, &[(TIMEOUT_ENV, "soon")]).is_err());
    }

    #[test]
    fn test_missing_workspace() {
        let result = AppConfig::load_with(Some(PathBuf::from("/no/such/workspace")), None, |_| None);
        assert!(matches!(result, Err(AppError::Config(_))));
    }

    #[test]
    fn test_config_file_merge() {
        let dir = TempDir::new().unwrap();
        let cfg_dir = dir.path().join(".promptsync");
        std::fs::create_dir_all(&cfg_dir).unwrap();
        std::fs::write(
            cfg_dir.join("config.yaml"),
            r#"
hub:
  endpoint: "http://hub.internal"
  timeoutSecs: 5
logging:
  level: info
  color: false
push:
  file: custom/prompt.yml
  key: my_prompt
"#,
        )
        .unwrap();

        let config = load(&dir, &[]).unwrap();
        assert_eq!(config.endpoint, "http://hub.internal");
        assert_eq!(config.timeout_secs, Some(5));
        assert_eq!(config.log_level.as_deref(), Some("info"));
        assert!(config.no_color);
        assert_eq!(config.push.key, "my_prompt");
        assert_eq!(config.push.file, PathBuf::from("custom/prompt.yml"));
        assert_eq!(config.pull, PullSettings::default());
    }

    #[test]
    fn test_with_overrides() {
        let config = AppConfig::default().with_overrides(None, true, false);
        assert!(config.verbose);
        assert_eq!(config.log_level, Some("debug".to_string()));
    }

    #[test]
    fn test_resolve_relative_path() {
        let mut config = AppConfig::default();
        config.workspace = PathBuf::from("/work");
        assert_eq!(
            config.resolve(Path::new("prompts/a.yml")),
            PathBuf::from("/work/prompts/a.yml")
        );
        assert_eq!(
            config.resolve(Path::new("/abs/a.yml")),
            PathBuf::from("/abs/a.yml")
        );
    }
}
