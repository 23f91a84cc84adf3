//! Prompt record types.
//!
//! A prompt file is a YAML mapping from prompt key to record:
//!
//! ```yaml
//! bug_to_user_story_v2:
//!   description: Prompt otimizado para Bug to User Story
//!   system_prompt: |
//!     Você é um Product Manager...
//!   user_prompt: "{bug_report}"
//!   version: v2
//!   tags: [bug-analysis, user-story]
//!   techniques_applied: [few-shot, role-prompting]
//! ```

use serde::de::Error as _;
use serde::{Deserialize, Deserializer, Serialize};
use serde_yaml::Value;
use std::collections::BTreeMap;

/// One prompt as stored locally.
///
/// Fields the structural rubric requires to be present are optional here so
/// that a missing key can be told apart from an empty value. Metadata fields
/// accept any scalar, so a hand-written `version: 2` reads as `"2"`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct PromptRecord {
    #[serde(
        default,
        deserialize_with = "scalar_text",
        skip_serializing_if = "Option::is_none"
    )]
    pub description: Option<String>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub system_prompt: Option<String>,

    /// User template; expected to contain the `{bug_report}` placeholder
    #[serde(skip_serializing_if = "Option::is_none")]
    pub user_prompt: Option<String>,

    #[serde(
        default,
        deserialize_with = "scalar_text",
        skip_serializing_if = "Option::is_none"
    )]
    pub version: Option<String>,

    /// Informational creation date
    #[serde(
        default,
        deserialize_with = "scalar_text",
        skip_serializing_if = "Option::is_none"
    )]
    pub created_at: Option<String>,

    #[serde(default)]
    pub tags: Vec<String>,

    /// Prompt-engineering techniques declared by the author (push only)
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub techniques_applied: Vec<String>,
}

impl PromptRecord {
    pub fn system_prompt(&self) -> &str {
        self.system_prompt.as_deref().unwrap_or_default()
    }

    pub fn user_prompt(&self) -> Option<&str> {
        self.user_prompt.as_deref()
    }
}

/// Read a YAML scalar as text; `~` counts as absent.
fn scalar_text<'de, D>(deserializer: D) -> Result<Option<String>, D::Error>
where
    D: Deserializer<'de>,
{
    match Option::<Value>::deserialize(deserializer)? {
        None | Some(Value::Null) => Ok(None),
        Some(Value::String(s)) => Ok(Some(s)),
        Some(Value::Number(n)) => Ok(Some(n.to_string())),
        Some(Value::Bool(b)) => Ok(Some(b.to_string())),
        Some(other) => Err(D::Error::custom(format!(
            "expected a scalar, found {:?}",
            other
        ))),
    }
}

/// A whole prompt file: records keyed by prompt identifier.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct PromptFile {
    pub records: BTreeMap<String, PromptRecord>,
}

impl PromptFile {
    /// A file holding a single record.
    pub fn single(key: impl Into<String>, record: PromptRecord) -> Self {
        let mut records = BTreeMap::new();
        records.insert(key.into(), record);
        Self { records }
    }

    pub fn get(&self, key: &str) -> Option<&PromptRecord> {
        self.records.get(key)
    }
}
