//! Hub domain types: prompt identifiers, message roles and chat templates.

use crate::error::{HubError, HubResult};
use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;
use std::fmt;

/// Owner segment the hub API expects when a prompt has no explicit owner.
pub const ANONYMOUS_OWNER: &str = "-";

/// Role of a message inside a chat prompt.
///
/// The set is closed: a hub manifest carrying any other message class is
/// rejected when decoded.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum MessageRole {
    System,
    Human,
    Ai,
}

impl MessageRole {
    /// Map a LangChain message class name to a role.
    pub fn from_class_name(name: &str) -> Option<Self> {
        match name {
            "SystemMessagePromptTemplate" | "SystemMessage" => Some(Self::System),
            "HumanMessagePromptTemplate" | "HumanMessage" => Some(Self::Human),
            "AIMessagePromptTemplate" | "AIMessage" => Some(Self::Ai),
            _ => None,
        }
    }

    /// LangChain class used when serializing a message template of this role.
    pub fn template_class_name(&self) -> &'static str {
        match self {
            Self::System => "SystemMessagePromptTemplate",
            Self::Human => "HumanMessagePromptTemplate",
            Self::Ai => "AIMessagePromptTemplate",
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::System => "system",
            Self::Human => "human",
            Self::Ai => "ai",
        }
    }
}

impl fmt::Display for MessageRole {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A single role-tagged message template.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PromptMessage {
    pub role: MessageRole,
    pub content: String,
}

impl PromptMessage {
    pub fn new(role: MessageRole, content: impl Into<String>) -> Self {
        Self {
            role,
            content: content.into(),
        }
    }
}

/// A prompt as returned by the hub.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RemotePrompt {
    /// Chat prompt made of role-tagged messages
    Messages(Vec<PromptMessage>),

    /// Single flat template string
    Template(String),
}

impl RemotePrompt {
    /// Content of the first message with `role`, if this is a chat prompt.
    pub fn first(&self, role: MessageRole) -> Option<&str> {
        match self {
            Self::Messages(messages) => messages
                .iter()
                .find(|m| m.role == role)
                .map(|m| m.content.as_str()),
            Self::Template(_) => None,
        }
    }
}

/// Two-message chat template (system + human) sent on push.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ChatTemplate {
    messages: Vec<PromptMessage>,
}

impl ChatTemplate {
    pub fn new(system: impl Into<String>, human: impl Into<String>) -> Self {
        Self {
            messages: vec![
                PromptMessage::new(MessageRole::System, system),
                PromptMessage::new(MessageRole::Human, human),
            ],
        }
    }

    pub fn messages(&self) -> &[PromptMessage] {
        &self.messages
    }

    pub fn system(&self) -> &str {
        &self.messages[0].content
    }

    pub fn human(&self) -> &str {
        &self.messages[1].content
    }

    /// Sorted, de-duplicated placeholder names across all messages.
    pub fn input_variables(&self) -> Vec<String> {
        let vars: BTreeSet<String> = self
            .messages
            .iter()
            .flat_map(|m| template_variables(&m.content))
            .collect();
        vars.into_iter().collect()
    }

    pub fn into_remote(self) -> RemotePrompt {
        RemotePrompt::Messages(self.messages)
    }
}

/// Extract `{name}` placeholders from an f-string style template.
///
/// Doubled braces are literals. Brace groups whose content is not an
/// identifier (JSON snippets in examples, for instance) are skipped.
pub fn template_variables(template: &str) -> Vec<String> {
    let mut vars = Vec::new();
    let mut chars = template.chars().peekable();

    while let Some(c) = chars.next() {
        match c {
            '{' if chars.peek() == Some(&'{') => {
                chars.next();
            }
            '{' => {
                let mut name = String::new();
                let mut closed = false;
                for inner in chars.by_ref() {
                    if inner == '}' {
                        closed = true;
                        break;
                    }
                    name.push(inner);
                }
                if closed && is_identifier(&name) && !vars.contains(&name) {
                    vars.push(name);
                }
            }
            _ => {}
        }
    }

    vars
}

fn is_identifier(s: &str) -> bool {
    let mut chars = s.chars();
    match chars.next() {
        Some(c) if c.is_ascii_alphabetic() || c == '_' => {}
        _ => return false,
    }
    chars.all(|c| c.is_ascii_alphanumeric() || c == '_')
}

/// Hub address of a prompt: `owner/name`, bare `name`, optionally `:commit`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PromptIdentifier {
    pub owner: Option<String>,
    pub name: String,
    pub commit: Option<String>,
}

impl PromptIdentifier {
    /// Parse `owner/name[:commit]` or `name[:commit]`.
    pub fn parse(s: &str) -> HubResult<Self> {
        let invalid = || HubError::InvalidIdentifier(s.to_string());
        let trimmed = s.trim();

        let (path, commit) = match trimmed.split_once(':') {
            Some((path, commit)) if !commit.is_empty() => (path, Some(commit.to_string())),
            Some(_) => return Err(invalid()),
            None => (trimmed, None),
        };

        let (owner, name) = match path.split_once('/') {
            Some((owner, name)) => (Some(owner), name),
            None => (None, path),
        };

        if name.is_empty() || name.contains('/') || owner.is_some_and(str::is_empty) {
            return Err(invalid());
        }

        Ok(Self {
            owner: owner.map(str::to_string),
            name: name.to_string(),
            commit,
        })
    }

    /// Name a prompt under `owner` when one is given, bare otherwise.
    pub fn named(owner: Option<&str>, name: impl Into<String>) -> Self {
        Self {
            owner: owner.map(str::to_string),
            name: name.into(),
            commit: None,
        }
    }

    /// `owner/name` or bare `name`, without commit.
    pub fn full_name(&self) -> String {
        match &self.owner {
            Some(owner) => format!("{}/{}", owner, self.name),
            None => self.name.clone(),
        }
    }

    /// Owner path segment for API URLs.
    pub fn owner_segment(&self) -> &str {
        self.owner.as_deref().unwrap_or(ANONYMOUS_OWNER)
    }
}

impl fmt::Display for PromptIdentifier {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.full_name())?;
        if let Some(commit) = &self.commit {
            write!(f, ":{}", commit)?;
        }
        Ok(())
    }
}
