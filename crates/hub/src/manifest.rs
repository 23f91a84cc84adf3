//! LangChain serialized-object manifests.
//!
//! The hub stores prompts as LangChain "constructor" objects:
//! `{"lc": 1, "type": "constructor", "id": [..., "ClassName"], "kwargs": {...}}`.
//! Decoding understands `ChatPromptTemplate` (and `StructuredPrompt`),
//! `PromptTemplate`, and a `RunnableSequence` whose first step is one of those.

use crate::error::{HubError, HubResult};
use crate::types::{ChatTemplate, MessageRole, PromptMessage, RemotePrompt};
use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use serde_json::Value;

const LC_VERSION: u32 = 1;
const CONSTRUCTOR: &str = "constructor";

/// One serialized LangChain object.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LcObject {
    pub lc: u32,
    #[serde(rename = "type")]
    pub kind: String,
    pub id: Vec<String>,
    #[serde(default)]
    pub kwargs: Value,
}

impl LcObject {
    fn constructor(path: &[&str], kwargs: Value) -> Self {
        Self {
            lc: LC_VERSION,
            kind: CONSTRUCTOR.to_string(),
            id: path.iter().map(|s| s.to_string()).collect(),
            kwargs,
        }
    }

    /// Class name: the last element of `id`.
    pub fn class_name(&self) -> &str {
        self.id.last().map(String::as_str).unwrap_or_default()
    }

    fn kwargs<T: DeserializeOwned>(&self) -> HubResult<T> {
        serde_json::from_value(self.kwargs.clone()).map_err(|e| {
            HubError::Manifest(format!("bad kwargs for {}: {}", self.class_name(), e))
        })
    }
}

#[derive(Deserialize)]
struct ChatKwargs {
    messages: Vec<LcObject>,
}

#[derive(Deserialize)]
struct TemplateKwargs {
    template: String,
}

#[derive(Deserialize)]
struct MessageTemplateKwargs {
    prompt: LcObject,
}

#[derive(Deserialize)]
struct MessageKwargs {
    content: Value,
}

#[derive(Deserialize)]
struct SequenceKwargs {
    first: LcObject,
}

#[derive(Serialize)]
struct PromptTemplateKwargs<'a> {
    input_variables: Vec<String>,
    template: &'a str,
    template_format: &'static str,
}

/// Decode a hub manifest into a remote prompt.
pub fn decode(manifest: Value) -> HubResult<RemotePrompt> {
    let object: LcObject = serde_json::from_value(manifest)
        .map_err(|e| HubError::Manifest(format!("not a serialized object: {}", e)))?;
    decode_object(&object)
}

fn decode_object(object: &LcObject) -> HubResult<RemotePrompt> {
    match object.class_name() {
        "ChatPromptTemplate" | "StructuredPrompt" => {
            let kwargs: ChatKwargs = object.kwargs()?;
            let messages = kwargs
                .messages
                .iter()
                .map(decode_message)
                .collect::<HubResult<Vec<_>>>()?;
            Ok(RemotePrompt::Messages(messages))
        }
        "PromptTemplate" => {
            let kwargs: TemplateKwargs = object.kwargs()?;
            Ok(RemotePrompt::Template(kwargs.template))
        }
        "RunnableSequence" => {
            let kwargs: SequenceKwargs = object.kwargs()?;
            decode_object(&kwargs.first)
        }
        other => Err(HubError::Manifest(format!(
            "unsupported prompt type '{}'",
            other
        ))),
    }
}

fn decode_message(object: &LcObject) -> HubResult<PromptMessage> {
    let class = object.class_name();
    let role = MessageRole::from_class_name(class)
        .ok_or_else(|| HubError::UnknownRole(class.to_string()))?;

    let content = if class.ends_with("PromptTemplate") {
        let kwargs: MessageTemplateKwargs = object.kwargs()?;
        let template: TemplateKwargs = kwargs.prompt.kwargs()?;
        template.template
    } else {
        let kwargs: MessageKwargs = object.kwargs()?;
        match kwargs.content {
            Value::String(text) => text,
            other => {
                return Err(HubError::Manifest(format!(
                    "{} content is not plain text: {}",
                    class, other
                )))
            }
        }
    };

    Ok(PromptMessage { role, content })
}

/// Encode a chat template as a `ChatPromptTemplate` manifest.
pub fn encode(template: &ChatTemplate) -> HubResult<Value> {
    let messages = template
        .messages()
        .iter()
        .map(encode_message)
        .collect::<HubResult<Vec<_>>>()?;

    let chat = LcObject::constructor(
        &["langchain", "prompts", "chat", "ChatPromptTemplate"],
        serde_json::json!({
            "input_variables": template.input_variables(),
            "messages": messages,
        }),
    );

    to_value(&chat)
}

fn encode_message(message: &PromptMessage) -> HubResult<LcObject> {
    let prompt = LcObject::constructor(
        &["langchain", "prompts", "prompt", "PromptTemplate"],
        to_value(&PromptTemplateKwargs {
            input_variables: crate::types::template_variables(&message.content),
            template: &message.content,
            template_format: "f-string",
        })?,
    );

    Ok(LcObject::constructor(
        &[
            "langchain",
            "prompts",
            "chat",
            message.role.template_class_name(),
        ],
        serde_json::json!({ "prompt": to_value(&prompt)? }),
    ))
}

fn to_value<T: Serialize>(value: &T) -> HubResult<Value> {
    serde_json::to_value(value).map_err(|e| HubError::Manifest(e.to_string()))
}
