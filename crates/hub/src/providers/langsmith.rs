//! LangSmith Prompt Hub provider.
//!
//! REST endpoints used (all authenticated with the `x-api-key` header):
//! - `GET  /commits/{owner}/{repo}/{commit}`  pull a manifest (`latest` by default)
//! - `GET  /repos/{owner}/{repo}`             check whether a repo exists
//! - `POST /repos/`                           create a repo
//! - `GET  /commits/{owner}/{repo}/`          list commits (latest first)
//! - `POST /commits/{owner}/{repo}`           create a commit
//!
//! Prompts without an owner are addressed with the `-` owner segment.

use crate::client::{PromptHub, PushReceipt, PushRequest};
use crate::error::{HubError, HubResult};
use crate::manifest;
use crate::types::{PromptIdentifier, RemotePrompt};
use promptsync_core::config::DEFAULT_ENDPOINT;
use reqwest::StatusCode;
use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use std::time::Duration;

const API_KEY_HEADER: &str = "x-api-key";

#[derive(Debug, Deserialize)]
struct CommitManifestResponse {
    commit_hash: String,
    manifest: serde_json::Value,
}

#[derive(Debug, Deserialize)]
struct ListCommitsResponse {
    commits: Vec<CommitSummary>,
}

#[derive(Debug, Deserialize)]
struct CommitSummary {
    commit_hash: String,
}

#[derive(Debug, Serialize)]
struct CreateRepoRequest<'a> {
    repo_handle: &'a str,
    description: &'a str,
    tags: &'a [String],
    is_public: bool,
}

#[derive(Debug, Serialize)]
struct CreateCommitRequest<'a> {
    manifest: serde_json::Value,
    #[serde(skip_serializing_if = "Option::is_none")]
    parent_commit: Option<&'a str>,
}

#[derive(Debug, Deserialize)]
struct CreateCommitResponse {
    commit: CommitSummary,
}

/// LangSmith hub client.
pub struct LangSmithClient {
    /// Base URL for the LangSmith API
    base_url: String,

    api_key: String,

    /// HTTP client
    client: reqwest::Client,
}

impl LangSmithClient {
    /// Create a client against the public LangSmith API.
    pub fn new(api_key: impl Into<String>) -> Self {
        Self::with_base_url(DEFAULT_ENDPOINT, api_key)
    }

    /// Create a client with a custom base URL and no request timeout.
    pub fn with_base_url(base_url: impl Into<String>, api_key: impl Into<String>) -> Self {
        Self {
            base_url: base_url.into().trim_end_matches('/').to_string(),
            api_key: api_key.into(),
            client: reqwest::Client::new(),
        }
    }

    /// Create a client whose requests give up after `timeout`.
    pub fn with_timeout(
        base_url: impl Into<String>,
        api_key: impl Into<String>,
        timeout: Duration,
    ) -> HubResult<Self> {
        let client = reqwest::Client::builder()
            .timeout(timeout)
            .build()
            .map_err(HubError::Client)?;

        Ok(Self {
            client,
            ..Self::with_base_url(base_url, api_key)
        })
    }

    fn url(&self, path: &str) -> String {
        format!("{}{}", self.base_url, path)
    }

    /// Web page for a prompt, derived from the API host.
    fn web_url(&self, identifier: &PromptIdentifier) -> String {
        let host = self.base_url.replacen("://api.", "://", 1);
        format!("{}/hub/{}", host, identifier.full_name())
    }

    async fn send(&self, request: reqwest::RequestBuilder, url: &str) -> HubResult<reqwest::Response> {
        request
            .header(API_KEY_HEADER, &self.api_key)
            .send()
            .await
            .map_err(|source| HubError::Request {
                url: url.to_string(),
                source,
            })
    }

    async fn check_status(response: reqwest::Response, url: &str) -> HubResult<reqwest::Response> {
        if response.status().is_success() {
            return Ok(response);
        }
        let status = response.status().as_u16();
        let body = response
            .text()
            .await
            .unwrap_or_else(|_| "Unknown error".to_string());
        Err(HubError::Status {
            url: url.to_string(),
            status,
            body,
        })
    }

    async fn decode<T: DeserializeOwned>(response: reqwest::Response, url: &str) -> HubResult<T> {
        response.json().await.map_err(|source| HubError::Decode {
            url: url.to_string(),
            source,
        })
    }

    async fn repo_exists(&self, identifier: &PromptIdentifier) -> HubResult<bool> {
        let url = self.url(&format!(
            "/repos/{}/{}",
            identifier.owner_segment(),
            identifier.name
        ));
        let response = self.send(self.client.get(&url), &url).await?;
        if response.status() == StatusCode::NOT_FOUND {
            return Ok(false);
        }
        Self::check_status(response, &url).await?;
        Ok(true)
    }

    async fn create_repo(&self, request: &PushRequest) -> HubResult<()> {
        let url = self.url("/repos/");
        let body = CreateRepoRequest {
            repo_handle: &request.identifier.name,
            description: &request.description,
            tags: &request.tags,
            is_public: request.is_public,
        };

        tracing::info!(
            "Creating hub repo {} (public: {})",
            request.identifier.full_name(),
            request.is_public
        );
        let response = self.send(self.client.post(&url).json(&body), &url).await?;
        Self::check_status(response, &url).await?;
        Ok(())
    }

    async fn latest_commit(&self, identifier: &PromptIdentifier) -> HubResult<Option<String>> {
        let url = self.url(&format!(
            "/commits/{}/{}/",
            identifier.owner_segment(),
            identifier.name
        ));
        let request = self.client.get(&url).query(&[("limit", 1), ("offset", 0)]);
        let response = self.send(request, &url).await?;
        if response.status() == StatusCode::NOT_FOUND {
            return Ok(None);
        }
        let response = Self::check_status(response, &url).await?;
        let listing: ListCommitsResponse = Self::decode(response, &url).await?;
        Ok(listing.commits.into_iter().next().map(|c| c.commit_hash))
    }
}

#[async_trait::async_trait]
impl PromptHub for LangSmithClient {
    fn provider_name(&self) -> &str {
        "langsmith"
    }

    async fn pull(&self, identifier: &PromptIdentifier) -> HubResult<RemotePrompt> {
        let commit = identifier.commit.as_deref().unwrap_or("latest");
        let url = self.url(&format!(
            "/commits/{}/{}/{}",
            identifier.owner_segment(),
            identifier.name,
            commit
        ));

        tracing::info!("Pulling {} from LangSmith", identifier);
        let response = self.send(self.client.get(&url), &url).await?;
        if response.status() == StatusCode::NOT_FOUND {
            return Err(HubError::NotFound(identifier.to_string()));
        }
        let response = Self::check_status(response, &url).await?;
        let body: CommitManifestResponse = Self::decode(response, &url).await?;

        tracing::debug!("Pulled commit {}", body.commit_hash);
        manifest::decode(body.manifest)
    }

    async fn push(&self, request: &PushRequest) -> HubResult<PushReceipt> {
        let identifier = &request.identifier;
        let manifest = manifest::encode(&request.template)?;

        if !self.repo_exists(identifier).await? {
            self.create_repo(request).await?;
        }

        let parent = self.latest_commit(identifier).await?;
        let url = self.url(&format!(
            "/commits/{}/{}",
            identifier.owner_segment(),
            identifier.name
        ));
        let body = CreateCommitRequest {
            manifest,
            parent_commit: parent.as_deref(),
        };

        tracing::info!("Committing {} (parent: {:?})", identifier.full_name(), parent);
        let response = self.send(self.client.post(&url).json(&body), &url).await?;

        // 409: manifest identical to the latest commit
        if response.status() == StatusCode::CONFLICT {
            tracing::info!("Hub reports no changes for {}", identifier.full_name());
            return Ok(PushReceipt {
                commit_hash: parent,
                url: self.web_url(identifier),
            });
        }

        let response = Self::check_status(response, &url).await?;
        let created: CreateCommitResponse = Self::decode(response, &url).await?;

        Ok(PushReceipt {
            commit_hash: Some(created.commit.commit_hash),
            url: self.web_url(identifier),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::{ChatTemplate, MessageRole};
    use serde_json::json;
    use wiremock::matchers::{body_partial_json, header, method, path, query_param};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    fn chat_manifest() -> serde_json::Value {
        let template = ChatTemplate::new("You are a product manager.", "{bug_report}");
        manifest::encode(&template).unwrap()
    }

    fn push_request(owner: Option<&str>, is_public: bool) -> PushRequest {
        PushRequest {
            identifier: PromptIdentifier::named(owner, "bug_to_user_story_v2"),
            template: ChatTemplate::new("Você é um PM.", "{bug_report}"),
            is_public,
            description: "Optimized prompt".to_string(),
            tags: vec!["user-story".to_string()],
        }
    }

    #[test]
    fn test_client_creation() {
        let client = LangSmithClient::new("key");
        assert_eq!(client.provider_name(), "langsmith");
        assert_eq!(client.base_url, DEFAULT_ENDPOINT);
    }

    #[test]
    fn test_web_url() {
        let client = LangSmithClient::new("key");
        let id = PromptIdentifier::named(Some("alice"), "bug_to_user_story_v2");
        assert_eq!(
            client.web_url(&id),
            "https://smith.langchain.com/hub/alice/bug_to_user_story_v2"
        );
    }

    #[tokio::test]
    async fn test_pull_latest_commit() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/commits/leonanluppi/bug_to_user_story_v1/latest"))
            .and(header("x-api-key", "secret"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({
                "commit_hash": "abc123",
                "manifest": chat_manifest(),
                "examples": []
            })))
            .expect(1)
            .mount(&server)
            .await;

        let client = LangSmithClient::with_base_url(server.uri(), "secret");
        let id = PromptIdentifier::parse("leonanluppi/bug_to_user_story_v1").unwrap();
        let prompt = client.pull(&id).await.unwrap();

        assert_eq!(
            prompt.first(MessageRole::System),
            Some("You are a product manager.")
        );
        assert_eq!(prompt.first(MessageRole::Human), Some("{bug_report}"));
    }

    #[tokio::test]
    async fn test_pull_not_found() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .respond_with(ResponseTemplate::new(404))
            .mount(&server)
            .await;

        let client = LangSmithClient::with_base_url(server.uri(), "secret");
        let id = PromptIdentifier::parse("missing").unwrap();
        assert!(matches!(client.pull(&id).await, Err(HubError::NotFound(_))));
    }

    #[tokio::test]
    async fn test_pull_unauthorized_reports_status() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .respond_with(ResponseTemplate::new(401).set_body_string("invalid token"))
            .mount(&server)
            .await;

        let client = LangSmithClient::with_base_url(server.uri(), "bad");
        let id = PromptIdentifier::parse("owner/name").unwrap();
        match client.pull(&id).await {
            Err(HubError::Status { status, body, .. }) => {
                assert_eq!(status, 401);
                assert_eq!(body, "invalid token");
            }
            other => panic!("expected status error, got {:?}", other),
        }
    }

    #[tokio::test]
    async fn test_push_creates_repo_then_commits() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/repos/-/bug_to_user_story_v2"))
            .respond_with(ResponseTemplate::new(404))
            .expect(1)
            .mount(&server)
            .await;
        Mock::given(method("POST"))
            .and(path("/repos/"))
            .and(body_partial_json(json!({
                "repo_handle": "bug_to_user_story_v2",
                "is_public": false,
                "description": "Optimized prompt"
            })))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({"repo": {}})))
            .expect(1)
            .mount(&server)
            .await;
        Mock::given(method("GET"))
            .and(path("/commits/-/bug_to_user_story_v2/"))
            .and(query_param("limit", "1"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({"commits": [], "total": 0})))
            .mount(&server)
            .await;
        Mock::given(method("POST"))
            .and(path("/commits/-/bug_to_user_story_v2"))
            .respond_with(
                ResponseTemplate::new(200)
                    .set_body_json(json!({"commit": {"commit_hash": "new123"}})),
            )
            .expect(1)
            .mount(&server)
            .await;

        let client = LangSmithClient::with_base_url(server.uri(), "secret");
        let receipt = client.push(&push_request(None, false)).await.unwrap();
        assert_eq!(receipt.commit_hash.as_deref(), Some("new123"));
        assert!(receipt.url.ends_with("/hub/bug_to_user_story_v2"));
    }

    #[tokio::test]
    async fn test_push_existing_repo_uses_parent_commit() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/repos/alice/bug_to_user_story_v2"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({"repo": {}})))
            .mount(&server)
            .await;
        Mock::given(method("POST"))
            .and(path("/repos/"))
            .respond_with(ResponseTemplate::new(200))
            .expect(0)
            .mount(&server)
            .await;
        Mock::given(method("GET"))
            .and(path("/commits/alice/bug_to_user_story_v2/"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({
                "commits": [{"commit_hash": "parent1"}],
                "total": 1
            })))
            .mount(&server)
            .await;
        Mock::given(method("POST"))
            .and(path("/commits/alice/bug_to_user_story_v2"))
            .and(body_partial_json(json!({"parent_commit": "parent1"})))
            .respond_with(
                ResponseTemplate::new(200)
                    .set_body_json(json!({"commit": {"commit_hash": "child1"}})),
            )
            .expect(1)
            .mount(&server)
            .await;

        let client = LangSmithClient::with_base_url(server.uri(), "secret");
        let receipt = client.push(&push_request(Some("alice"), true)).await.unwrap();
        assert_eq!(receipt.commit_hash.as_deref(), Some("child1"));
    }

    #[tokio::test]
    async fn test_push_unchanged_manifest() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/repos/-/bug_to_user_story_v2"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({})))
            .mount(&server)
            .await;
        Mock::given(method("GET"))
            .and(path("/commits/-/bug_to_user_story_v2/"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({
                "commits": [{"commit_hash": "same1"}],
                "total": 1
            })))
            .mount(&server)
            .await;
        Mock::given(method("POST"))
            .and(path("/commits/-/bug_to_user_story_v2"))
            .respond_with(ResponseTemplate::new(409).set_body_string("Nothing to commit"))
            .mount(&server)
            .await;

        let client = LangSmithClient::with_base_url(server.uri(), "secret");
        let receipt = client.push(&push_request(None, false)).await.unwrap();
        assert_eq!(receipt.commit_hash.as_deref(), Some("same1"));
    }

    #[tokio::test]
    async fn test_connection_failure_keeps_source() {
        // Nothing listens on this port
        let client = LangSmithClient::with_base_url("http://127.0.0.1:9", "secret");
        let id = PromptIdentifier::parse("owner/name").unwrap();
        match client.pull(&id).await {
            Err(err @ HubError::Request { .. }) => {
                assert!(std::error::Error::source(&err).is_some());
            }
            other => panic!("expected request error, got {:?}", other),
        }
    }
}
