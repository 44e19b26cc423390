use reqwest::header::{HeaderMap, HeaderValue, ACCEPT, AUTHORIZATION, USER_AGENT};
use url::Url;

use crate::auth::Token;
use crate::error::{FetchError, GateError, Result};
use crate::workflow::WorkflowRef;

const API_VERSION: &str = "2022-11-28";
const CLIENT_USER_AGENT: &str = concat!("required-status-check/", env!("CARGO_PKG_VERSION"));

/// GitHub REST API client for reading repository file contents.
pub struct GitHubClient {
    client: reqwest::Client,
    api_url: Url,
}

impl GitHubClient {
    /// Create a new GitHub API client.
    ///
    /// # Arguments
    ///
    /// * `base_url` - GitHub API base URL (e.g., "https://api.github.com")
    /// * `token` - Optional token sent as a bearer credential
    pub fn new(base_url: &str, token: Option<Token>) -> Result<Self> {
        let mut headers = HeaderMap::new();
        headers.insert(USER_AGENT, HeaderValue::from_static(CLIENT_USER_AGENT));
        headers.insert(ACCEPT, HeaderValue::from_static("application/vnd.github+json"));
        headers.insert("x-github-api-version", HeaderValue::from_static(API_VERSION));

        if let Some(token) = token {
            let mut value = HeaderValue::from_str(&format!("Bearer {}", token.as_str()))
                .map_err(|e| GateError::Config(format!("Invalid GitHub token: {e}")))?;
            value.set_sensitive(true);
            headers.insert(AUTHORIZATION, value);
        }

        let client = reqwest::Client::builder()
            .default_headers(headers)
            .build()
            .map_err(|e| GateError::Config(format!("Failed to create HTTP client: {e}")))?;

        let api_url = Url::parse(base_url)
            .map_err(|e| GateError::Config(format!("Invalid GitHub API URL: {e}")))?;
        if api_url.cannot_be_a_base() {
            return Err(GateError::Config(format!("Invalid GitHub API URL: {base_url}")));
        }

        Ok(Self { client, api_url })
    }

    /// `GET /repos/{owner}/{repo}/contents/{path}?ref={ref}`
    fn contents_url(&self, workflow: &WorkflowRef) -> Url {
        let mut url = self.api_url.clone();
        if let Ok(mut segments) = url.path_segments_mut() {
            segments
                .pop_if_empty()
                .extend([
                    "repos",
                    workflow.owner.as_str(),
                    workflow.repo.as_str(),
                    "contents",
                ])
                .extend(workflow.path.split('/'));
        }
        url.query_pairs_mut().append_pair("ref", &workflow.ref_);
        url
    }

    /// Fetch the base64 `content` of a file, in a single attempt.
    ///
    /// A successful response without a `content` string (a directory listing,
    /// a symlink or submodule entry, a proxy's HTML page) is reported as
    /// [`FetchError::NotAFile`] carrying the raw body.
    pub async fn fetch_file_content(
        &self,
        workflow: &WorkflowRef,
    ) -> std::result::Result<String, FetchError> {
        let url = self.contents_url(workflow);
        log::debug!("GET {url}");

        let response = self.client.get(url).send().await?;
        let status = response.status();

        if !status.is_success() {
            let message = response
                .text()
                .await
                .unwrap_or_else(|_| "Unable to read error response".to_string());
            return Err(FetchError::Api {
                status: status.as_u16(),
                message,
            });
        }

        // The exchange succeeded; anything unusable in the body is "not a file".
        let text = response.text().await?;
        let content = serde_json::from_str::<serde_json::Value>(&text)
            .ok()
            .and_then(|body| match body.get("content") {
                Some(serde_json::Value::String(content)) => Some(content.clone()),
                _ => None,
            });

        content.ok_or_else(|| FetchError::NotAFile {
            status: status.as_u16(),
            body: text,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn workflow_ref(path: &str) -> WorkflowRef {
        WorkflowRef {
            owner: "octo".to_string(),
            repo: "hello".to_string(),
            path: path.to_string(),
            ref_: "abc123".to_string(),
        }
    }

    #[test]
    fn test_contents_url() {
        let client = GitHubClient::new("https://api.github.com", None).unwrap();
        let url = client.contents_url(&workflow_ref(".github/workflows/ci.yaml"));
        assert_eq!(
            url.as_str(),
            "https://api.github.com/repos/octo/hello/contents/.github/workflows/ci.yaml?ref=abc123"
        );
    }

    #[test]
    fn test_contents_url_enterprise_base() {
        let client = GitHubClient::new("https://ghe.example.com/api/v3/", None).unwrap();
        let url = client.contents_url(&workflow_ref("ci.yaml"));
        assert_eq!(
            url.as_str(),
            "https://ghe.example.com/api/v3/repos/octo/hello/contents/ci.yaml?ref=abc123"
        );
    }

    #[test]
    fn test_contents_url_encodes_segments() {
        let client = GitHubClient::new("https://api.github.com", None).unwrap();
        let url = client.contents_url(&workflow_ref(".github/workflows/my ci.yaml"));
        assert!(url
            .as_str()
            .contains("/contents/.github/workflows/my%20ci.yaml?"));
    }

    #[test]
    fn test_invalid_base_url() {
        assert!(matches!(
            GitHubClient::new("not a url", None),
            Err(GateError::Config(_))
        ));
        assert!(matches!(
            GitHubClient::new("mailto:someone@example.com", None),
            Err(GateError::Config(_))
        ));
    }
}
