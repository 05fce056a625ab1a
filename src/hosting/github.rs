//! GitHub v3 API client
//!
//! Implements the two operations the workflow consumes. Token
//! authentication and the mandatory User-Agent header are attached to
//! every request; everything else about the API is out of scope.

use crate::error::HostingError;
use crate::hosting::{HostingClient, PullRequest, PullRequestSpec, RepoMetadata};
use async_trait::async_trait;
use reqwest::header::{ACCEPT, AUTHORIZATION};
use reqwest::{Client, Response, StatusCode};
use std::time::Duration;

/// GitHub API base URL
const GITHUB_API_URL: &str = "https://api.github.com";

/// Media type GitHub recommends for v3 requests
const GITHUB_ACCEPT: &str = "application/vnd.github+json";

/// Timeout for API requests (30 seconds)
const DEFAULT_TIMEOUT: Duration = Duration::from_secs(30);

/// User-Agent header, required by the GitHub API
const DEFAULT_USER_AGENT: &str = concat!("exup/", env!("CARGO_PKG_VERSION"));

/// GitHub implementation of `HostingClient`
pub struct GitHubClient {
    client: Client,
    base_url: String,
    token: String,
}

impl GitHubClient {
    /// Creates a client against api.github.com
    pub fn new(token: impl Into<String>) -> Result<Self, HostingError> {
        Self::with_base_url(GITHUB_API_URL, token)
    }

    /// Creates a client against a custom API root (for testing)
    pub fn with_base_url(
        base_url: impl Into<String>,
        token: impl Into<String>,
    ) -> Result<Self, HostingError> {
        let base_url = base_url.into();
        let client = Client::builder()
            .timeout(DEFAULT_TIMEOUT)
            .user_agent(DEFAULT_USER_AGENT)
            .build()
            .map_err(|e| HostingError::Network {
                url: base_url.clone(),
                message: format!("failed to create HTTP client: {}", e),
            })?;

        Ok(Self {
            client,
            base_url,
            token: token.into(),
        })
    }

    fn repo_url(&self, full_name: &str) -> String {
        format!("{}/repos/{}", self.base_url, full_name)
    }

    fn pulls_url(&self, full_name: &str) -> String {
        format!("{}/repos/{}/pulls", self.base_url, full_name)
    }

    fn auth_value(&self) -> String {
        format!("token {}", self.token)
    }

    /// Maps non-success statuses onto the error taxonomy
    async fn check_status(
        &self,
        response: Response,
        full_name: &str,
    ) -> Result<Response, HostingError> {
        let status = response.status();
        if status == StatusCode::NOT_FOUND {
            return Err(HostingError::RepoNotFound {
                repo: full_name.to_string(),
            });
        }
        if !status.is_success() {
            let detail = response.text().await.unwrap_or_default();
            return Err(HostingError::Api {
                repo: full_name.to_string(),
                message: if detail.is_empty() {
                    format!("HTTP {}", status)
                } else {
                    format!("HTTP {}: {}", status, detail)
                },
            });
        }
        Ok(response)
    }
}

#[async_trait]
impl HostingClient for GitHubClient {
    async fn get_repo(&self, full_name: &str) -> Result<RepoMetadata, HostingError> {
        let url = self.repo_url(full_name);
        let response = self
            .client
            .get(&url)
            .header(AUTHORIZATION, self.auth_value())
            .header(ACCEPT, GITHUB_ACCEPT)
            .send()
            .await
            .map_err(|e| HostingError::Network {
                url: url.clone(),
                message: e.to_string(),
            })?;

        let response = self.check_status(response, full_name).await?;
        response
            .json::<RepoMetadata>()
            .await
            .map_err(|e| HostingError::Api {
                repo: full_name.to_string(),
                message: format!("invalid response: {}", e),
            })
    }

    async fn create_pull(
        &self,
        full_name: &str,
        spec: &PullRequestSpec,
    ) -> Result<PullRequest, HostingError> {
        let url = self.pulls_url(full_name);
        let response = self
            .client
            .post(&url)
            .header(AUTHORIZATION, self.auth_value())
            .header(ACCEPT, GITHUB_ACCEPT)
            .json(spec)
            .send()
            .await
            .map_err(|e| HostingError::Network {
                url: url.clone(),
                message: e.to_string(),
            })?;

        let response = self.check_status(response, full_name).await?;
        response
            .json::<PullRequest>()
            .await
            .map_err(|e| HostingError::Api {
                repo: full_name.to_string(),
                message: format!("invalid response: {}", e),
            })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_repo_url() {
        let client = GitHubClient::new("t0ken").unwrap();
        assert_eq!(
            client.repo_url("ARMmbed/blinky"),
            "https://api.github.com/repos/ARMmbed/blinky"
        );
    }

    #[test]
    fn test_pulls_url() {
        let client = GitHubClient::new("t0ken").unwrap();
        assert_eq!(
            client.pulls_url("ARMmbed/blinky"),
            "https://api.github.com/repos/ARMmbed/blinky/pulls"
        );
    }

    #[test]
    fn test_custom_base_url() {
        let client = GitHubClient::with_base_url("http://127.0.0.1:8080", "t0ken").unwrap();
        assert_eq!(
            client.repo_url("o/r"),
            "http://127.0.0.1:8080/repos/o/r"
        );
    }

    #[test]
    fn test_auth_value() {
        let client = GitHubClient::new("t0ken").unwrap();
        assert_eq!(client.auth_value(), "token t0ken");
    }
}
