//! GitHub raw content host, versioned by repository tags

use crate::config;
use crate::score::error::{RegistryError, VersionTokenError};
use crate::score::registry::RegistryHost;
use serde::Deserialize;
use tracing::warn;
use url::Url;

/// Default base URL for the GitHub API
const DEFAULT_BASE_URL: &str = "https://api.github.com";

/// Response from the GitHub tags API
#[derive(Debug, Deserialize)]
struct Tag {
    name: String,
}

/// Registry host for `https://raw.githubusercontent.com/{owner}/{repo}/{ref}/...`
///
/// The ref path segment is the version slot. A branch name or commit hash in
/// that slot is extractable but will not parse as semver, which is exactly
/// what an unpinned import looks like downstream.
pub struct GithubRawRegistry {
    client: reqwest::Client,
    base_url: String,
}

impl GithubRawRegistry {
    /// Creates a new GithubRawRegistry with a custom base URL
    pub fn new(base_url: &str) -> Self {
        Self {
            client: config::http_client(),
            base_url: base_url.trim_end_matches('/').to_string(),
        }
    }

    /// Owner, repository and ref from a raw content specifier
    fn locate(specifier: &Url) -> Option<(String, String, Option<String>)> {
        if specifier.host_str() != Some("raw.githubusercontent.com") {
            return None;
        }
        let mut segments = specifier.path_segments()?;
        let owner = segments.next().filter(|s| !s.is_empty())?;
        let repo = segments.next().filter(|s| !s.is_empty())?;
        let gitref = segments
            .next()
            .filter(|s| !s.is_empty())
            .map(str::to_string);
        Some((owner.to_string(), repo.to_string(), gitref))
    }
}

impl Default for GithubRawRegistry {
    fn default() -> Self {
        Self::new(DEFAULT_BASE_URL)
    }
}

#[async_trait::async_trait]
impl RegistryHost for GithubRawRegistry {
    fn name(&self) -> &'static str {
        "raw.githubusercontent.com"
    }

    fn matches(&self, specifier: &Url) -> bool {
        Self::locate(specifier).is_some()
    }

    fn pinned_version(&self, specifier: &Url) -> Result<String, VersionTokenError> {
        match Self::locate(specifier) {
            // A raw URL without a ref segment has no version slot at all
            Some((_, _, Some(gitref))) => Ok(gitref),
            _ => Err(VersionTokenError {
                specifier: specifier.to_string(),
            }),
        }
    }

    async fn list_versions(&self, specifier: &Url) -> Result<Vec<String>, RegistryError> {
        let Some((owner, repo, _)) = Self::locate(specifier) else {
            return Err(RegistryError::InvalidResponse(format!(
                "Not a GitHub raw content specifier: {specifier}"
            )));
        };

        let url = format!("{}/repos/{}/{}/tags", self.base_url, owner, repo);

        let response = self
            .client
            .get(&url)
            .header("Accept", "application/vnd.github+json")
            .send()
            .await?;

        let status = response.status();

        if status == reqwest::StatusCode::NOT_FOUND {
            return Err(RegistryError::NotFound(format!("{owner}/{repo}")));
        }

        if status == reqwest::StatusCode::TOO_MANY_REQUESTS {
            let retry_after = response
                .headers()
                .get("retry-after")
                .and_then(|v| v.to_str().ok())
                .and_then(|v| v.parse().ok());
            return Err(RegistryError::RateLimited {
                retry_after_secs: retry_after,
            });
        }

        if !status.is_success() {
            warn!("GitHub API returned status {}: {}", status, url);
            return Err(RegistryError::InvalidResponse(format!(
                "Unexpected status: {}",
                status
            )));
        }

        let tags: Vec<Tag> = response.json().await.map_err(|e| {
            warn!("Failed to parse GitHub tags response: {}", e);
            RegistryError::InvalidResponse(e.to_string())
        })?;

        Ok(tags.into_iter().map(|t| t.name).collect())
    }
}
