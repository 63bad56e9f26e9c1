//! deno.land registry (third-party /x modules and /std)

use crate::config;
use crate::score::error::{RegistryError, VersionTokenError};
use crate::score::registry::{RegistryHost, split_version_segment};
use serde::Deserialize;
use tracing::warn;
use url::Url;

/// Default base URL for the deno.land CDN API
const DEFAULT_BASE_URL: &str = "https://cdn.deno.land";

/// Response from the deno.land versions API
#[derive(Debug, Deserialize)]
struct DenoVersionsResponse {
    versions: Vec<String>,
}

/// Registry host for `https://deno.land/x/{module}` and `https://deno.land/std`
pub struct DenoLandRegistry {
    client: reqwest::Client,
    base_url: String,
}

impl DenoLandRegistry {
    /// Creates a new DenoLandRegistry with a custom base URL
    pub fn new(base_url: &str) -> Self {
        Self {
            client: config::http_client(),
            base_url: base_url.trim_end_matches('/').to_string(),
        }
    }

    /// Module name and version token from a deno.land specifier.
    ///
    /// Recognizes `/x/{module}@{version}/...` and `/std@{version}/...`; the
    /// version part may be absent (an unpinned import).
    fn locate(specifier: &Url) -> Option<(String, Option<String>)> {
        if specifier.host_str() != Some("deno.land") {
            return None;
        }
        let mut segments = specifier.path_segments()?;
        let first = segments.next()?;

        if first == "x" {
            let (name, version) = split_version_segment(segments.next()?);
            if name.is_empty() {
                return None;
            }
            return Some((name.to_string(), version.map(str::to_string)));
        }

        let (name, version) = split_version_segment(first);
        if name == "std" {
            return Some((name.to_string(), version.map(str::to_string)));
        }

        None
    }
}

impl Default for DenoLandRegistry {
    fn default() -> Self {
        Self::new(DEFAULT_BASE_URL)
    }
}

#[async_trait::async_trait]
impl RegistryHost for DenoLandRegistry {
    fn name(&self) -> &'static str {
        "deno.land"
    }

    fn matches(&self, specifier: &Url) -> bool {
        Self::locate(specifier).is_some()
    }

    fn pinned_version(&self, specifier: &Url) -> Result<String, VersionTokenError> {
        match Self::locate(specifier) {
            Some((_, version)) => Ok(version.unwrap_or_default()),
            None => Err(VersionTokenError {
                specifier: specifier.to_string(),
            }),
        }
    }

    async fn list_versions(&self, specifier: &Url) -> Result<Vec<String>, RegistryError> {
        let Some((module, _)) = Self::locate(specifier) else {
            return Err(RegistryError::InvalidResponse(format!(
                "Not a deno.land module: {specifier}"
            )));
        };

        let url = format!("{}/{}/meta/versions.json", self.base_url, module);

        let response = self.client.get(&url).send().await?;

        let status = response.status();

        if status == reqwest::StatusCode::NOT_FOUND {
            return Err(RegistryError::NotFound(module));
        }

        if !status.is_success() {
            warn!("deno.land API returned status {}: {}", status, url);
            return Err(RegistryError::InvalidResponse(format!(
                "Unexpected status: {}",
                status
            )));
        }

        let meta: DenoVersionsResponse = response.json().await.map_err(|e| {
            warn!("Failed to parse deno.land versions response: {}", e);
            RegistryError::InvalidResponse(e.to_string())
        })?;

        Ok(meta.versions)
    }
}
